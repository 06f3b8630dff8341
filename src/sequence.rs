pub mod at;
pub mod dsl;
pub mod model;
pub mod stagger;
