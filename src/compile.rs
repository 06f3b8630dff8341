pub mod compiler;
pub(crate) mod options;
pub mod plan;
pub(crate) mod repeat;
pub mod settings;
pub(crate) mod track;
