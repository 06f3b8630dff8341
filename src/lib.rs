#![forbid(unsafe_code)]
//! Declarative animation sequences compiled into normalized keyframe tracks.
//!
//! A [`Sequence`] is an ordered list of segments and labels. [`Sequencer::compile`] places
//! every segment on one shared clock and returns a [`SequencePlan`]: per subject and
//! property, a keyframe list with aligned `times` in `[0, 1]`, per-span easings, and the
//! total duration.

pub mod animation;
pub mod compile;
pub mod foundation;
pub mod sequence;

pub use animation::ease::{EaseSpec, Easing, EasingFn, EasingRegistry};
pub use animation::spring::{SimulatedSpring, SpringOracle, SpringParams, SpringResolution};
pub use animation::value::{KeyframeList, Value};
pub use compile::compiler::{Sequencer, compile};
pub use compile::plan::{CompileWarning, SequencePlan, SubjectPlan, TrackTransition};
pub use compile::settings::SequencerSettings;
pub use foundation::error::{SeqlineError, SeqlineResult};
pub use sequence::at::At;
pub use sequence::dsl::{SegmentBuilder, SequenceBuilder};
pub use sequence::model::{
    DEFAULT_PROPERTY, Repeat, RepeatType, Segment, SegmentValues, Sequence, SequenceItem,
    SequenceOptions, SubjectId, Targets, Transition, TransitionKind,
};
pub use sequence::stagger::{Delay, StaggerFn, StaggerFrom, StaggerSpec, stagger};
