use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Easing;
use crate::animation::value::Value;
use crate::sequence::model::{Repeat, RepeatType, SubjectId};

/// Compiled sequence: one entry per animated subject.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequencePlan {
    /// Total length in seconds (the `duration` override if one was given).
    pub duration: f64,
    pub subjects: BTreeMap<SubjectId, SubjectPlan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CompileWarning>,
}

impl SequencePlan {
    pub fn subject(&self, id: &str) -> Option<&SubjectPlan> {
        self.subjects.get(&SubjectId::from(id))
    }

    /// Number of (subject, property) tracks.
    pub fn track_count(&self) -> usize {
        self.subjects.values().map(|s| s.keyframes.len()).sum()
    }
}

/// Keyframes and timing for every animated property of one subject.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectPlan {
    pub keyframes: BTreeMap<String, Vec<Option<Value>>>,
    pub transition: BTreeMap<String, TrackTransition>,
}

impl SubjectPlan {
    pub fn keyframes(&self, property: &str) -> Option<&[Option<Value>]> {
        self.keyframes.get(property).map(Vec::as_slice)
    }

    pub fn transition(&self, property: &str) -> Option<&TrackTransition> {
        self.transition.get(property)
    }
}

/// Normalized timing for one track.
///
/// `times` is aligned 1:1 with the keyframes; `ease` has one entry per sample that starts a
/// span, so it is one shorter than `times` when the track ends on a padded hold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackTransition {
    pub duration: f64,
    pub ease: Vec<Easing>,
    pub times: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_type: Option<RepeatType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_delay: Option<f64>,
    /// Passthrough options from the sequence and its default transition.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A property contribution that was skipped instead of failing the compilation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileWarning {
    pub subject: SubjectId,
    pub property: String,
    pub message: String,
}

impl std::fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.subject, self.property, self.message)
    }
}
