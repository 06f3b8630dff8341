use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::animation::ease::EaseSpec;
use crate::animation::spring::SpringParams;
use crate::animation::value::KeyframeList;
use crate::foundation::error::{SeqlineError, SeqlineResult};
use crate::sequence::at::At;
use crate::sequence::stagger::Delay;

/// Property name used when a segment animates a bare value instead of named properties.
pub const DEFAULT_PROPERTY: &str = "default";

/// Opaque handle for an animated subject (element, motion value, object).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for SubjectId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// One subject or several; several subjects are staggered by index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    One(SubjectId),
    Many(Vec<SubjectId>),
}

impl Targets {
    pub fn as_slice(&self) -> &[SubjectId] {
        match self {
            Self::One(id) => std::slice::from_ref(id),
            Self::Many(ids) => ids,
        }
    }
}

impl From<&str> for Targets {
    fn from(v: &str) -> Self {
        Self::One(v.into())
    }
}

impl From<SubjectId> for Targets {
    fn from(v: SubjectId) -> Self {
        Self::One(v)
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(v: [&str; N]) -> Self {
        Self::Many(v.into_iter().map(SubjectId::from).collect())
    }
}

impl From<Vec<SubjectId>> for Targets {
    fn from(v: Vec<SubjectId>) -> Self {
        Self::Many(v)
    }
}

/// What a segment animates: named properties, or one bare value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentValues {
    Properties(BTreeMap<String, KeyframeList>),
    Value(KeyframeList),
}

impl Default for SegmentValues {
    fn default() -> Self {
        Self::Properties(BTreeMap::new())
    }
}

impl SegmentValues {
    /// `(property, keyframes)` pairs in property-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyframeList)> {
        let (props, value) = match self {
            Self::Properties(map) => (Some(map), None),
            Self::Value(kf) => (None, Some(kf)),
        };
        props
            .into_iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
            .chain(value.map(|kf| (DEFAULT_PROPERTY, kf)))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Properties(map) => map.is_empty(),
            Self::Value(kf) => kf.is_empty(),
        }
    }
}

/// Interpolation strategy for a property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    #[default]
    Keyframes,
    Tween,
    Spring,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    Loop,
    Reverse,
    Mirror,
}

/// Sequence-level repeat count, passed through to the output transitions untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Count(u32),
    Infinite,
}

impl Serialize for Repeat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Count(n) => serializer.serialize_u32(*n),
            Self::Infinite => serializer.serialize_str("infinity"),
        }
    }
}

impl<'de> Deserialize<'de> for Repeat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(u32),
            Word(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(n) => Ok(Self::Count(n)),
            Repr::Word(w) if w.eq_ignore_ascii_case("infinity") => Ok(Self::Infinite),
            Repr::Word(w) => Err(serde::de::Error::custom(format!(
                "repeat must be a count or \"infinity\", got \"{w}\""
            ))),
        }
    }
}

/// Timing options for a segment, a single property of it, or the sequence-wide default.
///
/// Unknown keys are kept in `extra` and passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<EaseSpec>,
    /// Offsets in `[0, 1]`, one per keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<Delay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<At>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_type: Option<RepeatType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_delay: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransitionKind>,
    #[serde(flatten)]
    pub spring: SpringParams,
    /// Per-property overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Transition>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Transition {
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_ease(mut self, ease: impl Into<EaseSpec>) -> Self {
        self.ease = Some(ease.into());
        self
    }

    pub fn with_times(mut self, times: impl Into<Vec<f64>>) -> Self {
        self.times = Some(times.into());
        self
    }

    pub fn with_delay(mut self, delay: impl Into<Delay>) -> Self {
        self.delay = Some(delay.into());
        self
    }

    pub fn with_at(mut self, at: impl Into<At>) -> Self {
        self.at = Some(at.into());
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn with_repeat_type(mut self, repeat_type: RepeatType) -> Self {
        self.repeat_type = Some(repeat_type);
        self
    }

    pub fn with_kind(mut self, kind: TransitionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.kind = Some(TransitionKind::Spring);
        self.spring = spring;
        self
    }

    /// Override timing for a single property.
    pub fn with_property(mut self, property: impl Into<String>, transition: Transition) -> Self {
        self.properties.insert(property.into(), transition);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub(crate) fn validate(&self, context: &str) -> SeqlineResult<()> {
        if let Some(d) = self.duration
            && !(d.is_finite() && d >= 0.0)
        {
            return Err(SeqlineError::validation(format!(
                "{context}: duration must be a non-negative number of seconds, got {d}"
            )));
        }
        if let Some(times) = &self.times {
            validate_times(times).map_err(|msg| SeqlineError::validation(format!("{context}: {msg}")))?;
        }
        if let Some(EaseSpec::List(list)) = &self.ease
            && list.is_empty()
        {
            return Err(SeqlineError::validation(format!(
                "{context}: ease list must not be empty"
            )));
        }
        if let Some(d) = self.repeat_delay
            && !d.is_finite()
        {
            return Err(SeqlineError::validation(format!(
                "{context}: repeat_delay must be finite, got {d}"
            )));
        }
        for (property, nested) in &self.properties {
            if !nested.properties.is_empty() {
                return Err(SeqlineError::validation(format!(
                    "{context}: override for \"{property}\" cannot nest further overrides"
                )));
            }
            nested.validate(&format!("{context} ({property})"))?;
        }
        Ok(())
    }
}

fn validate_times(times: &[f64]) -> Result<(), String> {
    if times.is_empty() {
        return Err("times must not be empty".to_owned());
    }
    for (i, t) in times.iter().enumerate() {
        if !(t.is_finite() && (0.0..=1.0).contains(t)) {
            return Err(format!("times[{i}] = {t} is outside [0, 1]"));
        }
    }
    if times.windows(2).any(|w| w[1] < w[0]) {
        return Err(format!("times must be non-decreasing, got {times:?}"));
    }
    Ok(())
}

/// One instruction: animate `values` on `targets`.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub targets: Targets,
    pub values: SegmentValues,
    pub transition: Transition,
}

impl Segment {
    pub fn new(targets: impl Into<Targets>, values: SegmentValues) -> Self {
        Self {
            targets: targets.into(),
            values,
            transition: Transition::default(),
        }
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub(crate) fn validate(&self, index: usize) -> SeqlineResult<()> {
        let context = format!("segment {index}");
        let targets = self.targets.as_slice();
        if targets.is_empty() {
            return Err(SeqlineError::validation(format!(
                "{context}: targets must not be empty"
            )));
        }
        if self.values.is_empty() {
            return Err(SeqlineError::validation(format!(
                "{context}: nothing to animate"
            )));
        }
        for (property, keyframes) in self.values.iter() {
            if keyframes.is_empty() {
                return Err(SeqlineError::validation(format!(
                    "{context}: \"{property}\" has no keyframes"
                )));
            }
        }
        self.transition.validate(&context)
    }
}

/// Entry of a sequence definition.
#[derive(Clone, Debug, PartialEq)]
pub enum SequenceItem {
    Segment(Segment),
    /// Label at the current clock.
    Label(String),
    /// Label at an explicit position; does not move the clock.
    AnnotatedLabel { name: String, at: At },
}

impl From<Segment> for SequenceItem {
    fn from(v: Segment) -> Self {
        Self::Segment(v)
    }
}

impl Serialize for SequenceItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeTuple};
        match self {
            Self::Label(name) => serializer.serialize_str(name),
            Self::AnnotatedLabel { name, at } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("at", at)?;
                map.end()
            }
            Self::Segment(seg) => {
                let mut tup = serializer.serialize_tuple(3)?;
                tup.serialize_element(&seg.targets)?;
                tup.serialize_element(&seg.values)?;
                tup.serialize_element(&seg.transition)?;
                tup.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for SequenceItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Label(String),
            Segment(Vec<serde_json::Value>),
            Annotated { name: String, at: At },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Label(name) => Ok(Self::Label(name)),
            Repr::Segment(parts) => {
                if !(2..=3).contains(&parts.len()) {
                    return Err(D::Error::custom(format!(
                        "segment must be [targets, values] or [targets, values, transition], got {} elements",
                        parts.len()
                    )));
                }
                let mut parts = parts.into_iter();
                let mut next = || parts.next().unwrap_or(serde_json::Value::Null);
                let targets: Targets = serde_json::from_value(next())
                    .map_err(|e| D::Error::custom(format!("segment targets: {e}")))?;
                let values: SegmentValues = serde_json::from_value(next())
                    .map_err(|e| D::Error::custom(format!("segment values: {e}")))?;
                let transition = match next() {
                    serde_json::Value::Null => Transition::default(),
                    raw => serde_json::from_value(raw)
                        .map_err(|e| D::Error::custom(format!("segment transition: {e}")))?,
                };
                Ok(Self::Segment(Segment {
                    targets,
                    values,
                    transition,
                }))
            }
            Repr::Annotated { name, at } => Ok(Self::AnnotatedLabel { name, at }),
        }
    }
}

/// Sequence-wide options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceOptions {
    /// Overrides the computed total duration in every output transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Fallback duration, ease and spring settings for every segment.
    #[serde(default)]
    pub default_transition: Transition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_type: Option<RepeatType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_delay: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SequenceOptions {
    pub(crate) fn validate(&self) -> SeqlineResult<()> {
        if let Some(d) = self.duration
            && !(d.is_finite() && d >= 0.0)
        {
            return Err(SeqlineError::validation(format!(
                "sequence duration must be a non-negative number of seconds, got {d}"
            )));
        }
        if let Some(d) = self.delay
            && !d.is_finite()
        {
            return Err(SeqlineError::validation(format!(
                "sequence delay must be finite, got {d}"
            )));
        }
        self.default_transition.validate("default transition")
    }
}

/// A complete sequence definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub items: Vec<SequenceItem>,
    #[serde(default)]
    pub options: SequenceOptions,
}

impl Sequence {
    /// Parse the JSON form.
    pub fn from_json_str(s: &str) -> SeqlineResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/model.rs"]
mod tests;
