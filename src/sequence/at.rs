//! Segment positions and the label table they resolve against.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SeqlineError, SeqlineResult};

/// Where a segment (or annotated label) is placed on the shared clock.
#[derive(Clone, Debug, PartialEq)]
pub enum At {
    /// Absolute time in seconds.
    Absolute(f64),
    /// `"+n"` / `"-n"`: offset from the current clock.
    Relative(f64),
    /// `"<"`: start of the previous segment.
    Previous,
    /// `"<+n"` / `"<-n"`: offset from the start of the previous segment.
    PreviousOffset(f64),
    /// Named label.
    Label(String),
}

impl FromStr for At {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "<" {
            return Ok(Self::Previous);
        }
        if let Some(rest) = s.strip_prefix('<') {
            if let Some(offset) = parse_signed(rest) {
                return Ok(Self::PreviousOffset(offset));
            }
        }
        if let Some(offset) = parse_signed(s) {
            return Ok(Self::Relative(offset));
        }
        Ok(Self::Label(s.to_owned()))
    }
}

fn parse_signed(s: &str) -> Option<f64> {
    if !(s.starts_with('+') || s.starts_with('-')) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl std::fmt::Display for At {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute(t) => write!(f, "{t}"),
            Self::Relative(d) => write!(f, "{d:+}"),
            Self::Previous => f.write_str("<"),
            Self::PreviousOffset(d) => write!(f, "<{d:+}"),
            Self::Label(name) => f.write_str(name),
        }
    }
}

impl From<f64> for At {
    fn from(v: f64) -> Self {
        Self::Absolute(v)
    }
}

impl From<&str> for At {
    fn from(v: &str) -> Self {
        match v.parse() {
            Ok(at) => at,
            Err(never) => match never {},
        }
    }
}

impl Serialize for At {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Absolute(t) => serializer.serialize_f64(*t),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for At {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Time(f64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Time(t) => Ok(Self::Absolute(t)),
            Repr::Str(s) => Ok(Self::from(s.as_str())),
        }
    }
}

/// Label name → absolute time. Redefining a label overwrites it.
#[derive(Clone, Debug, Default)]
pub struct LabelTable {
    times: HashMap<String, f64>,
}

impl LabelTable {
    /// Record `name` at `time`.
    pub fn define(&mut self, name: impl Into<String>, time: f64) {
        self.times.insert(name.into(), time);
    }

    /// Time recorded for `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.times.get(name).copied()
    }
}

/// Resolve `at` to an absolute start time.
///
/// `current` is the clock (end of the furthest chained segment so far), `previous` the start
/// of the previous segment. Offsets never resolve before zero.
pub fn resolve_at(
    at: &At,
    current: f64,
    previous: f64,
    labels: &LabelTable,
) -> SeqlineResult<f64> {
    match at {
        At::Absolute(t) => {
            if !(t.is_finite() && *t >= 0.0) {
                return Err(SeqlineError::validation(format!(
                    "absolute position must be a non-negative time, got {t}"
                )));
            }
            Ok(*t)
        }
        At::Relative(d) => offset(current, *d),
        At::Previous => Ok(previous),
        At::PreviousOffset(d) => offset(previous, *d),
        At::Label(name) => labels
            .get(name)
            .ok_or_else(|| SeqlineError::config(format!("unknown label \"{name}\""))),
    }
}

// Offsets clamp at zero but must stay on a finite timeline.
fn offset(base: f64, d: f64) -> SeqlineResult<f64> {
    let t = base + d;
    if !t.is_finite() {
        return Err(SeqlineError::validation(format!(
            "position offset {d:+} from {base} leaves the timeline"
        )));
    }
    Ok(t.max(0.0))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/at.rs"]
mod tests;
