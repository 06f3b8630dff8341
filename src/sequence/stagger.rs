use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::ease::{Easing, EasingRegistry};
use crate::foundation::error::{SeqlineError, SeqlineResult};

/// Which target the stagger counts outward from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StaggerFrom {
    #[default]
    First,
    Last,
    Center,
    /// Arbitrary (possibly fractional) origin index.
    Index(f64),
}

impl StaggerFrom {
    fn origin(&self, total: usize) -> f64 {
        let last = total.saturating_sub(1) as f64;
        match self {
            Self::First => 0.0,
            Self::Last => last,
            Self::Center => last / 2.0,
            Self::Index(i) => *i,
        }
    }
}

impl Serialize for StaggerFrom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::First => serializer.serialize_str("first"),
            Self::Last => serializer.serialize_str("last"),
            Self::Center => serializer.serialize_str("center"),
            Self::Index(i) => serializer.serialize_f64(*i),
        }
    }
}

impl<'de> Deserialize<'de> for StaggerFrom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(f64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(i) => Ok(Self::Index(i)),
            Repr::Name(name) => match name.as_str() {
                "first" => Ok(Self::First),
                "last" => Ok(Self::Last),
                "center" => Ok(Self::Center),
                other => Err(serde::de::Error::custom(format!(
                    "unknown stagger origin \"{other}\" (expected first, last, center or an index)"
                ))),
            },
        }
    }
}

/// Per-target delay that grows with distance from an origin target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaggerSpec {
    /// Seconds added per step of distance.
    #[serde(rename = "stagger")]
    pub each: f64,
    #[serde(default)]
    pub from: StaggerFrom,
    /// Constant added to every delay.
    #[serde(default)]
    pub start_delay: f64,
    /// Optional easing applied across the full delay range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Easing>,
}

/// Stagger of `each` seconds between consecutive targets.
pub fn stagger(each: f64) -> StaggerSpec {
    StaggerSpec {
        each,
        from: StaggerFrom::First,
        start_delay: 0.0,
        ease: None,
    }
}

impl StaggerSpec {
    pub fn from(mut self, from: StaggerFrom) -> Self {
        self.from = from;
        self
    }

    pub fn start_delay(mut self, delay: f64) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn ease(mut self, ease: impl Into<Easing>) -> Self {
        self.ease = Some(ease.into());
        self
    }

    /// Delay for target `index` out of `total`.
    pub fn delay(&self, index: usize, total: usize, easings: &EasingRegistry) -> SeqlineResult<f64> {
        if !(self.each.is_finite() && self.start_delay.is_finite()) {
            return Err(SeqlineError::validation(format!(
                "stagger step and start delay must be finite, got {} and {}",
                self.each, self.start_delay
            )));
        }
        let origin = self.from.origin(total);
        let distance = (index as f64 - origin).abs();
        let mut delay = self.each * distance;

        if let Some(ease) = &self.ease {
            let max_delay = total as f64 * self.each;
            if max_delay != 0.0 {
                delay = easings.apply(ease, delay / max_delay)? * max_delay;
            }
        }
        Ok(self.start_delay + delay)
    }
}

/// Caller-supplied `(index, total) -> seconds` delay.
#[derive(Clone)]
pub struct StaggerFn(Arc<dyn Fn(usize, usize) -> f64 + Send + Sync>);

impl StaggerFn {
    pub fn new(f: impl Fn(usize, usize) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, index: usize, total: usize) -> f64 {
        (self.0)(index, total)
    }
}

impl std::fmt::Debug for StaggerFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaggerFn(..)")
    }
}

impl PartialEq for StaggerFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// `delay` option: a constant, a stagger description, or a function of the target index.
#[derive(Clone, Debug, PartialEq)]
pub enum Delay {
    Fixed(f64),
    Stagger(StaggerSpec),
    Custom(StaggerFn),
}

impl Delay {
    /// Delay in seconds for target `index` of a segment with `total` targets.
    pub fn resolve(&self, index: usize, total: usize, easings: &EasingRegistry) -> SeqlineResult<f64> {
        let delay = match self {
            Self::Fixed(d) => *d,
            Self::Stagger(spec) => spec.delay(index, total, easings)?,
            Self::Custom(f) => f.call(index, total),
        };
        if !delay.is_finite() {
            return Err(SeqlineError::validation(format!(
                "delay for target {index} is not finite ({delay})"
            )));
        }
        Ok(delay)
    }
}

impl From<f64> for Delay {
    fn from(v: f64) -> Self {
        Self::Fixed(v)
    }
}

impl From<StaggerSpec> for Delay {
    fn from(v: StaggerSpec) -> Self {
        Self::Stagger(v)
    }
}

impl From<StaggerFn> for Delay {
    fn from(v: StaggerFn) -> Self {
        Self::Custom(v)
    }
}

impl Serialize for Delay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Fixed(d) => serializer.serialize_f64(*d),
            Self::Stagger(spec) => spec.serialize(serializer),
            Self::Custom(_) => Err(serde::ser::Error::custom(
                "function delays cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Delay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        // Buffered so a malformed stagger object reports its own field errors.
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Self::Fixed)
                .ok_or_else(|| D::Error::custom(format!("delay {n} is not a finite number"))),
            obj @ serde_json::Value::Object(_) => StaggerSpec::deserialize(obj)
                .map(Self::Stagger)
                .map_err(|e| D::Error::custom(format!("invalid stagger delay: {e}"))),
            other => Err(D::Error::custom(format!(
                "delay must be a number of seconds or a stagger object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/stagger.rs"]
mod tests;
