use serde::{Deserialize, Serialize};

/// A keyframe value as authored: a number or an opaque string such as `"10px"` or `"#fff"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Plain number.
    Number(f64),
    /// Unit-bearing, colour, or keyword value.
    Text(String),
}

impl Value {
    /// Numeric payload, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Ordered keyframes for one property of one segment. `None` entries are placeholders
/// meaning "whatever the value is at this point".
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeyframeList(pub Vec<Option<Value>>);

impl KeyframeList {
    /// A single target value.
    pub fn one(value: impl Into<Value>) -> Self {
        Self(vec![Some(value.into())])
    }

    /// Explicit keyframes, every one defined.
    pub fn of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self(values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no keyframes were authored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when there are exactly two defined numeric keyframes.
    pub(crate) fn numeric_pair(&self) -> Option<(f64, f64)> {
        match self.0.as_slice() {
            [Some(a), Some(b)] => Some((a.as_number()?, b.as_number()?)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for KeyframeList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<Option<Value>>),
            One(Value),
        }

        match Repr::deserialize(deserializer)? {
            Repr::List(values) => Ok(Self(values)),
            Repr::One(value) => Ok(Self(vec![Some(value)])),
        }
    }
}

impl From<Value> for KeyframeList {
    fn from(v: Value) -> Self {
        Self(vec![Some(v)])
    }
}

impl From<f64> for KeyframeList {
    fn from(v: f64) -> Self {
        Self::one(v)
    }
}

impl From<i32> for KeyframeList {
    fn from(v: i32) -> Self {
        Self::one(v)
    }
}

impl From<&str> for KeyframeList {
    fn from(v: &str) -> Self {
        Self::one(v)
    }
}

impl<const N: usize> From<[f64; N]> for KeyframeList {
    fn from(v: [f64; N]) -> Self {
        Self::of(v)
    }
}

impl From<Vec<Option<Value>>> for KeyframeList {
    fn from(v: Vec<Option<Value>>) -> Self {
        Self(v)
    }
}

/// Whether `value` can be interpolated when it drives `property`.
pub fn is_animatable(value: &Value, property: &str) -> bool {
    if property == "zIndex" {
        return false;
    }
    match value {
        Value::Number(_) => true,
        Value::Text(s) => !s.starts_with("url(") && (s == "0" || is_complex(s)),
    }
}

// Strings that carry at least one number or colour token can be mixed component-wise.
fn is_complex(s: &str) -> bool {
    if s.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    let lower = s.to_ascii_lowercase();
    ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .any(|p| lower.contains(p))
        || lower
            .split('#')
            .skip(1)
            .any(|rest| rest.chars().take_while(char::is_ascii_hexdigit).count() >= 3)
}

/// Explain why the authored keyframes cannot animate, or `None` when they can.
///
/// A pair is rejected when either endpoint is non-animatable. Placeholders are resolved at
/// play time and are not judged here.
pub fn non_animatable_reason(keyframes: &[Option<Value>], property: &str) -> Option<String> {
    if property == "display" || property == "visibility" {
        return None;
    }
    let mut defined = keyframes.iter().flatten();
    let origin = defined.next()?;
    let target = defined.next_back()?;

    let offender = if !is_animatable(origin, property) {
        origin
    } else if !is_animatable(target, property) {
        target
    } else {
        return None;
    };
    Some(format!(
        "cannot animate {property} from \"{origin}\" to \"{target}\": \"{offender}\" is not an animatable value"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
