use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SeqlineError, SeqlineResult};

/// Number of points used when a function easing has to be written out as data.
pub const SAMPLED_EASING_POINTS: usize = 33;

/// A normalized progress curve, `[0, 1] -> value` (overshoot allowed).
#[derive(Clone)]
pub struct EasingFn(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl EasingFn {
    /// Wrap a pure curve function.
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate at progress `t`.
    pub fn apply(&self, t: f64) -> f64 {
        (self.0)(t)
    }

    /// Evenly spaced samples over `[0, 1]`, endpoints included.
    pub fn sample(&self, points: usize) -> Vec<f64> {
        let points = points.max(2);
        (0..points)
            .map(|i| self.apply(i as f64 / (points - 1) as f64))
            .collect()
    }
}

impl std::fmt::Debug for EasingFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EasingFn(..)")
    }
}

impl PartialEq for EasingFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Easing assigned to one keyframe span.
#[derive(Clone, Debug, PartialEq)]
pub enum Easing {
    /// Name resolved through an [`EasingRegistry`], e.g. `"easeOut"`.
    Named(String),
    /// CSS-style cubic bezier control points `[x1, y1, x2, y2]`.
    CubicBezier([f64; 4]),
    /// Piecewise-linear curve through evenly spaced samples.
    Sampled(Vec<f64>),
    /// Arbitrary curve, e.g. a spring approximation.
    Custom(EasingFn),
}

impl Easing {
    /// Named easing.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The identity curve.
    pub fn linear() -> Self {
        Self::named("linear")
    }

    /// True for function-backed easings.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<&str> for Easing {
    fn from(v: &str) -> Self {
        Self::named(v)
    }
}

impl From<[f64; 4]> for Easing {
    fn from(v: [f64; 4]) -> Self {
        Self::CubicBezier(v)
    }
}

impl From<EasingFn> for Easing {
    fn from(v: EasingFn) -> Self {
        Self::Custom(v)
    }
}

impl Serialize for Easing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct SampledRepr<'a> {
            sampled: &'a [f64],
        }

        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::CubicBezier(points) => points.serialize(serializer),
            Self::Sampled(samples) => SampledRepr { sampled: samples }.serialize(serializer),
            Self::Custom(f) => SampledRepr {
                sampled: &f.sample(SAMPLED_EASING_POINTS),
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            CubicBezier([f64; 4]),
            Sampled { sampled: Vec<f64> },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Ok(Self::Named(s)),
            Repr::CubicBezier(points) => Ok(Self::CubicBezier(points)),
            Repr::Sampled { sampled } => Ok(Self::Sampled(sampled)),
        }
    }
}

/// Authored `ease` option: one easing for every span, or one per span (cycled).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EaseSpec {
    /// Same easing for every span.
    One(Easing),
    /// Per-span easings, wrapping around when shorter than the keyframe list.
    List(Vec<Easing>),
}

impl EaseSpec {
    /// Easing applied to the span starting at keyframe `i`.
    pub fn for_segment(&self, i: usize) -> Option<&Easing> {
        match self {
            Self::One(e) => Some(e),
            Self::List(list) if list.is_empty() => None,
            Self::List(list) => list.get(crate::foundation::math::wrap_index(list.len(), i)),
        }
    }

    /// Flatten into a list.
    pub fn into_list(self) -> Vec<Easing> {
        match self {
            Self::One(e) => vec![e],
            Self::List(list) => list,
        }
    }

    /// Every easing mentioned.
    pub fn iter(&self) -> impl Iterator<Item = &Easing> {
        let (one, list) = match self {
            Self::One(e) => (Some(e), &[][..]),
            Self::List(list) => (None, list.as_slice()),
        };
        one.into_iter().chain(list.iter())
    }
}

impl From<Easing> for EaseSpec {
    fn from(v: Easing) -> Self {
        Self::One(v)
    }
}

impl From<&str> for EaseSpec {
    fn from(v: &str) -> Self {
        Self::One(Easing::named(v))
    }
}

impl From<[f64; 4]> for EaseSpec {
    fn from(v: [f64; 4]) -> Self {
        Self::One(Easing::CubicBezier(v))
    }
}

impl From<Vec<Easing>> for EaseSpec {
    fn from(v: Vec<Easing>) -> Self {
        Self::List(v)
    }
}

impl<const N: usize> From<[&str; N]> for EaseSpec {
    fn from(v: [&str; N]) -> Self {
        Self::List(v.into_iter().map(Easing::named).collect())
    }
}

/// Name → curve table used to validate and evaluate named easings.
#[derive(Clone, Debug)]
pub struct EasingRegistry {
    curves: BTreeMap<String, EasingFn>,
}

impl Default for EasingRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl EasingRegistry {
    /// Registry without any names.
    pub fn empty() -> Self {
        Self {
            curves: BTreeMap::new(),
        }
    }

    /// Registry pre-populated with the standard curves.
    pub fn with_builtins() -> Self {
        let mut reg = Self::empty();
        reg.register("linear", EasingFn::new(|t| t));
        reg.register_bezier("easeIn", [0.42, 0.0, 1.0, 1.0]);
        reg.register_bezier("easeOut", [0.0, 0.0, 0.58, 1.0]);
        reg.register_bezier("easeInOut", [0.42, 0.0, 0.58, 1.0]);
        reg.register("circIn", EasingFn::new(circ_in));
        reg.register("circOut", EasingFn::new(|t| reverse(circ_in, t)));
        reg.register("circInOut", EasingFn::new(|t| mirror(circ_in, t)));
        reg.register("backIn", EasingFn::new(back_in));
        reg.register("backOut", EasingFn::new(back_out));
        reg.register("backInOut", EasingFn::new(|t| mirror(back_in, t)));
        reg.register("anticipate", EasingFn::new(anticipate));
        reg
    }

    /// Register (or replace) a named curve.
    pub fn register(&mut self, name: impl Into<String>, curve: EasingFn) -> &mut Self {
        self.curves.insert(name.into(), curve);
        self
    }

    /// Register a cubic-bezier alias.
    pub fn register_bezier(&mut self, name: impl Into<String>, points: [f64; 4]) -> &mut Self {
        let [x1, y1, x2, y2] = points;
        self.register(
            name,
            EasingFn::new(move |t| cubic_bezier_ease(t, x1, y1, x2, y2)),
        )
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Fail on names the registry does not know.
    pub fn validate(&self, easing: &Easing) -> SeqlineResult<()> {
        match easing {
            Easing::Named(name) if !self.contains(name) => {
                Err(SeqlineError::easing(format!("unknown easing \"{name}\"")))
            }
            Easing::CubicBezier(points) if points.iter().any(|p| !p.is_finite()) => Err(
                SeqlineError::easing(format!("cubic bezier has non-finite points {points:?}")),
            ),
            _ => Ok(()),
        }
    }

    /// Concrete curve for an easing.
    pub fn curve(&self, easing: &Easing) -> SeqlineResult<EasingFn> {
        match easing {
            Easing::Named(name) => self
                .curves
                .get(name)
                .cloned()
                .ok_or_else(|| SeqlineError::easing(format!("unknown easing \"{name}\""))),
            Easing::CubicBezier([x1, y1, x2, y2]) => {
                let (x1, y1, x2, y2) = (*x1, *y1, *x2, *y2);
                Ok(EasingFn::new(move |t| cubic_bezier_ease(t, x1, y1, x2, y2)))
            }
            Easing::Sampled(samples) => {
                let samples = samples.clone();
                Ok(EasingFn::new(move |t| sample_linear(&samples, t)))
            }
            Easing::Custom(f) => Ok(f.clone()),
        }
    }

    /// Evaluate an easing at progress `t`.
    pub fn apply(&self, easing: &Easing, t: f64) -> SeqlineResult<f64> {
        Ok(self.curve(easing)?.apply(t))
    }
}

pub(crate) fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Solve bx(u) = x for u, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson first; bisection when the slope flattens out.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        if x_t.abs() < 1e-7 {
            return sample_curve(y1, y2, t);
        }
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    t = x;
    for _ in 0..32 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-7 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

fn sample_linear(samples: &[f64], t: f64) -> f64 {
    match samples {
        [] => t,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let pos = t * (samples.len() - 1) as f64;
            let i = (pos.floor() as usize).min(samples.len() - 2);
            let local = pos - i as f64;
            samples[i] + (samples[i + 1] - samples[i]) * local
        }
    }
}

fn circ_in(t: f64) -> f64 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

fn back_out(t: f64) -> f64 {
    cubic_bezier_ease(t, 0.33, 1.53, 0.69, 0.99)
}

fn back_in(t: f64) -> f64 {
    reverse(back_out, t)
}

fn anticipate(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * back_in(t)
    } else {
        0.5 * (2.0 - 2f64.powf(-10.0 * (t - 1.0)))
    }
}

fn reverse(f: fn(f64) -> f64, t: f64) -> f64 {
    1.0 - f(1.0 - t)
}

fn mirror(f: fn(f64) -> f64, t: f64) -> f64 {
    if t <= 0.5 {
        f(2.0 * t) / 2.0
    } else {
        (2.0 - f(2.0 * (1.0 - t))) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
