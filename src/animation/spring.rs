//! Spring transitions expressed as a fixed duration plus an easing curve.
//!
//! The compiler never simulates springs itself. It asks a [`SpringOracle`] how long a spring
//! takes to settle and what its motion looks like as a function of normalized progress, and
//! places the result on the timeline like any other keyframe span.

use serde::{Deserialize, Serialize};

use crate::animation::ease::EasingFn;
use crate::foundation::error::{SeqlineError, SeqlineResult};

/// Physical or perceptual spring parameters. Unset fields fall back to the oracle's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Spring constant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stiffness: Option<f64>,
    /// Friction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping: Option<f64>,
    /// Moving mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    /// Initial velocity in units per second, towards the target when positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    /// Perceptual bounciness, `0` (none) to `1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce: Option<f64>,
    /// Time in seconds at which the motion looks finished, tail excluded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_duration: Option<f64>,
    /// Speed under which the spring may be considered at rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_speed: Option<f64>,
    /// Distance to target under which the spring may be considered at rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_delta: Option<f64>,
}

impl SpringParams {
    /// Field-wise overlay: values set on `self` win over `base`.
    pub fn or(&self, base: &SpringParams) -> SpringParams {
        SpringParams {
            stiffness: self.stiffness.or(base.stiffness),
            damping: self.damping.or(base.damping),
            mass: self.mass.or(base.mass),
            velocity: self.velocity.or(base.velocity),
            bounce: self.bounce.or(base.bounce),
            visual_duration: self.visual_duration.or(base.visual_duration),
            rest_speed: self.rest_speed.or(base.rest_speed),
            rest_delta: self.rest_delta.or(base.rest_delta),
        }
    }

    fn has_physics(&self) -> bool {
        self.stiffness.is_some() || self.damping.is_some() || self.mass.is_some()
    }
}

/// What the oracle hands back: how long the span lasts and how progress is shaped.
#[derive(Clone, Debug)]
pub struct SpringResolution {
    /// Seconds until the spring settles (or the authored duration).
    pub duration: f64,
    /// Normalized displacement as a function of normalized time.
    pub ease: EasingFn,
}

/// Converts spring parameters into a duration-equivalent easing.
///
/// Implementations must be pure: the same inputs always produce the same answer.
pub trait SpringOracle: Send + Sync {
    /// Resolve a spring moving from `from` to `to`. `duration` is the authored duration in
    /// seconds, if any.
    fn resolve(
        &self,
        params: &SpringParams,
        duration: Option<f64>,
        from: f64,
        to: f64,
    ) -> SeqlineResult<SpringResolution>;
}

/// Closed-form damped harmonic oscillator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedSpring {
    /// Longest duration reported for a spring that never settles, in seconds.
    pub max_duration: f64,
    /// Probing step used while searching for the settle time, in seconds.
    pub probe_step: f64,
}

impl Default for SimulatedSpring {
    fn default() -> Self {
        Self {
            max_duration: 20.0,
            probe_step: 0.05,
        }
    }
}

const DEFAULT_STIFFNESS: f64 = 100.0;
const DEFAULT_DAMPING: f64 = 10.0;
const DEFAULT_MASS: f64 = 1.0;
const DEFAULT_BOUNCE: f64 = 0.3;
const DEFAULT_SPRING_DURATION: f64 = 0.8;
// Envelope left when a duration-derived spring is considered finished.
const DURATION_ENVELOPE: f64 = 0.001;
const VELOCITY_SAMPLE: f64 = 0.005;

#[derive(Clone, Copy, Debug)]
struct Physics {
    stiffness: f64,
    damping: f64,
    mass: f64,
    // Pinned duration when derived from an authored one.
    duration: Option<f64>,
}

impl SimulatedSpring {
    fn physics(&self, params: &SpringParams, duration: Option<f64>) -> SeqlineResult<Physics> {
        let has_timing =
            duration.is_some() || params.bounce.is_some() || params.visual_duration.is_some();

        let physics = if !params.has_physics() && has_timing {
            let bounce = params.bounce.unwrap_or(DEFAULT_BOUNCE);
            let damping_ratio = (1.0 - bounce).clamp(0.05, 1.0);
            if let Some(visual) = params.visual_duration {
                let root = (2.0 * std::f64::consts::PI) / (visual * 1.2);
                let stiffness = root * root;
                Physics {
                    stiffness,
                    damping: 2.0 * damping_ratio * stiffness.sqrt(),
                    mass: 1.0,
                    duration: None,
                }
            } else {
                let t = duration.unwrap_or(DEFAULT_SPRING_DURATION);
                if !(t.is_finite() && t > 0.0) {
                    return Err(SeqlineError::spring(format!(
                        "spring duration must be positive, got {t}"
                    )));
                }
                let undamped = (1.0 / DURATION_ENVELOPE).ln() / (damping_ratio * t);
                Physics {
                    stiffness: undamped * undamped,
                    damping: 2.0 * damping_ratio * undamped,
                    mass: 1.0,
                    duration: Some(t),
                }
            }
        } else {
            Physics {
                stiffness: params.stiffness.unwrap_or(DEFAULT_STIFFNESS),
                damping: params.damping.unwrap_or(DEFAULT_DAMPING),
                mass: params.mass.unwrap_or(DEFAULT_MASS),
                duration: None,
            }
        };

        if !(physics.stiffness.is_finite() && physics.stiffness > 0.0) {
            return Err(SeqlineError::spring(format!(
                "stiffness must be positive, got {}",
                physics.stiffness
            )));
        }
        if !(physics.mass.is_finite() && physics.mass > 0.0) {
            return Err(SeqlineError::spring(format!(
                "mass must be positive, got {}",
                physics.mass
            )));
        }
        if !(physics.damping.is_finite() && physics.damping >= 0.0) {
            return Err(SeqlineError::spring(format!(
                "damping must be non-negative, got {}",
                physics.damping
            )));
        }
        Ok(physics)
    }
}

impl SpringOracle for SimulatedSpring {
    fn resolve(
        &self,
        params: &SpringParams,
        duration: Option<f64>,
        from: f64,
        to: f64,
    ) -> SeqlineResult<SpringResolution> {
        let physics = self.physics(params, duration)?;
        let curve = SpringCurve::new(physics, params.velocity.unwrap_or(0.0), from, to);

        let delta = to - from;
        let granular = delta.abs() < 5.0;
        let rest_speed = params
            .rest_speed
            .unwrap_or(if granular { 0.01 } else { 2.0 });
        let rest_delta = params
            .rest_delta
            .unwrap_or(if granular { 0.005 } else { 0.5 });

        let settle = match physics.duration {
            Some(t) => t,
            None => {
                let mut t = 0.0;
                let mut step = 0u32;
                while t < self.max_duration && !curve.is_at_rest(t, rest_speed, rest_delta) {
                    step += 1;
                    t = f64::from(step) * self.probe_step;
                }
                t.min(self.max_duration)
            }
        };

        let ease = if delta == 0.0 || settle == 0.0 {
            EasingFn::new(|p| p)
        } else {
            EasingFn::new(move |p| {
                if p >= 1.0 {
                    1.0
                } else {
                    (curve.position(settle * p.max(0.0)) - from) / delta
                }
            })
        };

        Ok(SpringResolution {
            duration: settle,
            ease,
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct SpringCurve {
    from: f64,
    to: f64,
    // Negated initial velocity, the form the closed-form solutions take.
    v0: f64,
    undamped: f64,
    damping_ratio: f64,
}

impl SpringCurve {
    fn new(physics: Physics, velocity: f64, from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            v0: -velocity,
            undamped: (physics.stiffness / physics.mass).sqrt(),
            damping_ratio: physics.damping / (2.0 * (physics.stiffness * physics.mass).sqrt()),
        }
    }

    fn position(&self, t: f64) -> f64 {
        let delta = self.to - self.from;
        let w0 = self.undamped;
        let zeta = self.damping_ratio;
        let envelope = (-zeta * w0 * t).exp();

        if (zeta - 1.0).abs() < 1e-9 {
            self.to - (-w0 * t).exp() * (delta + (self.v0 + w0 * delta) * t)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            self.to
                - envelope
                    * (((self.v0 + zeta * w0 * delta) / wd) * (wd * t).sin()
                        + delta * (wd * t).cos())
        } else {
            let wd = w0 * (zeta * zeta - 1.0).sqrt();
            let ft = (wd * t).min(300.0);
            self.to
                - envelope
                    * ((self.v0 + zeta * w0 * delta) * ft.sinh() + wd * delta * ft.cosh())
                    / wd
        }
    }

    fn velocity(&self, t: f64) -> f64 {
        if t == 0.0 {
            return -self.v0;
        }
        let prev = (t - VELOCITY_SAMPLE).max(0.0);
        (self.position(t) - self.position(prev)) / (t - prev)
    }

    fn is_at_rest(&self, t: f64, rest_speed: f64, rest_delta: f64) -> bool {
        self.velocity(t).abs() <= rest_speed && (self.to - self.position(t)).abs() <= rest_delta
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
