use serde::{Deserialize, Serialize};

use crate::animation::ease::Easing;

/// Engine-wide fallbacks, the last tier of option resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerSettings {
    /// Seconds used when no tier specifies a duration.
    pub default_duration: f64,
    pub default_ease: Easing,
    /// Easing of the span padded in front of tracks that start after zero.
    pub gap_ease: Easing,
    /// Segment `repeat` counts at or above this are rejected.
    pub max_repeat: u32,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            default_duration: 0.3,
            default_ease: Easing::named("easeOut"),
            gap_ease: Easing::named("easeInOut"),
            max_repeat: 20,
        }
    }
}
