//! Option resolution: per-property override, then segment, then the sequence's default
//! transition, then engine settings.
//!
//! Positional options (`at`, `times`, `delay`, repeats) never come from the default tier.

use crate::animation::ease::EaseSpec;
use crate::animation::spring::SpringParams;
use crate::compile::settings::SequencerSettings;
use crate::sequence::model::{RepeatType, Transition, TransitionKind};
use crate::sequence::stagger::Delay;

/// Effective options for one property of one segment.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResolvedOptions<'a> {
    /// Duration authored on the property or segment.
    pub duration: Option<f64>,
    /// Duration to fall back to when nothing else sets one.
    pub fallback_duration: f64,
    pub ease: EaseSpec,
    pub times: Option<&'a [f64]>,
    pub delay: Option<&'a Delay>,
    pub repeat: u32,
    pub repeat_type: Option<RepeatType>,
    pub repeat_delay: f64,
    pub kind: TransitionKind,
    pub spring: SpringParams,
}

pub(crate) fn resolve_options<'a>(
    property: &str,
    segment: &'a Transition,
    defaults: &'a Transition,
    settings: &SequencerSettings,
) -> ResolvedOptions<'a> {
    let over = segment.properties.get(property);

    // Property override first, then the segment itself.
    macro_rules! local {
        ($field:ident) => {
            over.and_then(|t| t.$field.as_ref())
                .or(segment.$field.as_ref())
        };
    }

    let spring = over
        .map(|t| t.spring)
        .unwrap_or_default()
        .or(&segment.spring)
        .or(&defaults.spring);

    ResolvedOptions {
        duration: local!(duration).copied(),
        fallback_duration: defaults.duration.unwrap_or(settings.default_duration),
        ease: local!(ease)
            .or(defaults.ease.as_ref())
            .cloned()
            .unwrap_or_else(|| EaseSpec::One(settings.default_ease.clone())),
        times: local!(times).map(Vec::as_slice),
        delay: local!(delay),
        repeat: local!(repeat).copied().unwrap_or(0),
        repeat_type: local!(repeat_type).copied(),
        repeat_delay: local!(repeat_delay).copied().unwrap_or(0.0),
        kind: local!(kind)
            .or(defaults.kind.as_ref())
            .copied()
            .unwrap_or_default(),
        spring,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/options.rs"]
mod tests;
