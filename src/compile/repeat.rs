use crate::animation::ease::{EaseSpec, Easing};
use crate::animation::value::Value;
use crate::foundation::error::{SeqlineError, SeqlineResult};
use crate::sequence::model::RepeatType;

/// A segment's keyframes with its own repeats unrolled.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Unrolled {
    pub values: Vec<Option<Value>>,
    pub times: Vec<f64>,
    pub ease: EaseSpec,
    pub duration: f64,
}

/// Reject repeats that cannot be unrolled into plain forward replays.
pub(crate) fn check_repeat(
    repeat: u32,
    repeat_type: Option<RepeatType>,
    repeat_delay: f64,
    max_repeat: u32,
) -> SeqlineResult<()> {
    if repeat == 0 {
        return Ok(());
    }
    if repeat >= max_repeat {
        return Err(SeqlineError::repeat(format!(
            "repeat count {repeat} too high, must be less than {max_repeat}"
        )));
    }
    if let Some(kind @ (RepeatType::Mirror | RepeatType::Reverse)) = repeat_type {
        return Err(SeqlineError::repeat(format!(
            "repeat_type {kind:?} is not supported inside sequences, only loop"
        )));
    }
    if repeat_delay != 0.0 {
        return Err(SeqlineError::repeat(format!(
            "repeat_delay ({repeat_delay}) is not supported inside sequences"
        )));
    }
    Ok(())
}

/// Replay the keyframes `repeat + 1` times inside a window `repeat + 1` times as long.
///
/// Each replay jumps back to its first keyframe with a `linear` span; the remaining spans
/// reuse the authored easings in order.
pub(crate) fn unroll(
    values: Vec<Option<Value>>,
    times: Vec<f64>,
    ease: EaseSpec,
    duration: f64,
    repeat: u32,
) -> Unrolled {
    if repeat == 0 {
        return Unrolled {
            values,
            times,
            ease,
            duration,
        };
    }

    let original_ease = ease.clone();
    let mut ease = ease.into_list();
    let mut out_values = values.clone();
    let mut out_times = times.clone();
    for r in 1..=repeat {
        out_values.extend(values.iter().cloned());
        for (k, t) in times.iter().enumerate() {
            out_times.push(t + f64::from(r));
            let span = if k == 0 {
                Easing::linear()
            } else {
                original_ease
                    .for_segment(k - 1)
                    .cloned()
                    .unwrap_or_else(Easing::linear)
            };
            ease.push(span);
        }
    }

    let cycles = f64::from(repeat) + 1.0;
    for t in &mut out_times {
        *t /= cycles;
    }

    Unrolled {
        values: out_values,
        times: out_times,
        ease: EaseSpec::List(ease),
        duration: duration * cycles,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/repeat.rs"]
mod tests;
