use std::collections::HashMap;

use crate::animation::ease::{EaseSpec, Easing};
use crate::animation::value::Value;
use crate::foundation::math::{mix, progress};

/// One keyframe on the absolute timeline. `easing` shapes the span that starts here.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Sample {
    pub at: f64,
    pub value: Option<Value>,
    pub easing: Easing,
    /// Which `add_keyframes` call placed this sample.
    pub batch: usize,
}

/// Samples of one (subject, property) pair, in insertion order until finalized.
#[derive(Clone, Debug, Default)]
pub(crate) struct Track {
    samples: Vec<Sample>,
    batches: usize,
}

/// A track normalized against the sequence duration.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FinalTrack {
    pub values: Vec<Option<Value>>,
    pub times: Vec<f64>,
    pub ease: Vec<Easing>,
}

impl Track {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Place `values` at `offsets` of the window `[start, end]`, first removing any earlier
    /// samples strictly inside the window.
    pub fn add_keyframes(
        &mut self,
        values: &[Option<Value>],
        ease: &EaseSpec,
        offsets: &[f64],
        start: f64,
        end: f64,
    ) {
        self.samples.retain(|s| !(s.at > start && s.at < end));

        let batch = self.batches;
        self.batches += 1;
        for (i, (value, offset)) in values.iter().zip(offsets).enumerate() {
            self.samples.push(Sample {
                at: mix(start, end, *offset),
                value: value.clone(),
                easing: ease.for_segment(i).cloned().unwrap_or_else(Easing::linear),
                batch,
            });
        }
    }

    /// Sort, normalize against `total`, and pad so the track covers `[0, 1]`.
    ///
    /// A track starting after zero gets a leading copy of its first value eased with
    /// `gap_ease`; one ending before the total gets a trailing hold with no easing entry.
    pub fn finalize(mut self, total: f64, gap_ease: &Easing) -> FinalTrack {
        let leads = leading_holds(&self.samples);
        let lead = |s: &Sample| leads.get(&(s.at.to_bits(), s.batch)).copied().unwrap_or(false);
        self.samples.sort_by(|a, b| {
            a.at.total_cmp(&b.at)
                .then_with(|| lead(a).cmp(&lead(b)))
                .then_with(|| a.batch.cmp(&b.batch))
        });

        let n = self.samples.len() + 2;
        let mut values = Vec::with_capacity(n);
        let mut times = Vec::with_capacity(n);
        let mut ease = Vec::with_capacity(n);
        for sample in self.samples {
            times.push(progress(0.0, total, sample.at));
            values.push(sample.value);
            ease.push(sample.easing);
        }

        if times.first() != Some(&0.0) {
            let first = values.first().cloned().flatten();
            times.insert(0, 0.0);
            values.insert(0, first);
            ease.insert(0, gap_ease.clone());
        }
        if times.last() != Some(&1.0) {
            times.push(1.0);
            values.push(None);
        }

        FinalTrack {
            values,
            times,
            ease,
        }
    }
}

/// For every (time, batch) pair, whether the batch's first sample at that time is a hold.
///
/// Sorting on this key puts batches that land a value ahead of batches that open with a hold
/// at the same instant, while samples of one batch keep their authored order.
fn leading_holds(samples: &[Sample]) -> HashMap<(u64, usize), bool> {
    let mut leads = HashMap::new();
    for s in samples {
        leads
            .entry((s.at.to_bits(), s.batch))
            .or_insert(s.value.is_none());
    }
    leads
}

#[cfg(test)]
#[path = "../../tests/unit/compile/track.rs"]
mod tests;
