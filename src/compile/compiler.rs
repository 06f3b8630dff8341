use std::collections::BTreeMap;
use std::sync::Arc;

use crate::animation::ease::{EaseSpec, Easing, EasingRegistry};
use crate::animation::spring::{SimulatedSpring, SpringOracle};
use crate::animation::value::{KeyframeList, non_animatable_reason};
use crate::compile::options::{ResolvedOptions, resolve_options};
use crate::compile::plan::{CompileWarning, SequencePlan, SubjectPlan, TrackTransition};
use crate::compile::repeat::{check_repeat, unroll};
use crate::compile::settings::SequencerSettings;
use crate::compile::track::Track;
use crate::foundation::error::{SeqlineError, SeqlineResult};
use crate::foundation::math::{default_offset, fill_offset};
use crate::sequence::at::{LabelTable, resolve_at};
use crate::sequence::model::{
    Repeat, Segment, Sequence, SequenceItem, SequenceOptions, SubjectId, TransitionKind,
};
use crate::sequence::stagger::Delay;

// Distance assumed for springs whose endpoints are not both numbers.
const DEFAULT_SPRING_SCALE: f64 = 100.0;

/// Compiles [`Sequence`]s into [`SequencePlan`]s.
///
/// Holds only configuration; every call to [`Sequencer::compile`] starts from a fresh state,
/// so one sequencer can be shared between threads.
#[derive(Clone)]
pub struct Sequencer {
    settings: SequencerSettings,
    springs: Arc<dyn SpringOracle>,
    easings: EasingRegistry,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("settings", &self.settings)
            .field("easings", &self.easings)
            .finish_non_exhaustive()
    }
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            settings: SequencerSettings::default(),
            springs: Arc::new(SimulatedSpring::default()),
            easings: EasingRegistry::default(),
        }
    }

    pub fn with_settings(mut self, settings: SequencerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_spring_oracle(mut self, oracle: impl SpringOracle + 'static) -> Self {
        self.springs = Arc::new(oracle);
        self
    }

    pub fn with_easings(mut self, easings: EasingRegistry) -> Self {
        self.easings = easings;
        self
    }

    pub fn settings(&self) -> &SequencerSettings {
        &self.settings
    }

    pub fn easings(&self) -> &EasingRegistry {
        &self.easings
    }

    /// Resolve every segment onto one clock and normalize the resulting tracks.
    ///
    /// Either the whole sequence compiles or an error is returned; there is no partial plan.
    #[tracing::instrument(skip_all, fields(items = sequence.items.len()))]
    pub fn compile(&self, sequence: &Sequence) -> SeqlineResult<SequencePlan> {
        self.check_settings()?;
        let options = &sequence.options;
        options.validate()?;

        let mut state = CompilerState::default();
        for (index, item) in sequence.items.iter().enumerate() {
            match item {
                SequenceItem::Segment(segment) => {
                    self.place_segment(&mut state, index, segment, options)?;
                }
                SequenceItem::Label(name) => {
                    tracing::debug!(label = %name, time = state.clock, "label");
                    state.labels.define(name.clone(), state.clock);
                }
                SequenceItem::AnnotatedLabel { name, at } => {
                    let time = resolve_at(at, state.clock, state.prev_start, &state.labels)?;
                    tracing::debug!(label = %name, %at, time, "annotated label");
                    state.labels.define(name.clone(), time);
                }
            }
        }

        let plan = self.finish(state, options);
        tracing::debug!(
            duration = plan.duration,
            tracks = plan.track_count(),
            warnings = plan.warnings.len(),
            "compiled sequence"
        );
        Ok(plan)
    }

    fn check_settings(&self) -> SeqlineResult<()> {
        let d = self.settings.default_duration;
        if !(d.is_finite() && d >= 0.0) {
            return Err(SeqlineError::validation(format!(
                "default duration must be a non-negative number of seconds, got {d}"
            )));
        }
        self.easings.validate(&self.settings.default_ease)?;
        self.easings.validate(&self.settings.gap_ease)
    }

    fn place_segment(
        &self,
        state: &mut CompilerState,
        index: usize,
        segment: &Segment,
        options: &SequenceOptions,
    ) -> SeqlineResult<()> {
        segment.validate(index)?;

        let cursor = match &segment.transition.at {
            Some(at) => resolve_at(at, state.clock, state.prev_start, &state.labels)?,
            None => state.clock,
        };

        let targets = segment.targets.as_slice();
        let mut longest = 0.0_f64;
        for (target_index, subject) in targets.iter().enumerate() {
            for (property, keyframes) in segment.values.iter() {
                let resolved = resolve_options(
                    property,
                    &segment.transition,
                    &options.default_transition,
                    &self.settings,
                );
                let slot = Slot {
                    subject,
                    property,
                    target_index,
                    target_count: targets.len(),
                    cursor,
                };
                if let Some(span) = self.place_track(state, &slot, keyframes, &resolved)? {
                    longest = longest.max(span);
                }
            }
        }

        tracing::debug!(segment = index, start = cursor, span = longest, "placed segment");
        state.prev_start = cursor;
        state.clock = state.clock.max(cursor + longest);
        Ok(())
    }

    /// Add one property of one target to its track. Returns `delay + duration`, or `None`
    /// when the contribution was skipped with a warning.
    fn place_track(
        &self,
        state: &mut CompilerState,
        slot: &Slot<'_>,
        keyframes: &KeyframeList,
        resolved: &ResolvedOptions<'_>,
    ) -> SeqlineResult<Option<f64>> {
        if let Some(message) = non_animatable_reason(&keyframes.0, slot.property) {
            tracing::warn!(subject = %slot.subject, property = slot.property, "{message}");
            state.warnings.push(CompileWarning {
                subject: slot.subject.clone(),
                property: slot.property.to_owned(),
                message,
            });
            return Ok(None);
        }

        let delay = resolved
            .delay
            .map(|d| d.resolve(slot.target_index, slot.target_count, &self.easings))
            .transpose()?
            .unwrap_or(0.0);

        let mut ease = resolved.ease.clone();
        for easing in ease.iter() {
            self.easings.validate(easing)?;
        }

        let mut duration = resolved.duration;
        if resolved.kind == TransitionKind::Spring && keyframes.len() <= 2 {
            let scale = keyframes
                .numeric_pair()
                .map(|(from, to)| (to - from).abs())
                .unwrap_or(DEFAULT_SPRING_SCALE);
            let spring = self
                .springs
                .resolve(&resolved.spring, duration, 0.0, scale)?;
            if !(spring.duration.is_finite() && spring.duration >= 0.0) {
                return Err(SeqlineError::spring(format!(
                    "oracle returned an invalid duration {} for {}.{}",
                    spring.duration, slot.subject, slot.property
                )));
            }
            ease = EaseSpec::One(Easing::Custom(spring.ease));
            duration = Some(spring.duration);
        }
        let duration = duration.unwrap_or(resolved.fallback_duration);

        let start = slot.cursor + delay;
        if start < 0.0 {
            return Err(SeqlineError::validation(format!(
                "{}.{} would start before zero ({start})",
                slot.subject, slot.property
            )));
        }

        let mut values = keyframes.0.clone();
        let mut times = match resolved.times {
            Some(times) => times.to_vec(),
            None => default_offset(values.len()),
        };
        if times == [0.0] {
            times.push(1.0);
        }
        if values.len() == 1 {
            values.insert(0, None);
        }
        if times.len() < values.len() {
            let missing = values.len() - times.len();
            fill_offset(&mut times, missing);
        }
        times.truncate(values.len());

        check_repeat(
            resolved.repeat,
            resolved.repeat_type,
            resolved.repeat_delay,
            self.settings.max_repeat,
        )?;
        let unrolled = unroll(values, times, ease, duration, resolved.repeat);

        let end = start + unrolled.duration;
        if !end.is_finite() {
            return Err(SeqlineError::validation(format!(
                "{}.{} ends past the representable timeline ({start} + {})",
                slot.subject, slot.property, unrolled.duration
            )));
        }
        state
            .tracks
            .entry(slot.subject.clone())
            .or_default()
            .entry(slot.property.to_owned())
            .or_default()
            .add_keyframes(&unrolled.values, &unrolled.ease, &unrolled.times, start, end);
        state.total = state.total.max(end);

        Ok(Some(delay + unrolled.duration))
    }

    fn finish(&self, state: CompilerState, options: &SequenceOptions) -> SequencePlan {
        let total = state.total;
        let template = output_template(options, total);

        let mut subjects = BTreeMap::new();
        for (subject, tracks) in state.tracks {
            let mut plan = SubjectPlan::default();
            for (property, track) in tracks {
                if track.is_empty() {
                    continue;
                }
                let fin = track.finalize(total, &self.settings.gap_ease);
                plan.transition.insert(
                    property.clone(),
                    TrackTransition {
                        ease: fin.ease,
                        times: fin.times,
                        ..template.clone()
                    },
                );
                plan.keyframes.insert(property, fin.values);
            }
            if !plan.keyframes.is_empty() {
                subjects.insert(subject, plan);
            }
        }

        SequencePlan {
            duration: template.duration,
            subjects,
            warnings: state.warnings,
        }
    }
}

/// Compile with the default engine settings, spring oracle and easing registry.
pub fn compile(sequence: &Sequence) -> SeqlineResult<SequencePlan> {
    Sequencer::default().compile(sequence)
}

#[derive(Default)]
struct CompilerState {
    /// End of the furthest segment placed so far.
    clock: f64,
    /// Start of the most recently placed segment.
    prev_start: f64,
    labels: LabelTable,
    tracks: BTreeMap<SubjectId, BTreeMap<String, Track>>,
    /// Latest end time of any track.
    total: f64,
    warnings: Vec<CompileWarning>,
}

struct Slot<'a> {
    subject: &'a SubjectId,
    property: &'a str,
    target_index: usize,
    target_count: usize,
    cursor: f64,
}

/// Options shared by every output transition: default-transition passthrough first, then
/// sequence-level overrides.
fn output_template(options: &SequenceOptions, total: f64) -> TrackTransition {
    let defaults = &options.default_transition;

    let mut extra = defaults.extra.clone();
    extra.extend(options.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

    let default_delay = match &defaults.delay {
        Some(Delay::Fixed(d)) => Some(*d),
        _ => None,
    };

    TrackTransition {
        duration: options.duration.unwrap_or(total),
        ease: Vec::new(),
        times: Vec::new(),
        delay: options.delay.or(default_delay),
        repeat: options.repeat.or(defaults.repeat.map(Repeat::Count)),
        repeat_type: options.repeat_type.or(defaults.repeat_type),
        repeat_delay: options.repeat_delay.or(defaults.repeat_delay),
        extra,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
