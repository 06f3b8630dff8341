use std::collections::BTreeMap;

use crate::{
    animation::{ease::EaseSpec, spring::SpringParams, value::KeyframeList},
    foundation::error::{SeqlineError, SeqlineResult},
    sequence::{
        at::At,
        model::{
            RepeatType, Segment, SegmentValues, Sequence, SequenceItem, SequenceOptions, Targets,
            Transition, TransitionKind,
        },
        stagger::Delay,
    },
};

pub struct SequenceBuilder {
    items: Vec<SequenceItem>,
    options: SequenceOptions,
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            options: SequenceOptions::default(),
        }
    }

    pub fn segment(mut self, segment: Segment) -> Self {
        self.items.push(SequenceItem::Segment(segment));
        self
    }

    /// Label at the current clock.
    pub fn label(mut self, name: impl Into<String>) -> Self {
        self.items.push(SequenceItem::Label(name.into()));
        self
    }

    /// Label at an explicit position.
    pub fn label_at(mut self, name: impl Into<String>, at: impl Into<At>) -> Self {
        self.items.push(SequenceItem::AnnotatedLabel {
            name: name.into(),
            at: at.into(),
        });
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.options.duration = Some(duration);
        self
    }

    pub fn default_transition(mut self, transition: Transition) -> Self {
        self.options.default_transition = transition;
        self
    }

    pub fn options(mut self, options: SequenceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> SeqlineResult<Sequence> {
        let seq = Sequence {
            items: self.items,
            options: self.options,
        };
        seq.options.validate()?;
        for (i, item) in seq.items.iter().enumerate() {
            if let SequenceItem::Segment(segment) = item {
                segment.validate(i)?;
            }
        }
        Ok(seq)
    }
}

pub struct SegmentBuilder {
    targets: Targets,
    properties: BTreeMap<String, KeyframeList>,
    value: Option<KeyframeList>,
    transition: Transition,
}

impl SegmentBuilder {
    pub fn new(targets: impl Into<Targets>) -> Self {
        Self {
            targets: targets.into(),
            properties: BTreeMap::new(),
            value: None,
            transition: Transition::default(),
        }
    }

    /// Animate a named property.
    pub fn set(mut self, property: impl Into<String>, keyframes: impl Into<KeyframeList>) -> Self {
        self.properties.insert(property.into(), keyframes.into());
        self
    }

    /// Animate the subject itself as a single value.
    pub fn value(mut self, keyframes: impl Into<KeyframeList>) -> Self {
        self.value = Some(keyframes.into());
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.transition.duration = Some(duration);
        self
    }

    pub fn ease(mut self, ease: impl Into<EaseSpec>) -> Self {
        self.transition.ease = Some(ease.into());
        self
    }

    pub fn times(mut self, times: impl Into<Vec<f64>>) -> Self {
        self.transition.times = Some(times.into());
        self
    }

    pub fn delay(mut self, delay: impl Into<Delay>) -> Self {
        self.transition.delay = Some(delay.into());
        self
    }

    pub fn at(mut self, at: impl Into<At>) -> Self {
        self.transition.at = Some(at.into());
        self
    }

    pub fn repeat(mut self, repeat: u32) -> Self {
        self.transition.repeat = Some(repeat);
        self
    }

    pub fn repeat_type(mut self, repeat_type: RepeatType) -> Self {
        self.transition.repeat_type = Some(repeat_type);
        self
    }

    pub fn kind(mut self, kind: TransitionKind) -> Self {
        self.transition.kind = Some(kind);
        self
    }

    pub fn spring(mut self, params: SpringParams) -> Self {
        self.transition.kind = Some(TransitionKind::Spring);
        self.transition.spring = params;
        self
    }

    /// Timing override for one property.
    pub fn property_transition(
        mut self,
        property: impl Into<String>,
        transition: Transition,
    ) -> Self {
        self.transition.properties.insert(property.into(), transition);
        self
    }

    pub fn build(self) -> SeqlineResult<Segment> {
        let values = match (self.value, self.properties.is_empty()) {
            (Some(value), true) => SegmentValues::Value(value),
            (None, _) => SegmentValues::Properties(self.properties),
            (Some(_), false) => {
                return Err(SeqlineError::validation(
                    "segment animates either named properties or a bare value, not both",
                ));
            }
        };
        let segment = Segment {
            targets: self.targets,
            values,
            transition: self.transition,
        };
        segment.validate(0)?;
        Ok(segment)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/dsl.rs"]
mod tests;
