use super::*;
use crate::sequence::model::DEFAULT_PROPERTY;
use crate::sequence::stagger::stagger;

#[test]
fn builds_a_sequence_with_labels_and_segments() {
    let seq = SequenceBuilder::new()
        .segment(SegmentBuilder::new("a").set("x", 100.0).duration(1.0).build().unwrap())
        .label("mid")
        .label_at("early", 0.25)
        .segment(
            SegmentBuilder::new(["b", "c"])
                .set("opacity", [0.0, 1.0])
                .delay(stagger(0.1))
                .at("mid")
                .build()
                .unwrap(),
        )
        .duration(4.0)
        .build()
        .unwrap();

    assert_eq!(seq.items.len(), 4);
    assert_eq!(seq.items[1], SequenceItem::Label("mid".to_owned()));
    assert_eq!(
        seq.items[2],
        SequenceItem::AnnotatedLabel {
            name: "early".to_owned(),
            at: At::Absolute(0.25)
        }
    );
    assert_eq!(seq.options.duration, Some(4.0));
}

#[test]
fn bare_value_segments_use_default_property() {
    let seg = SegmentBuilder::new("mv").value([50.0, 100.0]).build().unwrap();
    let props: Vec<_> = seg.values.iter().map(|(p, _)| p).collect();
    assert_eq!(props, vec![DEFAULT_PROPERTY]);
}

#[test]
fn mixing_value_and_properties_is_rejected() {
    let err = SegmentBuilder::new("a")
        .set("x", 1.0)
        .value(2.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, SeqlineError::Validation(_)));
}

#[test]
fn empty_segment_is_rejected() {
    assert!(SegmentBuilder::new("a").build().is_err());
}

#[test]
fn spring_sets_kind() {
    let seg = SegmentBuilder::new("a")
        .set("x", [0.0, 100.0])
        .spring(SpringParams {
            stiffness: Some(200.0),
            ..SpringParams::default()
        })
        .build()
        .unwrap();
    assert_eq!(seg.transition.kind, Some(TransitionKind::Spring));
    assert_eq!(seg.transition.spring.stiffness, Some(200.0));
}

#[test]
fn invalid_sequence_options_fail_build() {
    let err = SequenceBuilder::new().duration(f64::NAN).build().unwrap_err();
    assert!(matches!(err, SeqlineError::Validation(_)));
}
