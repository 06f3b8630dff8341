use super::*;
use crate::animation::ease::Easing;
use crate::animation::value::Value;
use crate::sequence::stagger::{StaggerFrom, stagger};

#[test]
fn parses_all_item_forms() {
    let seq = Sequence::from_json_str(
        r#"{
            "items": [
                "intro",
                { "name": "later", "at": "+1" },
                ["a", { "x": [0, 100] }],
                [["a", "b"], { "opacity": 1 }, { "duration": 0.5, "at": "<" }],
                ["mv", [50, 100], { "ease": "linear" }]
            ],
            "options": { "duration": 3 }
        }"#,
    )
    .unwrap();

    assert_eq!(seq.items.len(), 5);
    assert_eq!(seq.items[0], SequenceItem::Label("intro".to_owned()));
    assert_eq!(
        seq.items[1],
        SequenceItem::AnnotatedLabel {
            name: "later".to_owned(),
            at: At::Relative(1.0)
        }
    );

    let SequenceItem::Segment(first) = &seq.items[2] else {
        panic!("expected segment");
    };
    assert_eq!(first.targets.as_slice(), &[SubjectId::from("a")]);
    assert_eq!(first.transition, Transition::default());

    let SequenceItem::Segment(second) = &seq.items[3] else {
        panic!("expected segment");
    };
    assert_eq!(second.targets.as_slice().len(), 2);
    assert_eq!(second.transition.duration, Some(0.5));
    assert_eq!(second.transition.at, Some(At::Previous));

    let SequenceItem::Segment(third) = &seq.items[4] else {
        panic!("expected segment");
    };
    let props: Vec<_> = third.values.iter().map(|(p, _)| p).collect();
    assert_eq!(props, vec![DEFAULT_PROPERTY]);

    assert_eq!(seq.options.duration, Some(3.0));
}

#[test]
fn transition_keeps_spring_params_and_unknown_keys() {
    let t: Transition = serde_json::from_str(
        r#"{
            "type": "spring",
            "stiffness": 200,
            "damping": 10,
            "delay": { "stagger": 0.1, "from": "last" },
            "repeat": 2,
            "repeat_type": "loop",
            "properties": { "opacity": { "duration": 2, "ease": ["easeIn", "easeOut"] } },
            "custom_flag": true
        }"#,
    )
    .unwrap();

    assert_eq!(t.kind, Some(TransitionKind::Spring));
    assert_eq!(t.spring.stiffness, Some(200.0));
    assert_eq!(t.spring.damping, Some(10.0));
    assert_eq!(
        t.delay,
        Some(Delay::Stagger(stagger(0.1).from(StaggerFrom::Last)))
    );
    assert_eq!(t.repeat, Some(2));
    assert_eq!(t.repeat_type, Some(RepeatType::Loop));
    assert_eq!(
        t.properties["opacity"].ease,
        Some(EaseSpec::List(vec![
            Easing::named("easeIn"),
            Easing::named("easeOut")
        ]))
    );
    assert_eq!(t.extra["custom_flag"], serde_json::json!(true));
    assert!(!t.extra.contains_key("stiffness"));
}

#[test]
fn sequence_repeat_accepts_infinity() {
    let opts: SequenceOptions =
        serde_json::from_str(r#"{ "repeat": "infinity", "delay": 1 }"#).unwrap();
    assert_eq!(opts.repeat, Some(Repeat::Infinite));
    assert_eq!(opts.delay, Some(1.0));
    assert_eq!(serde_json::to_string(&Repeat::Infinite).unwrap(), "\"infinity\"");

    assert!(serde_json::from_str::<Repeat>("\"forever\"").is_err());
}

#[test]
fn malformed_segment_arrays_are_rejected() {
    assert!(serde_json::from_str::<SequenceItem>(r#"["a"]"#).is_err());
    assert!(serde_json::from_str::<SequenceItem>(r#"["a", {"x": 1}, {}, {}]"#).is_err());
    assert!(serde_json::from_str::<SequenceItem>(r#"["a", {"x": 1}, {"duration": "slow"}]"#).is_err());
}

#[test]
fn items_serialize_back_to_their_json_shapes() {
    let item = SequenceItem::Segment(Segment::new(
        "a",
        SegmentValues::Value(KeyframeList::of([0.0, 1.0])),
    ));
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json, serde_json::json!(["a", [0.0, 1.0], {}]));

    let label = SequenceItem::AnnotatedLabel {
        name: "x".to_owned(),
        at: At::Previous,
    };
    assert_eq!(
        serde_json::to_value(&label).unwrap(),
        serde_json::json!({ "name": "x", "at": "<" })
    );
}

#[test]
fn segment_validation() {
    let empty_targets = Segment::new(Targets::Many(vec![]), SegmentValues::Value(1.0.into()));
    assert!(matches!(
        empty_targets.validate(0),
        Err(SeqlineError::Validation(_))
    ));

    let no_values = Segment::new("a", SegmentValues::default());
    assert!(no_values.validate(0).is_err());

    let empty_keyframes = Segment::new("a", SegmentValues::Value(KeyframeList(vec![])));
    assert!(empty_keyframes.validate(0).is_err());

    let negative = Segment::new("a", SegmentValues::Value(1.0.into()))
        .with_transition(Transition::default().with_duration(-1.0));
    assert!(negative.validate(0).is_err());

    let bad_times = Segment::new("a", SegmentValues::Value(KeyframeList::of([0.0, 1.0])))
        .with_transition(Transition::default().with_times([0.5, 0.2]));
    assert!(bad_times.validate(0).is_err());

    let out_of_range = Segment::new("a", SegmentValues::Value(KeyframeList::of([0.0, 1.0])))
        .with_transition(Transition::default().with_times([0.0, 1.5]));
    assert!(out_of_range.validate(0).is_err());

    let ok = Segment::new("a", SegmentValues::Value(KeyframeList::of([0.0, 1.0])))
        .with_transition(Transition::default().with_times([0.0, 1.0]));
    assert!(ok.validate(0).is_ok());
}

#[test]
fn empty_ease_list_is_rejected() {
    let t = Transition::default().with_ease(Vec::<Easing>::new());
    assert!(t.validate("t").is_err());
}

#[test]
fn value_segments_use_the_default_property() {
    let values = SegmentValues::Value(KeyframeList::one(Value::from("10px")));
    let pairs: Vec<_> = values.iter().collect();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, DEFAULT_PROPERTY);
}

#[test]
fn two_string_array_is_a_segment_not_a_label() {
    let item: SequenceItem = serde_json::from_str(r#"["box", "10px"]"#).unwrap();
    let SequenceItem::Segment(seg) = item else {
        panic!("expected segment");
    };
    assert_eq!(seg.values, SegmentValues::Value(KeyframeList::one("10px")));
}
