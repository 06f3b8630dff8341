use super::*;

const BUILTINS: [&str; 11] = [
    "linear",
    "easeIn",
    "easeOut",
    "easeInOut",
    "circIn",
    "circOut",
    "circInOut",
    "backIn",
    "backOut",
    "backInOut",
    "anticipate",
];

#[test]
fn builtin_endpoints_are_stable() {
    let reg = EasingRegistry::default();
    for name in BUILTINS {
        let e = Easing::named(name);
        assert!((reg.apply(&e, 0.0).unwrap()).abs() < 1e-6, "{name} at 0");
        assert!((reg.apply(&e, 1.0).unwrap() - 1.0).abs() < 1e-3, "{name} at 1");
    }
}

#[test]
fn ease_in_out_is_symmetric() {
    let reg = EasingRegistry::default();
    let e = Easing::named("easeInOut");
    let a = reg.apply(&e, 0.25).unwrap();
    let b = reg.apply(&e, 0.75).unwrap();
    assert!((a + b - 1.0).abs() < 1e-3);
    assert!((reg.apply(&e, 0.5).unwrap() - 0.5).abs() < 1e-3);
}

#[test]
fn back_in_undershoots() {
    let reg = EasingRegistry::default();
    assert!(reg.apply(&Easing::named("backIn"), 0.2).unwrap() < 0.0);
    assert!(reg.apply(&Easing::named("backOut"), 0.8).unwrap() > 1.0);
}

#[test]
fn unknown_names_fail_validation() {
    let reg = EasingRegistry::default();
    let err = reg.validate(&Easing::named("wobble")).unwrap_err();
    assert!(matches!(err, SeqlineError::Easing(_)));
    assert!(reg.validate(&Easing::CubicBezier([0.0, 1.0, 2.0, 3.0])).is_ok());
}

#[test]
fn registered_aliases_resolve() {
    let mut reg = EasingRegistry::empty();
    assert!(!reg.contains("snappy"));
    reg.register_bezier("snappy", [0.2, 0.0, 0.0, 1.0]);
    assert!(reg.validate(&Easing::named("snappy")).is_ok());
    let v = reg.apply(&Easing::named("snappy"), 0.5).unwrap();
    assert!(v > 0.5 && v <= 1.0);
}

#[test]
fn sampled_curve_interpolates() {
    let reg = EasingRegistry::empty();
    let e = Easing::Sampled(vec![0.0, 0.5, 1.0]);
    assert!((reg.apply(&e, 0.25).unwrap() - 0.25).abs() < 1e-12);
    assert!((reg.apply(&e, 1.0).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn ease_spec_parses_single_bezier_and_lists() {
    let v: EaseSpec = serde_json::from_str("[0, 1, 2, 3]").unwrap();
    assert_eq!(v, EaseSpec::One(Easing::CubicBezier([0.0, 1.0, 2.0, 3.0])));

    let v: EaseSpec = serde_json::from_str("[\"easeIn\", \"easeOut\"]").unwrap();
    assert_eq!(v, EaseSpec::from(["easeIn", "easeOut"]));

    let v: EaseSpec = serde_json::from_str("\"circIn\"").unwrap();
    assert_eq!(v, EaseSpec::from("circIn"));
}

#[test]
fn ease_spec_cycles_per_segment() {
    let spec = EaseSpec::from(["easeIn", "easeOut"]);
    assert_eq!(spec.for_segment(0), Some(&Easing::named("easeIn")));
    assert_eq!(spec.for_segment(3), Some(&Easing::named("easeOut")));
    assert_eq!(EaseSpec::List(vec![]).for_segment(0), None);
}

#[test]
fn custom_curves_serialize_as_samples() {
    let e = Easing::Custom(EasingFn::new(|t| t));
    let json = serde_json::to_value(&e).unwrap();
    let samples = json["sampled"].as_array().unwrap();
    assert_eq!(samples.len(), SAMPLED_EASING_POINTS);
    assert_eq!(samples[0].as_f64(), Some(0.0));
    assert_eq!(samples[SAMPLED_EASING_POINTS - 1].as_f64(), Some(1.0));

    let back: Easing = serde_json::from_value(json).unwrap();
    assert!(matches!(back, Easing::Sampled(_)));
}

#[test]
fn custom_curves_compare_by_identity() {
    let f = EasingFn::new(|t| t * t);
    assert_eq!(Easing::Custom(f.clone()), Easing::Custom(f));
    assert_ne!(
        Easing::Custom(EasingFn::new(|t| t)),
        Easing::Custom(EasingFn::new(|t| t))
    );
}
