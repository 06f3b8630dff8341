use super::*;

fn nums(values: &[f64]) -> Vec<Option<Value>> {
    values.iter().map(|v| Some(Value::Number(*v))).collect()
}

#[test]
fn zero_repeat_is_identity() {
    let out = unroll(nums(&[0.0, 1.0]), vec![0.0, 1.0], "easeIn".into(), 1.5, 0);
    assert_eq!(out.values, nums(&[0.0, 1.0]));
    assert_eq!(out.times, vec![0.0, 1.0]);
    assert_eq!(out.ease, EaseSpec::from("easeIn"));
    assert_eq!(out.duration, 1.5);
}

#[test]
fn single_repeat_doubles_and_splits_at_midpoint() {
    let out = unroll(nums(&[0.0, 100.0]), vec![0.0, 1.0], "linear".into(), 1.0, 1);
    assert_eq!(out.values, nums(&[0.0, 100.0, 0.0, 100.0]));
    assert_eq!(out.times, vec![0.0, 0.5, 0.5, 1.0]);
    assert_eq!(out.duration, 2.0);
}

#[test]
fn replays_start_with_linear_jump_and_reuse_easings() {
    let out = unroll(
        nums(&[0.0, 50.0, 100.0]),
        vec![0.0, 0.5, 1.0],
        ["easeIn", "easeOut"].into(),
        1.0,
        1,
    );
    assert_eq!(out.values, nums(&[0.0, 50.0, 100.0, 0.0, 50.0, 100.0]));
    assert_eq!(out.times, vec![0.0, 0.25, 0.5, 0.5, 0.75, 1.0]);
    assert_eq!(
        out.ease,
        EaseSpec::from(["easeIn", "easeOut", "linear", "easeIn", "easeOut"])
    );
}

#[test]
fn several_repeats_scale_evenly() {
    let out = unroll(nums(&[0.0, 1.0]), vec![0.0, 1.0], "linear".into(), 0.5, 3);
    assert_eq!(out.duration, 2.0);
    assert_eq!(
        out.times,
        vec![0.0, 0.25, 0.25, 0.5, 0.5, 0.75, 0.75, 1.0]
    );
    assert_eq!(out.values.len(), 8);
}

#[test]
fn limits_and_variants() {
    assert!(check_repeat(0, Some(RepeatType::Mirror), 1.0, 20).is_ok());
    assert!(check_repeat(19, None, 0.0, 20).is_ok());
    assert!(check_repeat(3, Some(RepeatType::Loop), 0.0, 20).is_ok());

    for err in [
        check_repeat(20, None, 0.0, 20),
        check_repeat(1, Some(RepeatType::Mirror), 0.0, 20),
        check_repeat(1, Some(RepeatType::Reverse), 0.0, 20),
        check_repeat(1, None, 0.5, 20),
    ] {
        assert!(matches!(err, Err(SeqlineError::Repeat(_))));
    }
}
