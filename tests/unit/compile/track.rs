use super::*;

fn num(v: f64) -> Option<Value> {
    Some(Value::Number(v))
}

#[test]
fn places_keyframes_inside_the_window() {
    let mut track = Track::default();
    track.add_keyframes(
        &[None, num(100.0)],
        &EaseSpec::from("easeOut"),
        &[0.0, 1.0],
        1.0,
        3.0,
    );
    let fin = track.finalize(4.0, &Easing::named("easeInOut"));

    assert_eq!(fin.values, vec![None, None, num(100.0), None]);
    assert_eq!(fin.times, vec![0.0, 0.25, 0.75, 1.0]);
    assert_eq!(
        fin.ease,
        vec![
            Easing::named("easeInOut"),
            Easing::named("easeOut"),
            Easing::named("easeOut"),
        ]
    );
}

#[test]
fn values_sort_before_holds_at_equal_times() {
    let mut track = Track::default();
    track.add_keyframes(&[None, num(1.0)], &"circIn".into(), &[0.0, 1.0], 0.0, 1.0);
    track.add_keyframes(&[None, num(2.0)], &"backInOut".into(), &[0.0, 1.0], 1.0, 2.0);
    let fin = track.finalize(2.0, &Easing::named("easeInOut"));

    assert_eq!(fin.values, vec![None, num(1.0), None, num(2.0)]);
    assert_eq!(fin.times, vec![0.0, 0.5, 0.5, 1.0]);
    assert_eq!(
        fin.ease,
        vec![
            Easing::named("circIn"),
            Easing::named("circIn"),
            Easing::named("backInOut"),
            Easing::named("backInOut"),
        ]
    );
}

#[test]
fn later_batch_value_precedes_earlier_hold() {
    let mut track = Track::default();
    track.add_keyframes(&[None, num(2.0)], &"linear".into(), &[0.0, 1.0], 1.0, 2.0);
    track.add_keyframes(&[num(0.0), num(1.0)], &"linear".into(), &[0.0, 1.0], 0.0, 1.0);
    let fin = track.finalize(2.0, &Easing::named("easeInOut"));

    assert_eq!(fin.values, vec![num(0.0), num(1.0), None, num(2.0)]);
    assert_eq!(fin.times, vec![0.0, 0.5, 0.5, 1.0]);
}

#[test]
fn overlapping_window_erases_interior_samples() {
    let mut track = Track::default();
    track.add_keyframes(
        &[num(0.0), num(1.0), num(2.0), num(3.0)],
        &"linear".into(),
        &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0],
        0.0,
        3.0,
    );
    // Window (0.5, 2.5) swallows the samples at 1 and 2; the endpoints at 0 and 3 survive.
    track.add_keyframes(&[num(10.0), num(20.0)], &"linear".into(), &[0.0, 1.0], 0.5, 2.5);
    let fin = track.finalize(3.0, &Easing::named("easeInOut"));

    assert_eq!(
        fin.values,
        vec![num(0.0), num(10.0), num(20.0), num(3.0)]
    );
}

#[test]
fn samples_on_the_window_edge_survive() {
    let mut track = Track::default();
    track.add_keyframes(&[num(0.0), num(1.0)], &"linear".into(), &[0.0, 1.0], 0.0, 1.0);
    track.add_keyframes(&[num(5.0), num(6.0)], &"linear".into(), &[0.0, 1.0], 1.0, 2.0);
    let fin = track.finalize(2.0, &Easing::named("easeInOut"));
    assert_eq!(fin.values, vec![num(0.0), num(1.0), num(5.0), num(6.0)]);
}

#[test]
fn easing_list_wraps_per_sample() {
    let mut track = Track::default();
    track.add_keyframes(
        &[num(0.0), num(1.0), num(2.0)],
        &EaseSpec::from(["easeIn"]),
        &[0.0, 0.5, 1.0],
        0.0,
        1.0,
    );
    let fin = track.finalize(1.0, &Easing::named("easeInOut"));
    assert_eq!(fin.ease, vec![Easing::named("easeIn"); 3]);
    assert_eq!(fin.times, vec![0.0, 0.5, 1.0]);
}

#[test]
fn zero_length_timeline_pins_samples_to_the_end() {
    let mut track = Track::default();
    track.add_keyframes(&[None, num(1.0)], &"linear".into(), &[0.0, 1.0], 0.0, 0.0);
    let fin = track.finalize(0.0, &Easing::named("easeInOut"));
    assert_eq!(fin.times, vec![0.0, 1.0, 1.0]);
    assert_eq!(fin.values, vec![None, None, num(1.0)]);
}
