use super::*;

#[test]
fn default_spring_settles_in_about_a_second() {
    let oracle = SimulatedSpring::default();
    let r = oracle
        .resolve(&SpringParams::default(), None, 0.0, 100.0)
        .unwrap();
    assert!(r.duration > 0.8 && r.duration < 1.5, "{}", r.duration);
    assert_eq!(r.ease.apply(0.0), 0.0);
    assert_eq!(r.ease.apply(1.0), 1.0);
}

#[test]
fn default_spring_overshoots() {
    let oracle = SimulatedSpring::default();
    let r = oracle
        .resolve(&SpringParams::default(), None, 0.0, 100.0)
        .unwrap();
    let peak = r.ease.sample(101).into_iter().fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn authored_duration_is_honored() {
    let oracle = SimulatedSpring::default();
    let params = SpringParams {
        bounce: Some(0.0),
        ..SpringParams::default()
    };
    let r = oracle.resolve(&params, Some(1.0), 0.0, 100.0).unwrap();
    assert_eq!(r.duration, 1.0);
    let mid = r.ease.apply(0.5);
    assert!(mid > 0.5 && mid < 1.0, "{mid}");
}

#[test]
fn overdamped_spring_never_overshoots() {
    let oracle = SimulatedSpring::default();
    let params = SpringParams {
        stiffness: Some(100.0),
        damping: Some(50.0),
        ..SpringParams::default()
    };
    let r = oracle.resolve(&params, None, 0.0, 1.0).unwrap();
    assert!(r.ease.sample(65).iter().all(|v| *v <= 1.0 + 1e-9));
}

#[test]
fn stiffer_springs_settle_no_slower() {
    let oracle = SimulatedSpring::default();
    let soft = SpringParams {
        stiffness: Some(100.0),
        damping: Some(20.0),
        ..SpringParams::default()
    };
    let stiff = SpringParams {
        stiffness: Some(400.0),
        damping: Some(40.0),
        ..SpringParams::default()
    };
    let a = oracle.resolve(&soft, None, 0.0, 100.0).unwrap().duration;
    let b = oracle.resolve(&stiff, None, 0.0, 100.0).unwrap().duration;
    assert!(b <= a);
}

#[test]
fn undamped_spring_hits_the_cap() {
    let oracle = SimulatedSpring::default();
    let params = SpringParams {
        damping: Some(0.0),
        ..SpringParams::default()
    };
    let r = oracle.resolve(&params, None, 0.0, 100.0).unwrap();
    assert_eq!(r.duration, oracle.max_duration);
}

#[test]
fn invalid_physics_is_rejected() {
    let oracle = SimulatedSpring::default();
    let params = SpringParams {
        mass: Some(0.0),
        ..SpringParams::default()
    };
    let err = oracle.resolve(&params, None, 0.0, 1.0).unwrap_err();
    assert!(matches!(err, SeqlineError::Spring(_)));
}

#[test]
fn overlay_prefers_self() {
    let a = SpringParams {
        stiffness: Some(1.0),
        ..SpringParams::default()
    };
    let b = SpringParams {
        stiffness: Some(2.0),
        damping: Some(3.0),
        ..SpringParams::default()
    };
    let c = a.or(&b);
    assert_eq!(c.stiffness, Some(1.0));
    assert_eq!(c.damping, Some(3.0));
}
