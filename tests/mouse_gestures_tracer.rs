use mouse_gesture::mouse_gestures::engine::{direction_from_delta, GestureTracer};
use mouse_gesture::mouse_gestures::{Point, Sign};

#[test]
fn jitter_under_tolerance_emits_nothing() {
    let mut tracer = GestureTracer::new(10.0);
    tracer.begin(Point::new(100.0, 100.0));

    for (x, y) in [(103.0, 104.0), (95.0, 101.0), (110.0, 90.0), (100.0, 110.0)] {
        assert_eq!(tracer.observe(Point::new(x, y)), None);
    }
    assert_eq!(tracer.anchor(), Some(Point::new(100.0, 100.0)));
}

#[test]
fn slow_drift_accumulates_against_anchor() {
    let mut tracer = GestureTracer::new(10.0);
    tracer.begin(Point::new(0.0, 0.0));

    assert_eq!(tracer.observe(Point::new(4.0, 0.0)), None);
    assert_eq!(tracer.observe(Point::new(8.0, 0.0)), None);
    assert_eq!(tracer.observe(Point::new(12.0, 0.0)), Some(Sign::Right));
    assert_eq!(tracer.anchor(), Some(Point::new(12.0, 0.0)));
}

#[test]
fn dominant_axis_picks_direction() {
    let mut tracer = GestureTracer::new(10.0);
    tracer.begin(Point::new(0.0, 0.0));

    assert_eq!(tracer.observe(Point::new(-20.0, 5.0)), Some(Sign::Left));
    assert_eq!(tracer.observe(Point::new(-15.0, -20.0)), Some(Sign::Up));
    assert_eq!(tracer.observe(Point::new(-15.0, 0.0)), Some(Sign::Down));
    assert_eq!(tracer.observe(Point::new(5.0, 0.0)), Some(Sign::Right));
}

#[test]
fn axis_tie_goes_vertical() {
    assert_eq!(direction_from_delta(15.0, 15.0, 10.0), Some(Sign::Down));
    assert_eq!(direction_from_delta(-15.0, -15.0, 10.0), Some(Sign::Up));
    assert_eq!(direction_from_delta(10.0, -10.0, 10.0), None);
}

#[test]
fn reset_forgets_anchor() {
    let mut tracer = GestureTracer::default();
    tracer.begin(Point::new(0.0, 0.0));
    tracer.reset();
    assert_eq!(tracer.anchor(), None);

    // First observation after a reset only sets the anchor.
    assert_eq!(tracer.observe(Point::new(50.0, 0.0)), None);
    assert_eq!(tracer.observe(Point::new(50.0, 30.0)), Some(Sign::Down));
}
