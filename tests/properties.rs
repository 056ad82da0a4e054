#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use planar::{Angle, AngleUnit, Circle, ErrorKind, FromRecord, Line, Point, Triangle, EPSILON};
use std::f64::consts::TAU;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

#[test]
fn angles_stay_in_canonical_range() {
    for i in -50..50 {
        let v = f64::from(i) * 97.3;
        let d = Angle::new(v, AngleUnit::Degrees).unwrap();
        assert!((0.0..360.0).contains(&d.magnitude()));
        let r = Angle::new(v, AngleUnit::Radians).unwrap();
        assert!((0.0..TAU).contains(&r.magnitude()));
    }
    assert_eq!(Angle::from_degrees(450.0).unwrap().to_degrees(), 90.0);
    assert_eq!(Angle::from_degrees(-450.0).unwrap().to_degrees(), 270.0);
    assert!(Angle::from_degrees(f64::NAN).is_err());
}

#[test]
fn clone_is_equal_and_independent() {
    let p = Point::named(1.5, -2.5, "P").unwrap();
    let mut q = p.clone();
    assert!(q.is_equal(&p));
    q.move_rel(1.0, 1.0).unwrap();
    q.rename("Q");
    assert_eq!(p.to_array(), [1.5, -2.5]);
    assert_eq!(p.name(), "P");
}

#[test]
fn lines_require_distinct_endpoints() {
    init_logging();
    let p = pt(0.0, 0.0);
    let q = pt(0.0, 1.0);
    assert!(!p.is_same_location(&q));
    assert!(Line::new(&p, &q).is_ok());
    let near = pt(EPSILON / 10.0, 0.0);
    assert!(p.is_same_location(&near));
    assert_eq!(Line::new(&p, &near).unwrap_err().kind(), ErrorKind::InvalidRange);
}

#[test]
fn point_json_round_trip_is_exact() {
    let p = Point::named(1.0 / 3.0, -123_456.789, "round").unwrap();
    let back = Point::from_json(&p.to_json()).unwrap();
    assert_eq!(back.x(), p.x());
    assert_eq!(back.y(), p.y());
    assert_eq!(back.name(), p.name());
}

#[test]
fn unit_right_triangle_measures() {
    let t = Triangle::from_array([[0.0, 0.0], [1.0, 1.0], [1.0, 0.0]]).unwrap();
    assert_eq!(t.area(), 0.5);
    assert_relative_eq!(t.perimeter(), 3.414, epsilon = 1e-3);
}

#[test]
fn vector_kernel_properties() {
    assert_eq!(pt(3.0, 4.0).distance_from_origin(), 5.0);
    let r = pt(1.0, 1.0).rotate(Angle::from_degrees(90.0).unwrap()).unwrap();
    assert!(r.is_same_location(&pt(-1.0, 1.0)));
    let d = pt(0.0, 0.0).distance_to_segment(&pt(1.0, 1.0), &pt(2.0, 3.0));
    assert_relative_eq!(d, 0.447_214, epsilon = 1e-6);
    assert_eq!(pt(1.0, 1.0).divide(EPSILON).unwrap_err().kind(), ErrorKind::InvalidRange);
    assert!(pt(0.0, 0.0).normalize().unwrap().is_same_location(&Point::ORIGIN));
    let n = pt(5.0, -2.0).normalize().unwrap();
    assert!(n.normalize().unwrap().is_same_location(&n));
    let big = pt(1e200, 1e200).normalize().unwrap();
    assert_relative_eq!(big.distance_from_origin(), 1.0, epsilon = 1e-12);
    assert_eq!(pt(0.0, 0.0).distance_to(&pt(2e160, 0.0)), 2e160);
    assert!(pt(1.5e308, 1.5e308)
        .rotate(Angle::from_degrees(45.0).unwrap())
        .is_err());
}

#[test]
fn triangle_side_validity() {
    assert!(Triangle::is_valid_triangle_sides(3.0, 4.0, 5.0));
    assert!(!Triangle::is_valid_triangle_sides(1.0, 2.0, 3.0));
}

#[test]
fn polar_flower_sampling() {
    // 12 petals sampled around a center, as a drawing front end would do.
    let center = pt(100.0, 100.0);
    let mut coords = Vec::new();
    for i in 0..12 {
        let theta = Angle::from_degrees(f64::from(i) * 30.0).unwrap();
        let mut p = Point::from_polar(50.0, theta, Some("petal")).unwrap();
        p.move_rel(center.x(), center.y()).unwrap();
        assert_relative_eq!(p.distance_to(&center), 50.0, epsilon = 1e-6);
        coords.push(p.to_string_with(",", false, 2));
    }
    assert_eq!(coords[0], "150,100");
    assert_eq!(coords[3], "100,150");
}

#[test]
fn shapes_decode_from_json() {
    init_logging();
    let l = Line::from_json(r#"{"start":{"x":"0","y":0},"end":{"x":2,"y":0},"name":"base"}"#).unwrap();
    assert_eq!(l.length(), 2.0);
    let t = Triangle::from_json(
        r#"{"pA":{"x":0,"y":0},"pB":{"x":2,"y":0},"pC":{"x":1,"y":2},"name":"apex"}"#,
    )
    .unwrap();
    assert_eq!(t.area(), 2.0);
    let c = Circle::from_json(r#"{"center":{"x":1,"y":1},"radius":2}"#).unwrap();
    assert!(c.contains(t.p_c()));
    let err = Triangle::from_json(r#"{"pA":{"x":0,"y":0},"pB":{"x":1,"y":1},"pC":{"x":2,"y":2}}"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    let err = Point::from_json("not json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

/// Rejections are reported through `tracing` when the feature is enabled.
/// Run with `cargo test --features tracing`.
#[cfg(feature = "tracing")]
#[test]
fn rejections_emit_debug_events() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct CountEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for CountEvents {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let events = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountEvents(Arc::clone(&events)));
    tracing::subscriber::with_default(subscriber, || {
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Circle::new(&Point::ORIGIN, -1.0).is_err());
        assert!(Angle::from_degrees(f64::INFINITY).is_err());
    });
    assert!(events.load(Ordering::SeqCst) >= 3);
}
