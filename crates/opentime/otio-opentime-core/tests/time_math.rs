use otio_opentime_core::{DropFrame, OpentimeError, RationalTime, TimeRange};

fn rt(v: f64) -> RationalTime {
    RationalTime::new(v, 24.0)
}

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn rescale_preserves_instant() {
    let t = RationalTime::new(48.0, 24.0);
    let r = t.rescaled_to(48.0);
    assert_eq!(r.value, 96.0);
    assert_eq!(r.rate, 48.0);
    approx(t.to_seconds(), r.to_seconds(), 1e-12);
}

#[test]
fn ordering_compares_seconds_across_rates() {
    assert!(RationalTime::new(1.0, 24.0) < RationalTime::new(1.0, 12.0));
    assert!(RationalTime::new(25.0, 25.0) > RationalTime::new(23.0, 24.0));
    assert_eq!(
        RationalTime::new(3.0, 24.0).max(RationalTime::new(1.0, 12.0)),
        rt(3.0)
    );
}

#[test]
fn frames_and_seconds_conversions() {
    let t = RationalTime::from_seconds(2.5, 24.0);
    assert_eq!(t.value, 60.0);
    assert_eq!(t.to_frames(), 60);
    assert_eq!(t.to_frames_at(48.0), 120);
    assert_eq!(RationalTime::from_frames(10.7, 24.0).value, 10.0);
}

#[test]
fn duration_from_start_end() {
    let d = RationalTime::duration_from_start_end_time(rt(10.0), rt(15.0));
    assert_eq!(d, rt(5.0));
    let d = RationalTime::duration_from_start_end_time_inclusive(rt(10.0), rt(15.0));
    assert_eq!(d, rt(6.0));
}

#[test]
fn extended_by_is_union_hull() {
    let a = TimeRange::new(rt(0.0), rt(10.0));
    let b = TimeRange::new(rt(20.0), rt(5.0));
    let u = a.extended_by(&b);
    assert_eq!(u.start_time, rt(0.0));
    assert_eq!(u.duration, rt(25.0));
}

#[test]
fn clamped_is_intersection() {
    let a = TimeRange::new(rt(0.0), rt(10.0));
    let b = TimeRange::new(rt(5.0), rt(10.0));
    let c = a.clamped(&b);
    assert_eq!(c, TimeRange::new(rt(5.0), rt(5.0)));
    assert!(a.contains_range(&c));
    assert!(b.contains_range(&c));
}

#[test]
fn containment_and_overlap_predicates() {
    let a = TimeRange::new(rt(0.0), rt(10.0));
    let b = TimeRange::new(rt(10.0), rt(5.0));
    assert!(a.contains_time(rt(0.0)));
    assert!(!a.contains_time(rt(10.0)));
    assert!(!a.overlaps(&b));
    assert!(a.intersects(&b));
    assert!(a.meets(&b));
    assert!(!a.before(&b));
    assert!(a.before(&TimeRange::new(rt(11.0), rt(1.0))));
    assert!(a.begins(rt(0.0)));
    assert!(a.finishes(rt(10.0)));
    assert_eq!(a.clamped_time(rt(42.0)), rt(9.0));
    assert_eq!(a.clamped_time(rt(-3.0)), rt(0.0));
}

#[test]
fn mixed_rate_range_end() {
    let r = TimeRange::new(RationalTime::new(1.0, 24.0), RationalTime::new(4.0, 48.0));
    assert_eq!(r.end_time_exclusive(), RationalTime::new(3.0, 24.0));
}

#[test]
fn range_from_inclusive_end() {
    let r = TimeRange::range_from_start_end_time_inclusive(rt(0.0), rt(9.0));
    assert_eq!(r.duration, rt(10.0));
    assert_eq!(r.end_time_inclusive(), rt(9.0));
}

#[test]
fn non_drop_timecode_round_trip() {
    for (frames, rate, expected) in [
        (0.0, 24.0, "00:00:00:00"),
        (24.0, 24.0, "00:00:01:00"),
        (86399.0, 24.0, "00:59:59:23"),
        (90001.0, 25.0, "01:00:00:01"),
    ] {
        let t = RationalTime::new(frames, rate);
        let tc = t.to_timecode(rate, DropFrame::InferFromRate).unwrap();
        assert_eq!(tc, expected);
        assert_eq!(RationalTime::from_timecode(&tc, rate).unwrap(), t);
    }
}

#[test]
fn timecode_rejects_bad_input() {
    assert!(matches!(
        RationalTime::from_timecode("00:00:01", 24.0),
        Err(OpentimeError::InvalidTimecodeString { .. })
    ));
    assert!(matches!(
        RationalTime::from_timecode("00:00:01:30", 24.0),
        Err(OpentimeError::InvalidTimecodeString { .. })
    ));
    assert!(matches!(
        RationalTime::from_timecode("00:00:01:00", 27.0),
        Err(OpentimeError::InvalidTimecodeRate(_))
    ));
    assert!(matches!(
        RationalTime::new(-1.0, 24.0).to_timecode(24.0, DropFrame::ForceNo),
        Err(OpentimeError::NegativeValue(_))
    ));
    assert!(matches!(
        rt(1.0).to_timecode(24.0, DropFrame::ForceYes),
        Err(OpentimeError::DropFrameUnsupported(_))
    ));
}

#[test]
fn time_string_round_trip() {
    let t = RationalTime::new(36.0, 24.0);
    assert_eq!(t.to_time_string(), "00:00:01.5");
    let back = RationalTime::from_time_string("00:00:01.5", 24.0).unwrap();
    assert_eq!(back, t);

    let t = RationalTime::new(3600.0 * 24.0 + 1.0, 24.0);
    assert_eq!(t.to_time_string(), "01:00:00.041667");

    assert_eq!(RationalTime::new(0.0, 24.0).to_time_string(), "00:00:00.0");
    assert_eq!(RationalTime::new(-48.0, 24.0).to_time_string(), "-00:00:02.0");
}

#[test]
fn time_string_accepts_short_forms() {
    assert_eq!(
        RationalTime::from_time_string("2", 24.0).unwrap(),
        RationalTime::new(48.0, 24.0)
    );
    assert_eq!(
        RationalTime::from_time_string("1:00.5", 24.0).unwrap(),
        RationalTime::new(1452.0, 24.0)
    );
    assert_eq!(
        RationalTime::from_time_string("-00:00:01", 24.0).unwrap(),
        RationalTime::new(-24.0, 24.0)
    );
}

#[test]
fn time_string_rejects_garbage() {
    for bad in ["", "aa:bb:cc", "1:2:3:4", "00:00:1.2.3", "00:-1:00"] {
        assert!(
            matches!(
                RationalTime::from_time_string(bad, 24.0),
                Err(OpentimeError::InvalidTimestring { .. })
            ),
            "expected '{bad}' to be rejected"
        );
    }
}
