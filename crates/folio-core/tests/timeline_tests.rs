// Host-side tests for the keyframe timeline interpreter.

use folio_core::*;

const CAM_X: Channel = Channel::new(Target::Camera, Property::PositionX);
const CAM_RY: Channel = Channel::new(Target::Camera, Property::RotationY);

fn camera_table() -> Timeline {
    Timeline::builder()
        .initial(Target::Camera, &[(Property::PositionX, 0.0), (Property::RotationY, 0.0)])
        .to(Target::Camera, &[(Property::PositionX, 2.0)], 0.2, 0.6, Easing::Power1Out)
        .to(Target::Camera, &[(Property::PositionX, -1.0)], 0.6, 0.9, Easing::Linear)
        .to(Target::Camera, &[(Property::RotationY, 1.0)], 0.0, 1.0, Easing::Linear)
        .build()
        .unwrap()
}

#[test]
fn values_clamp_outside_intervals() {
    let tl = camera_table();
    assert_eq!(tl.value_at(CAM_X, 0.0), Some(0.0));
    assert_eq!(tl.value_at(CAM_X, 0.1), Some(0.0));
    assert_eq!(tl.value_at(CAM_X, 0.95), Some(-1.0));
    assert_eq!(tl.value_at(CAM_X, 1.0), Some(-1.0));
}

#[test]
fn progress_outside_unit_range_is_clamped_not_extrapolated() {
    let tl = camera_table();
    assert_eq!(tl.value_at(CAM_X, -5.0), tl.value_at(CAM_X, 0.0));
    assert_eq!(tl.value_at(CAM_X, 5.0), tl.value_at(CAM_X, 1.0));
    assert_eq!(tl.value_at(CAM_RY, 3.0), Some(1.0));
    assert_eq!(tl.value_at(CAM_X, f32::NAN), Some(0.0));
}

#[test]
fn tracks_are_continuous_in_progress() {
    let tl = camera_table();
    let steps = 2000;
    for track in tl.tracks() {
        let mut prev = track.value_at(0.0);
        for i in 1..=steps {
            let v = track.value_at(i as f32 / steps as f32);
            assert!(
                (v - prev).abs() < 0.02,
                "{} jumped {} -> {} at step {}",
                track.channel(),
                prev,
                v,
                i
            );
            prev = v;
        }
    }
}

#[test]
fn zero_length_segment_is_an_authored_jump() {
    let tl = Timeline::builder()
        .initial(Target::Ring, &[(Property::RotationZ, 0.0)])
        .to(Target::Ring, &[(Property::RotationZ, 5.0)], 0.5, 0.5, Easing::Linear)
        .build()
        .unwrap();
    let ch = Channel::new(Target::Ring, Property::RotationZ);
    assert_eq!(tl.value_at(ch, 0.499), Some(0.0));
    assert_eq!(tl.value_at(ch, 0.5), Some(5.0));
}

#[test]
fn parallel_tracks_assign_independently() {
    let tl = camera_table();
    let out = tl.sample(0.6);
    let x = out.iter().find(|a| a.channel == CAM_X).unwrap().value;
    let ry = out.iter().find(|a| a.channel == CAM_RY).unwrap().value;
    assert!((x - 2.0).abs() < 1e-5);
    assert!((ry - 0.6).abs() < 1e-5);
}

#[test]
fn segments_may_be_authored_out_of_order() {
    let tl = Timeline::builder()
        .initial(Target::Camera, &[(Property::PositionX, 0.0)])
        .to(Target::Camera, &[(Property::PositionX, 3.0)], 0.5, 1.0, Easing::Linear)
        .to(Target::Camera, &[(Property::PositionX, 1.0)], 0.0, 0.5, Easing::Linear)
        .build()
        .unwrap();
    assert_eq!(tl.value_at(CAM_X, 0.5), Some(1.0));
    assert_eq!(tl.value_at(CAM_X, 1.0), Some(3.0));
}

#[test]
fn inverted_interval_fails_fast() {
    let err = Timeline::builder()
        .initial(Target::Camera, &[(Property::PositionX, 0.0)])
        .to(Target::Camera, &[(Property::PositionX, 1.0)], 0.8, 0.2, Easing::Linear)
        .build()
        .unwrap_err();
    assert!(matches!(err, TimelineError::InvertedInterval { .. }));
}

#[test]
fn overlapping_segments_in_one_track_are_rejected() {
    let err = Timeline::builder()
        .initial(Target::Camera, &[(Property::PositionX, 0.0)])
        .to(Target::Camera, &[(Property::PositionX, 1.0)], 0.0, 0.6, Easing::Linear)
        .to(Target::Camera, &[(Property::PositionX, 2.0)], 0.5, 1.0, Easing::Linear)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        TimelineError::OverlappingSegments {
            channel: CAM_X,
            start: 0.5
        }
    );
}

#[test]
fn overlap_across_tracks_is_allowed() {
    assert!(Timeline::builder()
        .initial(Target::Camera, &[(Property::PositionX, 0.0), (Property::RotationY, 0.0)])
        .to(Target::Camera, &[(Property::PositionX, 1.0)], 0.0, 0.6, Easing::Linear)
        .to(Target::Camera, &[(Property::RotationY, 1.0)], 0.5, 1.0, Easing::Linear)
        .build()
        .is_ok());
}

#[test]
fn out_of_range_and_missing_initial_are_rejected() {
    let err = Timeline::builder()
        .initial(Target::Camera, &[(Property::PositionX, 0.0)])
        .to(Target::Camera, &[(Property::PositionX, 1.0)], 0.5, 1.5, Easing::Linear)
        .build()
        .unwrap_err();
    assert!(matches!(err, TimelineError::IntervalOutOfRange { .. }));

    let err = Timeline::builder()
        .to(Target::Island, &[(Property::RotationY, 1.0)], 0.0, 1.0, Easing::Linear)
        .build()
        .unwrap_err();
    assert!(matches!(err, TimelineError::MissingInitialValue { .. }));

    let err = Timeline::builder()
        .initial(Target::Camera, &[(Property::PositionX, f32::INFINITY)])
        .build()
        .unwrap_err();
    assert!(matches!(err, TimelineError::NonFiniteValue { .. }));
}
