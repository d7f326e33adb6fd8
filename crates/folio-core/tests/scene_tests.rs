// Host-side tests for the hero scene: authored timeline and idle layering.

use folio_core::constants::*;
use folio_core::*;
use glam::Vec3;
use std::f32::consts::PI;

#[test]
fn hero_timeline_is_well_formed() {
    let tl = hero_timeline().unwrap();
    // six camera channels plus island and ring spins
    assert_eq!(tl.tracks().len(), 8);
}

#[test]
fn camera_path_endpoints() {
    let mut scene = HeroScene::new(16.0 / 9.0).unwrap();
    scene.apply_progress(0.0);
    assert_eq!(scene.camera.transform.position, Vec3::from_array(CAMERA_START));
    scene.apply_progress(1.0);
    let p = scene.camera.transform.position;
    assert!((p - Vec3::new(1.2, 0.9, 3.8)).length() < 1e-5);
    let r = scene.camera.transform.rotation;
    assert!((r - Vec3::new(-0.2, 0.25, 0.0)).length() < 1e-5);
}

#[test]
fn camera_passes_through_each_waypoint() {
    let tl = hero_timeline().unwrap();
    let x = Channel::new(Target::Camera, Property::PositionX);
    let z = Channel::new(Target::Camera, Property::PositionZ);
    assert!((tl.value_at(z, 0.5 / 3.0).unwrap() - 5.2).abs() < 1e-5);
    assert!((tl.value_at(x, 1.2 / 3.0).unwrap() + 0.8).abs() < 1e-5);
}

#[test]
fn island_and_ring_spin_with_progress() {
    let tl = hero_timeline().unwrap();
    let island = Channel::new(Target::Island, Property::RotationY);
    let ring = Channel::new(Target::Ring, Property::RotationZ);
    assert!((tl.value_at(island, 1.0).unwrap() - PI * 1.2).abs() < 1e-5);
    assert_eq!(tl.value_at(ring, 0.05), Some(0.0));
    assert!((tl.value_at(ring, 0.95).unwrap() - PI * 2.0).abs() < 1e-5);
}

#[test]
fn idle_motion_is_additive_and_independent_of_progress() {
    let mut a = HeroScene::new(1.0).unwrap();
    let mut b = HeroScene::new(1.0).unwrap();
    a.apply_progress(0.5);
    b.apply_progress(0.5);
    let dt = 1.0 / 60.0;
    for i in 0..60 {
        a.advance_idle(i as f32 * dt, dt);
    }
    let (ia, ra, _) = a.resolved();
    let (ib, rb, _) = b.resolved();
    let spin = a.idle().island_spin;
    assert!(spin > 0.0);
    assert!((ia.rotation.y - (ib.rotation.y + spin)).abs() < 1e-5);
    assert!((ra.rotation.z - (rb.rotation.z + a.idle().ring_spin)).abs() < 1e-5);

    // scrolling afterwards keeps the idle offset
    a.apply_progress(0.9);
    b.apply_progress(0.9);
    let (ia, _, _) = a.resolved();
    let (ib, _, _) = b.resolved();
    assert!((ia.rotation.y - (ib.rotation.y + spin)).abs() < 1e-5);
}

#[test]
fn idle_rate_matches_per_frame_step() {
    let mut idle = IdleMotion::default();
    // at t = 0 the wobble term vanishes for the island
    idle.advance(0.0, 1.0 / 60.0);
    assert!((idle.island_spin - ISLAND_IDLE_STEP).abs() < 1e-6);
    idle.advance(10.0, 0.0);
    assert!((idle.particle_spin - 0.2).abs() < 1e-6);
}

#[test]
fn ring_is_parented_to_island() {
    let scene = HeroScene::new(1.0).unwrap();
    let snap = scene.snapshot();
    let ring_origin = snap.ring.transform_point3(Vec3::ZERO);
    assert!((ring_origin - Vec3::new(0.0, ISLAND_Y, 0.0)).length() < 1e-5);
}

#[test]
fn set_aspect_ignores_degenerate_values() {
    let mut scene = HeroScene::new(2.0).unwrap();
    scene.set_aspect(0.0);
    scene.set_aspect(f32::NAN);
    assert_eq!(scene.camera.aspect, 2.0);
    scene.set_aspect(0.5);
    assert_eq!(scene.camera.aspect, 0.5);
}

#[test]
fn particle_cloud_is_deterministic() {
    assert_eq!(particle_cloud(16, 3), particle_cloud(16, 3));
    assert_eq!(particle_cloud(PARTICLE_COUNT, PARTICLE_SEED).len(), PARTICLE_COUNT);
}

#[test]
fn untouched_orbit_keeps_timeline_camera() {
    let mut scene = HeroScene::new(1.5).unwrap();
    scene.apply_progress(0.4);
    scene.advance_orbit(1.0);
    assert_eq!(scene.view_transform(), scene.camera.transform);
    assert!(scene.orbit().is_settled());
}

#[test]
fn orbit_drag_eases_in_with_damping() {
    let mut orbit = OrbitState::default();
    orbit.drag(100.0, 0.0, 800.0);
    let total = -2.0 * PI * ORBIT_ROTATE_SPEED * 100.0 / 800.0;
    assert_eq!(orbit.yaw(), 0.0);
    assert!((orbit.pending().0 - total).abs() < 1e-6);

    // one 60 Hz frame applies the damping share
    orbit.advance(1.0 / 60.0);
    assert!((orbit.yaw() - total * ORBIT_DAMPING).abs() < 1e-5);

    // the remainder decays geometrically and never overshoots
    let mut prev = orbit.pending().0.abs();
    for _ in 0..30 {
        orbit.advance(1.0 / 60.0);
        let left = orbit.pending().0.abs();
        assert!(left < prev);
        prev = left;
    }
    for _ in 0..600 {
        orbit.advance(1.0 / 60.0);
    }
    assert!(orbit.is_settled());
    assert!((orbit.yaw() - total).abs() < 1e-3);
}

#[test]
fn orbit_damping_is_frame_rate_independent() {
    let mut a = OrbitState::default();
    let mut b = OrbitState::default();
    a.drag(0.0, 40.0, 600.0);
    b.drag(0.0, 40.0, 600.0);
    a.advance(0.5);
    for _ in 0..30 {
        b.advance(1.0 / 60.0);
    }
    assert!((a.pitch() - b.pitch()).abs() < 1e-4);
}

#[test]
fn orbit_distance_is_clamped() {
    let mut scene = HeroScene::new(1.0).unwrap();
    scene.apply_progress(0.0);
    for _ in 0..200 {
        scene.orbit_wheel(120.0);
    }
    let far = scene.view_transform().position - Vec3::from_array(ORBIT_TARGET);
    assert!((far.length() - ORBIT_MAX_DISTANCE).abs() < 1e-3);

    for _ in 0..400 {
        scene.orbit_wheel(-120.0);
    }
    let near = scene.view_transform().position - Vec3::from_array(ORBIT_TARGET);
    assert!((near.length() - ORBIT_MIN_DISTANCE).abs() < 1e-3);

    // the scale stays inside the bounds, so one notch back out moves again
    scene.orbit_wheel(120.0);
    let out = scene.view_transform().position - Vec3::from_array(ORBIT_TARGET);
    assert!(out.length() > ORBIT_MIN_DISTANCE + 1e-3);
}

#[test]
fn orbit_pitch_stops_at_limit() {
    let mut orbit = OrbitState::default();
    orbit.drag(0.0, -10_000.0, 500.0);
    for _ in 0..2000 {
        orbit.advance(1.0 / 60.0);
    }
    assert_eq!(orbit.pitch(), ORBIT_PITCH_LIMIT);
    assert!(orbit.is_settled());

    // the camera never flips over the pole
    let cam = Camera::new(1.0);
    let moved = orbit.apply(cam.transform);
    let offset = moved.position - Vec3::from_array(ORBIT_TARGET);
    let phi = (offset.y / offset.length()).acos();
    assert!(phi > 0.0 && phi < PI);
}

#[test]
fn orbit_yaw_circles_target_at_same_distance() {
    let mut scene = HeroScene::new(1.0).unwrap();
    scene.apply_progress(0.0);
    scene.orbit_drag(-200.0, 0.0, 400.0);
    for _ in 0..2000 {
        scene.advance_orbit(1.0 / 60.0);
    }
    let base = scene.camera.transform.position;
    let base_yaw = scene.camera.transform.rotation.y;
    let view = scene.view_transform();
    assert!((view.position.length() - base.length()).abs() < 1e-4);
    assert!((view.position.y - base.y).abs() < 1e-4);
    // dragging left by half the height swings the camera half way round
    assert!((view.position.z + base.z).abs() < 1e-3);
    assert!((view.rotation.y - (base_yaw + PI)).abs() < 1e-3);
    let snap = scene.snapshot();
    assert!((snap.camera_position - view.position).length() < 1e-6);
}
