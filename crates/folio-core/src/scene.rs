//! Hero scene model: camera, island group, ring and particle cloud.
//!
//! These types avoid referencing platform APIs. The web frontend feeds scroll
//! progress and frame time in, then reads a [`SceneSnapshot`] of matrices to
//! upload as uniforms.

use crate::constants::*;
use crate::easing::Easing;
use crate::error::TimelineError;
use crate::timeline::{Assignment, Property, Target, Timeline};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;

/// Position plus XYZ Euler rotation, as the scene graph stores them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(q, self.position)
    }

    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::PositionX => self.position.x = value,
            Property::PositionY => self.position.y = value,
            Property::PositionZ => self.position.z = value,
            Property::RotationX => self.rotation.x = value,
            Property::RotationY => self.rotation.y = value,
            Property::RotationZ => self.rotation.z = value,
        }
    }
}

/// Right-handed perspective camera placed by a [`Transform`]; looks down -Z
/// in its local frame.
#[derive(Clone, Debug)]
pub struct Camera {
    pub transform: Transform,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            transform: Transform::at(Vec3::from_array(CAMERA_START)),
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.matrix().inverse()
    }
}

/// Idle offsets layered on top of timeline values, independent of scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IdleMotion {
    pub island_spin: f32,
    pub ring_spin: f32,
    pub particle_spin: f32,
}

impl IdleMotion {
    pub fn advance(&mut self, elapsed: f32, dt: f32) {
        let frames = dt.max(0.0) * IDLE_REFERENCE_FPS;
        self.island_spin +=
            (ISLAND_IDLE_STEP + (elapsed * ISLAND_IDLE_FREQ).sin() * ISLAND_IDLE_WOBBLE) * frames;
        self.ring_spin +=
            (RING_IDLE_STEP + (elapsed * RING_IDLE_FREQ).cos() * RING_IDLE_WOBBLE) * frames;
        self.particle_spin = elapsed * PARTICLE_SPIN_PER_SEC;
    }
}

/// User orbit around the scene target, layered on the timeline camera.
///
/// Drags queue yaw and pitch that are eased in by [`OrbitState::advance`];
/// a wheel zoom scales the camera distance immediately. The result is
/// clamped to `ORBIT_MIN_DISTANCE..=ORBIT_MAX_DISTANCE` and never crosses
/// the poles. Panning is not supported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            zoom: 1.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }
}

impl OrbitState {
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Rotation still to be eased in.
    pub fn pending(&self) -> (f32, f32) {
        (self.pending_yaw, self.pending_pitch)
    }

    pub fn is_settled(&self) -> bool {
        self.pending_yaw == 0.0 && self.pending_pitch == 0.0
    }

    /// Queue a pointer drag of `dx`, `dy` CSS pixels over a surface
    /// `height` pixels tall. A full-height drag turns one revolution.
    pub fn drag(&mut self, dx: f32, dy: f32, height: f32) {
        if !(height.is_finite() && height > 0.0 && dx.is_finite() && dy.is_finite()) {
            return;
        }
        let per_px = 2.0 * PI * ORBIT_ROTATE_SPEED / height;
        self.pending_yaw -= dx * per_px;
        self.pending_pitch -= dy * per_px;
    }

    /// Wheel zoom; positive `delta_y` moves away. `base_distance` is the
    /// unorbited camera distance, used to keep the scale inside the
    /// distance bounds.
    pub fn wheel(&mut self, delta_y: f32, base_distance: f32) {
        if delta_y == 0.0 || !(delta_y.is_finite() && base_distance > 0.0) {
            return;
        }
        let zoom = if delta_y > 0.0 {
            self.zoom / ORBIT_ZOOM_STEP
        } else {
            self.zoom * ORBIT_ZOOM_STEP
        };
        self.zoom = zoom.clamp(
            ORBIT_MIN_DISTANCE / base_distance,
            ORBIT_MAX_DISTANCE / base_distance,
        );
    }

    /// Ease queued rotation in. Frame-rate independent: at 60 Hz each frame
    /// applies `ORBIT_DAMPING` of what is left.
    pub fn advance(&mut self, dt: f32) {
        if self.is_settled() {
            return;
        }
        let keep = (1.0 - ORBIT_DAMPING).powf(dt.max(0.0) * IDLE_REFERENCE_FPS);
        let step_yaw = self.pending_yaw * (1.0 - keep);
        let step_pitch = self.pending_pitch * (1.0 - keep);
        self.yaw += step_yaw;
        self.pending_yaw -= step_yaw;
        let pitch = (self.pitch + step_pitch).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        if pitch != self.pitch + step_pitch {
            self.pending_pitch = 0.0;
        } else {
            self.pending_pitch -= step_pitch;
        }
        self.pitch = pitch;
        if self.pending_yaw.abs() < ORBIT_SETTLE_EPS {
            self.pending_yaw = 0.0;
        }
        if self.pending_pitch.abs() < ORBIT_SETTLE_EPS {
            self.pending_pitch = 0.0;
        }
    }

    fn is_neutral(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0 && self.zoom == 1.0
    }

    /// Move `camera` around the target by the current orbit, turning it by
    /// the same angles so the authored framing is kept.
    pub fn apply(&self, camera: Transform) -> Transform {
        if self.is_neutral() {
            return camera;
        }
        let target = Vec3::from_array(ORBIT_TARGET);
        let offset = camera.position - target;
        let radius = offset.length();
        if radius < 1e-6 {
            return camera;
        }
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let new_theta = theta + self.yaw;
        let new_phi = (phi + self.pitch).clamp(ORBIT_POLAR_EPS, PI - ORBIT_POLAR_EPS);
        let new_radius = (radius * self.zoom).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let (sin_phi, cos_phi) = new_phi.sin_cos();
        let (sin_theta, cos_theta) = new_theta.sin_cos();
        let mut out = camera;
        out.position = target
            + Vec3::new(
                new_radius * sin_phi * sin_theta,
                new_radius * cos_phi,
                new_radius * sin_phi * cos_theta,
            );
        out.rotation.y += new_theta - theta;
        out.rotation.x += new_phi - phi;
        out
    }
}

/// Matrices uploaded for one hero frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSnapshot {
    pub view_proj: Mat4,
    pub camera_position: Vec3,
    pub island: Mat4,
    pub ring: Mat4,
    pub particles: Mat4,
}

pub struct HeroScene {
    pub camera: Camera,
    island: Transform,
    ring: Transform,
    particles: Transform,
    timeline: Timeline,
    idle: IdleMotion,
    orbit: OrbitState,
    progress: f32,
}

impl HeroScene {
    pub fn new(aspect: f32) -> Result<Self, TimelineError> {
        let mut ring = Transform::default();
        ring.rotation.x = PI * 0.5;
        Ok(Self {
            camera: Camera::new(aspect),
            island: Transform::at(Vec3::new(0.0, ISLAND_Y, 0.0)),
            ring,
            particles: Transform::default(),
            timeline: hero_timeline()?,
            idle: IdleMotion::default(),
            orbit: OrbitState::default(),
            progress: 0.0,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn idle(&self) -> IdleMotion {
        self.idle
    }

    pub fn orbit(&self) -> OrbitState {
        self.orbit
    }

    pub fn orbit_drag(&mut self, dx: f32, dy: f32, height: f32) {
        self.orbit.drag(dx, dy, height);
    }

    pub fn orbit_wheel(&mut self, delta_y: f32) {
        let target = Vec3::from_array(ORBIT_TARGET);
        let base = (self.camera.transform.position - target).length();
        self.orbit.wheel(delta_y, base);
    }

    pub fn advance_orbit(&mut self, dt: f32) {
        self.orbit.advance(dt);
    }

    /// Camera placement after the orbit layer.
    pub fn view_transform(&self) -> Transform {
        self.orbit.apply(self.camera.transform)
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    /// Assign timeline values for `progress` onto their targets.
    pub fn apply_progress(&mut self, progress: f32) {
        self.progress = progress;
        for Assignment { channel, value } in self.timeline.sample(progress) {
            let transform = match channel.target {
                Target::Camera => &mut self.camera.transform,
                Target::Island => &mut self.island,
                Target::Ring => &mut self.ring,
                Target::Particles => &mut self.particles,
            };
            transform.set(channel.property, value);
        }
    }

    pub fn advance_idle(&mut self, elapsed: f32, dt: f32) {
        self.idle.advance(elapsed, dt);
    }

    /// Timeline transforms with idle offsets added.
    pub fn resolved(&self) -> (Transform, Transform, Transform) {
        let mut island = self.island;
        island.rotation.y += self.idle.island_spin;
        let mut ring = self.ring;
        ring.rotation.z += self.idle.ring_spin;
        let mut particles = self.particles;
        particles.rotation.y += self.idle.particle_spin;
        (island, ring, particles)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let (island, ring, particles) = self.resolved();
        let island_m = island.matrix();
        let view = self.view_transform();
        SceneSnapshot {
            view_proj: self.camera.projection_matrix() * view.matrix().inverse(),
            camera_position: view.position,
            island: island_m,
            // ring is parented to the island group
            ring: island_m * ring.matrix(),
            particles: particles.matrix(),
        }
    }
}

/// Scroll-driven camera journey plus island/ring parallax.
///
/// Authored on a 3-unit timeline and normalized to progress; each camera
/// segment ends where the next begins.
pub fn hero_timeline() -> Result<Timeline, TimelineError> {
    use Property::*;
    const SPAN: f32 = 3.0;
    let at = |t: f32| t / SPAN;
    let ease = Easing::Power1Out;
    let [cx, cy, cz] = CAMERA_START;
    Timeline::builder()
        .initial(
            Target::Camera,
            &[
                (PositionX, cx),
                (PositionY, cy),
                (PositionZ, cz),
                (RotationX, 0.0),
                (RotationY, 0.0),
                (RotationZ, 0.0),
            ],
        )
        .initial(Target::Island, &[(RotationY, 0.0)])
        .initial(Target::Ring, &[(RotationZ, 0.0)])
        .to(
            Target::Camera,
            &[(PositionX, 0.0), (PositionY, 1.0), (PositionZ, 5.2)],
            at(0.0),
            at(0.5),
            ease,
        )
        .to(
            Target::Camera,
            &[(RotationX, -0.05), (RotationY, 0.0), (RotationZ, 0.0)],
            at(0.0),
            at(0.5),
            ease,
        )
        .to(
            Target::Camera,
            &[(PositionX, -0.8), (PositionY, 0.8), (PositionZ, 4.8)],
            at(0.5),
            at(1.2),
            ease,
        )
        .to(
            Target::Camera,
            &[(RotationX, -0.12), (RotationY, -0.12), (RotationZ, 0.0)],
            at(0.5),
            at(1.2),
            ease,
        )
        .to(
            Target::Camera,
            &[(PositionX, 1.2), (PositionY, 0.9), (PositionZ, 3.8)],
            at(1.2),
            at(2.8),
            ease,
        )
        .to(
            Target::Camera,
            &[(RotationX, -0.2), (RotationY, 0.25), (RotationZ, 0.0)],
            at(1.2),
            at(2.8),
            ease,
        )
        .to(Target::Island, &[(RotationY, PI * 1.2)], at(0.0), at(3.0), ease)
        .to(Target::Ring, &[(RotationZ, PI * 2.0)], at(0.2), at(2.7), ease)
        .build()
}

/// Deterministic particle ring around the island.
pub fn particle_cloud(count: usize, seed: u64) -> Vec<[f32; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let r = rng.gen_range(PARTICLE_RADIUS_MIN..PARTICLE_RADIUS_MAX);
            let theta = rng.gen::<f32>() * PI * 2.0;
            let y = rng.gen_range(PARTICLE_Y_MIN..PARTICLE_Y_MAX);
            [theta.cos() * r, y, theta.sin() * r]
        })
        .collect()
}
