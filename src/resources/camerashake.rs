//! Camera shake effect state.
//!
//! A [`CameraShake`] perturbs the camera target by a random offset whose
//! magnitude decays linearly from `max_distortion` to zero over `duration`
//! seconds, then puts the camera back where it was.
//!
//! The [`CameraShakes`] resource owns a [`Pool`] of shake objects and the
//! queue of active ones. Only the front of the queue runs; the others wait
//! their turn, so at most one shake moves the camera at any time.
//!
//! Shakes are queued by
//! [`camera_shake_observer`](crate::systems::camerashake::camera_shake_observer)
//! and advanced by
//! [`camera_shake_system`](crate::systems::camerashake::camera_shake_system).

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::debug;

use crate::resources::camera2d::Camera2D;
use crate::resources::pool::{Pool, Poolable};

/// Maximum number of shakes queued at the same time.
pub const MAX_SHAKE_INSTANCES: usize = 4;
/// Default shake duration in seconds.
pub const SHAKE_DURATION: f32 = 0.25;
/// Default maximum camera offset in world units.
pub const SHAKE_DISTORTION: f32 = 0.25;

/// A single, poolable camera shake.
#[derive(Debug, Clone)]
pub struct CameraShake {
    /// Offset at the start of the shake, in world units.
    pub max_distortion: f32,
    /// Total shake time in seconds.
    pub duration: f32,
    current_duration: f32,
    orig_position: Vec2,
    store_cam_pos: bool,
}

impl Default for CameraShake {
    fn default() -> Self {
        Self {
            max_distortion: 0.0,
            duration: 0.0,
            current_duration: 0.0,
            orig_position: Vec2::ZERO,
            store_cam_pos: true,
        }
    }
}

impl Poolable for CameraShake {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CameraShake {
    /// Advance the shake by `delta` seconds and move `camera` accordingly.
    ///
    /// The first call captures the camera target. While elapsed time is below
    /// `duration`, the target is set to the captured position plus a random
    /// offset in `[-power, power]` on each axis. Once the time is up, the
    /// captured position is restored and `true` is returned.
    pub fn update(&mut self, delta: f32, camera: &mut Camera2D, rng: &mut fastrand::Rng) -> bool {
        if self.store_cam_pos {
            self.store_cam_pos = false;
            self.orig_position = camera.target;
        }

        if self.current_duration < self.duration {
            let power = self.current_power();
            camera.target.x = self.orig_position.x + random_unit(rng) * power;
            camera.target.y = self.orig_position.y + random_unit(rng) * power;
            self.current_duration += delta;
            return false;
        }

        camera.target = self.orig_position;
        true
    }

    /// Maximum offset applied on the next update.
    pub fn current_power(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.max_distortion * ((self.duration - self.current_duration) / self.duration)
    }

    /// Seconds this shake has been running.
    pub fn elapsed(&self) -> f32 {
        self.current_duration
    }

    /// Camera target captured on the first update, if any.
    pub fn original_position(&self) -> Option<Vec2> {
        (!self.store_cam_pos).then_some(self.orig_position)
    }
}

/// Uniform value in `[-1, 1)`.
fn random_unit(rng: &mut fastrand::Rng) -> f32 {
    rng.f32() * 2.0 - 1.0
}

/// Parameters applied to every newly queued shake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeSettings {
    /// When false, trigger events are ignored.
    pub enabled: bool,
    pub duration: f32,
    pub max_distortion: f32,
}

impl Default for ShakeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: SHAKE_DURATION,
            max_distortion: SHAKE_DISTORTION,
        }
    }
}

/// ECS resource holding the shake pool and the queue of active shakes.
#[derive(Resource, Debug)]
pub struct CameraShakes {
    pool: Pool<CameraShake>,
    active: ArrayVec<CameraShake, MAX_SHAKE_INSTANCES>,
    pub settings: ShakeSettings,
    rng: fastrand::Rng,
}

impl Default for CameraShakes {
    fn default() -> Self {
        Self::new(ShakeSettings::default())
    }
}

impl CameraShakes {
    pub fn new(settings: ShakeSettings) -> Self {
        Self {
            pool: Pool::default(),
            active: ArrayVec::new(),
            settings,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a seeded generator so offsets are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Queue a shake built from the current settings.
    ///
    /// Returns `false` when shaking is disabled or the queue is full.
    pub fn queue_shake(&mut self) -> bool {
        if !self.settings.enabled || self.active.is_full() {
            return false;
        }
        let mut shake = self.pool.obtain();
        shake.duration = self.settings.duration;
        shake.max_distortion = self.settings.max_distortion;
        self.active.push(shake);
        true
    }

    /// Advance the front shake. Returns `true` if it finished this frame.
    pub fn update(&mut self, delta: f32, camera: &mut Camera2D) -> bool {
        let Some(shake) = self.active.first_mut() else {
            return false;
        };
        if !shake.update(delta, camera, &mut self.rng) {
            return false;
        }
        let finished = self.active.remove(0);
        debug!(
            "Camera shake finished after {:.3}s, {} queued",
            finished.elapsed(),
            self.active.len()
        );
        self.pool.free(finished);
        true
    }

    /// Stop every shake, restoring the camera if one was in progress.
    pub fn cancel_all(&mut self, camera: &mut Camera2D) {
        if let Some(orig) = self.active.first().and_then(CameraShake::original_position) {
            camera.target = orig;
        }
        for shake in self.active.drain(..) {
            self.pool.free(shake);
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_shaking(&self) -> bool {
        !self.active.is_empty()
    }

    /// The shake currently moving the camera.
    pub fn current(&self) -> Option<&CameraShake> {
        self.active.first()
    }

    pub fn pool(&self) -> &Pool<CameraShake> {
        &self.pool
    }
}
