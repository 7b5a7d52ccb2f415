//! Shared 2D camera resource.
//!
//! Holds the view parameters every presentation system agrees on. The camera
//! shake effect perturbs [`Camera2D::target`] and restores it afterwards.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// 2D camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// World position the camera looks at.
    pub target: Vec2,
    /// Screen-space offset of the target (usually half the render size).
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera2D {
    /// Camera looking at `target` and centered on a screen of `w` x `h`.
    pub fn centered(target: Vec2, w: f32, h: f32) -> Self {
        Self {
            target,
            offset: Vec2::new(w * 0.5, h * 0.5),
            ..Self::default()
        }
    }
}

/// ECS resource that holds the active 2D camera parameters.
///
/// Typically inserted during setup, read by render code, and mutated by
/// camera effects such as the shake.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Camera2DRes(pub Camera2D);
