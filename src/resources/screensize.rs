//! Render resolution resource.
//!
//! [`ScreenSize`] is kept in sync with the configured render size by
//! [`apply_gameconfig_changes`](crate::systems::gameconfig::apply_gameconfig_changes).

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Internal render resolution in pixels. UI tables that fill their parent
/// are laid out against this size.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}

impl ScreenSize {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }
}
