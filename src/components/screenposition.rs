//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores an entity's position in screen
//! (pixel) coordinates, y pointing down. UI widgets get theirs from the
//! table layout; it is the top-left corner of the widget.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Screen-space position for an entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPosition {
    /// 2D coordinates in screen pixels.
    pub pos: Vec2,
}
