//! Gameplay events consumed by presentation effects.
//!
//! [`PlayerHitEvent`] is fired by gameplay code whenever the player takes
//! damage. The camera shake listens for it; see
//! [`attach_camera_shake`](crate::systems::camerashake::attach_camera_shake).
use bevy_ecs::prelude::*;

/// The player was damaged.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerHitEvent {
    /// The player entity that was hit.
    pub player: Entity,
    /// Remaining life after the hit.
    pub life: f32,
    pub max_life: f32,
}
