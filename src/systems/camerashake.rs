//! Camera shake systems.
//!
//! - [`camera_shake_observer`] – queues a shake when the player is hit
//! - [`camera_shake_system`] – advances the front shake once per frame
//! - [`attach_camera_shake`] / [`detach_camera_shake`] – register and remove
//!   the hit listener
//!
//! Shakes run one after another. A hit that arrives while the queue already
//! holds [`MAX_SHAKE_INSTANCES`] shakes is dropped.

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::gameevent::PlayerHitEvent;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::camerashake::{CameraShakes, MAX_SHAKE_INSTANCES};
use crate::resources::worldtime::WorldTime;

/// Marker for the observer entity listening to [`PlayerHitEvent`].
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraShakeListener;

/// Queues a new shake for every player hit, up to [`MAX_SHAKE_INSTANCES`].
pub fn camera_shake_observer(trigger: On<PlayerHitEvent>, mut shakes: ResMut<CameraShakes>) {
    let event = trigger.event();
    if shakes.queue_shake() {
        debug!(
            "Player {:?} hit (life {}/{}), {} shake(s) queued",
            event.player,
            event.life,
            event.max_life,
            shakes.active_count()
        );
    } else {
        debug!(
            "Player {:?} hit, shake dropped ({} of {} active, enabled={})",
            event.player,
            shakes.active_count(),
            MAX_SHAKE_INSTANCES,
            shakes.settings.enabled
        );
    }
}

/// Advances the first active shake by the frame delta.
///
/// Only the front of the queue moves the camera. When it finishes, the
/// camera is back at the position captured when it started, and the shake
/// goes back to the pool.
pub fn camera_shake_system(
    time: Res<WorldTime>,
    mut camera: ResMut<Camera2DRes>,
    mut shakes: ResMut<CameraShakes>,
) {
    if !shakes.is_shaking() {
        return;
    }
    shakes.update(time.delta, &mut camera.0);
}

/// Start listening for [`PlayerHitEvent`].
///
/// Inserts a default [`CameraShakes`] resource if none exists. Calling this
/// twice does not register a second listener.
pub fn attach_camera_shake(world: &mut World) {
    if !world.contains_resource::<CameraShakes>() {
        world.init_resource::<CameraShakes>();
    }
    let already = world
        .query_filtered::<Entity, With<CameraShakeListener>>()
        .iter(world)
        .next()
        .is_some();
    if already {
        return;
    }
    world.spawn((Observer::new(camera_shake_observer), CameraShakeListener));
    world.flush();
    info!("Camera shake attached");
}

/// Stop listening for [`PlayerHitEvent`].
///
/// A shake in progress is cut short: the camera goes back to the position
/// it had when that shake started, and every queued shake is released.
pub fn detach_camera_shake(world: &mut World) {
    let listeners: Vec<Entity> = world
        .query_filtered::<Entity, With<CameraShakeListener>>()
        .iter(world)
        .collect();
    for entity in listeners {
        world.despawn(entity);
    }

    if world.contains_resource::<CameraShakes>() {
        world.resource_scope(|world, mut shakes: Mut<CameraShakes>| {
            if let Some(mut camera) = world.get_resource_mut::<Camera2DRes>() {
                shakes.cancel_all(&mut camera.0);
            }
        });
    }
    info!("Camera shake detached");
}
