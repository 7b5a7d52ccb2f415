//! Camera shake integration tests: hit events, queueing, decay and restore.

use bevy_ecs::prelude::*;
use glam::Vec2;

use darkmatter::events::gameevent::PlayerHitEvent;
use darkmatter::resources::camera2d::{Camera2D, Camera2DRes};
use darkmatter::resources::camerashake::{CameraShakes, MAX_SHAKE_INSTANCES, ShakeSettings};
use darkmatter::resources::gameconfig::GameConfig;
use darkmatter::resources::screensize::ScreenSize;
use darkmatter::resources::worldtime::WorldTime;
use darkmatter::systems::camerashake::{
    attach_camera_shake, camera_shake_system, detach_camera_shake,
};
use darkmatter::systems::gameconfig::apply_gameconfig_changes;
use darkmatter::systems::time::update_world_time;

const EPSILON: f32 = 1e-5;
const ORIGIN: Vec2 = Vec2::new(10.0, 20.0);

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(duration: f32, distortion: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(Camera2DRes(Camera2D {
        target: ORIGIN,
        ..Camera2D::default()
    }));
    world.insert_resource(
        CameraShakes::new(ShakeSettings {
            enabled: true,
            duration,
            max_distortion: distortion,
        })
        .with_seed(42),
    );
    attach_camera_shake(&mut world);
    world
}

fn make_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(camera_shake_system);
    schedule
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

fn hit(world: &mut World) {
    world.trigger(PlayerHitEvent {
        player: Entity::PLACEHOLDER,
        life: 90.0,
        max_life: 100.0,
    });
}

fn camera_target(world: &World) -> Vec2 {
    world.resource::<Camera2DRes>().0.target
}

fn active(world: &World) -> usize {
    world.resource::<CameraShakes>().active_count()
}

#[test]
fn no_hit_leaves_camera_alone() {
    let mut world = make_world(0.25, 0.25);
    let mut schedule = make_schedule();
    for _ in 0..10 {
        tick(&mut world, &mut schedule, 0.125);
    }
    assert_eq!(camera_target(&world), ORIGIN);
    assert_eq!(active(&world), 0);
}

#[test]
fn single_hit_shakes_then_restores() {
    let mut world = make_world(0.25, 0.25);
    let mut schedule = make_schedule();
    hit(&mut world);
    assert_eq!(active(&world), 1);

    // 0.25s at 0.125s per frame: two shaking frames, restore on the third.
    tick(&mut world, &mut schedule, 0.125);
    assert_eq!(active(&world), 1);
    let offset = camera_target(&world) - ORIGIN;
    assert!(offset.x.abs() <= 0.25 + EPSILON);
    assert!(offset.y.abs() <= 0.25 + EPSILON);

    tick(&mut world, &mut schedule, 0.125);
    assert_eq!(active(&world), 1);
    let offset = camera_target(&world) - ORIGIN;
    assert!(offset.x.abs() <= 0.125 + EPSILON);
    assert!(offset.y.abs() <= 0.125 + EPSILON);

    tick(&mut world, &mut schedule, 0.125);
    assert_eq!(active(&world), 0);
    assert_eq!(camera_target(&world), ORIGIN);
    assert_eq!(world.resource::<CameraShakes>().pool().free_count(), 1);
}

#[test]
fn extra_hits_beyond_capacity_are_dropped() {
    let mut world = make_world(0.25, 0.25);
    let mut schedule = make_schedule();
    for _ in 0..MAX_SHAKE_INSTANCES + 1 {
        hit(&mut world);
    }
    assert_eq!(active(&world), MAX_SHAKE_INSTANCES);

    // Each shake takes three frames and they run one after another.
    for _ in 0..3 * MAX_SHAKE_INSTANCES {
        tick(&mut world, &mut schedule, 0.125);
    }
    assert_eq!(active(&world), 0);
    assert_eq!(camera_target(&world), ORIGIN);
    assert_eq!(
        world.resource::<CameraShakes>().pool().free_count(),
        MAX_SHAKE_INSTANCES
    );
}

#[test]
fn shakes_run_one_after_another() {
    let mut world = make_world(0.25, 0.25);
    let mut schedule = make_schedule();
    hit(&mut world);
    hit(&mut world);

    for _ in 0..3 {
        tick(&mut world, &mut schedule, 0.125);
    }
    // First finished and restored, second has not started yet.
    assert_eq!(active(&world), 1);
    assert_eq!(camera_target(&world), ORIGIN);
    let second = world.resource::<CameraShakes>().current().unwrap().clone();
    assert!(second.original_position().is_none());
    assert!(approx_eq(second.elapsed(), 0.0));

    tick(&mut world, &mut schedule, 0.125);
    let second = world.resource::<CameraShakes>().current().unwrap().clone();
    assert_eq!(second.original_position(), Some(ORIGIN));
}

#[test]
fn offsets_stay_within_decaying_power() {
    let mut world = make_world(1.0, 2.0);
    let mut schedule = make_schedule();
    hit(&mut world);

    let mut frames = 0;
    while active(&world) > 0 {
        let power = world
            .resource::<CameraShakes>()
            .current()
            .map(|s| s.current_power())
            .unwrap_or(0.0);
        tick(&mut world, &mut schedule, 0.1);
        let offset = camera_target(&world) - ORIGIN;
        assert!(offset.x.abs() <= power + EPSILON, "x offset {} > {}", offset.x, power);
        assert!(offset.y.abs() <= power + EPSILON, "y offset {} > {}", offset.y, power);
        frames += 1;
        assert!(frames < 100, "shake never finished");
    }
    assert_eq!(camera_target(&world), ORIGIN);
}

#[test]
fn camera_moved_between_shakes_is_the_new_origin() {
    let mut world = make_world(0.25, 0.25);
    let mut schedule = make_schedule();
    hit(&mut world);
    for _ in 0..3 {
        tick(&mut world, &mut schedule, 0.125);
    }

    let moved = Vec2::new(-4.0, 7.5);
    world.resource_mut::<Camera2DRes>().0.target = moved;
    hit(&mut world);
    for _ in 0..3 {
        tick(&mut world, &mut schedule, 0.125);
    }
    assert_eq!(camera_target(&world), moved);
}

#[test]
fn detach_ignores_hits_and_restores_camera() {
    let mut world = make_world(0.25, 0.25);
    let mut schedule = make_schedule();
    hit(&mut world);
    hit(&mut world);
    tick(&mut world, &mut schedule, 0.125);

    detach_camera_shake(&mut world);
    assert_eq!(active(&world), 0);
    assert_eq!(camera_target(&world), ORIGIN);

    hit(&mut world);
    assert_eq!(active(&world), 0);
}

#[test]
fn attach_twice_registers_one_listener() {
    let mut world = make_world(0.25, 0.25);
    attach_camera_shake(&mut world);
    hit(&mut world);
    assert_eq!(active(&world), 1);
}

#[test]
fn attach_inserts_default_resource() {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(Camera2DRes::default());
    attach_camera_shake(&mut world);
    hit(&mut world);
    assert_eq!(active(&world), 1);
    let shake = world.resource::<CameraShakes>().current().unwrap().clone();
    assert!(approx_eq(shake.duration, 0.25));
    assert!(approx_eq(shake.max_distortion, 0.25));
}

#[test]
fn config_can_disable_shake() {
    let mut world = make_world(0.25, 0.25);
    world.insert_resource(ScreenSize { w: 320, h: 180 });
    let mut config = GameConfig::new();
    config.shake_enabled = false;
    config.shake_duration = 0.5;
    world.insert_resource(config);

    let mut schedule = Schedule::default();
    schedule.add_systems(apply_gameconfig_changes);
    schedule.run(&mut world);

    let settings = world.resource::<CameraShakes>().settings;
    assert!(!settings.enabled);
    assert!(approx_eq(settings.duration, 0.5));

    hit(&mut world);
    assert_eq!(active(&world), 0);
}
