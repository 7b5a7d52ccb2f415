//! Dark Matter presentation simulator.
//!
//! Runs the camera shake and main menu headless for a number of frames:
//!
//! 1. Load `config.ini`, the i18n bundle and the UI skin (falling back to
//!    built-in defaults)
//! 2. Build the ECS world, register observers and build the menu
//! 3. Run the frame loop, firing player hits and an optional click
//! 4. Print the final camera target and the menu layout
//!
//! # Running
//!
//! ```sh
//! cargo run -- --frames 120 --hit-every 20 --high-score 1234 --locale de
//! ```

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;

use darkmatter::components::uitable::{UiBounds, UiTable};
use darkmatter::components::widget::Widget;
use darkmatter::events::gameevent::PlayerHitEvent;
use darkmatter::events::ui::HighScoreChangedEvent;
use darkmatter::resources::camera2d::{Camera2D, Camera2DRes};
use darkmatter::resources::camerashake::CameraShakes;
use darkmatter::resources::gameconfig::GameConfig;
use darkmatter::resources::i18n::I18nBundle;
use darkmatter::resources::input::PointerState;
use darkmatter::resources::menuui::MenuUi;
use darkmatter::resources::screensize::ScreenSize;
use darkmatter::resources::skin::UiSkin;
use darkmatter::resources::worldsignals::WorldSignals;
use darkmatter::resources::worldtime::WorldTime;
use darkmatter::systems::camerashake::{attach_camera_shake, camera_shake_system};
use darkmatter::systems::gameconfig::apply_gameconfig_changes;
use darkmatter::systems::menu::{high_score_observer, menu_button_observer};
use darkmatter::systems::time::update_world_time;
use darkmatter::systems::uiinput::ui_pointer_system;
use darkmatter::systems::uilayout::ui_layout_system;

const BUILTIN_BUNDLE: &str = include_str!("../assets/i18n/i18n.properties");
const PLAYER_MAX_LIFE: f32 = 100.0;
const DAMAGE_PER_HIT: f32 = 10.0;

/// Dark Matter presentation layer
#[derive(Parser)]
#[command(version, about = "Headless simulator for the Dark Matter camera shake and main menu")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Frame delta in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    delta: f32,

    /// Fire a player hit every N frames.
    #[arg(long, value_name = "N")]
    hit_every: Option<u32>,

    /// High score shown on the menu.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    high_score: i32,

    /// Locale tag overriding the configuration (e.g. `de`).
    #[arg(long)]
    locale: Option<String>,

    /// Seed for the shake offsets.
    #[arg(long)]
    seed: Option<u64>,

    /// Click at screen position X,Y on the first frames.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    click: Option<Vec2>,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Vec2::new(x, y))
}

fn load_bundle(config: &GameConfig) -> I18nBundle {
    match I18nBundle::load(&config.i18n_dir, "i18n", &config.locale) {
        Ok(bundle) => bundle,
        Err(e) => {
            log::warn!("{}; using built-in strings", e);
            I18nBundle::from_properties(BUILTIN_BUNDLE).unwrap_or_else(|e| {
                log::error!("Built-in bundle is invalid: {}", e);
                I18nBundle::default()
            })
        }
    }
}

fn load_skin(config: &GameConfig) -> UiSkin {
    UiSkin::load_from_file(&config.skin_path).unwrap_or_else(|e| {
        log::warn!("{}; using built-in skin", e);
        UiSkin::default()
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::info!("{}; using defaults", e);
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let bundle = load_bundle(&config);
    let skin = load_skin(&config);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize {
        w: config.render_width as i32,
        h: config.render_height as i32,
    });
    world.insert_resource(Camera2DRes(Camera2D::centered(
        Vec2::new(config.render_width as f32 * 0.5, config.render_height as f32 * 0.5),
        config.render_width as f32,
        config.render_height as f32,
    )));
    world.insert_resource(PointerState::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(skin);

    let mut shakes = CameraShakes::new(config.shake_settings());
    if let Some(seed) = cli.seed {
        shakes = shakes.with_seed(seed);
    }
    world.insert_resource(shakes);
    world.insert_resource(config);

    attach_camera_shake(&mut world);
    world.spawn(Observer::new(high_score_observer));
    world.spawn(Observer::new(menu_button_observer));
    world.flush();

    let menu = MenuUi::build(&mut world, &bundle);
    world.trigger(HighScoreChangedEvent {
        score: cli.high_score,
    });

    let player = world.spawn_empty().id();
    let mut life = PLAYER_MAX_LIFE;

    let mut update = Schedule::default();
    update.add_systems(apply_gameconfig_changes);
    update.add_systems(ui_layout_system.after(apply_gameconfig_changes));
    update.add_systems(ui_pointer_system.after(ui_layout_system));
    update.add_systems(camera_shake_system);

    // --------------- Main loop ---------------
    for frame in 0..cli.frames {
        update_world_time(&mut world, cli.delta);

        if let Some(n) = cli.hit_every.filter(|n| *n > 0) {
            if frame % n == 0 {
                life = (life - DAMAGE_PER_HIT).max(0.0);
                world.trigger(PlayerHitEvent {
                    player,
                    life,
                    max_life: PLAYER_MAX_LIFE,
                });
            }
        }

        if let Some(point) = cli.click {
            let mut pointer = world.resource_mut::<PointerState>();
            match frame {
                0 => pointer.press(point),
                1 => pointer.release(point),
                _ => {}
            }
        }

        update.run(&mut world);

        world.resource_mut::<PointerState>().end_frame();
        world.clear_trackers();

        log::debug!(
            "frame {}: camera at {:?}",
            frame,
            world.resource::<Camera2DRes>().0.target
        );

        if world.resource::<WorldSignals>().has_flag("quit_game") {
            log::info!("Quit requested from the menu");
            break;
        }
    }

    // --------------- Report ---------------
    let camera = world.resource::<Camera2DRes>().0;
    println!("camera target: ({:.3}, {:.3})", camera.target.x, camera.target.y);
    println!(
        "shakes active: {}",
        world.resource::<CameraShakes>().active_count()
    );

    let cells: Vec<Entity> = world
        .get::<UiTable>(menu.table)
        .map(|t| t.cells().collect())
        .unwrap_or_default();
    for cell in cells {
        let (Some(widget), Some(bounds)) = (world.get::<Widget>(cell), world.get::<UiBounds>(cell))
        else {
            continue;
        };
        println!(
            "{:>6.1},{:>6.1} {:>6.1}x{:<5.1} {:?} '{}'{}",
            bounds.pos.x,
            bounds.pos.y,
            bounds.size.x,
            bounds.size.y,
            widget.kind,
            widget.text,
            if widget.is_checked() { " [checked]" } else { "" }
        );
    }

    let signals = world.resource::<WorldSignals>();
    let mut flags: Vec<&String> = signals.flags.iter().collect();
    flags.sort();
    println!("signals: {:?}", flags);
}
