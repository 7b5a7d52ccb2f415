//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and pushes the new values into the
//! resources that depend on it: the render size used by UI layout and the
//! camera shake settings.

use bevy_ecs::prelude::*;
use log::info;

use crate::resources::camerashake::CameraShakes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::screensize::ScreenSize;

/// Applies [`GameConfig`] when it is added or modified.
///
/// A changed render size updates [`ScreenSize`], which makes tables that
/// fill the screen lay themselves out again. Shake settings only affect
/// shakes queued afterwards.
pub fn apply_gameconfig_changes(
    config: Res<GameConfig>,
    mut screen_size: ResMut<ScreenSize>,
    shakes: Option<ResMut<CameraShakes>>,
) {
    if !config.is_changed() {
        return;
    }

    let (w, h) = (config.render_width as i32, config.render_height as i32);
    if screen_size.w != w || screen_size.h != h {
        info!(
            "Render size: {}x{} -> {}x{}",
            screen_size.w, screen_size.h, w, h
        );
        screen_size.w = w;
        screen_size.h = h;
    }

    if let Some(mut shakes) = shakes {
        let settings = config.shake_settings();
        if shakes.settings != settings {
            shakes.settings = settings;
            info!("Camera shake settings: {:?}", settings);
        }
    }
}
