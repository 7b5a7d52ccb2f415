//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 320
//! height = 180
//!
//! [camera]
//! shake = true
//! shake_duration = 0.25
//! shake_distortion = 0.25
//!
//! [ui]
//! locale = de
//! i18n_dir = ./assets/i18n
//! skin = ./assets/ui/skin.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::camerashake::{SHAKE_DISTORTION, SHAKE_DURATION, ShakeSettings};

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 320;
const DEFAULT_RENDER_HEIGHT: u32 = 180;
const DEFAULT_SHAKE_ENABLED: bool = true;
const DEFAULT_LOCALE: &str = "";
const DEFAULT_I18N_DIR: &str = "./assets/i18n";
const DEFAULT_SKIN_PATH: &str = "./assets/ui/skin.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Changes are picked up by
/// [`apply_gameconfig_changes`](crate::systems::gameconfig::apply_gameconfig_changes).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Camera shake on player hits.
    pub shake_enabled: bool,
    /// Seconds each shake lasts.
    pub shake_duration: f32,
    /// Maximum camera offset in world units.
    pub shake_distortion: f32,
    /// Locale tag such as `de` or `pt_BR`; empty for the base bundle.
    pub locale: String,
    pub i18n_dir: PathBuf,
    pub skin_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            shake_enabled: DEFAULT_SHAKE_ENABLED,
            shake_duration: SHAKE_DURATION,
            shake_distortion: SHAKE_DISTORTION,
            locale: DEFAULT_LOCALE.to_string(),
            i18n_dir: PathBuf::from(DEFAULT_I18N_DIR),
            skin_path: PathBuf::from(DEFAULT_SKIN_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} render, shake={} ({}s, {}), locale='{}'",
            self.render_width,
            self.render_height,
            self.shake_enabled,
            self.shake_duration,
            self.shake_distortion,
            self.locale
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }

        // [camera] section
        if let Some(shake) = config.getbool("camera", "shake").ok().flatten() {
            self.shake_enabled = shake;
        }
        if let Some(duration) = config.getfloat("camera", "shake_duration").ok().flatten() {
            self.shake_duration = (duration as f32).max(0.0);
        }
        if let Some(distortion) = config.getfloat("camera", "shake_distortion").ok().flatten() {
            self.shake_distortion = (distortion as f32).max(0.0);
        }

        // [ui] section
        if let Some(locale) = config.get("ui", "locale") {
            self.locale = locale;
        }
        if let Some(dir) = config.get("ui", "i18n_dir") {
            self.i18n_dir = PathBuf::from(dir);
        }
        if let Some(skin) = config.get("ui", "skin") {
            self.skin_path = PathBuf::from(skin);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        config.set("camera", "shake", Some(self.shake_enabled.to_string()));
        config.set("camera", "shake_duration", Some(self.shake_duration.to_string()));
        config.set(
            "camera",
            "shake_distortion",
            Some(self.shake_distortion.to_string()),
        );

        config.set("ui", "locale", Some(self.locale.clone()));
        config.set("ui", "i18n_dir", Some(self.i18n_dir.display().to_string()));
        config.set("ui", "skin", Some(self.skin_path.display().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Shake parameters derived from this configuration.
    pub fn shake_settings(&self) -> ShakeSettings {
        ShakeSettings {
            enabled: self.shake_enabled,
            duration: self.shake_duration,
            max_distortion: self.shake_distortion,
        }
    }

    /// Get the render size.
    pub fn render_size(&self) -> (u32, u32) {
        (self.render_width, self.render_height)
    }
}
