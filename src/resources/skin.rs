//! Widget skin resource.
//!
//! A [`UiSkin`] maps style names to the metrics widgets use to measure
//! themselves. There is no font rasterization here: text width is the number
//! of characters times the style's glyph advance.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "labels": { "large": { "font_size": 16.0, "glyph_advance": 0.6, "line_height": 1.2 } },
//!   "text_buttons": { "default": { "font_size": 8.0, "padding": [2.0, 4.0, 2.0, 4.0] } },
//!   "image_buttons": { "sound_on_off": { "image_width": 12.0, "image_height": 12.0 } }
//! }
//! ```
//!
//! Missing fields take their default values, and style maps loaded from a
//! file replace the built-in styles with the same name only.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::uitable::Pad;

#[derive(Debug, Error)]
pub enum SkinError {
    #[error("failed to read skin file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse skin file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Label style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinLabel {
    Default,
    Large,
}

impl SkinLabel {
    pub fn name(self) -> &'static str {
        match self {
            SkinLabel::Default => "default",
            SkinLabel::Large => "large",
        }
    }
}

/// Text button style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinTextButton {
    Default,
    /// Button drawn like a plain label (no background).
    Label,
}

impl SkinTextButton {
    pub fn name(self) -> &'static str {
        match self {
            SkinTextButton::Default => "default",
            SkinTextButton::Label => "label",
        }
    }
}

/// Image button style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinImageButton {
    /// Two-state speaker icon.
    SoundOnOff,
}

impl SkinImageButton {
    pub fn name(self) -> &'static str {
        match self {
            SkinImageButton::SoundOnOff => "sound_on_off",
        }
    }
}

/// Metrics for text-based widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size: f32,
    /// Horizontal advance per character, as a fraction of `font_size`.
    pub glyph_advance: f32,
    /// Line height as a fraction of `font_size`.
    pub line_height: f32,
    /// Inner padding around the text, `[top, left, bottom, right]`.
    pub padding: [f32; 4],
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 8.0,
            glyph_advance: 0.6,
            line_height: 1.25,
            padding: [0.0; 4],
        }
    }
}

impl TextStyle {
    pub fn char_width(&self) -> f32 {
        self.font_size * self.glyph_advance
    }

    pub fn line_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    pub fn pad(&self) -> Pad {
        let [top, left, bottom, right] = self.padding;
        Pad {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Unwrapped size of `text` including padding.
    pub fn measure(&self, text: &str) -> Vec2 {
        let pad = self.pad();
        let widest = text
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let lines = text.lines().count().max(1);
        Vec2::new(
            widest as f32 * self.char_width() + pad.horizontal(),
            lines as f32 * self.line_px() + pad.vertical(),
        )
    }

    /// Height of `text` when word-wrapped to `width` (padding included).
    pub fn wrapped_height(&self, text: &str, width: f32) -> f32 {
        let pad = self.pad();
        let inner = (width - pad.horizontal()).max(self.char_width());
        let max_chars = ((inner / self.char_width()).floor() as usize).max(1);
        let lines: usize = text
            .lines()
            .map(|line| wrap_line_count(line, max_chars))
            .sum::<usize>()
            .max(1);
        lines as f32 * self.line_px() + pad.vertical()
    }
}

/// Number of lines a single line of text takes when greedily wrapped at
/// word boundaries to `max_chars` characters.
fn wrap_line_count(line: &str, max_chars: usize) -> usize {
    let mut lines = 1;
    let mut current = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        let needed = if current == 0 { len } else { current + 1 + len };
        if needed <= max_chars {
            current = needed;
            continue;
        }
        if current > 0 {
            lines += 1;
        }
        // Words longer than a line are broken across lines.
        lines += len.saturating_sub(1) / max_chars;
        current = match len % max_chars {
            0 => max_chars,
            rest => rest,
        };
    }
    lines
}

/// Metrics for image buttons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStyle {
    pub image_width: f32,
    pub image_height: f32,
    /// `[top, left, bottom, right]`
    pub padding: [f32; 4],
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            image_width: 16.0,
            image_height: 16.0,
            padding: [0.0; 4],
        }
    }
}

impl ImageStyle {
    pub fn measure(&self) -> Vec2 {
        let [top, left, bottom, right] = self.padding;
        Vec2::new(
            self.image_width + left + right,
            self.image_height + top + bottom,
        )
    }
}

/// Named widget styles.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSkin {
    pub labels: FxHashMap<String, TextStyle>,
    pub text_buttons: FxHashMap<String, TextStyle>,
    pub image_buttons: FxHashMap<String, ImageStyle>,
}

impl Default for UiSkin {
    fn default() -> Self {
        let mut labels = FxHashMap::default();
        labels.insert(SkinLabel::Default.name().to_string(), TextStyle::default());
        labels.insert(
            SkinLabel::Large.name().to_string(),
            TextStyle {
                font_size: 16.0,
                ..TextStyle::default()
            },
        );

        let mut text_buttons = FxHashMap::default();
        text_buttons.insert(
            SkinTextButton::Default.name().to_string(),
            TextStyle {
                padding: [3.0, 4.0, 3.0, 4.0],
                ..TextStyle::default()
            },
        );
        text_buttons.insert(SkinTextButton::Label.name().to_string(), TextStyle::default());

        let mut image_buttons = FxHashMap::default();
        image_buttons.insert(
            SkinImageButton::SoundOnOff.name().to_string(),
            ImageStyle {
                image_width: 12.0,
                image_height: 12.0,
                padding: [2.0; 4],
            },
        );

        Self {
            labels,
            text_buttons,
            image_buttons,
        }
    }
}

impl UiSkin {
    /// Parse a skin from JSON, layered over the built-in styles.
    pub fn from_json(json: &str) -> Result<Self, SkinError> {
        let loaded: UiSkin = serde_json::from_str(json)?;
        let mut skin = UiSkin::default();
        skin.labels.extend(loaded.labels);
        skin.text_buttons.extend(loaded.text_buttons);
        skin.image_buttons.extend(loaded.image_buttons);
        Ok(skin)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SkinError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let skin = Self::from_json(&json)?;
        info!("Loaded UI skin from {}", path.display());
        Ok(skin)
    }

    pub fn label(&self, name: &str) -> TextStyle {
        lookup(&self.labels, name, "label")
    }

    pub fn text_button(&self, name: &str) -> TextStyle {
        lookup(&self.text_buttons, name, "text button")
    }

    pub fn image_button(&self, name: &str) -> ImageStyle {
        lookup(&self.image_buttons, name, "image button")
    }
}

fn lookup<T: Copy + Default>(map: &FxHashMap<String, T>, name: &str, kind: &str) -> T {
    match map.get(name) {
        Some(style) => *style,
        None => {
            warn!("Unknown {} style '{}', using defaults", kind, name);
            T::default()
        }
    }
}
