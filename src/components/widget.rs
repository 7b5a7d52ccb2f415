//! UI widget component.
//!
//! A [`Widget`] is one cell of a [`UiTable`](super::uitable::UiTable): a
//! label, a text button or an image button. Widgets carry their style name
//! and text; sizes come from the [`UiSkin`] when the table is laid out.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::resources::skin::UiSkin;

/// Horizontal text alignment inside a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Label { wrap: bool, align: TextAlign },
    TextButton,
    /// Two-state button drawn from the style's image; `checked` flips on click.
    ImageButton { checked: bool },
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Widget {
    pub kind: WidgetKind,
    /// Style name looked up in the [`UiSkin`].
    pub style: String,
    pub text: String,
    /// Disabled buttons ignore clicks.
    pub disabled: bool,
}

impl Widget {
    pub fn label(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Label {
                wrap: false,
                align: TextAlign::Left,
            },
            style: style.into(),
            text: text.into(),
            disabled: false,
        }
    }

    pub fn text_button(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::TextButton,
            style: style.into(),
            text: text.into(),
            disabled: false,
        }
    }

    pub fn image_button(style: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::ImageButton { checked: false },
            style: style.into(),
            text: String::new(),
            disabled: false,
        }
    }

    /// Builder-style: enable word wrap and set alignment on a label.
    pub fn wrapped(mut self, align: TextAlign) -> Self {
        if let WidgetKind::Label { .. } = self.kind {
            self.kind = WidgetKind::Label { wrap: true, align };
        }
        self
    }

    pub fn is_button(&self) -> bool {
        !matches!(self.kind, WidgetKind::Label { .. })
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.kind, WidgetKind::ImageButton { checked: true })
    }

    pub fn set_checked(&mut self, value: bool) {
        if let WidgetKind::ImageButton { checked } = &mut self.kind {
            *checked = value;
        }
    }

    /// Replace the text. Returns `true` if it changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    /// Preferred size from the skin. Wrapped labels prefer zero width and
    /// a single line of height; they take whatever width the cell gives.
    pub fn pref_size(&self, skin: &UiSkin) -> Vec2 {
        match &self.kind {
            WidgetKind::Label { wrap: true, .. } => {
                let style = skin.label(&self.style);
                let pad = style.pad();
                Vec2::new(pad.horizontal(), style.line_px() + pad.vertical())
            }
            WidgetKind::Label { .. } => skin.label(&self.style).measure(&self.text),
            WidgetKind::TextButton => skin.text_button(&self.style).measure(&self.text),
            WidgetKind::ImageButton { .. } => skin.image_button(&self.style).measure(),
        }
    }

    /// Height when laid out at `width`.
    pub fn height_for_width(&self, skin: &UiSkin, width: f32) -> f32 {
        match &self.kind {
            WidgetKind::Label { wrap: true, .. } => {
                skin.label(&self.style).wrapped_height(&self.text, width)
            }
            _ => self.pref_size(skin).y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_not_buttons() {
        assert!(!Widget::label("x", "default").is_button());
        assert!(Widget::text_button("x", "default").is_button());
        assert!(Widget::image_button("sound_on_off").is_button());
    }

    #[test]
    fn test_checked_only_applies_to_image_buttons() {
        let mut img = Widget::image_button("sound_on_off");
        img.set_checked(true);
        assert!(img.is_checked());

        let mut btn = Widget::text_button("x", "default");
        btn.set_checked(true);
        assert!(!btn.is_checked());
    }

    #[test]
    fn test_set_text_reports_change() {
        let mut w = Widget::text_button("a", "default");
        assert!(!w.set_text("a"));
        assert!(w.set_text("b"));
        assert_eq!(w.text, "b");
    }

    #[test]
    fn test_wrapped_label_height_grows_when_narrow() {
        let skin = UiSkin::default();
        let w = Widget::label("a fairly long title text", "large").wrapped(TextAlign::Center);
        let wide = w.height_for_width(&skin, 1000.0);
        let narrow = w.height_for_width(&skin, 50.0);
        assert!(narrow > wide);
        assert_eq!(wide, w.pref_size(&skin).y);
    }

    #[test]
    fn test_text_button_measures_text() {
        let skin = UiSkin::default();
        let short = Widget::text_button("Go", "default").pref_size(&skin);
        let long = Widget::text_button("Go further", "default").pref_size(&skin);
        assert!(long.x > short.x);
        assert_eq!(long.y, short.y);
    }
}
