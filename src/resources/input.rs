//! Per-frame pointer input resource.
//!
//! The host writes the pointer position and primary button state into
//! [`PointerState`] once per frame; the UI systems read it. Use
//! [`PointerState::press`] / [`PointerState::release`] from tests or
//! simulated input.
use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state.
pub struct BoolState {
    /// Whether the button is currently held down.
    pub active: bool,
    /// Whether the button was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the button was just released this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Update from the raw "is down" value, deriving the edge flags.
    pub fn set(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the pointer (mouse or touch) state for this frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Pointer position in screen pixels.
    pub position: Vec2,
    pub primary: BoolState,
}

impl PointerState {
    /// Move the pointer and press the primary button.
    pub fn press(&mut self, position: Vec2) {
        self.position = position;
        self.primary.set(true);
    }

    /// Move the pointer and release the primary button.
    pub fn release(&mut self, position: Vec2) {
        self.position = position;
        self.primary.set(false);
    }

    /// Clear the edge flags, keeping the held state.
    pub fn end_frame(&mut self) {
        self.primary.just_pressed = false;
        self.primary.just_released = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_press_release_edges() {
        let mut p = PointerState::default();
        p.press(Vec2::new(3.0, 4.0));
        assert!(p.primary.active && p.primary.just_pressed);
        assert_eq!(p.position, Vec2::new(3.0, 4.0));

        p.press(Vec2::new(3.0, 4.0));
        assert!(p.primary.active && !p.primary.just_pressed);

        p.release(Vec2::new(5.0, 6.0));
        assert!(!p.primary.active && p.primary.just_released);
    }

    #[test]
    fn test_end_frame_clears_edges() {
        let mut p = PointerState::default();
        p.press(Vec2::ZERO);
        p.end_frame();
        assert!(p.primary.active);
        assert!(!p.primary.just_pressed);
    }
}
