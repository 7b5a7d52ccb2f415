//! UI events.
//!
//! [`ButtonClickedEvent`] is triggered by
//! [`ui_pointer_system`](crate::systems::uiinput::ui_pointer_system) when a
//! button is pressed and released under the pointer.
//! [`HighScoreChangedEvent`] asks the menu to re-render its high-score text.
use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct ButtonClickedEvent {
    /// The widget entity that was clicked.
    pub button: Entity,
}

/// The best score to show on the menu changed.
#[derive(Event, Debug, Clone, Copy)]
pub struct HighScoreChangedEvent {
    pub score: i32,
}
