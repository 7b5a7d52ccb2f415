//! Pointer interaction with UI widgets.
//!
//! [`ui_pointer_system`] turns pointer presses into button clicks. A click is
//! a press and a release over the same enabled button; dragging off the
//! button before releasing cancels it. Clicking an image button flips its
//! checked state before [`ButtonClickedEvent`] is triggered.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::uitable::UiBounds;
use crate::components::widget::Widget;
use crate::events::ui::ButtonClickedEvent;
use crate::resources::input::PointerState;

/// The enabled button under `point`, if any.
fn button_at(widgets: &Query<(Entity, &mut Widget, &UiBounds)>, point: Vec2) -> Option<Entity> {
    widgets
        .iter()
        .filter(|(_, widget, bounds)| {
            widget.is_button() && !widget.disabled && bounds.contains(point)
        })
        .map(|(entity, _, _)| entity)
        .last()
}

pub fn ui_pointer_system(
    pointer: Res<PointerState>,
    mut widgets: Query<(Entity, &mut Widget, &UiBounds)>,
    mut pressed: Local<Option<Entity>>,
    mut commands: Commands,
) {
    if pointer.primary.just_pressed {
        *pressed = button_at(&widgets, pointer.position);
    }
    if !pointer.primary.just_released {
        return;
    }
    let Some(target) = pressed.take() else {
        return;
    };
    if button_at(&widgets, pointer.position) != Some(target) {
        debug!("Click on {:?} cancelled", target);
        return;
    }

    if let Ok((_, mut widget, _)) = widgets.get_mut(target) {
        // no-op for anything but image buttons
        let checked = widget.is_checked();
        widget.set_checked(!checked);
    }
    debug!("Button {:?} clicked", target);
    commands.trigger(ButtonClickedEvent { button: target });
}
