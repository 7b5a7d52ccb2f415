//! Main menu observers.
//!
//! - [`high_score_observer`] – re-renders the high-score line on
//!   [`HighScoreChangedEvent`]
//! - [`menu_button_observer`] – turns menu button clicks into
//!   [`WorldSignals`] flags the game flow reacts to
//!
//! Both do nothing while no [`MenuUi`] resource exists, and the high-score
//! observer also needs an [`I18nBundle`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::In;
use log::{info, warn};

use crate::components::uitable::UiTable;
use crate::components::widget::Widget;
use crate::events::ui::{ButtonClickedEvent, HighScoreChangedEvent};
use crate::resources::i18n::I18nBundle;
use crate::resources::menuui::{MenuAction, MenuUi, show_high_score};
use crate::resources::worldsignals::WorldSignals;

pub fn high_score_observer(
    trigger: On<HighScoreChangedEvent>,
    menu: Option<Res<MenuUi>>,
    bundle: Option<Res<I18nBundle>>,
    widgets: Query<&mut Widget>,
    tables: Query<&mut UiTable>,
) {
    let Some(menu) = menu else {
        return;
    };
    show_high_score(In((*menu, trigger.event().score)), bundle, widgets, tables);
}

/// Flags set by menu buttons:
/// - start → `start_game`
/// - sound → `sound_muted` follows the toggle's checked state
/// - control → `show_controls`
/// - credits → `show_credits`
/// - quit → `quit_game`
pub fn menu_button_observer(
    trigger: On<ButtonClickedEvent>,
    menu: Option<Res<MenuUi>>,
    widgets: Query<&Widget>,
    signals: Option<ResMut<WorldSignals>>,
) {
    let Some(menu) = menu else {
        return;
    };
    let Some(mut signals) = signals else {
        warn!("menu_button_observer: no WorldSignals resource, click ignored");
        return;
    };
    let button = trigger.event().button;
    let Some(action) = menu.action_for(button) else {
        return;
    };
    info!("Menu action: {:?}", action);
    match action {
        MenuAction::StartGame => signals.set_flag("start_game"),
        MenuAction::ToggleSound => {
            let muted = widgets.get(button).map(|w| w.is_checked()).unwrap_or(false);
            signals.set_flag_to("sound_muted", muted);
        }
        MenuAction::ShowControls => signals.set_flag("show_controls"),
        MenuAction::ShowCredits => signals.set_flag("show_credits"),
        MenuAction::QuitGame => signals.set_flag("quit_game"),
    }
}
