//! Main menu widget tree.
//!
//! [`MenuUi::build`] spawns the menu once: a title and five rows of buttons
//! in a two-column table that fills the screen and hangs from its top edge.
//!
//! ```text
//! +---------------------------+
//! |        Dark Matter        |  title, wrapped
//! | [       Start Game      ] |
//! | [S] [      Control      ] |  sound toggle + control
//! |      Highscore: 123       |  label-styled button
//! | [        Credits        ] |
//! | [       Quit Game       ] |
//! +---------------------------+
//! ```
//!
//! The high-score line is the only part that changes after the build; it is
//! re-rendered through [`MenuUi::update_high_score`] or by triggering
//! [`HighScoreChangedEvent`](crate::events::ui::HighScoreChangedEvent). Both
//! go through [`show_high_score`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::{In, RunSystemOnce};
use log::{info, warn};

use crate::components::uitable::{UiCell, UiTable, UiTableBuilder};
use crate::components::widget::{TextAlign, Widget};
use crate::resources::i18n::I18nBundle;
use crate::resources::screensize::ScreenSize;
use crate::resources::skin::{SkinImageButton, SkinLabel, SkinTextButton, UiSkin};
use crate::resources::worldsignals::WorldSignals;
use crate::systems::uilayout::ui_layout_system;

pub const OFFSET_TITLE_Y: f32 = 15.0;
pub const MENU_ELEMENT_OFFSET_TITLE_Y: f32 = 20.0;
pub const MENU_DEFAULT_PADDING: f32 = 2.5;
pub const MAX_HIGHSCORE_DISPLAYED: i32 = 999;

/// What a menu button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    ToggleSound,
    ShowControls,
    ShowCredits,
    QuitGame,
}

/// Entities of the main menu.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuUi {
    pub table: Entity,
    pub start_game_button: Entity,
    pub sound_button: Entity,
    pub control_button: Entity,
    high_score_button: Entity,
    pub credits_button: Entity,
    pub quit_game_button: Entity,
}

/// Localized high-score text, with the score clamped to `0..=999`.
pub fn high_score_text(bundle: &I18nBundle, high_score: i32) -> String {
    let shown = high_score.clamp(0, MAX_HIGHSCORE_DISPLAYED);
    bundle.format("highscore", &[&shown])
}

/// Render `high_score` on the menu's high-score line and invalidate the
/// table layout if the text changed.
pub fn show_high_score(
    In((menu, high_score)): In<(MenuUi, i32)>,
    bundle: Option<Res<I18nBundle>>,
    mut widgets: Query<&mut Widget>,
    mut tables: Query<&mut UiTable>,
) {
    let Some(bundle) = bundle else {
        warn!("No I18nBundle resource, high score not updated");
        return;
    };
    let text = high_score_text(&bundle, high_score);
    let Ok(mut widget) = widgets.get_mut(menu.high_score_button) else {
        warn!("High-score widget {:?} is gone", menu.high_score_button);
        return;
    };
    if widget.set_text(text) {
        if let Ok(mut table) = tables.get_mut(menu.table) {
            table.invalidate();
        }
    }
}

impl MenuUi {
    /// Spawn the menu widgets, lay them out and insert the [`MenuUi`]
    /// resource.
    ///
    /// A copy of `bundle` becomes the [`I18nBundle`] resource used for later
    /// high-score updates. [`WorldSignals`] is created if missing so menu
    /// clicks have somewhere to go.
    ///
    /// Layout needs the [`UiSkin`] and [`ScreenSize`] resources; if
    /// either is missing the table stays invalidated and is laid out by the
    /// next [`ui_layout_system`] run.
    pub fn build(world: &mut World, bundle: &I18nBundle) -> MenuUi {
        let mut table = UiTableBuilder::new(world);
        table.defaults(
            UiCell::default()
                .pad_all(MENU_DEFAULT_PADDING)
                .expand_x()
                .fill_x()
                .colspan(2),
        );

        table.add_with(
            Widget::label(bundle.get("gameTitle"), SkinLabel::Large.name())
                .wrapped(TextAlign::Center),
            |cell| {
                cell.pad_top(OFFSET_TITLE_Y)
                    .pad_bottom(MENU_ELEMENT_OFFSET_TITLE_Y)
            },
        );
        table.row();

        let start_game_button = table.add(Widget::text_button(
            bundle.get("startGame"),
            SkinTextButton::Default.name(),
        ));
        table.row();

        let sound_button = table.add_with(
            Widget::image_button(SkinImageButton::SoundOnOff.name()),
            |cell| cell.colspan(1).no_expand_x(),
        );
        let control_button = table.add_with(
            Widget::text_button(bundle.get("control"), SkinTextButton::Default.name()),
            |cell| cell.colspan(1),
        );
        table.row();

        let high_score_button = table.add(Widget::text_button(
            high_score_text(bundle, 0),
            SkinTextButton::Label.name(),
        ));
        table.row();

        let credits_button = table.add(Widget::text_button(
            bundle.get("credit"),
            SkinTextButton::Default.name(),
        ));
        table.row();

        let quit_game_button = table.add(Widget::text_button(
            bundle.get("quitGame"),
            SkinTextButton::Default.name(),
        ));

        let table = table.fill_parent().top().build();

        let menu = MenuUi {
            table,
            start_game_button,
            sound_button,
            control_button,
            high_score_button,
            credits_button,
            quit_game_button,
        };
        world.insert_resource(menu);
        world.insert_resource(bundle.clone());
        world.init_resource::<WorldSignals>();

        if world.contains_resource::<UiSkin>() && world.contains_resource::<ScreenSize>() {
            if let Err(e) = world.run_system_once(ui_layout_system) {
                warn!("Menu layout deferred: {}", e);
            }
        }
        info!("Main menu built");
        menu
    }

    /// Show `high_score` (clamped to `0..=999`) on the high-score line.
    pub fn update_high_score(&self, world: &mut World, high_score: i32) {
        if let Err(e) = world.run_system_once_with(show_high_score, (*self, high_score)) {
            warn!("High score not updated: {}", e);
        }
    }

    /// High-score line entity, for reading its text.
    pub fn high_score_button(&self) -> Entity {
        self.high_score_button
    }

    /// Action bound to `button`, if it belongs to this menu.
    pub fn action_for(&self, button: Entity) -> Option<MenuAction> {
        if button == self.start_game_button {
            Some(MenuAction::StartGame)
        } else if button == self.sound_button {
            Some(MenuAction::ToggleSound)
        } else if button == self.control_button {
            Some(MenuAction::ShowControls)
        } else if button == self.credits_button {
            Some(MenuAction::ShowCredits)
        } else if button == self.quit_game_button {
            Some(MenuAction::QuitGame)
        } else {
            None
        }
    }

    /// Despawn the table and every widget, and remove the resource.
    pub fn despawn(world: &mut World) {
        let Some(menu) = world.remove_resource::<MenuUi>() else {
            return;
        };
        let cells: Vec<Entity> = world
            .get::<UiTable>(menu.table)
            .map(|t| t.cells().collect())
            .unwrap_or_default();
        for cell in cells {
            world.despawn(cell);
        }
        world.despawn(menu.table);
        info!("Main menu despawned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> I18nBundle {
        I18nBundle::from_properties("highscore=Best: {0}").unwrap()
    }

    #[test]
    fn test_high_score_text_clamps() {
        let b = bundle();
        assert_eq!(high_score_text(&b, 0), "Best: 0");
        assert_eq!(high_score_text(&b, 512), "Best: 512");
        assert_eq!(high_score_text(&b, 999), "Best: 999");
        assert_eq!(high_score_text(&b, 1000), "Best: 999");
        assert_eq!(high_score_text(&b, -5), "Best: 0");
    }

    #[test]
    fn test_build_stores_bundle_and_signals() {
        let mut world = World::new();
        let menu = MenuUi::build(&mut world, &bundle());
        assert!(world.contains_resource::<WorldSignals>());

        menu.update_high_score(&mut world, 42);
        let text = &world.get::<Widget>(menu.high_score_button).unwrap().text;
        assert_eq!(text, "Best: 42");
        assert!(world.get::<UiTable>(menu.table).unwrap().needs_layout);
    }

    #[test]
    fn test_action_for_unknown_entity() {
        let mut world = World::new();
        let menu = MenuUi::build(&mut world, &bundle());
        let other = world.spawn_empty().id();
        assert_eq!(menu.action_for(other), None);
        assert_eq!(menu.action_for(menu.table), None);
        assert_eq!(menu.action_for(menu.quit_game_button), Some(MenuAction::QuitGame));
    }
}
