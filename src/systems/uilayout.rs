//! UI table layout system.
//!
//! [`ui_layout_system`] recomputes the layout of every [`UiTable`] whose
//! layout was invalidated, or that fills its parent and the screen size
//! changed since the last pass. Results go to each cell's [`UiBounds`] and
//! [`ScreenPosition`].

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::screenposition::ScreenPosition;
use crate::components::uitable::{Measure, UiBounds, UiCell, UiTable, compute_table_layout};
use crate::components::widget::Widget;
use crate::resources::screensize::ScreenSize;
use crate::resources::skin::UiSkin;

/// Measures a widget against the skin.
struct WidgetMeasure<'a> {
    widget: &'a Widget,
    skin: &'a UiSkin,
}

impl Measure for WidgetMeasure<'_> {
    fn pref_size(&self) -> Vec2 {
        self.widget.pref_size(self.skin)
    }

    fn height_for_width(&self, width: f32) -> f32 {
        self.widget.height_for_width(self.skin, width)
    }
}

pub fn ui_layout_system(
    mut tables: Query<(Entity, &mut UiTable)>,
    mut cells: Query<(&Widget, &UiCell, &mut UiBounds, &mut ScreenPosition)>,
    skin: Res<UiSkin>,
    screen: Res<ScreenSize>,
) {
    let parent = screen.as_vec2();
    let skin: &UiSkin = &skin;
    for (entity, mut table) in tables.iter_mut() {
        let resized = table.fill_parent && table.laid_out_for != parent;
        if !table.needs_layout && !resized {
            continue;
        }

        // Cells whose entity is gone are left out of the layout.
        let present: Vec<Vec<Entity>> = table
            .rows
            .iter()
            .map(|row| row.iter().copied().filter(|e| cells.contains(*e)).collect())
            .collect();

        let layout = {
            let rows: Vec<Vec<(UiCell, WidgetMeasure)>> = present
                .iter()
                .map(|row| {
                    row.iter()
                        .filter_map(|e| cells.get(*e).ok())
                        .map(|(widget, cell, _, _)| {
                            (
                                *cell,
                                WidgetMeasure { widget, skin },
                            )
                        })
                        .collect()
                })
                .collect();
            compute_table_layout(&rows, parent, table.fill_parent, table.align)
        };

        for (row, bounds) in present.iter().zip(&layout.cells) {
            for (cell_entity, b) in row.iter().zip(bounds) {
                if let Ok((_, _, mut cell_bounds, mut pos)) = cells.get_mut(*cell_entity) {
                    *cell_bounds = *b;
                    pos.pos = b.pos;
                }
            }
        }

        table.size = layout.size;
        table.laid_out_for = parent;
        table.needs_layout = false;
        debug!(
            "Laid out table {:?}: {} rows, {}x{}",
            entity,
            present.len(),
            layout.size.x,
            layout.size.y
        );
    }
}
