//! Table layout for UI widgets.
//!
//! A [`UiTable`] arranges widget entities in rows. Each widget carries a
//! [`UiCell`] describing its padding, column span and how it uses extra
//! width. [`compute_table_layout`] turns rows of cells into screen-space
//! rectangles; the
//! [`ui_layout_system`](crate::systems::uilayout::ui_layout_system) applies
//! it to tables whose layout was invalidated.
//!
//! Tables are built declaratively with [`UiTableBuilder`]:
//!
//! ```ignore
//! let mut table = UiTableBuilder::new(world);
//! table.defaults(UiCell::default().pad_all(2.5).expand_x().fill_x());
//! table.add(Widget::label("Title", "large"));
//! table.row();
//! table.add_with(Widget::text_button("Go", "default"), |c| c.colspan(1));
//! let entity = table.fill_parent().top().build();
//! ```

use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::screenposition::ScreenPosition;
use crate::components::widget::Widget;

/// Padding around a cell or inside a style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pad {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Pad {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Layout properties of a widget inside its table.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct UiCell {
    pub colspan: u16,
    pub pad: Pad,
    /// Column receives a share of the table's extra width.
    pub expand_x: bool,
    /// Widget stretches to the full cell width instead of its preferred width.
    pub fill_x: bool,
}

impl Default for UiCell {
    fn default() -> Self {
        Self {
            colspan: 1,
            pad: Pad::default(),
            expand_x: false,
            fill_x: false,
        }
    }
}

impl UiCell {
    pub fn colspan(mut self, colspan: u16) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    pub fn pad_all(mut self, value: f32) -> Self {
        self.pad = Pad::all(value);
        self
    }

    pub fn pad_top(mut self, value: f32) -> Self {
        self.pad.top = value;
        self
    }

    pub fn pad_bottom(mut self, value: f32) -> Self {
        self.pad.bottom = value;
        self
    }

    pub fn expand_x(mut self) -> Self {
        self.expand_x = true;
        self
    }

    pub fn no_expand_x(mut self) -> Self {
        self.expand_x = false;
        self
    }

    pub fn fill_x(mut self) -> Self {
        self.fill_x = true;
        self
    }
}

/// Computed widget rectangle in screen pixels (top-left origin, y down).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct UiBounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl UiBounds {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.y >= self.pos.y
            && point.x <= self.pos.x + self.size.x
            && point.y <= self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Vertical placement of the rows inside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Component, Debug, Clone)]
pub struct UiTable {
    pub rows: Vec<SmallVec<[Entity; 2]>>,
    /// Table size follows the screen size.
    pub fill_parent: bool,
    pub align: TableAlign,
    /// Set to request a new layout on the next layout pass.
    pub needs_layout: bool,
    /// Size of the last layout.
    pub size: Vec2,
    /// Parent size the last layout was computed for.
    pub laid_out_for: Vec2,
}

impl Default for UiTable {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            fill_parent: false,
            align: TableAlign::Center,
            needs_layout: true,
            size: Vec2::ZERO,
            laid_out_for: Vec2::ZERO,
        }
    }
}

impl UiTable {
    /// Mark the layout as stale.
    pub fn invalidate(&mut self) {
        self.needs_layout = true;
    }

    pub fn cells(&self) -> impl Iterator<Item = Entity> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }
}

/// Size queries the layout needs from a cell's content.
pub trait Measure {
    fn pref_size(&self) -> Vec2;

    fn height_for_width(&self, _width: f32) -> f32 {
        self.pref_size().y
    }
}

/// Fixed-size content.
impl Measure for Vec2 {
    fn pref_size(&self) -> Vec2 {
        *self
    }
}

/// Result of [`compute_table_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// One rectangle per input cell, in row order.
    pub cells: Vec<Vec<UiBounds>>,
    pub size: Vec2,
}

/// Lay out rows of cells.
///
/// Single-span cells set the minimum width of their column; spanning cells
/// spread any missing width evenly over the columns they cover. When the
/// table is wider than its content, the extra width goes to the expanding
/// columns: those holding a single-span `expand_x` cell, or failing that the
/// columns covered by spanning `expand_x` cells. Without expanding columns
/// the content is centered horizontally. Rows are as tall as their tallest
/// cell; `align` places the block of rows vertically.
pub fn compute_table_layout<M: Measure>(
    rows: &[Vec<(UiCell, M)>],
    parent: Vec2,
    fill_parent: bool,
    align: TableAlign,
) -> TableLayout {
    let columns = rows
        .iter()
        .map(|row| row.iter().map(|(c, _)| c.colspan.max(1) as usize).sum::<usize>())
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return TableLayout {
            cells: rows.iter().map(|_| Vec::new()).collect(),
            size: if fill_parent { parent } else { Vec2::ZERO },
        };
    }

    // (first column, span) for every cell
    let spans: Vec<Vec<(usize, usize)>> = rows
        .iter()
        .map(|row| {
            let mut col = 0;
            row.iter()
                .map(|(cell, _)| {
                    let span = (cell.colspan.max(1) as usize).min(columns - col.min(columns)).max(1);
                    let start = col.min(columns - 1);
                    col += span;
                    (start, span)
                })
                .collect()
        })
        .collect();

    let mut col_w = vec![0.0f32; columns];
    for (row, row_spans) in rows.iter().zip(&spans) {
        for ((cell, content), &(start, span)) in row.iter().zip(row_spans) {
            if span == 1 {
                let needed = content.pref_size().x + cell.pad.horizontal();
                col_w[start] = col_w[start].max(needed);
            }
        }
    }
    for (row, row_spans) in rows.iter().zip(&spans) {
        for ((cell, content), &(start, span)) in row.iter().zip(row_spans) {
            if span > 1 {
                let needed = content.pref_size().x + cell.pad.horizontal();
                let have: f32 = col_w[start..start + span].iter().sum();
                if needed > have {
                    let share = (needed - have) / span as f32;
                    col_w[start..start + span].iter_mut().for_each(|w| *w += share);
                }
            }
        }
    }

    let mut expand = vec![false; columns];
    for (row, row_spans) in rows.iter().zip(&spans) {
        for ((cell, _), &(start, span)) in row.iter().zip(row_spans) {
            if span == 1 && cell.expand_x {
                expand[start] = true;
            }
        }
    }
    if !expand.iter().any(|e| *e) {
        for (row, row_spans) in rows.iter().zip(&spans) {
            for ((cell, _), &(start, span)) in row.iter().zip(row_spans) {
                if cell.expand_x {
                    expand[start..start + span].iter_mut().for_each(|e| *e = true);
                }
            }
        }
    }

    let content_w: f32 = col_w.iter().sum();
    let table_w = if fill_parent {
        parent.x.max(content_w)
    } else {
        content_w
    };
    let expanding = expand.iter().filter(|e| **e).count();
    if expanding > 0 && table_w > content_w {
        let share = (table_w - content_w) / expanding as f32;
        for (w, _) in col_w.iter_mut().zip(&expand).filter(|(_, e)| **e) {
            *w += share;
        }
    }
    let used_w: f32 = col_w.iter().sum();
    let mut col_x = Vec::with_capacity(columns);
    let mut x = (table_w - used_w) * 0.5;
    for w in &col_w {
        col_x.push(x);
        x += w;
    }

    // Widget widths are known now, so wrapped content can report its height.
    let mut sized: Vec<Vec<(f32, f32, f32)>> = Vec::with_capacity(rows.len());
    let mut row_h = Vec::with_capacity(rows.len());
    for (row, row_spans) in rows.iter().zip(&spans) {
        let mut tallest = 0.0f32;
        let mut cells = Vec::with_capacity(row.len());
        for ((cell, content), &(start, span)) in row.iter().zip(row_spans) {
            let avail = (col_w[start..start + span].iter().sum::<f32>() - cell.pad.horizontal())
                .max(0.0);
            let w = if cell.fill_x {
                avail
            } else {
                content.pref_size().x.min(avail)
            };
            let h = content.height_for_width(w);
            tallest = tallest.max(h + cell.pad.vertical());
            cells.push((avail, w, h));
        }
        sized.push(cells);
        row_h.push(tallest);
    }

    let content_h: f32 = row_h.iter().sum();
    let table_h = if fill_parent {
        parent.y.max(content_h)
    } else {
        content_h
    };
    let mut y = match align {
        TableAlign::Top => 0.0,
        TableAlign::Center => (table_h - content_h) * 0.5,
        TableAlign::Bottom => table_h - content_h,
    };

    let mut out = Vec::with_capacity(rows.len());
    for (((row, row_spans), cells), height) in rows.iter().zip(&spans).zip(&sized).zip(&row_h) {
        let mut bounds = Vec::with_capacity(row.len());
        for (((cell, _), &(start, _)), &(avail, w, h)) in row.iter().zip(row_spans).zip(cells) {
            let inner_h = height - cell.pad.vertical();
            bounds.push(UiBounds {
                pos: Vec2::new(
                    col_x[start] + cell.pad.left + (avail - w) * 0.5,
                    y + cell.pad.top + (inner_h - h) * 0.5,
                ),
                size: Vec2::new(w, h),
            });
        }
        out.push(bounds);
        y += height;
    }

    TableLayout {
        cells: out,
        size: Vec2::new(table_w, table_h),
    }
}

/// Declarative table construction.
///
/// Widgets are spawned as they are added; [`UiTableBuilder::build`] spawns
/// the table entity that references them.
pub struct UiTableBuilder<'w> {
    world: &'w mut World,
    table: UiTable,
    defaults: UiCell,
}

impl<'w> UiTableBuilder<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self {
            world,
            table: UiTable {
                rows: vec![SmallVec::new()],
                ..UiTable::default()
            },
            defaults: UiCell::default(),
        }
    }

    /// Cell properties used by every widget added afterwards.
    pub fn defaults(&mut self, cell: UiCell) -> &mut Self {
        self.defaults = cell;
        self
    }

    /// Add a widget with the default cell.
    pub fn add(&mut self, widget: Widget) -> Entity {
        self.add_with(widget, |c| c)
    }

    /// Add a widget, adjusting its cell from the defaults.
    pub fn add_with(&mut self, widget: Widget, cell: impl FnOnce(UiCell) -> UiCell) -> Entity {
        let cell = cell(self.defaults);
        let entity = self
            .world
            .spawn((widget, cell, UiBounds::default(), ScreenPosition::default()))
            .id();
        if let Some(row) = self.table.rows.last_mut() {
            row.push(entity);
        }
        entity
    }

    /// Start a new row.
    pub fn row(&mut self) -> &mut Self {
        self.table.rows.push(SmallVec::new());
        self
    }

    pub fn fill_parent(&mut self) -> &mut Self {
        self.table.fill_parent = true;
        self
    }

    pub fn top(&mut self) -> &mut Self {
        self.table.align = TableAlign::Top;
        self
    }

    /// Spawn the table entity. Empty rows are dropped.
    pub fn build(&mut self) -> Entity {
        let mut table = std::mem::take(&mut self.table);
        table.rows.retain(|r| !r.is_empty());
        table.needs_layout = true;
        self.world.spawn(table).id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn cell() -> UiCell {
        UiCell::default()
    }

    #[test]
    fn test_empty_table() {
        let rows: Vec<Vec<(UiCell, Vec2)>> = Vec::new();
        let layout = compute_table_layout(&rows, Vec2::new(100.0, 50.0), true, TableAlign::Top);
        assert!(layout.cells.is_empty());
        assert_eq!(layout.size, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_single_column_stacks_rows() {
        let rows = vec![
            vec![(cell(), Vec2::new(20.0, 10.0))],
            vec![(cell(), Vec2::new(30.0, 5.0))],
        ];
        let layout = compute_table_layout(&rows, Vec2::ZERO, false, TableAlign::Top);
        assert_eq!(layout.size, Vec2::new(30.0, 15.0));
        // Narrow widget is centered in the 30px column.
        assert!(approx_eq(layout.cells[0][0].pos.x, 5.0));
        assert!(approx_eq(layout.cells[0][0].pos.y, 0.0));
        assert!(approx_eq(layout.cells[1][0].pos.y, 10.0));
    }

    #[test]
    fn test_fill_parent_without_expand_centers_content() {
        let rows = vec![vec![(cell(), Vec2::new(20.0, 10.0))]];
        let layout = compute_table_layout(&rows, Vec2::new(100.0, 50.0), true, TableAlign::Center);
        let b = layout.cells[0][0];
        assert!(approx_eq(b.pos.x, 40.0));
        assert!(approx_eq(b.pos.y, 20.0));
    }

    #[test]
    fn test_expand_and_fill_take_full_width() {
        let c = cell().expand_x().fill_x().pad_all(2.0);
        let rows = vec![vec![(c, Vec2::new(20.0, 10.0))]];
        let layout = compute_table_layout(&rows, Vec2::new(100.0, 50.0), true, TableAlign::Top);
        let b = layout.cells[0][0];
        assert!(approx_eq(b.pos.x, 2.0));
        assert!(approx_eq(b.pos.y, 2.0));
        assert!(approx_eq(b.size.x, 96.0));
        assert!(approx_eq(b.size.y, 10.0));
    }

    #[test]
    fn test_single_span_expand_wins_over_spanning_expand() {
        let wide = cell().colspan(2).expand_x().fill_x();
        let fixed = cell();
        let grow = cell().expand_x().fill_x();
        let rows = vec![
            vec![(wide, Vec2::new(10.0, 10.0))],
            vec![(fixed, Vec2::new(12.0, 10.0)), (grow, Vec2::new(8.0, 10.0))],
        ];
        let layout = compute_table_layout(&rows, Vec2::new(100.0, 40.0), true, TableAlign::Top);
        let fixed_b = layout.cells[1][0];
        let grow_b = layout.cells[1][1];
        assert!(approx_eq(fixed_b.pos.x, 0.0));
        assert!(approx_eq(fixed_b.size.x, 12.0));
        assert!(approx_eq(grow_b.pos.x, 12.0));
        assert!(approx_eq(grow_b.size.x, 88.0));
        assert!(approx_eq(layout.cells[0][0].size.x, 100.0));
    }

    #[test]
    fn test_spanning_cell_widens_columns() {
        let rows = vec![
            vec![(cell().colspan(2), Vec2::new(40.0, 10.0))],
            vec![(cell(), Vec2::new(10.0, 10.0)), (cell(), Vec2::new(10.0, 10.0))],
        ];
        let layout = compute_table_layout(&rows, Vec2::ZERO, false, TableAlign::Top);
        assert!(approx_eq(layout.size.x, 40.0));
        // Each column got 10px extra: 20px each.
        assert!(approx_eq(layout.cells[1][0].pos.x, 5.0));
        assert!(approx_eq(layout.cells[1][1].pos.x, 25.0));
    }

    #[test]
    fn test_bottom_alignment() {
        let rows = vec![vec![(cell(), Vec2::new(10.0, 10.0))]];
        let layout = compute_table_layout(&rows, Vec2::new(10.0, 100.0), true, TableAlign::Bottom);
        assert!(approx_eq(layout.cells[0][0].pos.y, 90.0));
    }

    struct Wrapping;

    impl Measure for Wrapping {
        fn pref_size(&self) -> Vec2 {
            Vec2::new(0.0, 10.0)
        }

        fn height_for_width(&self, width: f32) -> f32 {
            if width < 50.0 { 30.0 } else { 10.0 }
        }
    }

    #[test]
    fn test_height_for_width_uses_assigned_width() {
        let c = cell().expand_x().fill_x();
        let narrow = compute_table_layout(&[vec![(c, Wrapping)]], Vec2::new(40.0, 0.0), true, TableAlign::Top);
        let wide = compute_table_layout(&[vec![(c, Wrapping)]], Vec2::new(80.0, 0.0), true, TableAlign::Top);
        assert!(approx_eq(narrow.cells[0][0].size.y, 30.0));
        assert!(approx_eq(wide.cells[0][0].size.y, 10.0));
    }

    #[test]
    fn test_bounds_contains() {
        let b = UiBounds {
            pos: Vec2::new(10.0, 10.0),
            size: Vec2::new(5.0, 5.0),
        };
        assert!(b.contains(Vec2::new(12.0, 14.0)));
        assert!(!b.contains(Vec2::new(16.0, 12.0)));
        assert_eq!(b.center(), Vec2::new(12.5, 12.5));
    }

    #[test]
    fn test_builder_spawns_rows() {
        let mut world = World::new();
        let mut builder = UiTableBuilder::new(&mut world);
        builder.defaults(cell().pad_all(1.0).colspan(2));
        let a = builder.add(Widget::label("a", "default"));
        builder.row();
        let b = builder.add_with(Widget::text_button("b", "default"), |c| c.colspan(1));
        let c = builder.add_with(Widget::text_button("c", "default"), |c| c.colspan(1));
        builder.row();
        let table = builder.fill_parent().top().build();

        let t = world.get::<UiTable>(table).unwrap();
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0].as_slice(), &[a]);
        assert_eq!(t.rows[1].as_slice(), &[b, c]);
        assert!(t.fill_parent);
        assert_eq!(t.align, TableAlign::Top);
        assert!(t.needs_layout);
        assert_eq!(world.get::<UiCell>(a).unwrap().colspan, 2);
        assert_eq!(world.get::<UiCell>(b).unwrap().colspan, 1);
        assert!(approx_eq(world.get::<UiCell>(c).unwrap().pad.top, 1.0));
    }
}
