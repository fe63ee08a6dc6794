//! Room × slot grid for one conference day.
//!
//! Geometry comes from `services::layout`; this module only maps grid lines
//! to screen rectangles and wires cells to the drag session.

use egui::{Align2, FontId, Pos2, Rect, ScrollArea, Sense, Stroke, Ui, Vec2};

use super::item_card::render_item_card;
use super::palette::SchedulePalette;
use super::placeholder_cell::render_placeholder;
use super::BoardInteraction;
use crate::models::day::Day;
use crate::services::board::{BoardState, CellKey};
use crate::services::dnd::DragSession;
use crate::services::layout::{GridArea, FIRST_ROOM_COLUMN, FIRST_SLOT_ROW};
use crate::ui_egui::dialogs::add_item_dialog::AddItemTarget;

pub const GUTTER_WIDTH: f32 = 56.0;
pub const HEADER_HEIGHT: f32 = 28.0;
pub const ROW_HEIGHT: f32 = 96.0;
pub const MIN_COLUMN_WIDTH: f32 = 150.0;
pub const CELL_GAP: f32 = 4.0;

/// Screen metrics of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub origin: Pos2,
    pub column_width: f32,
    pub row_height: f32,
}

impl GridMetrics {
    pub fn new(origin: Pos2, available_width: f32, room_count: usize) -> Self {
        let rooms = room_count.max(1) as f32;
        let column_width = ((available_width - GUTTER_WIDTH) / rooms).max(MIN_COLUMN_WIDTH);
        Self {
            origin,
            column_width,
            row_height: ROW_HEIGHT,
        }
    }

    pub fn total_size(&self, room_count: usize, slot_count: usize) -> Vec2 {
        Vec2::new(
            GUTTER_WIDTH + self.column_width * room_count as f32,
            HEADER_HEIGHT + self.row_height * slot_count as f32,
        )
    }

    /// Screen rectangle covering a grid area, with the cell gap removed.
    pub fn area_rect(&self, area: GridArea) -> Rect {
        let left = self.origin.x
            + GUTTER_WIDTH
            + (area.column_start - FIRST_ROOM_COLUMN) as f32 * self.column_width;
        let top = self.origin.y + HEADER_HEIGHT + (area.row_start - FIRST_SLOT_ROW) as f32 * self.row_height;
        let size = Vec2::new(
            area.column_span() as f32 * self.column_width - CELL_GAP,
            area.row_span() as f32 * self.row_height - CELL_GAP,
        );
        Rect::from_min_size(Pos2::new(left, top), size)
    }

    pub fn header_rect(&self, column: usize) -> Rect {
        let left = self.origin.x + GUTTER_WIDTH + (column - FIRST_ROOM_COLUMN) as f32 * self.column_width;
        Rect::from_min_size(
            Pos2::new(left, self.origin.y),
            Vec2::new(self.column_width - CELL_GAP, HEADER_HEIGHT - CELL_GAP),
        )
    }

    pub fn gutter_rect(&self, row: usize) -> Rect {
        let top = self.origin.y + HEADER_HEIGHT + (row - FIRST_SLOT_ROW) as f32 * self.row_height;
        Rect::from_min_size(Pos2::new(self.origin.x, top), Vec2::new(GUTTER_WIDTH - CELL_GAP, self.row_height))
    }
}

pub struct DayScheduleView;

impl DayScheduleView {
    pub fn show(ui: &mut Ui, board: &mut BoardState, session: &mut DragSession) -> BoardInteraction {
        let mut interaction = BoardInteraction::default();
        let palette = SchedulePalette::from_visuals(ui.visuals());

        let Some(day) = board.selected_day().cloned() else {
            ui.label("No days configured for this conference.");
            return interaction;
        };
        let Some(layout) = board.layout().cloned() else {
            return interaction;
        };

        if !layout.unplaced_item_ids.is_empty() {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!(
                    "{} item(s) reference rooms not available on this day: {}",
                    layout.unplaced_item_ids.len(),
                    layout.unplaced_item_ids.join(", ")
                ),
            );
        }

        ScrollArea::both()
            .id_source(("day_schedule", day.day))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let origin = ui.cursor().min;
                let metrics = GridMetrics::new(origin, ui.available_width(), layout.columns.len());
                let size = metrics.total_size(layout.columns.len(), layout.rows.len());
                ui.allocate_rect(Rect::from_min_size(origin, size), Sense::hover());

                Self::paint_headers(ui, &metrics, &layout, &palette);

                for cell in &layout.placeholders {
                    let rect = metrics.area_rect(cell.area);
                    let key = CellKey::new(cell.slot_id.clone(), cell.room_id.clone());
                    let in_progress = board.is_in_flight(&key);
                    if render_placeholder(ui, rect, cell, session, in_progress, &palette) {
                        interaction.open_add_dialog = Some(Self::add_target(&day, key));
                    }
                }

                for placement in &layout.items {
                    let rect = metrics.area_rect(placement.area);
                    let unassigning = board.is_unassigning(&placement.item.id);
                    if render_item_card(ui, rect, placement, session, unassigning, &palette) {
                        interaction.edit_item = Some(placement.item.id.clone());
                    }
                }
            });

        interaction
    }

    fn paint_headers(
        ui: &Ui,
        metrics: &GridMetrics,
        layout: &crate::services::layout::DayLayout,
        palette: &SchedulePalette,
    ) {
        let painter = ui.painter();

        for column in &layout.columns {
            let rect = metrics.header_rect(column.column);
            painter.rect_filled(rect, 2.0, palette.header_bg);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &column.name,
                FontId::proportional(13.0),
                ui.visuals().strong_text_color(),
            );
        }

        for row in &layout.rows {
            let rect = metrics.gutter_rect(row.row_start);
            painter.text(
                rect.right_top() + Vec2::new(-6.0, 4.0),
                Align2::RIGHT_TOP,
                &row.label,
                FontId::proportional(12.0),
                palette.gutter_text,
            );
            painter.line_segment(
                [
                    Pos2::new(rect.right(), rect.top()),
                    Pos2::new(
                        metrics.origin.x + GUTTER_WIDTH + metrics.column_width * layout.columns.len() as f32,
                        rect.top(),
                    ),
                ],
                Stroke::new(0.5, palette.placeholder_text.gamma_multiply(0.4)),
            );
        }
    }

    fn add_target(day: &Day, cell: CellKey) -> AddItemTarget {
        let slot_label = day
            .slot(&cell.slot_id)
            .map(|slot| crate::utils::time::format_hour(slot.hour))
            .unwrap_or_default();
        let room_name = day
            .room(&cell.room_id)
            .map(|room| room.name.clone())
            .unwrap_or_default();
        AddItemTarget {
            cell,
            slot_label,
            room_name,
        }
    }
}
