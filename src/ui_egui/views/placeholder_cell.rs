//! Empty grid cell: drop target for items and entry point to the add-item dialog.

use egui::{Align2, FontId, Rect, Sense, Stroke, Ui};

use super::palette::SchedulePalette;
use crate::services::board::placeholder::{placeholder_visual, PlaceholderVisual};
use crate::services::dnd::{DragKind, DragSession, DropTarget};
use crate::services::layout::PlaceholderCell;
use crate::ui_egui::drag::DragManager;

pub(crate) fn render_placeholder(
    ui: &mut Ui,
    rect: Rect,
    cell: &PlaceholderCell,
    session: &mut DragSession,
    in_progress: bool,
    palette: &SchedulePalette,
) -> bool {
    let id = ui.id().with(("placeholder", &cell.slot_id, &cell.room_id));
    let response = ui.interact(rect, id, Sense::click());

    let zone = DragManager::target(
        ui,
        session,
        rect,
        &[DragKind::Item],
        DropTarget::Placeholder {
            slot_id: cell.slot_id.clone(),
            room_id: cell.room_id.clone(),
        },
    );
    let visual = placeholder_visual(session.is_active(), zone.can_drop, zone.is_over, in_progress);

    let painter = ui.painter_at(rect);
    let fill = match visual {
        PlaceholderVisual::Idle if response.hovered() => palette.can_drop_bg,
        PlaceholderVisual::Idle => palette.placeholder_bg,
        PlaceholderVisual::CanDrop => palette.can_drop_bg,
        PlaceholderVisual::Hovered => palette.hover_bg,
        PlaceholderVisual::InProgress => palette.in_progress_bg,
    };
    painter.rect_filled(rect, 3.0, fill);

    if visual == PlaceholderVisual::Hovered {
        painter.rect_stroke(rect.shrink(1.0), 3.0, Stroke::new(1.5, palette.hover_border));
    }

    let label = match visual {
        PlaceholderVisual::InProgress => "Saving…",
        _ => "Add item +",
    };
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(12.0),
        palette.placeholder_text,
    );

    // Clicks only count when no drag is running
    response.clicked() && !session.is_active() && !in_progress
}
