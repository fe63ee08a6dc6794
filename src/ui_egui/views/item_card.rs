//! Placed schedule item: badges, title, speakers, drag source and edit button.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use super::palette::{card_fill, with_alpha, SchedulePalette};
use crate::models::schedule_item::ScheduleItem;
use crate::services::dnd::{DragPayload, DragSession};
use crate::services::layout::ItemPlacement;
use crate::ui_egui::drag::DragManager;

const PADDING: f32 = 6.0;
const EDIT_BUTTON_SIZE: f32 = 18.0;
const DRAGGING_ALPHA: u8 = 128;

/// Returns true when the edit button was clicked.
pub(crate) fn render_item_card(
    ui: &mut Ui,
    rect: Rect,
    placement: &ItemPlacement,
    session: &mut DragSession,
    unassigning: bool,
    palette: &SchedulePalette,
) -> bool {
    let item = &placement.item;
    let id = ui.id().with(("item", &item.id));
    let response = ui.interact(rect, id, Sense::click_and_drag());

    let dragging = DragManager::source(
        ui,
        session,
        &response,
        DragPayload::from_grid(item, &placement.slot_id),
    );

    let mut fill = card_fill(item);
    let mut text = palette.card_text;
    if dragging || unassigning {
        fill = with_alpha(fill, DRAGGING_ALPHA);
        text = with_alpha(text, DRAGGING_ALPHA);
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, fill);
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, palette.card_border));

    paint_card_text(&painter, rect, item, text);

    let edit_rect = Rect::from_min_size(
        Pos2::new(rect.right() - EDIT_BUTTON_SIZE - 4.0, rect.top() + 4.0),
        Vec2::splat(EDIT_BUTTON_SIZE),
    );
    let edit = ui.interact(edit_rect, id.with("edit"), Sense::click());
    if edit.hovered() {
        painter.rect_filled(edit_rect, 3.0, with_alpha(Color32::BLACK, 30));
    }
    painter.text(
        edit_rect.center(),
        Align2::CENTER_CENTER,
        "✏",
        FontId::proportional(12.0),
        text,
    );

    response.on_hover_text(item.display_title());

    edit.clicked() && !session.is_active()
}

fn paint_card_text(painter: &egui::Painter, rect: Rect, item: &ScheduleItem, color: Color32) {
    let mut cursor = rect.left_top() + Vec2::splat(PADDING);

    let mut badges = vec![item.item_type.badge().to_string(), item.status.label().to_string()];
    if let Some(level) = &item.audience_level {
        badges.push(level.name.clone());
    }
    if let Some(language) = &item.language {
        badges.push(language.code.to_uppercase());
    }
    let badge_rect = painter.text(
        cursor,
        Align2::LEFT_TOP,
        badges.join(" · "),
        FontId::proportional(10.0),
        with_alpha(color, 170),
    );
    cursor.y = badge_rect.bottom() + 3.0;

    let wrap_width = (rect.width() - 2.0 * PADDING - EDIT_BUTTON_SIZE).max(20.0);
    let title = painter.layout(
        item.display_title().to_string(),
        FontId::proportional(13.0),
        color,
        wrap_width,
    );
    let title_height = title.size().y;
    painter.galley(cursor, title, color);
    cursor.y += title_height + 3.0;

    let speakers = item.speaker_names();
    if !speakers.is_empty() && cursor.y < rect.bottom() - PADDING {
        let speakers = painter.layout(speakers, FontId::proportional(11.0), with_alpha(color, 200), wrap_width);
        painter.galley(cursor, speakers, color);
    }
}
