//! egui binding for the drag-and-drop session.
//!
//! Widgets register with [`DragManager::source`] / [`DragManager::target`]
//! while they are drawn; [`DragManager::finish_frame`] runs after the whole
//! board is drawn and turns a pointer release into a drop outcome.

use egui::{Align2, Color32, Context, CursorIcon, FontId, Id, LayerId, Order, Rect, Response, Stroke, Ui, Vec2};

use crate::services::dnd::{
    DragDropBackend, DragKind, DragPayload, DragSession, DropOutcome, DropTarget,
};

const GHOST_WIDTH: f32 = 220.0;
const GHOST_HEIGHT: f32 = 34.0;

#[derive(Clone, Copy, Debug, Default)]
struct GhostState {
    pointer_offset: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropZoneState {
    pub can_drop: bool,
    pub is_over: bool,
}

pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("schedule_item_drag_ghost")
    }

    pub fn begin_frame(session: &mut DragSession) {
        session.begin_frame();
        session.hover(None);
    }

    /// Register `response` as the drag source for `payload`.
    /// Returns true while this source's item is the one being dragged.
    pub fn source(ui: &Ui, session: &mut DragSession, response: &Response, payload: DragPayload) -> bool {
        let handle = session.make_draggable(payload);

        if response.drag_started() && session.begin(handle) {
            let offset = response
                .interact_pointer_pos()
                .map(|pos| response.rect.min - pos)
                .unwrap_or_default();
            ui.ctx().memory_mut(|mem| {
                mem.data.insert_temp(
                    Self::storage_id(),
                    GhostState {
                        pointer_offset: offset,
                    },
                );
            });
        }

        if response.dragged() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() && !session.is_active() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        session.is_dragging(handle)
    }

    /// Register `rect` as a drop target for `accepts`. Only the part of
    /// `rect` inside the ui's clip rect can be hovered, so cells scrolled out
    /// of view never take a drop meant for a panel drawn over them.
    pub fn target(
        ui: &Ui,
        session: &mut DragSession,
        rect: Rect,
        accepts: &[DragKind],
        target: DropTarget,
    ) -> DropZoneState {
        let handle = session.make_drop_target(accepts, target);

        if session.is_active() {
            let visible = ui.clip_rect().intersect(rect);
            let pointer = ui.ctx().pointer_latest_pos();
            if pointer.is_some_and(|pos| visible.is_positive() && visible.contains(pos)) {
                session.hover(Some(handle));
            }
        }

        DropZoneState {
            can_drop: session.can_drop(handle),
            is_over: session.is_over(handle),
        }
    }

    /// Resolve a release (or Escape) and paint the drag ghost otherwise.
    pub fn finish_frame(ctx: &Context, session: &mut DragSession) -> Option<DropOutcome> {
        if !session.is_active() {
            return None;
        }

        let (released, escape) = ctx.input(|i| {
            (
                i.pointer.any_released() || !i.pointer.any_down(),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if escape {
            log::debug!("Drag cancelled");
            session.cancel();
            Self::clear_ghost(ctx);
            return None;
        }

        if released {
            Self::clear_ghost(ctx);
            return Some(session.release());
        }

        Self::paint_ghost(ctx, session);
        ctx.request_repaint();
        None
    }

    fn clear_ghost(ctx: &Context) {
        ctx.memory_mut(|mem| mem.data.remove::<GhostState>(Self::storage_id()));
    }

    fn paint_ghost(ctx: &Context, session: &DragSession) {
        let (Some(payload), Some(pointer)) = (session.payload(), ctx.pointer_latest_pos()) else {
            return;
        };
        let ghost = ctx
            .memory(|mem| mem.data.get_temp::<GhostState>(Self::storage_id()))
            .unwrap_or_default();

        let rect = Rect::from_min_size(pointer + ghost.pointer_offset, Vec2::new(GHOST_WIDTH, GHOST_HEIGHT));
        let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Self::storage_id()));
        painter.rect_filled(rect, 4.0, Color32::from_rgba_unmultiplied(226, 232, 240, 200));
        painter.rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::from_gray(120)));
        painter.text(
            rect.left_center() + Vec2::new(8.0, 0.0),
            Align2::LEFT_CENTER,
            payload.item.display_title(),
            FontId::proportional(13.0),
            Color32::from_gray(20),
        );
    }
}
