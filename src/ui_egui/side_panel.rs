//! Unassigned items tray.
//!
//! Lists items without a slot, lets them be dragged onto the grid, and takes
//! placed items back (drop = unassign).

use egui::{Margin, RichText, Sense, Stroke};

use crate::services::board::tray::filter_unassigned;
use crate::services::board::LoadState;
use crate::services::dnd::{DragKind, DragPayload, DragSession, DropTarget};
use crate::ui_egui::drag::DragManager;
use crate::ui_egui::views::palette::{card_fill, with_alpha, SchedulePalette};
use crate::models::schedule_item::ScheduleItem;

const PANEL_MIN_WIDTH: f32 = 220.0;
const PANEL_DEFAULT_WIDTH: f32 = 280.0;
const PANEL_MAX_WIDTH: f32 = 420.0;

#[derive(Debug, Default)]
pub struct SidePanelState {
    pub query: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum SidePanelAction {
    #[default]
    None,
    Retry,
}

pub fn render_side_panel(
    ctx: &egui::Context,
    state: &mut SidePanelState,
    unassigned: &LoadState<Vec<ScheduleItem>>,
    session: &mut DragSession,
) -> SidePanelAction {
    let mut action = SidePanelAction::None;

    egui::SidePanel::right("unassigned_items")
        .default_width(PANEL_DEFAULT_WIDTH)
        .min_width(PANEL_MIN_WIDTH)
        .max_width(PANEL_MAX_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            let palette = SchedulePalette::from_visuals(ui.visuals());
            let panel_rect = ui.max_rect();
            let zone = DragManager::target(ui, session, panel_rect, &[DragKind::Item], DropTarget::Tray);

            if zone.is_over {
                ui.painter()
                    .rect_filled(panel_rect, 0.0, with_alpha(palette.hover_bg, 60));
                ui.painter()
                    .rect_stroke(panel_rect.shrink(1.0), 2.0, Stroke::new(1.5, palette.hover_border));
            }

            ui.heading("Unassigned");
            ui.add(
                egui::TextEdit::singleline(&mut state.query)
                    .desired_width(f32::INFINITY)
                    .hint_text("Filter..."),
            );
            ui.add_space(6.0);

            let items = match unassigned {
                LoadState::Loaded(items) => items,
                LoadState::Failed(message) => {
                    ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                    if ui.button("Retry").clicked() {
                        action = SidePanelAction::Retry;
                    }
                    return;
                }
                LoadState::NotLoaded | LoadState::Loading => {
                    ui.spinner();
                    return;
                }
            };

            let matches = filter_unassigned(items, &state.query);
            ui.label(RichText::new(format!("{} item(s)", matches.len())).small().weak());
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for item in matches {
                        render_tray_item(ui, item, session, &palette);
                        ui.add_space(4.0);
                    }
                });

            if session.is_active() && zone.can_drop {
                ui.label(RichText::new("Drop here to unassign").italics().weak());
            }
        });

    action
}

fn render_tray_item(ui: &mut egui::Ui, item: &ScheduleItem, session: &mut DragSession, palette: &SchedulePalette) {
    let frame = egui::Frame::none()
        .fill(card_fill(item))
        .rounding(egui::Rounding::same(4.0))
        .stroke(Stroke::new(1.0, palette.card_border))
        .inner_margin(Margin::same(6.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{} · {}", item.item_type.badge(), item.display_title()))
                    .color(palette.card_text)
                    .strong(),
            );
            let speakers = item.speaker_names();
            if !speakers.is_empty() {
                ui.label(RichText::new(speakers).size(11.0).color(palette.card_text));
            }
        });

    let response = ui.interact(frame.response.rect, ui.id().with(("tray", &item.id)), Sense::drag());
    if DragManager::source(ui, session, &response, DragPayload::from_tray(item)) {
        ui.painter()
            .rect_filled(frame.response.rect, 4.0, with_alpha(ui.visuals().panel_fill, 128));
    }
}
