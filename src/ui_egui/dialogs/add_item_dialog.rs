//! Add an unassigned item to a cell without dragging.

use egui::{Margin, RichText, Stroke};

use crate::models::schedule_item::ScheduleItem;
use crate::services::board::tray::{add_item_prompt, filter_unassigned};
use crate::services::board::{CellKey, LoadState};
use crate::ui_egui::views::palette::card_fill;

/// Cell the dialog was opened for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemTarget {
    pub cell: CellKey,
    pub slot_label: String,
    pub room_name: String,
}

pub struct AddItemDialogState {
    pub target: AddItemTarget,
    pub query: String,
}

impl AddItemDialogState {
    pub fn new(target: AddItemTarget) -> Self {
        Self {
            target,
            query: String::new(),
        }
    }
}

pub enum AddItemDialogAction {
    None,
    Assign { item: ScheduleItem, cell: CellKey },
    Close,
}

pub fn render_add_item_dialog(
    ctx: &egui::Context,
    state: &mut AddItemDialogState,
    unassigned: &LoadState<Vec<ScheduleItem>>,
) -> AddItemDialogAction {
    let mut action = AddItemDialogAction::None;
    let mut open = true;

    egui::Window::new("Add item")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(420.0)
        .default_height(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(add_item_prompt(&state.target.slot_label, &state.target.room_name)).strong());
            ui.add_space(6.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut state.query)
                    .desired_width(f32::INFINITY)
                    .hint_text("Search by title or speaker..."),
            );
            if state.query.is_empty() && !response.has_focus() {
                response.request_focus();
            }
            ui.add_space(6.0);

            let items = match unassigned {
                LoadState::Loaded(items) => items,
                LoadState::Failed(message) => {
                    ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                    return;
                }
                LoadState::NotLoaded | LoadState::Loading => {
                    ui.spinner();
                    return;
                }
            };

            let matches = filter_unassigned(items, &state.query);
            if matches.is_empty() {
                ui.label(RichText::new("No unassigned items match").italics());
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(320.0)
                .show(ui, |ui| {
                    for item in matches {
                        let response = egui::Frame::none()
                            .fill(card_fill(item))
                            .rounding(egui::Rounding::same(4.0))
                            .stroke(Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
                            .inner_margin(Margin::same(6.0))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.label(
                                    RichText::new(item.display_title())
                                        .strong()
                                        .color(egui::Color32::from_gray(20)),
                                );
                                let speakers = item.speaker_names();
                                if !speakers.is_empty() {
                                    ui.label(RichText::new(speakers).size(11.0).color(egui::Color32::from_gray(60)));
                                }
                            })
                            .response
                            .interact(egui::Sense::click());

                        if response.clicked() {
                            action = AddItemDialogAction::Assign {
                                item: item.clone(),
                                cell: state.target.cell.clone(),
                            };
                        }
                        ui.add_space(4.0);
                    }
                });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) || !open {
        action = AddItemDialogAction::Close;
    }

    action
}
