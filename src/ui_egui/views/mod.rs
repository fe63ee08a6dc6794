pub mod day_schedule_view;
pub mod item_card;
pub mod palette;
pub mod placeholder_cell;

use crate::ui_egui::dialogs::add_item_dialog::AddItemTarget;

/// What the user asked for while the board was drawn.
#[derive(Debug, Default)]
pub struct BoardInteraction {
    /// A placeholder was clicked
    pub open_add_dialog: Option<AddItemTarget>,
    /// Edit button of a placed item
    pub edit_item: Option<String>,
}
