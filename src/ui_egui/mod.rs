mod app;
pub mod dialogs;
pub mod drag;
pub mod side_panel;
pub mod toast;
pub mod views;

pub use app::ScheduleBuilderApp;
