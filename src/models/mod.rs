// Schedule data model as reported by the conference backend

pub mod day;
pub mod room;
pub mod schedule_item;
pub mod settings;
pub mod slot;
