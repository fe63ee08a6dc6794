// Service module exports

pub mod api;
pub mod assignment;
pub mod board;
pub mod dnd;
pub mod editor;
pub mod invalidation;
pub mod layout;
pub mod settings;
