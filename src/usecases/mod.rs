pub mod project;
pub mod toggle_tracker;
