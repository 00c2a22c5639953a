pub mod error;
pub mod project;
