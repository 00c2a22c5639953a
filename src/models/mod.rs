pub mod container;
pub mod project;
pub mod response;
