pub mod catalog;
pub mod engine;
pub mod template;
pub mod view;
pub mod walk;
