pub mod commands;
pub mod render;
pub mod ui;

pub use render::{StudyRenderer, render_plain};
