//! Embassy async tasks

pub mod ui;

pub use ui::{ui_task, UiPins};
