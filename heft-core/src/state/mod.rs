//! UI mode state machine
//!
//! The screen is always in exactly one mode. Each mode carries its own
//! data (HUD baseline or menu model) and transitions are a pure function
//! of the current mode, an event and the current time.

mod events;
mod machine;
mod menu;

pub use events::{Effect, Event};
pub use machine::{HudState, Mode, Transition};
pub use menu::{clamp_selection, MenuKind, MenuModel};
