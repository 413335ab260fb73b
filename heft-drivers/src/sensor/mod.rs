//! Weight sensor drivers

pub mod hx711;

pub use hx711::{Gain, Hx711};
