//! Configuration types and parsing
//!
//! `UiConfig::default()` carries the stock timings, thresholds and menus.
//! Boards override them with a small TOML file parsed by [`toml`].

pub mod toml;
mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
