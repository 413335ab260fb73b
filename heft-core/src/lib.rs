//! Board-agnostic core logic for the Heft kitchen scale
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Quadrature decoding and button press classification
//! - UI mode state machine (HUD and menus)
//! - Controller context driven by an external `tick`
//! - Readout helpers (uptime clock, signal strength buckets)
//! - Configuration types and the embedded TOML subset parser
//! - Hardware abstraction traits (weight sensor)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod readout;
pub mod state;
pub mod traits;

pub use controller::{Controller, TickReport};
