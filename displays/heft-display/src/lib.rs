//! Display rendering for the Heft kitchen scale
//!
//! This crate provides:
//! - `Canvas` trait for pixel displays (filled regions, text, rounded rects)
//! - Screen layout for the 320x240 panel
//! - `Renderer`, which turns controller state into the minimum set of
//!   draw calls: full rebuilds only on mode entry, per-region redraws on
//!   the HUD, and two-row updates when a menu selection moves
//!
//! # Architecture
//!
//! The renderer never owns hardware. Boards implement `Canvas` directly or
//! wrap an `embedded-graphics` draw target with `EgCanvas` (behind the
//! `embedded-graphics` feature).

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
#[cfg(feature = "embedded-graphics")]
pub mod eg;
pub mod hud;
pub mod layout;
pub mod menu;
pub mod renderer;

// Re-export key types
pub use canvas::{Canvas, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
#[cfg(feature = "embedded-graphics")]
pub use eg::EgCanvas;
pub use heft_core::config::Color;
pub use hud::HudCache;
pub use renderer::Renderer;
