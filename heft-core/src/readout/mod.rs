//! Formatting helpers for values shown on the HUD and the status API

mod clock;
mod signal;

pub use clock::{uptime_clock, ClockString};
pub use signal::signal_bucket;

use core::fmt::Write;
use heapless::String;

/// Formatted weight, one decimal place
pub type WeightString = String<16>;

/// Format a weight for the HUD
pub fn format_weight(weight: f32) -> WeightString {
    let mut s = WeightString::new();
    let _ = write!(s, "{:.1}", weight);
    s
}
