//! Device configuration
//!
//! The configuration is compiled in from `device.toml` (validated by the
//! build script) and parsed once at boot.

use defmt::*;

use heft_core::config::{parse_or_default, UiConfig};

/// Embedded configuration; edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> UiConfig {
    let (config, err) = parse_or_default(EMBEDDED_CONFIG);
    match err {
        None => info!(
            "Config: debounce={}ms long={}ms threshold={} throttle={}ms",
            config.input.debounce_ms,
            config.input.long_press_ms,
            config.input.menu_threshold,
            config.ui.render_throttle_ms
        ),
        Some(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
        }
    }
    config
}
