//! Configuration type definitions

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::MenuKind;

/// Maximum label length (menu items and titles)
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum items per menu, including the trailing "Back" item
pub const MAX_MENU_ITEMS: usize = 8;

/// Maximum length of the configured date string
pub const MAX_DATE_LEN: usize = 16;

/// Number of thresholds in the signal strength ladder
pub const SIGNAL_LEVELS: usize = 4;

/// Panel size in pixels (landscape); menu origins must keep rows on it
pub const PANEL_WIDTH: u16 = 320;
pub const PANEL_HEIGHT: u16 = 240;

/// Vertical distance between menu rows
pub const MENU_ROW_PITCH: u16 = 24;

/// Label of the item that returns to the HUD; always the last one
pub const BACK_LABEL: &str = "Back";

/// RGB565 color as sent to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const GREY: Self = Self::from_rgb888(0x80, 0x80, 0x80);
    pub const DARK_GREY: Self = Self::from_rgb888(0x30, 0x30, 0x30);
    pub const TEAL: Self = Self::from_rgb888(0x27, 0xE3, 0xA5);
    pub const SKY: Self = Self::from_rgb888(0x00, 0xB3, 0xFF);
    pub const AMBER: Self = Self::from_rgb888(0xFF, 0xB0, 0x00);
    pub const RED: Self = Self::from_rgb888(0xFF, 0x30, 0x30);

    /// Pack 8-bit channels into RGB565
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Input timing and encoder thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Minimum time between accepted button level changes
    pub debounce_ms: u32,
    /// Hold time that turns a press into a long press
    pub long_press_ms: u32,
    /// Detents away from the HUD baseline that open a side menu
    pub menu_threshold: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 30,
            long_press_ms: 1500,
            menu_threshold: 5,
        }
    }
}

/// HUD timers and redraw tolerances
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiTiming {
    /// Encoder idle time after which the HUD baseline follows the position
    pub idle_reset_ms: u32,
    /// How long the tare overlay stays up
    pub tare_overlay_ms: u32,
    /// Minimum time between HUD render evaluations
    pub render_throttle_ms: u32,
    /// Smallest weight change that redraws the weight region
    pub weight_epsilon: f32,
}

impl Default for UiTiming {
    fn default() -> Self {
        Self {
            idle_reset_ms: 2000,
            tare_overlay_ms: 3000,
            render_throttle_ms: 200,
            weight_epsilon: 0.05,
        }
    }
}

/// Signal strength icon thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalConfig {
    /// dBm thresholds, weakest first; each one passed lights one more bar
    pub ladder: [i16; SIGNAL_LEVELS],
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            ladder: [-90, -80, -70, -60],
        }
    }
}

/// Clock display settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Date shown next to the uptime clock until a real time source exists
    pub date: String<MAX_DATE_LEN>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            date: str_to_hstring("2025-01-01"),
        }
    }
}

/// One menu screen: title, items and styling
///
/// The last label is always the "Back" item that returns to the HUD.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MenuConfig {
    pub title: String<MAX_LABEL_LEN>,
    pub labels: Vec<String<MAX_LABEL_LEN>, MAX_MENU_ITEMS>,
    /// Highlight color for the selected row and row outlines
    pub accent: Color,
    /// Top-left corner of the first row
    pub origin_x: u16,
    pub origin_y: u16,
}

impl MenuConfig {
    /// Build a menu from string slices, truncating anything over capacity
    pub fn new(title: &str, labels: &[&str], accent: Color) -> Self {
        let mut items = Vec::new();
        for label in labels.iter().take(MAX_MENU_ITEMS) {
            let _ = items.push(str_to_hstring(label));
        }
        Self {
            title: str_to_hstring(title),
            labels: items,
            accent,
            origin_x: 16,
            origin_y: 48,
        }
    }

    pub fn item_count(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, index: usize) -> &str {
        self.labels.get(index).map(|l| l.as_str()).unwrap_or("")
    }

    /// Index of the "Back" item
    pub fn back_index(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.labels.last() {
            None => return Err(ConfigError::EmptyMenu),
            Some(last) if last.as_str() != BACK_LABEL => return Err(ConfigError::MissingBack),
            Some(_) => {}
        }

        // Room for the longest menu, whatever this one holds
        let right_margin = 2 * u32::from(self.origin_x);
        let bottom =
            u32::from(self.origin_y) + MAX_MENU_ITEMS as u32 * u32::from(MENU_ROW_PITCH);
        if right_margin >= u32::from(PANEL_WIDTH) || bottom > u32::from(PANEL_HEIGHT) {
            return Err(ConfigError::InvalidOrigin);
        }
        Ok(())
    }
}

/// Errors found when validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A menu has no items (it needs at least "Back")
    EmptyMenu,
    /// The last menu label is not "Back"
    MissingBack,
    /// Menu rows would not fit on the panel
    InvalidOrigin,
    /// A duration that must be positive is zero
    ZeroDuration,
    /// Menu threshold must be at least one detent
    InvalidThreshold,
    /// Weight epsilon must be finite and non-negative
    InvalidEpsilon,
    /// Signal thresholds must be non-decreasing
    UnorderedLadder,
}

/// Complete UI configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    pub input: InputConfig,
    pub ui: UiTiming,
    pub signal: SignalConfig,
    pub clock: ClockConfig,
    pub main_menu: MenuConfig,
    pub container_menu: MenuConfig,
    pub aux_menu: MenuConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            ui: UiTiming::default(),
            signal: SignalConfig::default(),
            clock: ClockConfig::default(),
            main_menu: MenuConfig::new(
                "Menu",
                &["Scale", "Network", "About", "Back"],
                Color::TEAL,
            ),
            container_menu: MenuConfig::new(
                "Container",
                &["Bowl", "Jar", "Plate", "Back"],
                Color::SKY,
            ),
            aux_menu: MenuConfig::new("Tools", &["Timer", "Units", "Back"], Color::AMBER),
        }
    }
}

impl UiConfig {
    /// Menu configuration for a menu kind
    pub fn menu(&self, kind: MenuKind) -> &MenuConfig {
        match kind {
            MenuKind::Main => &self.main_menu,
            MenuKind::Container => &self.container_menu,
            MenuKind::Aux => &self.aux_menu,
        }
    }

    pub fn menu_mut(&mut self, kind: MenuKind) -> &mut MenuConfig {
        match kind {
            MenuKind::Main => &mut self.main_menu,
            MenuKind::Container => &mut self.container_menu,
            MenuKind::Aux => &mut self.aux_menu,
        }
    }

    /// Check the configuration for values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in MenuKind::ALL {
            self.menu(kind).validate()?;
        }

        let durations = [
            self.input.long_press_ms,
            self.ui.idle_reset_ms,
            self.ui.tare_overlay_ms,
            self.ui.render_throttle_ms,
        ];
        if durations.contains(&0) {
            return Err(ConfigError::ZeroDuration);
        }

        if self.input.menu_threshold < 1 {
            return Err(ConfigError::InvalidThreshold);
        }

        let eps = self.ui.weight_epsilon;
        if !eps.is_finite() || eps < 0.0 {
            return Err(ConfigError::InvalidEpsilon);
        }

        if self.signal.ladder.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::UnorderedLadder);
        }

        Ok(())
    }
}

/// Copy a `&str` into a heapless string, truncating at a char boundary
pub fn str_to_hstring<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = UiConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.input.debounce_ms, 30);
        assert_eq!(config.input.long_press_ms, 1500);
        assert_eq!(config.ui.tare_overlay_ms, 3000);
        assert_eq!(config.clock.date.as_str(), "2025-01-01");
    }

    #[test]
    fn test_back_is_last() {
        let config = UiConfig::default();
        for kind in MenuKind::ALL {
            let menu = config.menu(kind);
            assert_eq!(menu.label(menu.back_index()), BACK_LABEL);
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = UiConfig::default();
        config.aux_menu.labels.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyMenu));

        let mut config = UiConfig::default();
        config.ui.tare_overlay_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));

        let mut config = UiConfig::default();
        config.signal.ladder = [-60, -70, -80, -90];
        assert_eq!(config.validate(), Err(ConfigError::UnorderedLadder));

        let mut config = UiConfig::default();
        config.input.menu_threshold = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidThreshold));
    }

    #[test]
    fn test_validate_requires_back_last() {
        let mut config = UiConfig::default();
        config.main_menu = MenuConfig::new("Menu", &["Scale", "Tare"], Color::TEAL);
        assert_eq!(config.validate(), Err(ConfigError::MissingBack));

        config.main_menu = MenuConfig::new("Menu", &["Back", "Scale"], Color::TEAL);
        assert_eq!(config.validate(), Err(ConfigError::MissingBack));

        config.main_menu = MenuConfig::new("Menu", &["Back"], Color::TEAL);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_menu_origin() {
        let mut config = UiConfig::default();
        config.container_menu.origin_x = 40000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidOrigin));

        let mut config = UiConfig::default();
        config.container_menu.origin_x = PANEL_WIDTH / 2;
        assert_eq!(config.validate(), Err(ConfigError::InvalidOrigin));

        let mut config = UiConfig::default();
        config.aux_menu.origin_y = u16::MAX;
        assert_eq!(config.validate(), Err(ConfigError::InvalidOrigin));

        // Eight rows from the default origin end exactly at the bottom edge
        let mut config = UiConfig::default();
        config.aux_menu.origin_y = PANEL_HEIGHT - MAX_MENU_ITEMS as u16 * MENU_ROW_PITCH;
        config.aux_menu.origin_x = PANEL_WIDTH / 2 - 1;
        assert_eq!(config.validate(), Ok(()));
        config.aux_menu.origin_y += 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidOrigin));
    }

    #[test]
    fn test_rgb565_packing() {
        assert_eq!(Color::from_rgb888(0xFF, 0xFF, 0xFF), Color::WHITE);
        assert_eq!(Color::from_rgb888(0xFF, 0, 0).raw(), 0xF800);
        assert_eq!(Color::from_rgb888(0, 0xFF, 0).raw(), 0x07E0);
        assert_eq!(Color::from_rgb888(0, 0, 0xFF).raw(), 0x001F);
    }

    #[test]
    fn test_hstring_truncates() {
        let s: String<4> = str_to_hstring("abcdef");
        assert_eq!(s.as_str(), "abcd");
    }
}
