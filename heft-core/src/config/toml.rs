//! Simple TOML parser for the device configuration
//!
//! This is a minimal, allocation-free parser that handles only the subset
//! needed for Heft configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float)
//! - Single-line arrays of strings or integers
//! - [section] and [section.subsection] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Commas or escaped quotes inside array strings
//! - Inline tables
//!
//! Unknown keys are ignored; unknown sections are errors.

use heapless::{String, Vec};

use super::types::{
    Color, ConfigError, UiConfig, MAX_DATE_LEN, MAX_LABEL_LEN, MAX_MENU_ITEMS,
    SIGNAL_LEVELS,
};
use crate::state::MenuKind;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Parsed fine but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Invalid(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Input,
    Ui,
    Signal,
    Clock,
    Menu(MenuKind),
}

/// Parse TOML configuration on top of the defaults
///
/// Keys that are not present keep their default values. The result is
/// validated before it is returned.
pub fn parse_config(input: &str) -> Result<UiConfig, ParseError> {
    let mut config = UiConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        match parse_key_value(line) {
            Some((key, value)) => apply_value(section, key, value, &mut config)?,
            None => return Err(ParseError::InvalidValue),
        }
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "input" or "menu.main"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "input" => Ok(Section::Input),
        "ui" => Ok(Section::Ui),
        "signal" => Ok(Section::Signal),
        "clock" => Ok(Section::Clock),
        "menu.main" => Ok(Section::Menu(MenuKind::Main)),
        "menu.container" => Ok(Section::Menu(MenuKind::Container)),
        "menu.aux" => Ok(Section::Menu(MenuKind::Aux)),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split a line into key and value, dropping inline comments
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match comment_start(value) {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Byte offset of the first `#` outside a quoted string
fn comment_start(value: &str) -> Option<usize> {
    let mut in_string = false;
    for (pos, ch) in value.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return Some(pos),
            _ => {}
        }
    }
    None
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else if value.starts_with('"') || value.ends_with('"') {
        Err(ParseError::InvalidValue)
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse a string that must fit in `N` bytes
fn parse_bounded<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    String::try_from(parse_string(value)?).map_err(|_| ParseError::InvalidValue)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a float value (integers are accepted too)
fn parse_float(value: &str) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a color like "#27E3A5"
fn parse_color(value: &str) -> Result<Color, ParseError> {
    let hex = parse_string(value)?
        .strip_prefix('#')
        .ok_or(ParseError::InvalidValue)?;
    if hex.len() != 6 {
        return Err(ParseError::InvalidValue);
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidValue)?;
    Ok(Color::from_rgb888((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

/// Iterate over the elements of a single-line array like `[1, 2, 3]`
fn array_items(value: &str) -> Result<impl Iterator<Item = &str>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;
    Ok(inner.split(',').map(str::trim).filter(|s| !s.is_empty()))
}

/// Parse an array of labels
fn parse_labels(
    value: &str,
) -> Result<Vec<String<MAX_LABEL_LEN>, MAX_MENU_ITEMS>, ParseError> {
    let mut labels = Vec::new();
    for item in array_items(value)? {
        let label = parse_bounded(item)?;
        labels.push(label).map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(labels)
}

/// Parse the signal ladder, which must have exactly `SIGNAL_LEVELS` entries
fn parse_ladder(value: &str) -> Result<[i16; SIGNAL_LEVELS], ParseError> {
    let mut ladder = [0i16; SIGNAL_LEVELS];
    let mut count = 0;
    for item in array_items(value)? {
        let slot = ladder.get_mut(count).ok_or(ParseError::TooManyItems)?;
        *slot = parse_int(item)?;
        count += 1;
    }
    if count != SIGNAL_LEVELS {
        return Err(ParseError::InvalidValue);
    }
    Ok(ladder)
}

/// Apply a key-value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut UiConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Input => match key {
            "debounce_ms" => config.input.debounce_ms = parse_int(value)?,
            "long_press_ms" => config.input.long_press_ms = parse_int(value)?,
            "menu_threshold" => config.input.menu_threshold = parse_int(value)?,
            _ => {}
        },
        Section::Ui => match key {
            "idle_reset_ms" => config.ui.idle_reset_ms = parse_int(value)?,
            "tare_overlay_ms" => config.ui.tare_overlay_ms = parse_int(value)?,
            "render_throttle_ms" => config.ui.render_throttle_ms = parse_int(value)?,
            "weight_epsilon" => config.ui.weight_epsilon = parse_float(value)?,
            _ => {}
        },
        Section::Signal => {
            if key == "ladder" {
                config.signal.ladder = parse_ladder(value)?;
            }
        }
        Section::Clock => {
            if key == "date" {
                config.clock.date = parse_bounded::<MAX_DATE_LEN>(value)?;
            }
        }
        Section::Menu(kind) => {
            let menu = config.menu_mut(kind);
            match key {
                "title" => menu.title = parse_bounded(value)?,
                "labels" => menu.labels = parse_labels(value)?,
                "accent" => menu.accent = parse_color(value)?,
                "x" => menu.origin_x = parse_int(value)?,
                "y" => menu.origin_y = parse_int(value)?,
                _ => {}
            }
        }
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

/// Parse configuration, falling back to defaults on any error
///
/// Returns the error alongside so the caller can report it.
pub fn parse_or_default(input: &str) -> (UiConfig, Option<ParseError>) {
    match parse_config(input) {
        Ok(config) => (config, None),
        Err(err) => (UiConfig::default(), Some(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("input").unwrap(), Section::Input);
        assert_eq!(
            parse_section_header(" menu.aux ").unwrap(),
            Section::Menu(MenuKind::Aux)
        );
        assert_eq!(
            parse_section_header("menu.settings"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_parse_key_value_strips_comment() {
        assert_eq!(
            parse_key_value("debounce_ms = 40 # ms"),
            Some(("debounce_ms", "40"))
        );
        assert_eq!(
            parse_key_value(r##"accent = "#27E3A5""##),
            Some(("accent", r##""#27E3A5""##))
        );
        assert_eq!(parse_key_value("novalue ="), None);
    }

    #[test]
    fn test_comment_after_quoted_hash() {
        assert_eq!(
            parse_key_value(r##"accent = "#27E3A5" # teal"##),
            Some(("accent", r##""#27E3A5""##))
        );
        assert_eq!(
            parse_key_value(r##"labels = ["#1", "Back"] # two"##),
            Some(("labels", r##"["#1", "Back"]"##))
        );

        let config = parse_config("[menu.main]\naccent = \"#27E3A5\" # teal\n").unwrap();
        assert_eq!(config.main_menu.accent, Color::TEAL);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("\"#FFFFFF\"").unwrap(), Color::WHITE);
        assert_eq!(parse_color("\"#FF0000\"").unwrap().raw(), 0xF800);
        assert_eq!(parse_color("\"FF0000\""), Err(ParseError::InvalidValue));
        assert_eq!(parse_color("\"#FFF\""), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_labels() {
        let labels = parse_labels(r#"["Bowl", "Jar" , "Back",]"#).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1].as_str(), "Jar");

        let too_many = r#"["1","2","3","4","5","6","7","8","9"]"#;
        assert_eq!(parse_labels(too_many), Err(ParseError::TooManyItems));

        let too_long = r#"["A label that is far too long"]"#;
        assert_eq!(parse_labels(too_long), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_ladder() {
        assert_eq!(
            parse_ladder("[-95, -85, -75, -65]").unwrap(),
            [-95, -85, -75, -65]
        );
        assert_eq!(parse_ladder("[-95, -85]"), Err(ParseError::InvalidValue));
        assert_eq!(
            parse_ladder("[1, 2, 3, 4, 5]"),
            Err(ParseError::TooManyItems)
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r##"
# Heft device configuration
[input]
debounce_ms = 25
long_press_ms = 1200

[ui]
weight_epsilon = 0.1

[signal]
ladder = [-95, -85, -75, -65]

[clock]
date = "2026-03-14"

[menu.container]
title = "Vessel"
labels = ["Mug", "Back"]
accent = "#FF0000"
y = 40
"##;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.input.debounce_ms, 25);
        assert_eq!(config.input.long_press_ms, 1200);
        assert_eq!(config.input.menu_threshold, 5);
        assert_eq!(config.ui.weight_epsilon, 0.1);
        assert_eq!(config.ui.idle_reset_ms, 2000);
        assert_eq!(config.signal.ladder, [-95, -85, -75, -65]);
        assert_eq!(config.clock.date.as_str(), "2026-03-14");

        let menu = &config.container_menu;
        assert_eq!(menu.title.as_str(), "Vessel");
        assert_eq!(menu.item_count(), 2);
        assert_eq!(menu.label(1), "Back");
        assert_eq!(menu.accent.raw(), 0xF800);
        assert_eq!(menu.origin_y, 40);

        // Untouched menus keep their defaults
        assert_eq!(config.main_menu, UiConfig::default().main_menu);
    }

    #[test]
    fn test_validation_failure_reported() {
        let config_str = "[menu.main]\nlabels = []\n";
        assert_eq!(
            parse_config(config_str),
            Err(ParseError::Invalid(ConfigError::EmptyMenu))
        );

        let config_str = "[menu.main]\nlabels = [\"Scale\", \"Tare\"]\n";
        assert_eq!(
            parse_config(config_str),
            Err(ParseError::Invalid(ConfigError::MissingBack))
        );

        for config_str in ["[menu.main]\nx = 40000\n", "[menu.aux]\ny = 60000\n"] {
            assert_eq!(
                parse_config(config_str),
                Err(ParseError::Invalid(ConfigError::InvalidOrigin))
            );
        }
    }

    #[test]
    fn test_parse_or_default_falls_back() {
        let (config, err) = parse_or_default("[nonsense]\n");
        assert_eq!(err, Some(ParseError::InvalidSection));
        assert_eq!(config, UiConfig::default());

        let (_, err) = parse_or_default("");
        assert_eq!(err, None);
    }
}
