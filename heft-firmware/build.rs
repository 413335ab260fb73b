//! Build script for heft-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const SECTIONS: [&str; 5] = ["input", "ui", "signal", "clock", "menu"];
const MENUS: [&str; 3] = ["main", "container", "aux"];
const PANEL_WIDTH: i64 = 320;
const PANEL_HEIGHT: i64 = 240;
const MAX_MENU_ITEMS: i64 = 8;
const MENU_ROW_PITCH: i64 = 24;
const BACK_LABEL: &str = "Back";
const DEFAULT_ORIGIN: (i64, i64) = (16, 48);

const DURATIONS: [(&str, &str); 5] = [
    ("input", "debounce_ms"),
    ("input", "long_press_ms"),
    ("ui", "idle_reset_ms"),
    ("ui", "tare_overlay_ms"),
    ("ui", "render_throttle_ms"),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");
    if !config_path.exists() {
        fail("device.toml not found", &[
            "The firmware embeds device.toml from the heft-firmware directory.".into(),
        ]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read device.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in device.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_durations(&config, &mut errors);
    validate_ladder(&config, &mut errors);
    validate_menus(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid device.toml", &errors);
    }

    println!("cargo:warning=device.toml validated successfully");
}

fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let line = if line.len() > 61 {
                format!("{}...", &line[..58])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        errors.push("top level must be a table".into());
        return;
    };
    for (name, value) in table {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
    if let Some(menus) = config.get("menu").and_then(|m| m.as_table()) {
        for name in menus.keys() {
            if !MENUS.contains(&name.as_str()) {
                errors.push(format!("unknown section [menu.{}]", name));
            }
        }
    }
}

fn validate_durations(config: &toml::Value, errors: &mut Vec<String>) {
    for (section, key) in DURATIONS {
        if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
            match value.as_integer() {
                Some(ms) if ms > 0 && ms <= u32::MAX as i64 => {}
                _ => errors.push(format!("[{}] {} must be a positive integer", section, key)),
            }
        }
    }

    if let Some(value) = config.get("input").and_then(|s| s.get("menu_threshold")) {
        match value.as_integer() {
            Some(n) if n > 0 => {}
            _ => errors.push("[input] menu_threshold must be positive".into()),
        }
    }

    if let Some(value) = config.get("ui").and_then(|s| s.get("weight_epsilon")) {
        match value.as_float().or_else(|| value.as_integer().map(|i| i as f64)) {
            Some(eps) if eps >= 0.0 => {}
            _ => errors.push("[ui] weight_epsilon must be a non-negative number".into()),
        }
    }
}

fn validate_ladder(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(value) = config.get("signal").and_then(|s| s.get("ladder")) else {
        return;
    };
    let ladder: Option<Vec<i64>> = value
        .as_array()
        .and_then(|a| a.iter().map(|v| v.as_integer()).collect());
    match ladder {
        Some(ladder) if ladder.len() == 4 => {
            if ladder.windows(2).any(|w| w[0] > w[1]) {
                errors.push("[signal] ladder must be non-decreasing".into());
            }
        }
        _ => errors.push("[signal] ladder must be an array of 4 integers".into()),
    }
}

fn validate_menus(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(menus) = config.get("menu").and_then(|m| m.as_table()) else {
        return;
    };

    for (name, menu) in menus {
        if let Some(labels) = menu.get("labels") {
            match labels.as_array() {
                Some(labels) if (1..=8).contains(&labels.len()) => {
                    if labels.last().and_then(|l| l.as_str()) != Some(BACK_LABEL) {
                        errors.push(format!(
                            "[menu.{}] last label must be \"{}\"",
                            name, BACK_LABEL
                        ));
                    }
                    for label in labels {
                        match label.as_str() {
                            Some(s) if s.len() <= 16 && !s.contains(',') => {}
                            _ => errors.push(format!(
                                "[menu.{}] labels must be strings of at most 16 bytes",
                                name
                            )),
                        }
                    }
                }
                _ => errors.push(format!("[menu.{}] labels must hold 1 to 8 items", name)),
            }
        }

        let coord = |key: &str, default: i64| match menu.get(key) {
            None => Some(default),
            Some(v) => v.as_integer().filter(|n| (0..=u16::MAX as i64).contains(n)),
        };
        match (coord("x", DEFAULT_ORIGIN.0), coord("y", DEFAULT_ORIGIN.1)) {
            (Some(x), Some(y)) => {
                if 2 * x >= PANEL_WIDTH || y + MAX_MENU_ITEMS * MENU_ROW_PITCH > PANEL_HEIGHT {
                    errors.push(format!(
                        "[menu.{}] x/y place rows off the {}x{} panel",
                        name, PANEL_WIDTH, PANEL_HEIGHT
                    ));
                }
            }
            _ => errors.push(format!("[menu.{}] x and y must be integers 0-65535", name)),
        }

        if let Some(accent) = menu.get("accent") {
            let valid = accent.as_str().is_some_and(|s| {
                s.len() == 7
                    && s.starts_with('#')
                    && s[1..].chars().all(|c| c.is_ascii_hexdigit())
            });
            if !valid {
                errors.push(format!("[menu.{}] accent must look like \"#RRGGBB\"", name));
            }
        }
    }
}
