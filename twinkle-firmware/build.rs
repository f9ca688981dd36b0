//! Build script for twinkle-firmware
//!
//! - Puts memory.x on the linker search path
//! - Validates twinkle.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mirrors `twinkle_core::config::MAX_TEXT_LEN`
const MAX_TEXT_LEN: usize = 64;

/// GPIO pins on the RP2040
const GPIO_COUNT: i64 = 30;

fn main() {
    setup_linker();
    validate_config();
}

fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

fn validate_config() {
    println!("cargo:rerun-if-changed=twinkle.toml");

    let config_path = Path::new("twinkle.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: twinkle.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds twinkle.toml from the twinkle-firmware      ║\n\
            ║  directory. Create one with [bus], [timing], [display], [log].   ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read twinkle.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in twinkle.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    check_sections(&config, &mut errors);
    check_bus(&config, &mut errors);
    check_timing(&config, &mut errors);
    check_display(&config, &mut errors);
    check_log(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid twinkle.toml                                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=twinkle.toml validated successfully");
}

fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the three known sections may appear
fn check_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !["bus", "timing", "display", "log"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Pin strings are `gpioN` or `^gpioN`, each GPIO used once
fn check_bus(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(bus) = config.get("bus").and_then(|b| b.as_table()) else {
        return;
    };

    let mut used = Vec::new();
    for key in ["clock", "enable", "data_out", "data_in"] {
        let Some(value) = bus.get(key) else {
            continue;
        };
        let Some(s) = value.as_str() else {
            errors.push(format!("[bus] {} must be a string", key));
            continue;
        };
        match gpio_number(s) {
            Some(pin) if used.contains(&pin) => {
                errors.push(format!("[bus] {} reuses gpio{}", key, pin));
            }
            Some(pin) => used.push(pin),
            None => errors.push(format!("[bus] {} = \"{}\" is not a valid pin", key, s)),
        }
    }
}

fn gpio_number(s: &str) -> Option<i64> {
    let s = s.trim();
    let s = s.strip_prefix('^').unwrap_or(s);
    let pin: i64 = s.strip_prefix("gpio")?.parse().ok()?;
    (0..GPIO_COUNT).contains(&pin).then_some(pin)
}

fn check_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing").and_then(|t| t.as_table()) else {
        return;
    };

    if let Some(delay) = timing.get("bit_delay_us") {
        match delay.as_integer() {
            Some(us) if (0..=u32::MAX as i64).contains(&us) => {}
            _ => errors.push("[timing] bit_delay_us must be a non-negative integer".into()),
        }
    }

    if let Some(mode) = timing.get("address_mode") {
        if !matches!(mode.as_str(), Some("force" | "mask")) {
            errors.push("[timing] address_mode must be 'force' or 'mask'".into());
        }
    }

    if let Some(polarity) = timing.get("data_polarity") {
        if !matches!(polarity.as_str(), Some("normal" | "inverted")) {
            errors.push("[timing] data_polarity must be 'normal' or 'inverted'".into());
        }
    }
}

fn check_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };

    if let Some(text) = display.get("text") {
        match text.as_str() {
            Some(t) if !t.is_ascii() => {
                errors.push("[display] text must be ASCII".into());
            }
            Some(t) if t.len() > MAX_TEXT_LEN => {
                errors.push(format!(
                    "[display] text is {} characters (max {})",
                    t.len(),
                    MAX_TEXT_LEN
                ));
            }
            Some(_) => {}
            None => errors.push("[display] text must be a string".into()),
        }
    }

    for key in ["scroll_interval_ms", "chase_interval_ms"] {
        if let Some(value) = display.get(key) {
            match value.as_integer() {
                Some(ms) if (0..=u32::MAX as i64).contains(&ms) => {}
                _ => errors.push(format!("[display] {} must be a non-negative integer", key)),
            }
        }
    }

    if let Some(neon) = display.get("neon") {
        if !neon.is_bool() {
            errors.push("[display] neon must be true or false".into());
        }
    }
}

fn check_log(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(log) = config.get("log").and_then(|l| l.as_table()) else {
        return;
    };

    if let Some(verbose) = log.get("verbose") {
        if !verbose.is_bool() {
            errors.push("[log] verbose must be true or false".into());
        }
    }
}
