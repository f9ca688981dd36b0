//! Minimal TOML parser for controller configuration
//!
//! Handles only the subset the controller needs and runs without an
//! allocator:
//!
//! - `[bus]`, `[timing]`, `[display]` and `[log]` section headers
//! - `key = value` pairs (string, integer, boolean)
//! - Comments (`# ...`), including trailing comments outside strings
//!
//! NOT supported: multi-line strings, escapes other than `\"` and `\\`,
//! arrays, inline tables, dotted keys.
//!
//! ```toml
//! [bus]
//! clock = "gpio2"
//! enable = "gpio3"
//! data_out = "gpio4"
//! data_in = "^gpio5"
//!
//! [timing]
//! bit_delay_us = 1
//! address_mode = "force"     # or "mask"
//! data_polarity = "normal"   # or "inverted"
//!
//! [display]
//! text = "HELLO - WORLD !"
//! scroll_interval_ms = 2500
//! chase_interval_ms = 250
//! neon = true
//!
//! [log]
//! verbose = false
//! ```
//!
//! Keys not listed above are ignored so newer config files still load.

use twinkle_protocol::{AddressMode, DataPolarity};

use super::types::{ConfigError, DisplayText, PinConfig, TwinkleConfig, MAX_TEXT_LEN};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bus,
    Timing,
    Display,
    Log,
}

/// Parse configuration text, starting from defaults
///
/// The result is validated before it is returned.
pub fn parse_config(input: &str) -> Result<TwinkleConfig, ConfigError> {
    let mut config = TwinkleConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ConfigError::InvalidSection);
            }
            section = parse_section_header(line[1..line.len() - 1].trim())?;
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => return Err(ConfigError::InvalidValue),
        };

        match section {
            Section::Root => {}
            Section::Bus => apply_bus_key(&mut config, key, value)?,
            Section::Timing => apply_timing_key(&mut config, key, value)?,
            Section::Display => apply_display_key(&mut config, key, value)?,
            Section::Log => apply_log_key(&mut config, key, value)?,
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ConfigError> {
    match name {
        "bus" => Ok(Section::Bus),
        "timing" => Ok(Section::Timing),
        "display" => Ok(Section::Display),
        "log" => Ok(Section::Log),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_bus_key(config: &mut TwinkleConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let pins = &mut config.pins;
    match key {
        "clock" => pins.clock = parse_pin(parse_string(value)?)?,
        "enable" => pins.enable = parse_pin(parse_string(value)?)?,
        "data_out" => pins.data_out = parse_pin(parse_string(value)?)?,
        "data_in" => pins.data_in = parse_pin(parse_string(value)?)?,
        _ => {}
    }
    Ok(())
}

fn apply_timing_key(
    config: &mut TwinkleConfig,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let timing = &mut config.timing;
    match key {
        "bit_delay_us" => timing.bit_delay_us = parse_u32(value)?,
        "address_mode" => {
            timing.revision.address_mode = match parse_string(value)? {
                "force" => AddressMode::ForceLowBits,
                "mask" => AddressMode::MaskLowBits,
                _ => return Err(ConfigError::InvalidValue),
            }
        }
        "data_polarity" => {
            timing.revision.data_polarity = match parse_string(value)? {
                "normal" => DataPolarity::Normal,
                "inverted" => DataPolarity::Inverted,
                _ => return Err(ConfigError::InvalidValue),
            }
        }
        _ => {}
    }
    Ok(())
}

fn apply_display_key(
    config: &mut TwinkleConfig,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let display = &mut config.display;
    match key {
        "text" => display.text = parse_text(value)?,
        "scroll_interval_ms" => display.scroll_interval_ms = parse_u32(value)?,
        "chase_interval_ms" => display.chase_interval_ms = parse_u32(value)?,
        "neon" => display.neon = parse_bool(value)?,
        _ => {}
    }
    Ok(())
}

fn apply_log_key(config: &mut TwinkleConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    if key == "verbose" {
        config.log.verbose = parse_bool(value)?;
    }
    Ok(())
}

/// Cut a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' if in_string && !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
        escaped = false;
    }
    line
}

/// Raw contents of a single quoted string (escapes still in place)
///
/// A `"` inside the value must be escaped, so `"a" "b"` is rejected.
fn parse_string(value: &str) -> Result<&str, ConfigError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)?;

    let mut escaped = false;
    for c in inner.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Err(ConfigError::InvalidValue),
            _ => {}
        }
    }
    if escaped {
        // The closing quote was escaped
        return Err(ConfigError::InvalidValue);
    }

    Ok(inner)
}

/// Quoted string with `\"` and `\\` unescaped, bounded to the text buffer
fn parse_text(value: &str) -> Result<DisplayText, ConfigError> {
    let raw = parse_string(value)?;
    let mut text = DisplayText::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let c = if c == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\\')) => escaped,
                _ => return Err(ConfigError::InvalidValue),
            }
        } else {
            c
        };

        if !c.is_ascii() {
            return Err(ConfigError::NonAsciiText);
        }
        if text.len() >= MAX_TEXT_LEN {
            return Err(ConfigError::TextTooLong);
        }
        text.push(c).map_err(|_| ConfigError::TextTooLong)?;
    }

    Ok(text)
}

/// Decimal integer, `_` separators allowed
fn parse_u32(value: &str) -> Result<u32, ConfigError> {
    let mut result: u32 = 0;
    let mut digits = 0;

    for c in value.chars().filter(|c| *c != '_') {
        let digit = c.to_digit(10).ok_or(ConfigError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ConfigError::InvalidValue)?;
        digits += 1;
    }

    if digits == 0 {
        return Err(ConfigError::InvalidValue);
    }
    Ok(result)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

/// Parse a pin string
///
/// Supports formats:
/// - "gpio4" -> pin 4
/// - "^gpio5" -> pin 5 with pull-up
pub fn parse_pin(s: &str) -> Result<PinConfig, ConfigError> {
    let s = s.trim();

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let num = s.strip_prefix("gpio").ok_or(ConfigError::InvalidPin)?;
    let pin: u8 = num.parse().map_err(|_| ConfigError::InvalidPin)?;

    Ok(PinConfig { pin, pull_up })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DEFAULT_TEXT;

    const SAMPLE: &str = r#"
# Cabinet wiring
[bus]
clock = "gpio10"
enable = "gpio11"   # active-low
data_out = "gpio12"
data_in = "^gpio13"

[timing]
bit_delay_us = 20
address_mode = "mask"
data_polarity = "inverted"

[display]
text = "INSERT COIN #1"
scroll_interval_ms = 1_000
chase_interval_ms = 125
neon = false

[log]
verbose = true
"#;

    #[test]
    fn test_parse_full() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.pins.clock, PinConfig::new(10));
        assert_eq!(config.pins.enable, PinConfig::new(11));
        assert_eq!(config.pins.data_out, PinConfig::new(12));
        assert_eq!(config.pins.data_in, PinConfig::with_pullup(13));

        assert_eq!(config.timing.bit_delay_us, 20);
        assert_eq!(config.timing.revision.address_mode, AddressMode::MaskLowBits);
        assert_eq!(config.timing.revision.data_polarity, DataPolarity::Inverted);

        assert_eq!(config.display.text.as_str(), "INSERT COIN #1");
        assert_eq!(config.display.scroll_interval_ms, 1000);
        assert_eq!(config.display.chase_interval_ms, 125);
        assert!(!config.display.neon);
        assert!(config.log.verbose);
    }

    #[test]
    fn test_empty_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, TwinkleConfig::default());
        assert_eq!(config.display.text.as_str(), DEFAULT_TEXT);
    }

    #[test]
    fn test_text_too_long_rejected() {
        let mut input: heapless::String<128> = heapless::String::new();
        input.push_str("[display]\ntext = \"").unwrap();
        for _ in 0..MAX_TEXT_LEN + 1 {
            input.push('X').unwrap();
        }
        input.push('"').unwrap();

        assert_eq!(parse_config(&input), Err(ConfigError::TextTooLong));
    }

    #[test]
    fn test_text_escapes() {
        let config = parse_config("[display]\ntext = \"SAY \\\"HI\\\"\"").unwrap();
        assert_eq!(config.display.text.as_str(), "SAY \"HI\"");
    }

    #[test]
    fn test_stray_quote_rejected() {
        assert_eq!(
            parse_config("[display]\ntext = \"a\" \"b\""),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\ntext = \"open\\\""),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(parse_string("\""), Err(ConfigError::InvalidValue));
        assert_eq!(parse_string("\"\""), Ok(""));
        assert_eq!(parse_string(r#""say \"hi\"""#), Ok(r#"say \"hi\""#));
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[lighting]\nbrightness = 3"),
            Err(ConfigError::InvalidSection)
        );
        assert_eq!(parse_config("[bus"), Err(ConfigError::InvalidSection));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[timing]\naddress_mode = \"both\""),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[timing]\nbit_delay_us = fast"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nneon = yes"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(parse_config("[bus]\nclock"), Err(ConfigError::InvalidValue));
        assert_eq!(
            parse_config("[log]\nverbose = 1"),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = parse_config("[display]\nbrightness = 3\nneon = true").unwrap();
        assert!(config.display.neon);
    }

    #[test]
    fn test_pin_conflict_rejected() {
        assert_eq!(
            parse_config("[bus]\nclock = \"gpio5\""),
            Err(ConfigError::PinConflict)
        );
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("gpio2"), Ok(PinConfig::new(2)));
        assert_eq!(parse_pin("^gpio5"), Ok(PinConfig::with_pullup(5)));
        assert_eq!(parse_pin("pin2"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin("gpio300"), Err(ConfigError::InvalidPin));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("t = \"#1\" # x"), "t = \"#1\" ");
        assert_eq!(strip_comment("# whole line"), "");
    }
}
