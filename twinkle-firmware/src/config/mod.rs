//! Configuration loading
//!
//! The configuration is `twinkle.toml`, embedded at build time and parsed
//! by the no-alloc parser in `twinkle-core`.

use defmt::*;
use twinkle_core::config::{parse_config, TwinkleConfig};

/// Embedded configuration (compiled into firmware)
/// Edit twinkle.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../twinkle.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> TwinkleConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded twinkle.toml");
            config
        }
        Err(e) => {
            warn!("twinkle.toml rejected ({}), using defaults", e);
            TwinkleConfig::default()
        }
    }
}

pub fn log_config(config: &TwinkleConfig) {
    let pins = &config.pins;
    info!(
        "Bus pins: clock=gpio{} enable=gpio{} data_out=gpio{} data_in=gpio{}",
        pins.clock.pin, pins.enable.pin, pins.data_out.pin, pins.data_in.pin
    );
    info!(
        "Bus timing: {}us/half-bit, {}",
        config.timing.bit_delay_us, config.timing.revision
    );
    info!(
        "Display: \"{=str}\", scroll {}ms, chase {}ms, neon={}",
        config.display.text.as_str(),
        config.display.scroll_interval_ms,
        config.display.chase_interval_ms,
        config.display.neon
    );
    info!("Verbose logging: {}", config.log.verbose);
}
