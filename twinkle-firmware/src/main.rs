//! Twinkle - Cabinet I/O Controller Firmware
//!
//! Drives the cabinet backplane of an RP2040-based controller: polls the
//! button, turntable and volume registers and keeps the spotlights, neon
//! and sixteen-segment text display updated.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Delay;
use twinkle_core::poll::Cabinet;
use twinkle_hal::Monotonic;
use twinkle_hal_rp2040::{bus_from_config, EmbassyClock, PinBank};
use {defmt_rtt as _, panic_probe as _};

mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Twinkle firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    config::log_config(&config);

    let mut bank = PinBank::new(p);
    let lines = unwrap!(bus_from_config(&mut bank, &config.pins));
    info!("Bus pins claimed");

    let now_ms = EmbassyClock.now_ms();
    let mut cabinet: tasks::FwCabinet =
        unwrap!(Cabinet::from_config(lines, Delay, &config, now_ms));

    let missed = cabinet.lamp_test();
    if missed.is_empty() {
        info!("Lamp test written");
    } else {
        warn!("Lamp test: {} register(s) did not acknowledge", missed.len());
    }

    spawner
        .spawn(tasks::poll_task(cabinet, config.log.verbose))
        .unwrap();

    info!("All tasks spawned, system running");
}
