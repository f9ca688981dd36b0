//! Bus poll task
//!
//! Runs one cabinet tick per period. Ack failures are reported by the
//! tick; this task only logs when a register's ack state changes. With
//! `[log] verbose` set it also logs input changes and scroll steps.

use defmt::*;
use embassy_time::{Delay, Duration, Ticker};
use twinkle_core::poll::{AckMask, Cabinet, InputSnapshot};
use twinkle_hal_rp2040::{EmbassyClock, RpBus};

/// Tick period in milliseconds
pub const POLL_INTERVAL_MS: u64 = 5;

/// Cabinet on the RP2040 bus pins
pub type FwCabinet = Cabinet<RpBus, Delay>;

#[embassy_executor::task]
pub async fn poll_task(mut cabinet: FwCabinet, verbose: bool) {
    info!("Poll task started (verbose={})", verbose);

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut missed = AckMask::empty();
    let mut inputs = InputSnapshot::default();

    loop {
        ticker.next().await;

        let report = cabinet.poll(&clock);

        log_ack_changes(missed, report.missed);
        missed = report.missed;

        if !verbose {
            continue;
        }

        if *cabinet.inputs() != inputs {
            inputs = *cabinet.inputs();
            info!("Inputs: {}", inputs);
        }

        if report.scrolled {
            info!("Text cursor at {}", cabinet.scroller().cursor());
        }
    }
}

fn log_ack_changes(before: AckMask, after: AckMask) {
    for register in before.changed(after).iter() {
        if after.contains(register) {
            warn!("{} stopped acknowledging", register);
        } else {
            info!("{} acknowledging again", register);
        }
    }
}
