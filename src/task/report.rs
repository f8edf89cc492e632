//! Distance reporting
//!
//! Best-effort consumer of the freshness gate: polls it outside the
//! time-critical paths and, for each fresh reading, writes the distance
//! in whole centimeters as a decimal ASCII line over the UART. Stale and
//! invalidated cycles produce no output, so every emitted line is one
//! validated measurement, reported once.

use core::fmt::Write as _;

use crate::system::resources::SerialResources;
use crate::system::state::READING;
use defmt::{info, warn};
use echo_timing::config::centimeters;
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_time::{Duration, Ticker};
use heapless::String;

/// Gate poll period: twice per cadence tick, so a fresh reading goes out
/// well before the next trigger boundary.
const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Baud rate of the reporting link.
const BAUD_RATE: u32 = 250_000;

/// Reporting task: forwards fresh readings to the serial link.
#[embassy_executor::task]
pub async fn report(r: SerialResources) {
    let mut config = UartConfig::default();
    config.baudrate = BAUD_RATE;
    let mut tx = UartTx::new(r.uart, r.tx_pin, r.tx_dma, config);

    let mut ticker = Ticker::every(POLL_INTERVAL);

    info!("reporting started at {} baud", BAUD_RATE);

    loop {
        ticker.next().await;

        // Snapshot-and-clear is one indivisible step; formatting and the
        // (possibly blocking) transport write happen after it.
        if let Some(width_us) = READING.try_take() {
            let distance_cm = centimeters(width_us);

            let mut line: String<12> = String::new();
            write!(line, "{}\r\n", distance_cm).ok();
            if tx.write(line.as_bytes()).await.is_err() {
                // No retry; the next fresh reading gets its own attempt.
                warn!("serial write failed");
            }

            info!("distance {} cm", distance_cm);
        }
    }
}
