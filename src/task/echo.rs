//! Echo pulse capture
//!
//! Stopwatches the echo line against the free-running timer: the rising
//! edge starts a conversion, the falling edge completes it and hands the
//! width to the freshness gate. The waits alternate edge polarity, so the
//! capture is always armed for the opposite edge of the one it last saw.

use crate::system::resources::EchoResources;
use crate::system::state::{CAPTURE, READING};
use defmt::{debug, info};
use echo_timing::CaptureOutcome;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::Instant;

/// Capture task: drives the conversion state machine from edge events.
#[embassy_executor::task]
pub async fn echo_capture(r: EchoResources) {
    // The echo line idles low and is actively driven by the sensor; the
    // pull-down only pins it during reset.
    let mut echo = Input::new(r.echo_pin, Pull::Down);

    info!("echo capture started");

    loop {
        echo.wait_for_rising_edge().await;
        CAPTURE.begin(Instant::now().as_ticks());

        echo.wait_for_falling_edge().await;
        match CAPTURE.finish(Instant::now().as_ticks(), &READING) {
            CaptureOutcome::Published(width_us) => debug!("echo width {} us", width_us),
            CaptureOutcome::Demoted => debug!("late echo after timeout, dropped"),
            CaptureOutcome::Ignored => {}
        }
    }
}
