//! Trigger scheduling and timeout detection
//!
//! Runs the 62.5 Hz measurement cadence. Every 4th tick is a trigger
//! boundary: if no conversion is in flight, a 10 us pulse on the trigger
//! line starts a new cycle; if the previous cycle's falling edge never
//! arrived, the boundary declares the cycle timed out and invalidates the
//! pending reading instead of re-triggering.
//!
//! # Pulse Strategies
//! The pulse width can be timed two ways, selected at build time with the
//! same contract (drive the line high for the fixed width, once per cycle):
//! - default: arm a timer alarm and lower the line when it completes
//! - `blocking-trigger` feature: busy-wait for the width, which stalls the
//!   executor for the duration

use crate::system::resources::TriggerResources;
use crate::system::state::{CAPTURE, READING};
use defmt::{info, warn};
use echo_timing::config::{CADENCE_TICK_MS, TRIGGER_PULSE_US};
use echo_timing::{BoundaryAction, Cadence};
use embassy_rp::gpio::{Level, Output};
#[cfg(feature = "blocking-trigger")]
use embassy_time::block_for;
#[cfg(not(feature = "blocking-trigger"))]
use embassy_time::Timer;
use embassy_time::{Duration, Ticker};

/// Width of the trigger pulse.
const TRIGGER_PULSE: Duration = Duration::from_micros(TRIGGER_PULSE_US);

/// Pulse generator selected for this build.
#[cfg(not(feature = "blocking-trigger"))]
pub type TriggerPulse = TimedTrigger;
/// Pulse generator selected for this build.
#[cfg(feature = "blocking-trigger")]
pub type TriggerPulse = BlockingTrigger;

/// Times the pulse with a timer alarm; the line is lowered when the alarm
/// completion wakes the task.
#[cfg(not(feature = "blocking-trigger"))]
pub struct TimedTrigger {
    pin: Output<'static>,
}

#[cfg(not(feature = "blocking-trigger"))]
impl TimedTrigger {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }

    pub async fn fire(&mut self) {
        self.pin.set_high();
        Timer::after(TRIGGER_PULSE).await;
        self.pin.set_low();
    }
}

/// Times the pulse with a busy-wait. Holds the whole executor for the
/// pulse width; the accepted trade-off of the software-timed variant.
#[cfg(feature = "blocking-trigger")]
pub struct BlockingTrigger {
    pin: Output<'static>,
}

#[cfg(feature = "blocking-trigger")]
impl BlockingTrigger {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }

    pub async fn fire(&mut self) {
        self.pin.set_high();
        block_for(TRIGGER_PULSE);
        self.pin.set_low();
    }
}

/// Cadence task: paces trigger pulses and catches lost echoes.
#[embassy_executor::task]
pub async fn trigger_schedule(r: TriggerResources) {
    let mut trigger = TriggerPulse::new(Output::new(r.trigger_pin, Level::Low));
    let mut cadence = Cadence::new();
    let mut ticker = Ticker::every(Duration::from_millis(CADENCE_TICK_MS));

    info!("trigger scheduler started");

    loop {
        ticker.next().await;
        if !cadence.advance() {
            continue;
        }
        match CAPTURE.on_boundary(&READING) {
            BoundaryAction::Fire => trigger.fire().await,
            BoundaryAction::TimedOut => {
                // Echo never fell within the 64 ms window. The reading is
                // already poisoned; the next boundary retries once the
                // capture task has seen the line fall.
                warn!("echo timed out, cycle dropped");
            }
        }
    }
}
