//! Shared measurement state
//!
//! The capture and trigger tasks write these statics from their
//! interrupt-backed contexts; the reporting task polls them. Both types
//! guard their multi-step accesses with critical sections, so a reading
//! and the freshness flag can never be observed out of sync.

use echo_timing::{CaptureEngine, FreshnessGate};

/// Free-running timer ticks per microsecond of echo width.
///
/// The stopwatch runs on the embassy time base, 1 MHz on the RP2350.
pub const TICKS_PER_MICROSECOND: u64 = embassy_time::TICK_HZ / 1_000_000;

/// Conversion state machine: FREE/BUSY plus the pulse stopwatch.
pub static CAPTURE: CaptureEngine = CaptureEngine::new(TICKS_PER_MICROSECOND);

/// Single-slot handoff of the latest echo width to the reporting task.
pub static READING: FreshnessGate = FreshnessGate::new();
