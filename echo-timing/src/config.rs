//! Compile-time measurement constants.
//!
//! None of these are runtime-tunable; the cadence, pulse width and
//! conversion divisor are fixed properties of the sensor and the
//! scheduling scheme.

/// Scheduler tick period in milliseconds (62.5 ticks per second).
pub const CADENCE_TICK_MS: u64 = 16;

/// Cadence divisor: a trigger boundary falls on every 4th tick, giving a
/// 64 ms measurement period. A conversion still in flight at the boundary
/// has timed out.
pub const TICKS_PER_TRIGGER: u8 = 4;

/// Width of the trigger pulse in microseconds (HC-SR04 minimum).
pub const TRIGGER_PULSE_US: u64 = 10;

/// Echo microseconds per centimeter of range (round trip at the speed of
/// sound).
pub const US_PER_CENTIMETER: u32 = 58;

/// Converts an echo pulse width to whole centimeters.
pub const fn centimeters(width_us: u32) -> u32 {
    width_us / US_PER_CENTIMETER
}
