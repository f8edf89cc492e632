//! Pulse-width stopwatch over a free-running counter.
//!
//! The counter itself lives in hardware and never stops; this type only
//! remembers where the count stood at the rising edge and scales the
//! difference to microseconds at the falling edge.

use core::cell::Cell;

/// Measures the width of one echo pulse against an external tick count.
///
/// [`restart`](Self::restart) corresponds to the rising-edge capture
/// (reset the count), [`read`](Self::read) to the falling-edge capture
/// (read the accumulated count and divide by the tick rate). The caller
/// supplies the current counter value at each edge.
pub struct PulseTimer {
    ticks_per_us: u64,
    origin: Cell<Option<u64>>,
}

impl PulseTimer {
    /// Creates a stopwatch for a counter running at `ticks_per_us` ticks
    /// per microsecond.
    ///
    /// # Panics
    ///
    /// If `ticks_per_us` is 0.
    pub const fn new(ticks_per_us: u64) -> Self {
        if ticks_per_us == 0 {
            panic!("tick rate cannot be 0");
        }
        Self {
            ticks_per_us,
            origin: Cell::new(None),
        }
    }

    /// Restarts the count from the given counter value.
    pub fn restart(&self, now_ticks: u64) {
        self.origin.set(Some(now_ticks));
    }

    /// Reads the accumulated width in microseconds without stopping the
    /// count. Returns `None` if no rising edge has been recorded.
    ///
    /// Widths beyond `u32::MAX` microseconds saturate; the timeout monitor
    /// retires a conversion long before that point.
    pub fn read(&self, now_ticks: u64) -> Option<u32> {
        self.origin.get().map(|origin| {
            let width = now_ticks.wrapping_sub(origin) / self.ticks_per_us;
            width.min(u32::MAX as u64) as u32
        })
    }

    /// Whether a rising edge has been recorded since construction.
    pub fn is_running(&self) -> bool {
        self.origin.get().is_some()
    }
}
