//! Capture state machine.
//!
//! One conversion is in flight at a time. The rising edge of the echo
//! pulse restarts the pulse timer and marks the conversion busy; the
//! falling edge reads the width, resolves the freshness gate and returns
//! the state machine to free. The trigger boundary consults the same
//! state to decide between firing and declaring a timeout.
//!
//! Each operation runs inside a single critical section, so the two
//! time-critical writers (edge capture and boundary check) are serialized
//! no matter how the underlying interrupts are prioritized: a timeout and
//! a falling edge racing each other resolve in whichever order the
//! critical sections are entered, and a timeout that lands first always
//! demotes the late width.

use core::cell::Cell;

use critical_section::Mutex;

use crate::cadence::BoundaryAction;
use crate::gate::FreshnessGate;
use crate::pulse::PulseTimer;

/// Whether a measurement cycle is currently awaiting its falling edge.
///
/// `Free` also tells the capture path which edge comes next: a free
/// engine expects a rising edge, a busy one expects the falling edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionState {
    Free,
    Busy,
}

/// What became of a falling-edge capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureOutcome {
    /// The width was published for reporting, in microseconds.
    Published(u32),
    /// A timeout had already claimed the cycle; the late width was
    /// discarded and the gate reset for the next cycle.
    Demoted,
    /// No conversion was in flight; stray edge, nothing changed.
    Ignored,
}

struct Conversion {
    state: Cell<ConversionState>,
    stopwatch: PulseTimer,
}

/// FREE/BUSY conversion tracking plus width computation.
pub struct CaptureEngine {
    inner: Mutex<Conversion>,
}

impl CaptureEngine {
    /// Creates an idle engine whose pulse timer counts `ticks_per_us`
    /// ticks per microsecond.
    pub const fn new(ticks_per_us: u64) -> Self {
        Self {
            inner: Mutex::new(Conversion {
                state: Cell::new(ConversionState::Free),
                stopwatch: PulseTimer::new(ticks_per_us),
            }),
        }
    }

    /// Whether the engine is free to start a new cycle.
    pub fn is_free(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).state.get()) == ConversionState::Free
    }

    /// Trigger-boundary check. Free means a new trigger pulse may fire;
    /// busy means the cycle timed out, and the pending reading is
    /// invalidated before anything else can touch it.
    pub fn on_boundary(&self, gate: &FreshnessGate) -> BoundaryAction {
        critical_section::with(|cs| match self.inner.borrow(cs).state.get() {
            ConversionState::Free => BoundaryAction::Fire,
            ConversionState::Busy => {
                gate.invalidate_locked(cs);
                BoundaryAction::TimedOut
            }
        })
    }

    /// Rising-edge capture: restart the pulse timer from the current
    /// counter value and mark the conversion busy.
    pub fn begin(&self, now_ticks: u64) {
        critical_section::with(|cs| {
            let conv = self.inner.borrow(cs);
            conv.stopwatch.restart(now_ticks);
            conv.state.set(ConversionState::Busy);
        });
    }

    /// Falling-edge capture: read the width, resolve the gate and return
    /// to free. The gate re-check, the publication and the FREE
    /// transition are one indivisible step.
    pub fn finish(&self, now_ticks: u64, gate: &FreshnessGate) -> CaptureOutcome {
        critical_section::with(|cs| {
            let conv = self.inner.borrow(cs);
            if conv.state.get() == ConversionState::Free {
                return CaptureOutcome::Ignored;
            }
            let outcome = match conv.stopwatch.read(now_ticks) {
                Some(width_us) => {
                    if gate.resolve(cs, width_us) {
                        CaptureOutcome::Published(width_us)
                    } else {
                        CaptureOutcome::Demoted
                    }
                }
                // Busy without a recorded rising edge cannot happen through
                // begin(); treat it as a stray edge all the same.
                None => CaptureOutcome::Ignored,
            };
            conv.state.set(ConversionState::Free);
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Reading;

    #[test]
    fn cycle_publishes_width() {
        let engine = CaptureEngine::new(2);
        let gate = FreshnessGate::new();

        assert!(engine.is_free());
        engine.begin(0);
        assert!(!engine.is_free());
        assert_eq!(engine.finish(116, &gate), CaptureOutcome::Published(58));
        assert!(engine.is_free());
        assert_eq!(gate.try_take(), Some(58));
    }

    #[test]
    fn boundary_fires_only_when_free() {
        let engine = CaptureEngine::new(1);
        let gate = FreshnessGate::new();

        assert_eq!(engine.on_boundary(&gate), BoundaryAction::Fire);
        engine.begin(0);
        assert_eq!(engine.on_boundary(&gate), BoundaryAction::TimedOut);
    }

    #[test]
    fn timed_out_boundary_invalidates_pending_reading() {
        let engine = CaptureEngine::new(1);
        let gate = FreshnessGate::new();

        engine.begin(0);
        engine.on_boundary(&gate);
        assert_eq!(gate.state(), Reading::Invalid);
        assert_eq!(gate.try_take(), None);
    }

    #[test]
    fn late_edge_after_timeout_is_demoted() {
        let engine = CaptureEngine::new(1);
        let gate = FreshnessGate::new();

        engine.begin(0);
        engine.on_boundary(&gate);
        assert_eq!(engine.finish(70_000, &gate), CaptureOutcome::Demoted);
        // The engine is free again and the slot is clean for the next cycle.
        assert!(engine.is_free());
        assert_eq!(gate.state(), Reading::Stale);
    }

    #[test]
    fn stray_falling_edge_is_ignored() {
        let engine = CaptureEngine::new(1);
        let gate = FreshnessGate::new();

        assert_eq!(engine.finish(500, &gate), CaptureOutcome::Ignored);
        assert!(engine.is_free());
        assert_eq!(gate.try_take(), None);
    }

    #[test]
    fn widths_follow_edge_spacing() {
        let engine = CaptureEngine::new(2);
        let gate = FreshnessGate::new();

        engine.begin(1_000);
        assert_eq!(engine.finish(1_580, &gate), CaptureOutcome::Published(290));

        engine.begin(10_000);
        assert_eq!(engine.finish(10_116, &gate), CaptureOutcome::Published(58));
    }
}
