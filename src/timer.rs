//! Free-running tick counter and the pulse window measured against it.

/// One value of a 16-bit free-running timer.
pub type Tick = u16;

/// Largest value the counter reaches before wrapping to zero.
pub const MAX_TICK: Tick = Tick::MAX;

/// Read access to a free-running counter that wraps modulo 65536.
///
/// The counter must advance at the frequency the timeout and distance
/// constants were derived for (1 MHz for `Config::DEFAULT`).
pub trait TimerSource {
    /// Current counter value.
    fn read_ticks(&self) -> Tick;
}

impl<T: TimerSource + ?Sized> TimerSource for &T {
    fn read_ticks(&self) -> Tick {
        (**self).read_ticks()
    }
}

/// Rising and falling edge timestamps of one echo pulse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseWindow {
    /// Counter value when the echo line went high.
    pub start_tick: Tick,
    /// Counter value when the echo line went low again.
    pub stop_tick: Tick,
}

impl PulseWindow {
    /// Create a window from its two edges.
    pub fn new(start_tick: Tick, stop_tick: Tick) -> Self {
        PulseWindow {
            start_tick,
            stop_tick,
        }
    }

    /// Ticks between the two edges.
    ///
    /// If the counter wrapped in between, `stop_tick` is smaller than
    /// `start_tick` and the result is `(MAX_TICK - start) + stop + 1`. Only a
    /// single wrap can be detected, so pulses must be shorter than one timer
    /// period.
    pub fn duration_ticks(&self) -> u16 {
        if self.stop_tick >= self.start_tick {
            self.stop_tick - self.start_tick
        } else {
            (MAX_TICK - self.start_tick) + self.stop_tick + 1
        }
    }
}
