//! Compile-time configuration.
//!
//! The defaults match an HC-SR04 driven from a 1 MHz free-running timer: one
//! tick per microsecond, a 30 ms echo window and the 2 cm to 400 cm range the
//! sensor is rated for.

use core::num::NonZeroU16;

/// Frequency (Hz) of the free-running timer the defaults assume.
pub const TICK_HZ: u32 = 1_000_000;

/// Speed of sound in air at roughly 20 °C, in centimeters per second.
pub const SPEED_OF_SOUND_CM_PER_S: u32 = 34_300;

/// Poll iterations allowed for each edge of the echo pulse before giving up.
pub const TIMEOUT_TICKS: u16 = 30_000;

/// Smallest distance (cm) the sensor reports reliably.
pub const MIN_DISTANCE_CM: u16 = 2;

/// Largest distance (cm) the sensor reports reliably.
pub const MAX_DISTANCE_CM: u16 = 400;

/// Time the trigger line is held low before the pulse.
pub const TRIGGER_LOW_US: u32 = 2;

/// Width of the trigger pulse. The sensor needs at least 10 us.
pub const TRIGGER_HIGH_US: u32 = 10;

/// Pause between two measurement cycles.
pub const CYCLE_DELAY_MS: u32 = 16;

/// Timer ticks per centimeter of target distance at `TICK_HZ`.
pub const TICKS_PER_CM: u16 = ticks_per_cm(TICK_HZ);

/// Timer ticks that correspond to one centimeter of target distance.
///
/// Sound travels to the target and back, so one centimeter of distance costs
/// `2 / SPEED_OF_SOUND_CM_PER_S` seconds of echo, or `2 * tick_hz / 34_300`
/// ticks. At 1 MHz that is 58 (truncated from 58.3).
///
/// Saturates at `u16::MAX` for absurdly fast clocks.
pub const fn ticks_per_cm(tick_hz: u32) -> u16 {
    let ticks = 2 * tick_hz as u64 / SPEED_OF_SOUND_CM_PER_S as u64;
    if ticks > u16::MAX as u64 {
        u16::MAX
    } else {
        ticks as u16
    }
}

const fn non_zero(value: u16) -> Option<NonZeroU16> {
    NonZeroU16::new(value)
}

/// All tunables of a measurement cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Poll iterations allowed per echo edge.
    pub timeout_ticks: u16,
    /// Inclusive lower bound of a valid distance.
    pub min_distance: u16,
    /// Inclusive upper bound of a valid distance.
    pub max_distance: u16,
    /// Divisor turning echo ticks into distance units.
    pub ticks_per_distance_unit: NonZeroU16,
    /// Low time before the trigger pulse (us).
    pub trigger_low_us: u32,
    /// Trigger pulse width (us).
    pub trigger_high_us: u32,
    /// Delay between cycles (ms).
    pub cycle_delay_ms: u32,
}

impl Config {
    /// Defaults for a 1 MHz timer, distances in centimeters.
    pub const DEFAULT: Config = Config {
        timeout_ticks: TIMEOUT_TICKS,
        min_distance: MIN_DISTANCE_CM,
        max_distance: MAX_DISTANCE_CM,
        ticks_per_distance_unit: match non_zero(TICKS_PER_CM) {
            Some(divisor) => divisor,
            None => NonZeroU16::MIN,
        },
        trigger_low_us: TRIGGER_LOW_US,
        trigger_high_us: TRIGGER_HIGH_US,
        cycle_delay_ms: CYCLE_DELAY_MS,
    };

    /// Defaults with the tick divisor re-derived for a timer running at
    /// `tick_hz`.
    ///
    /// Returns `None` when the clock is too slow to resolve a centimeter.
    pub const fn for_tick_hz(tick_hz: u32) -> Option<Config> {
        match non_zero(ticks_per_cm(tick_hz)) {
            Some(divisor) => Some(Config {
                ticks_per_distance_unit: divisor,
                ..Config::DEFAULT
            }),
            None => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::DEFAULT
    }
}
