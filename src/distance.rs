use crate::config::Config;
use crate::error::SensorError;
use core::num::NonZeroU16;

/// Result of one measurement cycle.
///
/// A distance of `0` is the "no valid reading" sentinel and is used for every
/// failure: no echo, echo too long, or a distance outside the sensor's range.
/// It is never a real reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Distance in configured units, or `0`.
    pub distance: u16,
    /// `true` iff `distance` is a real reading.
    pub valid: bool,
}

impl Measurement {
    /// The sentinel measurement.
    pub const INVALID: Measurement = Measurement {
        distance: 0,
        valid: false,
    };
}

impl From<Result<u16, SensorError>> for Measurement {
    fn from(result: Result<u16, SensorError>) -> Self {
        match result {
            Ok(distance) => Measurement {
                distance,
                valid: true,
            },
            Err(_) => Measurement::INVALID,
        }
    }
}

/// Turns echo durations into distances and filters implausible ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DistanceCalculator {
    ticks_per_unit: NonZeroU16,
    min: u16,
    max: u16,
}

impl DistanceCalculator {
    /// Create a calculator accepting distances in `min..=max`.
    pub const fn new(ticks_per_unit: NonZeroU16, min: u16, max: u16) -> Self {
        DistanceCalculator {
            ticks_per_unit,
            min,
            max,
        }
    }

    /// Create a calculator from `config`.
    pub const fn from_config(config: &Config) -> Self {
        Self::new(
            config.ticks_per_distance_unit,
            config.min_distance,
            config.max_distance,
        )
    }

    /// Convert `duration_ticks` into a distance, truncating.
    ///
    /// Distances outside `min..=max` are rejected with `OutOfRange`. As long
    /// as `min` is at least 1 this also rejects the `0` tick timeout
    /// sentinel.
    pub fn classify(&self, duration_ticks: u16) -> Result<u16, SensorError> {
        let distance = duration_ticks / self.ticks_per_unit.get();
        if distance < self.min || distance > self.max || distance == 0 {
            Err(SensorError::OutOfRange)
        } else {
            Ok(distance)
        }
    }

    /// Convert `duration_ticks` into a `Measurement`, forcing out of range
    /// results to the sentinel.
    pub fn compute(&self, duration_ticks: u16) -> Measurement {
        self.classify(duration_ticks).into()
    }
}

impl Default for DistanceCalculator {
    fn default() -> Self {
        Self::from_config(&Config::DEFAULT)
    }
}
