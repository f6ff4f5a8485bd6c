use void::Void;

/// Reasons a single reading is discarded.
///
/// None of these are fatal. A measurement cycle reports them as the sentinel
/// distance `0` and simply tries again on the next cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Echo line never went high within the timeout guard.
    RisingTimeout,
    /// Echo line stayed high for longer than the timeout guard.
    FallingTimeout,
    /// Converted distance is outside the reliable range of the sensor.
    OutOfRange,
}

/// Error returned by the hardware facing operations.
///
/// `E` is the GPIO error type, `R` the error type of the reporter. Paths that
/// never report use the uninhabited `Void` for `R`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error<E, R = Void> {
    /// Reading was discarded.
    Sensor(SensorError),
    /// A GPIO line could not be read or driven.
    Pin(E),
    /// The reporter failed to emit a line.
    Report(R),
}

impl<E> Error<E, Void> {
    /// Widen an error from a non-reporting path into any reporter error type.
    pub fn widen<R>(self) -> Error<E, R> {
        match self {
            Error::Sensor(e) => Error::Sensor(e),
            Error::Pin(e) => Error::Pin(e),
            Error::Report(v) => void::unreachable(v),
        }
    }
}

impl<E, R> Error<E, R> {
    /// The discarded reading, if that is what this error is.
    pub fn sensor(&self) -> Option<SensorError> {
        match self {
            Error::Sensor(e) => Some(*e),
            _ => None,
        }
    }
}

impl<E, R> From<SensorError> for Error<E, R> {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}
