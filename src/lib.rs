//! A platform agnostic, polling driver for the [`HC-SR04`][2] (ultrasonic
//! distance sensor).
//!
//! This driver is built using [`embedded-hal`][1] traits.
//!
//! # Usage
//! The sensor is read by busy-polling the echo line against a free-running
//! 16-bit timer, without interrupts. Every wait is bounded by a countdown guard,
//! so a disconnected sensor can never hang the caller.
//!
//! A [`MeasurementCycle`] ties everything together: it triggers the sensor,
//! captures the echo pulse, converts it to centimeters, drives an indicator
//! LED and prints one line per reading to a serial port.
//!
//! ```rust,ignore
//! let mut cycle = MeasurementCycle::from_config(
//!     trigger,
//!     echo,
//!     timer,
//!     led,
//!     SerialReporter::new(tx),
//!     delay,
//!     &Config::DEFAULT,
//! )?;
//! // Only returns on a GPIO or serial error
//! match cycle.run() {
//!     Err(Error::Pin(e)) => handle_gpio_fault(e),
//!     Err(e) => handle_serial_fault(e),
//!     Ok(v) => void::unreachable(v),
//! }
//! ```
//!
//! Failed readings (no echo, echo too long, out of range) are all reported as
//! a distance of `0` with the indicator off. `0` always means "invalid".
//!
//! # Features
//! - `defmt`: derive `defmt::Format` for the public data types and log failed
//!   captures.
//!
//! [1]: https://crates.io/crates/embedded-hal
//! [2]: http://www.micropik.com/PDF/HCSR04.pdf

#![deny(missing_docs)]
#![deny(warnings)]
#![no_std]

extern crate embedded_hal as hal;

mod capture;
pub mod config;
mod cycle;
mod distance;
mod error;
mod report;
mod timer;
mod trigger;

#[cfg(test)]
mod mock;

pub use capture::EchoPulseCapture;
pub use config::Config;
pub use cycle::MeasurementCycle;
pub use distance::{DistanceCalculator, Measurement};
pub use error::{Error, SensorError};
/// Publicly re-export `nb::Error` for easier usage down-stream
pub use nb::Error as NbError;
pub use report::{Reporter, SerialReporter, BANNER};
pub use timer::{PulseWindow, Tick, TimerSource, MAX_TICK};
pub use trigger::TriggerPulseGenerator;
pub use void::Void;
