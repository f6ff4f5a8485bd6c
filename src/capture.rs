use crate::config::Config;
use crate::error::{Error, SensorError};
use crate::timer::{PulseWindow, Tick, TimerSource};
use hal::digital::v2::InputPin;

/// Capture state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    /// Sensor was triggered, waiting for the echo line to go high
    WaitRising { guard: u16 },
    /// Echo pulse in progress, waiting for the line to go low
    WaitFalling { start: Tick, guard: u16 },
    /// Both edges captured
    Done(PulseWindow),
    /// A guard ran out before its edge showed up
    TimedOut(SensorError),
}

/// Measures the width of the echo pulse by polling the echo line.
///
/// Each wait is bounded by a countdown guard that is decremented once per
/// poll, not by a clock. The real time a timeout takes is therefore
/// `timeout_ticks` poll periods, which is only approximately `timeout_ticks`
/// timer ticks.
pub struct EchoPulseCapture<Pin, Timer> {
    /// Input pin connected to the sensor's echo output
    echo: Pin,
    /// Free-running counter the edges are timestamped with
    timer: Timer,
    /// Initial value of the guard for each edge
    timeout_ticks: u16,
    /// Internal state of the capture
    state: State,
}

impl<Pin, Timer> EchoPulseCapture<Pin, Timer>
where
    Pin: InputPin,
    Timer: TimerSource,
{
    /// Create a new capture.
    ///
    /// # Arguments
    /// - `echo` is the `InputPin` connected to the echo output of the sensor,
    /// configured without pull resistor.
    /// - `timer` timestamps the edges of the pulse.
    /// - `timeout_ticks` is the number of polls allowed for each edge.
    pub fn new(echo: Pin, timer: Timer, timeout_ticks: u16) -> Self {
        EchoPulseCapture {
            echo,
            timer,
            timeout_ticks,
            state: State::WaitRising {
                guard: timeout_ticks,
            },
        }
    }

    /// Create a capture with the timeout from `config`.
    pub fn from_config(echo: Pin, timer: Timer, config: &Config) -> Self {
        Self::new(echo, timer, config.timeout_ticks)
    }

    /// Start over, waiting for a new rising edge with a full guard.
    pub fn reset(&mut self) {
        self.state = State::WaitRising {
            guard: self.timeout_ticks,
        };
    }

    /// Poll the echo line once.
    ///
    /// Returns [`nb::Error::WouldBlock`][1] while an edge is still expected.
    /// Once both edges were seen the pulse window is returned. If a guard ran
    /// out, the matching `SensorError` is returned instead. Terminal results
    /// are repeated on further polls until `reset` is called.
    ///
    /// [1]: https://docs.rs/nb/0.1.3/nb/enum.Error.html
    pub fn poll(&mut self) -> nb::Result<PulseWindow, Error<Pin::Error>> {
        self.state = match self.state {
            State::WaitRising { guard } => {
                if self.is_high()? {
                    State::WaitFalling {
                        start: self.timer.read_ticks(),
                        guard: self.timeout_ticks,
                    }
                } else {
                    match guard.saturating_sub(1) {
                        0 => State::TimedOut(SensorError::RisingTimeout),
                        guard => State::WaitRising { guard },
                    }
                }
            }
            State::WaitFalling { start, guard } => {
                if self.is_high()? {
                    match guard.saturating_sub(1) {
                        0 => State::TimedOut(SensorError::FallingTimeout),
                        guard => State::WaitFalling { start, guard },
                    }
                } else {
                    State::Done(PulseWindow::new(start, self.timer.read_ticks()))
                }
            }
            terminal => terminal,
        };

        match self.state {
            State::Done(window) => Ok(window),
            State::TimedOut(e) => Err(nb::Error::Other(Error::Sensor(e))),
            _ => Err(nb::Error::WouldBlock),
        }
    }

    /// Capture one full echo pulse, blocking until both edges were seen or a
    /// guard ran out.
    pub fn capture(&mut self) -> Result<PulseWindow, Error<Pin::Error>> {
        self.reset();
        let result = nb::block!(self.poll());

        #[cfg(feature = "defmt")]
        match &result {
            Ok(window) => defmt::trace!("echo pulse {}", window),
            Err(Error::Sensor(e)) => defmt::debug!("echo capture failed: {}", e),
            Err(_) => defmt::warn!("echo pin read failed"),
        }

        result
    }

    /// Capture one echo pulse and return its wraparound corrected length.
    ///
    /// Any timeout yields `0`. A zero therefore always means "no echo" and
    /// never a real reading; the sensor cannot produce one that short. GPIO
    /// errors are still returned.
    pub fn capture_ticks(&mut self) -> Result<u16, Pin::Error> {
        match self.capture() {
            Ok(window) => Ok(window.duration_ticks()),
            Err(Error::Sensor(_)) => Ok(0),
            Err(Error::Pin(e)) => Err(e),
            Err(Error::Report(v)) => void::unreachable(v),
        }
    }

    /// Give back the echo pin and the timer.
    pub fn release(self) -> (Pin, Timer) {
        (self.echo, self.timer)
    }

    fn is_high(&self) -> nb::Result<bool, Error<Pin::Error>> {
        self.echo
            .is_high()
            .map_err(|e| nb::Error::Other(Error::Pin(e)))
    }
}
