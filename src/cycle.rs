use crate::capture::EchoPulseCapture;
use crate::config::Config;
use crate::distance::{DistanceCalculator, Measurement};
use crate::error::Error;
use crate::report::Reporter;
use crate::timer::TimerSource;
use crate::trigger::TriggerPulseGenerator;
use hal::blocking::delay::{DelayMs, DelayUs};
use hal::digital::v2::{InputPin, OutputPin, PinState};
use void::Void;

/// One trigger, capture, calculate and report iteration, repeated forever.
///
/// Cycles share no state. A failed reading is reported as the sentinel `0`
/// with the indicator off and is retried by the next cycle; only GPIO and
/// reporter errors end the loop.
pub struct MeasurementCycle<Trig, Echo, Timer, Led, Rep, Delay> {
    trigger: TriggerPulseGenerator<Trig>,
    capture: EchoPulseCapture<Echo, Timer>,
    calculator: DistanceCalculator,
    /// On iff the last measurement was valid
    indicator: Led,
    reporter: Rep,
    /// Busy-wait provider for the trigger pulse and the cycle pause
    delay: Delay,
    cycle_delay_ms: u32,
}

impl<Trig, Echo, Timer, Led, Rep, Delay, E> MeasurementCycle<Trig, Echo, Timer, Led, Rep, Delay>
where
    Trig: OutputPin<Error = E>,
    Echo: InputPin<Error = E>,
    Timer: TimerSource,
    Led: OutputPin<Error = E>,
    Rep: Reporter,
    Delay: DelayUs<u32> + DelayMs<u32>,
{
    /// Assemble a cycle from already configured components.
    pub fn new(
        trigger: TriggerPulseGenerator<Trig>,
        capture: EchoPulseCapture<Echo, Timer>,
        calculator: DistanceCalculator,
        indicator: Led,
        reporter: Rep,
        delay: Delay,
        cycle_delay_ms: u32,
    ) -> Self {
        MeasurementCycle {
            trigger,
            capture,
            calculator,
            indicator,
            reporter,
            delay,
            cycle_delay_ms,
        }
    }

    /// Assemble a cycle from bare peripherals and `config`.
    ///
    /// The GPIO lines must already be set up by the board bring-up: trigger
    /// and indicator as push-pull outputs, echo as input without pull
    /// resistor. The trigger line is driven low here.
    pub fn from_config(
        trigger: Trig,
        echo: Echo,
        timer: Timer,
        indicator: Led,
        reporter: Rep,
        delay: Delay,
        config: &Config,
    ) -> Result<Self, E> {
        Ok(Self::new(
            TriggerPulseGenerator::from_config(trigger, config)?,
            EchoPulseCapture::from_config(echo, timer, config),
            DistanceCalculator::from_config(config),
            indicator,
            reporter,
            delay,
            config.cycle_delay_ms,
        ))
    }

    /// Emit the startup banner. Call once before the first cycle.
    pub fn start(&mut self) -> Result<(), Error<E, Rep::Error>> {
        self.reporter.banner().map_err(Error::Report)
    }

    /// Trigger the sensor, capture the echo and convert it.
    pub fn measure(&mut self) -> Result<Measurement, E> {
        self.trigger.emit_trigger(&mut self.delay)?;
        let duration = self.capture.capture_ticks()?;
        let measurement = self.calculator.compute(duration);

        #[cfg(feature = "defmt")]
        {
            if duration != 0 && !measurement.valid {
                defmt::debug!("{} ticks out of range", duration);
            }
            defmt::trace!("{}", measurement);
        }

        Ok(measurement)
    }

    /// Run one full cycle: measure, update the indicator, report, then wait
    /// for the cycle delay.
    pub fn step(&mut self) -> Result<Measurement, Error<E, Rep::Error>> {
        let measurement = self.measure().map_err(Error::Pin)?;
        self.indicator
            .set_state(PinState::from(measurement.valid))
            .map_err(Error::Pin)?;
        self.reporter
            .report(measurement.distance)
            .map_err(Error::Report)?;
        self.delay.delay_ms(self.cycle_delay_ms);
        Ok(measurement)
    }

    /// Print the banner and run cycles forever.
    ///
    /// Only returns if a GPIO line or the reporter fails.
    pub fn run(&mut self) -> Result<Void, Error<E, Rep::Error>> {
        self.start()?;
        loop {
            self.step()?;
        }
    }
}
