use crate::config::Config;
use hal::blocking::delay::DelayUs;
use hal::digital::v2::OutputPin;

/// Drives the trigger line of the sensor.
pub struct TriggerPulseGenerator<Pin> {
    /// Output pin connected to the sensor's trigger input
    pin: Pin,
    /// Low time before the pulse (us)
    low_us: u32,
    /// Pulse width (us)
    high_us: u32,
}

impl<Pin> TriggerPulseGenerator<Pin>
where
    Pin: OutputPin,
{
    /// Create a new trigger generator.
    ///
    /// The pin is driven low immediately so that every later state can
    /// assume the line idles low.
    pub fn new(mut pin: Pin, low_us: u32, high_us: u32) -> Result<Self, Pin::Error> {
        pin.set_low()?;
        Ok(TriggerPulseGenerator {
            pin,
            low_us,
            high_us,
        })
    }

    /// Create a trigger generator with the pulse timing from `config`.
    pub fn from_config(pin: Pin, config: &Config) -> Result<Self, Pin::Error> {
        Self::new(pin, config.trigger_low_us, config.trigger_high_us)
    }

    /// Emit one trigger pulse: low, high, low.
    ///
    /// `delay` must busy-wait; the pulse width sets how reliably the sensor
    /// starts a burst.
    pub fn emit_trigger<D>(&mut self, delay: &mut D) -> Result<(), Pin::Error>
    where
        D: DelayUs<u32>,
    {
        self.pin.set_low()?;
        delay.delay_us(self.low_us);
        self.pin.set_high()?;
        delay.delay_us(self.high_us);
        self.pin.set_low()
    }

    /// Give back the trigger pin.
    pub fn release(self) -> Pin {
        self.pin
    }
}
