use hal::serial;

/// Line printed once before the first measurement.
pub const BANNER: &str = "HC-SR04 Stable Polling Demo\r\n";

/// Text sink receiving one line per measurement cycle.
pub trait Reporter {
    /// Error raised by the underlying transport.
    type Error;

    /// Emit the startup banner.
    fn banner(&mut self) -> Result<(), Self::Error>;

    /// Emit `Distance: <distance> cm\r\n`.
    ///
    /// The sentinel `0` is reported like any other value.
    fn report(&mut self, distance: u16) -> Result<(), Self::Error>;
}

/// `Reporter` writing ASCII lines to a serial port.
pub struct SerialReporter<Serial> {
    serial: Serial,
}

impl<Serial> SerialReporter<Serial>
where
    Serial: serial::Write<u8>,
{
    /// Wrap a serial transmitter.
    pub fn new(serial: Serial) -> Self {
        SerialReporter { serial }
    }

    /// Give back the serial transmitter.
    pub fn into_inner(self) -> Serial {
        self.serial
    }

    fn write_str(&mut self, s: &str) -> Result<(), Serial::Error> {
        for &byte in s.as_bytes() {
            nb::block!(self.serial.write(byte))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Serial::Error> {
        nb::block!(self.serial.flush())
    }
}

impl<Serial> Reporter for SerialReporter<Serial>
where
    Serial: serial::Write<u8>,
{
    type Error = Serial::Error;

    fn banner(&mut self) -> Result<(), Self::Error> {
        self.write_str(BANNER)?;
        self.flush()
    }

    fn report(&mut self, distance: u16) -> Result<(), Self::Error> {
        let mut digits = itoa::Buffer::new();
        self.write_str("Distance: ")?;
        self.write_str(digits.format(distance))?;
        self.write_str(" cm\r\n")?;
        self.flush()
    }
}
