//! Test doubles for the embedded-hal traits the driver consumes.

extern crate std;

use crate::timer::{Tick, TimerSource};
use core::cell::{Cell, RefCell};
use hal::blocking::delay::{DelayMs, DelayUs};
use hal::digital::v2::{InputPin, OutputPin};
use hal::serial;
use std::rc::Rc;
use std::vec::Vec;
use void::Void;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Set(&'static str, bool),
    DelayUs(u32),
    DelayMs(u32),
}

/// Shared, ordered record of everything the mocks were asked to do.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn take(&self) -> Vec<Event> {
        self.0.borrow_mut().drain(..).collect()
    }
}

pub struct MockOutput {
    log: Log,
    name: &'static str,
}

impl MockOutput {
    pub fn new(log: &Log, name: &'static str) -> Self {
        MockOutput {
            log: log.clone(),
            name,
        }
    }
}

impl OutputPin for MockOutput {
    type Error = Void;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Set(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Set(self.name, true));
        Ok(())
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        MockDelay { log: log.clone() }
    }
}

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::DelayUs(us));
    }
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::DelayMs(ms));
    }
}

/// Echo line replaying a fixed list of levels, one per read. Once the list
/// is exhausted the last level sticks.
pub struct ScriptedEcho {
    levels: Vec<bool>,
    reads: Rc<Cell<usize>>,
}

impl ScriptedEcho {
    pub fn new(levels: &[bool]) -> Self {
        ScriptedEcho {
            levels: levels.to_vec(),
            reads: Rc::new(Cell::new(0)),
        }
    }

    /// `low` reads low, then `high` reads high, then low forever.
    pub fn pulse(low: usize, high: usize) -> Self {
        let mut levels = Vec::new();
        levels.resize(low, false);
        levels.resize(low + high, true);
        levels.push(false);
        ScriptedEcho {
            levels,
            reads: Rc::new(Cell::new(0)),
        }
    }

    /// Handle to the number of reads performed so far.
    pub fn reads(&self) -> Rc<Cell<usize>> {
        self.reads.clone()
    }

    fn level(&self) -> bool {
        let n = self.reads.get();
        self.reads.set(n + 1);
        match self.levels.get(n) {
            Some(level) => *level,
            None => self.levels.last().copied().unwrap_or(false),
        }
    }
}

impl InputPin for ScriptedEcho {
    type Error = Void;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.level())
    }
}

/// Timer returning a fixed list of tick values, one per read.
pub struct ScriptedTimer {
    ticks: Vec<Tick>,
    reads: Cell<usize>,
}

impl ScriptedTimer {
    pub fn new(ticks: &[Tick]) -> Self {
        ScriptedTimer {
            ticks: ticks.to_vec(),
            reads: Cell::new(0),
        }
    }
}

impl TimerSource for ScriptedTimer {
    fn read_ticks(&self) -> Tick {
        let n = self.reads.get();
        self.reads.set(n + 1);
        self.ticks.get(n).copied().unwrap_or(0)
    }
}

/// Serial port collecting every written byte. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MockSerial {
    written: Rc<RefCell<Vec<u8>>>,
    flushes: Rc<Cell<usize>>,
}

impl MockSerial {
    pub fn text(&self) -> std::string::String {
        std::string::String::from_utf8(self.written.borrow().clone()).unwrap()
    }

    pub fn clear(&self) {
        self.written.borrow_mut().clear();
    }

    pub fn flushes(&self) -> usize {
        self.flushes.get()
    }
}

impl serial::Write<u8> for MockSerial {
    type Error = Void;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.written.borrow_mut().push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}

/// Serial port that refuses every byte.
pub struct BrokenSerial;

impl serial::Write<u8> for BrokenSerial {
    type Error = &'static str;

    fn write(&mut self, _word: u8) -> nb::Result<(), Self::Error> {
        Err(nb::Error::Other("tx fault"))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

/// Echo line whose every read fails.
pub struct BrokenEcho;

impl InputPin for BrokenEcho {
    type Error = &'static str;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Err("echo fault")
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Err("echo fault")
    }
}
