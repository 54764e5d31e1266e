//! Host test doubles for the bridge collaborator traits

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use fm_bridge::port::{AudioLine, Clock, ControlLine, HostLink, Watchdog};
use fm_bridge::radio::module::{RadioError, RadioModule};
use fm_bridge::types::{FilterConfig, Micros, TuneRequest};

// ============================================================================
// Clocks
// ============================================================================

/// Manually advanced clock, shared between clones
#[derive(Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<u32>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(us: u32) -> Self {
        let clock = Self::default();
        clock.set(us);
        clock
    }

    pub fn set(&self, us: u32) {
        self.now.set(us);
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }

    pub fn raw(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for SimClock {
    fn now(&self) -> Micros {
        Micros::from_raw(self.now.get())
    }
}

/// Clock that moves forward by `step_us` every time it is read
#[derive(Clone)]
pub struct AutoClock {
    now: Rc<Cell<u32>>,
    step_us: u32,
}

impl AutoClock {
    pub fn new(step_us: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            step_us,
        }
    }

    pub fn raw(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for AutoClock {
    fn now(&self) -> Micros {
        let t = self.now.get();
        self.now.set(t.wrapping_add(self.step_us));
        Micros::from_raw(t)
    }
}

// ============================================================================
// Host link
// ============================================================================

/// Host link fed from a script of timed bytes
///
/// A byte becomes readable once the shared clock reaches its arrival time.
/// Waiting in `read_byte` advances the clock.
pub struct ScriptedLink {
    clock: SimClock,
    incoming: VecDeque<(u32, u8)>,
    pub sent: Vec<u8>,
    pub writes: usize,
}

impl ScriptedLink {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            incoming: VecDeque::new(),
            sent: Vec::new(),
            writes: 0,
        }
    }

    /// Queue bytes available immediately
    pub fn push(&mut self, bytes: &[u8]) {
        let now = self.clock.raw();
        self.push_at(now, bytes);
    }

    /// Queue bytes arriving at `at_us`
    pub fn push_at(&mut self, at_us: u32, bytes: &[u8]) {
        for &b in bytes {
            self.incoming.push_back((at_us, b));
        }
    }

    /// Queue bytes arriving `gap_us` apart, the first one `gap_us` from now
    pub fn push_spaced(&mut self, gap_us: u32, bytes: &[u8]) {
        let mut at = self.clock.raw();
        for &b in bytes {
            at += gap_us;
            self.incoming.push_back((at, b));
        }
    }

    /// Bytes still queued
    pub fn remaining(&self) -> usize {
        self.incoming.len()
    }
}

impl HostLink for ScriptedLink {
    fn available(&mut self) -> usize {
        let now = self.clock.raw();
        self.incoming.iter().take_while(|(at, _)| *at <= now).count()
    }

    fn read_byte(&mut self, timeout_us: u32) -> Option<u8> {
        let now = self.clock.raw();
        match self.incoming.front().copied() {
            Some((at, byte)) if at <= now => {
                self.incoming.pop_front();
                Some(byte)
            }
            Some((at, byte)) if at - now <= timeout_us => {
                self.clock.set(at);
                self.incoming.pop_front();
                Some(byte)
            }
            _ => {
                self.clock.advance(timeout_us);
                None
            }
        }
    }

    fn write_bytes(&mut self, data: &[u8]) {
        self.sent.extend_from_slice(data);
        self.writes += 1;
    }
}

// ============================================================================
// Radio lines
// ============================================================================

/// Control line that records every change
#[derive(Default)]
pub struct RecordingControl {
    pub ptt: bool,
    pub indicator: bool,
    pub squelch: bool,
    pub ptt_history: Vec<bool>,
}

impl RecordingControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn squelched() -> Self {
        Self {
            squelch: true,
            ..Self::default()
        }
    }
}

impl ControlLine for RecordingControl {
    fn set_transmit_enable(&mut self, enabled: bool) {
        self.ptt = enabled;
        self.ptt_history.push(enabled);
    }

    fn squelch_active(&self) -> bool {
        self.squelch
    }

    fn set_indicator(&mut self, on: bool) {
        self.indicator = on;
    }
}

/// Audio line reading from a script and recording output
#[derive(Default)]
pub struct ScriptedLine {
    pub input: VecDeque<Option<u8>>,
    pub output: Vec<u8>,
}

impl ScriptedLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(samples: &[u8]) -> Self {
        Self {
            input: samples.iter().copied().map(Some).collect(),
            output: Vec::new(),
        }
    }
}

impl AudioLine for ScriptedLine {
    fn read_sample(&mut self) -> Option<u8> {
        self.input.pop_front().unwrap_or(Some(128))
    }

    fn write_sample(&mut self, sample: u8) {
        self.output.push(sample);
    }
}

// ============================================================================
// Radio module and watchdog
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioCall {
    Tune(TuneRequest),
    Filters(FilterConfig),
}

/// Radio module that records requests
#[derive(Default)]
pub struct RecordingRadio {
    pub calls: Vec<RadioCall>,
    pub fail: bool,
}

impl RecordingRadio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    fn result(&self) -> Result<(), RadioError> {
        if self.fail {
            Err(RadioError::NoResponse)
        } else {
            Ok(())
        }
    }
}

impl RadioModule for RecordingRadio {
    fn tune(&mut self, request: &TuneRequest) -> Result<(), RadioError> {
        self.calls.push(RadioCall::Tune(*request));
        self.result()
    }

    fn set_filters(&mut self, filters: FilterConfig) -> Result<(), RadioError> {
        self.calls.push(RadioCall::Filters(filters));
        self.result()
    }
}

/// Watchdog counting feeds
#[derive(Clone, Default)]
pub struct CountingWatchdog {
    feeds: Rc<Cell<u32>>,
}

impl CountingWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feeds(&self) -> u32 {
        self.feeds.get()
    }
}

impl Watchdog for CountingWatchdog {
    fn feed(&mut self) {
        self.feeds.set(self.feeds.get() + 1);
    }
}

// ============================================================================
// Serial port
// ============================================================================

/// In-memory serial port
#[derive(Default)]
pub struct MockUart {
    pub rx: VecDeque<u8>,
    pub written: Vec<u8>,
    pub flushes: usize,
}

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(bytes: &[u8]) -> Self {
        Self {
            rx: bytes.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn written_str(&self) -> &str {
        std::str::from_utf8(&self.written).unwrap()
    }
}

impl embedded_io::ErrorType for MockUart {
    type Error = Infallible;
}

impl embedded_io::Read for MockUart {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io::ReadReady for MockUart {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty())
    }
}

impl embedded_io::Write for MockUart {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

// ============================================================================
// Stream helpers
// ============================================================================

/// Audio bytes that never look like delimiter bytes
pub fn audio_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 200) as u8 + 20).collect()
}
