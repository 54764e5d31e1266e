//! Radio module interface
//!
//! The transceiver module (SA818/DRA818 family) is configured over its own
//! serial port with AT commands. The bridge only forwards tuning and filter
//! requests; [`Sa818`] is the thin pass-through driver.

use core::fmt::{self, Write as _};

use embedded_io::{Read, ReadReady, Write};
use heapless::String;

use crate::config::RADIO_RESPONSE_TIMEOUT_US;
use crate::port::Clock;
use crate::types::{FilterConfig, TuneRequest};

/// Longest AT command or response line
pub const MAX_AT_LEN: usize = 64;

/// Radio module failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioError {
    /// Serial port error
    Io,
    /// Module answered with a failure status
    Rejected,
    /// No answer within the response timeout
    NoResponse,
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "radio serial error"),
            Self::Rejected => write!(f, "radio rejected command"),
            Self::NoResponse => write!(f, "radio did not respond"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Io => defmt::write!(f, "Io"),
            Self::Rejected => defmt::write!(f, "Rejected"),
            Self::NoResponse => defmt::write!(f, "NoResponse"),
        }
    }
}

/// Radio module collaborator
pub trait RadioModule {
    /// Program transmit/receive frequency, tone and squelch
    fn tune(&mut self, request: &TuneRequest) -> Result<(), RadioError>;

    /// Program the audio filters
    fn set_filters(&mut self, filters: FilterConfig) -> Result<(), RadioError>;
}

/// AT command formatter
pub struct AtCommand {
    buffer: String<MAX_AT_LEN>,
}

impl AtCommand {
    /// Create an empty command
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Format the connection handshake
    pub fn handshake(&mut self) {
        self.buffer.clear();
        let _ = self.buffer.push_str("AT+DMOCONNECT\r\n");
    }

    /// Format a channel group (12.5 kHz bandwidth, same tone both ways)
    pub fn group(&mut self, req: &TuneRequest) {
        self.buffer.clear();
        let _ = write!(
            self.buffer,
            "AT+DMOSETGROUP=0,{},{},{:04},{},{:04}\r\n",
            req.tx,
            req.rx,
            req.tone.code(),
            req.squelch.level(),
            req.tone.code()
        );
    }

    /// Format the filter switches (`1` = filter enabled)
    pub fn filters(&mut self, filters: FilterConfig) {
        self.buffer.clear();
        let _ = write!(
            self.buffer,
            "AT+SETFILTER={},{},{}\r\n",
            u8::from(filters.emphasis),
            u8::from(filters.highpass),
            u8::from(filters.lowpass)
        );
    }

    /// Format a volume setting (clamped to 1-8)
    pub fn volume(&mut self, level: u8) {
        self.buffer.clear();
        let _ = write!(self.buffer, "AT+DMOSETVOLUME={}\r\n", level.clamp(1, 8));
    }

    /// Get the command string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the command bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }
}

impl Default for AtCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret a response line such as `+DMOSETGROUP:0`
pub fn parse_status(line: &[u8]) -> Result<(), RadioError> {
    let line = core::str::from_utf8(line).map_err(|_| RadioError::Io)?.trim();
    if !line.starts_with('+') {
        return Err(RadioError::NoResponse);
    }
    match line.rsplit_once(':') {
        Some((_, "0")) => Ok(()),
        Some(_) => Err(RadioError::Rejected),
        None => Err(RadioError::NoResponse),
    }
}

/// SA818 driver over any blocking serial port
pub struct Sa818<U, K> {
    uart: U,
    clock: K,
    command: AtCommand,
}

impl<U, K> Sa818<U, K>
where
    U: Read + Write + ReadReady,
    K: Clock,
{
    /// Wrap a serial port
    pub fn new(uart: U, clock: K) -> Self {
        Self {
            uart,
            clock,
            command: AtCommand::new(),
        }
    }

    /// Check the module is alive
    pub fn handshake(&mut self) -> Result<(), RadioError> {
        self.command.handshake();
        self.transact()
    }

    /// Set speaker volume
    pub fn set_volume(&mut self, level: u8) -> Result<(), RadioError> {
        self.command.volume(level);
        self.transact()
    }

    /// Borrow the serial port
    pub fn uart(&self) -> &U {
        &self.uart
    }

    fn transact(&mut self) -> Result<(), RadioError> {
        self.uart
            .write_all(self.command.as_bytes())
            .map_err(|_| RadioError::Io)?;
        self.uart.flush().map_err(|_| RadioError::Io)?;

        let mut line: heapless::Vec<u8, MAX_AT_LEN> = heapless::Vec::new();
        let start = self.clock.now();
        while self.clock.now().since(start) < RADIO_RESPONSE_TIMEOUT_US {
            if !self.uart.read_ready().map_err(|_| RadioError::Io)? {
                continue;
            }
            let mut byte = [0u8; 1];
            if self.uart.read(&mut byte).map_err(|_| RadioError::Io)? == 0 {
                continue;
            }
            match byte[0] {
                b'\n' if !line.is_empty() => return parse_status(&line),
                b'\r' | b'\n' => {}
                b => {
                    if line.push(b).is_err() {
                        line.clear();
                    }
                }
            }
        }
        Err(RadioError::NoResponse)
    }
}

impl<U, K> RadioModule for Sa818<U, K>
where
    U: Read + Write + ReadReady,
    K: Clock,
{
    fn tune(&mut self, request: &TuneRequest) -> Result<(), RadioError> {
        self.command.group(request);
        self.transact()
    }

    fn set_filters(&mut self, filters: FilterConfig) -> Result<(), RadioError> {
        self.command.filters(filters);
        self.transact()
    }
}
