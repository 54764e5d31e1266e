//! Host command protocol
//!
//! Every command frame starts with the 8-byte delimiter
//! `FF 00 FF 00 FF 00 FF 00`, followed by a selector byte and, for some
//! selectors, fixed-length ASCII parameters.
//!
//! | Selector | Value | Parameters |
//! |---|---|---|
//! | `PTT_DOWN` | 1 | none |
//! | `PTT_UP` | 2 | none (only inside the transmit audio stream) |
//! | `TUNE_TO` | 3 | 17 bytes: tx freq (7), rx freq (7), tone (2), squelch (1) |
//! | `FILTERS` | 4 | 3 bytes: emphasis, highpass, lowpass flags |
//!
//! In receive mode frames arrive aligned and are read whole
//! ([`reader`]). In transmit mode they are embedded in the audio stream and
//! found by the [`framer`].

pub mod command;
pub mod framer;
pub mod reader;

use core::fmt;

pub use crate::config::{DELIMITER, DELIMITER_LEN};

/// Longest parameter block of any command
pub const MAX_PARAMS: usize = 17;

/// Command selector byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Key the transmitter
    PttDown,
    /// Release the transmitter
    PttUp,
    /// Program channel frequencies, tone and squelch
    TuneTo,
    /// Program audio filters
    Filters,
}

impl Selector {
    /// Decode a selector byte
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::PttDown),
            2 => Some(Self::PttUp),
            3 => Some(Self::TuneTo),
            4 => Some(Self::Filters),
            _ => None,
        }
    }

    /// Wire value
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::PttDown => 1,
            Self::PttUp => 2,
            Self::TuneTo => 3,
            Self::Filters => 4,
        }
    }

    /// Number of parameter bytes following the selector
    #[must_use]
    pub const fn param_len(self) -> usize {
        match self {
            Self::PttDown | Self::PttUp => 0,
            Self::TuneTo => 17,
            Self::Filters => 3,
        }
    }
}

/// Parameter field that failed validation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Transmit frequency
    TxFrequency,
    /// Receive frequency
    RxFrequency,
    /// CTCSS tone code
    Tone,
    /// Squelch level
    Squelch,
    /// Filter flags
    FilterFlags,
}

/// Reasons a command frame is abandoned
///
/// None of these are reported to the host; the frame is dropped without
/// side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    /// Bytes stopped arriving before the frame was complete
    Timeout,
    /// The frame did not start with the delimiter
    MisalignedFrame,
    /// Selector byte is not a known command
    UnknownSelector(u8),
    /// A parameter did not parse
    InvalidField(Field),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "command timed out"),
            Self::MisalignedFrame => write!(f, "frame does not start with delimiter"),
            Self::UnknownSelector(b) => write!(f, "unknown selector {b:#04x}"),
            Self::InvalidField(field) => write!(f, "invalid field {field:?}"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ProtocolError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Timeout => defmt::write!(f, "Timeout"),
            Self::MisalignedFrame => defmt::write!(f, "Misaligned"),
            Self::UnknownSelector(b) => defmt::write!(f, "UnknownSelector({=u8:#x})", b),
            Self::InvalidField(field) => match field {
                Field::TxFrequency => defmt::write!(f, "Invalid(tx)"),
                Field::RxFrequency => defmt::write!(f, "Invalid(rx)"),
                Field::Tone => defmt::write!(f, "Invalid(tone)"),
                Field::Squelch => defmt::write!(f, "Invalid(squelch)"),
                Field::FilterFlags => defmt::write!(f, "Invalid(filters)"),
            },
        }
    }
}

/// Encoded command frame
pub type Frame = heapless::Vec<u8, { DELIMITER_LEN + 1 + MAX_PARAMS }>;

/// Build a complete command frame (delimiter, selector, parameters).
///
/// Returns `None` when `params` is not exactly the selector's parameter
/// length. Used by host-side tooling and tests.
#[must_use]
pub fn encode_frame(selector: Selector, params: &[u8]) -> Option<Frame> {
    if params.len() != selector.param_len() {
        return None;
    }
    let mut frame = Frame::new();
    frame.extend_from_slice(&DELIMITER).ok()?;
    frame.push(selector.as_byte()).ok()?;
    frame.extend_from_slice(params).ok()?;
    Some(frame)
}
