//! Command decoding
//!
//! Turns a selector and its parameter bytes into a [`Command`]. A command is
//! only produced when every field parses, so a rejected frame never has a
//! partial effect.

use super::{Field, ProtocolError, Selector};
use crate::types::{FilterConfig, Frequency, SquelchLevel, ToneCode, TuneRequest};

/// Decoded host command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Enter transmit mode
    PttDown,
    /// Leave transmit mode
    PttUp,
    /// Force receive mode and retune the radio module
    TuneTo(TuneRequest),
    /// Reprogram the radio module's audio filters
    Filters(FilterConfig),
}

impl Command {
    /// Decode `params` for `selector`.
    ///
    /// `params` must hold exactly [`Selector::param_len`] bytes.
    pub fn parse(selector: Selector, params: &[u8]) -> Result<Self, ProtocolError> {
        match selector {
            Selector::PttDown => Ok(Self::PttDown),
            Selector::PttUp => Ok(Self::PttUp),
            Selector::TuneTo => parse_tune(params).map(Self::TuneTo),
            Selector::Filters => FilterConfig::parse(params)
                .map(Self::Filters)
                .ok_or(ProtocolError::InvalidField(Field::FilterFlags)),
        }
    }

    /// Selector this command travels under
    #[must_use]
    pub const fn selector(&self) -> Selector {
        match self {
            Self::PttDown => Selector::PttDown,
            Self::PttUp => Selector::PttUp,
            Self::TuneTo(_) => Selector::TuneTo,
            Self::Filters(_) => Selector::Filters,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::PttDown => defmt::write!(f, "PTT_DOWN"),
            Self::PttUp => defmt::write!(f, "PTT_UP"),
            Self::TuneTo(req) => defmt::write!(f, "TUNE_TO({})", req),
            Self::Filters(cfg) => defmt::write!(f, "FILTERS({})", cfg),
        }
    }
}

// tx freq (7) | rx freq (7) | tone (2) | squelch (1)
fn parse_tune(params: &[u8]) -> Result<TuneRequest, ProtocolError> {
    if params.len() != Selector::TuneTo.param_len() {
        return Err(ProtocolError::InvalidField(Field::TxFrequency));
    }
    let (tx, rest) = params.split_at(7);
    let (rx, rest) = rest.split_at(7);
    let (tone, squelch) = rest.split_at(2);

    Ok(TuneRequest {
        tx: Frequency::parse_mhz(tx).ok_or(ProtocolError::InvalidField(Field::TxFrequency))?,
        rx: Frequency::parse_mhz(rx).ok_or(ProtocolError::InvalidField(Field::RxFrequency))?,
        tone: ToneCode::parse(tone).ok_or(ProtocolError::InvalidField(Field::Tone))?,
        squelch: squelch
            .first()
            .copied()
            .and_then(SquelchLevel::parse)
            .ok_or(ProtocolError::InvalidField(Field::Squelch))?,
    })
}
