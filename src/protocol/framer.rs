//! Delimiter scanner for the transmit audio stream
//!
//! While transmitting, control frames (`delimiter + PTT_UP`) travel inside
//! the audio byte stream. Every byte passes through [`DelimiterScanner`]
//! before it is classified as payload.
//!
//! Matching is strict: a byte that does not extend the current match
//! resets progress to zero and is itself treated as payload, even when it
//! equals the first delimiter byte. Bytes that extend a partial match are
//! held back; on a mismatch they are released in order ahead of the
//! mismatching byte, and on a full match they are dropped together with
//! the command byte.

use heapless::Vec;

use super::{DELIMITER, DELIMITER_LEN};

/// Scanner state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// `n` delimiter bytes matched so far (`0..DELIMITER_LEN`)
    Matching(usize),
    /// Full delimiter seen, next byte is a command selector
    Matched,
}

/// Classification of one scanned byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// Audio byte. The first `released` delimiter bytes, held back by an
    /// abandoned partial match, precede it in the stream.
    Payload {
        /// Held delimiter prefix length to emit first
        released: usize,
        /// The byte itself
        byte: u8,
    },
    /// Byte extended a partial delimiter match and is held back
    Held,
    /// Byte following a full delimiter
    Command(u8),
}

/// Tagged state machine recognising the delimiter in a byte stream
#[derive(Clone, Copy, Debug)]
pub struct DelimiterScanner {
    state: ScanState,
}

impl DelimiterScanner {
    /// Create a scanner with no progress
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ScanState::Matching(0),
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// True when the next byte will be taken as a command
    #[must_use]
    pub const fn matched(&self) -> bool {
        matches!(self.state, ScanState::Matched)
    }

    /// Drop any progress
    pub fn reset(&mut self) {
        self.state = ScanState::Matching(0);
    }

    /// Classify one byte
    pub fn feed(&mut self, byte: u8) -> ScanEvent {
        match self.state {
            ScanState::Matched => {
                self.state = ScanState::Matching(0);
                ScanEvent::Command(byte)
            }
            ScanState::Matching(n) if DELIMITER.get(n) == Some(&byte) => {
                self.state = if n + 1 == DELIMITER_LEN {
                    ScanState::Matched
                } else {
                    ScanState::Matching(n + 1)
                };
                ScanEvent::Held
            }
            ScanState::Matching(n) => {
                self.state = ScanState::Matching(0);
                ScanEvent::Payload {
                    released: n,
                    byte,
                }
            }
        }
    }

    /// Classify one byte, appending any payload it releases (held
    /// delimiter prefix first) to `payload`. Payload that does not fit is
    /// counted in `overflow`. Returns the selector when `byte` follows a
    /// full delimiter.
    pub fn feed_into<const CAP: usize>(
        &mut self,
        byte: u8,
        payload: &mut Vec<u8, CAP>,
        overflow: &mut usize,
    ) -> Option<u8> {
        match self.feed(byte) {
            ScanEvent::Held => None,
            ScanEvent::Payload { released, byte } => {
                for &b in held_prefix(released).iter().chain(core::iter::once(&byte)) {
                    if payload.push(b).is_err() {
                        *overflow += 1;
                    }
                }
                None
            }
            ScanEvent::Command(selector) => Some(selector),
        }
    }
}

impl Default for DelimiterScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Delimiter bytes held back by a partial match of length `released`
#[must_use]
pub fn held_prefix(released: usize) -> &'static [u8] {
    &DELIMITER[..released.min(DELIMITER_LEN)]
}
