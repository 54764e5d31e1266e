//! Transmit runaway guard
//!
//! Bounds continuous transmit time so a stuck or misbehaving host cannot
//! hold the transmitter keyed.

use crate::config::RUNAWAY_TX_LIMIT_US;
use crate::types::Micros;

/// Maximum transmit duration tracker
#[derive(Clone, Copy, Debug)]
pub struct RunawayGuard {
    started: Option<Micros>,
    limit_us: u32,
}

impl RunawayGuard {
    /// Guard with the configured limit
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(RUNAWAY_TX_LIMIT_US)
    }

    /// Guard with a custom limit
    #[must_use]
    pub const fn with_limit(limit_us: u32) -> Self {
        Self {
            started: None,
            limit_us,
        }
    }

    /// Record the start of a transmission
    pub fn start(&mut self, now: Micros) {
        self.started = Some(now);
    }

    /// Forget the current transmission
    pub fn clear(&mut self) {
        self.started = None;
    }

    /// Transmit start, if armed
    #[must_use]
    pub const fn started(&self) -> Option<Micros> {
        self.started
    }

    /// Time spent transmitting so far
    #[must_use]
    pub fn elapsed(&self, now: Micros) -> Option<u32> {
        self.started.map(|start| now.since(start))
    }

    /// True once the current transmission has run past the limit
    #[must_use]
    pub fn expired(&self, now: Micros) -> bool {
        self.elapsed(now).is_some_and(|us| us > self.limit_us)
    }
}

impl Default for RunawayGuard {
    fn default() -> Self {
        Self::new()
    }
}
