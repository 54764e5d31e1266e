//! Receive/transmit mode controller
//!
//! Owns the bridge mode and applies the side effects of each transition to
//! the audio buffers, the radio control lines and the runaway guard.

use super::runaway::RunawayGuard;
use crate::audio::sampler::LoopPort;
use crate::port::ControlLine;
use crate::types::{Micros, Mode};

/// Mode state machine (`Receive` initially)
#[derive(Clone, Copy, Debug, Default)]
pub struct ModeController {
    mode: Mode,
    guard: RunawayGuard,
}

impl ModeController {
    /// Controller in receive mode with the configured runaway limit
    #[must_use]
    pub const fn new() -> Self {
        Self::with_guard(RunawayGuard::new())
    }

    /// Controller in receive mode with a specific guard
    #[must_use]
    pub const fn with_guard(guard: RunawayGuard) -> Self {
        Self {
            mode: Mode::Receive,
            guard,
        }
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Runaway guard state
    #[must_use]
    pub const fn guard(&self) -> &RunawayGuard {
        &self.guard
    }

    /// Key up: empty both transmit buffers (A filling), switch the sampler
    /// to playback, light the indicator, assert transmit enable and arm the
    /// runaway guard.
    pub fn enter_transmit<C: ControlLine, const RX: usize, const TX: usize>(
        &mut self,
        audio: &mut LoopPort<'_, RX, TX>,
        control: &mut C,
        now: Micros,
    ) {
        // Buffers must be empty before the sampler starts reading them
        audio.tx.reset();
        audio.publish_mode(Mode::Transmit);
        control.set_indicator(true);
        control.set_transmit_enable(true);
        self.guard.start(now);
        self.mode = Mode::Transmit;
        info!("mode -> TX");
    }

    /// Key down: switch the sampler back to capture, release transmit
    /// enable and disarm the runaway guard.
    pub fn enter_receive<C: ControlLine, const RX: usize, const TX: usize>(
        &mut self,
        audio: &mut LoopPort<'_, RX, TX>,
        control: &mut C,
    ) {
        let was = self.mode;
        audio.publish_mode(Mode::Receive);
        control.set_transmit_enable(false);
        control.set_indicator(false);
        self.guard.clear();
        self.mode = Mode::Receive;
        if was.is_transmit() {
            info!("mode -> RX");
        }
    }

    /// True when transmitting past the runaway limit
    #[must_use]
    pub fn runaway(&self, now: Micros) -> bool {
        self.mode.is_transmit() && self.guard.expired(now)
    }
}
