//! Main-loop orchestration
//!
//! [`Bridge::poll`] runs one iteration of the cooperative main loop:
//!
//! ```text
//! feed watchdog
//! Receive:  [frame waiting?] read + dispatch command ─▶ drain rx ring ─▶ host
//! Transmit: [runaway?] force RX ─or─ host ─▶ delimiter scan ─▶ tx buffers
//! ```
//!
//! A command read in an iteration is fully dispatched (or abandoned)
//! before anything else happens in that iteration. The audio buffers
//! themselves advance only with the sampler interrupt and real time, not
//! with the number of loop iterations.

use heapless::Vec;

use super::mode::ModeController;
use super::module::RadioModule;
use crate::audio::sampler::LoopPort;
use crate::config::{
    DELIMITER_LEN, PARAM_TIMEOUT_US, RX_MIN_SEND, SILENCE_SAMPLE, TX_MAX_BYTES_PER_POLL,
    TX_READ_CHUNK,
};
use crate::port::{Clock, ControlLine, HostLink, Watchdog};
use crate::protocol::command::Command;
use crate::protocol::framer::DelimiterScanner;
use crate::protocol::reader::read_command;
use crate::protocol::{ProtocolError, Selector};
use crate::types::Mode;

/// What one loop iteration did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Command dispatched this iteration
    pub command: Option<Command>,
    /// Command frame abandoned this iteration
    pub abandoned: Option<ProtocolError>,
    /// Receive bytes sent to the host
    pub sent: usize,
    /// Transmit payload bytes accepted into the buffers
    pub ingested: usize,
    /// Transmit payload bytes dropped
    pub dropped: usize,
    /// Runaway guard forced receive mode
    pub runaway: bool,
}

#[cfg(feature = "embedded")]
impl defmt::Format for PollReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Poll(cmd={}, abandoned={}, sent={}, ingested={}, runaway={})",
            self.command,
            self.abandoned,
            self.sent,
            self.ingested,
            self.runaway
        );
    }
}

/// Running counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Commands dispatched
    pub commands: u32,
    /// Command frames abandoned
    pub abandoned: u32,
    /// Forced returns to receive
    pub runaway_trips: u32,
    /// Transmit buffer role swaps
    pub tx_swaps: u32,
    /// Receive bytes sent to the host
    pub rx_sent: u32,
    /// Radio module requests that failed
    pub radio_errors: u32,
}

/// Cooperative main loop state
pub struct Bridge<'a, L, C, R, K, W, const RX: usize, const TX: usize> {
    audio: LoopPort<'a, RX, TX>,
    link: L,
    control: C,
    radio: R,
    clock: K,
    watchdog: W,
    mode: ModeController,
    scanner: DelimiterScanner,
    scratch: [u8; RX],
    stats: BridgeStats,
}

impl<'a, L, C, R, K, W, const RX: usize, const TX: usize> Bridge<'a, L, C, R, K, W, RX, TX>
where
    L: HostLink,
    C: ControlLine,
    R: RadioModule,
    K: Clock,
    W: Watchdog,
{
    /// Assemble the loop. The bridge starts in receive mode with transmit
    /// enable released.
    pub fn new(
        audio: LoopPort<'a, RX, TX>,
        link: L,
        control: C,
        radio: R,
        clock: K,
        watchdog: W,
    ) -> Self {
        Self::with_mode_controller(
            audio,
            link,
            control,
            radio,
            clock,
            watchdog,
            ModeController::new(),
        )
    }

    /// Assemble the loop with a preconfigured mode controller
    #[allow(clippy::too_many_arguments)]
    pub fn with_mode_controller(
        mut audio: LoopPort<'a, RX, TX>,
        link: L,
        mut control: C,
        radio: R,
        clock: K,
        watchdog: W,
        mut mode: ModeController,
    ) -> Self {
        mode.enter_receive(&mut audio, &mut control);
        Self {
            audio,
            link,
            control,
            radio,
            clock,
            watchdog,
            mode,
            scanner: DelimiterScanner::new(),
            scratch: [0; RX],
            stats: BridgeStats::default(),
        }
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        loop {
            let _ = self.poll();
        }
    }

    /// One main-loop iteration
    pub fn poll(&mut self) -> PollReport {
        self.watchdog.feed();

        let mut report = PollReport::default();
        match self.mode.mode() {
            Mode::Receive => {
                self.service_commands(&mut report);
                if !self.mode.mode().is_transmit() {
                    report.sent = self.drain_rx();
                }
            }
            Mode::Transmit => {
                if self.mode.runaway(self.clock.now()) {
                    warn!("transmit runaway, forcing RX");
                    self.mode.enter_receive(&mut self.audio, &mut self.control);
                    self.stats.runaway_trips = self.stats.runaway_trips.saturating_add(1);
                    report.runaway = true;
                } else {
                    self.stream_tx(&mut report);
                }
            }
        }
        report
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Mode controller state
    #[must_use]
    pub const fn mode_controller(&self) -> &ModeController {
        &self.mode
    }

    /// Running counters
    #[must_use]
    pub const fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// Audio buffer access (main-loop side)
    #[must_use]
    pub const fn audio(&self) -> &LoopPort<'a, RX, TX> {
        &self.audio
    }

    /// Host link
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Host link
    #[must_use]
    pub const fn link(&self) -> &L {
        &self.link
    }

    /// Radio control lines
    #[must_use]
    pub const fn control(&self) -> &C {
        &self.control
    }

    /// Radio control lines
    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    /// Radio module
    #[must_use]
    pub const fn radio(&self) -> &R {
        &self.radio
    }

    fn service_commands(&mut self, report: &mut PollReport) {
        if self.link.available() == 0 {
            return;
        }

        match read_command(&mut self.link, &self.clock, PARAM_TIMEOUT_US) {
            Ok(command) => {
                report.command = Some(command);
                self.stats.commands = self.stats.commands.saturating_add(1);
                self.dispatch(command);
            }
            Err(err) => {
                match err {
                    ProtocolError::Timeout | ProtocolError::InvalidField(_) => {
                        warn!("command abandoned: {}", err);
                    }
                    ProtocolError::MisalignedFrame | ProtocolError::UnknownSelector(_) => {
                        debug!("frame ignored: {}", err);
                    }
                }
                report.abandoned = Some(err);
                self.stats.abandoned = self.stats.abandoned.saturating_add(1);
            }
        }
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::PttDown => {
                self.scanner.reset();
                let now = self.clock.now();
                self.mode.enter_transmit(&mut self.audio, &mut self.control, now);
            }
            Command::PttUp => {
                debug!("PTT_UP outside transmit ignored");
            }
            Command::TuneTo(request) => {
                self.mode.enter_receive(&mut self.audio, &mut self.control);
                if let Err(err) = self.radio.tune(&request) {
                    error!("tune failed: {}", err);
                    self.stats.radio_errors = self.stats.radio_errors.saturating_add(1);
                }
            }
            Command::Filters(filters) => {
                if let Err(err) = self.radio.set_filters(filters) {
                    error!("filter update failed: {}", err);
                    self.stats.radio_errors = self.stats.radio_errors.saturating_add(1);
                }
            }
        }
    }

    /// Send buffered receive audio, muted while squelched
    fn drain_rx(&mut self) -> usize {
        if self.audio.rx.pending() < RX_MIN_SEND {
            return 0;
        }

        let sent = self.audio.rx.drain_into(&mut self.scratch);
        let run = &mut self.scratch[..sent];
        if self.control.squelch_active() {
            run.fill(SILENCE_SAMPLE);
        }
        self.link.write_bytes(run);

        self.stats.rx_sent = self
            .stats
            .rx_sent
            .saturating_add(u32::try_from(sent).unwrap_or(u32::MAX));
        sent
    }

    /// Move host bytes into the transmit buffers, watching for `PTT_UP`.
    ///
    /// Bytes are taken one at a time so nothing past the `PTT_UP` selector
    /// is consumed; whatever follows it is read by the receive path.
    /// Payload is handed to the buffers in runs of [`TX_READ_CHUNK`].
    fn stream_tx(&mut self, report: &mut PollReport) {
        let mut payload: Vec<u8, { TX_READ_CHUNK + DELIMITER_LEN }> = Vec::new();
        let mut overflow = 0;

        for _ in 0..TX_MAX_BYTES_PER_POLL {
            if self.link.available() == 0 {
                break;
            }
            let Some(byte) = self.link.read_byte(0) else {
                break;
            };

            let selector = self.scanner.feed_into(byte, &mut payload, &mut overflow);
            if payload.len() >= TX_READ_CHUNK || selector.is_some() {
                self.ingest_payload(&payload, overflow, report);
                payload.clear();
                overflow = 0;
            }

            let Some(selector) = selector else {
                continue;
            };
            if Selector::from_byte(selector) == Some(Selector::PttUp) {
                report.command = Some(Command::PttUp);
                self.stats.commands = self.stats.commands.saturating_add(1);
                self.mode.enter_receive(&mut self.audio, &mut self.control);
                return;
            }
            debug!("selector {} ignored while transmitting", selector);
        }

        self.ingest_payload(&payload, overflow, report);
    }

    fn ingest_payload(&mut self, payload: &[u8], overflow: usize, report: &mut PollReport) {
        report.dropped += overflow;
        if payload.is_empty() {
            return;
        }

        let ingest = self.audio.tx.ingest(payload, self.clock.now());
        report.ingested += ingest.accepted;
        report.dropped += ingest.dropped;
        if ingest.swapped {
            self.stats.tx_swaps = self.stats.tx_swaps.saturating_add(1);
        }
        if ingest.dropped > 0 {
            debug!("tx buffer full, dropped {}", ingest.dropped);
        }
    }
}
