//! Periodic sampler and the shared audio state
//!
//! [`SharedAudio`] is the one piece of state touched from both the sampler
//! interrupt and the main loop. It is split once into a [`SamplerPort`]
//! (interrupt side) and a [`LoopPort`] (main-loop side); each cursor, length
//! and flag inside has exactly one writing port.

use core::sync::atomic::{AtomicBool, Ordering};

use super::rx_ring::{RxConsumer, RxProducer, RxRing};
use super::tx_buffer::{TxDoubleBuffer, TxFiller, TxPlayer};
use crate::port::AudioLine;
use crate::types::{Micros, Mode};

/// Audio buffers plus the mode flag the interrupt dispatches on
pub struct SharedAudio<const RX: usize, const TX: usize> {
    rx: RxRing<RX>,
    tx: TxDoubleBuffer<TX>,
    transmitting: AtomicBool,
}

impl<const RX: usize, const TX: usize> SharedAudio<RX, TX> {
    /// Create the shared state in receive mode
    #[must_use]
    pub const fn new(tx_margin: usize, sample_rate_hz: u32) -> Self {
        Self {
            rx: RxRing::new(),
            tx: TxDoubleBuffer::new(tx_margin, sample_rate_hz),
            transmitting: AtomicBool::new(false),
        }
    }

    /// Split into the interrupt-side and main-loop-side ports
    pub fn split(&mut self) -> (SamplerPort<'_, RX, TX>, LoopPort<'_, RX, TX>) {
        let (rx_producer, rx_consumer) = self.rx.split();
        let (tx_filler, tx_player) = self.tx.split();
        let transmitting = &self.transmitting;

        (
            SamplerPort {
                rx: rx_producer,
                tx: tx_player,
                transmitting,
            },
            LoopPort {
                rx: rx_consumer,
                tx: tx_filler,
                transmitting,
            },
        )
    }
}

fn mode_of(flag: &AtomicBool) -> Mode {
    if flag.load(Ordering::Acquire) {
        Mode::Transmit
    } else {
        Mode::Receive
    }
}

/// Interrupt-side access: receive producer and transmit player
pub struct SamplerPort<'a, const RX: usize, const TX: usize> {
    rx: RxProducer<'a, RX>,
    tx: TxPlayer<'a, TX>,
    transmitting: &'a AtomicBool,
}

impl<const RX: usize, const TX: usize> SamplerPort<'_, RX, TX> {
    /// Mode as last published by the main loop
    #[must_use]
    pub fn mode(&self) -> Mode {
        mode_of(self.transmitting)
    }
}

/// Main-loop access: receive consumer, transmit filler, mode flag
pub struct LoopPort<'a, const RX: usize, const TX: usize> {
    /// Receive ring consumer
    pub rx: RxConsumer<'a, RX>,
    /// Transmit buffer filler
    pub tx: TxFiller<'a, TX>,
    transmitting: &'a AtomicBool,
}

impl<const RX: usize, const TX: usize> LoopPort<'_, RX, TX> {
    /// Publish the mode the sampler should follow
    pub fn publish_mode(&self, mode: Mode) {
        self.transmitting
            .store(mode.is_transmit(), Ordering::Release);
    }

    /// Mode the sampler currently follows
    #[must_use]
    pub fn published_mode(&self) -> Mode {
        mode_of(self.transmitting)
    }
}

/// What one sampler tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Receive: sample stored in the ring
    Captured(u8),
    /// Transmit: sample written to the output
    Played(u8),
    /// Transmit: nothing due this tick
    Idle,
    /// Receive: input fault, tick skipped
    Faulted,
}

/// Fixed-period interrupt handler body
///
/// Every call is O(1): one sample in or one sample out. It never blocks,
/// never allocates, and never touches the host link.
pub struct PeriodicSampler<'a, A: AudioLine, const RX: usize, const TX: usize> {
    port: SamplerPort<'a, RX, TX>,
    line: A,
    faults: u32,
}

impl<'a, A: AudioLine, const RX: usize, const TX: usize> PeriodicSampler<'a, A, RX, TX> {
    /// Bind the sampler to its port and audio line
    pub fn new(port: SamplerPort<'a, RX, TX>, line: A) -> Self {
        Self {
            port,
            line,
            faults: 0,
        }
    }

    /// Run one period
    #[inline]
    pub fn tick(&mut self, now: Micros) -> TickOutcome {
        match self.port.mode() {
            Mode::Receive => match self.line.read_sample() {
                Some(sample) => {
                    self.port.rx.push(sample);
                    TickOutcome::Captured(sample)
                }
                None => {
                    self.faults = self.faults.wrapping_add(1);
                    TickOutcome::Faulted
                }
            },
            Mode::Transmit => match self.port.tx.sample_at(now) {
                Some(sample) => {
                    self.line.write_sample(sample);
                    TickOutcome::Played(sample)
                }
                None => TickOutcome::Idle,
            },
        }
    }

    /// Ticks skipped because of input faults
    #[must_use]
    pub const fn faults(&self) -> u32 {
        self.faults
    }

    /// Audio line in use
    #[must_use]
    pub const fn line(&self) -> &A {
        &self.line
    }

    /// Audio line in use
    pub fn line_mut(&mut self) -> &mut A {
        &mut self.line
    }
}
