//! Transmit playback double buffer
//!
//! Two fixed buffers alternate between the *filling* role (written by the
//! main loop with host audio) and the *playing* role (read by the sampler
//! interrupt). The main loop is the only writer of the role flag and of the
//! filling buffer's length; the interrupt only reads.
//!
//! Roles swap when the filling buffer reaches `capacity - margin` bytes.
//! At that moment the just-filled buffer gets its start timestamp and
//! play-out duration, the role flag flips, and the other buffer is emptied
//! to become the next filling target.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, AtomicUsize, Ordering};

use super::playback::{buffer_duration_us, playback_index};
use crate::types::Micros;

/// Buffer identity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferId {
    /// First buffer
    A,
    /// Second buffer
    B,
}

impl BufferId {
    const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Result of one ingestion call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Ingest {
    /// Bytes appended to the filling buffer
    pub accepted: usize,
    /// Bytes dropped for lack of room
    pub dropped: usize,
    /// Whether the buffers swapped roles
    pub swapped: bool,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Ingest {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Ingest(ok={}, drop={}, swap={})",
            self.accepted,
            self.dropped,
            self.swapped
        );
    }
}

/// Double-buffered transmit audio store
pub struct TxDoubleBuffer<const N: usize> {
    buffers: [[AtomicU8; N]; 2],
    /// Filled length per buffer
    lens: [AtomicUsize; 2],
    /// Play start per buffer
    starts: [AtomicU32; 2],
    /// Play-out duration per buffer
    durations: [AtomicU32; 2],
    playing_is_a: AtomicBool,
    margin: usize,
    sample_rate_hz: u32,
}

impl<const N: usize> TxDoubleBuffer<N> {
    /// Create empty buffers with buffer A filling
    #[must_use]
    pub const fn new(margin: usize, sample_rate_hz: u32) -> Self {
        assert!(margin < N, "swap margin must be below capacity");

        Self {
            buffers: [const { [const { AtomicU8::new(0) }; N] }; 2],
            lens: [const { AtomicUsize::new(0) }; 2],
            starts: [const { AtomicU32::new(0) }; 2],
            durations: [const { AtomicU32::new(0) }; 2],
            playing_is_a: AtomicBool::new(false),
            margin,
            sample_rate_hz,
        }
    }

    /// Per-buffer capacity
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Fill level that triggers a role swap
    #[must_use]
    pub const fn swap_threshold(&self) -> usize {
        N - self.margin
    }

    /// Split into the filling and playing handles
    pub fn split(&mut self) -> (TxFiller<'_, N>, TxPlayer<'_, N>) {
        let buf: &Self = self;
        (TxFiller { buf, dropped: 0 }, TxPlayer { buf })
    }

    fn playing(&self, order: Ordering) -> BufferId {
        if self.playing_is_a.load(order) {
            BufferId::A
        } else {
            BufferId::B
        }
    }
}

/// Main-loop side: appends host audio and swaps roles
pub struct TxFiller<'a, const N: usize> {
    buf: &'a TxDoubleBuffer<N>,
    dropped: u32,
}

impl<const N: usize> TxFiller<'_, N> {
    /// Empty both buffers, buffer A filling
    pub fn reset(&mut self) {
        self.buf.playing_is_a.store(false, Ordering::Release);
        for len in &self.buf.lens {
            len.store(0, Ordering::Release);
        }
    }

    /// Buffer currently being played by the sampler
    #[must_use]
    pub fn playing(&self) -> BufferId {
        self.buf.playing(Ordering::Relaxed)
    }

    /// Buffer currently accepting host audio
    #[must_use]
    pub fn filling(&self) -> BufferId {
        self.playing().other()
    }

    /// Bytes in the filling buffer
    #[must_use]
    pub fn filling_len(&self) -> usize {
        self.buf.lens[self.filling().index()].load(Ordering::Relaxed)
    }

    /// Total bytes dropped since start-up
    #[must_use]
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Append payload bytes to the filling buffer.
    ///
    /// Bytes beyond the buffer's remaining room are dropped. Reaching the
    /// swap threshold hands the buffer to the sampler, timed from `now`.
    pub fn ingest(&mut self, data: &[u8], now: Micros) -> Ingest {
        let filling = self.filling();
        let slots = &self.buf.buffers[filling.index()];
        let len_cell = &self.buf.lens[filling.index()];

        let len = len_cell.load(Ordering::Relaxed);
        let take = data.len().min(N - len);
        for (slot, &byte) in slots[len..len + take].iter().zip(data) {
            slot.store(byte, Ordering::Relaxed);
        }
        let new_len = len + take;
        len_cell.store(new_len, Ordering::Release);

        let dropped = data.len() - take;
        self.dropped = self
            .dropped
            .saturating_add(u32::try_from(dropped).unwrap_or(u32::MAX));

        let swapped = new_len >= self.buf.swap_threshold();
        if swapped {
            self.swap(filling, new_len, now);
        }

        Ingest {
            accepted: take,
            dropped,
            swapped,
        }
    }

    fn swap(&mut self, filled: BufferId, len: usize, now: Micros) {
        let i = filled.index();
        self.buf.starts[i].store(now.as_raw(), Ordering::Relaxed);
        self.buf.durations[i].store(
            buffer_duration_us(len, self.buf.sample_rate_hz),
            Ordering::Relaxed,
        );
        // Publishes start and duration together with the role change
        self.buf
            .playing_is_a
            .store(filled == BufferId::A, Ordering::Release);
        self.buf.lens[filled.other().index()].store(0, Ordering::Release);
    }
}

/// Interrupt side: reads the playing buffer at the time-derived index
pub struct TxPlayer<'a, const N: usize> {
    buf: &'a TxDoubleBuffer<N>,
}

impl<const N: usize> TxPlayer<'_, N> {
    /// Index into the playing buffer for `now`, if its play-out is running
    #[must_use]
    pub fn index_at(&self, now: Micros) -> Option<usize> {
        self.locate(now).map(|(_, idx)| idx)
    }

    /// Sample to emit at `now`, or `None` when nothing is due
    #[inline]
    #[must_use]
    pub fn sample_at(&self, now: Micros) -> Option<u8> {
        let (playing, idx) = self.locate(now)?;
        self.buf.buffers[playing]
            .get(idx)
            .map(|slot| slot.load(Ordering::Relaxed))
    }

    fn locate(&self, now: Micros) -> Option<(usize, usize)> {
        let playing = self.buf.playing(Ordering::Acquire).index();
        let len = self.buf.lens[playing].load(Ordering::Acquire);
        let start = Micros::from_raw(self.buf.starts[playing].load(Ordering::Relaxed));
        let duration = self.buf.durations[playing].load(Ordering::Relaxed);
        playback_index(now.since(start), len, duration).map(|idx| (playing, idx))
    }
}
