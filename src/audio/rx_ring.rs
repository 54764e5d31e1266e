//! Receive sample ring
//!
//! Fixed-capacity circular byte buffer between the sampler interrupt
//! (producer) and the main loop (consumer).
//!
//! Both cursors are kept modulo the capacity. The producer is the only
//! writer of `tail`, the consumer the only writer of `head`, so no lock is
//! needed: each side publishes its cursor with `Release` and observes the
//! other with `Acquire`. Slots are atomics as well, so copies out of the
//! ring are byte-wise.
//!
//! Overflow policy: the producer never checks for room. If the consumer
//! falls a full lap behind, the oldest unsent bytes are overwritten and the
//! apparent backlog wraps; what the consumer then reads is still an
//! in-order run of the most recent samples.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Single-producer/single-consumer circular byte buffer
pub struct RxRing<const N: usize> {
    slots: [AtomicU8; N],
    /// Next unsent byte (consumer-owned)
    head: AtomicUsize,
    /// Next write slot (producer-owned)
    tail: AtomicUsize,
}

impl<const N: usize> RxRing<N> {
    /// Create an empty ring
    #[must_use]
    pub const fn new() -> Self {
        assert!(N > 1, "ring needs at least two slots");

        Self {
            slots: [const { AtomicU8::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Ring capacity
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Split into the producer and consumer handles.
    ///
    /// Taking `&mut self` guarantees only one pair of handles exists for
    /// the lifetime of the borrow.
    pub fn split(&mut self) -> (RxProducer<'_, N>, RxConsumer<'_, N>) {
        let ring: &Self = self;
        (RxProducer { ring }, RxConsumer { ring })
    }

    fn unsent(&self, head: usize, tail: usize) -> usize {
        (tail + N - head) % N
    }
}

impl<const N: usize> Default for RxRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Writing half of the ring, owned by the sampler interrupt
pub struct RxProducer<'a, const N: usize> {
    ring: &'a RxRing<N>,
}

impl<const N: usize> RxProducer<'_, N> {
    /// Store one sample and advance `tail`. O(1), never blocks.
    #[inline]
    pub fn push(&self, sample: u8) {
        let tail = self.ring.tail.load(Ordering::Relaxed);
        if let Some(slot) = self.ring.slots.get(tail) {
            slot.store(sample, Ordering::Relaxed);
        }
        self.ring.tail.store((tail + 1) % N, Ordering::Release);
    }
}

/// Reading half of the ring, owned by the main loop
pub struct RxConsumer<'a, const N: usize> {
    ring: &'a RxRing<N>,
}

impl<const N: usize> RxConsumer<'_, N> {
    /// Number of unsent bytes
    #[must_use]
    pub fn pending(&self) -> usize {
        let tail = self.ring.tail.load(Ordering::Acquire);
        let head = self.ring.head.load(Ordering::Relaxed);
        self.ring.unsent(head, tail)
    }

    /// Copy the unsent run into `out` and advance `head` past it.
    ///
    /// The run is copied in at most two contiguous pieces (before and after
    /// the wrap point). Returns the number of bytes copied, bounded by
    /// `out.len()`.
    pub fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let tail = self.ring.tail.load(Ordering::Acquire);
        let head = self.ring.head.load(Ordering::Relaxed);
        let count = self.ring.unsent(head, tail).min(out.len());

        let first = count.min(N - head);
        let (out_first, out_rest) = out.split_at_mut(first);
        copy_run(&self.ring.slots[head..head + first], out_first);
        copy_run(&self.ring.slots[..count - first], &mut out_rest[..count - first]);

        self.ring.head.store((head + count) % N, Ordering::Release);
        count
    }
}

fn copy_run(src: &[AtomicU8], dst: &mut [u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = s.load(Ordering::Relaxed);
    }
}
