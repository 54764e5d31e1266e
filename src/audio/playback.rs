//! Time-driven playback timing
//!
//! The playing buffer is not advanced one byte per tick. Instead the
//! sampler maps elapsed wall-clock time linearly onto the buffer, so a
//! late or skipped interrupt never shifts the audio out of step with real
//! time.

/// Play-out duration of `len` samples at `sample_rate_hz`, in microseconds
#[must_use]
pub fn buffer_duration_us(len: usize, sample_rate_hz: u32) -> u32 {
    if sample_rate_hz == 0 {
        return 0;
    }
    let us = (len as u64 * 1_000_000) / u64::from(sample_rate_hz);
    u32::try_from(us).unwrap_or(u32::MAX)
}

/// Index into a playing buffer for a point in time.
///
/// `index = elapsed * (write_len - 1) / duration`. Returns `None` once the
/// buffer's play-out time is over, or when there is nothing to play, so the
/// caller never reads at or past `write_len`.
#[must_use]
pub fn playback_index(elapsed_us: u32, write_len: usize, duration_us: u32) -> Option<usize> {
    if write_len == 0 || elapsed_us >= duration_us {
        return None;
    }
    let last = (write_len - 1) as u64;
    let index = u64::from(elapsed_us) * last / u64::from(duration_us);
    usize::try_from(index).ok()
}
