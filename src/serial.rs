//! Host serial link
//!
//! [`HostSerial`] implements [`HostLink`] over any blocking `embedded-io`
//! serial port (the buffered UART on the target, a scripted port in
//! tests). Bytes the port reports ready are pulled into a small staging
//! buffer so `available()` can report a count.

use embedded_io::{Read, ReadReady, Write};

use crate::port::{Clock, HostLink};

/// Staging buffer size
pub const STAGING_SIZE: usize = 64;

/// Linear staging buffer, compacted when half consumed
pub struct StagingBuffer {
    buffer: [u8; STAGING_SIZE],
    read_pos: usize,
    write_pos: usize,
}

impl StagingBuffer {
    /// Create an empty buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; STAGING_SIZE],
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// Free space at the end of the buffer
    pub fn spare(&mut self) -> &mut [u8] {
        if self.read_pos >= STAGING_SIZE / 2 {
            self.compact();
        }
        &mut self.buffer[self.write_pos..]
    }

    /// Mark `n` bytes of [`Self::spare`] as filled
    pub fn commit(&mut self, n: usize) {
        self.write_pos = (self.write_pos + n).min(STAGING_SIZE);
    }

    /// Take the oldest byte
    pub fn pop(&mut self) -> Option<u8> {
        if self.read_pos == self.write_pos {
            return None;
        }
        let byte = self.buffer[self.read_pos];
        self.read_pos += 1;
        if self.read_pos == self.write_pos {
            self.clear();
        }
        Some(byte)
    }

    fn compact(&mut self) {
        if self.read_pos > 0 {
            let remaining = self.write_pos - self.read_pos;
            self.buffer.copy_within(self.read_pos..self.write_pos, 0);
            self.read_pos = 0;
            self.write_pos = remaining;
        }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
    }

    /// Get available bytes
    #[must_use]
    pub const fn available(&self) -> usize {
        self.write_pos - self.read_pos
    }
}

impl Default for StagingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Host link over a serial port
pub struct HostSerial<U, K> {
    port: U,
    clock: K,
    staging: StagingBuffer,
    write_errors: u32,
}

impl<U, K> HostSerial<U, K>
where
    U: Read + Write + ReadReady,
    K: Clock,
{
    /// Wrap a serial port
    pub fn new(port: U, clock: K) -> Self {
        Self {
            port,
            clock,
            staging: StagingBuffer::new(),
            write_errors: 0,
        }
    }

    /// Failed writes since start-up
    #[must_use]
    pub const fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Borrow the serial port
    pub fn port(&self) -> &U {
        &self.port
    }

    /// Pull whatever the port has ready, without waiting
    fn refill(&mut self) {
        if !matches!(self.port.read_ready(), Ok(true)) {
            return;
        }
        let spare = self.staging.spare();
        if spare.is_empty() {
            return;
        }
        if let Ok(n) = self.port.read(spare) {
            self.staging.commit(n);
        }
    }
}

impl<U, K> HostLink for HostSerial<U, K>
where
    U: Read + Write + ReadReady,
    K: Clock,
{
    fn available(&mut self) -> usize {
        if self.staging.available() == 0 {
            self.refill();
        }
        self.staging.available()
    }

    fn read_byte(&mut self, timeout_us: u32) -> Option<u8> {
        let start = self.clock.now();
        loop {
            if let Some(byte) = self.staging.pop() {
                return Some(byte);
            }
            self.refill();
            if self.staging.available() == 0 && self.clock.now().since(start) >= timeout_us {
                return None;
            }
        }
    }

    fn write_bytes(&mut self, data: &[u8]) {
        if self.port.write_all(data).is_err() {
            self.write_errors = self.write_errors.saturating_add(1);
        }
    }
}
