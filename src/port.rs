//! Collaborator interfaces
//!
//! The bridge logic talks to hardware only through these traits. The
//! embedded build implements them on STM32 peripherals (see `hal`); the
//! host tests implement them with scripted mocks.
//!
//! The analog front end is split in two: [`AudioLine`] is owned by the
//! sampler interrupt, [`ControlLine`] by the main loop. Together they form
//! the hardware line of the radio.

use crate::types::Micros;

/// Sample input and synthesis output, used only from interrupt context
pub trait AudioLine {
    /// Read one 8-bit sample from the receive audio input.
    ///
    /// `None` signals a transient fault (conversion not ready, overrun);
    /// the sampler skips the tick.
    fn read_sample(&mut self) -> Option<u8>;

    /// Write one 8-bit sample to the transmit audio output
    fn write_sample(&mut self, sample: u8);
}

/// Radio control lines, used only from the main loop
pub trait ControlLine {
    /// Assert or release the radio's transmit enable (PTT)
    fn set_transmit_enable(&mut self, enabled: bool);

    /// True while the radio reports no valid signal
    fn squelch_active(&self) -> bool;

    /// Drive the debug indicator
    fn set_indicator(&mut self, on: bool);
}

/// Byte stream to and from the host application
pub trait HostLink {
    /// Number of bytes that can be read without waiting
    fn available(&mut self) -> usize;

    /// Read one byte, waiting at most `timeout_us`
    fn read_byte(&mut self, timeout_us: u32) -> Option<u8>;

    /// Send bytes to the host
    fn write_bytes(&mut self, data: &[u8]);
}

/// Monotonic time source
pub trait Clock {
    /// Current time
    fn now(&self) -> Micros;
}

/// Liveness watchdog
pub trait Watchdog {
    /// Reset the watchdog countdown
    fn feed(&mut self);
}
