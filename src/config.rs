//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the radio bridge.
//! Sample rates, buffer geometry, protocol timing and pin mappings are
//! centralized here.

use crate::types::{Frequency, SquelchLevel, ToneCode};

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// Audio sample rate the host and the radio module agree on
pub const NOMINAL_SAMPLE_RATE_HZ: u32 = 8_000;

/// Rate the sampler timer is programmed for.
///
/// The timer derives its prescaler and reload from the timer clock, and
/// 8 kHz divides that clock exactly, so no period correction is applied.
pub const SAMPLER_TIMER_HZ: u32 = NOMINAL_SAMPLE_RATE_HZ;

/// Sampler timer period in microseconds
pub const SAMPLER_PERIOD_US: u32 = 1_000_000 / SAMPLER_TIMER_HZ;

/// Sample rate actually achieved by the sampler interrupt.
///
/// Playback timing is computed from this value, never from
/// [`SAMPLER_PERIOD_US`]. Re-measure it when the clock tree changes.
pub const EFFECTIVE_SAMPLE_RATE_HZ: u32 = 8_000;

/// Receive ring capacity in bytes (half a second of audio)
pub const RX_BUFFER_CAPACITY: usize = 4_000;

/// Minimum buffered receive bytes before a send to the host
pub const RX_MIN_SEND: usize = 64;

/// Capacity of each transmit playback buffer
pub const TX_BUFFER_CAPACITY: usize = 1_000;

/// Headroom left in the filling buffer when roles swap
pub const TX_SWAP_MARGIN: usize = 20;

/// Bytes pulled from the host per transmit read
pub const TX_READ_CHUNK: usize = 12;

/// Upper bound of host bytes consumed in one transmit-mode loop iteration
pub const TX_MAX_BYTES_PER_POLL: usize = 240;

/// Mid-scale 8-bit PCM value sent while squelched
pub const SILENCE_SAMPLE: u8 = 128;

/// Command frame delimiter
pub const DELIMITER: [u8; DELIMITER_LEN] = [0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Delimiter length in bytes
pub const DELIMITER_LEN: usize = 8;

/// Deadline for all bytes of one command frame (microseconds)
pub const PARAM_TIMEOUT_US: u32 = 500_000;

/// Maximum continuous transmit time before a forced return to receive
pub const RUNAWAY_TX_LIMIT_US: u32 = 200_000_000;

/// Host serial link baud rate
pub const HOST_BAUD_RATE: u32 = 921_600;

/// Radio module (SA818) serial baud rate
pub const RADIO_BAUD_RATE: u32 = 9_600;

/// Time allowed for the radio module to answer an AT command
pub const RADIO_RESPONSE_TIMEOUT_US: u32 = 200_000;

/// Radio module speaker volume programmed at start-up (1-8)
pub const RADIO_VOLUME: u8 = 8;

/// Independent watchdog timeout
pub const WATCHDOG_TIMEOUT_US: u32 = 2_000_000;

/// Default receive/transmit channel (2m national simplex calling)
pub const DEFAULT_FREQUENCY_HZ: u32 = 146_520_000;

/// Default CTCSS tone code (none)
pub const DEFAULT_TONE: ToneCode = ToneCode::NONE;

/// Default squelch level
pub const DEFAULT_SQUELCH: SquelchLevel = SquelchLevel::DEFAULT;

/// Host serial buffer sizes (buffered UART)
pub const HOST_RX_BUFFER_SIZE: usize = 1_024;

/// Host serial transmit buffer size
pub const HOST_TX_BUFFER_SIZE: usize = 1_024;

// One transmit read plus a released delimiter prefix must fit in the swap
// margin, otherwise ingestion could drop payload bytes.
const _: () = assert!(TX_READ_CHUNK + DELIMITER_LEN <= TX_SWAP_MARGIN);
const _: () = assert!(TX_SWAP_MARGIN < TX_BUFFER_CAPACITY);
const _: () = assert!(RX_MIN_SEND < RX_BUFFER_CAPACITY);
const _: () = assert!(SYSTEM_CLOCK_HZ % SAMPLER_TIMER_HZ == 0);

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED, lit while transmitting
    pub const LED_STATUS: &str = "PA5";

    /// Radio module PTT (active low)
    pub const RADIO_PTT: &str = "PB0";

    /// Radio module squelch output (low = squelch open)
    pub const RADIO_SQUELCH: &str = "PB1";

    /// Receive audio ADC input
    pub const AUDIO_ADC: &str = "PA0";

    /// Transmit audio DAC output
    pub const AUDIO_DAC: &str = "PA4";

    /// Host link UART TX
    pub const HOST_TX: &str = "PA2";

    /// Host link UART RX
    pub const HOST_RX: &str = "PA3";

    /// Radio module UART TX
    pub const RADIO_TX: &str = "PC4";

    /// Radio module UART RX
    pub const RADIO_RX: &str = "PC5";
}

/// Timer assignments
pub mod timers {
    //! Hardware timer assignments

    /// Sampler interrupt timer
    pub const SAMPLER: u8 = 2;

    /// embassy time driver
    pub const TIME_DRIVER: u8 = 3;
}

/// Build the default start-up frequency
#[must_use]
pub const fn default_frequency() -> Option<Frequency> {
    Frequency::from_hz(DEFAULT_FREQUENCY_HZ)
}
