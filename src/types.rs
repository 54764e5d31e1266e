//! Shared types used across the bridge firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at construction time and provide type safety throughout the codebase.

use core::fmt;

/// Wrapping microsecond timestamp
///
/// The sampler interrupt and the main loop share timestamps through 32-bit
/// atomics, so time is a free-running `u32` microsecond counter. Intervals
/// are computed with wrapping arithmetic and are valid for spans shorter
/// than about 71 minutes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Micros(u32);

impl Micros {
    /// Timestamp zero
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from a raw microsecond count
    #[must_use]
    pub const fn from_raw(us: u32) -> Self {
        Self(us)
    }

    /// Create a timestamp from a 64-bit tick count, keeping the low 32 bits
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u64(us: u64) -> Self {
        Self(us as u32)
    }

    /// Raw microsecond count
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Microseconds elapsed since an earlier timestamp
    #[must_use]
    pub const fn since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Timestamp `us` microseconds later
    #[must_use]
    pub const fn add_us(self, us: u32) -> Self {
        Self(self.0.wrapping_add(us))
    }
}

impl fmt::Debug for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Micros({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Micros {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}us", self.0);
    }
}

/// Operating mode of the bridge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Sampling radio audio toward the host
    #[default]
    Receive,
    /// Playing host audio into the radio
    Transmit,
}

impl Mode {
    /// Check if transmitting
    #[must_use]
    pub const fn is_transmit(self) -> bool {
        matches!(self, Self::Transmit)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Mode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Receive => defmt::write!(f, "RX"),
            Self::Transmit => defmt::write!(f, "TX"),
        }
    }
}

/// Frequency in Hertz with validation
///
/// Represents a frequency inside the tuning range of the VHF/UHF
/// transceiver module.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Minimum supported frequency (134 MHz, bottom of the VHF module)
    pub const MIN_HZ: u32 = 134_000_000;

    /// Maximum supported frequency (480 MHz, top of the UHF module)
    pub const MAX_HZ: u32 = 480_000_000;

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Parse an ASCII MHz value such as `146.520`
    ///
    /// Surrounding spaces are ignored; at most six fractional digits are
    /// accepted.
    #[must_use]
    pub fn parse_mhz(text: &[u8]) -> Option<Self> {
        let text = core::str::from_utf8(text).ok()?.trim();
        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

        if whole.is_empty()
            || frac.len() > 6
            || !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let mhz: u32 = whole.parse().ok()?;
        let mut frac_hz: u32 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
        for _ in frac.len()..6 {
            frac_hz *= 10;
        }

        Self::from_hz(mhz.checked_mul(1_000_000)?.checked_add(frac_hz)?)
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Whole MHz part
    #[must_use]
    pub const fn mhz(self) -> u32 {
        self.0 / 1_000_000
    }

    /// Fractional MHz part in units of 100 Hz (four decimals)
    #[must_use]
    pub const fn mhz_frac4(self) -> u32 {
        (self.0 % 1_000_000) / 100
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}", self.mhz(), self.mhz_frac4())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// CTCSS tone code as understood by the radio module (0 = no tone)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ToneCode(u8);

impl ToneCode {
    /// No sub-audible tone
    pub const NONE: Self = Self(0);

    /// Highest CTCSS table entry
    pub const MAX: u8 = 38;

    /// Create a tone code, returns None if outside the CTCSS table
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        if code <= Self::MAX {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Parse a two-digit ASCII tone code
    #[must_use]
    pub fn parse(text: &[u8]) -> Option<Self> {
        match text {
            [tens, ones] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
                Self::new((tens - b'0') * 10 + (ones - b'0'))
            }
            _ => None,
        }
    }

    /// Raw code
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }
}

/// Squelch level of the radio module (0 = open, 8 = tightest)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquelchLevel(u8);

impl SquelchLevel {
    /// Level used at start-up
    pub const DEFAULT: Self = Self(1);

    /// Tightest squelch
    pub const MAX: u8 = 8;

    /// Create a squelch level, returns None if out of range
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Parse a single ASCII digit
    #[must_use]
    pub fn parse(digit: u8) -> Option<Self> {
        if digit.is_ascii_digit() {
            Self::new(digit - b'0')
        } else {
            None
        }
    }

    /// Raw level
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl Default for SquelchLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tuning request forwarded to the radio module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TuneRequest {
    /// Transmit frequency
    pub tx: Frequency,
    /// Receive frequency
    pub rx: Frequency,
    /// CTCSS tone code
    pub tone: ToneCode,
    /// Squelch level
    pub squelch: SquelchLevel,
}

impl TuneRequest {
    /// Simplex channel on one frequency
    #[must_use]
    pub const fn simplex(freq: Frequency, tone: ToneCode, squelch: SquelchLevel) -> Self {
        Self {
            tx: freq,
            rx: freq,
            tone,
            squelch,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TuneRequest {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Tune(tx={}, rx={}, tone={}, sq={})",
            self.tx,
            self.rx,
            self.tone.0,
            self.squelch.0
        );
    }
}

/// Audio filter switches of the radio module
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FilterConfig {
    /// Pre/de-emphasis filter
    pub emphasis: bool,
    /// Voice high-pass filter
    pub highpass: bool,
    /// Voice low-pass filter
    pub lowpass: bool,
}

impl FilterConfig {
    /// Build from three ASCII `'0'`/`'1'` flags
    #[must_use]
    pub fn parse(flags: &[u8]) -> Option<Self> {
        let flag = |b: u8| match b {
            b'0' => Some(false),
            b'1' => Some(true),
            _ => None,
        };

        match flags {
            [e, h, l] => Some(Self {
                emphasis: flag(*e)?,
                highpass: flag(*h)?,
                lowpass: flag(*l)?,
            }),
            _ => None,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FilterConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Filters(emph={}, hp={}, lp={})",
            self.emphasis,
            self.highpass,
            self.lowpass
        );
    }
}
