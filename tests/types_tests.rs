//! Shared Type Tests
//!
//! Tests for timestamps, frequencies, tone codes, squelch and filter flags.
//! Run with: cargo test --no-default-features --features std --test types_tests

use fm_bridge::types::{
    FilterConfig, Frequency, Micros, Mode, SquelchLevel, ToneCode, TuneRequest,
};

// ============================================================================
// Micros
// ============================================================================

#[test]
fn test_micros_since() {
    let a = Micros::from_raw(1_000);
    let b = Micros::from_raw(4_500);
    assert_eq!(b.since(a), 3_500);
    assert_eq!(a.since(a), 0);
}

#[test]
fn test_micros_wraps() {
    let before = Micros::from_raw(u32::MAX - 4);
    let after = before.add_us(10);
    assert_eq!(after.as_raw(), 5);
    assert_eq!(after.since(before), 10);
}

#[test]
fn test_micros_from_u64_keeps_low_bits() {
    assert_eq!(Micros::from_u64(0x1_0000_0007).as_raw(), 7);
    assert_eq!(Micros::from_u64(123), Micros::from_raw(123));
    assert_eq!(Micros::default(), Micros::ZERO);
}

// ============================================================================
// Mode
// ============================================================================

#[test]
fn test_mode_default_is_receive() {
    assert_eq!(Mode::default(), Mode::Receive);
    assert!(!Mode::Receive.is_transmit());
    assert!(Mode::Transmit.is_transmit());
}

// ============================================================================
// Frequency
// ============================================================================

#[test]
fn test_frequency_range() {
    assert!(Frequency::from_hz(Frequency::MIN_HZ).is_some());
    assert!(Frequency::from_hz(Frequency::MAX_HZ).is_some());
    assert!(Frequency::from_hz(Frequency::MIN_HZ - 1).is_none());
    assert!(Frequency::from_hz(Frequency::MAX_HZ + 1).is_none());
}

#[test]
fn test_frequency_parse_mhz() {
    assert_eq!(Frequency::parse_mhz(b"146.520").map(Frequency::as_hz), Some(146_520_000));
    assert_eq!(Frequency::parse_mhz(b"440.0125").map(Frequency::as_hz), Some(440_012_500));
    assert_eq!(Frequency::parse_mhz(b"145").map(Frequency::as_hz), Some(145_000_000));
    assert_eq!(Frequency::parse_mhz(b" 146.52").map(Frequency::as_hz), Some(146_520_000));
    assert_eq!(Frequency::parse_mhz(b"146.52 ").map(Frequency::as_hz), Some(146_520_000));
}

#[test]
fn test_frequency_parse_rejects() {
    assert_eq!(Frequency::parse_mhz(b""), None);
    assert_eq!(Frequency::parse_mhz(b".520"), None);
    assert_eq!(Frequency::parse_mhz(b"146,520"), None);
    assert_eq!(Frequency::parse_mhz(b"146.5x0"), None);
    assert_eq!(Frequency::parse_mhz(b"146.1234567"), None);
    assert_eq!(Frequency::parse_mhz(b"100.000"), None);
    assert_eq!(Frequency::parse_mhz(b"1465200"), None);
    assert_eq!(Frequency::parse_mhz(b"-146.52"), None);
}

#[test]
fn test_frequency_display() {
    let f = Frequency::from_hz(146_520_000).unwrap();
    assert_eq!(f.to_string(), "146.5200");
    assert_eq!(f.mhz(), 146);
    assert_eq!(f.mhz_frac4(), 5_200);

    let f = Frequency::from_hz(147_123_450).unwrap();
    assert_eq!(f.to_string(), "147.1234");
}

// ============================================================================
// Tone, Squelch, Filters
// ============================================================================

#[test]
fn test_tone_code() {
    assert_eq!(ToneCode::parse(b"00"), Some(ToneCode::NONE));
    assert_eq!(ToneCode::parse(b"38").map(ToneCode::code), Some(38));
    assert_eq!(ToneCode::parse(b"39"), None);
    assert_eq!(ToneCode::parse(b"1"), None);
    assert_eq!(ToneCode::parse(b"a1"), None);
    assert_eq!(ToneCode::new(12).map(ToneCode::code), Some(12));
}

#[test]
fn test_squelch_level() {
    assert_eq!(SquelchLevel::parse(b'0').map(SquelchLevel::level), Some(0));
    assert_eq!(SquelchLevel::parse(b'8').map(SquelchLevel::level), Some(8));
    assert_eq!(SquelchLevel::parse(b'9'), None);
    assert_eq!(SquelchLevel::parse(b'x'), None);
    assert_eq!(SquelchLevel::default(), SquelchLevel::DEFAULT);
    assert_eq!(SquelchLevel::DEFAULT.level(), 1);
}

#[test]
fn test_filter_flags() {
    assert_eq!(
        FilterConfig::parse(b"110"),
        Some(FilterConfig {
            emphasis: true,
            highpass: true,
            lowpass: false,
        })
    );
    assert_eq!(FilterConfig::parse(b"000"), Some(FilterConfig::default()));
    assert_eq!(FilterConfig::parse(b"11"), None);
    assert_eq!(FilterConfig::parse(b"1101"), None);
    assert_eq!(FilterConfig::parse(b"1 0"), None);
}

#[test]
fn test_simplex_request() {
    let f = Frequency::from_hz(145_500_000).unwrap();
    let req = TuneRequest::simplex(f, ToneCode::NONE, SquelchLevel::DEFAULT);
    assert_eq!(req.tx, req.rx);
    assert_eq!(req.tone, ToneCode::NONE);
}
