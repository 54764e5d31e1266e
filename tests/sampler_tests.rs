//! Periodic Sampler Tests
//!
//! Tests for the interrupt body in both modes.
//! Run with: cargo test --no-default-features --features std --test sampler_tests

mod common;

use common::ScriptedLine;
use fm_bridge::audio::sampler::{PeriodicSampler, SharedAudio, TickOutcome};
use fm_bridge::audio::{bridge_audio, BridgeAudio};
use fm_bridge::config::{RX_BUFFER_CAPACITY, TX_BUFFER_CAPACITY};
use fm_bridge::types::{Micros, Mode};

type SmallAudio = SharedAudio<32, 100>;

// ============================================================================
// Receive Mode
// ============================================================================

#[test]
fn test_receive_captures_samples_in_order() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, mut loop_port) = audio.split();
    let mut sampler = PeriodicSampler::new(port, ScriptedLine::with_samples(&[1, 2, 3, 4]));

    for (i, expected) in [1u8, 2, 3, 4].into_iter().enumerate() {
        let now = Micros::from_raw(i as u32 * 125);
        assert_eq!(sampler.tick(now), TickOutcome::Captured(expected));
    }

    assert_eq!(loop_port.rx.pending(), 4);
    let mut out = [0u8; 8];
    let n = loop_port.rx.drain_into(&mut out);
    assert_eq!(&out[..n], &[1, 2, 3, 4]);
}

#[test]
fn test_receive_fault_skips_tick() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, loop_port) = audio.split();
    let mut line = ScriptedLine::new();
    line.input.extend([Some(9), None, Some(11)]);
    let mut sampler = PeriodicSampler::new(port, line);

    assert_eq!(sampler.tick(Micros::ZERO), TickOutcome::Captured(9));
    assert_eq!(sampler.tick(Micros::ZERO), TickOutcome::Faulted);
    assert_eq!(sampler.tick(Micros::ZERO), TickOutcome::Captured(11));
    assert_eq!(sampler.faults(), 1);
    assert_eq!(loop_port.rx.pending(), 2);
}

#[test]
fn test_receive_never_writes_output() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, _loop_port) = audio.split();
    let mut sampler = PeriodicSampler::new(port, ScriptedLine::with_samples(&[5; 10]));

    for _ in 0..10 {
        sampler.tick(Micros::ZERO);
    }
    assert!(sampler.line().output.is_empty());
}

// ============================================================================
// Transmit Mode
// ============================================================================

#[test]
fn test_transmit_idle_without_swapped_buffer() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, mut loop_port) = audio.split();
    let mut sampler = PeriodicSampler::new(port, ScriptedLine::new());

    loop_port.publish_mode(Mode::Transmit);
    loop_port.tx.ingest(&[50; 40], Micros::ZERO);

    assert_eq!(sampler.tick(Micros::from_raw(100)), TickOutcome::Idle);
    assert!(sampler.line().output.is_empty());
}

#[test]
fn test_transmit_plays_by_elapsed_time() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, mut loop_port) = audio.split();
    let mut sampler = PeriodicSampler::new(port, ScriptedLine::new());
    let data: Vec<u8> = (0..90).collect();

    loop_port.publish_mode(Mode::Transmit);
    assert!(loop_port.tx.ingest(&data, Micros::ZERO).swapped);

    // 90 samples last 11250 us; index = elapsed * 89 / 11250
    assert_eq!(sampler.tick(Micros::ZERO), TickOutcome::Played(0));
    assert_eq!(sampler.tick(Micros::from_raw(1_264)), TickOutcome::Played(9));
    assert_eq!(sampler.tick(Micros::from_raw(11_249)), TickOutcome::Played(88));
    assert_eq!(sampler.tick(Micros::from_raw(11_250)), TickOutcome::Idle);
    assert_eq!(sampler.line().output, vec![0, 9, 88]);
}

#[test]
fn test_late_ticks_skip_samples() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, mut loop_port) = audio.split();
    let mut sampler = PeriodicSampler::new(port, ScriptedLine::new());
    let data: Vec<u8> = (0..90).collect();

    loop_port.publish_mode(Mode::Transmit);
    loop_port.tx.ingest(&data, Micros::ZERO);

    // A delayed interrupt lands where real time says, not on the next index
    sampler.tick(Micros::ZERO);
    assert_eq!(sampler.tick(Micros::from_raw(5_625)), TickOutcome::Played(44));
}

#[test]
fn test_transmit_does_not_capture() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, loop_port) = audio.split();
    let mut sampler = PeriodicSampler::new(port, ScriptedLine::with_samples(&[1, 2, 3]));

    loop_port.publish_mode(Mode::Transmit);
    for _ in 0..3 {
        sampler.tick(Micros::ZERO);
    }
    assert_eq!(loop_port.rx.pending(), 0);
    assert_eq!(sampler.line().input.len(), 3);
}

#[test]
fn test_mode_follows_published_flag() {
    let mut audio = SmallAudio::new(10, 8_000);
    let (port, loop_port) = audio.split();
    let mut sampler = PeriodicSampler::new(port, ScriptedLine::with_samples(&[42, 43]));

    assert_eq!(loop_port.published_mode(), Mode::Receive);
    loop_port.publish_mode(Mode::Transmit);
    assert_eq!(sampler.tick(Micros::ZERO), TickOutcome::Idle);
    loop_port.publish_mode(Mode::Receive);
    assert_eq!(sampler.tick(Micros::ZERO), TickOutcome::Captured(42));
}

// ============================================================================
// Bridge Geometry
// ============================================================================

#[test]
fn test_bridge_audio_geometry() {
    let mut audio: BridgeAudio = bridge_audio();
    let (_port, loop_port) = audio.split();
    assert_eq!(loop_port.rx.pending(), 0);
    assert_eq!(loop_port.tx.filling_len(), 0);
    assert_eq!(RX_BUFFER_CAPACITY, 4_000);
    assert_eq!(TX_BUFFER_CAPACITY, 1_000);
}
