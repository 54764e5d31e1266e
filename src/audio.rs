//! Real-time audio path
//!
//! Buffers and the interrupt-driven sampler that move audio between the
//! radio's analog lines and the host:
//! - receive ring filled by the sampler, drained by the main loop
//! - transmit double buffer filled by the main loop, played by the sampler
//! - time-driven playback index

pub mod playback;
pub mod rx_ring;
pub mod sampler;
pub mod tx_buffer;

use crate::config::{
    EFFECTIVE_SAMPLE_RATE_HZ, RX_BUFFER_CAPACITY, TX_BUFFER_CAPACITY, TX_SWAP_MARGIN,
};

/// Shared audio state sized for the bridge hardware
pub type BridgeAudio = sampler::SharedAudio<RX_BUFFER_CAPACITY, TX_BUFFER_CAPACITY>;

/// Build the bridge's shared audio state
#[must_use]
pub const fn bridge_audio() -> BridgeAudio {
    BridgeAudio::new(TX_SWAP_MARGIN, EFFECTIVE_SAMPLE_RATE_HZ)
}
