//! DAC Driver
//!
//! Transmit audio into the radio's microphone input. Samples are written
//! directly from the sampler interrupt, no DMA.

use embassy_stm32::dac::{DacChannel, Value};
use embassy_stm32::peripherals::DAC1;

use crate::config::SILENCE_SAMPLE;

/// Transmit audio DAC on channel 1
pub struct AudioDac<'d> {
    channel: DacChannel<'d, DAC1, 1>,
}

impl<'d> AudioDac<'d> {
    /// Take the channel and park it at mid-scale
    #[must_use]
    pub fn new(channel: DacChannel<'d, DAC1, 1>) -> Self {
        let mut dac = Self { channel };
        dac.write(SILENCE_SAMPLE);
        dac
    }

    /// Write a single 8-bit sample
    pub fn write(&mut self, sample: u8) {
        self.channel.set(Value::Bit8(sample));
    }
}
