//! ADC Driver
//!
//! Receive audio from the radio's discriminator output, one blocking
//! conversion per sampler tick.

use embassy_stm32::adc::{Adc, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;

/// ADC reading result
#[derive(Clone, Copy, Debug)]
pub struct AdcReading {
    /// Raw 12-bit ADC value (0-4095)
    raw: u16,
}

impl AdcReading {
    /// Create a new ADC reading from raw value
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    /// Reduce to an unsigned 8-bit sample (mid-scale 128)
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        // Top 8 of 12 bits
        ((self.raw >> 4) & 0xFF) as u8
    }
}

/// Receive audio ADC
pub struct AudioAdc<'d> {
    adc: Adc<'d, ADC1>,
    channel: AnyAdcChannel<ADC1>,
}

impl<'d> AudioAdc<'d> {
    /// Create the audio ADC on one input channel
    #[must_use]
    pub fn new(adc: ADC1, channel: AnyAdcChannel<ADC1>) -> Self {
        let mut adc = Adc::new(adc);
        // Conversion must finish well inside one sampler period
        adc.set_sample_time(SampleTime::CYCLES24_5);
        Self { adc, channel }
    }

    /// Read a single audio sample
    pub fn read(&mut self) -> AdcReading {
        AdcReading::from_raw(self.adc.blocking_read(&mut self.channel))
    }
}
