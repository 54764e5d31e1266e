//! Hardware Abstraction Layer
//!
//! Binds the bridge's collaborator traits to STM32G474 peripherals.
//! Everything here is target-only; the host build exercises the same
//! logic through test doubles.

pub mod adc;
pub mod dac;
pub mod gpio;
pub mod timer;
pub mod watchdog;

use crate::port::AudioLine;

use self::adc::AudioAdc;
use self::dac::AudioDac;

/// Analog audio line: ADC receive input plus DAC transmit output
pub struct AnalogLine<'d> {
    adc: AudioAdc<'d>,
    dac: AudioDac<'d>,
}

impl<'d> AnalogLine<'d> {
    /// Pair the converters
    #[must_use]
    pub fn new(adc: AudioAdc<'d>, dac: AudioDac<'d>) -> Self {
        Self { adc, dac }
    }
}

impl AudioLine for AnalogLine<'_> {
    #[inline]
    fn read_sample(&mut self) -> Option<u8> {
        Some(self.adc.read().as_u8())
    }

    #[inline]
    fn write_sample(&mut self, sample: u8) {
        self.dac.write(sample);
    }
}
