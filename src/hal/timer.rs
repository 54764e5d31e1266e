//! Timer Abstractions
//!
//! The monotonic clock used by the main loop and the hardware timer that
//! paces the sampler interrupt.

use embassy_stm32::peripherals::TIM2;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::Timer;
use embassy_time::Instant;

use crate::config::SAMPLER_TIMER_HZ;
use crate::port::Clock;
use crate::types::Micros;

/// Embassy time driver as a [`Clock`]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now(&self) -> Micros {
        Micros::from_u64(Instant::now().as_micros())
    }
}

/// Update-interrupt timer driving the sampler
pub struct SampleTimer<'d> {
    timer: Timer<'d, TIM2>,
}

impl<'d> SampleTimer<'d> {
    /// Configure TIM2 for one update per sampler period. The interrupt is
    /// enabled at the timer but not yet unmasked in the NVIC.
    #[must_use]
    pub fn new(tim: TIM2) -> Self {
        let timer = Timer::new(tim);
        timer.set_frequency(Hertz(Self::rate_hz()));
        timer.enable_update_interrupt(true);
        Self { timer }
    }

    /// Tick rate in Hz
    #[must_use]
    pub const fn rate_hz() -> u32 {
        SAMPLER_TIMER_HZ
    }

    /// Start counting
    pub fn start(&mut self) {
        self.timer.start();
    }

    /// Clear the update flag; returns whether it was set
    pub fn acknowledge(&mut self) -> bool {
        self.timer.clear_update_interrupt()
    }
}
