//! Independent watchdog
//!
//! Resets the MCU if the main loop stops feeding it.

use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;

use crate::config::WATCHDOG_TIMEOUT_US;
use crate::port::Watchdog;

/// IWDG as a [`Watchdog`]
pub struct LoopWatchdog<'d> {
    wdg: IndependentWatchdog<'d, IWDG>,
}

impl<'d> LoopWatchdog<'d> {
    /// Configure with the loop timeout and start it. Once started the IWDG
    /// cannot be stopped.
    #[must_use]
    pub fn start(iwdg: IWDG) -> Self {
        let mut wdg = IndependentWatchdog::new(iwdg, WATCHDOG_TIMEOUT_US);
        wdg.unleash();
        info!("watchdog armed ({} us)", WATCHDOG_TIMEOUT_US);
        Self { wdg }
    }
}

impl Watchdog for LoopWatchdog<'_> {
    #[inline]
    fn feed(&mut self) {
        self.wdg.pet();
    }
}
