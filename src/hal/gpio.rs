//! GPIO Abstractions
//!
//! Radio control pins with their polarity folded in, so callers deal only
//! in "keyed" and "squelched".

use embassy_stm32::gpio::{Input, Output};

use crate::port::ControlLine;

/// Status LED driver
pub struct StatusLed<'d> {
    pin: Output<'d>,
}

impl<'d> StatusLed<'d> {
    /// Create a new status LED (initially off)
    #[must_use]
    pub fn new(pin: Output<'d>) -> Self {
        let mut led = Self { pin };
        led.off();
        led
    }

    /// Turn LED on
    pub fn on(&mut self) {
        self.pin.set_high();
    }

    /// Turn LED off
    pub fn off(&mut self) {
        self.pin.set_low();
    }
}

/// Radio PTT output (active low)
pub struct PttOutput<'d> {
    pin: Output<'d>,
    keyed: bool,
}

impl<'d> PttOutput<'d> {
    /// Take the pin and release PTT
    #[must_use]
    pub fn new(pin: Output<'d>) -> Self {
        let mut ptt = Self { pin, keyed: true };
        ptt.set(false);
        ptt
    }

    /// Key or unkey the transmitter
    pub fn set(&mut self, keyed: bool) {
        if keyed {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
        if keyed != self.keyed {
            debug!("PTT {}", keyed);
        }
        self.keyed = keyed;
    }
}

/// Radio squelch input (high while no carrier)
pub struct SquelchInput<'d> {
    pin: Input<'d>,
}

impl<'d> SquelchInput<'d> {
    /// Wrap the input pin
    #[must_use]
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }

    /// Check if the squelch is closed
    #[must_use]
    pub fn is_squelched(&self) -> bool {
        self.pin.is_high()
    }
}

/// Control lines of the radio plus the debug LED
pub struct RadioControl<'d> {
    ptt: PttOutput<'d>,
    squelch: SquelchInput<'d>,
    led: StatusLed<'d>,
}

impl<'d> RadioControl<'d> {
    /// Bundle the pins
    #[must_use]
    pub fn new(ptt: PttOutput<'d>, squelch: SquelchInput<'d>, led: StatusLed<'d>) -> Self {
        Self { ptt, squelch, led }
    }
}

impl ControlLine for RadioControl<'_> {
    fn set_transmit_enable(&mut self, enabled: bool) {
        self.ptt.set(enabled);
    }

    fn squelch_active(&self) -> bool {
        self.squelch.is_squelched()
    }

    fn set_indicator(&mut self, on: bool) {
        if on {
            self.led.on();
        } else {
            self.led.off();
        }
    }
}
