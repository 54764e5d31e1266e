//! FM Radio Bridge Main Application
//!
//! Entry point for the STM32G474-based radio bridge firmware.
//! Initializes hardware, configures the radio module, starts the sampler
//! interrupt and then runs the bridge loop forever.

#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use defmt::unwrap;
use embassy_executor::Spawner;
use embassy_stm32::adc::AdcChannel;
use embassy_stm32::dac::DacChannel;
use embassy_stm32::dma::NoDma;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::{bind_interrupts, peripherals};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use fm_bridge::audio::sampler::PeriodicSampler;
use fm_bridge::audio::{bridge_audio, BridgeAudio};
use fm_bridge::hal::adc::AudioAdc;
use fm_bridge::hal::dac::AudioDac;
use fm_bridge::hal::gpio::{PttOutput, RadioControl, SquelchInput, StatusLed};
use fm_bridge::hal::timer::{EmbassyClock, SampleTimer};
use fm_bridge::hal::watchdog::LoopWatchdog;
use fm_bridge::hal::AnalogLine;
use fm_bridge::prelude::*;
use fm_bridge::radio::bridge::Bridge;
use fm_bridge::radio::module::Sa818;
use fm_bridge::serial::HostSerial;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
    USART2 => usart::BufferedInterruptHandler<peripherals::USART2>;
});

type Sampler =
    PeriodicSampler<'static, AnalogLine<'static>, RX_BUFFER_CAPACITY, TX_BUFFER_CAPACITY>;

/// State owned by the TIM2 handler
struct SamplerIrq {
    sampler: Sampler,
    timer: SampleTimer<'static>,
    clock: EmbassyClock,
}

static SAMPLER: Mutex<RefCell<Option<SamplerIrq>>> = Mutex::new(RefCell::new(None));
static AUDIO: StaticCell<BridgeAudio> = StaticCell::new();

static HOST_TX_BUF: StaticCell<[u8; HOST_TX_BUFFER_SIZE]> = StaticCell::new();
static HOST_RX_BUF: StaticCell<[u8; HOST_RX_BUFFER_SIZE]> = StaticCell::new();
static RADIO_TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static RADIO_RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("FM Bridge Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Radio control pins: PTT released, indicator off
    let control = RadioControl::new(
        PttOutput::new(Output::new(p.PB0, Level::High, Speed::Low)),
        SquelchInput::new(Input::new(p.PB1, Pull::Up)),
        StatusLed::new(Output::new(p.PA5, Level::Low, Speed::Low)),
    );

    // Radio module UART: PC4 = TX, PC5 = RX
    let mut radio_cfg = usart::Config::default();
    radio_cfg.baudrate = RADIO_BAUD_RATE;
    let radio_uart = unwrap!(BufferedUart::new(
        p.USART1,
        Irqs,
        p.PC5,
        p.PC4,
        RADIO_TX_BUF.init([0; 128]),
        RADIO_RX_BUF.init([0; 128]),
        radio_cfg,
    ));
    let mut radio = Sa818::new(radio_uart, EmbassyClock);

    match radio.handshake() {
        Ok(()) => info!("radio module connected"),
        Err(e) => warn!("radio handshake failed: {}", e),
    }
    if let Err(e) = radio.set_volume(RADIO_VOLUME) {
        warn!("radio volume not set: {}", e);
    }
    if let Some(freq) = default_frequency() {
        let request = TuneRequest::simplex(freq, DEFAULT_TONE, DEFAULT_SQUELCH);
        match radio.tune(&request) {
            Ok(()) => info!("tuned to {}", request),
            Err(e) => warn!("default tune failed: {}", e),
        }
    }

    // Host UART: PA2 = TX, PA3 = RX
    let mut host_cfg = usart::Config::default();
    host_cfg.baudrate = HOST_BAUD_RATE;
    let host_uart = unwrap!(BufferedUart::new(
        p.USART2,
        Irqs,
        p.PA3,
        p.PA2,
        HOST_TX_BUF.init([0; HOST_TX_BUFFER_SIZE]),
        HOST_RX_BUF.init([0; HOST_RX_BUFFER_SIZE]),
        host_cfg,
    ));
    let link = HostSerial::new(host_uart, EmbassyClock);

    info!("UARTs initialized (host {} baud, radio {} baud)", HOST_BAUD_RATE, RADIO_BAUD_RATE);

    // Audio path: ADC1 on PA0, DAC1 channel 1 on PA4
    let line = AnalogLine::new(
        AudioAdc::new(p.ADC1, p.PA0.degrade_adc()),
        AudioDac::new(DacChannel::new(p.DAC1, NoDma, p.PA4)),
    );

    let audio = AUDIO.init(bridge_audio());
    let (sampler_port, loop_port) = audio.split();

    let watchdog = LoopWatchdog::start(p.IWDG);

    let mut timer = SampleTimer::new(p.TIM2);
    timer.start();
    critical_section::with(|cs| {
        SAMPLER.borrow_ref_mut(cs).replace(SamplerIrq {
            sampler: PeriodicSampler::new(sampler_port, line),
            timer,
            clock: EmbassyClock,
        });
    });

    // Sampler preempts the UART handlers
    interrupt::TIM2.set_priority(Priority::P1);
    interrupt::USART1.set_priority(Priority::P3);
    interrupt::USART2.set_priority(Priority::P3);
    // SAFETY: the handler state is installed above
    unsafe { interrupt::TIM2.enable() };

    info!("Sampler running at {} Hz", SampleTimer::rate_hz());

    let mut bridge = Bridge::new(loop_port, link, control, radio, EmbassyClock, watchdog);
    bridge.run()
}

/// Sampler tick
#[interrupt]
fn TIM2() {
    critical_section::with(|cs| {
        if let Some(irq) = SAMPLER.borrow_ref_mut(cs).as_mut() {
            irq.timer.acknowledge();
            let now = irq.clock.now();
            let _ = irq.sampler.tick(now);
        }
    });
}
