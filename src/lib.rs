//! FM Radio Bridge Firmware Library
//!
//! This library provides the core of an STM32G474-based bridge between a
//! host application and a narrowband FM transceiver module (SA818 class).
//! The host streams 8-bit audio and framed commands over a serial link; the
//! firmware samples receive audio, plays transmit audio and switches the
//! radio between receive and transmit.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Bridge loop  │  Mode control  │  Command framing             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     AUDIO LAYER                              │
//! │  RX ring  │  TX double buffer  │  Periodic sampler (IRQ)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  ADC  │  DAC  │  UART  │  GPIO  │  IWDG  │  SA818 AT driver  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │     embassy-rs (time driver) + TIM2 sampler interrupt        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Two contexts, one owner per field**: the sampler interrupt and the
//!   main loop share only single-writer atomics
//! - **Type-driven design**: frequencies, tones and squelch levels are
//!   validated at parse time
//! - **No unsafe in library code**: interrupt wiring lives in the binary
//! - **Hardware behind traits**: see [`port`], mocked in host tests
//! - **Explicit error handling**: All fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// STM32G474 implementations of the collaborator traits.
#[cfg(feature = "embedded")]
pub mod hal;

/// Real-time audio path
///
/// Shared buffers and the sampler interrupt body.
pub mod audio;

/// Radio Control Logic
///
/// Mode state machine, runaway guard, radio module driver, main loop.
pub mod radio;

/// Communication Protocols
///
/// Delimited command framing on the host link.
pub mod protocol;

/// Host serial link
pub mod serial;

/// Collaborator traits
pub mod port;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Collaborator traits
    pub use crate::port::{AudioLine, Clock, ControlLine, HostLink, Watchdog};
    pub use crate::radio::module::RadioModule;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
