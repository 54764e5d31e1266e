//! Radio Control Logic
//!
//! Mode switching, transmit safety, the radio module collaborator and the
//! main loop that ties them to the host protocol.

pub mod bridge;
pub mod mode;
pub mod module;
pub mod runaway;
