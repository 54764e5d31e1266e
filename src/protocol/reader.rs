//! Receive-mode frame reader
//!
//! Reads an aligned command frame from the host link. All bytes of one
//! frame share a single deadline; if it passes before the frame is
//! complete the frame is abandoned.

use super::command::Command;
use super::{ProtocolError, Selector, DELIMITER, DELIMITER_LEN, MAX_PARAMS};
use crate::port::{Clock, HostLink};
use crate::types::Micros;

/// Shared deadline for a multi-byte read
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Micros,
    budget_us: u32,
}

impl Deadline {
    /// Deadline `budget_us` from now
    pub fn after<K: Clock>(clock: &K, budget_us: u32) -> Self {
        Self {
            start: clock.now(),
            budget_us,
        }
    }

    /// Time left, `None` once expired
    pub fn remaining<K: Clock>(&self, clock: &K) -> Option<u32> {
        let left = self.budget_us.checked_sub(clock.now().since(self.start))?;
        (left > 0).then_some(left)
    }
}

/// Fill `buf` from the link before `deadline` passes
pub fn read_exact_until<L: HostLink, K: Clock>(
    link: &mut L,
    clock: &K,
    buf: &mut [u8],
    deadline: Deadline,
) -> Result<(), ProtocolError> {
    for slot in buf.iter_mut() {
        let left = deadline.remaining(clock).ok_or(ProtocolError::Timeout)?;
        *slot = link.read_byte(left).ok_or(ProtocolError::Timeout)?;
    }
    Ok(())
}

/// Fill `buf` from the link within `timeout_us`
pub fn read_exact_within<L: HostLink, K: Clock>(
    link: &mut L,
    clock: &K,
    buf: &mut [u8],
    timeout_us: u32,
) -> Result<(), ProtocolError> {
    read_exact_until(link, clock, buf, Deadline::after(clock, timeout_us))
}

/// Read and decode one aligned command frame.
///
/// On any error the bytes already read are discarded and no command is
/// returned, so nothing of the frame takes effect.
pub fn read_command<L: HostLink, K: Clock>(
    link: &mut L,
    clock: &K,
    timeout_us: u32,
) -> Result<Command, ProtocolError> {
    let deadline = Deadline::after(clock, timeout_us);

    let mut header = [0u8; DELIMITER_LEN + 1];
    read_exact_until(link, clock, &mut header, deadline)?;

    let (delimiter, selector) = header.split_at(DELIMITER_LEN);
    if delimiter != DELIMITER {
        return Err(ProtocolError::MisalignedFrame);
    }
    let selector_byte = selector.first().copied().unwrap_or_default();
    let selector =
        Selector::from_byte(selector_byte).ok_or(ProtocolError::UnknownSelector(selector_byte))?;

    let mut params = [0u8; MAX_PARAMS];
    let params = &mut params[..selector.param_len()];
    read_exact_until(link, clock, params, deadline)?;

    Command::parse(selector, params)
}
