//! The busy-wait engine: polarity-aware BUSY polling with a timeout and a
//! caller-supplied cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;

use crate::error::{EpdError, Result};
use crate::hal::Hal;
use crate::registry::BusyPolarity;

/// Poll BUSY once per millisecond, up to `timeout_ms`, returning as soon as
/// the pin reports idle for `polarity`. Checked before every poll: if
/// `cancel` is set, returns [`EpdError::BusyTimeout`] immediately, which is
/// what lets an unblock callback interrupt a job promptly.
pub fn read_busy(
    hal: &dyn Hal,
    polarity: BusyPolarity,
    timeout_ms: u32,
    cancel: &AtomicBool,
) -> Result<()> {
    let idle_level = polarity.idle_level();
    let pins = hal.pins();
    let mut waited = 0u32;
    loop {
        if cancel.load(Ordering::Acquire) {
            warn!("busy-wait cancelled after {waited}ms");
            return Err(EpdError::BusyTimeout);
        }
        if hal.digital_read(pins.busy) == idle_level {
            return Ok(());
        }
        if waited >= timeout_ms {
            warn!("busy-wait timed out after {waited}ms");
            return Err(EpdError::BusyTimeout);
        }
        hal.delay_ms(1);
        waited += 1;
    }
}

/// `read_busy` with polarity fixed to [`BusyPolarity::ActiveHigh`].
pub fn wait_busy_high(hal: &dyn Hal, timeout_ms: u32, cancel: &AtomicBool) -> Result<()> {
    read_busy(hal, BusyPolarity::ActiveHigh, timeout_ms, cancel)
}

/// `read_busy` with polarity fixed to [`BusyPolarity::ActiveLow`].
pub fn wait_busy_low(hal: &dyn Hal, timeout_ms: u32, cancel: &AtomicBool) -> Result<()> {
    read_busy(hal, BusyPolarity::ActiveLow, timeout_ms, cancel)
}
