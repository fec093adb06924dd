//! UC8176 TurnOn: `4in2`, `3in52`, `3in7`.
//!
//! Grounded on `src/epd4in2/mod.rs`, `src/epd3in7/mod.rs`.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::send_command;
use crate::EPD_BUSY_TIMEOUT_MS;

/// UC8176 TurnOn: `0x12`, delay 100 ms, busy-wait.
pub struct Uc8176;

impl Tier2Overrides for Uc8176 {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x12);
        hal.delay_ms(100);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}
