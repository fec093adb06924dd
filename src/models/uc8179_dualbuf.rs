//! Dual-buffer UC8179 with an inverted second copy (`7in5_v2`).
//!
//! Grounded on `other_examples`'s `epd7in5_v2` drivers (bit-inverted
//! old-data write). The inversion buffer is allocated off the host
//! execution lock, so its allocation must be fallible rather than
//! abort-on-OOM.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::{EpdError, Result};
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::{send_command, send_data_bulk};
use crate::EPD_BUSY_TIMEOUT_MS;

/// `custom_display` sends `buf` unmodified on `display_cmd`, then a
/// bit-inverted copy on `display_cmd_2`. `post_display` is `0x12`; 100 ms
/// delay; busy-wait.
pub struct Uc8179DualBuf;

impl Tier2Overrides for Uc8179DualBuf {
    fn custom_display(&self, hal: &dyn Hal, cfg: &ModelConfig, buf: &[u8]) -> Result<()> {
        send_command(hal, cfg.display_cmd);
        send_data_bulk(hal, buf);

        let mut inverted = Vec::new();
        inverted
            .try_reserve_exact(buf.len())
            .map_err(|e| EpdError::Alloc(e.to_string()))?;
        inverted.extend(buf.iter().map(|b| !b));

        send_command(hal, cfg.display_cmd_2);
        send_data_bulk(hal, &inverted);
        drop(inverted);
        Ok(())
    }

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
