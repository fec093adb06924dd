//! Dual-buffer UC8176 (`2in7`).
//!
//! Grounded on `src/epd2in7/mod.rs`'s dual-RAM write pattern.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::{send_command, send_data_bulk};
use crate::EPD_BUSY_TIMEOUT_MS;

/// `custom_display` writes the same buffer to both the primary and
/// secondary data registers; `post_display` is `0x12` + busy.
pub struct Uc8176DualBuf;

impl Tier2Overrides for Uc8176DualBuf {
    fn custom_display(&self, hal: &dyn Hal, cfg: &ModelConfig, buf: &[u8]) -> Result<()> {
        send_command(hal, cfg.display_cmd);
        send_data_bulk(hal, buf);
        send_command(hal, cfg.display_cmd_2);
        send_data_bulk(hal, buf);
        Ok(())
    }

    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x12);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn writes_identical_payload_to_both_registers() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_2in7").unwrap();
        let buf = vec![0x55u8; 8];
        Uc8176DualBuf.custom_display(&hal, cfg, &buf).unwrap();
        assert_eq!(
            hal.events(),
            vec![
                TraceEvent::Command(cfg.display_cmd),
                TraceEvent::DataBulk(buf.clone()),
                TraceEvent::Command(cfg.display_cmd_2),
                TraceEvent::DataBulk(buf),
            ]
        );
    }
}
