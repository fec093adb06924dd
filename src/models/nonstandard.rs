//! Non-standard protocol (`1in02d`).
//!
//! Grounded on `src/epd1in02/mod.rs`.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::send_command;
use crate::EPD_BUSY_TIMEOUT_MS;

/// `post_display` = `0x04` + busy; `0x12` + busy; `0x02` + busy, each step
/// getting its own busy-wait, unlike the other families' bracket shapes.
pub struct NonStandard;

impl Tier2Overrides for NonStandard {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x04);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
        send_command(hal, 0x12);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
        send_command(hal, 0x02);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn three_commands_each_followed_by_a_busy_wait() {
        let cfg = Registry.find("epd_1in02d").unwrap();
        let hal = TraceHal::ready(cfg.busy_polarity);
        let cancel = AtomicBool::new(false);
        NonStandard.post_display(&hal, cfg, &cancel).unwrap();
        assert_eq!(
            hal.events(),
            vec![
                TraceEvent::Command(0x04),
                TraceEvent::Command(0x12),
                TraceEvent::Command(0x02),
            ]
        );
    }
}
