//! SSD1677 family TurnOn: `4in2_v2`, `4in26`, `13in3k`; `2in7_v2`
//! reuses the family.
//!
//! Grounded on `other_examples`'s SSD1677 command reference and
//! `src/epd7in5_v3` (the same controller generation's successor family in
//! this crate's reference lineage).

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::{send_command, send_data};
use crate::EPD_BUSY_TIMEOUT_MS;

/// SSD1677 TurnOn: `0x22, 0xF7, 0x20` then busy-wait.
pub struct Ssd1677;

impl Tier2Overrides for Ssd1677 {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x22);
        send_data(hal, 0xF7);
        send_command(hal, 0x20);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}

/// Same family, with the partial-TurnOn post-hook for regional refresh:
/// SSD1677 partial is `0x22, 0xFF, 0x20` then busy-wait.
pub struct Ssd1677Regional;

impl Tier2Overrides for Ssd1677Regional {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        Ssd1677.post_display(hal, cfg, cancel)
    }

    fn post_display_region(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x22);
        send_data(hal, 0xFF);
        send_command(hal, 0x20);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn turn_on_sequence_emits_expected_bytes() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_4in2_v2").unwrap();
        let cancel = AtomicBool::new(false);
        Ssd1677.post_display(&hal, cfg, &cancel).unwrap();
        assert_eq!(
            hal.events(),
            vec![
                TraceEvent::Command(0x22),
                TraceEvent::Data(0xF7),
                TraceEvent::Command(0x20),
            ]
        );
    }
}
