//! Color gate-driven protocol: `1in64g`, `2in15g`, `2in36g`, `3in0g`,
//! `4in37g`.
//!
//! Grounded on `src/epd7in5bc/mod.rs`'s power on/off bracketing
//! shape, generalized to this family's charge-pump command bytes.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::{send_command, send_data};
use crate::EPD_BUSY_TIMEOUT_MS;

/// Charge-pump-bracketed refresh: `pre_display` turns the pump and panel
/// power on; `post_display` triggers the refresh then powers the panel back
/// down.
pub struct ColorGate;

impl Tier2Overrides for ColorGate {
    fn pre_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x68);
        send_data(hal, 0x01);
        send_command(hal, 0x04);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }

    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x68);
        send_data(hal, 0x00);
        send_command(hal, 0x12);
        send_data(hal, 0x01);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
        send_command(hal, 0x02);
        send_data(hal, 0x00);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn pre_and_post_display_bracket_the_refresh() {
        let cfg = Registry.find("epd_1in64g").unwrap();
        let hal = TraceHal::ready(cfg.busy_polarity);
        let cancel = AtomicBool::new(false);
        let ov = ColorGate;
        ov.pre_display(&hal, cfg, &cancel).unwrap();
        ov.post_display(&hal, cfg, &cancel).unwrap();
        assert_eq!(
            hal.events(),
            vec![
                TraceEvent::Command(0x68),
                TraceEvent::Data(0x01),
                TraceEvent::Command(0x04),
                TraceEvent::Command(0x68),
                TraceEvent::Data(0x00),
                TraceEvent::Command(0x12),
                TraceEvent::Data(0x01),
                TraceEvent::Command(0x02),
                TraceEvent::Data(0x00),
            ]
        );
    }
}
