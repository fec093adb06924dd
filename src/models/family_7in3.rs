//! 7in3 family: `7in3f`, `7in3g` (plain), `7in3e` (re-emits the
//! booster soft-start before refresh).
//!
//! Grounded on `src/epd7in5bc/graphics.rs`'s sibling shape for
//! the power-on/refresh/power-off bracket, and `other_examples`'s
//! Waveshare-booster re-emit idiom for the `7in3e` variant.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::{send_command, send_data};
use crate::EPD_BUSY_TIMEOUT_MS;

/// `pre_display` is empty; `post_display` is power-on, refresh, power-off,
/// each followed by a busy-wait. `booster: true` (the `7in3e` variant)
/// re-emits the booster soft-start command right before the refresh step.
pub struct Family7in3 {
    /// Whether to re-emit the booster soft-start before refresh (`7in3e`).
    pub booster: bool,
}

impl Tier2Overrides for Family7in3 {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x04);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;

        if self.booster {
            send_command(hal, 0x06);
            for b in [0x6F, 0x1F, 0x17, 0x17] {
                send_data(hal, b);
            }
        }

        send_command(hal, 0x12);
        send_data(hal, 0x00);
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
    fn plain_variant_has_no_booster_reemit() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_7in3f").unwrap();
        let cancel = AtomicBool::new(false);
        Family7in3 { booster: false }
            .post_display(&hal, cfg, &cancel)
            .unwrap();
        assert!(!hal.events().contains(&TraceEvent::Command(0x06)));
    }

    #[test]
    fn booster_variant_reemits_soft_start_before_refresh() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_7in3e").unwrap();
        let cancel = AtomicBool::new(false);
        Family7in3 { booster: true }
            .post_display(&hal, cfg, &cancel)
            .unwrap();
        let events = hal.events();
        let booster_idx = events
            .iter()
            .position(|e| *e == TraceEvent::Command(0x06))
            .unwrap();
        let refresh_idx = events
            .iter()
            .position(|e| *e == TraceEvent::Command(0x12))
            .unwrap();
        assert!(booster_idx < refresh_idx);
    }
}
