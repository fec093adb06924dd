//! Tri-color single-buffer (`7in5bc`).
//!
//! Grounded on `src/epd7in5bc/mod.rs`.

use std::sync::atomic::AtomicBool;

use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::models::uc8179_tricolor::turnon_post_display;
use crate::registry::ModelConfig;

/// `custom_display` just writes the buffer (the generic data path already
/// does exactly this); `post_display` shares the UC8179 TurnOn bracket used
/// by `5in83bc`.
pub struct TricolorSingle;

impl Tier2Overrides for TricolorSingle {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        turnon_post_display(hal, cfg, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn post_display_shares_uc8179_turn_on_shape() {
        let cfg = Registry.find("epd_7in5bc").unwrap();
        let hal = TraceHal::ready(cfg.busy_polarity);
        let cancel = AtomicBool::new(false);
        TricolorSingle.post_display(&hal, cfg, &cancel).unwrap();
        assert_eq!(
            hal.events(),
            vec![
                TraceEvent::Command(0x04),
                TraceEvent::Command(0x12),
                TraceEvent::Delay(100),
            ]
        );
    }
}
