//! UC8179 tri-color (`5in83bc`) and UC8179 regional refresh
//! (`5in83_v2`, `7in5b_v2`).
//!
//! Grounded on `src/epd5in83b_v2/mod.rs` for the TurnOn
//! bracket shape, and `original_source`'s partial-window command layout
//! (reimplemented in [`crate::regional`]) for the regional variant.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::regional;
use crate::registry::ModelConfig;
use crate::spi::send_command;
use crate::EPD_BUSY_TIMEOUT_MS;

/// `post_display` = `0x04` + busy; `0x12`; 100 ms delay; busy-wait.
pub(crate) fn turnon_post_display(
    hal: &dyn Hal,
    cfg: &ModelConfig,
    cancel: &AtomicBool,
) -> Result<()> {
    send_command(hal, 0x04);
    read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
    send_command(hal, 0x12);
    hal.delay_ms(100);
    read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
}

/// The plain (non-regional) UC8179 tri-color model.
pub struct Uc8179Tricolor;

impl Tier2Overrides for Uc8179Tricolor {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        turnon_post_display(hal, cfg, cancel)
    }
}

/// The regional UC8179 variants. `old_data_fill` selects the `7in5b_v2`
/// behavior of flooding the old-data (red) plane with `0xFF` before writing
/// the region.
pub struct Uc8179Regional {
    /// `true` for `7in5b_v2`; `false` for `5in83_v2`.
    pub old_data_fill: bool,
}

impl Tier2Overrides for Uc8179Regional {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        turnon_post_display(hal, cfg, cancel)
    }

    fn custom_display_region(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        buf: &[u8],
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    ) -> Result<()> {
        if self.old_data_fill {
            regional::uc8179_7in5b_v2_display_region(hal, cfg, buf, x, y, w, h)
        } else {
            regional::uc8179_5in83_v2_display_region(hal, cfg, buf, x, y, w, h)
        }
    }

    fn post_display_region(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        regional::uc8179_post_display_region(hal, cfg, cancel)
    }
}
