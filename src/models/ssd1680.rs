//! SSD1680 family TurnOn: `1in54`, `2in13`, `2in9`; `2in9b_v4`
//! reuses the family for its regional post-hook.
//!
//! Grounded on `src/epd2in13_v2/mod.rs` / `src/epd2in13b_v4/mod.rs`
//! (same `0x22`/`0x20` TurnOn register shape).

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::interpreter;
use crate::mode::Mode;
use crate::registry::ModelConfig;
use crate::spi::{send_command, send_data};
use crate::EPD_BUSY_TIMEOUT_MS;

/// The Full-refresh LUT. Waveform content is treated as opaque input data
/// here; this is a schematic 30-byte placeholder of the right shape.
const LUT_FULL: [u8; 30] = [0x00; 30];
/// The Partial-refresh LUT.
const LUT_PARTIAL: [u8; 30] = [0x01; 30];

/// SSD1680 TurnOn: generic init plus a LUT load, then a fixed `0x22 0xC4
/// 0x20 0xFF` refresh trigger.
pub struct Ssd1680;

impl Tier2Overrides for Ssd1680 {
    fn custom_init(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        mode: Mode,
        cancel: &AtomicBool,
    ) -> Result<()> {
        interpreter::run(hal, cfg, mode, cancel)?;
        let lut = if mode == Mode::Partial {
            &LUT_PARTIAL
        } else {
            &LUT_FULL
        };
        send_command(hal, 0x32);
        crate::spi::send_data_bulk(hal, lut);
        Ok(())
    }

    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x22);
        send_data(hal, 0xC4);
        send_command(hal, 0x20);
        send_command(hal, 0xFF);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}

/// Same family, but `post_display_region` uses the partial-TurnOn variant:
/// SSD1680 partial is `0x22, 0x1C, 0x20` then busy-wait.
pub struct Ssd1680Regional;

impl Tier2Overrides for Ssd1680Regional {
    fn custom_init(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        mode: Mode,
        cancel: &AtomicBool,
    ) -> Result<()> {
        Ssd1680.custom_init(hal, cfg, mode, cancel)
    }

    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        Ssd1680.post_display(hal, cfg, cancel)
    }

    fn post_display_region(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x22);
        send_data(hal, 0x1C);
        send_command(hal, 0x20);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)
    }
}
