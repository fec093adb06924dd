//! Regional-refresh engine: byte-aligned partial-window coordination for
//! the families that support it.
//!
//! Grounded on `original_source`'s window-register byte layout (the
//! `0x90`/`0x91`/`0x92` partial-window commands mirror the
//! `SET_WINDOW`/`SET_CURSOR` sentinel's `0x44`/`0x45` register convention in
//! `driver_registry.c`) and `src/rect.rs`'s rectangle-arithmetic
//! idiom, generalized to the byte-aligned math those controllers require.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::error::{EpdError, Result};
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::send_command;
use crate::spi::send_data;
use crate::EPD_BUSY_TIMEOUT_MS;

fn hi(v: u32) -> u8 {
    ((v >> 8) & 0xFF) as u8
}

fn lo(v: u32) -> u8 {
    (v & 0xFF) as u8
}

/// The `0x91`/`0x90` partial-window-entry handshake shared by both UC8179
/// regional variants.
fn enter_partial_window(hal: &dyn Hal, x: u32, y: u32, w: u32, h: u32) {
    let x_end = x + w - 1;
    let y_end = y + h - 1;
    send_command(hal, 0x91);
    send_command(hal, 0x90);
    send_data(hal, hi(x));
    send_data(hal, (x as u8) & 0xF8);
    send_data(hal, hi(x_end));
    send_data(hal, (x_end as u8) | 0x07);
    send_data(hal, hi(y));
    send_data(hal, lo(y));
    send_data(hal, hi(y_end));
    send_data(hal, lo(y_end));
    send_data(hal, 0x01);
}

fn validate_region(cfg: &ModelConfig, buf: &[u8], full_width_bytes: u32) -> Result<()> {
    let needed = full_width_bytes as usize * cfg.height as usize;
    if buf.len() < needed {
        return Err(EpdError::Param(format!(
            "{}: region buffer too small: need {needed}, got {}",
            cfg.name,
            buf.len()
        )));
    }
    Ok(())
}

/// When a model has no regional-aware Tier-2 hook, [`crate::driver`] falls
/// back to writing the whole buffer through the generic data path; this is
/// exactly what the SSD1680/SSD1677 families do, relying entirely on their
/// partial-TurnOn post-hook (see `models/ssd1680.rs`, `models/ssd1677.rs`) to
/// restrict the actual refresh to the requested rectangle.
pub fn generic_display_region(
    hal: &dyn Hal,
    cfg: &ModelConfig,
    buf: &[u8],
    _x: u32,
    _y: u32,
    _w: u32,
    _h: u32,
) -> Result<()> {
    crate::generic::generic_display(hal, cfg, buf)
}

/// UC8179 `5in83_v2` regional write: enter partial window, then stream
/// `region_width_bytes` per row from `buf` through `0x13`.
pub fn uc8179_5in83_v2_display_region(
    hal: &dyn Hal,
    cfg: &ModelConfig,
    buf: &[u8],
    x: u32,
    y: u32,
    w: u32,
    h: u32,
) -> Result<()> {
    let full_width_bytes = cfg.pixel_format.width_bytes(cfg.width);
    validate_region(cfg, buf, full_width_bytes)?;
    let x_byte_start = (x / 8) as usize;
    let region_width_bytes = cfg.pixel_format.width_bytes(w) as usize;

    enter_partial_window(hal, x, y, w, h);
    send_command(hal, 0x13);
    for row in 0..h {
        let start = (y + row) as usize * full_width_bytes as usize + x_byte_start;
        crate::spi::send_data_bulk(hal, &buf[start..start + region_width_bytes]);
    }
    send_command(hal, 0x12);
    hal.delay_ms(100);
    Ok(())
}

/// UC8179 `7in5b_v2` regional write: as `5in83_v2`, but first floods the
/// old-data (red) plane with `0xFF` over the same rectangle via `0x10`.
pub fn uc8179_7in5b_v2_display_region(
    hal: &dyn Hal,
    cfg: &ModelConfig,
    buf: &[u8],
    x: u32,
    y: u32,
    w: u32,
    h: u32,
) -> Result<()> {
    let full_width_bytes = cfg.pixel_format.width_bytes(cfg.width);
    validate_region(cfg, buf, full_width_bytes)?;
    let x_byte_start = (x / 8) as usize;
    let region_width_bytes = cfg.pixel_format.width_bytes(w) as usize;

    enter_partial_window(hal, x, y, w, h);
    send_command(hal, 0x10);
    let old_data = vec![0xFFu8; region_width_bytes * h as usize];
    crate::spi::send_data_bulk(hal, &old_data);
    send_command(hal, 0x13);
    for row in 0..h {
        let start = (y + row) as usize * full_width_bytes as usize + x_byte_start;
        crate::spi::send_data_bulk(hal, &buf[start..start + region_width_bytes]);
    }
    send_command(hal, 0x12);
    hal.delay_ms(100);
    Ok(())
}

/// The UC8179 regional post-hook: busy-wait, then exit partial window
/// (`0x92`).
pub fn uc8179_post_display_region(
    hal: &dyn Hal,
    cfg: &ModelConfig,
    cancel: &AtomicBool,
) -> Result<()> {
    read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
    send_command(hal, 0x92);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn uc8179_regional_window_entry_then_region_write() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_5in83_v2").unwrap();
        let full_width_bytes = cfg.pixel_format.width_bytes(cfg.width) as usize;
        let mut buf = vec![0u8; full_width_bytes * cfg.height as usize];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = (i % 256) as u8;
        }
        uc8179_5in83_v2_display_region(&hal, cfg, &buf, 16, 8, 32, 4).unwrap();

        let events = hal.events();
        assert_eq!(events[0], TraceEvent::Command(0x91));
        assert_eq!(events[1], TraceEvent::Command(0x90));
        let window_bytes: Vec<u8> = events[2..11]
            .iter()
            .map(|e| match e {
                TraceEvent::Data(b) => *b,
                other => panic!("expected Data, got {other:?}"),
            })
            .collect();
        assert_eq!(
            window_bytes,
            vec![0x00, 0x10, 0x00, 0x2F, 0x00, 0x08, 0x00, 0x0B, 0x01]
        );
        assert_eq!(events[11], TraceEvent::Command(0x13));
        for row in 0..4usize {
            let expected_start = (8 + row) * full_width_bytes + 2;
            assert_eq!(
                events[12 + row],
                TraceEvent::DataBulk(buf[expected_start..expected_start + 4].to_vec())
            );
        }
        assert_eq!(events[16], TraceEvent::Command(0x12));
        assert_eq!(events[17], TraceEvent::Delay(100));
    }

    #[test]
    fn undersized_buffer_is_param_error() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_5in83_v2").unwrap();
        let err =
            uc8179_5in83_v2_display_region(&hal, cfg, &[0u8; 4], 16, 8, 32, 4).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Param);
    }

    #[test]
    fn post_display_region_exits_partial_window() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_5in83_v2").unwrap();
        let cancel = AtomicBool::new(false);
        uc8179_post_display_region(&hal, cfg, &cancel).unwrap();
        assert!(hal.events().contains(&TraceEvent::Command(0x92)));
    }
}
