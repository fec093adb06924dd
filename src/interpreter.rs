//! The Tier-1 init-sequence interpreter: selects a byte stream for the
//! requested mode, then scans it, emitting command/data SPI calls and
//! acting on sentinel opcodes.
//!
//! Grounded on `original_source/ext/chroma_wave/driver_registry.c`'s
//! `epd_generic_init`/`select_init_sequence`: identical sentinel opcode
//! values and `SET_WINDOW`/`SET_CURSOR` register byte layout.

use std::sync::atomic::AtomicBool;

use crate::busy::read_busy;
use crate::error::{EpdError, Result};
use crate::hal::Hal;
use crate::mode::Mode;
use crate::registry::ModelConfig;
use crate::spi::{reset, send_command, send_data};
use crate::EPD_BUSY_TIMEOUT_MS;

const END: u8 = 0xFE;
const WAIT_BUSY: u8 = 0xFF;
const DELAY_MS: u8 = 0xFD;
const HW_RESET: u8 = 0xFC;
const SW_RESET: u8 = 0xFB;
const SET_WINDOW: u8 = 0xFA;
const SET_CURSOR: u8 = 0xF9;

/// Pick the byte stream for `mode`, falling back to the Full sequence when
/// the model has no dedicated one. Grayscale always falls back unless the
/// model's Fast or Partial sequence was explicitly requested in its place;
/// Grayscale has no fallback slot of its own.
fn select_sequence<'a>(cfg: &'a ModelConfig, mode: Mode) -> &'a [u8] {
    match mode {
        Mode::Fast => cfg.init_fast_sequence.unwrap_or(cfg.init_sequence),
        Mode::Partial => cfg.init_partial_sequence.unwrap_or(cfg.init_sequence),
        Mode::Full | Mode::Grayscale => cfg.init_sequence,
    }
}

/// Run the init sequence selected for `mode` against `hal`.
///
/// # Errors
///
/// [`EpdError::Param`] on a truncated record (missing count or payload
/// byte); [`EpdError::BusyTimeout`] if a `WAIT_BUSY`/`SW_RESET` sentinel
/// times out or observes `cancel`.
pub fn run(hal: &dyn Hal, cfg: &ModelConfig, mode: Mode, cancel: &AtomicBool) -> Result<()> {
    let seq = select_sequence(cfg, mode);
    let mut i = 0usize;
    while i < seq.len() {
        let b = seq[i];
        if b < 0xF0 {
            let cmd = b;
            let count = *seq
                .get(i + 1)
                .ok_or_else(|| EpdError::Param("init sequence truncated: missing count".into()))?
                as usize;
            let data_start = i + 2;
            let data_end = data_start + count;
            if data_end > seq.len() {
                return Err(EpdError::Param(
                    "init sequence truncated: missing payload byte".into(),
                ));
            }
            send_command(hal, cmd);
            for &d in &seq[data_start..data_end] {
                send_data(hal, d);
            }
            i = data_end;
            continue;
        }

        match b {
            END => return Ok(()),
            WAIT_BUSY => {
                read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
                i += 1;
            }
            DELAY_MS => {
                let ms = *seq
                    .get(i + 1)
                    .ok_or_else(|| EpdError::Param("DELAY_MS missing duration byte".into()))?;
                hal.delay_ms(ms as u32);
                i += 2;
            }
            HW_RESET => {
                reset(hal, cfg);
                i += 1;
            }
            SW_RESET => {
                send_command(hal, 0x12);
                read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
                i += 1;
            }
            SET_WINDOW => {
                let width_last_byte = ((cfg.width - 1) / 8) as u8;
                send_command(hal, 0x44);
                send_data(hal, 0x00);
                send_data(hal, width_last_byte);
                let height_last = cfg.height - 1;
                send_command(hal, 0x45);
                send_data(hal, 0x00);
                send_data(hal, 0x00);
                send_data(hal, (height_last & 0xFF) as u8);
                send_data(hal, ((height_last >> 8) & 0xFF) as u8);
                i += 1;
            }
            SET_CURSOR => {
                send_command(hal, 0x4E);
                send_data(hal, 0x00);
                send_command(hal, 0x4F);
                send_data(hal, 0x00);
                send_data(hal, 0x00);
                i += 1;
            }
            _ => {
                // Unrecognized sentinel: skip.
                i += 1;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::TraceHal;
    use crate::registry::Registry;

    #[test]
    fn every_registered_model_terminates() {
        let reg = Registry;
        for name in reg.model_names() {
            let cfg = reg.find(name).unwrap();
            let hal = TraceHal::new();
            let cancel = AtomicBool::new(false);
            for mode in [Mode::Full, Mode::Fast, Mode::Partial, Mode::Grayscale] {
                let result = run(&hal, cfg, mode, &cancel);
                assert!(result.is_ok(), "{name} {mode:?} failed: {result:?}");
            }
        }
    }

    #[test]
    fn truncated_record_is_param_error() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_2in13").unwrap();
        let cancel = AtomicBool::new(false);
        let bad: &[u8] = &[0x01, 0x03, 0xAA]; // claims 3 data bytes, has 1
        let mut patched = *cfg;
        patched.init_sequence = bad;
        let err = run(&hal, &patched, Mode::Full, &cancel).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Param);
    }

    #[test]
    fn end_of_stream_without_end_opcode_is_ok() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_2in13").unwrap();
        let cancel = AtomicBool::new(false);
        let mut patched = *cfg;
        patched.init_sequence = &[0x01, 0x01, 0xAA];
        assert!(run(&hal, &patched, Mode::Full, &cancel).is_ok());
    }

    #[test]
    fn running_full_sequence_twice_produces_identical_trace() {
        let cfg = Registry.find("epd_2in13").unwrap();
        let hal_a = TraceHal::new();
        let cancel_a = AtomicBool::new(false);
        run(&hal_a, cfg, Mode::Full, &cancel_a).unwrap();
        let hal_b = TraceHal::new();
        let cancel_b = AtomicBool::new(false);
        run(&hal_b, cfg, Mode::Full, &cancel_b).unwrap();
        assert_eq!(hal_a.events(), hal_b.events());
    }
}
