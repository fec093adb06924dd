//! The static model configuration table: a representative table covering
//! every controller family this crate drives and every model exercised by
//! its end-to-end scenarios, rather than the full real-world catalog of
//! Waveshare panel variants.
//!
//! `SET_WINDOW`/`SET_CURSOR` sentinels compute their payload from the
//! `ModelConfig` at interpret time (see [`crate::interpreter`]), so the byte
//! strings below never bake in per-model width/height literals.

use crate::pixel_format::PixelFormat;
use crate::registry::{BusyPolarity, Capabilities, ModelConfig};

const HW_RESET: u8 = 0xFC;
const SW_RESET: u8 = 0xFB;
const SET_WINDOW: u8 = 0xFA;
const SET_CURSOR: u8 = 0xF9;
const END: u8 = 0xFE;

/// Shared base sequence for the mono SSD1680/SSD1677/UC8176-family panels:
/// reset, software reset (which itself busy-waits), driver output control,
/// data-entry mode, window/cursor setup, border waveform control.
const INIT_MONO_FULL: &[u8] = &[
    HW_RESET,
    SW_RESET,
    0x01, 0x03, 0x00, 0x00, 0x00, // driver output control
    0x11, 0x01, 0x03, // data entry mode: X increment, Y increment
    SET_WINDOW,
    SET_CURSOR,
    0x3C, 0x01, 0x05, // border waveform control
    END,
];

/// A shorter variant used for the Fast-refresh sequence: skips the border
/// waveform step.
const INIT_MONO_FAST: &[u8] = &[
    HW_RESET,
    SW_RESET,
    0x01, 0x03, 0x00, 0x00, 0x00,
    0x11, 0x01, 0x03,
    SET_WINDOW,
    SET_CURSOR,
    END,
];

/// Partial-refresh sequence: no hardware reset (the controller's RAM must
/// survive), just a software reset and window/cursor setup.
const INIT_MONO_PARTIAL: &[u8] = &[
    SW_RESET,
    SET_WINDOW,
    SET_CURSOR,
    0x3C, 0x01, 0x80, // border waveform control, partial variant
    END,
];

/// Grayscale init: the mono base plus a VCOM/LUT register write before
/// window setup.
const INIT_GRAYSCALE: &[u8] = &[
    HW_RESET,
    SW_RESET,
    0x01, 0x03, 0x00, 0x00, 0x00,
    0x11, 0x01, 0x03,
    0x2C, 0x01, 0x36, // write VCOM register
    SET_WINDOW,
    SET_CURSOR,
    END,
];

/// Shared base sequence for the 4-bit color panels (color-gate-driven, 7in3
/// family, ACeP): panel setting, power setting, booster soft-start, PLL,
/// resolution, VCOM/data interval.
const INIT_COLOR_FULL: &[u8] = &[
    HW_RESET,
    0x00, 0x02, 0x0F, 0x29, // panel setting
    0x01, 0x04, 0x07, 0x07, 0x3F, 0x3F, // power setting
    0x06, 0x03, 0x17, 0x17, 0x28, // booster soft start
    0x30, 0x01, 0x3C, // PLL control
    0x82, 0x01, 0x12, // VCOM DC setting
    SET_WINDOW,
    SET_CURSOR,
    0xE3, 0x01, 0x00, // power saving
    END,
];

/// `ModelConfig` is `Copy`, so the table is a plain static slice; no
/// `lazy_static`/`once_cell` machinery needed.
pub static MODELS: &[ModelConfig] = &[
    // --- Tier-1: driven purely by the generic interpreter + data path. ---
    ModelConfig {
        name: "epd_1in02",
        width: 80,
        height: 128,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x13,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: false,
    },
    ModelConfig {
        name: "epd_2in66",
        width: 152,
        height: 296,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: Some(INIT_MONO_FAST),
        init_partial_sequence: None,
        capabilities: Capabilities::FAST,
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: false,
    },
    // --- SSD1680 family (1in54, 2in13, 2in9; regional reuse 2in9b_v4). ---
    ModelConfig {
        name: "epd_1in54",
        width: 200,
        height: 200,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: Some(INIT_MONO_PARTIAL),
        capabilities: Capabilities::PARTIAL,
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: true,
    },
    ModelConfig {
        name: "epd_2in13",
        width: 122,
        height: 250,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: Some(INIT_MONO_PARTIAL),
        capabilities: Capabilities::PARTIAL,
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: true,
    },
    ModelConfig {
        name: "epd_2in9",
        width: 128,
        height: 296,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: Some(INIT_MONO_PARTIAL),
        capabilities: Capabilities::PARTIAL,
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: true,
    },
    ModelConfig {
        name: "epd_2in9b_v4",
        width: 128,
        height: 296,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: Some(INIT_MONO_PARTIAL),
        capabilities: Capabilities::from_bits_truncate(
            Capabilities::PARTIAL.bits() | Capabilities::REGIONAL.bits(),
        ),
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: true,
    },
    // --- SSD1677 family (4in2_v2, 4in26, 13in3k; regional reuse 2in7_v2). ---
    ModelConfig {
        name: "epd_4in2_v2",
        width: 400,
        height: 300,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: Some(INIT_MONO_FAST),
        init_partial_sequence: None,
        capabilities: Capabilities::FAST,
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: true,
    },
    ModelConfig {
        name: "epd_2in7_v2",
        width: 176,
        height: 264,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::REGIONAL,
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: true,
    },
    // --- UC8176 TurnOn (4in2, 3in52, 3in7). ---
    ModelConfig {
        name: "epd_4in2",
        width: 400,
        height: 300,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x13,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    ModelConfig {
        name: "epd_3in7",
        width: 280,
        height: 480,
        pixel_format: PixelFormat::Gray4,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x13,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: Some(INIT_MONO_FAST),
        init_partial_sequence: None,
        capabilities: Capabilities::from_bits_truncate(
            Capabilities::FAST.bits() | Capabilities::GRAYSCALE.bits(),
        ),
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    // --- Dual-buffer UC8176 (2in7). ---
    ModelConfig {
        name: "epd_2in7",
        width: 176,
        height: 264,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0x13,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::DUAL_BUF,
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    // --- Color gate-driven (1in64g, 2in15g, 2in36g, 3in0g, 4in37g). ---
    ModelConfig {
        name: "epd_1in64g",
        width: 168,
        height: 168,
        pixel_format: PixelFormat::Color4,
        busy_polarity: BusyPolarity::ActiveHigh,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0,
        init_sequence: INIT_COLOR_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x02,
        sleep_data: 0x00,
        tier2: true,
    },
    // --- 7in3 family (7in3f, 7in3g, 7in3e). ---
    ModelConfig {
        name: "epd_7in3f",
        width: 800,
        height: 480,
        pixel_format: PixelFormat::Color4,
        busy_polarity: BusyPolarity::ActiveHigh,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0,
        init_sequence: INIT_COLOR_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x07,
        sleep_data: 0xA5,
        tier2: true,
    },
    ModelConfig {
        name: "epd_7in3e",
        width: 800,
        height: 480,
        pixel_format: PixelFormat::Color4,
        busy_polarity: BusyPolarity::ActiveHigh,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0,
        init_sequence: INIT_COLOR_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x07,
        sleep_data: 0xA5,
        tier2: true,
    },
    // --- ACeP 7-color (4in01f, 5in65f). ---
    ModelConfig {
        name: "epd_5in65f",
        width: 600,
        height: 448,
        pixel_format: PixelFormat::Color7,
        busy_polarity: BusyPolarity::ActiveHigh,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0,
        init_sequence: INIT_COLOR_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x07,
        sleep_data: 0xA5,
        tier2: true,
    },
    ModelConfig {
        name: "epd_4in01f",
        width: 640,
        height: 400,
        pixel_format: PixelFormat::Color7,
        busy_polarity: BusyPolarity::ActiveHigh,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0,
        init_sequence: INIT_COLOR_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x07,
        sleep_data: 0xA5,
        tier2: true,
    },
    // --- UC8179 tri-color (5in83bc). ---
    ModelConfig {
        name: "epd_5in83bc",
        width: 648,
        height: 480,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0x13,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::DUAL_BUF,
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    // --- Dual-buffer UC8179 inverted copy (7in5_v2). ---
    ModelConfig {
        name: "epd_7in5_v2",
        width: 800,
        height: 480,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0x13,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::DUAL_BUF,
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    // --- Tri-color single-buffer (7in5bc). ---
    ModelConfig {
        name: "epd_7in5bc",
        width: 800,
        height: 480,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    // --- Non-standard (1in02d). ---
    ModelConfig {
        name: "epd_1in02d",
        width: 80,
        height: 128,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x13,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::empty(),
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    // --- UC8179 regional (5in83_v2, 7in5b_v2). ---
    ModelConfig {
        name: "epd_5in83_v2",
        width: 648,
        height: 480,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x13,
        display_cmd_2: 0,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::REGIONAL,
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    ModelConfig {
        name: "epd_7in5b_v2",
        width: 800,
        height: 480,
        pixel_format: PixelFormat::Mono,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x10,
        display_cmd_2: 0x13,
        init_sequence: INIT_MONO_FULL,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::from_bits_truncate(
            Capabilities::DUAL_BUF.bits() | Capabilities::REGIONAL.bits(),
        ),
        sleep_cmd: 0x50,
        sleep_data: 0xF7,
        tier2: true,
    },
    // Grayscale-capable non-UC8176 example, exercised in isolation from
    // epd_3in7 above to cover the Grayscale-only init path.
    ModelConfig {
        name: "epd_2in13b_v4",
        width: 122,
        height: 250,
        pixel_format: PixelFormat::Gray4,
        busy_polarity: BusyPolarity::ActiveLow,
        reset_ms: [20, 2, 20],
        display_cmd: 0x24,
        display_cmd_2: 0x26,
        init_sequence: INIT_GRAYSCALE,
        init_fast_sequence: None,
        init_partial_sequence: None,
        capabilities: Capabilities::from_bits_truncate(
            Capabilities::GRAYSCALE.bits() | Capabilities::DUAL_BUF.bits(),
        ),
        sleep_cmd: 0x10,
        sleep_data: 0x01,
        tier2: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn table_contains_every_scenario_model() {
        let reg = Registry;
        for name in [
            "epd_2in13",
            "epd_4in2",
            "epd_7in5_v2",
            "epd_5in83_v2",
            "epd_5in65f",
        ] {
            assert!(reg.find(name).is_ok(), "missing scenario model {name}");
        }
    }

    #[test]
    fn no_duplicate_names() {
        let reg = Registry;
        let names = reg.model_names();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b, "duplicate model name {a}");
            }
        }
    }
}
