//! The static model registry: per-model `ModelConfig` entries and the
//! public descriptor map built over them.

use bitflags::bitflags;

use crate::error::{EpdError, Result};
use crate::pixel_format::PixelFormat;
use crate::registry_data::MODELS;

/// Which pin level means "not busy" for a given controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyPolarity {
    /// "Not busy" is a LOW pin reading.
    ActiveHigh,
    /// "Not busy" is a HIGH pin reading.
    ActiveLow,
}

impl BusyPolarity {
    /// The pin level [`crate::busy::read_busy`] treats as "idle" for this
    /// polarity.
    pub fn idle_level(self) -> bool {
        match self {
            BusyPolarity::ActiveHigh => false,
            BusyPolarity::ActiveLow => true,
        }
    }

    /// Name used in the model descriptor map.
    pub fn as_str(self) -> &'static str {
        match self {
            BusyPolarity::ActiveHigh => "active_high",
            BusyPolarity::ActiveLow => "active_low",
        }
    }
}

bitflags! {
    /// Capability bits a model may advertise: `Partial=1, Fast=2,
    /// Grayscale=4, DualBuf=8, Regional=16`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// Has a dedicated partial-refresh init sequence.
        const PARTIAL = 1;
        /// Has a dedicated fast-refresh init sequence.
        const FAST = 2;
        /// Has a dedicated grayscale waveform.
        const GRAYSCALE = 4;
        /// Writes two data buffers (black + red/old-data) per refresh.
        const DUAL_BUF = 8;
        /// Supports `display_region` (partial-window refresh).
        const REGIONAL = 16;
    }
}

/// A packed init-sequence byte string, as interpreted by
/// [`crate::interpreter`].
pub type InitSequence = &'static [u8];

/// Immutable, statically-defined per-model configuration.
#[derive(Debug, Clone, Copy)]
pub struct ModelConfig {
    /// Stable identifier, e.g. `"epd_2in13"`.
    pub name: &'static str,
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    /// Packed pixel format this panel's RAM expects.
    pub pixel_format: PixelFormat,
    /// Polarity of the BUSY pin.
    pub busy_polarity: BusyPolarity,
    /// `[pre-low, low, post-low]` millisecond delays for the reset pulse.
    pub reset_ms: [u32; 3],
    /// Primary data-write opcode.
    pub display_cmd: u8,
    /// Secondary data-write opcode, or `0` if the model has none.
    pub display_cmd_2: u8,
    /// The Full-refresh init sequence (always present).
    pub init_sequence: InitSequence,
    /// The Fast-refresh init sequence, if distinct from Full.
    pub init_fast_sequence: Option<InitSequence>,
    /// The Partial-refresh init sequence, if distinct from Full.
    pub init_partial_sequence: Option<InitSequence>,
    /// Advertised capability bits.
    pub capabilities: Capabilities,
    /// Sleep-command opcode.
    pub sleep_cmd: u8,
    /// Sleep-command data byte.
    pub sleep_data: u8,
    /// `true` if this model has a Tier-2 override set registered in
    /// [`crate::driver`]; informational only (the descriptor map reports it,
    /// dispatch itself just looks the overrides up again).
    pub tier2: bool,
}

impl ModelConfig {
    /// `⌈width·bpp/8⌉`, the packed row stride this model's framebuffers must
    /// use.
    pub fn width_byte(&self) -> u32 {
        self.pixel_format.width_bytes(self.width)
    }

    /// Total framebuffer size in bytes for this model: `width_byte * height`.
    pub fn buffer_size(&self) -> usize {
        self.width_byte() as usize * self.height as usize
    }
}

/// A snapshot of registry lookup results, returned by
/// [`Registry::model_config`], the public "descriptor map" entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Stable identifier.
    pub name: &'static str,
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    /// Packed pixel format.
    pub pixel_format: PixelFormat,
    /// BUSY pin polarity.
    pub busy_polarity: BusyPolarity,
    /// Advertised capability bits.
    pub capabilities: Capabilities,
    /// Primary data-write opcode.
    pub display_cmd: u8,
    /// Secondary data-write opcode, `0` if none.
    pub display_cmd_2: u8,
    /// Sleep-command opcode.
    pub sleep_cmd: u8,
    /// Sleep-command data byte.
    pub sleep_data: u8,
    /// Whether a Tier-2 override set is registered for this model.
    pub tier2: bool,
}

impl From<&ModelConfig> for ModelDescriptor {
    fn from(cfg: &ModelConfig) -> Self {
        ModelDescriptor {
            name: cfg.name,
            width: cfg.width,
            height: cfg.height,
            pixel_format: cfg.pixel_format,
            busy_polarity: cfg.busy_polarity,
            capabilities: cfg.capabilities,
            display_cmd: cfg.display_cmd,
            display_cmd_2: cfg.display_cmd_2,
            sleep_cmd: cfg.sleep_cmd,
            sleep_data: cfg.sleep_data,
            tier2: cfg.tier2,
        }
    }
}

/// Read-only view over the static model table. The table itself
/// lives in [`crate::registry_data`]; `Registry` is a thin, declaration-order
/// lookup surface over it, matching
/// `original_source/ext/chroma_wave/driver_registry.c`'s
/// `epd_find_config`/`epd_model_count`/`epd_model_at` shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct Registry;

impl Registry {
    /// Number of models in the table.
    pub fn model_count(&self) -> usize {
        MODELS.len()
    }

    /// Every model name, in declaration order.
    pub fn model_names(&self) -> Vec<&'static str> {
        MODELS.iter().map(|cfg| cfg.name).collect()
    }

    /// Look up a model's full config by exact name match.
    pub fn find(&self, name: &str) -> Result<&'static ModelConfig> {
        MODELS
            .iter()
            .find(|cfg| cfg.name == name)
            .ok_or_else(|| EpdError::ModelNotFound(name.to_string()))
    }

    /// The public descriptor map entry for a model.
    pub fn model_config(&self, name: &str) -> Result<ModelDescriptor> {
        self.find(name).map(ModelDescriptor::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_model_has_sane_dimensions() {
        let reg = Registry;
        for name in reg.model_names() {
            let cfg = reg.find(name).unwrap();
            assert!(
                (1..=crate::EPD_MAX_DIMENSION).contains(&cfg.width),
                "{name} width"
            );
            assert!(
                (1..=crate::EPD_MAX_DIMENSION).contains(&cfg.height),
                "{name} height"
            );
        }
    }

    #[test]
    fn dual_buf_models_have_a_second_display_command() {
        let reg = Registry;
        for name in reg.model_names() {
            let cfg = reg.find(name).unwrap();
            if cfg.capabilities.contains(Capabilities::DUAL_BUF) {
                assert_ne!(cfg.display_cmd_2, 0, "{name} missing display_cmd_2");
            }
        }
    }

    #[test]
    fn unknown_model_is_model_not_found() {
        let reg = Registry;
        let err = reg.find("epd_does_not_exist").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ModelNotFound);
    }

    #[test]
    fn model_count_matches_names_len() {
        let reg = Registry;
        assert_eq!(reg.model_count(), reg.model_names().len());
    }
}
