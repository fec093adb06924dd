//! Driver dispatch: resolves per-model Tier-2 overrides by name and falls
//! through to the generic data path.
//!
//! Grounded on `original_source/ext/chroma_wave/driver_registry.c`'s
//! `tier2_drivers` table + `epd_find_driver` lookup. There, a model's
//! "driver" is a struct of nullable function pointers; here it is a Rust
//! trait with default method bodies that delegate to the generic path,
//! the natural way to express an interface of optional hooks, not
//! inheritance, without reintroducing null checks at every call site.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::{EpdError, Result};
use crate::generic;
use crate::hal::Hal;
use crate::interpreter;
use crate::mode::Mode;
use crate::regional;
use crate::registry::{Capabilities, ModelConfig};

/// The per-model override set a Tier-2 model registers. Every method has a
/// default body that reproduces the generic/Tier-1 behavior, so a driver
/// only needs to implement the hooks its controller family actually
/// changes.
pub trait Tier2Overrides: Send + Sync {
    /// Replaces generic init entirely when provided. The
    /// default simply runs the Tier-1 interpreter, so families that only
    /// need to append a post-init step (e.g. SSD1680's LUT load) can call
    /// `interpreter::run` themselves and continue from there.
    fn custom_init(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        mode: Mode,
        cancel: &AtomicBool,
    ) -> Result<()> {
        interpreter::run(hal, cfg, mode, cancel)
    }

    /// The data-write step of `display`.
    fn custom_display(&self, hal: &dyn Hal, cfg: &ModelConfig, buf: &[u8]) -> Result<()> {
        generic::generic_display(hal, cfg, buf)
    }

    /// The data-write step of `display_dual`.
    fn custom_display_dual(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        black: &[u8],
        red: &[u8],
    ) -> Result<()> {
        generic::generic_display_dual(hal, cfg, black, red)
    }

    /// The data-write step of `display_region`.
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
        regional::generic_display_region(hal, cfg, buf, x, y, w, h)
    }

    /// Runs before the data-write step of `display`/`display_dual`/`clear`.
    /// The default is a no-op.
    fn pre_display(&self, _hal: &dyn Hal, _cfg: &ModelConfig, _cancel: &AtomicBool) -> Result<()> {
        Ok(())
    }

    /// Runs after a successful data-write step of `display`/`display_dual`/
    /// `clear`; this is where most Tier-2 families trigger the actual
    /// refresh (TurnOnDisplay). The default is a no-op.
    fn post_display(
        &self,
        _hal: &dyn Hal,
        _cfg: &ModelConfig,
        _cancel: &AtomicBool,
    ) -> Result<()> {
        Ok(())
    }

    /// Runs after a successful `display_region` data-write step. Falls back
    /// to [`Tier2Overrides::post_display`] if not overridden: prefer
    /// `post_display_region`, otherwise `post_display`.
    fn post_display_region(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        self.post_display(hal, cfg, cancel)
    }
}

/// A model paired with its optional Tier-2 override set. Tier-1 models have
/// `overrides: None` and run purely through [`interpreter`]/[`generic`].
#[derive(Clone)]
pub struct Driver {
    /// The model this driver was resolved for.
    pub config: &'static ModelConfig,
    /// `Some` for Tier-2 models; `None` for Tier-1 models.
    pub overrides: Option<Arc<dyn Tier2Overrides>>,
}

impl Driver {
    /// Run `init(mode)`.
    pub fn init(&self, hal: &dyn Hal, mode: Mode, cancel: &AtomicBool) -> Result<()> {
        match &self.overrides {
            Some(ov) => ov.custom_init(hal, self.config, mode, cancel),
            None => interpreter::run(hal, self.config, mode, cancel),
        }
    }

    /// Run `display(buf)`: optional pre-hook, the data write, then the
    /// post-hook only if the write succeeded.
    pub fn display(&self, hal: &dyn Hal, buf: &[u8], cancel: &AtomicBool) -> Result<()> {
        match &self.overrides {
            Some(ov) => {
                ov.pre_display(hal, self.config, cancel)?;
                let result = ov.custom_display(hal, self.config, buf);
                if result.is_ok() {
                    ov.post_display(hal, self.config, cancel)?;
                }
                result
            }
            None => generic::generic_display(hal, self.config, buf),
        }
    }

    /// Run `display_dual(black, red)`.
    pub fn display_dual(
        &self,
        hal: &dyn Hal,
        black: &[u8],
        red: &[u8],
        cancel: &AtomicBool,
    ) -> Result<()> {
        if !self.config.capabilities.contains(Capabilities::DUAL_BUF) {
            return Err(EpdError::Param(format!(
                "{} does not support display_dual",
                self.config.name
            )));
        }
        match &self.overrides {
            Some(ov) => {
                ov.pre_display(hal, self.config, cancel)?;
                let result = ov.custom_display_dual(hal, self.config, black, red);
                if result.is_ok() {
                    ov.post_display(hal, self.config, cancel)?;
                }
                result
            }
            None => generic::generic_display_dual(hal, self.config, black, red),
        }
    }

    /// Run `display_region(buf, x, y, w, h)`.
    pub fn display_region(
        &self,
        hal: &dyn Hal,
        buf: &[u8],
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        cancel: &AtomicBool,
    ) -> Result<()> {
        if !self.config.capabilities.contains(Capabilities::REGIONAL) {
            return Err(EpdError::Param(format!(
                "{} does not support display_region",
                self.config.name
            )));
        }
        match &self.overrides {
            Some(ov) => {
                let result = ov.custom_display_region(hal, self.config, buf, x, y, w, h);
                if result.is_ok() {
                    ov.post_display_region(hal, self.config, cancel)?;
                }
                result
            }
            None => regional::generic_display_region(hal, self.config, buf, x, y, w, h),
        }
    }

    /// Run `clear()`: build the format-appropriate all-blank buffer then
    /// dispatch exactly as `display` would.
    pub fn clear(&self, hal: &dyn Hal, cancel: &AtomicBool) -> Result<()> {
        let fill = self.config.pixel_format.default_clear_byte();
        let buf = vec![fill; self.config.buffer_size()];
        self.display(hal, &buf, cancel)
    }

    /// Run `sleep()`.
    pub fn sleep(&self, hal: &dyn Hal) {
        generic::generic_sleep(hal, self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::TraceHal;
    use crate::registry::Registry;

    struct NoopOverrides;
    impl Tier2Overrides for NoopOverrides {}

    #[test]
    fn tier1_model_runs_generic_path_directly() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_1in02").unwrap();
        let driver = Driver {
            config: cfg,
            overrides: None,
        };
        let cancel = AtomicBool::new(false);
        assert!(driver.display(&hal, &[0xAA; 8], &cancel).is_ok());
    }

    #[test]
    fn driver_with_all_default_hooks_behaves_like_generic() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_2in13").unwrap();
        let driver = Driver {
            config: cfg,
            overrides: Some(Arc::new(NoopOverrides)),
        };
        let cancel = AtomicBool::new(false);
        assert!(driver.display(&hal, &[0x00; 16], &cancel).is_ok());
    }

    #[test]
    fn display_dual_rejected_on_non_dual_buf_model() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_2in13").unwrap();
        let driver = Driver {
            config: cfg,
            overrides: None,
        };
        let cancel = AtomicBool::new(false);
        let err = driver
            .display_dual(&hal, &[0u8; 4], &[0u8; 4], &cancel)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Param);
    }

    #[test]
    fn display_region_rejected_on_non_regional_model() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_4in2").unwrap();
        let driver = Driver {
            config: cfg,
            overrides: None,
        };
        let cancel = AtomicBool::new(false);
        let err = driver
            .display_region(&hal, &[0u8; 4], 0, 0, 8, 1, &cancel)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Param);
    }

    #[test]
    fn clear_fills_buffer_with_format_appropriate_byte() {
        use crate::hal::TraceEvent;
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_1in64g").unwrap();
        let driver = Driver {
            config: cfg,
            overrides: None,
        };
        let cancel = AtomicBool::new(false);
        driver.clear(&hal, &cancel).unwrap();
        let bulk = hal
            .events()
            .into_iter()
            .find_map(|e| match e {
                TraceEvent::DataBulk(b) => Some(b),
                _ => None,
            })
            .unwrap();
        assert!(bulk.iter().all(|&b| b == 0x11));
        assert_eq!(bulk.len(), cfg.buffer_size());
    }
}
