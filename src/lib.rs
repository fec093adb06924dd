//! A multi-model driver engine for Waveshare-family e-paper displays.
//!
//! This crate is the hard core of a larger binding: it owns the driver
//! registry, the init-sequence bytecode interpreter, the framebuffer packing
//! rules, and the off-thread refresh execution model. It does **not** own a
//! canvas/font rasterizer, a concrete GPIO/SPI backend, or host-language
//! bindings; those are expected to live above or beside this crate.
//!
//! # Requirements
//!
//! ### HAL
//!
//! - Callers supply a [`hal::Hal`] implementation. [`hal::MockHal`] and
//!   [`hal::TraceHal`] are provided for development and tests.
//! - The HAL surface is intentionally not `embedded-hal`-shaped: models are
//!   selected by runtime string, not compile-time generic instantiation, so
//!   the HAL is a trait object (`Arc<dyn Hal>`), not a generic parameter.
//!
//! ### Threading
//!
//! - [`device::Device::display`] and friends run their hardware-facing work
//!   on a dedicated OS thread and block the caller on a channel receive. This
//!   is the single-process, single-bus discipline described in the
//!   concurrency model: exactly one [`device::Device`] may be mid-job on a
//!   physical bus at a time. See [`device`] for the cancellation handle.
//!
//! # Example
//!
//! ```no_run
//! use epd_engine::{device::Device, hal::MockHal, mode::Mode};
//! use std::sync::Arc;
//!
//! let hal = Arc::new(MockHal::new());
//! let device = Device::open("epd_2in13", hal).unwrap();
//! device.init(Mode::Full).unwrap();
//! device.sleep().unwrap();
//! ```

pub mod busy;
pub mod device;
pub mod driver;
pub mod error;
pub mod framebuffer;
pub mod generic;
pub mod hal;
pub mod interpreter;
pub mod mode;
pub mod models;
pub mod pixel_format;
pub mod regional;
pub mod registry;
pub mod registry_data;
pub mod spi;

pub use error::{EpdError, Result};
pub use framebuffer::Framebuffer;
pub use pixel_format::PixelFormat;
pub use registry::{ModelConfig, ModelDescriptor};

/// Default busy-wait timeout, in milliseconds (`EPD_BUSY_TIMEOUT_MS`).
pub const EPD_BUSY_TIMEOUT_MS: u32 = 5000;

/// Maximum permitted width or height for any panel, in pixels.
pub const EPD_MAX_DIMENSION: u32 = 4096;
