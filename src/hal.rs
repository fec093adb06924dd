//! The HAL collaborator and the two test backends built on it.
//!
//! `Hal` is a plain trait object, not an `embedded-hal` generic parameter:
//! models are looked up by runtime string, so every layer above this one
//! works against `&dyn Hal` / `Arc<dyn Hal>` rather than a concrete type.
//! It must be `Send + Sync` because [`crate::device`] moves it onto a worker
//! thread for every job.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;

use crate::registry::BusyPolarity;

/// GPIO pin identifiers used by the engine. Values are plain integers
/// (matching `original_source/mock_hal.c`'s `EPD_RST_PIN`-style constants);
/// a concrete `Hal` backend interprets them however its platform requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pins {
    /// Reset pin.
    pub rst: u32,
    /// Data/Command select pin.
    pub dc: u32,
    /// Chip select pin.
    pub cs: u32,
    /// Busy/ready pin.
    pub busy: u32,
    /// Panel power pin.
    pub pwr: u32,
    /// SPI MOSI pin (informational; most backends configure this out of
    /// band).
    pub mosi: u32,
    /// SPI clock pin (informational).
    pub sclk: u32,
}

impl Default for Pins {
    fn default() -> Self {
        // Matches the Waveshare Raspberry Pi HAT pinout used throughout the
        // pack's reference drivers.
        Pins {
            rst: 17,
            dc: 25,
            cs: 8,
            busy: 24,
            pwr: 18,
            mosi: 10,
            sclk: 11,
        }
    }
}

/// The hardware abstraction layer every driver operation is built on.
///
/// # Contract
///
/// - `module_init` returning nonzero is surfaced as [`crate::EpdError::Init`].
/// - `spi_write_n` must transmit exactly `buf.len()` bytes and must not
///   modify `buf`.
pub trait Hal: Send + Sync {
    /// The pin assignment this backend was constructed with.
    fn pins(&self) -> Pins;

    /// Drive `pin` high (`true`) or low (`false`).
    fn digital_write(&self, pin: u32, value: bool);

    /// Read the current level of `pin`.
    fn digital_read(&self, pin: u32) -> bool;

    /// Write one byte over SPI.
    fn spi_write_byte(&self, value: u8);

    /// Write `buf` over SPI in one bulk transfer.
    fn spi_write_n(&self, buf: &[u8]);

    /// Sleep the calling thread for `ms` milliseconds.
    fn delay_ms(&self, ms: u32);

    /// Bring up the underlying GPIO/SPI subsystem. `0` on success; any
    /// nonzero value is surfaced as [`crate::EpdError::Init`].
    fn module_init(&self) -> i32;

    /// Tear down the underlying GPIO/SPI subsystem.
    fn module_exit(&self);
}

/// A no-op HAL whose `digital_read` alternates between `false` and `true` on
/// every call, so polarity-agnostic busy polling always terminates in a
/// finite number of steps regardless of which polarity is under test.
///
/// Grounded on `original_source/ext/chroma_wave/mock_hal.c`'s
/// `mock_busy_state` toggle; here it's an `AtomicBool` so multiple `Device`s
/// can drive off-thread jobs against the same `MockHal` concurrently without
/// racing (the per-device cancel flag is what actually needs to be
/// race-free; the busy toggle here is merely convenient to share too).
#[derive(Debug, Default)]
pub struct MockHal {
    pins: Pins,
    busy_state: AtomicBool,
}

impl MockHal {
    /// Build a `MockHal` with the default Waveshare HAT pin assignment.
    pub fn new() -> Self {
        MockHal {
            pins: Pins::default(),
            busy_state: AtomicBool::new(false),
        }
    }
}

impl Hal for MockHal {
    fn pins(&self) -> Pins {
        self.pins
    }

    fn digital_write(&self, _pin: u32, _value: bool) {}

    fn digital_read(&self, _pin: u32) -> bool {
        // Alternate on every call: flip-then-return, so both active-high and
        // active-low busy polling observes a `false` within at most two
        // polls.
        let prev = self.busy_state.fetch_xor(true, Ordering::Relaxed);
        !prev
    }

    fn spi_write_byte(&self, _value: u8) {}

    fn spi_write_n(&self, _buf: &[u8]) {}

    fn delay_ms(&self, _ms: u32) {}

    fn module_init(&self) -> i32 {
        0
    }

    fn module_exit(&self) {}
}

/// One recorded SPI-level event, as emitted by [`TraceHal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// `send_command(byte)`.
    Command(u8),
    /// `send_data(byte)`.
    Data(u8),
    /// `send_data_bulk(bytes)`.
    DataBulk(Vec<u8>),
    /// `delay_ms(ms)`.
    Delay(u32),
}

/// A `Hal` that records every command/data/bulk/delay emission for assertion
/// in tests, instead of touching real hardware. The DC pin's last-written
/// value determines whether a subsequent `spi_write_byte`/`spi_write_n` is
/// classified as a command or data emission.
///
/// Grounded on `embedded-hal-mock`-based expectation testing
/// (`Cargo.toml`'s `[dev-dependencies] embedded-hal-mock`), reimplemented
/// against this crate's own bespoke `Hal` trait.
pub struct TraceHal {
    pins: Pins,
    busy_state: AtomicBool,
    busy_fixed: Option<AtomicBool>,
    dc_level: AtomicBool,
    events: Mutex<Vec<TraceEvent>>,
    digital_reads: AtomicU8,
}

impl TraceHal {
    /// Build a `TraceHal` whose busy pin alternates like [`MockHal`].
    pub fn new() -> Self {
        TraceHal {
            pins: Pins::default(),
            busy_state: AtomicBool::new(false),
            busy_fixed: None,
            dc_level: AtomicBool::new(false),
            events: Mutex::new(Vec::new()),
            digital_reads: AtomicU8::new(0),
        }
    }

    /// Build a `TraceHal` whose busy pin never changes from `level`, used to
    /// simulate a panel that stays busy until cancellation fires (the
    /// 5in65f cancellation scenario).
    pub fn always_busy(level: bool) -> Self {
        TraceHal {
            pins: Pins::default(),
            busy_state: AtomicBool::new(level),
            busy_fixed: Some(AtomicBool::new(level)),
            dc_level: AtomicBool::new(false),
            events: Mutex::new(Vec::new()),
            digital_reads: AtomicU8::new(0),
        }
    }

    /// Build a `TraceHal` whose busy pin reports idle, for `polarity`, on
    /// every poll. `new()`'s alternating pin exercises polarity-agnostic
    /// polling logic, but it makes the number of polls a busy-wait takes
    /// depend on how many busy reads happened earlier on the same `TraceHal`,
    /// fine for tests that only check the call succeeds, wrong for tests
    /// asserting an exact command/data/delay trace. `ready` fixes the pin at
    /// its idle level so a trace assertion never has to account for an
    /// incidental extra poll.
    pub fn ready(polarity: BusyPolarity) -> Self {
        let idle = polarity.idle_level();
        TraceHal {
            pins: Pins::default(),
            busy_state: AtomicBool::new(idle),
            busy_fixed: Some(AtomicBool::new(idle)),
            dc_level: AtomicBool::new(false),
            events: Mutex::new(Vec::new()),
            digital_reads: AtomicU8::new(0),
        }
    }

    /// Snapshot of every event recorded so far, in emission order.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of times `digital_read` has been called (useful to assert a
    /// busy-wait loop polled at all before timing out).
    pub fn digital_read_count(&self) -> u8 {
        self.digital_reads.load(Ordering::Relaxed)
    }
}

impl Default for TraceHal {
    fn default() -> Self {
        Self::new()
    }
}

impl Hal for TraceHal {
    fn pins(&self) -> Pins {
        self.pins
    }

    fn digital_write(&self, pin: u32, value: bool) {
        if pin == self.pins.dc {
            self.dc_level.store(value, Ordering::Relaxed);
        }
    }

    fn digital_read(&self, pin: u32) -> bool {
        self.digital_reads.fetch_add(1, Ordering::Relaxed);
        if pin != self.pins.busy {
            return false;
        }
        match &self.busy_fixed {
            Some(fixed) => fixed.load(Ordering::Relaxed),
            None => {
                let prev = self.busy_state.fetch_xor(true, Ordering::Relaxed);
                !prev
            }
        }
    }

    fn spi_write_byte(&self, value: u8) {
        let event = if self.dc_level.load(Ordering::Relaxed) {
            TraceEvent::Data(value)
        } else {
            TraceEvent::Command(value)
        };
        self.events.lock().unwrap().push(event);
    }

    fn spi_write_n(&self, buf: &[u8]) {
        self.events
            .lock()
            .unwrap()
            .push(TraceEvent::DataBulk(buf.to_vec()));
    }

    fn delay_ms(&self, ms: u32) {
        self.events.lock().unwrap().push(TraceEvent::Delay(ms));
    }

    fn module_init(&self) -> i32 {
        0
    }

    fn module_exit(&self) {}
}
