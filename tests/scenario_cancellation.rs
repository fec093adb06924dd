//! End-to-end: a 5in65f display call blocked on a permanently-busy panel is
//! promptly aborted once another thread cancels it through the device's
//! `CancelHandle`, without waiting out the full busy-wait timeout.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use epd_engine::device::Device;
use epd_engine::error::ErrorKind;
use epd_engine::hal::{Hal, TraceHal};
use epd_engine::{Framebuffer, PixelFormat};

#[test]
fn cancel_handle_aborts_a_stuck_display_well_before_the_timeout() {
    let hal: Arc<dyn Hal> = Arc::new(TraceHal::always_busy(true));
    let device = Device::open("epd_5in65f", hal).unwrap();
    let cancel_handle = device.cancel_handle();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        cancel_handle.cancel();
    });

    let fb = Framebuffer::new(600, 448, PixelFormat::Color7).unwrap();
    let started = Instant::now();
    let result = device.display(&fb);
    let elapsed = started.elapsed();
    canceller.join().unwrap();

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BusyTimeout);
    assert!(err.is_timeout());
    assert!(
        elapsed < Duration::from_millis(epd_engine::EPD_BUSY_TIMEOUT_MS as u64),
        "cancellation should abort well before the {}ms busy timeout, took {elapsed:?}",
        epd_engine::EPD_BUSY_TIMEOUT_MS
    );
}
