//! End-to-end: `display(fb)` on the 7in5_v2 writes the caller's buffer
//! verbatim through the primary command and a bit-inverted copy through the
//! secondary one.

use std::sync::Arc;

use epd_engine::device::Device;
use epd_engine::hal::{Hal, TraceEvent, TraceHal};
use epd_engine::{Framebuffer, PixelFormat};

#[test]
fn display_sends_buffer_then_its_bitwise_inverse() {
    let trace = Arc::new(TraceHal::new());
    let hal: Arc<dyn Hal> = trace.clone();
    let device = Device::open("epd_7in5_v2", hal).unwrap();

    let mut fb = Framebuffer::new(800, 480, PixelFormat::Mono).unwrap();
    fb.clear(0);

    device.display(&fb).unwrap();

    let events = trace.events();
    let bulks: Vec<Vec<u8>> = events
        .iter()
        .filter_map(|e| match e {
            TraceEvent::DataBulk(b) => Some(b.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(bulks.len(), 2);
    assert!(bulks[0].iter().all(|&b| b == 0x00));
    assert!(bulks[1].iter().all(|&b| b == 0xFF));
    assert_eq!(bulks[0].len(), bulks[1].len());

    assert!(events.contains(&TraceEvent::Command(0x12)));
    assert!(events.contains(&TraceEvent::Delay(100)));
}
