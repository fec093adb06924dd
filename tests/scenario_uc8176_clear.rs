//! End-to-end: `clear()` on a UC8176 model builds its own all-white buffer
//! and drives the `0x12`/delay/busy TurnOn, with no framebuffer from the
//! caller.

use std::sync::Arc;

use epd_engine::device::Device;
use epd_engine::hal::{Hal, TraceEvent, TraceHal};

#[test]
fn clear_writes_an_all_white_buffer_then_turns_on() {
    let trace = Arc::new(TraceHal::new());
    let hal: Arc<dyn Hal> = trace.clone();
    let device = Device::open("epd_4in2", hal).unwrap();

    device.clear().unwrap();

    let events = trace.events();
    let bulk = events
        .iter()
        .find_map(|e| match e {
            TraceEvent::DataBulk(b) => Some(b.clone()),
            _ => None,
        })
        .expect("clear should write a bulk data payload");
    assert!(bulk.iter().all(|&b| b == 0xFF));

    assert!(events.contains(&TraceEvent::Command(0x12)));
    assert!(events.contains(&TraceEvent::Delay(100)));
}
