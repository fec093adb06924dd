//! End-to-end: open an SSD1680 model, run a full init, then display a
//! framebuffer, through the public `Device` API rather than the
//! individual override functions (covered in `src/models/ssd1680.rs`).

use std::sync::Arc;

use epd_engine::device::Device;
use epd_engine::hal::{Hal, TraceEvent, TraceHal};
use epd_engine::mode::Mode;
use epd_engine::registry::Registry;
use epd_engine::{Framebuffer, PixelFormat};

#[test]
fn init_then_display_ends_in_the_ssd1680_turn_on_sequence() {
    let cfg = Registry.find("epd_2in13").unwrap();
    let trace = Arc::new(TraceHal::ready(cfg.busy_polarity));
    let hal: Arc<dyn Hal> = trace.clone();
    let device = Device::open("epd_2in13", hal).unwrap();

    device.init(Mode::Full).unwrap();
    let init_tail = trace.events();
    assert_eq!(
        &init_tail[init_tail.len() - 2..],
        &[TraceEvent::Command(0x32), TraceEvent::DataBulk(vec![0x00; 30])],
        "SSD1680 init should end with the LUT load"
    );

    let fb = Framebuffer::new(122, 250, PixelFormat::Mono).unwrap();
    device.display(&fb).unwrap();
    let events = trace.events();
    let tail = &events[events.len() - 4..];
    assert_eq!(
        tail,
        &[
            TraceEvent::Command(0x22),
            TraceEvent::Data(0xC4),
            TraceEvent::Command(0x20),
            TraceEvent::Command(0xFF),
        ]
    );
}
