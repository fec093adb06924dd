//! SPI primitives. Thin wrappers over [`crate::hal::Hal`] that
//! frame bytes with CS and select command-vs-data with DC. These run inside
//! the off-thread job and must never touch anything the host execution lock
//! protects.

use crate::hal::Hal;
use crate::registry::ModelConfig;

/// Emit a single command byte: DC=0, CS=0, write, CS=1.
pub fn send_command(hal: &dyn Hal, cmd: u8) {
    let pins = hal.pins();
    hal.digital_write(pins.dc, false);
    hal.digital_write(pins.cs, false);
    hal.spi_write_byte(cmd);
    hal.digital_write(pins.cs, true);
}

/// Emit a single data byte: DC=1, CS=0, write, CS=1.
pub fn send_data(hal: &dyn Hal, data: u8) {
    let pins = hal.pins();
    hal.digital_write(pins.dc, true);
    hal.digital_write(pins.cs, false);
    hal.spi_write_byte(data);
    hal.digital_write(pins.cs, true);
}

/// Emit a bulk data payload in one SPI transfer: DC=1, CS=0, write, CS=1.
pub fn send_data_bulk(hal: &dyn Hal, buf: &[u8]) {
    let pins = hal.pins();
    hal.digital_write(pins.dc, true);
    hal.digital_write(pins.cs, false);
    hal.spi_write_n(buf);
    hal.digital_write(pins.cs, true);
}

/// Drive the hardware reset pulse: RST high for `cfg.reset_ms[0]`, low for
/// `cfg.reset_ms[1]`, high again for `cfg.reset_ms[2]`.
pub fn reset(hal: &dyn Hal, cfg: &ModelConfig) {
    let pins = hal.pins();
    hal.digital_write(pins.rst, true);
    hal.delay_ms(cfg.reset_ms[0]);
    hal.digital_write(pins.rst, false);
    hal.delay_ms(cfg.reset_ms[1]);
    hal.digital_write(pins.rst, true);
    hal.delay_ms(cfg.reset_ms[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn send_command_then_data_then_bulk_trace_in_order() {
        let hal = TraceHal::new();
        send_command(&hal, 0x24);
        send_data(&hal, 0xAB);
        send_data_bulk(&hal, &[1, 2, 3]);
        assert_eq!(
            hal.events(),
            vec![
                TraceEvent::Command(0x24),
                TraceEvent::Data(0xAB),
                TraceEvent::DataBulk(vec![1, 2, 3]),
            ]
        );
    }

    #[test]
    fn reset_delays_match_reset_ms() {
        let hal = TraceHal::new();
        let reg = Registry;
        let cfg = reg.find("epd_2in13").unwrap();
        reset(&hal, cfg);
        let delays: Vec<u32> = hal
            .events()
            .into_iter()
            .filter_map(|e| match e {
                TraceEvent::Delay(ms) => Some(ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, cfg.reset_ms.to_vec());
    }
}
