//! ACeP 7-color protocol: `4in01f`, `5in65f`.
//!
//! Grounded on `other_examples`'s `epd5in65f` ACeP reference drivers (same
//! power-on/refresh/power-off-then-wait-busy-low shape).

use std::sync::atomic::AtomicBool;

use crate::busy::{read_busy, wait_busy_low};
use crate::driver::Tier2Overrides;
use crate::error::Result;
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::send_command;
use crate::EPD_BUSY_TIMEOUT_MS;

/// `post_display` = `0x04` + busy; `0x12` + busy; `0x02` + wait-busy-low;
/// 200 ms delay.
///
/// The first busy-wait (after `0x04`, the power-on step) is where
/// cancellation during the `5in65f`'s power-on must land: firing the
/// unblock there must surface `BusyTimeoutError` with `0x12` never emitted,
/// which falls out naturally from propagating `read_busy`'s `Result` with
/// `?` before reaching it.
pub struct Acep;

impl Tier2Overrides for Acep {
    fn post_display(
        &self,
        hal: &dyn Hal,
        cfg: &ModelConfig,
        cancel: &AtomicBool,
    ) -> Result<()> {
        send_command(hal, 0x04);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
        send_command(hal, 0x12);
        read_busy(hal, cfg.busy_polarity, EPD_BUSY_TIMEOUT_MS, cancel)?;
        send_command(hal, 0x02);
        wait_busy_low(hal, EPD_BUSY_TIMEOUT_MS, cancel)?;
        hal.delay_ms(200);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{TraceEvent, TraceHal};
    use crate::registry::Registry;

    #[test]
    fn cancellation_during_power_on_stops_before_refresh_command() {
        let hal = TraceHal::always_busy(true);
        let cfg = Registry.find("epd_5in65f").unwrap();
        let cancel = AtomicBool::new(true);
        let err = Acep.post_display(&hal, cfg, &cancel).unwrap_err();
        assert!(err.is_timeout());
        let events = hal.events();
        assert!(events.contains(&TraceEvent::Command(0x04)));
        assert!(!events.contains(&TraceEvent::Command(0x12)));
    }

    #[test]
    fn success_path_ends_with_200ms_delay() {
        let hal = TraceHal::new();
        let cfg = Registry.find("epd_5in65f").unwrap();
        let cancel = AtomicBool::new(false);
        Acep.post_display(&hal, cfg, &cancel).unwrap();
        assert_eq!(hal.events().last(), Some(&TraceEvent::Delay(200)));
    }
}
