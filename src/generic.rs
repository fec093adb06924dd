//! Generic display and sleep: the default data-path used by Tier-1 models
//! and as the fallback any Tier-2 override doesn't replace.

use crate::error::{EpdError, Result};
use crate::hal::Hal;
use crate::registry::ModelConfig;
use crate::spi::{send_command, send_data, send_data_bulk};

/// Write `buf` to the panel's primary data register and, if the model has a
/// second display command, issue it with no payload.
///
/// The no-payload second command is a documented contract, not a bug: the
/// generic path never owns a second buffer, so dual-buffer models (2in7,
/// 7in5_v2, 5in83bc, ...) must supply a `custom_display` Tier-2 override to
/// actually stream their second plane.
///
/// # Errors
///
/// [`EpdError::Param`] if `buf` is empty.
pub fn generic_display(hal: &dyn Hal, cfg: &ModelConfig, buf: &[u8]) -> Result<()> {
    if buf.is_empty() {
        return Err(EpdError::Param("display buffer is empty".into()));
    }
    send_command(hal, cfg.display_cmd);
    send_data_bulk(hal, buf);
    if cfg.display_cmd_2 != 0 {
        send_command(hal, cfg.display_cmd_2);
    }
    Ok(())
}

/// Write `black` to the primary data register and `red` to the secondary
/// one. Unlike [`generic_display`], this is used only by the public
/// `display_dual` entry point, which is handed two real buffers up front:
/// no Tier-2 override is needed to supply the second plane's content.
///
/// # Errors
///
/// [`EpdError::Param`] if either buffer is empty or the model has no second
/// display command.
pub fn generic_display_dual(
    hal: &dyn Hal,
    cfg: &ModelConfig,
    black: &[u8],
    red: &[u8],
) -> Result<()> {
    if black.is_empty() || red.is_empty() {
        return Err(EpdError::Param("display_dual buffer is empty".into()));
    }
    if cfg.display_cmd_2 == 0 {
        return Err(EpdError::Param(format!(
            "{} has no second display command",
            cfg.name
        )));
    }
    send_command(hal, cfg.display_cmd);
    send_data_bulk(hal, black);
    send_command(hal, cfg.display_cmd_2);
    send_data_bulk(hal, red);
    Ok(())
}

/// `send_command(cfg.sleep_cmd); send_data(cfg.sleep_data)`.
pub fn generic_sleep(hal: &dyn Hal, cfg: &ModelConfig) {
    send_command(hal, cfg.sleep_cmd);
    send_data(hal, cfg.sleep_data);
}
