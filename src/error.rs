//! The engine's error taxonomy.
//!
//! Low-level functions (`spi`, `busy`, `interpreter`, `generic`, `models`)
//! never raise directly; they return `Result<_, EpdError>` and the off-thread
//! harness in [`crate::device`] is the only place that classifies a failure
//! for a caller.

use std::fmt;

/// Errors produced anywhere in the engine.
#[derive(Debug, thiserror::Error)]
pub enum EpdError {
    /// `open()` was called with a name absent from the registry.
    #[error("no registered model named {0:?}")]
    ModelNotFound(String),

    /// HAL init returned nonzero, or the controller init sequence failed for
    /// a reason other than a busy timeout.
    #[error("device init failed: {0}")]
    Init(String),

    /// `read_busy` timed out, either on wall-clock elapsed time or because
    /// the caller's cancel flag was observed.
    #[error("timed out waiting on BUSY")]
    BusyTimeout,

    /// Invalid framebuffer dimensions, a truncated init sequence, or a
    /// null/zero-length data buffer.
    #[error("invalid parameter: {0}")]
    Param(String),

    /// The framebuffer's pixel format does not match the device's.
    #[error("framebuffer format does not match device: {expected:?} != {actual:?}")]
    FormatMismatch {
        /// Format the device's model config requires.
        expected: crate::pixel_format::PixelFormat,
        /// Format the caller supplied.
        actual: crate::pixel_format::PixelFormat,
    },

    /// Scratch-buffer allocation failed off the host lock (e.g. the 7in5_v2
    /// inverted-buffer copy, or the `clear()` fill buffer).
    #[error("allocation failed: {0}")]
    Alloc(String),

    /// Any other device-level failure (generic display/clear/dual-display
    /// failure not covered by a more specific variant).
    #[error("device error: {0}")]
    Device(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EpdError>;

/// Coarse classification of an [`EpdError`], mirroring the taxonomy's
/// "is-a DeviceError" relationships without Rust enum-to-enum inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// [`EpdError::ModelNotFound`].
    ModelNotFound,
    /// [`EpdError::Init`], a [`ErrorKind::Device`] subclass.
    Init,
    /// [`EpdError::BusyTimeout`], a [`ErrorKind::Device`] subclass.
    BusyTimeout,
    /// [`EpdError::Param`].
    Param,
    /// [`EpdError::FormatMismatch`].
    FormatMismatch,
    /// [`EpdError::Alloc`] or [`EpdError::Device`].
    Device,
}

impl EpdError {
    /// Classify this error for callers that want to branch on category
    /// (e.g. "retry on busy timeout") without matching every variant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EpdError::ModelNotFound(_) => ErrorKind::ModelNotFound,
            EpdError::Init(_) => ErrorKind::Init,
            EpdError::BusyTimeout => ErrorKind::BusyTimeout,
            EpdError::Param(_) => ErrorKind::Param,
            EpdError::FormatMismatch { .. } => ErrorKind::FormatMismatch,
            EpdError::Alloc(_) | EpdError::Device(_) => ErrorKind::Device,
        }
    }

    /// True if this error is a busy-wait timeout (including an observed
    /// cancellation, which is surfaced identically).
    pub fn is_timeout(&self) -> bool {
        matches!(self, EpdError::BusyTimeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ModelNotFound => "model_not_found",
            ErrorKind::Init => "init",
            ErrorKind::BusyTimeout => "busy_timeout",
            ErrorKind::Param => "param",
            ErrorKind::FormatMismatch => "format_mismatch",
            ErrorKind::Device => "device",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_timeout_is_device_kind() {
        assert_eq!(EpdError::BusyTimeout.kind(), ErrorKind::BusyTimeout);
        assert!(EpdError::BusyTimeout.is_timeout());
    }

    #[test]
    fn model_not_found_is_not_timeout() {
        let err = EpdError::ModelNotFound("epd_nope".into());
        assert!(!err.is_timeout());
        assert_eq!(err.kind(), ErrorKind::ModelNotFound);
    }
}
