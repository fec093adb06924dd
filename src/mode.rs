//! Init/refresh mode selection.

/// Which init sequence (and, for Tier-2 models, which refresh waveform) to
/// drive the panel through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Full refresh: slowest, cleanest, no ghosting.
    #[default]
    Full = 0,
    /// Fast refresh: shorter waveform, some displays accept this directly.
    Fast = 1,
    /// Partial/regional refresh LUT.
    Partial = 2,
    /// Grayscale (multi-level) waveform.
    Grayscale = 3,
}

impl Mode {
    /// The raw mode byte passed to `custom_init`: no Tier-2 override
    /// currently branches on this value, but it is carried through as a
    /// plain byte for sequence selection in
    /// [`crate::interpreter`].
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}
