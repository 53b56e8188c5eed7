/// One pull of every bin's magnitude, 0..=255 per bin.
pub type FrequencySnapshot = [u8];

/// Largest magnitude a snapshot byte can carry.
pub const MAX_MAGNITUDE: f32 = 255.0;

/// Per-bin animation state, in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BinState {
    /// Height of the live bar.
    pub current_height: f32,
    /// Height of the retained peak marker; never below `current_height` after an update.
    pub peak_height: f32,
}

impl BinState {
    pub const ZERO: BinState = BinState {
        current_height: 0.0,
        peak_height: 0.0,
    };
}
