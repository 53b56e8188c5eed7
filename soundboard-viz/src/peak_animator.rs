use alloc::{vec, vec::Vec};

use crate::config::RenderConfig;
use crate::types::{BinState, FrequencySnapshot, MAX_MAGNITUDE};

/// Per-bin bar and peak-cap heights, advanced once per frame.
///
/// Both heights follow a bounce model: they rise to a new maximum immediately and fall
/// back linearly. The bar falls by `bar_decay` per frame but never below the incoming
/// sample. The peak cap falls by the slower `peak_decay`, optionally after holding for
/// `peak_hold_ticks` frames, and never below the live bar.
///
/// Heights are kept in surface pixels. Decay steps are given in magnitude units (0..=255)
/// and scaled by the surface height on every update, so a resized surface keeps the same
/// apparent fall speed.
pub struct PeakAnimator {
    bins: Vec<BinState>,
    /// Frames each peak still holds before it may decay.
    hold_remaining: Vec<u32>,
    bar_decay: f32,
    peak_decay: f32,
    peak_hold_ticks: u32,
}

impl PeakAnimator {
    /// Creates an animator with every bin at rest.
    ///
    /// # Arguments
    ///
    /// * `num_bins` - Number of frequency bins, one bar each.
    /// * `config` - Supplies the bar and peak decay steps and the peak hold.
    pub fn new(num_bins: usize, config: &RenderConfig) -> Self {
        Self {
            bins: vec![BinState::ZERO; num_bins],
            hold_remaining: vec![0; num_bins],
            bar_decay: config.bar_decay,
            peak_decay: config.peak_decay,
            peak_hold_ticks: config.peak_hold_ticks,
        }
    }

    /// Number of bins currently tracked.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Heights after the most recent update.
    pub fn bins(&self) -> &[BinState] {
        &self.bins
    }

    /// Zero-fills every bin, reallocating when the bin count changes.
    pub fn reset(&mut self, num_bins: usize) {
        if num_bins != self.bins.len() {
            self.bins = vec![BinState::ZERO; num_bins];
            self.hold_remaining = vec![0; num_bins];
        } else {
            self.bins.fill(BinState::ZERO);
            self.hold_remaining.fill(0);
        }
    }

    /// Advances every bin by one frame towards `snapshot` and returns the new state.
    ///
    /// A snapshot whose length differs from the bin count resets the state to zeros
    /// at the new length before it is applied.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - Latest magnitudes, 0..=255 per bin.
    /// * `surface_height` - Pixel height a full-scale magnitude maps to.
    pub fn update_and_get_bins(
        &mut self,
        snapshot: &FrequencySnapshot,
        surface_height: f32,
    ) -> &[BinState] {
        if snapshot.len() != self.bins.len() {
            viz_debug!(
                "bin count changed from {} to {}, resetting",
                self.bins.len(),
                snapshot.len()
            );
            self.reset(snapshot.len());
        }

        let height = surface_height.max(0.0);
        let bar_step = self.bar_decay / MAX_MAGNITUDE * height;
        let peak_step = self.peak_decay / MAX_MAGNITUDE * height;

        for ((bin, hold), &raw) in self
            .bins
            .iter_mut()
            .zip(self.hold_remaining.iter_mut())
            .zip(snapshot)
        {
            // A shrunken surface pulls old heights back into range.
            bin.current_height = bin.current_height.min(height);
            bin.peak_height = bin.peak_height.min(height);

            let target = raw as f32 / MAX_MAGNITUDE * height;
            if target > bin.current_height {
                bin.current_height = target;
            } else {
                bin.current_height = (bin.current_height - bar_step).max(target);
            }

            if bin.current_height > bin.peak_height {
                bin.peak_height = bin.current_height;
                *hold = self.peak_hold_ticks;
            } else if *hold > 0 {
                *hold -= 1;
            } else {
                bin.peak_height = (bin.peak_height - peak_step).max(bin.current_height);
            }
        }
        &self.bins
    }
}
