#[allow(unused_imports)]
use micromath::F32Ext;

/// Horizontal arrangement of the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLayout {
    /// Each bin is drawn twice, growing outward from the vertical center line:
    /// bin `i` sits at `center - (i + 1) * slot` and at `center + i * slot`.
    Mirrored,
    /// Bin `i` sits at `i * slot`, lowest frequency on the left.
    Sequential,
}

/// One painted bar column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSlot {
    pub x: i32,
    pub width: u32,
}

/// Column placement for `num_bins` bars across a surface `surface_width` pixels wide.
///
/// Slots tile the full width with no remainder; each painted bar is its slot minus
/// the gutter, so a slot narrower than the gutter paints nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    layout: BarLayout,
    slot_width: f32,
    bar_width: u32,
    center: f32,
}

impl BarGeometry {
    /// Lays out `num_bins` bars across `surface_width` pixels.
    ///
    /// # Arguments
    ///
    /// * `layout` - Mirrored uses two slots per bin, sequential one.
    /// * `surface_width` - Width of the surface in pixels.
    /// * `num_bins` - Number of bars to place.
    /// * `gutter` - Pixels left empty on the right of every slot.
    pub fn new(layout: BarLayout, surface_width: u32, num_bins: usize, gutter: u32) -> Self {
        let width = surface_width as f32;
        let slots = match layout {
            BarLayout::Mirrored => num_bins * 2,
            BarLayout::Sequential => num_bins,
        };
        let slot_width = if slots == 0 { 0.0 } else { width / slots as f32 };
        let bar_width = (slot_width - gutter as f32).max(0.0).floor() as u32;
        Self {
            layout,
            slot_width,
            bar_width,
            center: width / 2.0,
        }
    }

    /// Width of one slot, bar plus gutter. Fractional when the width doesn't divide.
    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    /// Painted width of each bar, zero when the gutter eats the slot.
    pub fn bar_width(&self) -> u32 {
        self.bar_width
    }

    /// Columns bin `index` is painted into: two when mirrored, one otherwise,
    /// none when the bars have no visible width.
    pub fn columns(&self, index: usize) -> impl Iterator<Item = BarSlot> {
        let width = self.bar_width;
        let i = index as f32;
        let positions = match self.layout {
            BarLayout::Mirrored => [
                Some(self.center - (i + 1.0) * self.slot_width),
                Some(self.center + i * self.slot_width),
            ],
            BarLayout::Sequential => [Some(i * self.slot_width), None],
        };
        positions
            .into_iter()
            .flatten()
            .filter(move |_| width > 0)
            .map(move |x| BarSlot {
                x: x.floor() as i32,
                width,
            })
    }
}
