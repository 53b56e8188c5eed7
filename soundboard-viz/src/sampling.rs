use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use soundboard_dsp::ByteFrequencyAnalyser;

use crate::errors::SampleError;
use crate::types::FrequencySnapshot;

/// Producer of frequency snapshots.
///
/// `bin_count` must stay constant while a renderer is attached. `sample_into` fills
/// the caller's buffer with the latest magnitudes (0..=255), one per bin.
pub trait SamplingSource {
    fn bin_count(&self) -> usize;

    fn sample_into(&mut self, buffer: &mut FrequencySnapshot) -> Result<(), SampleError>;
}

impl<T: SamplingSource + ?Sized> SamplingSource for &mut T {
    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }

    fn sample_into(&mut self, buffer: &mut [u8]) -> Result<(), SampleError> {
        (**self).sample_into(buffer)
    }
}

/// Shared with the audio side, which keeps feeding it between frames. While the other
/// side holds a mutable borrow, pulls report `Busy` and the renderer skips that frame.
impl<T: SamplingSource> SamplingSource for Rc<RefCell<T>> {
    fn bin_count(&self) -> usize {
        self.try_borrow().map(|s| s.bin_count()).unwrap_or(0)
    }

    fn sample_into(&mut self, buffer: &mut [u8]) -> Result<(), SampleError> {
        self.try_borrow_mut()
            .map_err(|_| SampleError::Busy)?
            .sample_into(buffer)
    }
}

/// Observes a source owned elsewhere; pulls fail once the owner drops it.
impl<T: SamplingSource> SamplingSource for Weak<RefCell<T>> {
    fn bin_count(&self) -> usize {
        self.upgrade().map(|s| s.bin_count()).unwrap_or(0)
    }

    fn sample_into(&mut self, buffer: &mut [u8]) -> Result<(), SampleError> {
        let mut source = self.upgrade().ok_or(SampleError::Disconnected)?;
        source.sample_into(buffer)
    }
}

impl SamplingSource for ByteFrequencyAnalyser {
    fn bin_count(&self) -> usize {
        self.frequency_bin_count()
    }

    fn sample_into(&mut self, buffer: &mut [u8]) -> Result<(), SampleError> {
        self.get_byte_frequency_data(buffer).map_err(|_err| {
            viz_warn!("analyser pull failed");
            SampleError::Analyser
        })
    }
}
