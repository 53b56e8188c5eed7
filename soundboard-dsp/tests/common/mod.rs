use std::f32::consts::PI;

pub const SAMPLE_RATE_HZ: f32 = 48_000.0;

/// Sine whose frequency lands exactly on `bin` of an `fft_size`-point transform.
pub fn bin_centered_sine_f32(bin: usize, fft_size: usize, amplitude: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / fft_size as f32).sin())
        .collect()
}

pub fn bin_centered_sine_i16(bin: usize, fft_size: usize, amplitude: f32, len: usize) -> Vec<i16> {
    bin_centered_sine_f32(bin, fft_size, amplitude, len)
        .into_iter()
        .map(|s| (s * i16::MAX as f32) as i16)
        .collect()
}

pub fn bin_frequency_hz(bin: usize, fft_size: usize) -> f32 {
    bin as f32 * SAMPLE_RATE_HZ / fft_size as f32
}

pub fn loudest_bin(bytes: &[u8]) -> usize {
    let mut best = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b > bytes[best] {
            best = i;
        }
    }
    best
}
