//! Radix-2 FFT kernel with windowed energy helper

use num_complex::Complex64;
use std::f64::consts::PI;

use super::windows::hann_window;
use crate::error::{MixError, Result};

/// Round up to the next power of two (1 for an input of 0).
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// In-place forward FFT (iterative Cooley-Tukey, bit-reversal first).
///
/// The length must be a non-zero power of two; anything else is rejected
/// before the data is touched.
pub fn fft_in_place(data: &mut [Complex64]) -> Result<()> {
    let n = data.len();
    if n == 0 || !n.is_power_of_two() {
        return Err(MixError::InvalidFftSize(n));
    }

    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            data.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let angle = -2.0 * PI / len as f64;
        let step = Complex64::new(angle.cos(), angle.sin());
        for block in data.chunks_exact_mut(len) {
            let (lo, hi) = block.split_at_mut(len / 2);
            let mut w = Complex64::new(1.0, 0.0);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let u = *a;
                let v = *b * w;
                *a = u + v;
                *b = u - v;
                w *= step;
            }
        }
        len <<= 1;
    }

    Ok(())
}

/// Hann-windowed FFT over fixed-size real frames
pub struct FftProcessor {
    fft_size: usize,
    window: Vec<f64>,
    buffer: Vec<Complex64>,
    energy: Vec<f64>,
}

impl FftProcessor {
    pub fn new(fft_size: usize) -> Result<Self> {
        if fft_size == 0 || !fft_size.is_power_of_two() {
            return Err(MixError::InvalidFftSize(fft_size));
        }
        Ok(Self {
            fft_size,
            window: hann_window(fft_size),
            buffer: vec![Complex64::new(0.0, 0.0); fft_size],
            energy: vec![0.0; fft_size / 2],
        })
    }

    /// Squared magnitude of bins `0..fft_size/2` for one frame.
    ///
    /// Short frames are zero-padded; extra samples are ignored.
    pub fn energy_spectrum<I>(&mut self, frame: I) -> Result<&[f64]>
    where
        I: IntoIterator<Item = f64>,
    {
        self.buffer.fill(Complex64::new(0.0, 0.0));
        for ((slot, sample), w) in self.buffer.iter_mut().zip(frame).zip(&self.window) {
            *slot = Complex64::new(sample * w, 0.0);
        }

        fft_in_place(&mut self.buffer)?;

        for (e, c) in self.energy.iter_mut().zip(&self.buffer) {
            *e = c.norm_sqr();
        }
        Ok(&self.energy)
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}
