// src/core/analysis/spectral.rs
//
// Seven-band spectral balance from averaged Hann-windowed FFT energy of the
// mono mix.

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use super::whole_frames;
use crate::core::dsp::{energy_to_db, FftProcessor};
use crate::error::Result;

/// Analysis window length in frames
pub const SPECTRAL_FFT_SIZE: usize = 1024;
/// Hop between consecutive windows
pub const SPECTRAL_HOP_SIZE: usize = 512;

/// Band edges in Hz, half-open `[lo, hi)`, in output order
pub const BAND_EDGES_HZ: [(f64, f64); 7] = [
    (20.0, 60.0),
    (60.0, 200.0),
    (200.0, 500.0),
    (500.0, 2000.0),
    (2000.0, 6000.0),
    (6000.0, 12000.0),
    (12000.0, 20000.0),
];

/// Average band energy in dB
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralBands {
    pub sub: Option<f64>,
    pub low: Option<f64>,
    pub lowmid: Option<f64>,
    pub mid: Option<f64>,
    pub highmid: Option<f64>,
    pub high: Option<f64>,
    pub air: Option<f64>,
}

impl SpectralBands {
    fn from_energies(energies: [f64; 7]) -> Self {
        let [sub, low, lowmid, mid, highmid, high, air] = energies.map(energy_to_db);
        Self {
            sub,
            low,
            lowmid,
            mid,
            highmid,
            high,
            air,
        }
    }
}

/// Band index for a bin centre frequency; first matching band wins
fn band_index(freq_hz: f64) -> Option<usize> {
    BAND_EDGES_HZ
        .iter()
        .position(|&(lo, hi)| freq_hz >= lo && freq_hz < hi)
}

/// Spectral band analyzer with configurable window and hop
pub struct SpectralAnalyzer {
    fft_size: usize,
    hop_size: usize,
    sample_rate: f64,
}

impl SpectralAnalyzer {
    pub fn new(fft_size: usize, hop_size: usize, sample_rate: f64) -> Self {
        Self {
            fft_size,
            hop_size: hop_size.max(1),
            sample_rate,
        }
    }

    /// Mean energy per band across all full windows, or `None` when no
    /// window fits.
    pub fn band_energies(&self, samples: &[f32]) -> Result<Option<[f64; 7]>> {
        let samples = whole_frames(samples);
        let frame_count = samples.len() / 2;
        if !(self.sample_rate > 0.0) || frame_count < self.fft_size {
            return Ok(None);
        }

        let mut fft = FftProcessor::new(self.fft_size)?;
        let bins: Vec<Option<usize>> = (0..self.fft_size / 2)
            .map(|b| {
                if b == 0 {
                    return None;
                }
                band_index(b as f64 * self.sample_rate / self.fft_size as f64)
            })
            .collect();

        let mut accum = [0.0f64; 7];
        let mut windows = 0usize;
        let mut start = 0;

        while start + self.fft_size <= frame_count {
            let frame = samples[start * 2..(start + self.fft_size) * 2]
                .chunks_exact(2)
                .map(|f| 0.5 * (f[0] as f64 + f[1] as f64));
            let energy = fft.energy_spectrum(frame)?;

            for (mag2, band) in energy.iter().zip(&bins) {
                if let Some(band) = band {
                    accum[*band] += mag2;
                }
            }
            windows += 1;
            start += self.hop_size;
        }

        if windows == 0 {
            return Ok(None);
        }

        trace!("Spectral analysis averaged {} windows", windows);
        Ok(Some(accum.map(|e| e / windows as f64)))
    }

    pub fn analyze(&self, samples: &[f32]) -> Result<SpectralBands> {
        Ok(self
            .band_energies(samples)?
            .map(SpectralBands::from_energies)
            .unwrap_or_default())
    }
}

/// Compute the seven spectral bands with the standard 1024/512 analyzer.
///
/// An FFT failure cannot happen with the fixed window size; should it occur
/// anyway, the bands are reported absent.
pub fn compute_spectral_bands(samples: &[f32], sample_rate_hz: f64) -> SpectralBands {
    let analyzer = SpectralAnalyzer::new(SPECTRAL_FFT_SIZE, SPECTRAL_HOP_SIZE, sample_rate_hz);
    match analyzer.analyze(samples) {
        Ok(bands) => bands,
        Err(e) => {
            warn!("Spectral analysis failed: {}", e);
            SpectralBands::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_sine(freq: f64, sample_rate: f64, frames: usize) -> Vec<f32> {
        (0..frames)
            .flat_map(|i| {
                let v = (0.5 * (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin()) as f32;
                [v, v]
            })
            .collect()
    }

    #[test]
    fn test_band_edges_half_open() {
        assert_eq!(band_index(19.9), None);
        assert_eq!(band_index(20.0), Some(0));
        assert_eq!(band_index(60.0), Some(1));
        assert_eq!(band_index(2000.0), Some(4));
        assert_eq!(band_index(20000.0), None);
    }

    #[test]
    fn test_sine_energy_lands_in_its_band() {
        let samples = stereo_sine(1000.0, 48000.0, 8192);
        let bands = compute_spectral_bands(&samples, 48000.0);
        let mid = bands.mid.unwrap();
        for other in [bands.sub, bands.low, bands.high, bands.air].into_iter().flatten() {
            assert!(mid > other + 20.0);
        }
    }

    #[test]
    fn test_requires_one_full_window() {
        let samples = stereo_sine(1000.0, 48000.0, SPECTRAL_FFT_SIZE - 1);
        assert_eq!(compute_spectral_bands(&samples, 48000.0), SpectralBands::default());
    }

    #[test]
    fn test_invalid_sample_rate_is_absent() {
        let samples = stereo_sine(1000.0, 48000.0, 2048);
        assert_eq!(compute_spectral_bands(&samples, 0.0), SpectralBands::default());
    }

    #[test]
    fn test_bad_fft_size_is_an_error() {
        let analyzer = SpectralAnalyzer::new(1000, 500, 48000.0);
        let samples = stereo_sine(1000.0, 48000.0, 2048);
        assert!(analyzer.analyze(&samples).is_err());
    }
}
