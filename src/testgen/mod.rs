// src/testgen/mod.rs
//
// Deterministic test-signal generators. All output is interleaved stereo
// f32 unless stated otherwise, and identical for identical arguments.

use std::f64::consts::PI;

/// Mono sine wave
pub fn sine(freq_hz: f64, amplitude: f64, sample_rate: f64, frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|i| (amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate).sin()) as f32)
        .collect()
}

/// Interleave two mono channels; the longer one is truncated
pub fn interleave(left: &[f32], right: &[f32]) -> Vec<f32> {
    left.iter().zip(right).flat_map(|(&l, &r)| [l, r]).collect()
}

/// Same sine on both channels
pub fn stereo_sine(freq_hz: f64, amplitude: f64, sample_rate: f64, frames: usize) -> Vec<f32> {
    stereo_sine_with_gains(freq_hz, amplitude, sample_rate, frames, 1.0, 1.0)
}

/// Sine with independent per-channel gains; a negative gain inverts polarity
pub fn stereo_sine_with_gains(
    freq_hz: f64,
    amplitude: f64,
    sample_rate: f64,
    frames: usize,
    left_gain: f64,
    right_gain: f64,
) -> Vec<f32> {
    (0..frames)
        .flat_map(|i| {
            let v = amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate).sin();
            [(v * left_gain) as f32, (v * right_gain) as f32]
        })
        .collect()
}

/// All-zero stereo buffer
pub fn silence(frames: usize) -> Vec<f32> {
    vec![0.0; frames * 2]
}

/// Linear congruential noise source (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    state: u32,
}

impl NoiseGenerator {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value uniformly spread over [-1, 1)
    pub fn next_sample(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.state as f64 / u32::MAX as f64) * 2.0 - 1.0
    }
}

/// Uncorrelated white noise on both channels
pub fn stereo_noise(seed: u32, amplitude: f64, frames: usize) -> Vec<f32> {
    let mut rng = NoiseGenerator::new(seed);
    (0..frames * 2)
        .map(|_| (amplitude * rng.next_sample()) as f32)
        .collect()
}

/// Sum two equally long buffers sample by sample
pub fn mix(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}
