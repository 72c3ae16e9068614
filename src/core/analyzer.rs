// src/core/analyzer.rs
//
// High-level analysis API with builder pattern. Runs the six analyzers over
// one buffer and reconciles the fields basic and dynamics share.

use log::{debug, trace};
use std::path::Path;

use super::analysis::{
    compute_basic_metrics, compute_dynamics, compute_loudness, compute_spectral_bands,
    compute_stereo, compute_true_peak,
};
use super::decoder::{decode_audio, AudioData};
use super::result::{AnalysisResult, ANALYSIS_SCHEMA_VERSION};
use crate::error::{MixError, Result};

/// Default true-peak oversampling factor
pub const DEFAULT_TRUE_PEAK_OVERSAMPLE: u32 = 4;

/// Builder for Analyzer configuration
pub struct AnalyzerBuilder {
    true_peak_oversample: u32,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            true_peak_oversample: DEFAULT_TRUE_PEAK_OVERSAMPLE,
        }
    }

    /// Oversampling factor for the true-peak estimate (values below 1 act as 1)
    pub fn true_peak_oversample(mut self, factor: u32) -> Self {
        self.true_peak_oversample = factor;
        self
    }

    pub fn build(self) -> Analyzer {
        Analyzer {
            true_peak_oversample: self.true_peak_oversample,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Analysis façade. Stateless apart from its configuration, so one instance
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    true_peak_oversample: u32,
}

impl Default for Analyzer {
    fn default() -> Self {
        AnalyzerBuilder::new().build()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn true_peak_oversample(&self) -> u32 {
        self.true_peak_oversample
    }

    /// Analyze `frame_count` frames of interleaved stereo audio.
    ///
    /// Fails when the sample rate is not strictly positive or the buffer
    /// holds fewer than `2 * frame_count` samples. Extra samples past
    /// `frame_count` frames are ignored.
    pub fn analyze_interleaved_stereo(
        &self,
        samples: &[f32],
        frame_count: usize,
        sample_rate_hz: f64,
    ) -> Result<AnalysisResult> {
        if !(sample_rate_hz > 0.0) {
            return Err(MixError::InvalidSampleRate(sample_rate_hz));
        }
        let needed = frame_count
            .checked_mul(2)
            .filter(|&n| n <= samples.len())
            .ok_or(MixError::BufferTooShort {
                frame_count,
                available: samples.len(),
            })?;
        let samples = &samples[..needed];

        debug!(
            "Analyzing {} frames at {} Hz (true peak x{})",
            frame_count, sample_rate_hz, self.true_peak_oversample
        );

        let mut result = AnalysisResult {
            schema_version: ANALYSIS_SCHEMA_VERSION,
            frame_count,
            sample_rate_hz,
            basic: compute_basic_metrics(samples),
            loudness: compute_loudness(samples, sample_rate_hz),
            true_peak: compute_true_peak(samples, self.true_peak_oversample),
            spectral: compute_spectral_bands(samples, sample_rate_hz),
            stereo: compute_stereo(samples),
            dynamics: compute_dynamics(samples),
        };
        trace!("Basic: {:?}", result.basic);
        trace!("Loudness: {:?}", result.loudness);
        trace!("Spectral: {:?}", result.spectral);
        trace!("Stereo: {:?}", result.stereo);
        trace!("Dynamics (standalone): {:?}", result.dynamics);

        result.enforce_dynamics_consistency();
        debug!("{} of 20 metrics present", result.present_metric_count());

        Ok(result)
    }

    /// Analyze a whole interleaved buffer; a trailing half frame is ignored.
    pub fn analyze(&self, samples: &[f32], sample_rate_hz: f64) -> Result<AnalysisResult> {
        self.analyze_interleaved_stereo(samples, samples.len() / 2, sample_rate_hz)
    }

    pub fn analyze_audio(&self, audio: &AudioData) -> Result<AnalysisResult> {
        self.analyze(&audio.samples, audio.sample_rate as f64)
    }

    /// Decode and analyze a file
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisResult> {
        let audio = decode_audio(path.as_ref())?;
        self.analyze_audio(&audio)
    }
}
