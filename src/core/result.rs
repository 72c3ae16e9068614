// src/core/result.rs
//
// Analysis snapshot and the catalogue of tracked metrics.

use serde::{Deserialize, Serialize};

use super::analysis::{
    BasicMetrics, DynamicsMetrics, LoudnessMetrics, SpectralBands, StereoMetrics, TruePeakMetrics,
};

/// Schema version stamped on every analysis produced by this crate
pub const ANALYSIS_SCHEMA_VERSION: u32 = 1;

/// Metric groups shared by analyses, benchmark profiles and comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    Basic,
    Loudness,
    Spectral,
    Stereo,
    Dynamics,
}

impl MetricGroup {
    pub const ALL: [MetricGroup; 5] = [
        MetricGroup::Basic,
        MetricGroup::Loudness,
        MetricGroup::Spectral,
        MetricGroup::Stereo,
        MetricGroup::Dynamics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricGroup::Basic => "basic",
            MetricGroup::Loudness => "loudness",
            MetricGroup::Spectral => "spectral",
            MetricGroup::Stereo => "stereo",
            MetricGroup::Dynamics => "dynamics",
        }
    }

    /// Metrics of this group in canonical order
    pub fn metrics(&self) -> &'static [MetricId] {
        let all = &MetricId::ALL;
        match self {
            MetricGroup::Basic => &all[0..3],
            MetricGroup::Loudness => &all[3..6],
            MetricGroup::Spectral => &all[6..13],
            MetricGroup::Stereo => &all[13..16],
            MetricGroup::Dynamics => &all[16..20],
        }
    }
}

/// The 20 metrics tracked by comparisons, scoring and reference matching.
///
/// Serialized as their dotted path (`loudness.integrated_lufs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricId {
    #[serde(rename = "basic.peak_dbfs")]
    BasicPeak = 0,
    #[serde(rename = "basic.rms_dbfs")]
    BasicRms,
    #[serde(rename = "basic.crest_db")]
    BasicCrest,
    #[serde(rename = "loudness.integrated_lufs")]
    LoudnessIntegrated,
    #[serde(rename = "loudness.short_term_lufs")]
    LoudnessShortTerm,
    #[serde(rename = "loudness.loudness_range_lu")]
    LoudnessRange,
    #[serde(rename = "spectral.sub")]
    SpectralSub,
    #[serde(rename = "spectral.low")]
    SpectralLow,
    #[serde(rename = "spectral.lowmid")]
    SpectralLowMid,
    #[serde(rename = "spectral.mid")]
    SpectralMid,
    #[serde(rename = "spectral.highmid")]
    SpectralHighMid,
    #[serde(rename = "spectral.high")]
    SpectralHigh,
    #[serde(rename = "spectral.air")]
    SpectralAir,
    #[serde(rename = "stereo.correlation")]
    StereoCorrelation,
    #[serde(rename = "stereo.lr_balance_db")]
    StereoBalance,
    #[serde(rename = "stereo.width_proxy")]
    StereoWidth,
    #[serde(rename = "dynamics.peak_dbfs")]
    DynamicsPeak,
    #[serde(rename = "dynamics.rms_dbfs")]
    DynamicsRms,
    #[serde(rename = "dynamics.crest_db")]
    DynamicsCrest,
    #[serde(rename = "dynamics.dr_proxy_db")]
    DynamicsDrProxy,
}

impl MetricId {
    /// Canonical order; `ALL[id.index()] == id`
    pub const ALL: [MetricId; 20] = [
        MetricId::BasicPeak,
        MetricId::BasicRms,
        MetricId::BasicCrest,
        MetricId::LoudnessIntegrated,
        MetricId::LoudnessShortTerm,
        MetricId::LoudnessRange,
        MetricId::SpectralSub,
        MetricId::SpectralLow,
        MetricId::SpectralLowMid,
        MetricId::SpectralMid,
        MetricId::SpectralHighMid,
        MetricId::SpectralHigh,
        MetricId::SpectralAir,
        MetricId::StereoCorrelation,
        MetricId::StereoBalance,
        MetricId::StereoWidth,
        MetricId::DynamicsPeak,
        MetricId::DynamicsRms,
        MetricId::DynamicsCrest,
        MetricId::DynamicsDrProxy,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn group(&self) -> MetricGroup {
        match self {
            MetricId::BasicPeak | MetricId::BasicRms | MetricId::BasicCrest => MetricGroup::Basic,
            MetricId::LoudnessIntegrated | MetricId::LoudnessShortTerm | MetricId::LoudnessRange => {
                MetricGroup::Loudness
            }
            MetricId::SpectralSub
            | MetricId::SpectralLow
            | MetricId::SpectralLowMid
            | MetricId::SpectralMid
            | MetricId::SpectralHighMid
            | MetricId::SpectralHigh
            | MetricId::SpectralAir => MetricGroup::Spectral,
            MetricId::StereoCorrelation | MetricId::StereoBalance | MetricId::StereoWidth => {
                MetricGroup::Stereo
            }
            MetricId::DynamicsPeak
            | MetricId::DynamicsRms
            | MetricId::DynamicsCrest
            | MetricId::DynamicsDrProxy => MetricGroup::Dynamics,
        }
    }

    /// Field name within the group
    pub fn key(&self) -> &'static str {
        match self {
            MetricId::BasicPeak | MetricId::DynamicsPeak => "peak_dbfs",
            MetricId::BasicRms | MetricId::DynamicsRms => "rms_dbfs",
            MetricId::BasicCrest | MetricId::DynamicsCrest => "crest_db",
            MetricId::LoudnessIntegrated => "integrated_lufs",
            MetricId::LoudnessShortTerm => "short_term_lufs",
            MetricId::LoudnessRange => "loudness_range_lu",
            MetricId::SpectralSub => "sub",
            MetricId::SpectralLow => "low",
            MetricId::SpectralLowMid => "lowmid",
            MetricId::SpectralMid => "mid",
            MetricId::SpectralHighMid => "highmid",
            MetricId::SpectralHigh => "high",
            MetricId::SpectralAir => "air",
            MetricId::StereoCorrelation => "correlation",
            MetricId::StereoBalance => "lr_balance_db",
            MetricId::StereoWidth => "width_proxy",
            MetricId::DynamicsDrProxy => "dr_proxy_db",
        }
    }

    /// Dotted path, e.g. `spectral.highmid`
    pub fn path(&self) -> &'static str {
        match self {
            MetricId::BasicPeak => "basic.peak_dbfs",
            MetricId::BasicRms => "basic.rms_dbfs",
            MetricId::BasicCrest => "basic.crest_db",
            MetricId::LoudnessIntegrated => "loudness.integrated_lufs",
            MetricId::LoudnessShortTerm => "loudness.short_term_lufs",
            MetricId::LoudnessRange => "loudness.loudness_range_lu",
            MetricId::SpectralSub => "spectral.sub",
            MetricId::SpectralLow => "spectral.low",
            MetricId::SpectralLowMid => "spectral.lowmid",
            MetricId::SpectralMid => "spectral.mid",
            MetricId::SpectralHighMid => "spectral.highmid",
            MetricId::SpectralHigh => "spectral.high",
            MetricId::SpectralAir => "spectral.air",
            MetricId::StereoCorrelation => "stereo.correlation",
            MetricId::StereoBalance => "stereo.lr_balance_db",
            MetricId::StereoWidth => "stereo.width_proxy",
            MetricId::DynamicsPeak => "dynamics.peak_dbfs",
            MetricId::DynamicsRms => "dynamics.rms_dbfs",
            MetricId::DynamicsCrest => "dynamics.crest_db",
            MetricId::DynamicsDrProxy => "dynamics.dr_proxy_db",
        }
    }
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Measurements of one interleaved stereo buffer.
///
/// Every metric is optional: silence or too-short input leaves fields absent,
/// and absence is carried through comparison and scoring untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub schema_version: u32,
    pub frame_count: usize,
    pub sample_rate_hz: f64,
    pub basic: BasicMetrics,
    pub loudness: LoudnessMetrics,
    pub true_peak: TruePeakMetrics,
    pub spectral: SpectralBands,
    pub stereo: StereoMetrics,
    pub dynamics: DynamicsMetrics,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            schema_version: ANALYSIS_SCHEMA_VERSION,
            frame_count: 0,
            sample_rate_hz: 0.0,
            basic: BasicMetrics::default(),
            loudness: LoudnessMetrics::default(),
            true_peak: TruePeakMetrics::default(),
            spectral: SpectralBands::default(),
            stereo: StereoMetrics::default(),
            dynamics: DynamicsMetrics::default(),
        }
    }
}

impl AnalysisResult {
    /// Read one tracked metric
    pub fn metric(&self, id: MetricId) -> Option<f64> {
        match id {
            MetricId::BasicPeak => self.basic.peak_dbfs,
            MetricId::BasicRms => self.basic.rms_dbfs,
            MetricId::BasicCrest => self.basic.crest_db,
            MetricId::LoudnessIntegrated => self.loudness.integrated_lufs,
            MetricId::LoudnessShortTerm => self.loudness.short_term_lufs,
            MetricId::LoudnessRange => self.loudness.loudness_range_lu,
            MetricId::SpectralSub => self.spectral.sub,
            MetricId::SpectralLow => self.spectral.low,
            MetricId::SpectralLowMid => self.spectral.lowmid,
            MetricId::SpectralMid => self.spectral.mid,
            MetricId::SpectralHighMid => self.spectral.highmid,
            MetricId::SpectralHigh => self.spectral.high,
            MetricId::SpectralAir => self.spectral.air,
            MetricId::StereoCorrelation => self.stereo.correlation,
            MetricId::StereoBalance => self.stereo.lr_balance_db,
            MetricId::StereoWidth => self.stereo.width_proxy,
            MetricId::DynamicsPeak => self.dynamics.peak_dbfs,
            MetricId::DynamicsRms => self.dynamics.rms_dbfs,
            MetricId::DynamicsCrest => self.dynamics.crest_db,
            MetricId::DynamicsDrProxy => self.dynamics.dr_proxy_db,
        }
    }

    pub(crate) fn metric_mut(&mut self, id: MetricId) -> &mut Option<f64> {
        match id {
            MetricId::BasicPeak => &mut self.basic.peak_dbfs,
            MetricId::BasicRms => &mut self.basic.rms_dbfs,
            MetricId::BasicCrest => &mut self.basic.crest_db,
            MetricId::LoudnessIntegrated => &mut self.loudness.integrated_lufs,
            MetricId::LoudnessShortTerm => &mut self.loudness.short_term_lufs,
            MetricId::LoudnessRange => &mut self.loudness.loudness_range_lu,
            MetricId::SpectralSub => &mut self.spectral.sub,
            MetricId::SpectralLow => &mut self.spectral.low,
            MetricId::SpectralLowMid => &mut self.spectral.lowmid,
            MetricId::SpectralMid => &mut self.spectral.mid,
            MetricId::SpectralHighMid => &mut self.spectral.highmid,
            MetricId::SpectralHigh => &mut self.spectral.high,
            MetricId::SpectralAir => &mut self.spectral.air,
            MetricId::StereoCorrelation => &mut self.stereo.correlation,
            MetricId::StereoBalance => &mut self.stereo.lr_balance_db,
            MetricId::StereoWidth => &mut self.stereo.width_proxy,
            MetricId::DynamicsPeak => &mut self.dynamics.peak_dbfs,
            MetricId::DynamicsRms => &mut self.dynamics.rms_dbfs,
            MetricId::DynamicsCrest => &mut self.dynamics.crest_db,
            MetricId::DynamicsDrProxy => &mut self.dynamics.dr_proxy_db,
        }
    }

    /// Overwrite the dynamics peak/RMS/crest with the basic group's values.
    pub(crate) fn enforce_dynamics_consistency(&mut self) {
        self.dynamics.peak_dbfs = self.basic.peak_dbfs;
        self.dynamics.rms_dbfs = self.basic.rms_dbfs;
        self.dynamics.crest_db = self.basic.crest_db;
    }

    /// Basic and dynamics agree bit-for-bit on the three shared fields
    pub fn dynamics_consistent(&self) -> bool {
        let same = |a: Option<f64>, b: Option<f64>| a.map(f64::to_bits) == b.map(f64::to_bits);
        same(self.basic.peak_dbfs, self.dynamics.peak_dbfs)
            && same(self.basic.rms_dbfs, self.dynamics.rms_dbfs)
            && same(self.basic.crest_db, self.dynamics.crest_db)
    }

    /// Number of tracked metrics that are present
    pub fn present_metric_count(&self) -> usize {
        MetricId::ALL
            .iter()
            .filter(|id| self.metric(**id).is_some())
            .count()
    }
}
