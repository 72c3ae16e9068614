// src/config/profiles.rs
//
// Genre benchmark profiles: per-metric targets grouped like AnalysisResult

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::MetricId;
use crate::error::{MixError, Result};

/// Target for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricTarget {
    pub mean: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_max: Option<f64>,
}

impl MetricTarget {
    pub fn new(mean: f64) -> Self {
        Self {
            mean,
            stddev: None,
            target_min: None,
            target_max: None,
        }
    }

    pub fn with_stddev(mut self, stddev: f64) -> Self {
        self.stddev = Some(stddev);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.target_min = Some(min);
        self.target_max = Some(max);
        self
    }

    /// `(min, max)` when both bounds are set
    pub fn range(&self) -> Option<(f64, f64)> {
        self.target_min.zip(self.target_max)
    }

    fn validate(&self, metric: MetricId) -> Result<()> {
        let invalid = |what: &str| MixError::InvalidProfile(format!("{}: {}", metric.path(), what));

        let numbers = [Some(self.mean), self.stddev, self.target_min, self.target_max];
        if numbers.iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid("non-finite value"));
        }
        if self.stddev.map_or(false, |s| s < 0.0) {
            return Err(invalid("negative stddev"));
        }
        if let Some((min, max)) = self.range() {
            if min > max {
                return Err(invalid("target_min exceeds target_max"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicTargets {
    pub peak_dbfs: Option<MetricTarget>,
    pub rms_dbfs: Option<MetricTarget>,
    pub crest_db: Option<MetricTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoudnessTargets {
    pub integrated_lufs: Option<MetricTarget>,
    pub short_term_lufs: Option<MetricTarget>,
    pub loudness_range_lu: Option<MetricTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralTargets {
    pub sub: Option<MetricTarget>,
    pub low: Option<MetricTarget>,
    pub lowmid: Option<MetricTarget>,
    pub mid: Option<MetricTarget>,
    pub highmid: Option<MetricTarget>,
    pub high: Option<MetricTarget>,
    pub air: Option<MetricTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereoTargets {
    pub correlation: Option<MetricTarget>,
    pub lr_balance_db: Option<MetricTarget>,
    pub width_proxy: Option<MetricTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsTargets {
    pub peak_dbfs: Option<MetricTarget>,
    pub rms_dbfs: Option<MetricTarget>,
    pub crest_db: Option<MetricTarget>,
    pub dr_proxy_db: Option<MetricTarget>,
}

/// Targets for every group; groups missing from the JSON are empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkMetrics {
    pub basic: BasicTargets,
    pub loudness: LoudnessTargets,
    pub spectral: SpectralTargets,
    pub stereo: StereoTargets,
    pub dynamics: DynamicsTargets,
}

impl BenchmarkMetrics {
    pub fn target(&self, id: MetricId) -> Option<&MetricTarget> {
        match id {
            MetricId::BasicPeak => self.basic.peak_dbfs.as_ref(),
            MetricId::BasicRms => self.basic.rms_dbfs.as_ref(),
            MetricId::BasicCrest => self.basic.crest_db.as_ref(),
            MetricId::LoudnessIntegrated => self.loudness.integrated_lufs.as_ref(),
            MetricId::LoudnessShortTerm => self.loudness.short_term_lufs.as_ref(),
            MetricId::LoudnessRange => self.loudness.loudness_range_lu.as_ref(),
            MetricId::SpectralSub => self.spectral.sub.as_ref(),
            MetricId::SpectralLow => self.spectral.low.as_ref(),
            MetricId::SpectralLowMid => self.spectral.lowmid.as_ref(),
            MetricId::SpectralMid => self.spectral.mid.as_ref(),
            MetricId::SpectralHighMid => self.spectral.highmid.as_ref(),
            MetricId::SpectralHigh => self.spectral.high.as_ref(),
            MetricId::SpectralAir => self.spectral.air.as_ref(),
            MetricId::StereoCorrelation => self.stereo.correlation.as_ref(),
            MetricId::StereoBalance => self.stereo.lr_balance_db.as_ref(),
            MetricId::StereoWidth => self.stereo.width_proxy.as_ref(),
            MetricId::DynamicsPeak => self.dynamics.peak_dbfs.as_ref(),
            MetricId::DynamicsRms => self.dynamics.rms_dbfs.as_ref(),
            MetricId::DynamicsCrest => self.dynamics.crest_db.as_ref(),
            MetricId::DynamicsDrProxy => self.dynamics.dr_proxy_db.as_ref(),
        }
    }

    fn target_mut(&mut self, id: MetricId) -> &mut Option<MetricTarget> {
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
}

/// A named genre benchmark. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkProfile {
    pub schema_version: String,
    pub genre: String,
    pub profile_id: String,
    pub created_at_utc: String,
    pub track_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_notes: Option<String>,
    pub metrics: BenchmarkMetrics,
}

impl BenchmarkProfile {
    pub fn target(&self, id: MetricId) -> Option<&MetricTarget> {
        self.metrics.target(id)
    }

    /// Number of metrics with a target
    pub fn target_count(&self) -> usize {
        MetricId::ALL.iter().filter(|id| self.target(**id).is_some()).count()
    }

    /// Parse and validate a profile from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: BenchmarkProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let profile = Self::from_json_str(&text)?;
        debug!(
            "Loaded benchmark profile '{}' ({}, {} tracks, {} targets)",
            profile.profile_id,
            profile.genre,
            profile.track_count,
            profile.target_count()
        );
        Ok(profile)
    }

    /// Reject targets no comparison could use sensibly
    pub fn validate(&self) -> Result<()> {
        for id in MetricId::ALL {
            if let Some(target) = self.target(id) {
                target.validate(id)?;
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for profiles assembled in code
pub struct ProfileBuilder {
    profile: BenchmarkProfile,
}

impl ProfileBuilder {
    pub fn new(profile_id: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            profile: BenchmarkProfile {
                schema_version: "1.0.0".to_string(),
                genre: genre.into(),
                profile_id: profile_id.into(),
                created_at_utc: DateTime::<Utc>::UNIX_EPOCH.to_rfc3339(),
                track_count: 0,
                source_notes: None,
                metrics: BenchmarkMetrics::default(),
            },
        }
    }

    pub fn schema_version(mut self, version: impl Into<String>) -> Self {
        self.profile.schema_version = version.into();
        self
    }

    pub fn created_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.profile.created_at_utc = timestamp.to_rfc3339();
        self
    }

    pub fn track_count(mut self, count: u32) -> Self {
        self.profile.track_count = count;
        self
    }

    pub fn source_notes(mut self, notes: impl Into<String>) -> Self {
        self.profile.source_notes = Some(notes.into());
        self
    }

    pub fn target(mut self, id: MetricId, target: MetricTarget) -> Self {
        *self.profile.metrics.target_mut(id) = Some(target);
        self
    }

    pub fn build(self) -> BenchmarkProfile {
        self.profile
    }
}
