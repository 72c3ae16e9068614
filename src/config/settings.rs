// src/config/settings.rs
//
// Engine configuration: rule thresholds, score weights and analyzer options.
// Plain values passed explicitly; nothing here is global.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::DEFAULT_TRUE_PEAK_OVERSAMPLE;
use crate::error::Result;

/// Thresholds for the issue rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleEngineConfig {
    pub version: String,
    /// Integrated loudness delta (LU) at or above which the mix is too hot
    pub loudness_hot_delta_lu: f64,
    /// Integrated loudness delta (LU) at or below which the mix is too cold
    pub loudness_cold_delta_lu: f64,
    /// True peak (dBFS) above which clipping risk is reported
    pub true_peak_max_dbfs: f64,
    pub low_end_buildup_delta_db: f64,
    pub harsh_mids_delta_db: f64,
    pub dull_top_delta_db: f64,
    /// Absolute width-proxy delta that flags an imbalance
    pub stereo_width_delta_abs: f64,
    /// Raw correlation below which phase problems are reported
    pub stereo_correlation_min: f64,
    pub dynamics_crushed_delta_db: f64,
    pub dynamics_spiky_delta_db: f64,
}

impl Default for RuleEngineConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            loudness_hot_delta_lu: 1.0,
            loudness_cold_delta_lu: -1.0,
            true_peak_max_dbfs: -1.0,
            low_end_buildup_delta_db: 2.0,
            harsh_mids_delta_db: 1.5,
            dull_top_delta_db: -1.5,
            stereo_width_delta_abs: 0.15,
            stereo_correlation_min: -0.10,
            dynamics_crushed_delta_db: -2.0,
            dynamics_spiky_delta_db: 2.0,
        }
    }
}

/// Weights for the overall score, keyed by score group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub version: String,
    pub weights: BTreeMap<String, f64>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        let weights = [
            ("loudness", 0.30),
            ("dynamics", 0.25),
            ("tonal_balance", 0.25),
            ("stereo", 0.20),
        ]
        .into_iter()
        .map(|(k, w)| (k.to_string(), w))
        .collect();

        Self {
            version: "v1".to_string(),
            weights,
        }
    }
}

impl ScoreConfig {
    /// Weight for a group; unknown groups weigh nothing
    pub fn weight(&self, group: &str) -> f64 {
        self.weights.get(group).copied().unwrap_or(0.0)
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: RuleEngineConfig,
    pub scoring: ScoreConfig,
    pub true_peak_oversample: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: RuleEngineConfig::default(),
            scoring: ScoreConfig::default(),
            true_peak_oversample: DEFAULT_TRUE_PEAK_OVERSAMPLE,
        }
    }
}

impl EngineConfig {
    /// Parse JSON overrides; omitted fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let config = ScoreConfig::default();
        assert_eq!(config.weight("loudness"), 0.30);
        assert_eq!(config.weight("tonal_balance"), 0.25);
        assert_eq!(config.weight("basic"), 0.0);
        let total: f64 = config.weights.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "rules": { "true_peak_max_dbfs": -2.0 }, "true_peak_oversample": 8 }"#,
        )
        .unwrap();
        assert_eq!(config.rules.true_peak_max_dbfs, -2.0);
        assert_eq!(config.rules.loudness_hot_delta_lu, 1.0);
        assert_eq!(config.rules.version, "v1");
        assert_eq!(config.true_peak_oversample, 8);
        assert_eq!(config.scoring, ScoreConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }
}
