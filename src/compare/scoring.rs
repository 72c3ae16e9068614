// src/compare/scoring.rs
//
// Weighted 0-100 quality score from a benchmark comparison.
// The basic group is never scored.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::benchmark::{BenchmarkCompareResult, InRangeClass, MetricDelta};
use crate::config::ScoreConfig;
use crate::core::MetricGroup;

/// Scored groups and the metric group each one averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGroup {
    Loudness,
    Dynamics,
    TonalBalance,
    Stereo,
}

impl ScoreGroup {
    pub const ALL: [ScoreGroup; 4] = [
        ScoreGroup::Loudness,
        ScoreGroup::Dynamics,
        ScoreGroup::TonalBalance,
        ScoreGroup::Stereo,
    ];

    /// Key used in weight and subscore maps
    pub fn key(&self) -> &'static str {
        match self {
            ScoreGroup::Loudness => "loudness",
            ScoreGroup::Dynamics => "dynamics",
            ScoreGroup::TonalBalance => "tonal_balance",
            ScoreGroup::Stereo => "stereo",
        }
    }

    pub fn metric_group(&self) -> MetricGroup {
        match self {
            ScoreGroup::Loudness => MetricGroup::Loudness,
            ScoreGroup::Dynamics => MetricGroup::Dynamics,
            ScoreGroup::TonalBalance => MetricGroup::Spectral,
            ScoreGroup::Stereo => MetricGroup::Stereo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub version: String,
    pub overall_0_100: f64,
    pub subscores: BTreeMap<String, f64>,
    pub weights: BTreeMap<String, f64>,
    pub notes: Vec<String>,
}

impl ScoreBreakdown {
    pub fn subscore(&self, group: ScoreGroup) -> Option<f64> {
        self.subscores.get(group.key()).copied()
    }
}

/// Map one metric's classification (and z, when known) to 0-100
pub fn score_metric(delta: &MetricDelta) -> f64 {
    match delta.in_range {
        InRangeClass::InRange => 100.0,
        InRangeClass::SlightlyOff => match delta.z {
            Some(z) => (100.0 - 20.0 * z.abs()).max(60.0),
            None => 70.0,
        },
        InRangeClass::NeedsAttention => match delta.z {
            Some(z) => (60.0 - 12.5 * z.abs()).max(0.0),
            None => 35.0,
        },
        InRangeClass::Unknown => 50.0,
    }
}

fn group_subscore(compare: &BenchmarkCompareResult, group: ScoreGroup) -> f64 {
    let metrics = group.metric_group().metrics();
    let sum: f64 = metrics.iter().map(|&id| score_metric(&compare.metric(id))).sum();
    sum / metrics.len() as f64
}

/// Compute subscores and the weighted overall score
pub fn compute_score(compare: &BenchmarkCompareResult, config: &ScoreConfig) -> ScoreBreakdown {
    let subscores: BTreeMap<String, f64> = ScoreGroup::ALL
        .iter()
        .map(|&group| (group.key().to_string(), group_subscore(compare, group)))
        .collect();

    // sorted key order keeps the summation reproducible
    let (weighted_sum, total_weight) =
        subscores
            .iter()
            .fold((0.0, 0.0), |(sum, total), (name, subscore)| {
                let w = config.weight(name);
                (sum + w * subscore, total + w)
            });

    let overall = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };
    let overall_0_100 = overall.clamp(0.0, 100.0);

    let s = &compare.summary;
    let notes = vec![
        format!("scoring_version={}", config.version),
        format!("profile_id={}", compare.profile_id),
        format!(
            "classification_counts=in_range:{},slightly_off:{},needs_attention:{},unknown:{}",
            s.in_range_count, s.slightly_off_count, s.needs_attention_count, s.unknown_count
        ),
    ];

    debug!("Score {:.1} ({:?})", overall_0_100, subscores);

    ScoreBreakdown {
        version: config.version.clone(),
        overall_0_100,
        subscores,
        weights: config.weights.clone(),
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetricId;

    fn delta(class: InRangeClass, z: Option<f64>) -> MetricDelta {
        MetricDelta {
            value: Some(0.0),
            mean: Some(0.0),
            delta: Some(0.0),
            z,
            in_range: class,
        }
    }

    #[test]
    fn test_metric_mapping() {
        assert_eq!(score_metric(&delta(InRangeClass::InRange, Some(0.9))), 100.0);
        assert_eq!(score_metric(&delta(InRangeClass::SlightlyOff, Some(1.5))), 70.0);
        assert_eq!(score_metric(&delta(InRangeClass::SlightlyOff, Some(3.0))), 60.0);
        assert_eq!(score_metric(&delta(InRangeClass::SlightlyOff, None)), 70.0);
        assert_eq!(score_metric(&delta(InRangeClass::NeedsAttention, Some(-2.0))), 35.0);
        assert_eq!(score_metric(&delta(InRangeClass::NeedsAttention, Some(10.0))), 0.0);
        assert_eq!(score_metric(&delta(InRangeClass::NeedsAttention, None)), 35.0);
        assert_eq!(score_metric(&MetricDelta::default()), 50.0);
    }

    #[test]
    fn test_all_unknown_scores_fifty() {
        let mut compare = BenchmarkCompareResult::default();
        compare.recount();
        let score = compute_score(&compare, &ScoreConfig::default());
        assert!((score.overall_0_100 - 50.0).abs() < 1e-12);
        assert_eq!(score.subscores.len(), 4);
        assert_eq!(score.notes[0], "scoring_version=v1");
        assert_eq!(
            score.notes[2],
            "classification_counts=in_range:0,slightly_off:0,needs_attention:0,unknown:20"
        );
    }

    #[test]
    fn test_basic_group_ignored() {
        let mut compare = BenchmarkCompareResult::default();
        compare.set_metric(MetricId::BasicPeak, delta(InRangeClass::NeedsAttention, Some(9.0)));
        let score = compute_score(&compare, &ScoreConfig::default());
        assert!((score.overall_0_100 - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weights_give_zero() {
        let config = ScoreConfig {
            version: "v1".to_string(),
            weights: BTreeMap::new(),
        };
        let score = compute_score(&BenchmarkCompareResult::default(), &config);
        assert_eq!(score.overall_0_100, 0.0);
    }

    #[test]
    fn test_weighted_average() {
        let mut compare = BenchmarkCompareResult::default();
        for &id in MetricGroup::Loudness.metrics() {
            compare.set_metric(id, delta(InRangeClass::InRange, None));
        }
        let score = compute_score(&compare, &ScoreConfig::default());
        assert_eq!(score.subscore(ScoreGroup::Loudness), Some(100.0));
        // 0.30 * 100 + 0.70 * 50
        assert!((score.overall_0_100 - 65.0).abs() < 1e-9);
    }
}
