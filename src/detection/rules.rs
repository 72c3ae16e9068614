// src/detection/rules.rs
//
// Deterministic rule battery over benchmark/reference comparisons.
// Each fired rule yields a normalized distance past its threshold, which
// drives severity, confidence and the ranking score.

use log::{debug, trace};
use std::cmp::Ordering;

use super::result::{EvidencePoint, IssueItem, IssueKind, IssueReport, Severity};
use super::templates::template_for;
use crate::compare::{BenchmarkCompareResult, InRangeClass, MetricDelta, ReferenceCompareResult};
use crate::config::RuleEngineConfig;
use crate::core::dsp::optional_delta;
use crate::core::{AnalysisResult, MetricId};

/// Maximum number of issues in a report
pub const MAX_REPORTED_ISSUES: usize = 5;

/// Confidence bonus when the reference average agrees with the benchmark
const REFERENCE_SUPPORT_BONUS: f64 = 10.0;

/// Added to the true-peak distance so overs rank above equivalent tonal issues
const TRUE_PEAK_SEVERITY_BIAS: f64 = 1.0;

/// Evidence path of the true-peak measurement
const TRUE_PEAK_PATH: &str = "true_peak.true_peak_dbfs";

/// Confidence 0-100 from a normalized distance
pub fn confidence_from_norm_distance(norm_distance: f64, reference_support: bool) -> f64 {
    let mut confidence = 55.0 + 15.0 * norm_distance.clamp(0.0, 3.0);
    if reference_support {
        confidence += REFERENCE_SUPPORT_BONUS;
    }
    confidence.clamp(0.0, 100.0)
}

fn nonzero(threshold: f64) -> f64 {
    threshold.abs().max(1e-9)
}

fn evidence(metric: MetricId, delta: &MetricDelta) -> EvidencePoint {
    EvidencePoint {
        metric_path: metric.path().to_string(),
        value: delta.value,
        target_mean: delta.mean,
        delta: delta.delta,
        z: delta.z,
        in_range: delta.in_range,
    }
}

struct RankedIssue {
    item: IssueItem,
    ranking_score: f64,
}

impl RankedIssue {
    fn new(
        kind: IssueKind,
        norm_distance: f64,
        reference_support: bool,
        evidence: Vec<EvidencePoint>,
    ) -> Self {
        let template = template_for(kind);
        let severity = Severity::from_norm_distance(norm_distance);
        let confidence = confidence_from_norm_distance(norm_distance, reference_support);
        let ranking_score = severity.ranking_weight() * norm_distance * (confidence / 100.0);
        trace!(
            "{} fired: norm {:.3}, {:?}, confidence {:.1}, rank {:.4}",
            kind,
            norm_distance,
            severity,
            confidence,
            ranking_score
        );

        Self {
            item: IssueItem {
                id: kind,
                title: template.title.to_string(),
                severity,
                confidence_0_100: confidence,
                summary: template.summary.to_string(),
                evidence,
                fix_steps: template.fixes.iter().map(|f| f.to_step()).collect(),
            },
            ranking_score,
        }
    }
}

/// Both deviations point the same way (zero counts as either)
fn same_direction(a: f64, b: f64) -> bool {
    (a >= 0.0 && b >= 0.0) || (a <= 0.0 && b <= 0.0)
}

fn loudness_rule(
    bench: &BenchmarkCompareResult,
    refs: Option<&ReferenceCompareResult>,
    config: &RuleEngineConfig,
) -> Option<RankedIssue> {
    let metric = bench.metric(MetricId::LoudnessIntegrated);
    let d = metric.delta?;
    if !(d >= config.loudness_hot_delta_lu || d <= config.loudness_cold_delta_lu) {
        return None;
    }

    let kind = if d > 0.0 {
        IssueKind::LoudnessTooHot
    } else {
        IssueKind::LoudnessTooCold
    };
    let norm = d.abs() / nonzero(config.loudness_hot_delta_lu);

    let reference_support = refs
        .and_then(|r| optional_delta(metric.value, r.reference_average.loudness.integrated_lufs))
        .map_or(false, |mix_minus_ref| same_direction(d, mix_minus_ref));

    Some(RankedIssue::new(
        kind,
        norm,
        reference_support,
        vec![evidence(MetricId::LoudnessIntegrated, &metric)],
    ))
}

fn low_end_rule(bench: &BenchmarkCompareResult, config: &RuleEngineConfig) -> Option<RankedIssue> {
    let sub = bench.metric(MetricId::SpectralSub);
    let low = bench.metric(MetricId::SpectralLow);
    let max_delta = sub.delta?.max(low.delta?);
    if !(max_delta >= config.low_end_buildup_delta_db) {
        return None;
    }

    let norm = max_delta / nonzero(config.low_end_buildup_delta_db);
    Some(RankedIssue::new(
        IssueKind::LowEndBuildup,
        norm,
        false,
        vec![
            evidence(MetricId::SpectralSub, &sub),
            evidence(MetricId::SpectralLow, &low),
        ],
    ))
}

fn harsh_mids_rule(bench: &BenchmarkCompareResult, config: &RuleEngineConfig) -> Option<RankedIssue> {
    let highmid = bench.metric(MetricId::SpectralHighMid);
    let d = highmid.delta?;
    if !(d >= config.harsh_mids_delta_db) {
        return None;
    }

    let norm = d / nonzero(config.harsh_mids_delta_db);
    Some(RankedIssue::new(
        IssueKind::HarshMids,
        norm,
        false,
        vec![evidence(MetricId::SpectralHighMid, &highmid)],
    ))
}

fn dull_top_rule(bench: &BenchmarkCompareResult, config: &RuleEngineConfig) -> Option<RankedIssue> {
    let air = bench.metric(MetricId::SpectralAir);
    let high = bench.metric(MetricId::SpectralHigh);
    let d = air.delta.or(high.delta)?;
    if !(d <= config.dull_top_delta_db) {
        return None;
    }

    let norm = d.abs() / nonzero(config.dull_top_delta_db);
    let mut points = Vec::with_capacity(2);
    if air.delta.is_some() {
        points.push(evidence(MetricId::SpectralAir, &air));
    }
    if high.delta.is_some() {
        points.push(evidence(MetricId::SpectralHigh, &high));
    }
    Some(RankedIssue::new(IssueKind::DullTop, norm, false, points))
}

/// Width is judged by its delta, correlation by its raw value
fn stereo_rule(bench: &BenchmarkCompareResult, config: &RuleEngineConfig) -> Option<RankedIssue> {
    let width = bench.metric(MetricId::StereoWidth);
    let correlation = bench.metric(MetricId::StereoCorrelation);

    let mut norm: Option<f64> = None;
    let mut points = Vec::new();

    if let Some(d) = width.delta.filter(|d| d.abs() >= config.stereo_width_delta_abs) {
        norm = Some(d.abs() / nonzero(config.stereo_width_delta_abs));
        points.push(evidence(MetricId::StereoWidth, &width));
    }
    if let Some(v) = correlation.value.filter(|&v| v < config.stereo_correlation_min) {
        let corr_norm = (v - config.stereo_correlation_min).abs() / nonzero(config.stereo_correlation_min);
        norm = Some(norm.map_or(corr_norm, |n| n.max(corr_norm)));
        points.push(evidence(MetricId::StereoCorrelation, &correlation));
    }

    norm.map(|n| RankedIssue::new(IssueKind::StereoWidthImbalance, n, false, points))
}

fn dynamics_rule(bench: &BenchmarkCompareResult, config: &RuleEngineConfig) -> Option<RankedIssue> {
    let crest = bench.metric(MetricId::DynamicsCrest);
    let d = crest.delta?;
    if !(d <= config.dynamics_crushed_delta_db || d >= config.dynamics_spiky_delta_db) {
        return None;
    }

    let (kind, threshold) = if d < 0.0 {
        (IssueKind::DynamicsTooCrushed, config.dynamics_crushed_delta_db)
    } else {
        (IssueKind::DynamicsTooSpiky, config.dynamics_spiky_delta_db)
    };
    let norm = (d / nonzero(threshold)).abs();
    Some(RankedIssue::new(
        kind,
        norm,
        false,
        vec![evidence(MetricId::DynamicsCrest, &crest)],
    ))
}

/// Mix-only check; distance is measured from the ceiling itself
fn true_peak_rule(mix: &AnalysisResult, config: &RuleEngineConfig) -> Option<RankedIssue> {
    let tp = mix.true_peak.true_peak_dbfs?;
    let threshold = config.true_peak_max_dbfs;
    if tp <= threshold {
        return None;
    }

    let norm = (tp - threshold) / nonzero(threshold);
    let point = EvidencePoint {
        metric_path: TRUE_PEAK_PATH.to_string(),
        value: Some(tp),
        target_mean: Some(threshold),
        delta: Some(tp - threshold),
        z: None,
        in_range: InRangeClass::NeedsAttention,
    };
    Some(RankedIssue::new(
        IssueKind::TruePeakRisk,
        norm + TRUE_PEAK_SEVERITY_BIAS,
        false,
        vec![point],
    ))
}

/// Descending ranking score, ties by ascending issue id
fn rank_order(a: &RankedIssue, b: &RankedIssue) -> Ordering {
    b.ranking_score
        .total_cmp(&a.ranking_score)
        .then_with(|| a.item.id.id().cmp(b.item.id.id()))
}

/// Run every rule and return the top-ranked issues.
///
/// Benchmark rules are skipped without a benchmark comparison; the true-peak
/// rule always runs. References only feed the loudness rule's confidence.
pub fn diagnose_issues(
    mix: &AnalysisResult,
    bench: Option<&BenchmarkCompareResult>,
    refs: Option<&ReferenceCompareResult>,
    config: &RuleEngineConfig,
) -> IssueReport {
    let mut ranked: Vec<RankedIssue> = Vec::new();

    if let Some(bench) = bench {
        ranked.extend(loudness_rule(bench, refs, config));
        ranked.extend(low_end_rule(bench, config));
        ranked.extend(harsh_mids_rule(bench, config));
        ranked.extend(dull_top_rule(bench, config));
        ranked.extend(stereo_rule(bench, config));
        ranked.extend(dynamics_rule(bench, config));
    }
    ranked.extend(true_peak_rule(mix, config));

    let fired = ranked.len();
    ranked.sort_by(rank_order);
    ranked.truncate(MAX_REPORTED_ISSUES);

    debug!("Issue rules ({}): {} fired, {} reported", config.version, fired, ranked.len());

    IssueReport {
        top_issues: ranked.into_iter().map(|r| r.item).collect(),
        ..IssueReport::default()
    }
}
