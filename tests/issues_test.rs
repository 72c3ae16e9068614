// tests/issues_test.rs
//
// Issue rule engine: ranking, capping, evidence/fix completeness and
// determinism over hand-built benchmark comparisons.

mod test_utils;

use mixcheckr::compare::InRangeClass::{NeedsAttention, SlightlyOff};
use mixcheckr::compare::BenchmarkCompareResult;
use mixcheckr::config::RuleEngineConfig;
use mixcheckr::core::{AnalysisResult, MetricId};
use mixcheckr::detection::{diagnose_issues, IssueKind, Severity, MAX_REPORTED_ISSUES};

use test_utils::{bench_with, metric_delta};

/// A hot, over-ceiling mix with six benchmark rules firing
fn overcooked() -> (AnalysisResult, BenchmarkCompareResult) {
    let mut mix = AnalysisResult::default();
    mix.true_peak.true_peak_dbfs = Some(0.8);

    let bench = bench_with(&[
        (MetricId::LoudnessIntegrated, metric_delta(-3.0, -10.5, Some(6.25), NeedsAttention)),
        (MetricId::SpectralSub, metric_delta(-18.0, -24.0, Some(2.0), NeedsAttention)),
        (MetricId::SpectralLow, metric_delta(-17.0, -20.0, Some(1.5), SlightlyOff)),
        (MetricId::SpectralHighMid, metric_delta(-13.0, -17.0, Some(1.8), NeedsAttention)),
        (MetricId::DynamicsCrest, metric_delta(4.0, 8.8, Some(-3.0), NeedsAttention)),
        (MetricId::StereoWidth, metric_delta(0.3, 0.0, Some(1.2), NeedsAttention)),
        (MetricId::StereoCorrelation, metric_delta(-0.2, 0.55, Some(-2.0), NeedsAttention)),
    ]);
    (mix, bench)
}

#[test]
fn test_overcooked_mix_ranking() {
    let (mix, bench) = overcooked();
    let report = diagnose_issues(&mix, Some(&bench), None, &RuleEngineConfig::default());

    // loudness 15.0, low end 6.0, true peak 5.432, harsh 5.07, crushed 3.276, stereo 2.55
    assert_eq!(
        report.ids(),
        vec![
            "LOUDNESS_TOO_HOT",
            "LOW_END_BUILDUP",
            "TRUE_PEAK_RISK",
            "HARSH_MIDS",
            "DYNAMICS_TOO_CRUSHED",
        ]
    );
    assert_eq!(report.top_issues.len(), MAX_REPORTED_ISSUES);
    assert!(!report.contains(IssueKind::StereoWidthImbalance));

    let loudness = &report.top_issues[0];
    assert_eq!(loudness.severity, Severity::Severe);
    assert_eq!(loudness.confidence_0_100, 100.0);

    let crushed = &report.top_issues[4];
    assert_eq!(crushed.severity, Severity::Moderate);
    assert!((crushed.confidence_0_100 - 91.0).abs() < 1e-9);
}

#[test]
fn test_required_issues_are_complete() {
    let (mix, bench) = overcooked();
    let report = diagnose_issues(&mix, Some(&bench), None, &RuleEngineConfig::default());

    for kind in [
        IssueKind::LoudnessTooHot,
        IssueKind::TruePeakRisk,
        IssueKind::LowEndBuildup,
    ] {
        assert!(report.contains(kind), "missing {}", kind);
    }
    for issue in &report.top_issues {
        assert!(!issue.evidence.is_empty(), "{} has no evidence", issue.id);
        assert!(!issue.fix_steps.is_empty(), "{} has no fix steps", issue.id);
        assert!((0.0..=100.0).contains(&issue.confidence_0_100));
        assert!(!issue.title.is_empty());
        for step in &issue.fix_steps {
            assert!(!step.action.is_empty() && !step.recheck.is_empty());
        }
    }

    let low_end = report
        .top_issues
        .iter()
        .find(|i| i.id == IssueKind::LowEndBuildup)
        .unwrap();
    let paths: Vec<&str> = low_end.evidence.iter().map(|e| e.metric_path.as_str()).collect();
    assert_eq!(paths, vec!["spectral.sub", "spectral.low"]);
    assert_eq!(low_end.evidence[1].in_range, SlightlyOff);
}

#[test]
fn test_rerun_is_identical() {
    let (mix, bench) = overcooked();
    let config = RuleEngineConfig::default();
    let first = diagnose_issues(&mix, Some(&bench), None, &config);

    for _ in 0..16 {
        let again = diagnose_issues(&mix, Some(&bench), None, &config);
        assert_eq!(again.ids(), first.ids());
        let confidences = |r: &mixcheckr::IssueReport| -> Vec<u64> {
            r.top_issues.iter().map(|i| i.confidence_0_100.to_bits()).collect()
        };
        assert_eq!(confidences(&again), confidences(&first));
        assert_eq!(again, first);
    }
}

#[test]
fn test_stricter_thresholds_change_the_outcome() {
    let (mix, bench) = overcooked();
    let lenient = RuleEngineConfig {
        loudness_hot_delta_lu: 10.0,
        true_peak_max_dbfs: 1.0,
        low_end_buildup_delta_db: 10.0,
        harsh_mids_delta_db: 10.0,
        dynamics_crushed_delta_db: -10.0,
        ..RuleEngineConfig::default()
    };
    let report = diagnose_issues(&mix, Some(&bench), None, &lenient);
    assert_eq!(report.ids(), vec!["STEREO_WIDTH_IMBALANCE"]);
    assert_eq!(report.top_issues[0].evidence.len(), 2);
}

#[test]
fn test_without_benchmark_only_true_peak_runs() {
    let (mix, _) = overcooked();
    let report = diagnose_issues(&mix, None, None, &RuleEngineConfig::default());
    assert_eq!(report.ids(), vec!["TRUE_PEAK_RISK"]);
    assert_eq!(report.schema_version, "0.5.0");
}
