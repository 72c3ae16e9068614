//! Full pipeline output for one mix

use log::debug;
use serde::{Deserialize, Serialize};

use crate::compare::{
    compare_against_benchmark, compare_to_references, compute_score, BenchmarkCompareResult,
    ReferenceCompareResult, ScoreBreakdown,
};
use crate::config::{BenchmarkProfile, EngineConfig};
use crate::core::AnalysisResult;
use crate::detection::{diagnose_issues, IssueReport};
use crate::error::Result;

/// Analysis plus every comparison the available inputs allow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixReport {
    pub analysis: AnalysisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_compare: Option<BenchmarkCompareResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_compare: Option<ReferenceCompareResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreBreakdown>,
    pub issues: IssueReport,
}

impl MixReport {
    /// Run benchmark comparison and scoring (with a profile), reference
    /// comparison (with references) and the issue rules.
    pub fn build(
        analysis: AnalysisResult,
        profile: Option<&BenchmarkProfile>,
        references: &[AnalysisResult],
        config: &EngineConfig,
    ) -> Result<Self> {
        let benchmark_compare = profile.map(|p| compare_against_benchmark(&analysis, p));
        let score = benchmark_compare
            .as_ref()
            .map(|b| compute_score(b, &config.scoring));
        let reference_compare = if references.is_empty() {
            None
        } else {
            Some(compare_to_references(&analysis, references)?)
        };

        let issues = diagnose_issues(
            &analysis,
            benchmark_compare.as_ref(),
            reference_compare.as_ref(),
            &config.rules,
        );
        debug!(
            "Report built: score {:?}, {} issues",
            score.as_ref().map(|s| s.overall_0_100),
            issues.top_issues.len()
        );

        Ok(Self {
            analysis,
            benchmark_compare,
            reference_compare,
            score,
            issues,
        })
    }
}
