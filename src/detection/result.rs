//! Issue report types: severity, evidence, fix steps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compare::InRangeClass;

/// Schema version of [`IssueReport`]
pub const ISSUE_REPORT_SCHEMA_VERSION: &str = "0.5.0";

/// Severity level for a diagnosed issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational - barely past the threshold
    Info,
    Minor,
    Moderate,
    /// Far outside the target
    Severe,
}

impl Severity {
    pub fn from_norm_distance(norm_distance: f64) -> Self {
        match norm_distance {
            d if d >= 2.5 => Severity::Severe,
            d if d >= 1.5 => Severity::Moderate,
            d if d >= 0.7 => Severity::Minor,
            _ => Severity::Info,
        }
    }

    /// Multiplier applied to the ranking score
    pub fn ranking_weight(&self) -> f64 {
        match self {
            Severity::Info => 0.8,
            Severity::Minor => 1.0,
            Severity::Moderate => 1.5,
            Severity::Severe => 2.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Minor => "⚠",
            Severity::Moderate => "⚠",
            Severity::Severe => "✗",
        }
    }
}

/// Stable identifiers of the issues the rule engine can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    LoudnessTooHot,
    LoudnessTooCold,
    TruePeakRisk,
    LowEndBuildup,
    HarshMids,
    DullTop,
    StereoWidthImbalance,
    DynamicsTooCrushed,
    DynamicsTooSpiky,
}

impl IssueKind {
    pub fn id(&self) -> &'static str {
        match self {
            IssueKind::LoudnessTooHot => "LOUDNESS_TOO_HOT",
            IssueKind::LoudnessTooCold => "LOUDNESS_TOO_COLD",
            IssueKind::TruePeakRisk => "TRUE_PEAK_RISK",
            IssueKind::LowEndBuildup => "LOW_END_BUILDUP",
            IssueKind::HarshMids => "HARSH_MIDS",
            IssueKind::DullTop => "DULL_TOP",
            IssueKind::StereoWidthImbalance => "STEREO_WIDTH_IMBALANCE",
            IssueKind::DynamicsTooCrushed => "DYNAMICS_TOO_CRUSHED",
            IssueKind::DynamicsTooSpiky => "DYNAMICS_TOO_SPIKY",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// One measured fact backing an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidencePoint {
    pub metric_path: String,
    pub value: Option<f64>,
    pub target_mean: Option<f64>,
    pub delta: Option<f64>,
    pub z: Option<f64>,
    pub in_range: InRangeClass,
}

/// One step of fix guidance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixStep {
    pub title: String,
    pub action: String,
    pub when: String,
    pub how: String,
    pub recheck: String,
}

/// A diagnosed mix issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueItem {
    pub id: IssueKind,
    pub title: String,
    pub severity: Severity,
    pub confidence_0_100: f64,
    pub summary: String,
    pub evidence: Vec<EvidencePoint>,
    pub fix_steps: Vec<FixStep>,
}

/// Ranked issues for one mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
    pub schema_version: String,
    pub top_issues: Vec<IssueItem>,
    pub generated_at_utc: DateTime<Utc>,
}

impl Default for IssueReport {
    fn default() -> Self {
        Self {
            schema_version: ISSUE_REPORT_SCHEMA_VERSION.to_string(),
            top_issues: Vec::new(),
            generated_at_utc: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl IssueReport {
    /// Issue ids in ranked order
    pub fn ids(&self) -> Vec<&'static str> {
        self.top_issues.iter().map(|i| i.id.id()).collect()
    }

    pub fn contains(&self, kind: IssueKind) -> bool {
        self.top_issues.iter().any(|i| i.id == kind)
    }

    /// Replace the fixed epoch timestamp, e.g. with `Utc::now()` at export time
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at_utc = at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_norm_distance() {
        assert_eq!(Severity::from_norm_distance(3.0), Severity::Severe);
        assert_eq!(Severity::from_norm_distance(2.5), Severity::Severe);
        assert_eq!(Severity::from_norm_distance(1.5), Severity::Moderate);
        assert_eq!(Severity::from_norm_distance(0.7), Severity::Minor);
        assert_eq!(Severity::from_norm_distance(0.69), Severity::Info);
    }

    #[test]
    fn test_issue_id_serialization() {
        for kind in [IssueKind::LoudnessTooHot, IssueKind::StereoWidthImbalance, IssueKind::DullTop] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn test_default_report_timestamp() {
        let json = serde_json::to_value(IssueReport::default()).unwrap();
        assert_eq!(json["schema_version"], "0.5.0");
        assert_eq!(json["generated_at_utc"], "1970-01-01T00:00:00Z");
    }
}
