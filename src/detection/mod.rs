//! Issue detection: rule engine, report types and fix templates

mod result;
mod rules;
mod templates;

pub use result::{
    EvidencePoint, FixStep, IssueItem, IssueKind, IssueReport, Severity,
    ISSUE_REPORT_SCHEMA_VERSION,
};
pub use rules::{confidence_from_norm_distance, diagnose_issues, MAX_REPORTED_ISSUES};
pub use templates::{template_for, FixTemplate, IssueTemplate};
