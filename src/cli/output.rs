//! Output formatting for CLI results

use colorful::Colorful;
use serde::Serialize;

use crate::compare::InRangeClass;
use crate::core::MetricId;
use crate::detection::{IssueItem, Severity};
use crate::report::MixReport;

/// One analyzed file, as written in JSON output
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub file: String,
    pub report: &'a MixReport,
}

fn paint_severity(severity: Severity, text: &str) -> String {
    match severity {
        Severity::Info => text.cyan().to_string(),
        Severity::Minor => text.yellow().to_string(),
        Severity::Moderate => text.red().to_string(),
        Severity::Severe => text.red().bold().to_string(),
    }
}

fn paint_class(class: InRangeClass) -> String {
    let text = class.as_str();
    match class {
        InRangeClass::InRange => text.green().to_string(),
        InRangeClass::SlightlyOff => text.yellow().to_string(),
        InRangeClass::NeedsAttention => text.red().to_string(),
        InRangeClass::Unknown => text.dim().to_string(),
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{:.*}", precision, v))
}

/// Format one report for terminal output
pub fn format_report(file: &str, report: &MixReport, verbose: bool) -> String {
    let mut output = String::new();
    let a = &report.analysis;

    output.push_str(&format!("{}\n", file.bold()));
    output.push_str(&format!(
        "  {} frames @ {} Hz\n",
        a.frame_count, a.sample_rate_hz
    ));
    output.push_str(&format!(
        "  Peak {} dBFS | RMS {} dBFS | Crest {} dB | True peak {} dBFS (x{})\n",
        fmt_opt(a.basic.peak_dbfs, 2),
        fmt_opt(a.basic.rms_dbfs, 2),
        fmt_opt(a.basic.crest_db, 2),
        fmt_opt(a.true_peak.true_peak_dbfs, 2),
        a.true_peak.oversample_factor
    ));
    output.push_str(&format!(
        "  Loudness {} LUFS | Short-term {} LUFS | Range {} LU\n",
        fmt_opt(a.loudness.integrated_lufs, 2),
        fmt_opt(a.loudness.short_term_lufs, 2),
        fmt_opt(a.loudness.loudness_range_lu, 2)
    ));
    output.push_str(&format!(
        "  Correlation {} | Balance {} dB | Width {}\n",
        fmt_opt(a.stereo.correlation, 3),
        fmt_opt(a.stereo.lr_balance_db, 2),
        fmt_opt(a.stereo.width_proxy, 3)
    ));

    if let Some(score) = &report.score {
        output.push_str(&format!(
            "\n  {} {:.1}/100\n",
            "Score".bold(),
            score.overall_0_100
        ));
        for (group, subscore) in &score.subscores {
            output.push_str(&format!("    {:<14} {:>5.1}\n", group, subscore));
        }
    }

    if let Some(refs) = &report.reference_compare {
        output.push_str(&format!(
            "\n  {} {:.1}/100 across {} reference(s)\n",
            "Reference closeness".bold(),
            refs.distance.overall_closeness_0_100,
            refs.reference_count
        ));
    }

    if verbose {
        if let Some(bench) = &report.benchmark_compare {
            output.push_str(&format!("\n  Benchmark {} ({}):\n", bench.profile_id, bench.genre));
            for id in MetricId::ALL {
                let d = bench.metric(id);
                output.push_str(&format!(
                    "    {:<28} {:>9} {:>9} {:>8}  {}\n",
                    id.path(),
                    fmt_opt(d.value, 2),
                    fmt_opt(d.mean, 2),
                    fmt_opt(d.z, 2),
                    paint_class(d.in_range)
                ));
            }
        }
    }

    if report.issues.top_issues.is_empty() {
        output.push_str(&format!("\n  {}\n", "✓ No issues detected".green()));
    } else {
        output.push_str("\n  Issues:\n");
        for issue in &report.issues.top_issues {
            output.push_str(&format_issue(issue, verbose));
        }
    }

    output
}

fn format_issue(issue: &IssueItem, verbose: bool) -> String {
    let mut output = format!(
        "    {} {} {}\n",
        paint_severity(issue.severity, issue.severity.symbol()),
        issue.title,
        format!("({:?}, {:.0}%)", issue.severity, issue.confidence_0_100).dim()
    );
    output.push_str(&format!("      {}\n", issue.summary));

    if verbose {
        for e in &issue.evidence {
            output.push_str(&format!(
                "      {} = {} (target {}, delta {}) {}\n",
                e.metric_path,
                fmt_opt(e.value, 2),
                fmt_opt(e.target_mean, 2),
                fmt_opt(e.delta, 2),
                e.in_range
            ));
        }
        for step in &issue.fix_steps {
            output.push_str(&format!("      → {}: {}\n", step.title, step.action));
            output.push_str(&format!("        {}\n", step.how.as_str().dim()));
        }
    }

    output
}

/// Format all reports as a pretty JSON array
pub fn format_json(reports: &[FileReport<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
