// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::{Args, OutputFormat};
pub use output::{format_json, format_report, FileReport};

use anyhow::{bail, Context, Result};
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{BenchmarkProfile, EngineConfig};
use crate::core::decoder::is_supported_audio;
use crate::core::{AnalysisResult, Analyzer};
use crate::report::MixReport;

/// Expand files and directories into a sorted, de-duplicated list of audio files
pub fn collect_audio_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_supported_audio(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            warn!("Skipping {}: not a file or directory", input.display());
        }
    }

    files.sort();
    files.dedup();
    files
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load engine config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(factor) = args.true_peak_oversample {
        config.true_peak_oversample = factor;
    }
    Ok(config)
}

/// Expand explicitly requested reference paths.
///
/// Unlike inputs, every named reference must exist, and a directory must
/// contain at least one audio file.
pub fn collect_reference_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_file() && !path.is_dir() {
            bail!("Reference not found: {}", path.display());
        }
        let found = collect_audio_files(std::slice::from_ref(path));
        if found.is_empty() {
            bail!("No audio files in reference directory: {}", path.display());
        }
        files.extend(found);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn analyze_references(analyzer: &Analyzer, paths: &[PathBuf]) -> Result<Vec<AnalysisResult>> {
    collect_reference_files(paths)?
        .iter()
        .map(|path| {
            analyzer
                .analyze_file(path)
                .with_context(|| format!("Failed to analyze reference: {}", path.display()))
        })
        .collect()
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

fn analyze_one(
    path: &Path,
    analyzer: &Analyzer,
    profile: Option<&BenchmarkProfile>,
    references: &[AnalysisResult],
    config: &EngineConfig,
) -> crate::error::Result<MixReport> {
    let analysis = analyzer.analyze_file(path)?;
    MixReport::build(analysis, profile, references, config)
}

/// Run the CLI
pub fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let analyzer = Analyzer::builder()
        .true_peak_oversample(config.true_peak_oversample)
        .build();

    let profile = args
        .benchmark
        .as_ref()
        .map(|path| {
            BenchmarkProfile::load(path)
                .with_context(|| format!("Failed to load benchmark profile: {}", path.display()))
        })
        .transpose()?;

    let references = analyze_references(&analyzer, &args.references)?;
    info!("Loaded {} reference analyses", references.len());

    let files = collect_audio_files(&args.inputs);
    if files.is_empty() {
        bail!("No audio files found");
    }

    let pb = progress_bar(files.len(), args.no_progress || files.len() < 2);
    let results: Vec<(PathBuf, crate::error::Result<MixReport>)> = files
        .par_iter()
        .progress_with(pb)
        .map(|path| {
            let report = analyze_one(path, &analyzer, profile.as_ref(), &references, &config);
            (path.clone(), report)
        })
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    for (path, result) in &results {
        match result {
            Ok(report) => reports.push(FileReport {
                file: path.display().to_string(),
                report,
            }),
            Err(e) => {
                warn!("Analysis failed for {}: {}", path.display(), e);
                eprintln!("{} {}: {}", "✗".red(), path.display(), e);
            }
        }
    }

    let rendered = match args.format {
        OutputFormat::Json => format_json(&reports).context("Failed to serialize report")?,
        OutputFormat::Text => reports
            .iter()
            .map(|r| format_report(&r.file, r.report, args.verbose))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write report: {}", path.display()))?,
        None => println!("{}", rendered),
    }

    if reports.len() < results.len() {
        bail!("{} of {} files failed to analyze", results.len() - reports.len(), results.len());
    }
    Ok(())
}
