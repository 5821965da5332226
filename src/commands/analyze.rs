//! The `analyze` command: discovery, per-project analysis, aggregation,
//! report generation.

use crate::aggregation;
use crate::analyzers::analyze_project;
use crate::config::MulemapConfig;
use crate::core::{AnalysisReport, Metadata, RiskLevel};
use crate::io::output::write_reports;
use crate::io::walker::ProjectWalker;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    /// Folder containing the MuleSoft repositories.
    pub path: PathBuf,
    /// Restrict the run to these project names.
    pub projects: Option<Vec<String>>,
    pub output_dir: PathBuf,
    pub individual_files: bool,
    /// Override for the configured discovery depth.
    pub max_depth: Option<usize>,
}

pub fn handle_analyze(analyze: AnalyzeConfig, config: &MulemapConfig) -> Result<()> {
    match &analyze.projects {
        Some(targets) => log::info!(
            "Analyzing specific projects in {}: {}",
            analyze.path.display(),
            targets.join(", ")
        ),
        None => log::info!("Analyzing repositories in: {}", analyze.path.display()),
    }

    let walker = ProjectWalker::new(analyze.path.clone())
        .with_max_depth(analyze.max_depth.unwrap_or(config.discovery.max_depth))
        .with_targets(analyze.projects.clone())
        .with_ignore_patterns(config.discovery.ignore_patterns.clone());
    let discovered = walker.walk()?;

    let mut projects = Vec::with_capacity(discovered.len());
    for project_root in &discovered {
        log::info!("Analyzing project: {}", project_root.display_name);
        projects.push(analyze_project(project_root, config));
    }

    let report = AnalysisReport {
        metadata: Metadata::now(),
        summary: aggregation::summarize(&projects),
        projects,
    };

    let written = write_reports(
        &report,
        &analyze.output_dir,
        analyze.individual_files,
        &config.scoring,
    )?;

    print_completion(&report, &written, &analyze.output_dir);
    Ok(())
}

fn print_completion(report: &AnalysisReport, written: &[PathBuf], output_dir: &PathBuf) {
    println!(
        "{}",
        format!(
            "MuleSoft Migration Assessment complete! All reports generated in: {}/",
            output_dir.display()
        )
        .green()
        .bold()
    );
    for path in written {
        println!("  - {}", path.display());
    }

    let high_risk = report
        .projects
        .iter()
        .filter(|p| p.risk == RiskLevel::High)
        .count();
    println!();
    println!(
        "Projects analyzed: {}  (Mule 4.x: {}, Mule 3.x: {}, unknown: {})",
        report.summary.total_projects,
        report.summary.mule_4_projects,
        report.summary.mule_3_projects.to_string().yellow(),
        report.summary.unknown_version_projects
    );
    if high_risk > 0 {
        println!(
            "{}",
            format!("High risk projects: {high_risk}").red().bold()
        );
    }
    println!(
        "\nReady for sharing: zip the '{}' folder and email to stakeholders.",
        output_dir.display()
    );
}
