//! Report output dispatch.
//!
//! Every run produces a JSON document plus two text reports in the output
//! directory; individual-files mode swaps the consolidated JSON for a slim
//! overview and one JSON file per project.

use crate::config::ScoringConfig;
use crate::core::AnalysisReport;
use crate::io::writers::{ComprehensiveWriter, JsonWriter, SummaryWriter};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const ANALYSIS_FILE: &str = "mulemap_analysis.json";
pub const COMPREHENSIVE_FILE: &str = "mulemap_comprehensive.txt";
pub const SUMMARY_FILE: &str = "mulemap_summary.txt";

pub trait ReportWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<()>;
}

/// Write the full report set into `output_dir`, returning the paths
/// written.
pub fn write_reports(
    report: &AnalysisReport,
    output_dir: &Path,
    individual_files: bool,
    scoring: &ScoringConfig,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("could not create output directory {}", output_dir.display()))?;

    let mut written = Vec::new();

    let analysis_path = output_dir.join(ANALYSIS_FILE);
    {
        let mut json = JsonWriter::new(create(&analysis_path)?);
        if individual_files {
            json.write_overview(report)?;
        } else {
            json.write_report(report)?;
        }
    }
    written.push(analysis_path);

    if individual_files {
        for project in &report.projects {
            let project_path = output_dir.join(format!("{}_analysis.json", project.name));
            JsonWriter::new(create(&project_path)?)
                .write_project(&report.metadata, project)?;
            written.push(project_path);
        }
    }

    let comprehensive_path = output_dir.join(COMPREHENSIVE_FILE);
    ComprehensiveWriter::new(create(&comprehensive_path)?).write_report(report)?;
    written.push(comprehensive_path);

    let summary_path = output_dir.join(SUMMARY_FILE);
    SummaryWriter::new(create(&summary_path)?, scoring.clone()).write_report(report)?;
    written.push(summary_path);

    Ok(written)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("could not create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Metadata, Summary};
    use tempfile::TempDir;

    fn empty_report() -> AnalysisReport {
        AnalysisReport {
            metadata: Metadata::now(),
            summary: Summary::default(),
            projects: vec![],
        }
    }

    #[test]
    fn consolidated_mode_writes_three_files() {
        let temp = TempDir::new().unwrap();
        let written = write_reports(
            &empty_report(),
            temp.path(),
            false,
            &ScoringConfig::default(),
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        assert!(temp.path().join(ANALYSIS_FILE).is_file());
        assert!(temp.path().join(COMPREHENSIVE_FILE).is_file());
        assert!(temp.path().join(SUMMARY_FILE).is_file());
    }

    #[test]
    fn output_directory_is_created_on_demand() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("reports/2026");
        write_reports(&empty_report(), &nested, false, &ScoringConfig::default()).unwrap();
        assert!(nested.join(ANALYSIS_FILE).is_file());
    }
}
