//! JSON report output.
//!
//! Two shapes are produced depending on the run mode: a single consolidated
//! document carrying every project in full, or a slim run overview with a
//! per-project index while the full detail goes into one JSON file per
//! project. The slim shape keeps the main document reviewable for
//! engagements with hundreds of projects.

use crate::core::{AnalysisReport, Metadata, ProjectAnalysis, Summary};
use crate::io::output::ReportWriter;
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Full detail for one project, written in individual-files mode.
    pub fn write_project(&mut self, metadata: &Metadata, project: &ProjectAnalysis) -> anyhow::Result<()> {
        let report = IndividualProjectReport { metadata, project };
        let json = serde_json::to_string_pretty(&report)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Run overview with a brief per-project index, written in
    /// individual-files mode instead of the consolidated report.
    pub fn write_overview(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let overview = RunOverview {
            metadata: &report.metadata,
            summary: &report.summary,
            project_list: report.projects.iter().map(ProjectListEntry::from).collect(),
        };
        let json = serde_json::to_string_pretty(&overview)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[derive(Serialize)]
struct IndividualProjectReport<'a> {
    metadata: &'a Metadata,
    project: &'a ProjectAnalysis,
}

#[derive(Serialize)]
struct RunOverview<'a> {
    metadata: &'a Metadata,
    summary: &'a Summary,
    project_list: Vec<ProjectListEntry<'a>>,
}

#[derive(Serialize)]
struct ProjectListEntry<'a> {
    project_name: &'a str,
    project_display_name: &'a str,
    project_source: &'a str,
    mule_version: &'a str,
    is_legacy: bool,
    flows: usize,
    components: usize,
    complexity_score: f64,
    java_files: usize,
    munit_tests: usize,
}

impl<'a> From<&'a ProjectAnalysis> for ProjectListEntry<'a> {
    fn from(project: &'a ProjectAnalysis) -> Self {
        Self {
            project_name: &project.name,
            project_display_name: &project.display_name,
            project_source: &project.source,
            mule_version: &project.mule_version,
            is_legacy: project.is_legacy,
            flows: project.flows.total_flows,
            components: project.connectors.total_components,
            complexity_score: project.complexity_score,
            java_files: project.custom_code.java_files_count,
            munit_tests: project.testing.munit_test_files,
        }
    }
}
