//! Human-readable summary report.

use crate::config::ScoringConfig;
use crate::core::AnalysisReport;
use crate::io::output::ReportWriter;
use crate::scoring::connector_risk;
use std::io::Write;

pub struct SummaryWriter<W: Write> {
    writer: W,
    scoring: ScoringConfig,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(writer: W, scoring: ScoringConfig) -> Self {
        Self { writer, scoring }
    }
}

impl<W: Write> ReportWriter for SummaryWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_statistics(report)?;
        self.write_connector_usage(report)?;
        self.write_top_component_types(report)?;
        self.write_project_breakdown(report)?;
        Ok(())
    }
}

impl<W: Write> SummaryWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "MULESOFT MIGRATION ASSESSMENT - SUMMARY")?;
        writeln!(self.writer, "{}", "=".repeat(39))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "SUMMARY")?;
        writeln!(self.writer, "{}", "-".repeat(7))?;
        writeln!(
            self.writer,
            "Analysis Date: {}",
            report.metadata.analysis_date.to_rfc3339()
        )?;
        writeln!(
            self.writer,
            "Total Projects Analyzed: {}",
            summary.total_projects
        )?;
        writeln!(self.writer, "Mule 4.x Projects: {}", summary.mule_4_projects)?;
        writeln!(
            self.writer,
            "Mule 3.x Projects (Legacy): {}",
            summary.mule_3_projects
        )?;
        writeln!(
            self.writer,
            "Unknown Version Projects: {}",
            summary.unknown_version_projects
        )?;
        writeln!(self.writer)?;

        if summary.mule_3_projects > 0 {
            writeln!(
                self.writer,
                "WARNING: Mule 3.x projects found! These require full migration as Mule 3 reached end-of-life in 2021."
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_statistics(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "CODEBASE STATISTICS")?;
        writeln!(self.writer, "{}", "-".repeat(19))?;
        writeln!(self.writer, "Total Flows: {}", summary.total_flows)?;
        writeln!(self.writer, "Total Subflows: {}", summary.total_subflows)?;
        writeln!(self.writer, "Total Components: {}", summary.total_components)?;
        writeln!(self.writer, "Custom Java Files: {}", summary.total_java_files)?;
        writeln!(self.writer, "DataWeave Files: {}", summary.total_dwl_files)?;
        writeln!(self.writer, "MUnit Test Files: {}", summary.total_munit_tests)?;
        writeln!(
            self.writer,
            "Overall Complexity Score: {:.2}",
            summary.total_complexity_score
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_connector_usage(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "CONNECTOR USAGE SUMMARY")?;
        writeln!(self.writer, "{}", "-".repeat(23))?;

        let mut connectors: Vec<(&String, &usize)> =
            report.summary.connector_usage_summary.iter().collect();
        connectors.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (connector, count) in connectors {
            let weight = self.scoring.connector_weight(connector);
            writeln!(
                self.writer,
                "{connector}: {count} usages (Migration Risk: {})",
                connector_risk(weight)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_top_component_types(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "TOP COMPONENT TYPES (by usage)")?;
        writeln!(self.writer, "{}", "-".repeat(29))?;

        let mut component_types: Vec<(&String, &usize)> =
            report.summary.component_types_summary.iter().collect();
        component_types.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (component_type, count) in component_types.into_iter().take(15) {
            writeln!(self.writer, "{component_type}: {count} usages")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_project_breakdown(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "PROJECT BREAKDOWN")?;
        writeln!(self.writer, "{}", "-".repeat(17))?;

        for project in &report.projects {
            writeln!(self.writer)?;
            writeln!(self.writer, "Project: {}", project.display_name)?;
            if project.source != "local" {
                writeln!(self.writer, "  Source: {}", project.source)?;
            }
            writeln!(self.writer, "  Mule Version: {}", project.mule_version)?;
            writeln!(self.writer, "  Flows: {}", project.flows.total_flows)?;
            writeln!(
                self.writer,
                "  Components: {}",
                project.connectors.total_components
            )?;
            writeln!(
                self.writer,
                "  Complexity Score: {:.1}",
                project.complexity_score
            )?;
            writeln!(
                self.writer,
                "  Custom Code: {} Java files",
                project.custom_code.java_files_count
            )?;
            writeln!(
                self.writer,
                "  Tests: {} MUnit files",
                project.testing.munit_test_files
            )?;

            if !project.indicators.large_files.is_empty() {
                writeln!(
                    self.writer,
                    "  Large files: {}",
                    project.indicators.large_files.len()
                )?;
            }

            let mut top_components: Vec<(&String, &usize)> =
                project.connectors.component_types.iter().collect();
            top_components.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            if !top_components.is_empty() {
                let rendered: Vec<String> = top_components
                    .into_iter()
                    .take(3)
                    .map(|(component, count)| format!("{component}({count})"))
                    .collect();
                writeln!(self.writer, "  Top components: {}", rendered.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::summarize;
    use crate::core::{Metadata, ProjectAnalysis, RiskLevel};
    use std::path::PathBuf;

    fn report_with_connectors() -> AnalysisReport {
        let mut project = ProjectAnalysis {
            name: "billing".to_string(),
            path: PathBuf::from("/repos/billing"),
            display_name: "billing".to_string(),
            source: "local".to_string(),
            depth: 1,
            mule_version: "4.4.0".to_string(),
            is_legacy: false,
            configuration: Default::default(),
            flows: Default::default(),
            connectors: Default::default(),
            dataweave: Default::default(),
            custom_code: Default::default(),
            testing: Default::default(),
            shared_resources: Default::default(),
            indicators: Default::default(),
            complexity_score: 31.0,
            risk: RiskLevel::Low,
        };
        project.connectors.usage_count.insert("sap".to_string(), 4);
        project.connectors.usage_count.insert("http".to_string(), 9);
        project
            .connectors
            .component_types
            .insert("sap:invoke".to_string(), 4);

        let projects = vec![project];
        AnalysisReport {
            metadata: Metadata::now(),
            summary: summarize(&projects),
            projects,
        }
    }

    fn render(report: &AnalysisReport) -> String {
        let mut buffer = Vec::new();
        SummaryWriter::new(&mut buffer, ScoringConfig::default())
            .write_report(report)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn connectors_are_sorted_by_usage_with_risk_labels() {
        let text = render(&report_with_connectors());
        let http_pos = text.find("http: 9 usages (Migration Risk: LOW)").unwrap();
        let sap_pos = text.find("sap: 4 usages (Migration Risk: HIGH)").unwrap();
        assert!(http_pos < sap_pos);
    }

    #[test]
    fn breakdown_lists_each_project() {
        let text = render(&report_with_connectors());
        assert!(text.contains("Project: billing"));
        assert!(text.contains("Complexity Score: 31.0"));
        assert!(text.contains("Top components: sap:invoke(4)"));
    }

    #[test]
    fn no_legacy_warning_for_modern_estates() {
        let text = render(&report_with_connectors());
        assert!(!text.contains("WARNING: Mule 3.x"));
    }
}
