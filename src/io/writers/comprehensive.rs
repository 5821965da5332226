//! Comprehensive text report.
//!
//! The long-form report stakeholders actually read: version distribution,
//! codebase statistics, aggregated tag tables, large files, custom code and
//! DataWeave sections, a per-project index sorted by complexity, and
//! closing recommendations.

use crate::core::{AnalysisReport, ProjectAnalysis};
use crate::io::output::ReportWriter;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

pub struct ComprehensiveWriter<W: Write> {
    writer: W,
}

impl<W: Write> ComprehensiveWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for ComprehensiveWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_version_distribution(report)?;
        self.write_codebase_statistics(report)?;
        self.write_tag_usage(report)?;
        self.write_large_files(report)?;
        self.write_custom_code(report)?;
        self.write_dataweave(report)?;
        self.write_project_index(report)?;
        self.write_recommendations(report)?;
        Ok(())
    }
}

impl<W: Write> ComprehensiveWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        section_title(&mut self.writer, "MULESOFT MIGRATION ASSESSMENT - COMPREHENSIVE", '=')?;
        writeln!(self.writer)?;
        underlined(&mut self.writer, "SUMMARY")?;
        writeln!(
            self.writer,
            "Analysis Date: {}",
            report.metadata.analysis_date.to_rfc3339()
        )?;
        writeln!(
            self.writer,
            "Analyzer Version: {}",
            report.metadata.analyzer_version
        )?;
        writeln!(
            self.writer,
            "Total Projects Analyzed: {}",
            report.projects.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_version_distribution(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        underlined(&mut self.writer, "MULE VERSION DISTRIBUTION")?;
        writeln!(self.writer, "Mule 4.x Projects: {}", summary.mule_4_projects)?;
        writeln!(
            self.writer,
            "Mule 3.x Projects (Legacy): {}",
            summary.mule_3_projects
        )?;
        writeln!(
            self.writer,
            "Unknown/Other Versions: {}",
            summary.unknown_version_projects
        )?;
        writeln!(self.writer)?;

        if summary.mule_3_projects > 0 {
            writeln!(
                self.writer,
                "CRITICAL: {} Mule 3.x projects require full migration!",
                summary.mule_3_projects
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_codebase_statistics(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        underlined(&mut self.writer, "CODEBASE STATISTICS")?;
        writeln!(self.writer, "Total Flows: {}", summary.total_flows)?;
        writeln!(self.writer, "Total Subflows: {}", summary.total_subflows)?;
        writeln!(self.writer, "Total Components: {}", summary.total_components)?;
        writeln!(self.writer, "Custom Java Files: {}", summary.total_java_files)?;
        writeln!(self.writer, "DataWeave Files: {}", summary.total_dwl_files)?;
        writeln!(self.writer, "MUnit Test Files: {}", summary.total_munit_tests)?;
        let average = if report.projects.is_empty() {
            0.0
        } else {
            summary.total_complexity_score / report.projects.len() as f64
        };
        writeln!(self.writer, "Average Complexity per Project: {average:.1}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_tag_usage(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let tables = TagTables::collect(report);

        underlined(&mut self.writer, "XML TAGS USAGE ACROSS ALL PROJECTS")?;
        writeln!(
            self.writer,
            "Used XML Tags (excluding core and mule:ee namespaces):"
        )?;
        for (rank, (tag, count)) in tables.connector_tags_by_usage().iter().enumerate() {
            writeln!(self.writer, "{:2}. {:<30} {:>6} usages", rank + 1, tag, count)?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Core/EE namespace tags (excluded above): {} total usages",
            tables.excluded_total
        )?;
        writeln!(
            self.writer,
            "Total Unique XML Tags Found: {}",
            tables.unique_tags.len()
        )?;
        writeln!(self.writer)?;

        underlined(&mut self.writer, "XML TAGS BY NAMESPACE")?;
        for (namespace, tags) in &tables.by_namespace {
            let total: usize = tags.values().sum();
            writeln!(self.writer)?;
            writeln!(self.writer, "{namespace} ({total} total usages):")?;
            for (tag, count) in sorted_by_usage(tags) {
                writeln!(self.writer, "  {tag:<20} {count:>6}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_large_files(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let mut large_files: Vec<(&str, &str, usize)> = report
            .projects
            .iter()
            .flat_map(|project| {
                project
                    .indicators
                    .large_files
                    .iter()
                    .map(move |f| (project.name.as_str(), f.filename.as_str(), f.lines))
            })
            .collect();
        if large_files.is_empty() {
            return Ok(());
        }
        large_files.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(b.1)));

        underlined(&mut self.writer, "LARGE FILES (>1000 lines)")?;
        writeln!(
            self.writer,
            "Total Large Configuration Files: {}",
            large_files.len()
        )?;
        writeln!(self.writer, "Largest files:")?;
        for (project, filename, lines) in large_files.iter().take(10) {
            writeln!(self.writer, "  {project}/{filename}: {lines} lines")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_custom_code(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.summary.total_java_files == 0 {
            return Ok(());
        }

        let total_lines: usize = report
            .projects
            .iter()
            .map(|p| p.custom_code.total_custom_code_lines)
            .sum();
        let projects_with_java = report
            .projects
            .iter()
            .filter(|p| p.custom_code.java_files_count > 0)
            .count();

        underlined(&mut self.writer, "CUSTOM CODE ANALYSIS")?;
        writeln!(
            self.writer,
            "Projects with Custom Java Code: {projects_with_java}"
        )?;
        writeln!(
            self.writer,
            "Total Java Files: {}",
            report.summary.total_java_files
        )?;
        writeln!(self.writer, "Total Java Lines of Code: {total_lines}")?;
        if projects_with_java > 0 {
            writeln!(
                self.writer,
                "Average Java Lines per Project: {:.0}",
                total_lines as f64 / projects_with_java as f64
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_dataweave(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let inline: usize = report
            .projects
            .iter()
            .map(|p| p.dataweave.inline_expressions_count)
            .sum();
        if report.summary.total_dwl_files == 0 && inline == 0 {
            return Ok(());
        }

        let complex: usize = report
            .projects
            .iter()
            .map(|p| p.dataweave.complex_transformations)
            .sum();
        let lines: usize = report
            .projects
            .iter()
            .map(|p| p.dataweave.total_dw_lines)
            .sum();

        underlined(&mut self.writer, "DATAWEAVE ANALYSIS")?;
        writeln!(
            self.writer,
            "DataWeave (.dwl) Files: {}",
            report.summary.total_dwl_files
        )?;
        writeln!(self.writer, "Inline DataWeave Expressions: {inline}")?;
        writeln!(self.writer, "Complex Transformations: {complex}")?;
        writeln!(self.writer, "Total DataWeave Lines of Code: {lines}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_project_index(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        underlined(&mut self.writer, "INDIVIDUAL PROJECT FILES")?;

        let mut projects: Vec<&ProjectAnalysis> = report.projects.iter().collect();
        projects.sort_by(|a, b| {
            b.complexity_score
                .partial_cmp(&a.complexity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        for project in projects {
            writeln!(self.writer, "- {}_analysis.json", project.name)?;
            if project.source != "local" {
                writeln!(self.writer, "   Source: {}", project.source)?;
            }
            writeln!(self.writer, "   Path: {}", project.display_name)?;
            writeln!(
                self.writer,
                "   Mule: {:<8} Risk: {:<6} Complexity: {:>7.0}",
                project.mule_version,
                project.risk.to_string(),
                project.complexity_score
            )?;
            writeln!(
                self.writer,
                "   Flows: {:<4} Components: {:<6} Java Files: {}",
                project.flows.total_flows,
                project.connectors.total_components,
                project.custom_code.java_files_count
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_recommendations(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        let high_complexity = report
            .projects
            .iter()
            .filter(|p| p.risk == crate::core::RiskLevel::High)
            .count();
        let large_files: usize = report
            .projects
            .iter()
            .map(|p| p.indicators.large_files.len())
            .sum();

        underlined(&mut self.writer, "RECOMMENDATIONS")?;

        if summary.mule_3_projects > 0 {
            writeln!(self.writer, "CRITICAL PRIORITY:")?;
            writeln!(
                self.writer,
                "- {} Mule 3.x projects require complete rewrite (end-of-life)",
                summary.mule_3_projects
            )?;
            writeln!(self.writer)?;
        }
        if high_complexity > 0 {
            writeln!(self.writer, "HIGH PRIORITY:")?;
            writeln!(
                self.writer,
                "- {high_complexity} projects have high complexity (>1000)"
            )?;
            writeln!(
                self.writer,
                "- Consider phased migration approach for these projects"
            )?;
            writeln!(self.writer)?;
        }
        if summary.total_java_files > 0 {
            writeln!(self.writer, "MEDIUM PRIORITY:")?;
            writeln!(
                self.writer,
                "- {} Java files need review and potential rewriting",
                summary.total_java_files
            )?;
            writeln!(
                self.writer,
                "- Assess if custom logic can be replaced with standard connectors"
            )?;
            writeln!(self.writer)?;
        }
        if large_files > 0 {
            writeln!(self.writer, "OPTIMIZATION OPPORTUNITIES:")?;
            writeln!(
                self.writer,
                "- {large_files} large configuration files may benefit from refactoring"
            )?;
            writeln!(
                self.writer,
                "- Consider breaking monolithic flows into smaller, manageable pieces"
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

/// Tag tables aggregated over every configuration file in the run.
struct TagTables {
    /// `prefix:tag` usage outside the core and ee namespaces.
    connector_tags: BTreeMap<String, usize>,
    /// Usage under core/ee namespaces, reported only as a total.
    excluded_total: usize,
    unique_tags: BTreeSet<String>,
    by_namespace: BTreeMap<String, BTreeMap<String, usize>>,
}

impl TagTables {
    fn collect(report: &AnalysisReport) -> Self {
        let mut tables = Self {
            connector_tags: BTreeMap::new(),
            excluded_total: 0,
            unique_tags: BTreeSet::new(),
            by_namespace: BTreeMap::new(),
        };

        for project in &report.projects {
            for file in &project.configuration.files {
                for (namespace, tags) in &file.tags_by_namespace {
                    let namespace_total = tables.by_namespace.entry(namespace.clone()).or_default();
                    let excluded = {
                        let lower = namespace.to_lowercase();
                        lower.contains("core") || lower.contains("ee")
                    };
                    for (tag, count) in tags {
                        tables.unique_tags.insert(tag.clone());
                        *namespace_total.entry(tag.clone()).or_insert(0) += count;
                        if excluded {
                            tables.excluded_total += count;
                        } else {
                            let prefix = namespace
                                .split('(')
                                .next()
                                .unwrap_or(namespace)
                                .trim();
                            let namespaced_tag = if prefix == "default" {
                                tag.clone()
                            } else {
                                format!("{prefix}:{tag}")
                            };
                            *tables.connector_tags.entry(namespaced_tag).or_insert(0) += count;
                        }
                    }
                }
            }
        }

        tables
    }

    fn connector_tags_by_usage(&self) -> Vec<(&String, &usize)> {
        sorted_by_usage(&self.connector_tags)
    }
}

fn sorted_by_usage(tags: &BTreeMap<String, usize>) -> Vec<(&String, &usize)> {
    let mut sorted: Vec<(&String, &usize)> = tags.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}

fn section_title<W: Write>(writer: &mut W, title: &str, rule: char) -> anyhow::Result<()> {
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", rule.to_string().repeat(title.len()))?;
    Ok(())
}

fn underlined<W: Write>(writer: &mut W, title: &str) -> anyhow::Result<()> {
    section_title(writer, title, '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::summarize;
    use crate::core::{AnalysisReport, ConfigFileMetrics, Metadata, RiskLevel};
    use std::path::PathBuf;

    fn sample_report() -> AnalysisReport {
        let mut project = ProjectAnalysis {
            name: "orders-api".to_string(),
            path: PathBuf::from("/repos/orders-api"),
            display_name: "orders-api".to_string(),
            source: "local".to_string(),
            depth: 1,
            mule_version: "3.9.1".to_string(),
            is_legacy: true,
            configuration: Default::default(),
            flows: Default::default(),
            connectors: Default::default(),
            dataweave: Default::default(),
            custom_code: Default::default(),
            testing: Default::default(),
            shared_resources: Default::default(),
            indicators: Default::default(),
            complexity_score: 42.5,
            risk: RiskLevel::Low,
        };
        let mut file = ConfigFileMetrics {
            filename: "orders.xml".to_string(),
            ..Default::default()
        };
        file.tags_by_namespace
            .entry("db (db:)".to_string())
            .or_default()
            .insert("select".to_string(), 3);
        file.tags_by_namespace
            .entry("core (ns:)".to_string())
            .or_default()
            .insert("flow".to_string(), 2);
        project.configuration.files.push(file);

        let projects = vec![project];
        AnalysisReport {
            metadata: Metadata::now(),
            summary: summarize(&projects),
            projects,
        }
    }

    fn render(report: &AnalysisReport) -> String {
        let mut buffer = Vec::new();
        ComprehensiveWriter::new(&mut buffer)
            .write_report(report)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn report_contains_the_expected_sections() {
        let text = render(&sample_report());
        for section in [
            "MULESOFT MIGRATION ASSESSMENT - COMPREHENSIVE",
            "MULE VERSION DISTRIBUTION",
            "CODEBASE STATISTICS",
            "XML TAGS USAGE ACROSS ALL PROJECTS",
            "INDIVIDUAL PROJECT FILES",
            "RECOMMENDATIONS",
        ] {
            assert!(text.contains(section), "missing section: {section}");
        }
    }

    #[test]
    fn core_tags_are_excluded_from_the_usage_table() {
        let text = render(&sample_report());
        assert!(text.contains("db:select"));
        assert!(text.contains("Core/EE namespace tags (excluded above): 2 total usages"));
        // The core flow tag still shows in the by-namespace section.
        assert!(text.contains("core (ns:)"));
    }

    #[test]
    fn legacy_projects_trigger_the_critical_warning() {
        let text = render(&sample_report());
        assert!(text.contains("CRITICAL: 1 Mule 3.x projects require full migration!"));
        assert!(text.contains("CRITICAL PRIORITY:"));
    }

    #[test]
    fn nested_projects_show_their_source() {
        let mut report = sample_report();
        report.projects[0].source = "finance/billing".to_string();
        report.projects[0].display_name = "finance/billing/orders-api".to_string();
        let text = render(&report);
        assert!(text.contains("Source: finance/billing"));
        assert!(text.contains("Path: finance/billing/orders-api"));
    }
}
