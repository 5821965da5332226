//! Project analysis pipeline.
//!
//! One call to [`analyze_project`] takes a discovered project root through
//! every extraction pass: build-descriptor version, configuration files
//! (namespace resolution, element tally, connector attribution, expression
//! scan), custom code, tests, shared resources, and finally the complexity
//! score. Configuration files are processed one at a time; a file that
//! fails to read or parse degrades to a warning and a zero/partial entry
//! without touching the rest of the project.

pub mod connectors;
pub mod custom_code;
pub mod dataweave;
pub mod elements;
pub mod namespace;
pub mod resources;
pub mod testing;
pub mod version;

use crate::config::{MulemapConfig, ScoringConfig};
use crate::core::{ConfigFileMetrics, LargeFile, ProjectAnalysis, RiskLevel};
use crate::errors::MulemapError;
use crate::io::walker::{count_lines, find_files_by_extension, DiscoveredProject};
use crate::scoring;
use roxmltree::Document;
use std::path::Path;

/// Analyze one discovered project end to end.
pub fn analyze_project(discovered: &DiscoveredProject, config: &MulemapConfig) -> ProjectAnalysis {
    let mule_version = version::detect_mule_version(&discovered.path);
    let mut project = ProjectAnalysis {
        name: discovered.name.clone(),
        path: discovered.path.clone(),
        display_name: discovered.display_name.clone(),
        source: discovered.source.clone(),
        depth: discovered.depth,
        is_legacy: version::is_legacy(&mule_version),
        mule_version,
        configuration: Default::default(),
        flows: Default::default(),
        connectors: Default::default(),
        dataweave: Default::default(),
        custom_code: Default::default(),
        testing: Default::default(),
        shared_resources: Default::default(),
        indicators: Default::default(),
        complexity_score: 0.0,
        risk: RiskLevel::Low,
    };

    analyze_configuration_files(&mut project, &config.scoring);

    project.custom_code = custom_code::analyze_custom_code(&project.path);
    dataweave::scan_dwl_files(
        &project.path,
        config.scoring.complex_dwl_lines,
        &mut project.dataweave,
    );
    project.testing = testing::analyze_tests(&project.path);
    project.shared_resources =
        resources::analyze_shared_resources(&project.name, &project.path);

    project.complexity_score = scoring::complexity_score(&project, &config.scoring);
    project.risk = scoring::risk_level(project.complexity_score, &config.scoring);
    project
}

fn analyze_configuration_files(project: &mut ProjectAnalysis, scoring: &ScoringConfig) {
    let mule_dir = project.path.join("src").join("main").join("mule");
    if !mule_dir.is_dir() {
        // Not an error: some projects carry only a manifest or custom code.
        return;
    }

    let xml_files = find_files_by_extension(&mule_dir, &["xml"]);
    project.configuration.count = xml_files.len();

    for xml_file in xml_files {
        let metrics = analyze_configuration_file(&xml_file, project, scoring);
        project.configuration.files.push(metrics);
    }
}

fn analyze_configuration_file(
    path: &Path,
    project: &mut ProjectAnalysis,
    scoring: &ScoringConfig,
) -> ConfigFileMetrics {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut metrics = ConfigFileMetrics {
        filename: filename.clone(),
        relative_path: path.strip_prefix(&project.path).unwrap_or(path).to_path_buf(),
        ..Default::default()
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Skipping configuration file: {}", MulemapError::io(path, e));
            return metrics;
        }
    };
    metrics.line_count = count_lines(&content);

    if metrics.line_count > scoring.large_file_lines {
        project.indicators.large_files.push(LargeFile {
            filename: filename.clone(),
            lines: metrics.line_count,
        });
    }

    // The expression scan is lexical and runs even when the document is
    // malformed XML.
    let expressions = dataweave::scan_expressions(&content, scoring.complex_expression_lines);
    project.dataweave.inline_expressions_count += expressions.expressions;
    project.dataweave.complex_transformations += expressions.complex_transformations;
    project.dataweave.total_dw_lines += expressions.total_lines;

    let doc = match Document::parse(&content) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("{}", MulemapError::parse(path, e.to_string()));
            return metrics;
        }
    };

    // The prefix map is scoped to this one document; prefixes are not
    // consistent across files.
    let namespaces = namespace::NamespaceMap::resolve(&doc);

    let tally = elements::tally_elements(&doc, &namespaces);
    metrics.flows = tally.flows;
    metrics.subflows = tally.subflows;
    metrics.components = tally.components;
    metrics.tags_by_namespace = tally.tags_by_namespace;

    project.flows.total_flows += metrics.flows;
    project.flows.total_subflows += metrics.subflows;
    project
        .flows
        .flows_per_file
        .insert(filename, metrics.flows);
    project.connectors.total_components += metrics.components;

    let attribution = connectors::attribute_components(&doc, &namespaces);
    for (connector, count) in attribution.connector_usage {
        *project.connectors.usage_count.entry(connector).or_insert(0) += count;
    }
    for (component_type, count) in attribution.component_types {
        *project
            .connectors
            .component_types
            .entry(component_type)
            .or_insert(0) += count;
    }

    // Declaring a connector marks it as used even when attribution finds no
    // element for it.
    project
        .connectors
        .unique_connectors
        .extend(namespaces.declared_connectors().map(String::from));

    metrics
}
