//! Core data model for the migration assessment.
//!
//! Everything here is plain serializable data: one [`ProjectAnalysis`] per
//! discovered project, folded into an [`AnalysisReport`] for the whole run.
//! Maps and sets use the ordered `BTree` variants so that serialized reports
//! and aggregate tables come out identical across runs regardless of
//! filesystem iteration order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Nested element tally: `namespace_key -> local_name -> occurrence_count`.
pub type TagTally = BTreeMap<String, BTreeMap<String, usize>>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: Metadata,
    pub summary: Summary,
    pub projects: Vec<ProjectAnalysis>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metadata {
    pub analysis_date: DateTime<Utc>,
    pub analyzer_version: String,
}

impl Metadata {
    pub fn now() -> Self {
        Self {
            analysis_date: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Analysis results for a single discovered project. Built once during the
/// project's analysis pass and immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    /// Directory name of the project root.
    pub name: String,
    /// Absolute path to the project root.
    pub path: PathBuf,
    /// Name shown in reports: the bare directory name for top-level
    /// projects, the full relative path for nested ones.
    pub display_name: String,
    /// Parent grouping inside the repository folder, or `"local"` for
    /// top-level projects.
    pub source: String,
    /// Depth below the repository folder at which the project was found.
    pub depth: usize,
    pub mule_version: String,
    pub is_legacy: bool,
    pub configuration: ConfigurationSet,
    pub flows: FlowTotals,
    pub connectors: ConnectorUsage,
    pub dataweave: DataweaveMetrics,
    pub custom_code: CustomCodeMetrics,
    pub testing: TestingMetrics,
    pub shared_resources: SharedResources,
    pub indicators: ComplexityIndicators,
    pub complexity_score: f64,
    pub risk: RiskLevel,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigurationSet {
    pub count: usize,
    pub files: Vec<ConfigFileMetrics>,
}

/// Per-file metrics for one Mule configuration document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigFileMetrics {
    pub filename: String,
    pub relative_path: PathBuf,
    pub line_count: usize,
    pub flows: usize,
    pub subflows: usize,
    /// Element count excluding the document root.
    pub components: usize,
    pub tags_by_namespace: TagTally,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlowTotals {
    pub total_flows: usize,
    pub total_subflows: usize,
    pub flows_per_file: BTreeMap<String, usize>,
}

/// Connector usage accumulated across a project's configuration files.
///
/// `unique_connectors` is fed from namespace declarations while
/// `usage_count` is fed from element attribution, so a connector declared in
/// a file but never used still appears in the set. That asymmetry is
/// inherited source behavior: a declaration is a stronger migration signal
/// than an exact usage count.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConnectorUsage {
    pub unique_connectors: BTreeSet<String>,
    pub usage_count: BTreeMap<String, usize>,
    /// Breakdown keyed `"connector:localName"`, or the bare local name for
    /// the platform's built-in vocabulary.
    pub component_types: BTreeMap<String, usize>,
    pub total_components: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataweaveMetrics {
    pub dwl_files_count: usize,
    pub inline_expressions_count: usize,
    pub complex_transformations: usize,
    pub total_dw_lines: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CustomCodeMetrics {
    pub java_files_count: usize,
    pub java_classes: Vec<JavaClass>,
    pub groovy_scripts_count: usize,
    pub total_custom_code_lines: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JavaClass {
    pub class_name: String,
    pub file_path: PathBuf,
    pub lines: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TestingMetrics {
    pub munit_test_files: usize,
    pub munit_test_cases: usize,
    pub other_test_files: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SharedResources {
    pub domain_project: bool,
    pub common_configurations: Vec<ResourceFile>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceFile {
    pub filename: String,
    pub kind: String,
    pub path: PathBuf,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ComplexityIndicators {
    pub large_files: Vec<LargeFile>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LargeFile {
    pub filename: String,
    pub lines: usize,
}

/// Display-only migration risk band derived from the complexity score.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        write!(f, "{label}")
    }
}

/// Cross-project roll-up. All fields are order-independent folds over the
/// project list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_projects: usize,
    pub mule_4_projects: usize,
    pub mule_3_projects: usize,
    pub unknown_version_projects: usize,
    pub total_flows: usize,
    pub total_subflows: usize,
    pub total_components: usize,
    pub total_java_files: usize,
    pub total_dwl_files: usize,
    pub total_munit_tests: usize,
    pub total_complexity_score: f64,
    pub connector_usage_summary: BTreeMap<String, usize>,
    pub component_types_summary: BTreeMap<String, usize>,
}
