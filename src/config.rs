//! Configuration loaded from `.mulemap.toml`.
//!
//! The connector weight table and the risk band thresholds are configuration
//! data, not behavior: they ship with defaults matching the assessment
//! methodology but can be overridden per engagement without touching the
//! scorer. `mulemap init` writes the full default table so the starting
//! point is visible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

pub const CONFIG_FILE_NAME: &str = ".mulemap.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MulemapConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Project discovery bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Maximum directory depth searched for project roots.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Glob patterns for directories excluded from discovery.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            ignore_patterns: Vec::new(),
        }
    }
}

/// Weights and thresholds feeding the complexity scorer and risk bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-connector migration weight; connectors not listed here fall back
    /// to [`ScoringConfig::default_connector_weight`].
    #[serde(default = "default_connector_weights")]
    pub connector_weights: BTreeMap<String, f64>,

    #[serde(default = "default_connector_weight")]
    pub default_connector_weight: f64,

    /// A configuration file above this line count is flagged as large.
    #[serde(default = "default_large_file_lines")]
    pub large_file_lines: usize,

    /// An inline expression spanning more than this many lines counts as a
    /// complex transformation.
    #[serde(default = "default_complex_expression_lines")]
    pub complex_expression_lines: usize,

    /// A `.dwl` file above this line count counts as a complex
    /// transformation.
    #[serde(default = "default_complex_dwl_lines")]
    pub complex_dwl_lines: usize,

    /// Score above which a project is banded high risk.
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: f64,

    /// Score above which a project is banded medium risk.
    #[serde(default = "default_medium_risk_threshold")]
    pub medium_risk_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            connector_weights: default_connector_weights(),
            default_connector_weight: default_connector_weight(),
            large_file_lines: default_large_file_lines(),
            complex_expression_lines: default_complex_expression_lines(),
            complex_dwl_lines: default_complex_dwl_lines(),
            high_risk_threshold: default_high_risk_threshold(),
            medium_risk_threshold: default_medium_risk_threshold(),
        }
    }
}

impl ScoringConfig {
    /// Weight for one connector, falling back to the default weight for
    /// connectors outside the table.
    pub fn connector_weight(&self, connector: &str) -> f64 {
        self.connector_weights
            .get(connector)
            .copied()
            .unwrap_or(self.default_connector_weight)
    }
}

fn default_max_depth() -> usize {
    4
}

fn default_connector_weight() -> f64 {
    2.0
}

fn default_large_file_lines() -> usize {
    1000
}

fn default_complex_expression_lines() -> usize {
    10
}

fn default_complex_dwl_lines() -> usize {
    100
}

fn default_high_risk_threshold() -> f64 {
    1000.0
}

fn default_medium_risk_threshold() -> f64 {
    500.0
}

fn default_connector_weights() -> BTreeMap<String, f64> {
    [
        ("http", 1.0),
        ("db", 2.0),
        ("file", 1.0),
        ("ftp", 2.0),
        ("sftp", 2.0),
        ("jms", 3.0),
        ("vm", 1.0),
        ("sap", 5.0),
        ("salesforce", 4.0),
        ("servicenow", 4.0),
        ("aws-s3", 3.0),
        ("aws-sqs", 3.0),
        ("email", 2.0),
        ("compression", 1.0),
        ("crypto", 2.0),
        ("validation", 1.0),
        ("json", 1.0),
        ("xml", 2.0),
        ("apikit", 2.0),
        ("oauth", 3.0),
        ("spring", 2.0),
        ("scripting", 3.0),
        ("java", 4.0),
    ]
    .into_iter()
    .map(|(name, weight)| (name.to_string(), weight))
    .collect()
}

static CONFIG: OnceLock<MulemapConfig> = OnceLock::new();

/// Process-wide configuration, loaded from `.mulemap.toml` in the current
/// directory on first use.
pub fn get_config() -> &'static MulemapConfig {
    CONFIG.get_or_init(|| load_config(Path::new(CONFIG_FILE_NAME)))
}

/// Load configuration from the given path, falling back to defaults when the
/// file is absent or malformed (a malformed file is worth a warning, not a
/// dead run).
pub fn load_config(path: &Path) -> MulemapConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse {}: {}. Using default configuration.",
                    path.display(),
                    e
                );
                MulemapConfig::default()
            }
        },
        Err(_) => MulemapConfig::default(),
    }
}

/// Serialized default configuration, written by `mulemap init`.
pub fn default_config_toml() -> String {
    toml::to_string_pretty(&MulemapConfig::default())
        .expect("default configuration always serializes")
}
