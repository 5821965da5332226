// Export modules for library usage
pub mod aggregation;
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, ConfigFileMetrics, ConnectorUsage, CustomCodeMetrics, DataweaveMetrics,
    Metadata, ProjectAnalysis, RiskLevel, Summary, TestingMetrics,
};

pub use crate::aggregation::summarize;
pub use crate::analyzers::analyze_project;
pub use crate::analyzers::namespace::NamespaceMap;
pub use crate::config::{MulemapConfig, ScoringConfig};
pub use crate::errors::MulemapError;
pub use crate::io::walker::{DiscoveredProject, ProjectWalker};
pub use crate::scoring::{complexity_score, risk_level};
