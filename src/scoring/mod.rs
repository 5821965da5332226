//! Migration complexity scoring.
//!
//! The score is a pure weighted sum over a project's accumulated counts:
//! recomputing it from identical inputs always yields the identical value.
//! Connector weights and risk band thresholds come from the injectable
//! [`ScoringConfig`]; the structural multipliers below are part of the
//! assessment methodology itself.

use crate::config::ScoringConfig;
use crate::core::{ProjectAnalysis, RiskLevel};

const FLOW_WEIGHT: f64 = 2.0;
const SUBFLOW_WEIGHT: f64 = 1.0;
const COMPONENT_WEIGHT: f64 = 0.1;
const JAVA_FILE_WEIGHT: f64 = 5.0;
const CUSTOM_CODE_LINE_WEIGHT: f64 = 0.01;
const DWL_FILE_WEIGHT: f64 = 3.0;
const COMPLEX_TRANSFORMATION_WEIGHT: f64 = 5.0;
const LARGE_FILE_WEIGHT: f64 = 10.0;

/// Compute a project's complexity score, rounded to two decimal places.
pub fn complexity_score(project: &ProjectAnalysis, scoring: &ScoringConfig) -> f64 {
    let mut score = 0.0;

    for (connector, count) in &project.connectors.usage_count {
        score += scoring.connector_weight(connector) * *count as f64;
    }

    score += project.flows.total_flows as f64 * FLOW_WEIGHT;
    score += project.flows.total_subflows as f64 * SUBFLOW_WEIGHT;
    score += project.connectors.total_components as f64 * COMPONENT_WEIGHT;

    score += project.custom_code.java_files_count as f64 * JAVA_FILE_WEIGHT;
    score += project.custom_code.total_custom_code_lines as f64 * CUSTOM_CODE_LINE_WEIGHT;

    score += project.dataweave.dwl_files_count as f64 * DWL_FILE_WEIGHT;
    score += project.dataweave.complex_transformations as f64 * COMPLEX_TRANSFORMATION_WEIGHT;

    score += project.indicators.large_files.len() as f64 * LARGE_FILE_WEIGHT;

    round2(score)
}

/// Display-only risk band for a score.
pub fn risk_level(score: f64, scoring: &ScoringConfig) -> RiskLevel {
    if score > scoring.high_risk_threshold {
        RiskLevel::High
    } else if score > scoring.medium_risk_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Migration risk of a single connector, judged by its weight. Used in the
/// human-readable connector summary.
pub fn connector_risk(weight: f64) -> RiskLevel {
    if weight >= 4.0 {
        RiskLevel::High
    } else if weight >= 3.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LargeFile;
    use std::path::PathBuf;

    fn empty_project() -> ProjectAnalysis {
        ProjectAnalysis {
            name: "p".to_string(),
            path: PathBuf::from("/repos/p"),
            display_name: "p".to_string(),
            source: "local".to_string(),
            depth: 1,
            mule_version: "unknown".to_string(),
            is_legacy: false,
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
        }
    }

    #[test]
    fn empty_project_scores_zero() {
        let project = empty_project();
        assert_eq!(complexity_score(&project, &ScoringConfig::default()), 0.0);
    }

    #[test]
    fn connector_usage_is_weighted_per_connector() {
        let mut project = empty_project();
        project
            .connectors
            .usage_count
            .insert("sap".to_string(), 2); // 5 each
        project
            .connectors
            .usage_count
            .insert("http".to_string(), 3); // 1 each
        project
            .connectors
            .usage_count
            .insert("anypoint-mq".to_string(), 1); // default 2

        let score = complexity_score(&project, &ScoringConfig::default());
        assert_eq!(score, 15.0);
    }

    #[test]
    fn structural_terms_sum_as_specified() {
        let mut project = empty_project();
        project.flows.total_flows = 3; // 6.0
        project.flows.total_subflows = 2; // 2.0
        project.connectors.total_components = 40; // 4.0
        project.custom_code.java_files_count = 3; // 15.0
        project.custom_code.total_custom_code_lines = 200; // 2.0
        project.dataweave.dwl_files_count = 2; // 6.0
        project.dataweave.complex_transformations = 1; // 5.0
        project.indicators.large_files.push(LargeFile {
            filename: "big.xml".to_string(),
            lines: 1200,
        }); // 10.0

        let score = complexity_score(&project, &ScoringConfig::default());
        assert_eq!(score, 50.0);
    }

    #[test]
    fn score_is_deterministic() {
        let mut project = empty_project();
        project.connectors.usage_count.insert("db".to_string(), 7);
        project.connectors.total_components = 33;

        let config = ScoringConfig::default();
        let first = complexity_score(&project, &config);
        let second = complexity_score(&project, &config);
        assert_eq!(first, second);
        assert_eq!(first, 17.3);
    }

    #[test]
    fn score_is_rounded_to_two_decimals() {
        let mut project = empty_project();
        project.connectors.total_components = 7; // 0.7000000000000001 unrounded
        assert_eq!(complexity_score(&project, &ScoringConfig::default()), 0.7);
    }

    #[test]
    fn risk_bands_use_configured_thresholds() {
        let config = ScoringConfig::default();
        assert_eq!(risk_level(100.0, &config), RiskLevel::Low);
        assert_eq!(risk_level(500.0, &config), RiskLevel::Low);
        assert_eq!(risk_level(500.01, &config), RiskLevel::Medium);
        assert_eq!(risk_level(1000.0, &config), RiskLevel::Medium);
        assert_eq!(risk_level(1000.01, &config), RiskLevel::High);
    }

    #[test]
    fn connector_risk_follows_weight() {
        assert_eq!(connector_risk(5.0), RiskLevel::High);
        assert_eq!(connector_risk(3.0), RiskLevel::Medium);
        assert_eq!(connector_risk(1.0), RiskLevel::Low);
    }
}
