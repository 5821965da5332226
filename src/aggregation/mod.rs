//! Cross-project aggregation.
//!
//! Everything here is a multiset merge: commutative and associative, so a
//! permuted project list produces the identical summary.

use crate::core::{ProjectAnalysis, Summary};

pub fn summarize(projects: &[ProjectAnalysis]) -> Summary {
    let mut summary = Summary {
        total_projects: projects.len(),
        ..Summary::default()
    };

    for project in projects {
        if project.mule_version.starts_with("4.") {
            summary.mule_4_projects += 1;
        } else if project.mule_version.starts_with("3.") {
            summary.mule_3_projects += 1;
        } else {
            summary.unknown_version_projects += 1;
        }

        summary.total_flows += project.flows.total_flows;
        summary.total_subflows += project.flows.total_subflows;
        summary.total_components += project.connectors.total_components;
        summary.total_java_files += project.custom_code.java_files_count;
        summary.total_dwl_files += project.dataweave.dwl_files_count;
        summary.total_munit_tests += project.testing.munit_test_files;
        summary.total_complexity_score += project.complexity_score;

        for (connector, count) in &project.connectors.usage_count {
            *summary
                .connector_usage_summary
                .entry(connector.clone())
                .or_insert(0) += count;
        }
        for (component_type, count) in &project.connectors.component_types {
            *summary
                .component_types_summary
                .entry(component_type.clone())
                .or_insert(0) += count;
        }
    }

    summary
}
