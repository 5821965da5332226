//! Custom code inventory: Java classes and Groovy scripts.
//!
//! Custom code is the strongest manual-rework signal in a migration, so the
//! inventory keeps per-class line counts, not just totals.

use crate::core::{CustomCodeMetrics, JavaClass};
use crate::io::walker::{count_lines, find_files_by_extension};
use std::path::Path;

pub fn analyze_custom_code(project_root: &Path) -> CustomCodeMetrics {
    let mut metrics = CustomCodeMetrics::default();

    let java_root = project_root.join("src").join("main").join("java");
    let java_files = find_files_by_extension(&java_root, &["java"]);
    metrics.java_files_count = java_files.len();

    for java_file in &java_files {
        let content = match std::fs::read_to_string(java_file) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Could not read Java file {}: {}", java_file.display(), e);
                continue;
            }
        };
        let lines = count_lines(&content);
        metrics.total_custom_code_lines += lines;

        let class_name = java_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_path = java_file
            .strip_prefix(project_root)
            .unwrap_or(java_file)
            .to_path_buf();
        metrics.java_classes.push(JavaClass {
            class_name,
            file_path,
            lines,
        });
    }

    let main_root = project_root.join("src").join("main");
    metrics.groovy_scripts_count = find_files_by_extension(&main_root, &["groovy"]).len();

    metrics
}
