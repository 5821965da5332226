//! Test coverage inventory: MUnit suites and other test sources.

use crate::core::TestingMetrics;
use crate::io::walker::find_files_by_extension;
use roxmltree::Document;
use std::path::Path;

pub const MUNIT_NAMESPACE: &str = "http://www.mulesoft.org/schema/mule/munit";

pub fn analyze_tests(project_root: &Path) -> TestingMetrics {
    let mut metrics = TestingMetrics::default();

    let munit_root = project_root.join("src").join("test").join("munit");
    let munit_files = find_files_by_extension(&munit_root, &["xml"]);
    metrics.munit_test_files = munit_files.len();

    for munit_file in &munit_files {
        match std::fs::read_to_string(munit_file) {
            Ok(content) => match Document::parse(&content) {
                Ok(doc) => metrics.munit_test_cases += count_test_cases(&doc),
                Err(e) => {
                    log::warn!("Could not parse MUnit file {}: {}", munit_file.display(), e);
                }
            },
            Err(e) => {
                log::warn!("Could not read MUnit file {}: {}", munit_file.display(), e);
            }
        }
    }

    let test_root = project_root.join("src").join("test");
    metrics.other_test_files =
        find_files_by_extension(&test_root, &["java", "groovy", "py"]).len();

    metrics
}

fn count_test_cases(doc: &Document) -> usize {
    doc.descendants()
        .filter(|node| {
            node.is_element()
                && node.tag_name().name() == "test"
                && node.tag_name().namespace() == Some(MUNIT_NAMESPACE)
        })
        .count()
}
