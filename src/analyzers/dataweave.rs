//! Lexical DataWeave detection.
//!
//! Inline transformations are found in raw file text, never through the XML
//! parser, so truncated CDATA sections and malformed expressions still get
//! counted. Three patterns run independently and their matches are summed;
//! a CDATA-wrapped expression also matches the bare bracket pattern, and
//! that overlap is kept as a conservative upper bound rather than
//! deduplicated.

use crate::core::DataweaveMetrics;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionScan {
    pub expressions: usize,
    pub complex_transformations: usize,
    pub total_lines: usize,
}

fn inline_expression() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?si)#\[.*?\]").unwrap())
}

fn cdata_expression() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?si)<!\[CDATA\[#\[.*?\]\]\]>").unwrap())
}

fn transform_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?si)output\s+application/\w+").unwrap())
}

/// Scan raw file text for inline DataWeave expressions. A match spanning
/// more than `complex_line_threshold` lines counts as a complex
/// transformation.
pub fn scan_expressions(content: &str, complex_line_threshold: usize) -> ExpressionScan {
    let mut scan = ExpressionScan::default();

    for matched in inline_expression().find_iter(content) {
        record_match(&mut scan, matched.as_str(), complex_line_threshold);
    }
    for matched in cdata_expression().find_iter(content) {
        record_match(&mut scan, matched.as_str(), complex_line_threshold);
    }
    for block in transform_blocks(content) {
        record_match(&mut scan, block, complex_line_threshold);
    }

    scan
}

fn record_match(scan: &mut ExpressionScan, matched: &str, complex_line_threshold: usize) {
    let lines = line_span(matched);
    scan.expressions += 1;
    scan.total_lines += lines;
    if lines > complex_line_threshold {
        scan.complex_transformations += 1;
    }
}

/// Transformation blocks: an `output application/<type>` header, the first
/// `---` body delimiter after it, then everything up to (not including) the
/// nearest `]]>` or `]`. Headers with no delimiter or no terminator are
/// truncated expressions and yield nothing.
fn transform_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();

    for header in transform_header().find_iter(content) {
        let rest = &content[header.start()..];
        let Some(delimiter) = rest.find("---") else {
            continue;
        };
        let body = &rest[delimiter + 3..];
        let end = match (body.find("]]>"), body.find(']')) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let Some(end) = end else { continue };
        blocks.push(&rest[..delimiter + 3 + end]);
    }

    blocks
}

fn line_span(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Count `.dwl` transformation files under the project's resources
/// directory. A file above `complex_line_threshold` lines counts as a
/// complex transformation.
pub fn scan_dwl_files(
    project_root: &Path,
    complex_line_threshold: usize,
    dataweave: &mut DataweaveMetrics,
) {
    let resources = project_root.join("src").join("main").join("resources");
    let dwl_files = crate::io::walker::find_files_by_extension(&resources, &["dwl"]);
    dataweave.dwl_files_count = dwl_files.len();

    for dwl_file in dwl_files {
        match std::fs::read_to_string(&dwl_file) {
            Ok(content) => {
                let lines = crate::io::walker::count_lines(&content);
                dataweave.total_dw_lines += lines;
                if lines > complex_line_threshold {
                    dataweave.complex_transformations += 1;
                }
            }
            Err(e) => {
                log::warn!("Could not read DataWeave file {}: {}", dwl_file.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn counts_simple_bracket_expressions() {
        let scan = scan_expressions("<logger message=\"#[payload.id]\"/>", 10);
        assert_eq!(scan.expressions, 1);
        assert_eq!(scan.total_lines, 1);
        assert_eq!(scan.complex_transformations, 0);
    }

    #[test]
    fn cdata_wrapped_expression_double_counts_by_design() {
        let scan = scan_expressions("<![CDATA[#[payload.total]]]>", 10);
        // Matched once as a bare bracket expression and once as a CDATA
        // wrapper; the overlap is a deliberate upper bound.
        assert_eq!(scan.expressions, 2);
    }

    #[test]
    fn transform_block_ends_before_the_terminator() {
        let content = indoc! {r#"
            <ee:set-payload><![CDATA[%dw 2.0
            output application/json
            ---
            { id: payload.id }]]></ee:set-payload>
        "#};
        let blocks = transform_blocks(content);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].starts_with("output application/json"));
        assert!(blocks[0].ends_with("{ id: payload.id }"));
    }

    #[test]
    fn long_expression_is_complex() {
        let body: String = (0..14).map(|i| format!("  field{i}: payload[{i}],\n")).collect();
        let content = format!("#[{{\n{body}}}]");
        let scan = scan_expressions(&content, 10);
        assert!(scan.expressions >= 1);
        assert!(scan.complex_transformations >= 1);
        assert!(scan.total_lines > 10);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // Exactly eleven lines with a threshold of ten is complex; exactly
        // ten is not.
        let ten_lines = format!("#[{}]", "\n".repeat(9));
        let eleven_lines = format!("#[{}]", "\n".repeat(10));
        assert_eq!(scan_expressions(&ten_lines, 10).complex_transformations, 0);
        assert_eq!(scan_expressions(&eleven_lines, 10).complex_transformations, 1);
    }

    #[test]
    fn truncated_expressions_do_not_fail_the_scan() {
        let scan = scan_expressions("#[payload.never.closed\noutput application/xml\nno delimiter", 10);
        assert_eq!(scan.expressions, 0);
    }

    #[test]
    fn header_without_terminator_is_ignored() {
        let scan = scan_expressions("output application/json\n---\n{ open: true", 10);
        assert_eq!(scan.expressions, 0);
    }

    #[test]
    fn case_insensitive_header_matching() {
        let content = "OUTPUT APPLICATION/json\n---\nx]";
        assert_eq!(transform_blocks(content).len(), 1);
    }
}
