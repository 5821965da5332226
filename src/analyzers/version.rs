//! Mule runtime version extraction from the Maven build descriptor.

use roxmltree::{Document, Node};
use std::path::Path;

pub const MAVEN_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

pub const UNKNOWN_VERSION: &str = "unknown";

/// Read the project's Mule runtime version from `pom.xml`.
///
/// The `mule.version` property is authoritative; when absent, the
/// `mule-maven-plugin` version is reported as `plugin-<version>` so the
/// project still lands in a recognizable bucket. Anything else is
/// `"unknown"`, including a missing or unparsable descriptor.
pub fn detect_mule_version(project_root: &Path) -> String {
    let pom_path = project_root.join("pom.xml");
    let content = match std::fs::read_to_string(&pom_path) {
        Ok(content) => content,
        Err(_) => return UNKNOWN_VERSION.to_string(),
    };

    let doc = match Document::parse(&content) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Could not parse {}: {}", pom_path.display(), e);
            return UNKNOWN_VERSION.to_string();
        }
    };

    if let Some(version) = mule_version_property(&doc) {
        return version;
    }
    if let Some(version) = mule_maven_plugin_version(&doc) {
        return format!("plugin-{version}");
    }

    UNKNOWN_VERSION.to_string()
}

pub fn is_legacy(version: &str) -> bool {
    version.starts_with("3.")
}

fn mule_version_property(doc: &Document) -> Option<String> {
    doc.descendants()
        .filter(|node| is_maven_element(node, "properties"))
        .find_map(|properties| {
            properties
                .children()
                .find(|child| is_maven_element(child, "mule.version"))
                .and_then(|version| version.text())
                .map(|text| text.trim().to_string())
        })
}

fn mule_maven_plugin_version(doc: &Document) -> Option<String> {
    doc.descendants()
        .filter(|node| is_maven_element(node, "plugin"))
        .filter(|plugin| {
            plugin.children().any(|child| {
                is_maven_element(&child, "artifactId")
                    && child.text().map(str::trim) == Some("mule-maven-plugin")
            })
        })
        .find_map(|plugin| {
            plugin
                .children()
                .find(|child| is_maven_element(child, "version"))
                .and_then(|version| version.text())
                .map(|text| text.trim().to_string())
        })
}

fn is_maven_element(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(MAVEN_NAMESPACE)
}
