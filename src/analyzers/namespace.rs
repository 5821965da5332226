//! Per-document namespace resolution.
//!
//! Mule extension schemas live under a fixed URI convention
//! (`…mulesoft.org/schema/mule/<connector>`), but real configuration files
//! declare them inconsistently: some carry a full `xsi:schemaLocation`
//! listing, some only `xmlns:` declarations, some both with different
//! spellings. Both sources are read and merged here, with the direct
//! declarations winning, so a document missing its schema-location block
//! still resolves.
//!
//! Prefix-to-connector bindings are document-local by convention; a
//! [`NamespaceMap`] is scoped to a single file analysis and never shared or
//! cached across files.

use roxmltree::{Document, Node};
use std::collections::HashMap;

/// URI fragment identifying Mule extension schemas.
pub const MULE_NAMESPACE_MARKER: &str = "mulesoft.org/schema/mule";

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace segments belonging to the platform's built-in vocabulary
/// rather than to a connector.
pub const RESERVED_SEGMENTS: &[&str] = &["core", "documentation"];

pub const CORE_CONNECTOR: &str = "core";

pub fn is_reserved_segment(segment: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectorBinding {
    pub prefix: String,
    pub connector: String,
}

/// Mapping from namespace URI to its declared prefix and connector name,
/// valid for one document.
#[derive(Clone, Debug, Default)]
pub struct NamespaceMap {
    by_uri: HashMap<String, ConnectorBinding>,
}

impl NamespaceMap {
    /// Build the mapping for one parsed document.
    pub fn resolve(doc: &Document) -> Self {
        let root = doc.root_element();
        let mut by_uri = HashMap::new();

        // First pass: the schema-location listing, a flat alternating
        // sequence of (namespace URI, schema path) pairs.
        if let Some(locations) = root.attribute((XSI_NAMESPACE, "schemaLocation")) {
            let parts: Vec<&str> = locations.split_whitespace().collect();
            for pair in parts.chunks(2) {
                let [uri, _schema] = pair else { continue };
                if !uri.contains(MULE_NAMESPACE_MARKER) {
                    continue;
                }
                let Some(connector) = final_segment(uri) else {
                    continue;
                };
                // The listing names the namespace but not its prefix; that
                // comes from the matching declaration on the root.
                if let Some(prefix) = declared_prefix(&root, uri) {
                    by_uri.insert(
                        uri.to_string(),
                        ConnectorBinding {
                            prefix: prefix.to_string(),
                            connector: connector.to_string(),
                        },
                    );
                }
            }
        }

        // Second pass: direct namespace declarations. Schema-location
        // listings are sometimes absent or incomplete, so these are the
        // fallback of record and override the first pass on conflict.
        for ns in root.namespaces() {
            let uri = ns.uri();
            if !uri.contains(MULE_NAMESPACE_MARKER) {
                continue;
            }
            let Some(prefix) = ns.name() else { continue };
            let Some(connector) = final_segment(uri) else {
                continue;
            };
            by_uri.insert(
                uri.to_string(),
                ConnectorBinding {
                    prefix: prefix.to_string(),
                    connector: connector.to_string(),
                },
            );
        }

        Self { by_uri }
    }

    pub fn binding(&self, uri: &str) -> Option<&ConnectorBinding> {
        self.by_uri.get(uri)
    }

    /// Connector for a bare prefix, used when an element carries a literal
    /// prefix with no resolved namespace. Reserved platform segments are
    /// not connectors and resolve to nothing.
    pub fn connector_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.by_uri
            .values()
            .find(|binding| binding.prefix == prefix)
            .map(|binding| binding.connector.as_str())
            .filter(|connector| !is_reserved_segment(connector))
    }

    /// Every connector declared in this document, reserved segments
    /// excluded. Declaration alone marks a connector as used by the
    /// project, independent of element attribution.
    pub fn declared_connectors(&self) -> impl Iterator<Item = &str> {
        self.by_uri
            .values()
            .map(|binding| binding.connector.as_str())
            .filter(|connector| !is_reserved_segment(connector))
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }
}

/// Final path segment of a namespace URI, the connector name under the Mule
/// schema convention.
pub fn final_segment(uri: &str) -> Option<&str> {
    uri.rsplit('/').next().filter(|segment| !segment.is_empty())
}

fn declared_prefix<'a, 'input: 'a>(root: &Node<'a, 'input>, uri: &str) -> Option<&'a str> {
    root.namespaces()
        .find(|ns| ns.uri() == uri)
        .and_then(|ns| ns.name())
}
