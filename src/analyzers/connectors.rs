//! Connector attribution.
//!
//! Attribution decides, per element, which connector produced it. Elements
//! with a Mule-convention namespace are attributed from the URI itself;
//! elements with only a literal prefix fall back to the document's declared
//! prefix bindings; elements with neither belong to the platform core.
//! Unresolvable prefixes contribute nothing — partial namespace metadata
//! must degrade attribution, never fail it.

use crate::analyzers::namespace::{
    final_segment, is_reserved_segment, NamespaceMap, CORE_CONNECTOR, MULE_NAMESPACE_MARKER,
};
use roxmltree::Document;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileAttribution {
    pub connector_usage: BTreeMap<String, usize>,
    pub component_types: BTreeMap<String, usize>,
}

/// A qualified tag as attribution sees it: a resolved namespace URI, or a
/// bare prefix, or nothing.
#[derive(Clone, Copy, Debug)]
pub struct TagRef<'a> {
    pub namespace: Option<&'a str>,
    pub prefix: Option<&'a str>,
    pub local_name: &'a str,
}

/// Count connector usage and component types for every element of the
/// document.
pub fn attribute_components(doc: &Document, namespaces: &NamespaceMap) -> FileAttribution {
    let mut attribution = FileAttribution::default();

    for node in doc.descendants().filter(|n| n.is_element()) {
        let tag = TagRef {
            namespace: node.tag_name().namespace(),
            // A well-formed document resolves every prefix, so elements
            // reaching this point either carry a URI or no prefix at all.
            prefix: None,
            local_name: node.tag_name().name(),
        };
        record(&mut attribution, &tag, namespaces);
    }

    attribution
}

fn record(attribution: &mut FileAttribution, tag: &TagRef, namespaces: &NamespaceMap) {
    let Some(connector) = resolve_connector(tag, namespaces) else {
        return;
    };

    *attribution
        .connector_usage
        .entry(connector.to_string())
        .or_insert(0) += 1;

    let component_type = if connector == CORE_CONNECTOR {
        tag.local_name.to_string()
    } else {
        format!("{connector}:{}", tag.local_name)
    };
    *attribution.component_types.entry(component_type).or_insert(0) += 1;
}

/// Connector for one qualified tag, or `None` when it cannot be attributed.
///
/// Reserved platform segments collapse to the `"core"` marker so the
/// built-in vocabulary never masquerades as a connector.
pub fn resolve_connector<'a>(tag: &TagRef<'a>, namespaces: &'a NamespaceMap) -> Option<&'a str> {
    match tag.namespace {
        Some(uri) if uri.contains(MULE_NAMESPACE_MARKER) => {
            let segment = final_segment(uri)?;
            if is_reserved_segment(segment) {
                Some(CORE_CONNECTOR)
            } else {
                Some(segment)
            }
        }
        // Foreign namespaces are nobody's connector.
        Some(_) => None,
        None => match tag.prefix {
            Some(prefix) => namespaces.connector_for_prefix(prefix),
            None => Some(CORE_CONNECTOR),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn attribute(xml: &str) -> FileAttribution {
        let doc = Document::parse(xml).unwrap();
        let namespaces = NamespaceMap::resolve(&doc);
        attribute_components(&doc, &namespaces)
    }

    #[test]
    fn mule_namespace_attributes_by_final_segment() {
        let attribution = attribute(indoc! {r#"
            <mule xmlns:db="http://www.mulesoft.org/schema/mule/db">
              <flow name="q">
                <db:select/>
                <db:insert/>
              </flow>
            </mule>
        "#});

        assert_eq!(attribution.connector_usage["db"], 2);
        assert_eq!(attribution.component_types["db:select"], 1);
        assert_eq!(attribution.component_types["db:insert"], 1);
    }

    #[test]
    fn bare_elements_belong_to_core() {
        let attribution = attribute("<mule><flow name='f'><logger/></flow></mule>");

        assert_eq!(attribution.connector_usage["core"], 3);
        assert_eq!(attribution.component_types["logger"], 1);
        // Core components use the bare local name, never "core:logger".
        assert!(!attribution.component_types.contains_key("core:logger"));
    }

    #[test]
    fn reserved_segments_collapse_to_core() {
        let attribution = attribute(indoc! {r#"
            <mule xmlns="http://www.mulesoft.org/schema/mule/core"
                  xmlns:doc="http://www.mulesoft.org/schema/mule/documentation">
              <flow name="f" doc:name="f"/>
            </mule>
        "#});

        assert_eq!(attribution.connector_usage["core"], 2);
        assert!(!attribution.connector_usage.contains_key("documentation"));
    }

    #[test]
    fn foreign_namespaces_are_skipped() {
        let attribution = attribute(indoc! {r#"
            <root xmlns:beans="http://www.springframework.org/schema/beans">
              <beans:bean/>
            </root>
        "#});

        // Only the bare root is attributed.
        assert_eq!(attribution.connector_usage.len(), 1);
        assert_eq!(attribution.connector_usage["core"], 1);
    }

    #[test]
    fn declared_prefix_resolves_a_bare_prefix_tag() {
        let doc = Document::parse(
            r#"<mule xmlns:db="http://www.mulesoft.org/schema/mule/db"/>"#,
        )
        .unwrap();
        let namespaces = NamespaceMap::resolve(&doc);

        let tag = TagRef {
            namespace: None,
            prefix: Some("db"),
            local_name: "select",
        };
        assert_eq!(resolve_connector(&tag, &namespaces), Some("db"));
    }

    #[test]
    fn undeclared_prefix_contributes_nothing() {
        let namespaces = NamespaceMap::default();
        let tag = TagRef {
            namespace: None,
            prefix: Some("mystery"),
            local_name: "thing",
        };
        assert_eq!(resolve_connector(&tag, &namespaces), None);
    }
}
