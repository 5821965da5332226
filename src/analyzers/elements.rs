//! Element tally and flow topology counting.
//!
//! Every element in a configuration document is classified into a namespace
//! key and counted by local name. The classification works whether or not
//! the resolver produced a binding for the element's namespace: resolved
//! Mule namespaces display as `connector (prefix:)`, unresolved ones fall
//! back to `segment (ns:)`, foreign namespaces to `other (uri)`, and
//! unnamespaced elements to `default`.

use crate::analyzers::namespace::{final_segment, NamespaceMap, MULE_NAMESPACE_MARKER};
use crate::core::TagTally;
use roxmltree::Document;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementTally {
    pub tags_by_namespace: TagTally,
    pub flows: usize,
    pub subflows: usize,
    /// Element count excluding the document root.
    pub components: usize,
}

/// Walk the document and tally every element, counting flow and sub-flow
/// declarations along the way.
pub fn tally_elements(doc: &Document, namespaces: &NamespaceMap) -> ElementTally {
    let mut tally = ElementTally::default();
    let mut total_elements = 0usize;

    for node in doc.descendants().filter(|n| n.is_element()) {
        total_elements += 1;

        let local_name = node.tag_name().name();
        let key = match node.tag_name().namespace() {
            Some(uri) => namespace_key(uri, namespaces),
            None => "default".to_string(),
        };

        *tally
            .tags_by_namespace
            .entry(key)
            .or_default()
            .entry(local_name.to_string())
            .or_insert(0) += 1;

        // Processing units are matched by local name so both namespaced and
        // bare spellings count.
        match local_name {
            "flow" => tally.flows += 1,
            "sub-flow" => tally.subflows += 1,
            _ => {}
        }
    }

    tally.components = total_elements.saturating_sub(1);
    tally
}

fn namespace_key(uri: &str, namespaces: &NamespaceMap) -> String {
    if let Some(binding) = namespaces.binding(uri) {
        format!("{} ({}:)", binding.connector, binding.prefix)
    } else if uri.contains(MULE_NAMESPACE_MARKER) {
        let segment = final_segment(uri).unwrap_or(uri);
        format!("{segment} (ns:)")
    } else {
        format!("other ({uri})")
    }
}
