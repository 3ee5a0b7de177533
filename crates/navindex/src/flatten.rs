//! Flattening of the navigation tree into a searchable index.

use crate::types::{NavNode, NavSection, SearchIndexEntry};

/// Flattens an ordered sequence of sections into routable index entries.
///
/// Only nodes carrying a non-empty href are emitted. A parent node with an
/// href is emitted before its children; children are tagged with the parent's
/// label. Output order matches section/item/child declaration order and is
/// relied on by callers; no resorting happens here.
///
/// Nodes with neither an href nor children contribute nothing; that is not
/// an error, the data is author-controlled.
pub fn flatten(sections: &[NavSection]) -> Vec<SearchIndexEntry> {
    let mut entries = Vec::new();
    for section in sections {
        for item in &section.items {
            push_node(item, None, &mut entries);
        }
    }
    log::debug!("flattened {} sections into {} entries", sections.len(), entries.len());
    entries
}

/// Flattens a bare sequence of top-level nodes (no section wrapper).
pub fn flatten_nodes(nodes: &[NavNode]) -> Vec<SearchIndexEntry> {
    let mut entries = Vec::new();
    for node in nodes {
        push_node(node, None, &mut entries);
    }
    entries
}

/// The source trees are two levels deep (items with children), but nothing
/// here depends on that: deeper nodes are walked the same way, each tagged
/// with its immediate parent's label.
fn push_node(node: &NavNode, parent: Option<&str>, out: &mut Vec<SearchIndexEntry>) {
    if let Some(href) = node.target() {
        out.push(SearchIndexEntry {
            label: node.label.clone(),
            href: href.to_string(),
            description: node.description.clone(),
            parent_label: parent.map(str::to_string),
            is_child: parent.is_some(),
        });
    }
    for child in &node.children {
        push_node(child, Some(&node.label), out);
    }
}
