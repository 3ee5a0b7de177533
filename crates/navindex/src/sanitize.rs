//! Best-effort cleanup of author-provided navigation trees.
//!
//! The tree is static, author-controlled data, so malformed nodes are
//! dropped with a warning instead of failing the load. [`validate`] is the
//! strict counterpart for hosts that want authoring mistakes surfaced.

use crate::error::{NavIndexError, Result};
use crate::types::{NavNode, NavSection};

/// Drops malformed nodes, keeping everything usable.
///
/// A node is dropped when its label is empty, or when it has neither a
/// non-empty href nor any surviving children. Sections that end up empty are
/// kept; an empty group header renders as nothing, which is harmless.
pub fn sanitize(sections: Vec<NavSection>) -> Vec<NavSection> {
    sections
        .into_iter()
        .filter_map(|section| {
            if section.title.trim().is_empty() {
                log::warn!("dropping section with empty title");
                return None;
            }
            let title = section.title;
            let items = section
                .items
                .into_iter()
                .filter_map(|item| sanitize_node(item, &title))
                .collect();
            Some(NavSection { title, items })
        })
        .collect()
}

fn sanitize_node(mut node: NavNode, section: &str) -> Option<NavNode> {
    if node.label.trim().is_empty() {
        log::warn!("dropping unlabeled node in section '{section}'");
        return None;
    }
    node.children = node
        .children
        .into_iter()
        .filter_map(|child| sanitize_node(child, section))
        .collect();
    if node.target().is_none() && node.children.is_empty() {
        log::warn!(
            "dropping node '{}' in section '{section}': no href and no children",
            node.label
        );
        return None;
    }
    Some(node)
}

/// Strict validation: returns the first authoring mistake found.
pub fn validate(sections: &[NavSection]) -> Result<()> {
    for (position, section) in sections.iter().enumerate() {
        if section.title.trim().is_empty() {
            return Err(NavIndexError::EmptySectionTitle(position));
        }
        for item in &section.items {
            validate_node(item, &section.title)?;
        }
    }
    Ok(())
}

fn validate_node(node: &NavNode, section: &str) -> Result<()> {
    if node.label.trim().is_empty() {
        return Err(NavIndexError::EmptyLabel(section.to_string()));
    }
    if node.target().is_none() && node.children.is_empty() {
        return Err(NavIndexError::DeadNode(node.label.clone()));
    }
    for child in &node.children {
        validate_node(child, section)?;
    }
    Ok(())
}
