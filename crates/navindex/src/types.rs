use serde::{Deserialize, Serialize};

/// One entry in the static navigation tree.
///
/// A node with non-empty `children` is a parent node. A node may carry both
/// an `href` and children, in which case the parent is itself navigable.
/// The tree is built once from static configuration and read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNode {
    /// Display text. Required, non-empty.
    pub label: String,
    /// Navigable target. Absent for pure group headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered child nodes. Empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    /// A leaf node with a target.
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
            description: None,
            children: Vec::new(),
        }
    }

    /// A group header with children and no target of its own.
    pub fn group(label: &str, children: Vec<NavNode>) -> Self {
        Self {
            label: label.to_string(),
            href: None,
            description: None,
            children,
        }
    }

    /// Attach a description to the node.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// The node's href, treating an empty string as absent.
    pub fn target(&self) -> Option<&str> {
        self.href.as_deref().filter(|href| !href.is_empty())
    }
}

/// A titled group of top-level navigation items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavNode>,
}

impl NavSection {
    pub fn new(title: &str, items: Vec<NavNode>) -> Self {
        Self {
            title: title.to_string(),
            items,
        }
    }
}

/// A flattened, routable projection of a [`NavNode`].
///
/// Derived from the tree, never stored independently. Every entry carries a
/// non-empty `href`; nodes without one are excluded at flattening time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexEntry {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Label of the parent item, set when this entry was emitted as a child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_label: Option<String>,
    pub is_child: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_treats_empty_href_as_absent() {
        let mut node = NavNode::link("Intro", "/intro");
        assert_eq!(node.target(), Some("/intro"));

        node.href = Some(String::new());
        assert_eq!(node.target(), None);

        node.href = None;
        assert_eq!(node.target(), None);
    }

    #[test]
    fn node_serializes_without_absent_fields() {
        let node = NavNode::link("Intro", "/intro");
        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["label"], "Intro");
        assert_eq!(json["href"], "/intro");
        assert!(json.get("description").is_none());
        assert!(json.get("children").is_none());
    }

    #[test]
    fn tree_roundtrips_through_json() {
        let section = NavSection::new(
            "Docs",
            vec![NavNode::group(
                "Hooks",
                vec![NavNode::link("useState", "/hooks/use-state")
                    .with_description("Local component state")],
            )],
        );

        let json = serde_json::to_string(&section).expect("serialize");
        let back: NavSection = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, section);
    }
}
