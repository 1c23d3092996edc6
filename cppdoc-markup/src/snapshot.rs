//! Markup snapshots - a normalized, serializable view of a tree
//!
//! A snapshot captures node types, labels, attributes, and children in a
//! plain serde-friendly form, so every output format (JSON, treeviz, a
//! renderer's own walk) consumes the same canonical traversal instead of
//! reimplementing it.

use crate::entity::EntityKind;
use crate::tree::{MarkupTree, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of one markup node in normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupSnapshot {
    /// The kind name (e.g. "Paragraph", "Section", "Text").
    pub node_type: String,

    /// Primary label or text content of the node.
    pub label: String,

    /// Kind-specific attributes.
    pub attributes: BTreeMap<String, String>,

    /// Child snapshots in tree order.
    pub children: Vec<MarkupSnapshot>,
}

impl MarkupSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        MarkupSnapshot {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }
}

/// Snapshot the whole tree.
pub fn snapshot_tree(tree: &MarkupTree) -> MarkupSnapshot {
    snapshot_node(tree, tree.root())
}

/// Snapshot the subtree rooted at `id`.
pub fn snapshot_node(tree: &MarkupTree, id: NodeId) -> MarkupSnapshot {
    let mut snapshot = match tree.kind(id) {
        EntityKind::Document => MarkupSnapshot::new("Document", ""),
        EntityKind::Paragraph => MarkupSnapshot::new("Paragraph", ""),
        EntityKind::Heading { level } => MarkupSnapshot::new("Heading", "")
            .with_attribute("level", level.to_string()),
        EntityKind::List { ordered } => MarkupSnapshot::new("List", "")
            .with_attribute("ordered", ordered.to_string()),
        EntityKind::ListItem => MarkupSnapshot::new("ListItem", ""),
        EntityKind::CodeBlock { language, literal } => {
            let mut snap = MarkupSnapshot::new("CodeBlock", literal.trim_end());
            if let Some(language) = language {
                snap = snap.with_attribute("language", language.clone());
            }
            snap
        }
        EntityKind::BlockQuote => MarkupSnapshot::new("BlockQuote", ""),
        EntityKind::ThematicBreak => MarkupSnapshot::new("ThematicBreak", ""),
        EntityKind::Section { name, id: block_id } => {
            let mut snap = MarkupSnapshot::new("Section", name.clone());
            if let Some(block_id) = block_id {
                snap = snap.with_attribute("id", block_id.to_string());
            }
            snap
        }
        EntityKind::Text(text) => MarkupSnapshot::new("Text", text.clone()),
        EntityKind::Emphasis => MarkupSnapshot::new("Emphasis", ""),
        EntityKind::Strong => MarkupSnapshot::new("Strong", ""),
        EntityKind::CodeSpan(code) => MarkupSnapshot::new("CodeSpan", code.clone()),
        EntityKind::Link { url, title } => {
            let mut snap = MarkupSnapshot::new("Link", url.clone());
            if !title.is_empty() {
                snap = snap.with_attribute("title", title.clone());
            }
            snap
        }
        EntityKind::SoftBreak => MarkupSnapshot::new("SoftBreak", ""),
        EntityKind::HardBreak => MarkupSnapshot::new("HardBreak", ""),
    };

    for &child in tree.children(id) {
        snapshot.children.push(snapshot_node(tree, child));
    }
    snapshot
}

/// Serialize a tree snapshot to pretty JSON.
pub fn to_json(tree: &MarkupTree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&snapshot_tree(tree))
}

// ============================================================================
// Treeviz rendering
// ============================================================================

/// Icon per node type for the one-line-per-node treeviz format.
fn icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Paragraph" => "¶",
        "Heading" => "⊤",
        "List" => "☰",
        "ListItem" => "•",
        "CodeBlock" => "𝒱",
        "BlockQuote" => "❝",
        "ThematicBreak" => "―",
        "Section" => "§",
        "Text" => "◦",
        "Emphasis" => "𝐼",
        "Strong" => "𝐁",
        "CodeSpan" => "ƒ",
        "Link" => "⊕",
        "SoftBreak" => "↵",
        "HardBreak" => "⏎",
        _ => "?",
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated: String = s.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    } else {
        s.to_string()
    }
}

/// Render a tree as an indented one-line-per-node listing.
///
/// Two spaces of indentation per level of nesting, an icon per kind, and
/// labels truncated to keep the lines scannable.
pub fn treeviz(tree: &MarkupTree) -> String {
    let snapshot = snapshot_tree(tree);
    let mut out = String::new();
    treeviz_node(&snapshot, 0, &mut out);
    out
}

fn treeviz_node(snapshot: &MarkupSnapshot, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(icon(&snapshot.node_type));
    if !snapshot.label.is_empty() {
        out.push(' ');
        out.push_str(&truncate(&snapshot.label, 40));
    }
    out.push('\n');
    for child in &snapshot.children {
        treeviz_node(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;

    fn sample() -> MarkupTree {
        let mut builder = TreeBuilder::document();
        builder
            .open(EntityKind::Section {
                name: "brief".into(),
                id: None,
            })
            .unwrap()
            .paragraph_text("A short summary.")
            .unwrap()
            .close()
            .unwrap();
        builder.finish()
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = snapshot_tree(&sample());
        assert_eq!(snapshot.node_type, "Document");
        assert_eq!(snapshot.children.len(), 1);
        let section = &snapshot.children[0];
        assert_eq!(section.node_type, "Section");
        assert_eq!(section.label, "brief");
        assert_eq!(section.children[0].node_type, "Paragraph");
    }

    #[test]
    fn test_treeviz_rendering() {
        insta::assert_snapshot!(treeviz(&sample()), @r"
        ⧉
          § brief
            ¶
              ◦ A short summary.
        ");
    }

    #[test]
    fn test_json_round_trip() {
        let json = to_json(&sample()).unwrap();
        let back: MarkupSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot_tree(&sample()));
    }
}
