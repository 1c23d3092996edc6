//! Visitor trait for traversing markup trees
//!
//! Implement [`Visitor`] to walk a tree. Each node kind has an enter hook,
//! and container kinds additionally have a leave hook fired after their
//! children. Default implementations are empty, so only the hooks you care
//! about need overriding.
//!
//! ```ignore
//! struct TextCollector(String);
//!
//! impl Visitor for TextCollector {
//!     fn visit_text(&mut self, _tree: &MarkupTree, _id: NodeId, text: &str) {
//!         self.0.push_str(text);
//!     }
//! }
//!
//! let mut collector = TextCollector(String::new());
//! tree.accept(&mut collector);
//! ```

use crate::entity::EntityKind;
use crate::tree::{MarkupTree, NodeId};

pub trait Visitor {
    fn visit_document(&mut self, _tree: &MarkupTree, _id: NodeId) {}
    fn leave_document(&mut self, _tree: &MarkupTree, _id: NodeId) {}

    fn visit_paragraph(&mut self, _tree: &MarkupTree, _id: NodeId) {}
    fn leave_paragraph(&mut self, _tree: &MarkupTree, _id: NodeId) {}

    fn visit_heading(&mut self, _tree: &MarkupTree, _id: NodeId, _level: u8) {}
    fn leave_heading(&mut self, _tree: &MarkupTree, _id: NodeId, _level: u8) {}

    fn visit_list(&mut self, _tree: &MarkupTree, _id: NodeId, _ordered: bool) {}
    fn leave_list(&mut self, _tree: &MarkupTree, _id: NodeId, _ordered: bool) {}

    fn visit_list_item(&mut self, _tree: &MarkupTree, _id: NodeId) {}
    fn leave_list_item(&mut self, _tree: &MarkupTree, _id: NodeId) {}

    fn visit_code_block(
        &mut self,
        _tree: &MarkupTree,
        _id: NodeId,
        _language: Option<&str>,
        _literal: &str,
    ) {
    }

    fn visit_block_quote(&mut self, _tree: &MarkupTree, _id: NodeId) {}
    fn leave_block_quote(&mut self, _tree: &MarkupTree, _id: NodeId) {}

    fn visit_thematic_break(&mut self, _tree: &MarkupTree, _id: NodeId) {}

    fn visit_section(&mut self, _tree: &MarkupTree, _id: NodeId, _name: &str) {}
    fn leave_section(&mut self, _tree: &MarkupTree, _id: NodeId, _name: &str) {}

    fn visit_text(&mut self, _tree: &MarkupTree, _id: NodeId, _text: &str) {}

    fn visit_emphasis(&mut self, _tree: &MarkupTree, _id: NodeId) {}
    fn leave_emphasis(&mut self, _tree: &MarkupTree, _id: NodeId) {}

    fn visit_strong(&mut self, _tree: &MarkupTree, _id: NodeId) {}
    fn leave_strong(&mut self, _tree: &MarkupTree, _id: NodeId) {}

    fn visit_code_span(&mut self, _tree: &MarkupTree, _id: NodeId, _code: &str) {}

    fn visit_link(&mut self, _tree: &MarkupTree, _id: NodeId, _url: &str, _title: &str) {}
    fn leave_link(&mut self, _tree: &MarkupTree, _id: NodeId, _url: &str, _title: &str) {}

    fn visit_soft_break(&mut self, _tree: &MarkupTree, _id: NodeId) {}
    fn visit_hard_break(&mut self, _tree: &MarkupTree, _id: NodeId) {}
}

/// Drive `visitor` over the subtree rooted at `id`, pre-order.
pub fn walk(tree: &MarkupTree, id: NodeId, visitor: &mut dyn Visitor) {
    match tree.kind(id) {
        EntityKind::Document => {
            visitor.visit_document(tree, id);
            walk_children(tree, id, visitor);
            visitor.leave_document(tree, id);
        }
        EntityKind::Paragraph => {
            visitor.visit_paragraph(tree, id);
            walk_children(tree, id, visitor);
            visitor.leave_paragraph(tree, id);
        }
        EntityKind::Heading { level } => {
            let level = *level;
            visitor.visit_heading(tree, id, level);
            walk_children(tree, id, visitor);
            visitor.leave_heading(tree, id, level);
        }
        EntityKind::List { ordered } => {
            let ordered = *ordered;
            visitor.visit_list(tree, id, ordered);
            walk_children(tree, id, visitor);
            visitor.leave_list(tree, id, ordered);
        }
        EntityKind::ListItem => {
            visitor.visit_list_item(tree, id);
            walk_children(tree, id, visitor);
            visitor.leave_list_item(tree, id);
        }
        EntityKind::CodeBlock { language, literal } => {
            visitor.visit_code_block(tree, id, language.as_deref(), literal);
        }
        EntityKind::BlockQuote => {
            visitor.visit_block_quote(tree, id);
            walk_children(tree, id, visitor);
            visitor.leave_block_quote(tree, id);
        }
        EntityKind::ThematicBreak => visitor.visit_thematic_break(tree, id),
        EntityKind::Section { name, .. } => {
            let name = name.clone();
            visitor.visit_section(tree, id, &name);
            walk_children(tree, id, visitor);
            visitor.leave_section(tree, id, &name);
        }
        EntityKind::Text(text) => visitor.visit_text(tree, id, text),
        EntityKind::Emphasis => {
            visitor.visit_emphasis(tree, id);
            walk_children(tree, id, visitor);
            visitor.leave_emphasis(tree, id);
        }
        EntityKind::Strong => {
            visitor.visit_strong(tree, id);
            walk_children(tree, id, visitor);
            visitor.leave_strong(tree, id);
        }
        EntityKind::CodeSpan(code) => visitor.visit_code_span(tree, id, code),
        EntityKind::Link { url, title } => {
            let url = url.clone();
            let title = title.clone();
            visitor.visit_link(tree, id, &url, &title);
            walk_children(tree, id, visitor);
            visitor.leave_link(tree, id, &url, &title);
        }
        EntityKind::SoftBreak => visitor.visit_soft_break(tree, id),
        EntityKind::HardBreak => visitor.visit_hard_break(tree, id),
    }
}

fn walk_children(tree: &MarkupTree, id: NodeId, visitor: &mut dyn Visitor) {
    for &child in tree.children(id) {
        walk(tree, child, visitor);
    }
}
