//! Tree builder
//!
//! [`TreeBuilder`] assembles a [`MarkupTree`] with an open/close stack, so
//! callers describe structure without juggling node ids. Nesting rules are
//! the tree's own: an invalid child is rejected at the `open`/`leaf` call.
//!
//! ```ignore
//! let mut builder = TreeBuilder::new(EntityKind::Document);
//! builder
//!     .open(EntityKind::Paragraph)?
//!     .text("Computes the ")?
//!     .code_span("sum")?
//!     .close()?;
//! let tree = builder.finish();
//! ```

use crate::entity::EntityKind;
use crate::error::{MarkupError, MarkupResult};
use crate::tree::{MarkupTree, NodeId};

/// Incremental builder over a [`MarkupTree`].
#[derive(Debug)]
pub struct TreeBuilder {
    tree: MarkupTree,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    /// Start a tree rooted at `root_kind`; the root starts open.
    pub fn new(root_kind: EntityKind) -> Self {
        let tree = MarkupTree::new(root_kind);
        let root = tree.root();
        TreeBuilder {
            tree,
            stack: vec![root],
        }
    }

    /// Shorthand for a document-rooted builder.
    pub fn document() -> Self {
        TreeBuilder::new(EntityKind::Document)
    }

    /// Shorthand for a paragraph fragment builder.
    pub fn paragraph() -> Self {
        TreeBuilder::new(EntityKind::Paragraph)
    }

    fn top(&self) -> NodeId {
        *self
            .stack
            .last()
            .expect("builder stack holds at least the root")
    }

    /// Open a container child under the current entity.
    pub fn open(&mut self, kind: EntityKind) -> MarkupResult<&mut Self> {
        let id = self.tree.append_child(self.top(), kind)?;
        self.stack.push(id);
        Ok(self)
    }

    /// Close the current entity, returning to its parent.
    pub fn close(&mut self) -> MarkupResult<&mut Self> {
        if self.stack.len() <= 1 {
            return Err(MarkupError::UnbalancedClose);
        }
        self.stack.pop();
        Ok(self)
    }

    /// Append a leaf child under the current entity.
    pub fn leaf(&mut self, kind: EntityKind) -> MarkupResult<&mut Self> {
        self.tree.append_child(self.top(), kind)?;
        Ok(self)
    }

    /// Append a text run.
    pub fn text(&mut self, text: &str) -> MarkupResult<&mut Self> {
        self.leaf(EntityKind::Text(text.to_string()))
    }

    /// Append an inline code span.
    pub fn code_span(&mut self, code: &str) -> MarkupResult<&mut Self> {
        self.leaf(EntityKind::CodeSpan(code.to_string()))
    }

    /// Append a soft line break.
    pub fn soft_break(&mut self) -> MarkupResult<&mut Self> {
        self.leaf(EntityKind::SoftBreak)
    }

    /// Append a hard line break.
    pub fn hard_break(&mut self) -> MarkupResult<&mut Self> {
        self.leaf(EntityKind::HardBreak)
    }

    /// Append a whole paragraph holding a single text run.
    pub fn paragraph_text(&mut self, text: &str) -> MarkupResult<&mut Self> {
        self.open(EntityKind::Paragraph)?;
        self.text(text)?;
        self.close()
    }

    /// Graft a deep copy of `fragment` under the current entity.
    pub fn append_fragment(&mut self, fragment: &MarkupTree) -> MarkupResult<&mut Self> {
        self.tree
            .append_subtree(self.top(), fragment, fragment.root())?;
        Ok(self)
    }

    /// Id of the entity currently open; useful for recording anchors.
    pub fn current(&self) -> NodeId {
        self.top()
    }

    /// Finish the build. Entities left open are closed implicitly.
    pub fn finish(self) -> MarkupTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_nested_structure() {
        let mut builder = TreeBuilder::document();
        builder
            .open(EntityKind::Section {
                name: "brief".into(),
                id: None,
            })
            .unwrap()
            .paragraph_text("A summary.")
            .unwrap()
            .close()
            .unwrap();
        let tree = builder.finish();
        assert_eq!(
            tree.kind_names(),
            vec!["Document", "Section", "Paragraph", "Text"]
        );
    }

    #[test]
    fn test_rejects_invalid_nesting() {
        let mut builder = TreeBuilder::paragraph();
        let err = builder.open(EntityKind::Paragraph).unwrap_err();
        assert!(matches!(err, MarkupError::InvalidChild { .. }));
    }

    #[test]
    fn test_close_past_root_is_an_error() {
        let mut builder = TreeBuilder::paragraph();
        assert_eq!(builder.close().unwrap_err(), MarkupError::UnbalancedClose);
    }

    #[test]
    fn test_unclosed_entities_are_closed_on_finish() {
        let mut builder = TreeBuilder::document();
        builder.open(EntityKind::BlockQuote).unwrap();
        builder.paragraph_text("quoted").unwrap();
        let tree = builder.finish();
        assert_eq!(
            tree.kind_names(),
            vec!["Document", "BlockQuote", "Paragraph", "Text"]
        );
    }
}
