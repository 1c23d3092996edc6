//! The markup tree
//!
//! A [`MarkupTree`] owns every node of one document (or document fragment)
//! in a single arena. Children and parents are referenced by [`NodeId`],
//! a stable integer index valid for the arena's lifetime, rather than by
//! pointer, so parent links need no lifetime care and cloning the tree is
//! an ordinary deep copy whose internal links stay consistent.
//!
//! Construction is append-only: a node's parent is set exactly once, when
//! the node is attached. Nesting rules are enforced at attach time through
//! [`EntityKind::accepts_child`]; after construction the tree is treated as
//! immutable and traversed read-only, in pre-order.

use crate::entity::EntityKind;
use crate::error::{MarkupError, MarkupResult};
use crate::visitor::{walk, Visitor};
use std::fmt;

/// Index of a node inside its owning [`MarkupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    kind: EntityKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena-owned markup document or fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl MarkupTree {
    /// Create a tree consisting of a single root node.
    pub fn new(root_kind: EntityKind) -> Self {
        let root = Node {
            kind: root_kind,
            parent: None,
            children: Vec::new(),
        };
        MarkupTree {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &EntityKind {
        &self.nodes[id.index()].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Attach a new node under `parent`.
    ///
    /// Fails if the parent kind does not accept the child kind. The new
    /// node's parent link is set here and never changes afterwards.
    pub fn append_child(&mut self, parent: NodeId, kind: EntityKind) -> MarkupResult<NodeId> {
        let parent_kind = &self.nodes[parent.index()].kind;
        if !parent_kind.accepts_child(&kind) {
            return Err(MarkupError::InvalidChild {
                parent: parent_kind.name(),
                child: kind.name(),
            });
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Deep-copy the subtree of `other` rooted at `other_node` under
    /// `parent` in this tree. Returns the id of the copied root.
    pub fn append_subtree(
        &mut self,
        parent: NodeId,
        other: &MarkupTree,
        other_node: NodeId,
    ) -> MarkupResult<NodeId> {
        let copied = self.append_child(parent, other.kind(other_node).clone())?;
        for &child in other.children(other_node) {
            self.append_subtree(copied, other, child)?;
        }
        Ok(copied)
    }

    /// Pre-order traversal of the subtree rooted at `start`.
    ///
    /// The callback receives each node's id, kind, and depth relative to
    /// `start` (which is visited first, at depth 0).
    pub fn visit_from<F>(&self, start: NodeId, f: &mut F)
    where
        F: FnMut(NodeId, &EntityKind, usize),
    {
        self.visit_impl(start, 0, f);
    }

    /// Pre-order traversal of the whole tree.
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(NodeId, &EntityKind, usize),
    {
        self.visit_from(self.root, f);
    }

    fn visit_impl<F>(&self, id: NodeId, depth: usize, f: &mut F)
    where
        F: FnMut(NodeId, &EntityKind, usize),
    {
        f(id, self.kind(id), depth);
        for &child in self.children(id) {
            self.visit_impl(child, depth + 1, f);
        }
    }

    /// Drive a [`Visitor`] over the whole tree.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        walk(self, self.root, visitor);
    }

    /// Concatenated text content of the subtree rooted at `id`.
    ///
    /// Text runs and code spans contribute their literal; line breaks
    /// contribute a newline. Structure is otherwise flattened.
    pub fn plain_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.visit_from(id, &mut |_, kind, _| match kind {
            EntityKind::Text(text) => out.push_str(text),
            EntityKind::CodeSpan(code) => out.push_str(code),
            EntityKind::SoftBreak | EntityKind::HardBreak => out.push('\n'),
            EntityKind::CodeBlock { literal, .. } => out.push_str(literal),
            _ => {}
        });
        out
    }

    /// Pre-order sequence of kind names, mostly useful in assertions.
    pub fn kind_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(self.nodes.len());
        self.visit(&mut |_, kind, _| names.push(kind.name()));
        names
    }
}

impl fmt::Display for MarkupTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MarkupTree({}, {} nodes)",
            self.kind(self.root),
            self.nodes.len()
        )
    }
}
