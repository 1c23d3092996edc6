//! The parsed comment tree
//!
//! A [`ParsedComment`] is a CommonMark document augmented with the three
//! custom node kinds: commands, sections, and inlines. Ordinary Markdown
//! blocks appear as [`cppdoc_markup::MarkupTree`] fragments, each rooted
//! at one block.
//!
//! Tree shape invariants:
//! - a command node is always a leaf holding only its trailing-line text;
//! - a section node holds a single paragraph unless its kind is `details`,
//!   which holds any block children;
//! - an inline node holds paragraphs, sections, or commands, and after
//!   postprocessing only a brief section, at most one details section,
//!   ordinary sections, and commands.

use crate::commands::{CommandKind, InlineKind, SectionKind};
use cppdoc_markup::{EntityKind, MarkupTree};
use std::fmt;

/// A one-line directive, e.g. `\exclude` or `\unique_name foo::bar`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandNode {
    pub kind: CommandKind,
    /// Rest of the directive line, trimmed.
    pub arguments: String,
    /// 1-based source line of the directive.
    pub line: usize,
}

impl CommandNode {
    pub fn new(kind: CommandKind, arguments: impl Into<String>, line: usize) -> Self {
        CommandNode {
            kind,
            arguments: arguments.into(),
            line,
        }
    }
}

impl fmt::Display for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({}, '{}')", self.kind, self.arguments)
    }
}

/// A body-bearing directive, e.g. `\effects` or `\see key - text`.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionNode {
    pub kind: SectionKind,
    /// Optional `key -` prefix of the body.
    pub key: Option<String>,
    pub children: Vec<CommentNode>,
    pub line: usize,
}

impl SectionNode {
    pub fn new(kind: SectionKind, key: Option<String>, line: usize) -> Self {
        SectionNode {
            kind,
            key,
            children: Vec::new(),
            line,
        }
    }

    /// Containment rule: one paragraph only, unless the kind is details.
    pub fn accepts(&self, child: &CommentNode) -> bool {
        match child {
            CommentNode::Block(tree) => {
                if self.kind.accepts_any_block() {
                    true
                } else {
                    self.children.is_empty()
                        && matches!(tree.kind(tree.root()), EntityKind::Paragraph)
                }
            }
            _ => false,
        }
    }

    pub fn push(&mut self, child: CommentNode) {
        debug_assert!(self.accepts(&child), "section child violates containment");
        self.children.push(child);
    }

    /// Concatenated text content of the section body.
    pub fn text(&self) -> String {
        collect_text(&self.children)
    }
}

impl fmt::Display for SectionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "Section({}, key '{}')", self.kind, key),
            None => write!(f, "Section({})", self.kind),
        }
    }
}

/// An entity-scoped sub-comment, e.g. `\param x ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineNode {
    pub kind: InlineKind,
    /// Name of the referenced parameter/template parameter/base.
    pub name: String,
    pub children: Vec<CommentNode>,
    pub line: usize,
}

impl InlineNode {
    pub fn new(kind: InlineKind, name: impl Into<String>, line: usize) -> Self {
        InlineNode {
            kind,
            name: name.into(),
            children: Vec::new(),
            line,
        }
    }

    /// Containment rule: paragraphs, sections, and commands.
    pub fn accepts(&self, child: &CommentNode) -> bool {
        match child {
            CommentNode::Block(tree) => {
                matches!(tree.kind(tree.root()), EntityKind::Paragraph)
            }
            CommentNode::Section(_) | CommentNode::Command(_) => true,
            CommentNode::Inline(_) => false,
        }
    }

    pub fn push(&mut self, child: CommentNode) {
        debug_assert!(self.accepts(&child), "inline child violates containment");
        self.children.push(child);
    }

    /// Whether the last child is a command node (continuation rule input).
    pub fn last_child_is_command(&self) -> bool {
        matches!(self.children.last(), Some(CommentNode::Command(_)))
    }
}

impl fmt::Display for InlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inline({}, '{}', {} children)",
            self.kind,
            self.name,
            self.children.len()
        )
    }
}

/// One node of the parsed comment tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentNode {
    Command(CommandNode),
    Section(SectionNode),
    Inline(InlineNode),
    /// An ordinary Markdown block (paragraph, list, code block, ...).
    Block(MarkupTree),
}

impl CommentNode {
    /// Commands and inlines float to the back during postprocessing.
    pub fn floats_to_back(&self) -> bool {
        matches!(self, CommentNode::Command(_) | CommentNode::Inline(_))
    }

    pub fn as_section(&self) -> Option<&SectionNode> {
        match self {
            CommentNode::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_inline(&self) -> Option<&InlineNode> {
        match self {
            CommentNode::Inline(inline) => Some(inline),
            _ => None,
        }
    }

    pub fn as_command(&self) -> Option<&CommandNode> {
        match self {
            CommentNode::Command(command) => Some(command),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&MarkupTree> {
        match self {
            CommentNode::Block(tree) => Some(tree),
            _ => None,
        }
    }

    /// Whether this is a Markdown block rooted at a paragraph.
    pub fn is_paragraph_block(&self) -> bool {
        match self {
            CommentNode::Block(tree) => {
                matches!(tree.kind(tree.root()), EntityKind::Paragraph)
            }
            _ => false,
        }
    }
}

impl fmt::Display for CommentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentNode::Command(command) => write!(f, "{}", command),
            CommentNode::Section(section) => write!(f, "{}", section),
            CommentNode::Inline(inline) => write!(f, "{}", inline),
            CommentNode::Block(tree) => write!(f, "Block({})", tree.kind(tree.root())),
        }
    }
}

/// The root of one parsed logical comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedComment {
    pub children: Vec<CommentNode>,
}

impl ParsedComment {
    pub fn new(children: Vec<CommentNode>) -> Self {
        ParsedComment { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

fn collect_text(children: &[CommentNode]) -> String {
    let mut parts = Vec::new();
    for child in children {
        if let CommentNode::Block(tree) = child {
            parts.push(tree.plain_text(tree.root()));
        }
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cppdoc_markup::TreeBuilder;

    fn paragraph(text: &str) -> CommentNode {
        let mut builder = TreeBuilder::paragraph();
        builder.text(text).unwrap();
        CommentNode::Block(builder.finish())
    }

    fn list() -> CommentNode {
        let mut builder = TreeBuilder::new(EntityKind::List { ordered: false });
        builder
            .open(EntityKind::ListItem)
            .unwrap()
            .paragraph_text("item")
            .unwrap()
            .close()
            .unwrap();
        CommentNode::Block(builder.finish())
    }

    #[test]
    fn test_plain_section_takes_single_paragraph() {
        let mut section = SectionNode::new(SectionKind::Effects, None, 1);
        assert!(section.accepts(&paragraph("body")));
        section.push(paragraph("body"));
        assert!(!section.accepts(&paragraph("second")));
        assert!(!section.accepts(&list()));
    }

    #[test]
    fn test_details_takes_any_block() {
        let mut section = SectionNode::new(SectionKind::Details, None, 1);
        section.push(paragraph("intro"));
        assert!(section.accepts(&list()));
        section.push(list());
        assert_eq!(section.children.len(), 2);
    }

    #[test]
    fn test_inline_containment() {
        let inline = InlineNode::new(InlineKind::Param, "x", 1);
        assert!(inline.accepts(&paragraph("body")));
        assert!(inline.accepts(&CommentNode::Command(CommandNode::new(
            CommandKind::Exclude,
            "",
            1
        ))));
        assert!(!inline.accepts(&list()));
        assert!(!inline.accepts(&CommentNode::Inline(InlineNode::new(
            InlineKind::Param,
            "y",
            2
        ))));
    }

    #[test]
    fn test_section_text() {
        let mut section = SectionNode::new(SectionKind::Returns, None, 1);
        section.push(paragraph("The sum."));
        assert_eq!(section.text(), "The sum.");
    }
}
