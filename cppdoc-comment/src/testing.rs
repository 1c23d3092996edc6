//! Assertion helpers for comment trees
//!
//! Fluent helpers for verifying parsed comment structure in tests,
//! closure-scoped per node so failures name the path that broke:
//!
//! ```ignore
//! assert_comment(&parsed)
//!     .child_count(2)
//!     .section(0, |section| {
//!         section.kind(SectionKind::Brief).text("Short.");
//!     });
//! ```

use crate::ast::{CommandNode, CommentNode, InlineNode, ParsedComment, SectionNode};
use crate::commands::{CommandKind, InlineKind, SectionKind};
use cppdoc_markup::MarkupTree;

pub fn assert_comment(parsed: &ParsedComment) -> ParsedCommentAssert<'_> {
    ParsedCommentAssert {
        children: &parsed.children,
    }
}

pub struct ParsedCommentAssert<'a> {
    children: &'a [CommentNode],
}

impl<'a> ParsedCommentAssert<'a> {
    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.children.len(),
            expected,
            "expected {} children, found: {:?}",
            expected,
            self.children.iter().map(|c| c.to_string()).collect::<Vec<_>>()
        );
        self
    }

    pub fn section(self, index: usize, check: impl FnOnce(SectionAssert<'_>)) -> Self {
        let node = &self.children[index];
        match node {
            CommentNode::Section(section) => check(SectionAssert { section }),
            other => panic!("child {} is {}, expected a section", index, other),
        }
        self
    }

    pub fn inline(self, index: usize, check: impl FnOnce(InlineAssert<'_>)) -> Self {
        let node = &self.children[index];
        match node {
            CommentNode::Inline(inline) => check(InlineAssert { inline }),
            other => panic!("child {} is {}, expected an inline", index, other),
        }
        self
    }

    pub fn command(self, index: usize, check: impl FnOnce(CommandAssert<'_>)) -> Self {
        let node = &self.children[index];
        match node {
            CommentNode::Command(command) => check(CommandAssert { command }),
            other => panic!("child {} is {}, expected a command", index, other),
        }
        self
    }

    pub fn block(self, index: usize, check: impl FnOnce(BlockAssert<'_>)) -> Self {
        let node = &self.children[index];
        match node {
            CommentNode::Block(tree) => check(BlockAssert { tree }),
            other => panic!("child {} is {}, expected a markdown block", index, other),
        }
        self
    }
}

pub struct SectionAssert<'a> {
    section: &'a SectionNode,
}

impl<'a> SectionAssert<'a> {
    pub fn kind(self, expected: SectionKind) -> Self {
        assert_eq!(self.section.kind, expected, "section kind mismatch");
        self
    }

    pub fn key(self, expected: Option<&str>) -> Self {
        assert_eq!(self.section.key.as_deref(), expected, "section key mismatch");
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.section.text(), expected, "section text mismatch");
        self
    }

    pub fn text_contains(self, expected: &str) -> Self {
        let text = self.section.text();
        assert!(
            text.contains(expected),
            "section text '{}' does not contain '{}'",
            text,
            expected
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.section.children.len(),
            expected,
            "section child count mismatch"
        );
        self
    }
}

pub struct InlineAssert<'a> {
    inline: &'a InlineNode,
}

impl<'a> InlineAssert<'a> {
    pub fn kind(self, expected: InlineKind) -> Self {
        assert_eq!(self.inline.kind, expected, "inline kind mismatch");
        self
    }

    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.inline.name, expected, "inline name mismatch");
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.inline.children.len(),
            expected,
            "inline child count mismatch, children: {:?}",
            self.inline
                .children
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
        );
        self
    }

    pub fn section(self, index: usize, check: impl FnOnce(SectionAssert<'_>)) -> Self {
        match &self.inline.children[index] {
            CommentNode::Section(section) => check(SectionAssert { section }),
            other => panic!("inline child {} is {}, expected a section", index, other),
        }
        self
    }
}

pub struct CommandAssert<'a> {
    command: &'a CommandNode,
}

impl<'a> CommandAssert<'a> {
    pub fn kind(self, expected: CommandKind) -> Self {
        assert_eq!(self.command.kind, expected, "command kind mismatch");
        self
    }

    pub fn arguments(self, expected: &str) -> Self {
        assert_eq!(self.command.arguments, expected, "command arguments mismatch");
        self
    }
}

pub struct BlockAssert<'a> {
    tree: &'a MarkupTree,
}

impl<'a> BlockAssert<'a> {
    pub fn root(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.kind(self.tree.root()).name(),
            expected,
            "block root kind mismatch"
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.plain_text(self.tree.root()),
            expected,
            "block text mismatch"
        );
        self
    }
}
