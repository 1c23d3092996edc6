//! Postprocessing passes over a parsed comment tree
//!
//! Two passes run once per comment root and recursively once per inline
//! node:
//!
//! 1. **Reordering**: every command and inline node is stably relocated
//!    to the end of the child list; ordinary content and sections keep
//!    their document order in front, and the floated nodes keep their
//!    relative order among themselves.
//! 2. **Brief/details inference**: the first plain paragraph becomes an
//!    implicit brief section, split at its first line break with the
//!    overflow pushed into the details section immediately following
//!    (created if absent); every other non-details section likewise
//!    truncates at its first line break; later ordinary blocks wrap into
//!    the adjacent details section.
//!
//! Both passes plan a fresh child list and materialize it, instead of
//! rewriting the tree in place while iterating it.

use crate::ast::{CommentNode, ParsedComment, SectionNode};
use crate::commands::SectionKind;
use cppdoc_markup::{EntityKind, MarkupTree};
use std::iter::Peekable;

/// Run both passes over a parsed comment.
pub fn postprocess(comment: ParsedComment) -> ParsedComment {
    ParsedComment::new(postprocess_children(comment.children))
}

fn postprocess_children(children: Vec<CommentNode>) -> Vec<CommentNode> {
    // Pass 1: stable partition floats commands and inlines to the back.
    let (body, tail): (Vec<CommentNode>, Vec<CommentNode>) = children
        .into_iter()
        .partition(|node| !node.floats_to_back());

    // Pass 2: brief/details inference over the ordinary content.
    let mut result = infer_brief_details(body);

    // Inline nodes are self-contained mini-comments: recurse with an
    // independent implicit-brief flag.
    for node in tail {
        match node {
            CommentNode::Inline(mut inline) => {
                let children = std::mem::take(&mut inline.children);
                inline.children = postprocess_children(children);
                result.push(CommentNode::Inline(inline));
            }
            other => result.push(other),
        }
    }
    result
}

fn infer_brief_details(body: Vec<CommentNode>) -> Vec<CommentNode> {
    let mut result: Vec<CommentNode> = Vec::new();
    let mut needs_brief = true;
    // Overflow paragraphs waiting for the details section that follows.
    let mut carry: Vec<MarkupTree> = Vec::new();
    let mut iter = body.into_iter().peekable();

    while let Some(node) = iter.next() {
        match node {
            CommentNode::Section(section) if section.kind == SectionKind::Brief => {
                // An explicit brief satisfies the flag; its content stays
                // as written.
                needs_brief = false;
                result.push(CommentNode::Section(section));
            }

            CommentNode::Section(mut section) if section.kind == SectionKind::Details => {
                for paragraph in carry.drain(..) {
                    section.push(CommentNode::Block(paragraph));
                }
                result.push(CommentNode::Section(section));
            }

            CommentNode::Section(mut section) => {
                let overflow = split_section_paragraph(&mut section);
                result.push(CommentNode::Section(section));
                dispatch_overflow(overflow, &mut iter, &mut result, &mut carry);
            }

            CommentNode::Block(tree)
                if needs_brief && matches!(tree.kind(tree.root()), EntityKind::Paragraph) =>
            {
                needs_brief = false;
                let (head, overflow) = split_paragraph_at_break(&tree);
                let mut brief = SectionNode::new(SectionKind::Brief, None, 0);
                brief.push(CommentNode::Block(head));
                result.push(CommentNode::Section(brief));
                dispatch_overflow(overflow, &mut iter, &mut result, &mut carry);
            }

            CommentNode::Block(tree) => {
                append_block_to_details(&mut result, tree);
            }

            // Commands and inlines were floated out before this pass.
            other => result.push(other),
        }
    }

    // Carried overflow only exists while a details section is next; if
    // the input ended right after a split, materialize it anyway.
    if !carry.is_empty() {
        let mut details = SectionNode::new(SectionKind::Details, None, 0);
        for paragraph in carry {
            details.push(CommentNode::Block(paragraph));
        }
        result.push(CommentNode::Section(details));
    }

    result
}

/// Route a split-off overflow paragraph: into the details section that
/// immediately follows if there is one, else into a fresh details section
/// right here.
fn dispatch_overflow<I>(
    overflow: Option<MarkupTree>,
    iter: &mut Peekable<I>,
    result: &mut Vec<CommentNode>,
    carry: &mut Vec<MarkupTree>,
) where
    I: Iterator<Item = CommentNode>,
{
    let Some(paragraph) = overflow else {
        return;
    };
    if let Some(CommentNode::Section(next)) = iter.peek() {
        if next.kind == SectionKind::Details {
            carry.push(paragraph);
            return;
        }
    }
    let mut details = SectionNode::new(SectionKind::Details, None, 0);
    details.push(CommentNode::Block(paragraph));
    result.push(CommentNode::Section(details));
}

/// Append an ordinary block to the details section it sits next to,
/// creating one when there is none.
fn append_block_to_details(result: &mut Vec<CommentNode>, tree: MarkupTree) {
    if let Some(CommentNode::Section(last)) = result.last_mut() {
        if last.kind == SectionKind::Details {
            last.push(CommentNode::Block(tree));
            return;
        }
    }
    let mut details = SectionNode::new(SectionKind::Details, None, 0);
    details.push(CommentNode::Block(tree));
    result.push(CommentNode::Section(details));
}

/// Truncate a non-details section at its paragraph's first line break,
/// returning the overflow as a fresh paragraph.
fn split_section_paragraph(section: &mut SectionNode) -> Option<MarkupTree> {
    let first = section.children.first()?;
    let CommentNode::Block(tree) = first else {
        return None;
    };
    if !matches!(tree.kind(tree.root()), EntityKind::Paragraph) {
        return None;
    }
    let (head, overflow) = split_paragraph_at_break(tree);
    if overflow.is_some() {
        section.children[0] = CommentNode::Block(head);
    }
    overflow
}

/// Split a paragraph at its first soft/hard line break. Returns the head
/// paragraph and, if the break existed, the overflow paragraph.
fn split_paragraph_at_break(tree: &MarkupTree) -> (MarkupTree, Option<MarkupTree>) {
    let root = tree.root();
    let children = tree.children(root);
    let break_index = children
        .iter()
        .position(|&child| tree.kind(child).is_line_break());

    let Some(index) = break_index else {
        return (tree.clone(), None);
    };

    let head = paragraph_from(tree, &children[..index]);
    let tail_children = &children[index + 1..];
    let tail = if tail_children.is_empty() {
        None
    } else {
        Some(paragraph_from(tree, tail_children))
    };
    (head, tail)
}

/// Materialize a fresh paragraph from a slice of phrasing node ids.
fn paragraph_from(source: &MarkupTree, children: &[cppdoc_markup::NodeId]) -> MarkupTree {
    let mut paragraph = MarkupTree::new(EntityKind::Paragraph);
    let root = paragraph.root();
    for &child in children {
        // Phrasing under a paragraph always satisfies containment.
        let _ = paragraph.append_subtree(root, source, child);
    }
    paragraph
}
