//! Markdown import (CommonMark → markup fragments)
//!
//! Ordinary comment content is CommonMark, parsed with comrak. The comrak
//! AST is first flattened into a stream of [`Event`]s, then materialized
//! into [`MarkupTree`] fragments, one fragment per top-level block. The
//! two phases keep the conversion free of any modify-while-iterating
//! hazards and give the materializer one place to enforce containment.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use cppdoc_markup::{EntityKind, MarkupTree, TreeBuilder};

/// Flat event stream for one block of comment content.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartParagraph,
    EndParagraph,
    StartHeading(u8),
    EndHeading(u8),
    StartList { ordered: bool },
    EndList,
    StartItem,
    EndItem,
    StartBlockQuote,
    EndBlockQuote,
    CodeBlock {
        language: Option<String>,
        literal: String,
    },
    ThematicBreak,
    StartEmphasis,
    EndEmphasis,
    StartStrong,
    EndStrong,
    StartLink {
        url: String,
        title: String,
    },
    EndLink,
    Text(String),
    CodeSpan(String),
    SoftBreak,
    HardBreak,
}

/// Parse `text` as CommonMark and return one fragment per top-level block.
pub fn parse_blocks(text: &str) -> Vec<MarkupTree> {
    let arena = Arena::new();
    let options = comrak_options();
    let root = parse_document(&arena, text, &options);

    let mut fragments = Vec::new();
    for child in root.children() {
        let mut events = Vec::new();
        collect_block_events(child, &mut events);
        if let Some(fragment) = materialize(&events) {
            fragments.push(fragment);
        }
    }
    fragments
}

fn comrak_options() -> ComrakOptions<'static> {
    // Plain CommonMark; the directive layer is ours, not comrak's.
    ComrakOptions::default()
}

// ============================================================================
// Phase 1: comrak AST → events
// ============================================================================

fn collect_block_events<'a>(node: &'a AstNode<'a>, events: &mut Vec<Event>) {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Document => {
            for child in node.children() {
                collect_block_events(child, events);
            }
        }

        NodeValue::Paragraph => {
            events.push(Event::StartParagraph);
            for child in node.children() {
                collect_inline_events(child, events);
            }
            events.push(Event::EndParagraph);
        }

        NodeValue::Heading(heading) => {
            events.push(Event::StartHeading(heading.level));
            for child in node.children() {
                collect_inline_events(child, events);
            }
            events.push(Event::EndHeading(heading.level));
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, comrak::nodes::ListType::Ordered);
            events.push(Event::StartList { ordered });
            for child in node.children() {
                collect_block_events(child, events);
            }
            events.push(Event::EndList);
        }

        NodeValue::Item(_) => {
            events.push(Event::StartItem);
            for child in node.children() {
                collect_block_events(child, events);
            }
            events.push(Event::EndItem);
        }

        NodeValue::CodeBlock(code_block) => {
            let language = if code_block.info.is_empty() {
                None
            } else {
                Some(code_block.info.clone())
            };
            events.push(Event::CodeBlock {
                language,
                literal: code_block.literal.clone(),
            });
        }

        NodeValue::BlockQuote => {
            events.push(Event::StartBlockQuote);
            for child in node.children() {
                collect_block_events(child, events);
            }
            events.push(Event::EndBlockQuote);
        }

        NodeValue::ThematicBreak => {
            events.push(Event::ThematicBreak);
        }

        // HTML blocks and anything exotic have no counterpart here.
        _ => {}
    }
}

fn collect_inline_events<'a>(node: &'a AstNode<'a>, events: &mut Vec<Event>) {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Text(text) => events.push(Event::Text(text.clone())),

        NodeValue::Emph => {
            events.push(Event::StartEmphasis);
            for child in node.children() {
                collect_inline_events(child, events);
            }
            events.push(Event::EndEmphasis);
        }

        NodeValue::Strong => {
            events.push(Event::StartStrong);
            for child in node.children() {
                collect_inline_events(child, events);
            }
            events.push(Event::EndStrong);
        }

        NodeValue::Code(code) => events.push(Event::CodeSpan(code.literal.clone())),

        NodeValue::Link(link) => {
            events.push(Event::StartLink {
                url: link.url.clone(),
                title: link.title.clone(),
            });
            for child in node.children() {
                collect_inline_events(child, events);
            }
            events.push(Event::EndLink);
        }

        NodeValue::SoftBreak => events.push(Event::SoftBreak),
        NodeValue::LineBreak => events.push(Event::HardBreak),

        _ => {}
    }
}

// ============================================================================
// Phase 2: events → markup fragment
// ============================================================================

/// Materialize one block's event stream into a fragment rooted at that
/// block. Events violating containment are dropped together with their
/// subtree; the builder never panics.
fn materialize(events: &[Event]) -> Option<MarkupTree> {
    let mut iter = events.iter();
    let root_kind = match iter.next()? {
        Event::StartParagraph => EntityKind::Paragraph,
        Event::StartHeading(level) => EntityKind::Heading { level: *level },
        Event::StartList { ordered } => EntityKind::List { ordered: *ordered },
        Event::StartBlockQuote => EntityKind::BlockQuote,
        Event::CodeBlock { language, literal } => {
            return Some(MarkupTree::new(EntityKind::CodeBlock {
                language: language.clone(),
                literal: literal.clone(),
            }));
        }
        Event::ThematicBreak => return Some(MarkupTree::new(EntityKind::ThematicBreak)),
        // An inline event at block level means the stream is malformed.
        _ => return None,
    };

    let mut writer = FragmentWriter::new(root_kind);
    for event in iter {
        writer.event(event);
    }
    Some(writer.finish())
}

struct FragmentWriter {
    builder: TreeBuilder,
    depth: usize,
    /// Nesting level of a subtree dropped for containment reasons.
    suppressed: usize,
}

impl FragmentWriter {
    fn new(root_kind: EntityKind) -> Self {
        FragmentWriter {
            builder: TreeBuilder::new(root_kind),
            depth: 1,
            suppressed: 0,
        }
    }

    fn open(&mut self, kind: EntityKind) {
        if self.suppressed > 0 {
            self.suppressed += 1;
            return;
        }
        if self.builder.open(kind).is_ok() {
            self.depth += 1;
        } else {
            self.suppressed = 1;
        }
    }

    fn close(&mut self) {
        if self.suppressed > 0 {
            self.suppressed -= 1;
            return;
        }
        if self.depth > 1 && self.builder.close().is_ok() {
            self.depth -= 1;
        }
    }

    fn leaf(&mut self, kind: EntityKind) {
        if self.suppressed > 0 {
            return;
        }
        let _ = self.builder.leaf(kind);
    }

    fn event(&mut self, event: &Event) {
        match event {
            Event::StartParagraph => self.open(EntityKind::Paragraph),
            Event::EndParagraph => self.close(),
            Event::StartHeading(level) => self.open(EntityKind::Heading { level: *level }),
            Event::EndHeading(_) => self.close(),
            Event::StartList { ordered } => self.open(EntityKind::List { ordered: *ordered }),
            Event::EndList => self.close(),
            Event::StartItem => self.open(EntityKind::ListItem),
            Event::EndItem => self.close(),
            Event::StartBlockQuote => self.open(EntityKind::BlockQuote),
            Event::EndBlockQuote => self.close(),
            Event::CodeBlock { language, literal } => self.leaf(EntityKind::CodeBlock {
                language: language.clone(),
                literal: literal.clone(),
            }),
            Event::ThematicBreak => self.leaf(EntityKind::ThematicBreak),
            Event::StartEmphasis => self.open(EntityKind::Emphasis),
            Event::EndEmphasis => self.close(),
            Event::StartStrong => self.open(EntityKind::Strong),
            Event::EndStrong => self.close(),
            Event::StartLink { url, title } => self.open(EntityKind::Link {
                url: url.clone(),
                title: title.clone(),
            }),
            Event::EndLink => self.close(),
            Event::Text(text) => self.leaf(EntityKind::Text(text.clone())),
            Event::CodeSpan(code) => self.leaf(EntityKind::CodeSpan(code.clone())),
            Event::SoftBreak => self.leaf(EntityKind::SoftBreak),
            Event::HardBreak => self.leaf(EntityKind::HardBreak),
        }
    }

    fn finish(self) -> MarkupTree {
        self.builder.finish()
    }
}
