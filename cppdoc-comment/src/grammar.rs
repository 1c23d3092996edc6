//! The comment grammar extension
//!
//! Recognizes the three custom node kinds (commands, sections, inlines)
//! layered on CommonMark. The scanner walks the logical comment line by
//! line, reproducing the underlying block parser's open/continue protocol:
//!
//! - a directive line opens a new block only where the enclosing container
//!   is the document, a paragraph at document level, or an inline node,
//!   never inside a fenced code block or a list/quote continuation;
//! - sections never continue across lines; their single paragraph is
//!   extended by ordinary lazy-continuation lines and closed by a blank
//!   line, a directive, or a paragraph-interrupting line;
//! - only inline nodes are extensible: a following line starting with the
//!   command character is re-dispatched: commands stay inside the inline,
//!   while a fresh section or inline is no acceptable child and closes the
//!   node; a plain line stays inside only while the inline is still empty
//!   or its last child is a command;
//! - everything else accumulates as ordinary Markdown and is handed to
//!   comrak in block runs.
//!
//! Unrecognized command words are not errors; the line falls through to
//! plain Markdown unchanged.

use crate::ast::{CommandNode, CommentNode, InlineNode, ParsedComment, SectionNode};
use crate::config::CommentConfig;
use crate::markdown;
use crate::raw::RawComment;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lines that open a non-paragraph block in CommonMark and therefore
/// interrupt an open paragraph: list markers, headings, quotes, fences,
/// thematic breaks.
static INTERRUPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^ {0,3}(?:[-+*](?:[ \t]|$)|\d{1,9}[.)](?:[ \t]|$)|#{1,6}(?:[ \t]|$)|>|(?:\*[ \t]*){3,}$|(?:-[ \t]*){3,}$|(?:_[ \t]*){3,}$|```|~~~)",
    )
    .expect("interrupt pattern is valid")
});

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(?:```|~~~)").expect("fence pattern is valid"));

/// `key -` prefix of a section body: a bare word, whitespace, a literal
/// dash, then whitespace or end of line.
static SECTION_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)[ \t]+-(?:[ \t]+|$)").expect("key pattern is valid"));

/// Parse one logical comment into its comment tree.
///
/// `start_line` is the 1-based source line of the first comment line and
/// is carried into the nodes for diagnostics.
pub fn parse_comment(text: &str, start_line: usize, config: &CommentConfig) -> ParsedComment {
    let mut scanner = Scanner::new(config);
    for (index, line) in text.lines().enumerate() {
        scanner.process_line(line, start_line + index);
    }
    scanner.finish()
}

/// Parse an extracted raw comment.
pub fn parse_raw_comment(raw: &RawComment, config: &CommentConfig) -> ParsedComment {
    parse_comment(&raw.text, raw.start_line, config)
}

/// Shape of the block currently open in the document-level Markdown run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// No block open (start, or right after a blank line).
    None,
    /// An ordinary paragraph is open; a directive may interrupt it.
    Paragraph,
    /// A list/quote/code continuation is open; directives do not match.
    Other,
}

struct Scanner<'a> {
    config: &'a CommentConfig,
    out: Vec<CommentNode>,

    open_inline: Option<InlineNode>,
    /// Open paragraph directly inside the open inline.
    inline_para: Vec<String>,

    open_section: Option<SectionNode>,
    section_para: Vec<String>,

    /// Ordinary Markdown run at document level.
    md_buf: Vec<String>,
    open_shape: Shape,
    in_fence: bool,
}

impl<'a> Scanner<'a> {
    fn new(config: &'a CommentConfig) -> Self {
        Scanner {
            config,
            out: Vec::new(),
            open_inline: None,
            inline_para: Vec::new(),
            open_section: None,
            section_para: Vec::new(),
            md_buf: Vec::new(),
            open_shape: Shape::None,
            in_fence: false,
        }
    }

    fn process_line(&mut self, line: &str, src_line: usize) {
        if self.in_fence {
            self.md_buf.push(line.to_string());
            if FENCE_RE.is_match(line) {
                self.in_fence = false;
                self.open_shape = Shape::None;
            }
            return;
        }

        // A directive never matches inside an open list/quote run: there
        // the enclosing container is not the document or a document-level
        // paragraph.
        let in_special = self.open_section.is_some() || self.open_inline.is_some();
        let allow_directive = in_special || self.open_shape != Shape::Other;

        if allow_directive {
            if let Some((directive, rest)) = match_directive(line, self.config) {
                self.handle_directive(directive, &rest, src_line);
                return;
            }
        }

        self.handle_plain(line);
    }

    // ------------------------------------------------------------------
    // Directive handling
    // ------------------------------------------------------------------

    fn handle_directive(&mut self, directive: Directive, rest: &str, src_line: usize) {
        // Sections never continue; an open one closes before anything new.
        self.close_section();

        match directive {
            Directive::Command(kind) => {
                let node = CommentNode::Command(CommandNode::new(kind, rest.trim(), src_line));
                if self.open_inline.is_some() {
                    self.close_inline_para();
                    self.push_inline_child(node);
                } else {
                    self.flush_md();
                    self.out.push(node);
                }
            }

            Directive::Section(kind) => {
                let (key, body) = parse_section_prefix(rest);
                let section = SectionNode::new(kind, key, src_line);
                // A fresh section is not an acceptable child of an open
                // inline; the inline closes and the section opens at
                // document level.
                self.close_inline();
                self.flush_md();
                if body.trim().is_empty() {
                    // No same-line body: the section closes empty.
                    self.out.push(CommentNode::Section(section));
                } else {
                    self.open_section = Some(section);
                    self.section_para.push(body);
                }
            }

            Directive::Inline(kind, name, body) => {
                // Inlines do not nest; a fresh one closes the old node.
                self.close_inline();
                self.flush_md();
                self.open_inline = Some(InlineNode::new(kind, name, src_line));
                if !body.trim().is_empty() {
                    self.inline_para.push(body);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Plain line handling
    // ------------------------------------------------------------------

    fn handle_plain(&mut self, line: &str) {
        let blank = line.trim().is_empty();
        let interrupter = !blank && INTERRUPT_RE.is_match(line);

        if self.open_section.is_some() {
            if blank {
                self.close_section();
                return;
            }
            if !interrupter {
                self.section_para.push(line.to_string());
                return;
            }
            // A paragraph-interrupting line closes the section and falls
            // through to the surrounding container.
            self.close_section();
        }

        if self.open_inline.is_some() {
            if !self.inline_para.is_empty() {
                if blank {
                    self.close_inline_para();
                    return;
                }
                if interrupter {
                    // Lists and friends are not inline children; the
                    // inline closes and the line starts a document block.
                    self.close_inline();
                    self.md_push(line);
                    return;
                }
                self.inline_para.push(line.to_string());
                return;
            }

            if blank {
                return;
            }
            if interrupter {
                self.close_inline();
                self.md_push(line);
                return;
            }

            // last_block_matches: the inline keeps collecting only while
            // it is empty or its last child is a command.
            let matches = self
                .open_inline
                .as_ref()
                .map(|inline| inline.children.is_empty() || inline.last_child_is_command())
                .unwrap_or(false);
            if matches {
                self.inline_para.push(line.to_string());
            } else {
                self.close_inline();
                self.md_push(line);
            }
            return;
        }

        self.md_push(line);
    }

    // ------------------------------------------------------------------
    // Buffers and closing
    // ------------------------------------------------------------------

    fn md_push(&mut self, line: &str) {
        let blank = line.trim().is_empty();
        if blank {
            self.md_buf.push(line.to_string());
            self.open_shape = Shape::None;
            return;
        }

        if self.open_shape == Shape::None {
            if FENCE_RE.is_match(line) {
                self.in_fence = true;
                self.open_shape = Shape::Other;
            } else if is_self_closing_block(line) {
                self.open_shape = Shape::None;
            } else if is_container_block_start(line) {
                self.open_shape = Shape::Other;
            } else {
                self.open_shape = Shape::Paragraph;
            }
        }
        self.md_buf.push(line.to_string());
    }

    fn flush_md(&mut self) {
        if self.md_buf.iter().any(|line| !line.trim().is_empty()) {
            let text = self.md_buf.join("\n");
            for block in markdown::parse_blocks(&text) {
                self.out.push(CommentNode::Block(block));
            }
        }
        self.md_buf.clear();
        self.open_shape = Shape::None;
        self.in_fence = false;
    }

    fn close_section(&mut self) {
        let Some(mut section) = self.open_section.take() else {
            return;
        };
        let body = self.section_para.join("\n");
        self.section_para.clear();

        let mut rejected = Vec::new();
        for block in markdown::parse_blocks(&body) {
            let node = CommentNode::Block(block);
            if section.accepts(&node) {
                section.push(node);
            } else {
                rejected.push(node);
            }
        }

        self.out.push(CommentNode::Section(section));
        // Blocks the section may not contain land in the surrounding
        // container instead.
        self.out.extend(rejected);
    }

    fn close_inline_para(&mut self) {
        if self.inline_para.is_empty() {
            return;
        }
        let body = self.inline_para.join("\n");
        self.inline_para.clear();
        for block in markdown::parse_blocks(&body) {
            let node = CommentNode::Block(block);
            self.push_inline_child(node);
        }
    }

    fn push_inline_child(&mut self, node: CommentNode) {
        match self.open_inline.as_mut() {
            Some(inline) if inline.accepts(&node) => inline.push(node),
            Some(_) => self.out.push(node),
            None => self.out.push(node),
        }
    }

    fn close_inline(&mut self) {
        self.close_inline_para();
        if let Some(inline) = self.open_inline.take() {
            self.out.push(CommentNode::Inline(inline));
        }
    }

    fn finish(mut self) -> ParsedComment {
        self.close_section();
        self.close_inline();
        self.flush_md();
        ParsedComment::new(self.out)
    }
}

/// A matched directive line, with its payload already peeled off.
enum Directive {
    Command(crate::commands::CommandKind),
    Section(crate::commands::SectionKind),
    Inline(crate::commands::InlineKind, String, String),
}

/// Lexically match a directive at the start of `line`.
///
/// Returns the directive and the unconsumed rest of the line. `None`
/// means the line is ordinary Markdown, including unknown command words,
/// which pass through silently.
fn match_directive(line: &str, config: &CommentConfig) -> Option<(Directive, String)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let candidate = &line[indent..];

    let (kind, rest) = if let Some(after) = candidate.strip_prefix(config.command_character()) {
        let word_end = after
            .find(char::is_whitespace)
            .unwrap_or(after.len());
        let word = &after[..word_end];
        let kind = config.lookup(word)?;
        (kind, &after[word_end..])
    } else {
        config.match_bare(candidate)?
    };

    use crate::commands::DirectiveKind;
    match kind {
        DirectiveKind::Command(command) => Some((Directive::Command(command), rest.to_string())),
        DirectiveKind::Section(section) => Some((Directive::Section(section), rest.to_string())),
        DirectiveKind::Inline(inline) => {
            let trimmed = rest.trim_start();
            let name_end = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            let name = &trimmed[..name_end];
            if name.is_empty() {
                // An inline without a referenced name is not a match.
                return None;
            }
            let body = strip_inline_separator(&trimmed[name_end..]);
            Some((
                Directive::Inline(inline, name.to_string(), body.to_string()),
                String::new(),
            ))
        }
    }
}

/// Split an optional `key -` prefix off a section body.
fn parse_section_prefix(rest: &str) -> (Option<String>, String) {
    let rest = rest.trim_start();
    if let Some(captures) = SECTION_KEY_RE.captures(rest) {
        let key = &captures[1];
        if key != "-" {
            let body = rest[captures.get(0).map(|m| m.end()).unwrap_or(0)..].to_string();
            return (Some(key.to_string()), body);
        }
    }
    (None, rest.to_string())
}

/// Consume the optional `-` separator between an inline's name and body.
fn strip_inline_separator(body: &str) -> &str {
    let body = body.trim_start();
    if body == "-" {
        return "";
    }
    if let Some(after) = body.strip_prefix('-') {
        if after.starts_with(char::is_whitespace) {
            return after.trim_start();
        }
    }
    body
}

/// Blocks that begin and end on their own line (headings, thematic
/// breaks): nothing stays open after them.
fn is_self_closing_block(line: &str) -> bool {
    static SELF_CLOSING_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^ {0,3}(?:#{1,6}(?:[ \t]|$)|(?:\*[ \t]*){3,}$|(?:-[ \t]*){3,}$|(?:_[ \t]*){3,}$)")
            .expect("self-closing pattern is valid")
    });
    SELF_CLOSING_RE.is_match(line)
}

/// Blocks that stay open and absorb following lines (lists, quotes,
/// indented code).
fn is_container_block_start(line: &str) -> bool {
    static CONTAINER_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?: {0,3}(?:[-+*](?:[ \t]|$)|\d{1,9}[.)](?:[ \t]|$)|>)| {4,})")
            .expect("container pattern is valid")
    });
    CONTAINER_RE.is_match(line)
}
