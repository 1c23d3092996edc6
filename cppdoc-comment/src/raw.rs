//! Raw comment extraction
//!
//! Scans C++ source text for documentation comments and merges adjacent
//! ones into logical comments. Three styles are recognized:
//!
//! - `/// ...` line chains; consecutive lines merge into one comment;
//! - `//< ...` end-of-line comments, which document the declaration on
//!   the same line and merge only with an immediately following `///`
//!   chain (the merged comment keeps the end-of-line style);
//! - `/** ... */` blocks, which never merge with neighbors.
//!
//! Plain comments, string literals, and character literals are lexed and
//! skipped so comment markers inside them cannot produce false positives.

use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum SourceToken {
    #[regex(r"///[^\n]*", priority = 5)]
    DocLine,

    #[regex(r"//<[^\n]*", priority = 5)]
    EndOfLineDoc,

    #[regex(r"/\*\*([^*]|\*+[^*/])*\*+/", priority = 5)]
    DocBlock,

    #[regex(r"//[^\n]*", priority = 3)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", priority = 3)]
    BlockComment,

    #[regex(r#""([^"\\\n]|\\.)*""#, priority = 3)]
    StringLiteral,

    #[regex(r"'([^'\\\n]|\\.)*'", priority = 3)]
    CharLiteral,
}

/// Style of a raw documentation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// A `///` chain; documents the following declaration.
    Line,
    /// A `//<` comment; documents the declaration on the same line.
    EndOfLine,
    /// A `/** ... */` block; documents the following declaration.
    Block,
}

impl fmt::Display for CommentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentStyle::Line => write!(f, "///"),
            CommentStyle::EndOfLine => write!(f, "//<"),
            CommentStyle::Block => write!(f, "/** */"),
        }
    }
}

/// One raw (or merged logical) documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub style: CommentStyle,
    /// Marker-stripped comment text.
    pub text: String,
    /// 1-based line of the first comment line.
    pub start_line: usize,
    /// 1-based line of the last comment line.
    pub end_line: usize,
}

/// Byte-offset to line-number conversion, binary-searched.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(offset + 1);
            }
        }
        LineIndex { starts }
    }

    /// 1-based line containing the byte at `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

/// Scan source text for raw doc comments, unmerged, in source order.
pub fn scan_comments(source: &str) -> Vec<RawComment> {
    let index = LineIndex::new(source);
    let mut comments = Vec::new();
    let mut lexer = SourceToken::lexer(source);

    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            continue;
        };
        let span = lexer.span();
        let slice = lexer.slice();
        let (style, text) = match token {
            SourceToken::DocLine => (CommentStyle::Line, strip_line_marker(slice, "///")),
            SourceToken::EndOfLineDoc => {
                (CommentStyle::EndOfLine, strip_line_marker(slice, "//<"))
            }
            SourceToken::DocBlock => (CommentStyle::Block, strip_block_markers(slice)),
            _ => continue,
        };
        comments.push(RawComment {
            style,
            text,
            start_line: index.line_of(span.start),
            end_line: index.line_of(span.end.saturating_sub(1)),
        });
    }
    comments
}

/// Merge adjacent raw comments of compatible styles into logical ones.
pub fn merge_comments(comments: Vec<RawComment>) -> Vec<RawComment> {
    let mut merged: Vec<RawComment> = Vec::new();
    for comment in comments {
        if let Some(last) = merged.last_mut() {
            if can_merge(last, &comment) {
                last.text.push('\n');
                last.text.push_str(&comment.text);
                last.end_line = comment.end_line;
                continue;
            }
        }
        merged.push(comment);
    }
    merged
}

/// Scan and merge in one step.
pub fn extract_comments(source: &str) -> Vec<RawComment> {
    merge_comments(scan_comments(source))
}

/// `///` chains absorb following `///` lines; an `//<` comment absorbs
/// only an immediately following `///` chain. Blocks never merge.
fn can_merge(first: &RawComment, second: &RawComment) -> bool {
    second.start_line == first.end_line + 1
        && second.style == CommentStyle::Line
        && matches!(first.style, CommentStyle::Line | CommentStyle::EndOfLine)
}

fn strip_line_marker(slice: &str, marker: &str) -> String {
    let text = slice.strip_prefix(marker).unwrap_or(slice);
    text.strip_prefix(' ').unwrap_or(text).to_string()
}

fn strip_block_markers(slice: &str) -> String {
    // Drop the /** and */ fences.
    let inner = slice
        .strip_prefix("/**")
        .and_then(|s| s.strip_suffix("*/"))
        .unwrap_or(slice);

    let mut lines: Vec<String> = inner
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                // Content directly after the opening fence.
                return line.strip_prefix(' ').unwrap_or(line).to_string();
            }
            // Continuation lines may carry a leading decoration star.
            let trimmed = line.trim_start();
            let without_star = trimmed.strip_prefix('*').unwrap_or(trimmed);
            without_star.strip_prefix(' ').unwrap_or(without_star).to_string()
        })
        .collect();

    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_chain_merges() {
        let source = "/// first line\n/// second line\nint x;\n";
        let comments = extract_comments(source);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].style, CommentStyle::Line);
        assert_eq!(comments[0].text, "first line\nsecond line");
        assert_eq!(comments[0].start_line, 1);
        assert_eq!(comments[0].end_line, 2);
    }

    #[test]
    fn test_separated_chains_stay_apart() {
        let source = "/// first\nint x;\n/// second\nint y;\n";
        let comments = extract_comments(source);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "first");
        assert_eq!(comments[1].text, "second");
    }

    #[test]
    fn test_end_of_line_merges_with_following_chain() {
        let source = "int x; //< the x\n/// and more about it\n";
        let comments = extract_comments(source);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].style, CommentStyle::EndOfLine);
        assert_eq!(comments[0].text, "the x\nand more about it");
    }

    #[test]
    fn test_line_chain_does_not_absorb_end_of_line() {
        let source = "/// docs\nint x; //< tail\n";
        let comments = extract_comments(source);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].style, CommentStyle::Line);
        assert_eq!(comments[1].style, CommentStyle::EndOfLine);
    }

    #[test]
    fn test_block_comment_never_merges() {
        let source = "/** block docs */\n/// line docs\n";
        let comments = extract_comments(source);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].style, CommentStyle::Block);
        assert_eq!(comments[0].text, "block docs");
        assert_eq!(comments[1].style, CommentStyle::Line);
    }

    #[test]
    fn test_block_star_decoration_is_stripped() {
        let source = "/**\n * line one\n * line two\n */\nint x;\n";
        let comments = extract_comments(source);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "line one\nline two");
        assert_eq!(comments[0].start_line, 1);
        assert_eq!(comments[0].end_line, 4);
    }

    #[test]
    fn test_plain_comments_are_skipped() {
        let source = "// not docs\n/* also not docs */\nint x;\n";
        assert!(extract_comments(source).is_empty());
    }

    #[test]
    fn test_markers_inside_strings_are_ignored() {
        let source = "const char* s = \"/// not a comment\";\n/// real docs\n";
        let comments = extract_comments(source);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "real docs");
        assert_eq!(comments[0].start_line, 2);
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("ab\ncd\nef");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 1);
        assert_eq!(index.line_of(3), 2);
        assert_eq!(index.line_of(6), 3);
    }
}
