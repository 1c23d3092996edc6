//! Parse diagnostics
//!
//! Semantic problems found while interpreting a comment (duplicate
//! metadata commands, conflicting targets) are collected here rather than
//! raised: grammar-level mismatches are silent by design, interpretation
//! continues past every reported conflict with a defined fallback, and
//! nothing in the engine aborts a run. Callers drain the sink and decide
//! whether warnings fail the build.

use std::fmt;

/// How serious a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A source location, 1-based line inside a named file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
    pub file: String,
    pub line: usize,
}

impl SourcePos {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        SourcePos {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub pos: SourcePos,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.pos, self.severity, self.message)
    }
}

/// Collecting sink for diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn warn(&mut self, pos: SourcePos, message: impl Into<String>) {
        self.items.push(Diagnostic {
            severity: Severity::Warning,
            pos,
            message: message.into(),
        });
    }

    pub fn error(&mut self, pos: SourcePos, message: impl Into<String>) {
        self.items.push(Diagnostic {
            severity: Severity::Error,
            pos,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.severity == Severity::Error)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

/// Format source code context around a diagnostic line.
///
/// Shows two lines before the line, the line itself with a >> marker, and
/// two lines after, all numbered.
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_index = line.saturating_sub(1);

    let start = error_index.saturating_sub(2);
    let end = (error_index + 3).min(lines.len());

    let mut context = String::new();
    for index in start..end {
        let marker = if index == error_index { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, index + 1, lines[index]));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut sink = Diagnostics::new();
        sink.warn(SourcePos::new("a.hpp", 3), "first");
        sink.error(SourcePos::new("a.hpp", 9), "second");

        assert_eq!(sink.len(), 2);
        assert!(sink.has_errors());
        let rendered: Vec<String> = sink.iter().map(|d| d.to_string()).collect();
        assert_eq!(rendered[0], "a.hpp:3: warning: first");
        assert_eq!(rendered[1], "a.hpp:9: error: second");
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nbad line\nline 5\nline 6";
        let context = format_source_context(source, 4);
        assert!(context.contains(">>   4 | bad line"));
        assert!(context.contains("line 2"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 1"));
    }
}
