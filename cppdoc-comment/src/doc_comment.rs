//! The finished doc-comment model
//!
//! A [`DocComment`] is what one logical comment produces for one target:
//! metadata plus an ordered list of documentation sections, each carrying
//! a markup body. The brief is the first section of kind `Brief`, so
//! merging two comments for the same target can honestly concatenate the
//! section lists without dropping anything.

use crate::commands::SectionKind;
use crate::metadata::Metadata;
use cppdoc_markup::{EntityKind, MarkupTree, TreeBuilder};
use std::fmt;

/// One documentation section: kind, optional key, markup body.
///
/// The body is rooted at a markup `Section` node named after the kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DocSection {
    pub kind: SectionKind,
    /// Key of a `\section key - ...` key/value section.
    pub key: Option<String>,
    pub body: MarkupTree,
}

impl DocSection {
    pub fn new(kind: SectionKind, key: Option<String>, body: MarkupTree) -> Self {
        DocSection { kind, key, body }
    }

    /// Build a section whose body is a single text paragraph.
    pub fn from_text(kind: SectionKind, text: &str) -> Self {
        let mut builder = TreeBuilder::new(EntityKind::Section {
            name: kind.default_spelling().to_string(),
            id: None,
        });
        // A section body paragraph always satisfies containment.
        let _ = builder.paragraph_text(text);
        DocSection::new(kind, None, builder.finish())
    }

    /// Concatenated text content of the body.
    pub fn text(&self) -> String {
        self.body.plain_text(self.body.root())
    }
}

impl fmt::Display for DocSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "DocSection({}, key '{}')", self.kind, key),
            None => write!(f, "DocSection({})", self.kind),
        }
    }
}

/// The finished artifact of parsing one logical comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocComment {
    metadata: Metadata,
    sections: Vec<DocSection>,
}

impl DocComment {
    pub fn new() -> Self {
        DocComment::default()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn sections(&self) -> &[DocSection] {
        &self.sections
    }

    pub fn push_section(&mut self, section: DocSection) {
        self.sections.push(section);
    }

    /// The brief section: the first section of kind `Brief`, if any.
    pub fn brief(&self) -> Option<&DocSection> {
        self.sections
            .iter()
            .find(|section| section.kind == SectionKind::Brief)
    }

    /// Whether a brief section is already present.
    pub fn has_brief(&self) -> bool {
        self.brief().is_some()
    }

    /// Merge a later comment for the same target into this one.
    ///
    /// Metadata merges per field, first registered wins; sections from the
    /// later comment are appended after the existing ones; content never
    /// overwrites, it accumulates.
    pub fn merge(&mut self, later: DocComment) {
        self.metadata.merge_from(later.metadata);
        self.sections.extend(later.sections);
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.sections.is_empty()
    }
}

impl fmt::Display for DocComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocComment({} sections)", self.sections.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_is_first_brief_section() {
        let mut comment = DocComment::new();
        comment.push_section(DocSection::from_text(SectionKind::Details, "d"));
        comment.push_section(DocSection::from_text(SectionKind::Brief, "first"));
        comment.push_section(DocSection::from_text(SectionKind::Brief, "second"));

        assert_eq!(comment.brief().map(|s| s.text()), Some("first".to_string()));
    }

    #[test]
    fn test_merge_concatenates_sections() {
        let mut first = DocComment::new();
        first.push_section(DocSection::from_text(SectionKind::Brief, "a"));

        let mut second = DocComment::new();
        second.push_section(DocSection::from_text(SectionKind::Returns, "b"));

        first.merge(second);
        let kinds: Vec<SectionKind> = first.sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SectionKind::Brief, SectionKind::Returns]);
    }

    #[test]
    fn test_merge_metadata_first_wins() {
        let mut first = DocComment::new();
        first.metadata_mut().set_unique_name("kept");

        let mut second = DocComment::new();
        second.metadata_mut().set_unique_name("dropped");
        second.metadata_mut().set_module("m");

        first.merge(second);
        assert_eq!(first.metadata().unique_name(), Some("kept"));
        assert_eq!(first.metadata().module(), Some("m"));
    }
}
