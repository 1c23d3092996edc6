//! Matching-entity resolution and command interpretation
//!
//! Walks a postprocessed comment tree and produces the finished
//! [`DocComment`] plus the classification of what the comment documents.
//! Exactly one thing may move the target away from the attached entity:
//! `\entity` (a named remote declaration), `\file` (the current file), or
//! an inline node (a parameter/template-parameter/base, scoped to that
//! node only; inline nodes are interpreted as self-contained
//! mini-comments with their own doc comment).
//!
//! Conflicts (a repeated metadata command, a second brief, a second
//! target) are reported through the diagnostics sink and resolved by
//! keeping the first write.

use crate::ast::{CommandNode, CommentNode, InlineNode, ParsedComment, SectionNode};
use crate::commands::{CommandKind, InlineKind, SectionKind};
use crate::diagnostics::{Diagnostics, SourcePos};
use crate::doc_comment::{DocComment, DocSection};
use crate::metadata::{ExcludeMode, GroupAssignment};
use cppdoc_markup::{EntityKind, TreeBuilder};
use std::fmt;

/// What a comment documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingEntity {
    /// The entity the comment is textually attached to.
    Unset,
    /// The whole file.
    CurrentFile,
    /// A different, named declaration elsewhere.
    RemoteEntity(String),
    /// A parameter of the attached entity, by name.
    InlineParam(String),
    /// A template parameter of the attached entity, by name.
    InlineTemplateParam(String),
    /// A base class of the attached entity, by name.
    InlineBase(String),
}

impl MatchingEntity {
    pub fn is_unset(&self) -> bool {
        matches!(self, MatchingEntity::Unset)
    }

    /// The referenced name, for the variants that carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchingEntity::RemoteEntity(name)
            | MatchingEntity::InlineParam(name)
            | MatchingEntity::InlineTemplateParam(name)
            | MatchingEntity::InlineBase(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for MatchingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingEntity::Unset => write!(f, "attached entity"),
            MatchingEntity::CurrentFile => write!(f, "current file"),
            MatchingEntity::RemoteEntity(name) => write!(f, "entity '{}'", name),
            MatchingEntity::InlineParam(name) => write!(f, "parameter '{}'", name),
            MatchingEntity::InlineTemplateParam(name) => {
                write!(f, "template parameter '{}'", name)
            }
            MatchingEntity::InlineBase(name) => write!(f, "base '{}'", name),
        }
    }
}

/// An inline node's own doc comment and target.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineComment {
    pub matching: MatchingEntity,
    pub comment: DocComment,
    pub line: usize,
}

/// The finished result of interpreting one comment.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedComment {
    pub matching: MatchingEntity,
    pub comment: DocComment,
    pub inlines: Vec<InlineComment>,
}

/// Interpret a postprocessed comment tree.
///
/// Nodes are processed in tree order (sections in document order,
/// commands and inlines trailing after the reordering pass).
pub fn interpret(
    parsed: ParsedComment,
    file: &str,
    diagnostics: &mut Diagnostics,
) -> InterpretedComment {
    let mut matching = MatchingEntity::Unset;
    let mut comment = DocComment::new();
    let mut inlines = Vec::new();

    for node in parsed.children {
        match node {
            CommentNode::Section(section) => {
                push_section(&mut comment, section, file, diagnostics);
            }
            CommentNode::Command(command) => {
                apply_command(
                    &command,
                    &mut comment,
                    Some(&mut matching),
                    file,
                    diagnostics,
                );
            }
            CommentNode::Inline(inline) => {
                inlines.push(interpret_inline(inline, file, diagnostics));
            }
            CommentNode::Block(tree) => {
                // Postprocessing wraps stray blocks; tolerate an
                // unprocessed tree by doing the same here.
                comment.push_section(details_section(&tree));
            }
        }
    }

    InterpretedComment {
        matching,
        comment,
        inlines,
    }
}

fn interpret_inline(inline: InlineNode, file: &str, diagnostics: &mut Diagnostics) -> InlineComment {
    let matching = match inline.kind {
        InlineKind::Param => MatchingEntity::InlineParam(inline.name.clone()),
        InlineKind::TemplateParam => MatchingEntity::InlineTemplateParam(inline.name.clone()),
        InlineKind::Base => MatchingEntity::InlineBase(inline.name.clone()),
    };

    let mut comment = DocComment::new();
    for node in inline.children {
        match node {
            CommentNode::Section(section) => {
                push_section(&mut comment, section, file, diagnostics);
            }
            CommentNode::Command(command) => {
                // The inline's target is fixed by its name; entity/file
                // commands cannot retarget it.
                apply_command(&command, &mut comment, None, file, diagnostics);
            }
            CommentNode::Block(tree) => {
                comment.push_section(details_section(&tree));
            }
            CommentNode::Inline(nested) => {
                diagnostics.warn(
                    SourcePos::new(file, nested.line),
                    format!("inline comment for '{}' cannot nest; ignored", nested.name),
                );
            }
        }
    }

    InlineComment {
        matching,
        comment,
        line: inline.line,
    }
}

fn push_section(
    comment: &mut DocComment,
    section: SectionNode,
    file: &str,
    diagnostics: &mut Diagnostics,
) {
    if section.kind == SectionKind::Brief && comment.has_brief() {
        diagnostics.warn(
            SourcePos::new(file, section.line),
            "comment has more than one brief section; ignoring the later one",
        );
        return;
    }
    comment.push_section(section_to_doc(section));
}

/// Convert a parsed section node into a doc section with a markup body.
fn section_to_doc(section: SectionNode) -> DocSection {
    let mut builder = TreeBuilder::new(EntityKind::Section {
        name: section.kind.default_spelling().to_string(),
        id: None,
    });
    for child in section.children {
        if let CommentNode::Block(tree) = child {
            // Section bodies hold blocks; containment always holds here.
            let _ = builder.append_fragment(&tree);
        }
    }
    DocSection::new(section.kind, section.key, builder.finish())
}

fn details_section(tree: &cppdoc_markup::MarkupTree) -> DocSection {
    let mut builder = TreeBuilder::new(EntityKind::Section {
        name: SectionKind::Details.default_spelling().to_string(),
        id: None,
    });
    let _ = builder.append_fragment(tree);
    DocSection::new(SectionKind::Details, None, builder.finish())
}

fn apply_command(
    command: &CommandNode,
    comment: &mut DocComment,
    matching: Option<&mut MatchingEntity>,
    file: &str,
    diagnostics: &mut Diagnostics,
) {
    let pos = SourcePos::new(file, command.line);
    let arguments = command.arguments.as_str();

    match command.kind {
        CommandKind::Exclude => {
            let mode = match arguments {
                "" => Some(ExcludeMode::Full),
                "return" => Some(ExcludeMode::ReturnType),
                "target" => Some(ExcludeMode::Target),
                other => {
                    diagnostics.error(pos.clone(), format!("unknown exclude mode '{}'", other));
                    None
                }
            };
            if let Some(mode) = mode {
                if !comment.metadata_mut().set_exclude(mode) {
                    report_duplicate(diagnostics, pos, "exclude");
                }
            }
        }

        CommandKind::UniqueName => {
            if arguments.is_empty() {
                diagnostics.error(pos, "unique_name command requires a name");
            } else if !comment.metadata_mut().set_unique_name(arguments) {
                report_duplicate(diagnostics, pos, "unique_name");
            }
        }

        CommandKind::Synopsis => {
            if !comment.metadata_mut().set_synopsis(arguments) {
                report_duplicate(diagnostics, pos, "synopsis");
            }
        }

        CommandKind::Group => {
            let (name, heading) = split_word(arguments);
            if name.is_empty() {
                diagnostics.error(pos, "group command requires a name");
            } else {
                let heading = if heading.is_empty() {
                    None
                } else {
                    Some(heading.to_string())
                };
                let group = GroupAssignment::new(name, heading);
                if !comment.metadata_mut().set_group(group) {
                    report_duplicate(diagnostics, pos, "group");
                }
            }
        }

        CommandKind::Module => {
            if arguments.is_empty() {
                diagnostics.error(pos, "module command requires a name");
            } else if !comment.metadata_mut().set_module(arguments) {
                report_duplicate(diagnostics, pos, "module");
            }
        }

        CommandKind::OutputSection => {
            if !comment.metadata_mut().set_output_section(arguments) {
                report_duplicate(diagnostics, pos, "output_section");
            }
        }

        CommandKind::Entity => match matching {
            None => diagnostics.warn(
                pos,
                "entity command is not allowed inside an inline comment; ignored",
            ),
            Some(slot) => {
                if arguments.is_empty() {
                    diagnostics.error(pos, "entity command requires a name");
                } else if slot.is_unset() {
                    *slot = MatchingEntity::RemoteEntity(arguments.to_string());
                } else {
                    diagnostics.warn(
                        pos,
                        format!("comment target already set to {}; ignoring entity command", slot),
                    );
                }
            }
        },

        CommandKind::File => match matching {
            None => diagnostics.warn(
                pos,
                "file command is not allowed inside an inline comment; ignored",
            ),
            Some(slot) => {
                if slot.is_unset() {
                    *slot = MatchingEntity::CurrentFile;
                } else {
                    diagnostics.warn(
                        pos,
                        format!("comment target already set to {}; ignoring file command", slot),
                    );
                }
            }
        },
    }
}

fn report_duplicate(diagnostics: &mut Diagnostics, pos: SourcePos, command: &str) {
    diagnostics.warn(
        pos,
        format!("{} already set for this comment; ignoring the later value", command),
    );
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(index) => (&text[..index], text[index..].trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommentConfig;
    use crate::grammar::parse_comment;
    use crate::postprocess::postprocess;

    fn interpret_text(text: &str, diagnostics: &mut Diagnostics) -> InterpretedComment {
        let parsed = postprocess(parse_comment(text, 1, &CommentConfig::default()));
        interpret(parsed, "test.hpp", diagnostics)
    }

    #[test]
    fn test_plain_comment_stays_with_attached_entity() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text("A brief.", &mut diagnostics);
        assert_eq!(result.matching, MatchingEntity::Unset);
        assert!(diagnostics.is_empty());
        assert_eq!(result.comment.brief().map(|s| s.text()), Some("A brief.".into()));
    }

    #[test]
    fn test_entity_command_sets_remote_target() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text("Docs.\n\\entity foo::bar", &mut diagnostics);
        assert_eq!(
            result.matching,
            MatchingEntity::RemoteEntity("foo::bar".into())
        );
    }

    #[test]
    fn test_file_after_entity_is_a_conflict() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text("\\entity foo\n\\file", &mut diagnostics);
        assert_eq!(result.matching, MatchingEntity::RemoteEntity("foo".into()));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_duplicate_metadata_command_reports_and_keeps_first() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text(
            "\\unique_name first\n\\unique_name second",
            &mut diagnostics,
        );
        assert_eq!(result.comment.metadata().unique_name(), Some("first"));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_exclude_modes() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text("\\exclude return", &mut diagnostics);
        assert_eq!(
            result.comment.metadata().exclude(),
            Some(ExcludeMode::ReturnType)
        );

        let result = interpret_text("\\exclude bogus", &mut diagnostics);
        assert_eq!(result.comment.metadata().exclude(), None);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_group_with_heading() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text("\\group setters Setter functions", &mut diagnostics);
        let group = result.comment.metadata().group().expect("group");
        assert_eq!(group.name, "setters");
        assert_eq!(group.heading.as_deref(), Some("Setter functions"));
    }

    #[test]
    fn test_inline_produces_own_comment() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text("Outer brief.\n\\param x - the value", &mut diagnostics);

        assert_eq!(result.inlines.len(), 1);
        let inline = &result.inlines[0];
        assert_eq!(inline.matching, MatchingEntity::InlineParam("x".into()));
        assert_eq!(
            inline.comment.brief().map(|s| s.text()),
            Some("the value".into())
        );
    }

    #[test]
    fn test_sections_keep_document_order() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text(
            "Brief.\n\\effects E.\n\\returns R.\n\\throws T.",
            &mut diagnostics,
        );
        let kinds: Vec<SectionKind> =
            result.comment.sections().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Brief,
                SectionKind::Effects,
                SectionKind::Returns,
                SectionKind::Throws
            ]
        );
    }

    #[test]
    fn test_second_brief_is_reported_and_dropped() {
        let mut diagnostics = Diagnostics::new();
        let result = interpret_text("\\brief one\n\\brief two", &mut diagnostics);
        assert_eq!(result.comment.brief().map(|s| s.text()), Some("one".into()));
        assert_eq!(
            result
                .comment
                .sections()
                .iter()
                .filter(|s| s.kind == SectionKind::Brief)
                .count(),
            1
        );
        assert_eq!(diagnostics.len(), 1);
    }
}
