//! Documentation comment parsing and matching engine
//!
//! Takes raw C++ documentation comments and turns them into structured
//! doc comments, resolved to the entity each one documents:
//!
//! Pipeline: source text → raw comments → comment tree (CommonMark plus
//! command/section/inline directives) → postprocessing (reorder,
//! brief/details inference) → interpretation (metadata, matching entity)
//! → registry.
//!
//! The C++ AST walk, the concrete output renderers, and the CLI are
//! external collaborators: declarations arrive as opaque [`EntityRef`]
//! handles, and documentation leaves as `cppdoc-markup` trees.

pub mod ast;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod doc_comment;
pub mod entity;
pub mod grammar;
pub mod markdown;
pub mod matching;
pub mod metadata;
pub mod postprocess;
pub mod processor;
pub mod raw;
pub mod registry;
pub mod testing;

pub use ast::{CommandNode, CommentNode, InlineNode, ParsedComment, SectionNode};
pub use commands::{CommandKind, DirectiveKind, InlineKind, SectionKind};
pub use config::CommentConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity, SourcePos};
pub use doc_comment::{DocComment, DocSection};
pub use entity::{DeclKind, EntityRef};
pub use grammar::{parse_comment, parse_raw_comment};
pub use matching::{interpret, InlineComment, InterpretedComment, MatchingEntity};
pub use metadata::{ExcludeMode, GroupAssignment, Metadata};
pub use postprocess::postprocess;
pub use processor::CommentProcessor;
pub use raw::{extract_comments, merge_comments, scan_comments, CommentStyle, RawComment};
pub use registry::{group_uncommented_siblings, CommentRegistry, RegistryError, RegistrySnapshot};
