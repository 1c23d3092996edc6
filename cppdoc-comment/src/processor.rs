//! Comment processing pipeline
//!
//! [`CommentProcessor`] wires the stages together for one source file:
//! extraction → grammar → postprocessing → interpretation → registration.
//! The C++ side stays external: a caller-supplied resolver maps each
//! logical comment to the declaration it is attached to (the declaration
//! on the same line for `//<` comments, the following one otherwise).

use crate::config::CommentConfig;
use crate::diagnostics::{Diagnostics, SourcePos};
use crate::entity::EntityRef;
use crate::grammar;
use crate::matching::{self, InterpretedComment, MatchingEntity};
use crate::postprocess;
use crate::raw::{self, RawComment};
use crate::registry::CommentRegistry;

pub struct CommentProcessor {
    config: CommentConfig,
    registry: CommentRegistry,
}

impl CommentProcessor {
    pub fn new(config: CommentConfig) -> Self {
        CommentProcessor {
            config,
            registry: CommentRegistry::new(),
        }
    }

    pub fn config(&self) -> &CommentConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommentRegistry {
        &self.registry
    }

    /// Hand the registry over for the assembly phase.
    pub fn into_registry(self) -> CommentRegistry {
        self.registry
    }

    /// Parse and interpret one logical comment without registering it.
    pub fn parse(
        &self,
        comment: &RawComment,
        file: &str,
        diagnostics: &mut Diagnostics,
    ) -> InterpretedComment {
        let parsed = grammar::parse_raw_comment(comment, &self.config);
        let parsed = postprocess::postprocess(parsed);
        matching::interpret(parsed, file, diagnostics)
    }

    /// Process every doc comment of one source file.
    pub fn process_source<F>(
        &self,
        file: &str,
        source: &str,
        resolve: F,
        diagnostics: &mut Diagnostics,
    ) where
        F: Fn(&RawComment) -> Option<EntityRef>,
    {
        let file_entity = EntityRef::file(file);
        for comment in raw::extract_comments(source) {
            let interpreted = self.parse(&comment, file, diagnostics);
            let attached = resolve(&comment);
            self.register(
                interpreted,
                attached.as_ref(),
                &file_entity,
                comment.start_line,
                file,
                diagnostics,
            );
        }
    }

    /// Register one interpreted comment with the registry.
    pub fn register(
        &self,
        interpreted: InterpretedComment,
        attached: Option<&EntityRef>,
        file_entity: &EntityRef,
        line: usize,
        file: &str,
        diagnostics: &mut Diagnostics,
    ) {
        let InterpretedComment {
            matching,
            comment,
            inlines,
        } = interpreted;

        let target = match matching {
            MatchingEntity::Unset => match attached {
                Some(entity) => Some(entity.unique_name.clone()),
                None => {
                    if let Some(module) = comment.metadata().module() {
                        // A free comment carrying \module documents the
                        // module itself.
                        let module = module.to_string();
                        if let Err(error) = self.registry.register_module_comment(&module, comment)
                        {
                            diagnostics.warn(SourcePos::new(file, line), error.to_string());
                        }
                        if !inlines.is_empty() {
                            diagnostics.warn(
                                SourcePos::new(file, line),
                                "inline comments inside a module comment are ignored",
                            );
                        }
                        return;
                    }
                    if self.config.free_file_comments() {
                        Some(file_entity.unique_name.clone())
                    } else {
                        diagnostics.warn(
                            SourcePos::new(file, line),
                            "doc comment has no matching entity; ignored",
                        );
                        None
                    }
                }
            },
            MatchingEntity::CurrentFile => Some(file_entity.unique_name.clone()),
            MatchingEntity::RemoteEntity(name) => Some(name),
            // Inline targets only arise inside inline nodes, never for
            // the outer comment.
            other => {
                diagnostics.warn(
                    SourcePos::new(file, line),
                    format!("comment unexpectedly targets {}; ignored", other),
                );
                None
            }
        };

        let Some(target) = target else {
            return;
        };

        if let Some(group) = comment.metadata().group() {
            self.registry.add_to_group(&group.name, &target);
        }
        self.registry.register_comment(&target, comment);

        // Inline sub-comments register under `parent.name`; the external
        // resolver stays the authority for names it supplies directly.
        for inline in inlines {
            let Some(name) = inline.matching.name() else {
                continue;
            };
            let key = format!("{}.{}", target, name);
            self.registry.register_comment(&key, inline.comment);
        }
    }

    /// Apply the group-uncommented policy over a file's declarations, in
    /// declaration order. A no-op unless enabled in the configuration.
    pub fn apply_grouping(&self, entities: &[EntityRef]) {
        if self.config.group_uncommented() {
            crate::registry::group_uncommented_siblings(&self.registry, entities);
        }
    }
}
