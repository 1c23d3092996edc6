//! The comment registry
//!
//! Owns the one-doc-comment-per-target invariant for a documentation run.
//! Comments are registered under the target's unique name (or a module
//! name) while files parse, possibly from several worker threads, hence
//! the internal mutex. No atomicity is promised across calls; the merge
//! inside [`CommentRegistry::register_comment`] is the synchronization
//! point.

use crate::doc_comment::DocComment;
use crate::entity::EntityRef;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// Error from module-comment registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A module already has a comment; the first one is kept.
    DuplicateModuleComment { module: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateModuleComment { module } => {
                write!(f, "module '{}' is already documented", module)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Debug, Default)]
struct Inner {
    entities: HashMap<String, DocComment>,
    modules: HashMap<String, DocComment>,
    groups: HashMap<String, Vec<String>>,
}

/// Thread-safe store of finished doc comments, keyed by unique name.
#[derive(Debug, Default)]
pub struct CommentRegistry {
    inner: Mutex<Inner>,
}

/// The finalized registry contents, read-only, for the assembly phase.
#[derive(Debug)]
pub struct RegistrySnapshot {
    pub entities: HashMap<String, DocComment>,
    pub modules: HashMap<String, DocComment>,
    pub groups: HashMap<String, Vec<String>>,
}

impl CommentRegistry {
    pub fn new() -> Self {
        CommentRegistry::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned registry means a panic elsewhere already sank the
        // run; propagating the data is still safe.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a comment for an entity's unique name.
    ///
    /// Returns whether a comment was already registered for that target.
    /// If one was, the two are merged: metadata per field with the first
    /// registration winning, section lists concatenated in registration
    /// order.
    pub fn register_comment(&self, unique_name: &str, comment: DocComment) -> bool {
        let mut inner = self.lock();
        match inner.entities.get_mut(unique_name) {
            Some(existing) => {
                existing.merge(comment);
                true
            }
            None => {
                inner.entities.insert(unique_name.to_string(), comment);
                false
            }
        }
    }

    /// Register a comment for a module name.
    ///
    /// Module comments do not merge: a second registration is rejected
    /// and the first comment kept.
    pub fn register_module_comment(
        &self,
        module: &str,
        comment: DocComment,
    ) -> Result<(), RegistryError> {
        let mut inner = self.lock();
        if inner.modules.contains_key(module) {
            return Err(RegistryError::DuplicateModuleComment {
                module: module.to_string(),
            });
        }
        inner.modules.insert(module.to_string(), comment);
        Ok(())
    }

    /// The registered comment for a unique name, if any.
    pub fn lookup_comment(&self, unique_name: &str) -> Option<DocComment> {
        self.lock().entities.get(unique_name).cloned()
    }

    pub fn lookup_module_comment(&self, module: &str) -> Option<DocComment> {
        self.lock().modules.get(module).cloned()
    }

    /// Whether a comment is registered for the unique name.
    pub fn is_documented(&self, unique_name: &str) -> bool {
        self.lock().entities.contains_key(unique_name)
    }

    /// Append an entity to a named group, preserving insertion order.
    pub fn add_to_group(&self, group: &str, unique_name: &str) {
        self.lock()
            .groups
            .entry(group.to_string())
            .or_default()
            .push(unique_name.to_string());
    }

    /// The members of a group, or empty if the group does not exist.
    pub fn lookup_group(&self, group: &str) -> Vec<String> {
        self.lock().groups.get(group).cloned().unwrap_or_default()
    }

    pub fn entity_count(&self) -> usize {
        self.lock().entities.len()
    }

    /// Finalize the registry: no further writes, contents handed to the
    /// consuming documentation-assembly phase.
    pub fn finish(self) -> RegistrySnapshot {
        let inner = self.inner.into_inner().unwrap_or_else(|e| e.into_inner());
        RegistrySnapshot {
            entities: inner.entities,
            modules: inner.modules,
            groups: inner.groups,
        }
    }
}

/// Structural grouping policy: walk entities in declaration order and
/// append each uncommented entity to the group of the nearest preceding
/// commented sibling that has one.
///
/// Callers apply this only when the group-uncommented option is enabled;
/// the registry is just the storage of comment presence and group
/// membership.
pub fn group_uncommented_siblings(registry: &CommentRegistry, entities: &[EntityRef]) {
    let mut current_group: Option<String> = None;
    for entity in entities {
        match registry.lookup_comment(&entity.unique_name) {
            Some(comment) => {
                current_group = comment
                    .metadata()
                    .group()
                    .map(|group| group.name.clone());
            }
            None => {
                if let Some(group) = &current_group {
                    registry.add_to_group(group, &entity.unique_name);
                }
            }
        }
    }
}
