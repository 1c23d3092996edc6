//! Comment metadata
//!
//! The settable attributes of a doc comment. Every field is "unset" or
//! "set once": the first write wins, later writes are refused and reported
//! by the caller. Merging two comments for the same entity applies the
//! same rule per field.

use std::fmt;

/// How an entity is excluded from the documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludeMode {
    /// The whole entity is excluded.
    Full,
    /// Only the return type is hidden from the synopsis.
    ReturnType,
    /// Only the target of an alias/typedef is hidden.
    Target,
}

impl fmt::Display for ExcludeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcludeMode::Full => write!(f, "full"),
            ExcludeMode::ReturnType => write!(f, "return"),
            ExcludeMode::Target => write!(f, "target"),
        }
    }
}

/// A member-group assignment: group name plus optional heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAssignment {
    pub name: String,
    pub heading: Option<String>,
}

impl GroupAssignment {
    pub fn new(name: impl Into<String>, heading: Option<String>) -> Self {
        GroupAssignment {
            name: name.into(),
            heading,
        }
    }
}

/// The settable overrides of one doc comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    exclude: Option<ExcludeMode>,
    unique_name: Option<String>,
    synopsis: Option<String>,
    group: Option<GroupAssignment>,
    module: Option<String>,
    output_section: Option<String>,
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

impl Metadata {
    pub fn new() -> Self {
        Metadata::default()
    }

    pub fn exclude(&self) -> Option<ExcludeMode> {
        self.exclude
    }

    pub fn unique_name(&self) -> Option<&str> {
        self.unique_name.as_deref()
    }

    pub fn synopsis(&self) -> Option<&str> {
        self.synopsis.as_deref()
    }

    pub fn group(&self) -> Option<&GroupAssignment> {
        self.group.as_ref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn output_section(&self) -> Option<&str> {
        self.output_section.as_deref()
    }

    /// Each setter returns whether the write took effect; `false` means
    /// the field was already set and kept its first value.
    pub fn set_exclude(&mut self, mode: ExcludeMode) -> bool {
        set_once(&mut self.exclude, mode)
    }

    pub fn set_unique_name(&mut self, name: impl Into<String>) -> bool {
        set_once(&mut self.unique_name, name.into())
    }

    pub fn set_synopsis(&mut self, synopsis: impl Into<String>) -> bool {
        set_once(&mut self.synopsis, synopsis.into())
    }

    pub fn set_group(&mut self, group: GroupAssignment) -> bool {
        set_once(&mut self.group, group)
    }

    pub fn set_module(&mut self, module: impl Into<String>) -> bool {
        set_once(&mut self.module, module.into())
    }

    pub fn set_output_section(&mut self, section: impl Into<String>) -> bool {
        set_once(&mut self.output_section, section.into())
    }

    /// Fill unset fields from `other`; set fields keep their value.
    ///
    /// Used when a second comment is registered for the same entity: each
    /// field merges independently, first registered wins per field.
    pub fn merge_from(&mut self, other: Metadata) {
        if self.exclude.is_none() {
            self.exclude = other.exclude;
        }
        if self.unique_name.is_none() {
            self.unique_name = other.unique_name;
        }
        if self.synopsis.is_none() {
            self.synopsis = other.synopsis;
        }
        if self.group.is_none() {
            self.group = other.group;
        }
        if self.module.is_none() {
            self.module = other.module;
        }
        if self.output_section.is_none() {
            self.output_section = other.output_section;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exclude.is_none()
            && self.unique_name.is_none()
            && self.synopsis.is_none()
            && self.group.is_none()
            && self.module.is_none()
            && self.output_section.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_wins() {
        let mut metadata = Metadata::new();
        assert!(metadata.set_unique_name("first"));
        assert!(!metadata.set_unique_name("second"));
        assert_eq!(metadata.unique_name(), Some("first"));
    }

    #[test]
    fn test_merge_keeps_set_fields() {
        let mut a = Metadata::new();
        a.set_unique_name("a");

        let mut b = Metadata::new();
        b.set_unique_name("b");
        b.set_module("m");

        a.merge_from(b);
        assert_eq!(a.unique_name(), Some("a"));
        assert_eq!(a.module(), Some("m"));
    }

    #[test]
    fn test_merge_fields_are_independent() {
        let mut a = Metadata::new();
        a.set_synopsis("void f();");

        let mut b = Metadata::new();
        b.set_exclude(ExcludeMode::Full);
        b.set_synopsis("other");

        a.merge_from(b);
        assert_eq!(a.synopsis(), Some("void f();"));
        assert_eq!(a.exclude(), Some(ExcludeMode::Full));
    }
}
