//! Directive kinds and their default spellings
//!
//! The comment grammar recognizes three families of directives on top of
//! CommonMark: *commands* (one-line, no body), *sections* (body-bearing),
//! and *inlines* (entity-scoped sub-comments). Each family is a closed
//! enum; [`DirectiveKind`] unions them for table lookups.
//!
//! Spellings listed here are defaults; every one can be remapped through
//! the configuration without touching these tables.

use std::fmt;

/// One-line directives with no body paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Exclude the entity (or part of it) from the documentation.
    Exclude,
    /// Override the entity's unique name.
    UniqueName,
    /// Override the rendered synopsis.
    Synopsis,
    /// Assign the entity to a member group.
    Group,
    /// Assign the entity to a module.
    Module,
    /// Override the output section heading.
    OutputSection,
    /// Document a different, named declaration.
    Entity,
    /// Document the current file.
    File,
}

impl CommandKind {
    pub const ALL: [CommandKind; 8] = [
        CommandKind::Exclude,
        CommandKind::UniqueName,
        CommandKind::Synopsis,
        CommandKind::Group,
        CommandKind::Module,
        CommandKind::OutputSection,
        CommandKind::Entity,
        CommandKind::File,
    ];

    pub fn default_spelling(self) -> &'static str {
        match self {
            CommandKind::Exclude => "exclude",
            CommandKind::UniqueName => "unique_name",
            CommandKind::Synopsis => "synopsis",
            CommandKind::Group => "group",
            CommandKind::Module => "module",
            CommandKind::OutputSection => "output_section",
            CommandKind::Entity => "entity",
            CommandKind::File => "file",
        }
    }
}

/// Directives whose body is the following paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Brief,
    Details,
    Requires,
    Effects,
    Synchronization,
    States,
    Postconditions,
    Returns,
    Throws,
    Complexity,
    Remarks,
    ErrorConditions,
    Notes,
    See,
}

impl SectionKind {
    pub const ALL: [SectionKind; 14] = [
        SectionKind::Brief,
        SectionKind::Details,
        SectionKind::Requires,
        SectionKind::Effects,
        SectionKind::Synchronization,
        SectionKind::States,
        SectionKind::Postconditions,
        SectionKind::Returns,
        SectionKind::Throws,
        SectionKind::Complexity,
        SectionKind::Remarks,
        SectionKind::ErrorConditions,
        SectionKind::Notes,
        SectionKind::See,
    ];

    pub fn default_spelling(self) -> &'static str {
        match self {
            SectionKind::Brief => "brief",
            SectionKind::Details => "details",
            SectionKind::Requires => "requires",
            SectionKind::Effects => "effects",
            SectionKind::Synchronization => "synchronization",
            SectionKind::States => "states",
            SectionKind::Postconditions => "postconditions",
            SectionKind::Returns => "returns",
            SectionKind::Throws => "throws",
            SectionKind::Complexity => "complexity",
            SectionKind::Remarks => "remarks",
            SectionKind::ErrorConditions => "error_conditions",
            SectionKind::Notes => "notes",
            SectionKind::See => "see",
        }
    }

    /// Whether this section may hold arbitrary block children.
    ///
    /// Every other section kind holds at most a single paragraph.
    pub fn accepts_any_block(self) -> bool {
        self == SectionKind::Details
    }
}

/// Entity-scoped sub-comment directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Param,
    TemplateParam,
    Base,
}

impl InlineKind {
    pub const ALL: [InlineKind; 3] = [
        InlineKind::Param,
        InlineKind::TemplateParam,
        InlineKind::Base,
    ];

    pub fn default_spelling(self) -> &'static str {
        match self {
            InlineKind::Param => "param",
            InlineKind::TemplateParam => "tparam",
            InlineKind::Base => "base",
        }
    }
}

/// Union of the three directive families, as stored in lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Command(CommandKind),
    Section(SectionKind),
    Inline(InlineKind),
}

impl DirectiveKind {
    pub fn default_spelling(self) -> &'static str {
        match self {
            DirectiveKind::Command(kind) => kind.default_spelling(),
            DirectiveKind::Section(kind) => kind.default_spelling(),
            DirectiveKind::Inline(kind) => kind.default_spelling(),
        }
    }

    /// All directives in a fixed order, for building spelling tables.
    pub fn all() -> impl Iterator<Item = DirectiveKind> {
        CommandKind::ALL
            .into_iter()
            .map(DirectiveKind::Command)
            .chain(SectionKind::ALL.into_iter().map(DirectiveKind::Section))
            .chain(InlineKind::ALL.into_iter().map(DirectiveKind::Inline))
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_spelling())
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_spelling())
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_spelling())
    }
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_spelling())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for directive in DirectiveKind::all() {
            assert!(
                seen.insert(directive.default_spelling()),
                "duplicate spelling: {}",
                directive.default_spelling()
            );
        }
        assert_eq!(seen.len(), 8 + 14 + 3);
    }

    #[test]
    fn test_only_details_accepts_any_block() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.accepts_any_block(), kind == SectionKind::Details);
        }
    }
}
