//! Runtime configuration of the comment grammar
//!
//! [`CommentConfig`] parameterizes the grammar extension: the command
//! character, the spelling tables for every directive, and the feature
//! toggles. Default spellings are looked up *after* the command character
//! (`\brief`); a remapped spelling is matched bare at the start of a line
//! (`brief = "SUMMARY:"` makes `SUMMARY:` open a brief section with no
//! command character at all).
//!
//! Loading configuration files is the `cppdoc-config` crate's job; this
//! type is the finished, validated result it produces.

use crate::commands::DirectiveKind;
use std::collections::HashMap;

/// Grammar and policy knobs for comment parsing.
#[derive(Debug, Clone)]
pub struct CommentConfig {
    command_character: char,
    free_file_comments: bool,
    group_uncommented: bool,
    /// Spellings matched after the command character.
    spellings: HashMap<String, DirectiveKind>,
    /// Remapped spellings matched bare at line start.
    bare_spellings: HashMap<String, DirectiveKind>,
}

impl Default for CommentConfig {
    fn default() -> Self {
        let mut spellings = HashMap::new();
        for directive in DirectiveKind::all() {
            spellings.insert(directive.default_spelling().to_string(), directive);
        }
        CommentConfig {
            command_character: '\\',
            free_file_comments: false,
            group_uncommented: false,
            spellings,
            bare_spellings: HashMap::new(),
        }
    }
}

impl CommentConfig {
    pub fn new() -> Self {
        CommentConfig::default()
    }

    pub fn command_character(&self) -> char {
        self.command_character
    }

    pub fn set_command_character(&mut self, character: char) {
        self.command_character = character;
    }

    /// Whether comments with no entity to attach to document the file.
    pub fn free_file_comments(&self) -> bool {
        self.free_file_comments
    }

    pub fn set_free_file_comments(&mut self, enabled: bool) {
        self.free_file_comments = enabled;
    }

    /// Whether uncommented entities join the preceding sibling's group.
    pub fn group_uncommented(&self) -> bool {
        self.group_uncommented
    }

    pub fn set_group_uncommented(&mut self, enabled: bool) {
        self.group_uncommented = enabled;
    }

    /// Replace a directive's spelling.
    ///
    /// The default spelling stops matching; the new spelling matches bare
    /// at line start, without the command character.
    pub fn remap(&mut self, directive: DirectiveKind, spelling: &str) {
        self.spellings
            .retain(|_, existing| *existing != directive);
        self.bare_spellings
            .retain(|_, existing| *existing != directive);
        self.bare_spellings
            .insert(spelling.to_string(), directive);
    }

    /// Look up a word read after the command character. Case-sensitive.
    pub fn lookup(&self, word: &str) -> Option<DirectiveKind> {
        self.spellings
            .get(word)
            .or_else(|| self.bare_spellings.get(word))
            .copied()
    }

    /// Match a remapped bare spelling at the start of `line`.
    ///
    /// Returns the directive and the rest of the line after the spelling.
    /// A spelling ending in an alphanumeric character must be followed by
    /// whitespace or the end of the line, so `SUMMARY` does not fire
    /// inside `SUMMARYX`.
    pub fn match_bare<'a>(&self, line: &'a str) -> Option<(DirectiveKind, &'a str)> {
        for (spelling, &directive) in &self.bare_spellings {
            if let Some(rest) = line.strip_prefix(spelling.as_str()) {
                let needs_boundary = spelling
                    .chars()
                    .last()
                    .map(|c| c.is_alphanumeric() || c == '_')
                    .unwrap_or(false);
                if needs_boundary && !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                    continue;
                }
                return Some((directive, rest));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandKind, SectionKind};

    #[test]
    fn test_default_lookup() {
        let config = CommentConfig::default();
        assert_eq!(
            config.lookup("brief"),
            Some(DirectiveKind::Section(SectionKind::Brief))
        );
        assert_eq!(
            config.lookup("exclude"),
            Some(DirectiveKind::Command(CommandKind::Exclude))
        );
        assert_eq!(config.lookup("nonexistent"), None);
        // Case-sensitive.
        assert_eq!(config.lookup("Brief"), None);
    }

    #[test]
    fn test_remap_moves_spelling_to_bare() {
        let mut config = CommentConfig::default();
        config.remap(DirectiveKind::Section(SectionKind::Brief), "SUMMARY:");

        assert_eq!(config.lookup("brief"), None);
        let (directive, rest) = config.match_bare("SUMMARY: text").unwrap();
        assert_eq!(directive, DirectiveKind::Section(SectionKind::Brief));
        assert_eq!(rest, " text");
    }

    #[test]
    fn test_bare_spelling_word_boundary() {
        let mut config = CommentConfig::default();
        config.remap(DirectiveKind::Section(SectionKind::Brief), "SUMMARY");

        assert!(config.match_bare("SUMMARY text").is_some());
        assert!(config.match_bare("SUMMARYX text").is_none());
    }
}
