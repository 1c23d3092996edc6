//! Shared configuration loader for the cppdoc toolchain.
//!
//! `defaults/cppdoc.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer
//! user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`DocConfig`], and convert the result into the
//! comment engine's runtime [`CommentConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use cppdoc_comment::commands::DirectiveKind;
use cppdoc_comment::CommentConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/cppdoc.default.toml");

/// Top-level configuration consumed by cppdoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DocConfig {
    pub comment: CommentFileConfig,
}

/// The `[comment]` table of a configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentFileConfig {
    pub command_character: String,
    pub free_file_comments: bool,
    pub group_uncommented: bool,
    /// Default directive name → replacement spelling.
    #[serde(default)]
    pub spellings: HashMap<String, String>,
}

/// Errors converting a loaded file into the runtime configuration.
#[derive(Debug)]
pub enum DocConfigError {
    Load(ConfigError),
    /// The command character must be exactly one character.
    InvalidCommandCharacter(String),
    /// A spelling override names no known directive.
    UnknownDirective(String),
    /// Two directives were remapped to the same spelling.
    DuplicateSpelling(String),
}

impl fmt::Display for DocConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocConfigError::Load(error) => write!(f, "failed to load configuration: {}", error),
            DocConfigError::InvalidCommandCharacter(value) => {
                write!(f, "command_character must be one character, got '{}'", value)
            }
            DocConfigError::UnknownDirective(name) => {
                write!(f, "unknown directive '{}' in spelling overrides", name)
            }
            DocConfigError::DuplicateSpelling(spelling) => {
                write!(f, "spelling '{}' is mapped to more than one directive", spelling)
            }
        }
    }
}

impl std::error::Error for DocConfigError {}

impl From<ConfigError> for DocConfigError {
    fn from(error: ConfigError) -> Self {
        DocConfigError::Load(error)
    }
}

impl DocConfig {
    /// Convert into the comment engine's runtime configuration.
    pub fn into_comment_config(self) -> Result<CommentConfig, DocConfigError> {
        let mut runtime = CommentConfig::new();

        let mut characters = self.comment.command_character.chars();
        match (characters.next(), characters.next()) {
            (Some(character), None) => runtime.set_command_character(character),
            _ => {
                return Err(DocConfigError::InvalidCommandCharacter(
                    self.comment.command_character,
                ))
            }
        }

        runtime.set_free_file_comments(self.comment.free_file_comments);
        runtime.set_group_uncommented(self.comment.group_uncommented);

        let mut seen = HashMap::new();
        for (name, spelling) in &self.comment.spellings {
            let directive = DirectiveKind::all()
                .find(|d| d.default_spelling() == name)
                .ok_or_else(|| DocConfigError::UnknownDirective(name.clone()))?;
            if seen.insert(spelling.clone(), directive).is_some() {
                return Err(DocConfigError::DuplicateSpelling(spelling.clone()));
            }
            runtime.remap(directive, spelling);
        }

        Ok(runtime)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the configuration.
    pub fn build(self) -> Result<DocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    /// Build straight through to the runtime comment configuration.
    pub fn build_comment_config(self) -> Result<CommentConfig, DocConfigError> {
        self.build()?.into_comment_config()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cppdoc_comment::commands::SectionKind;

    #[test]
    fn test_embedded_defaults_load() {
        let config = Loader::new().build().expect("defaults parse");
        assert_eq!(config.comment.command_character, "\\");
        assert!(!config.comment.free_file_comments);
        assert!(config.comment.spellings.is_empty());
    }

    #[test]
    fn test_defaults_convert_to_runtime() {
        let runtime = Loader::new().build_comment_config().expect("convert");
        assert_eq!(runtime.command_character(), '\\');
        assert!(runtime.lookup("brief").is_some());
    }

    #[test]
    fn test_override_command_character() {
        let runtime = Loader::new()
            .set_override("comment.command_character", "@")
            .expect("override")
            .build_comment_config()
            .expect("convert");
        assert_eq!(runtime.command_character(), '@');
    }

    #[test]
    fn test_spelling_remap() {
        let runtime = Loader::new()
            .set_override("comment.spellings.brief", "SUMMARY:")
            .expect("override")
            .build_comment_config()
            .expect("convert");
        assert_eq!(runtime.lookup("brief"), None);
        let (directive, _) = runtime.match_bare("SUMMARY: text").expect("bare match");
        assert_eq!(directive, DirectiveKind::Section(SectionKind::Brief));
    }

    #[test]
    fn test_invalid_command_character_is_rejected() {
        let error = Loader::new()
            .set_override("comment.command_character", "\\\\")
            .expect("override")
            .build_comment_config()
            .unwrap_err();
        assert!(matches!(error, DocConfigError::InvalidCommandCharacter(_)));
    }

    #[test]
    fn test_unknown_directive_is_rejected() {
        let error = Loader::new()
            .set_override("comment.spellings.bogus", "B:")
            .expect("override")
            .build_comment_config()
            .unwrap_err();
        assert!(matches!(error, DocConfigError::UnknownDirective(_)));
    }
}
