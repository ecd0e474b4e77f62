//! Error types for mdtangle.

use thiserror::Error;

use crate::model::SectionName;
use crate::text_location::TextLocation;

/// Main error type for tangle operations.
#[derive(Error, Debug)]
pub enum TangleError {
    /// An annotation string does not follow the `<lang> > <file>#<section>` grammar.
    #[error("Invalid annotation {annotation:?}{}: {message}", at(.location))]
    Format {
        annotation: String,
        message: String,
        location: Option<TextLocation>,
    },

    #[error("Duplicate code file: {0}")]
    DuplicateFile(String),

    #[error("Code file not found: {0}")]
    MissingFile(String),

    /// A block targets a file that was never registered while the store is strict.
    #[error("Code file {0} was not registered with add_code_file")]
    UnregisteredFile(String),

    #[error("Section {section} referenced in {file} has no code blocks")]
    MissingSection { file: String, section: SectionName },

    #[error("Cycle detected in {file}: {}", chain_display(.chain))]
    Cycle {
        file: String,
        chain: Vec<SectionName>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Watch error: {0}")]
    Watch(String),
}

impl TangleError {
    /// Attaches a source location to a format error; other errors pass through.
    pub fn with_location(self, location: Option<&TextLocation>) -> Self {
        match self {
            TangleError::Format {
                annotation,
                message,
                location: None,
            } => TangleError::Format {
                annotation,
                message,
                location: location.cloned(),
            },
            other => other,
        }
    }
}

fn at(location: &Option<TextLocation>) -> String {
    location
        .as_ref()
        .map(|loc| format!(" at {}", loc))
        .unwrap_or_default()
}

fn chain_display(chain: &[SectionName]) -> String {
    chain
        .iter()
        .map(SectionName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for tangle operations.
pub type Result<T> = std::result::Result<T, TangleError>;
