//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::file_policy::FilePolicy;
use crate::model::DEFAULT_FILENAME;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns for markdown source files.
    #[serde(default = "default_source_patterns")]
    pub source_patterns: Vec<String>,

    /// Glob patterns for paths never read as sources, even when a source pattern matches.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Directory generated files are written to, relative to the base directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// File that blocks without an explicit filename go to.
    #[serde(default = "default_filename")]
    pub default_filename: String,

    /// Handling of blocks that target an unregistered file.
    #[serde(default)]
    pub file_policy: FilePolicy,

    /// Language tags to tangle; empty means every code block.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Strip trailing whitespace and end generated files with one newline.
    #[serde(default = "default_trim_output")]
    pub trim_output: bool,

    /// Watch configuration.
    #[serde(default)]
    pub watch: WatchConfig,
}

fn default_source_patterns() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/target/**".to_string(),
        "**/.*/**".to_string(),
    ]
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn default_trim_output() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_patterns: default_source_patterns(),
            exclude: default_exclude(),
            output_dir: None,
            default_filename: default_filename(),
            file_policy: FilePolicy::default(),
            languages: Vec::new(),
            trim_output: default_trim_output(),
            watch: WatchConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the output directory, if configured.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Returns true if blocks tagged with `language` should be tangled.
    pub fn accepts_language(&self, language: Option<&str>) -> bool {
        if self.languages.is_empty() {
            return true;
        }
        language.is_some_and(|lang| self.languages.iter().any(|l| l == lang))
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Patterns to exclude from watching.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_debounce() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            exclude: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source_patterns, vec!["**/*.md"]);
        assert_eq!(config.exclude, vec!["**/node_modules/**", "**/target/**", "**/.*/**"]);
        assert_eq!(config.default_filename, "index.js");
        assert_eq!(config.file_policy, FilePolicy::AutoCreate);
        assert!(config.trim_output);
        assert_eq!(config.watch.debounce_ms, 100);
    }

    #[test]
    fn test_accepts_language() {
        let mut config = Config::default();
        assert!(config.accepts_language(None));
        assert!(config.accepts_language(Some("bash")));

        config.languages = vec!["js".to_string(), "javascript".to_string()];
        assert!(config.accepts_language(Some("js")));
        assert!(!config.accepts_language(Some("bash")));
        assert!(!config.accepts_language(None));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config {
            output_dir: Some(PathBuf::from("build")),
            file_policy: FilePolicy::Strict,
            ..Config::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
