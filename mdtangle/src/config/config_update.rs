//! Partial configuration read from a config file.

use std::path::PathBuf;

use serde::Deserialize;

use super::config_data::{Config, WatchConfig};
use super::file_policy::FilePolicy;

/// Partial configuration that can be merged into a [`Config`].
///
/// All fields are optional. Only specified fields override the base config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub source_patterns: Option<Vec<String>>,

    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub default_filename: Option<String>,

    #[serde(default)]
    pub file_policy: Option<FilePolicy>,

    #[serde(default)]
    pub languages: Option<Vec<String>>,

    #[serde(default)]
    pub trim_output: Option<bool>,

    #[serde(default)]
    pub watch: Option<WatchConfig>,
}

impl ConfigUpdate {
    /// Merges this update into a base configuration, returning a new Config.
    pub fn merge_into(self, base: &Config) -> Config {
        Config {
            source_patterns: self
                .source_patterns
                .unwrap_or_else(|| base.source_patterns.clone()),
            exclude: self.exclude.unwrap_or_else(|| base.exclude.clone()),
            output_dir: self.output_dir.or_else(|| base.output_dir.clone()),
            default_filename: self
                .default_filename
                .unwrap_or_else(|| base.default_filename.clone()),
            file_policy: self.file_policy.unwrap_or(base.file_policy),
            languages: self.languages.unwrap_or_else(|| base.languages.clone()),
            trim_output: self.trim_output.unwrap_or(base.trim_output),
            watch: self.watch.unwrap_or_else(|| base.watch.clone()),
        }
    }
}

impl From<ConfigUpdate> for Config {
    fn from(update: ConfigUpdate) -> Self {
        update.merge_into(&Config::default())
    }
}
