//! Policy for blocks that name an unregistered output file.

use serde::{Deserialize, Serialize};

/// What [`CodeStore::add_node`](crate::model::CodeStore::add_node) does when a
/// block targets a file that was never added with `add_code_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FilePolicy {
    /// Create the file on first use.
    #[default]
    AutoCreate,

    /// Reject the block.
    Strict,
}

impl FilePolicy {
    /// Returns true if unknown files are created on demand.
    pub fn auto_creates(&self) -> bool {
        matches!(self, FilePolicy::AutoCreate)
    }
}
