//! Source positions of code blocks, used in error messages.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where a code block starts in its source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document path, when the block was read from a file.
    pub filename: Option<PathBuf>,
    /// Line of the opening fence (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a location without a document path.
    pub fn line_only(line: usize) -> Self {
        Self {
            filename: None,
            line,
        }
    }

    /// Creates a location inside a document.
    pub fn file_line(filename: PathBuf, line: usize) -> Self {
        Self {
            filename: Some(filename),
            line,
        }
    }

    /// Returns the same line attributed to `path`.
    pub fn in_file(mut self, path: &Path) -> Self {
        self.filename = Some(path.to_path_buf());
        self
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}
