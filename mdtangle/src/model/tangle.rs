//! Tangle algorithm: expands a file's `root` section into its final text.

use std::collections::HashSet;

use super::code_file::CodeFile;
use super::scanner::replace_references;
use super::section_name::SectionName;
use crate::errors::{Result, TangleError};

/// Cycle detector for preventing infinite recursion during tangling.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    /// File being rendered (for error reporting).
    file: String,
    /// Stack of sections currently being expanded (for error reporting).
    stack: Vec<SectionName>,
    /// Set for O(1) membership checks.
    seen: HashSet<SectionName>,
}

impl CycleDetector {
    /// Creates a detector for the given file.
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            stack: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Enters a section, failing if it is already being expanded.
    pub fn enter(&mut self, name: &SectionName) -> Result<()> {
        if self.seen.contains(name) {
            let mut chain = self.stack.clone();
            chain.push(name.clone());
            return Err(TangleError::Cycle {
                file: self.file.clone(),
                chain,
            });
        }
        self.seen.insert(name.clone());
        self.stack.push(name.clone());
        Ok(())
    }

    /// Exits the most recently entered section.
    pub fn exit(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.seen.remove(&name);
        }
    }

    /// Returns the current depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Appends a chunk, separating it from the previous one by a newline unless
/// that chunk already ends with one.
fn push_chunk(output: &mut String, chunk: &str, first: bool) {
    if !first && !output.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(chunk);
}

/// Renders one section, recursively substituting its references.
pub fn tangle_section(
    file: &CodeFile,
    name: &SectionName,
    detector: &mut CycleDetector,
) -> Result<String> {
    detector.enter(name)?;

    let section = file
        .find_code_section_by_name(name.as_str())
        .ok_or_else(|| TangleError::MissingSection {
            file: file.name().to_string(),
            section: name.clone(),
        })?;

    let mut output = String::new();
    for (i, chunk) in section.chunks().iter().enumerate() {
        let expanded = replace_references(chunk, |child| tangle_section(file, child, detector))?;
        push_chunk(&mut output, &expanded, i == 0);
    }

    detector.exit();
    Ok(output)
}

/// Tangles a whole file starting from its `root` section.
pub fn tangle_file(file: &CodeFile) -> Result<String> {
    tracing::debug!("Tangling {}", file.name());
    let mut detector = CycleDetector::new(file.name());
    tangle_section(file, &SectionName::root(), &mut detector)
}
