//! Sections: named fragments of an output file.

use super::section_name::SectionName;

/// A named fragment of a code file, built from one or more blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSection {
    name: SectionName,
    /// Name of the owning code file.
    file: String,
    /// Raw block texts, in the order the blocks were added.
    chunks: Vec<String>,
    /// Sections referenced from the chunks, by name only.
    children: Vec<SectionName>,
}

impl CodeSection {
    pub(crate) fn new(name: SectionName, file: impl Into<String>) -> Self {
        Self {
            name,
            file: file.into(),
            chunks: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &SectionName {
        &self.name
    }

    /// Name of the code file this section belongs to.
    pub fn file_name(&self) -> &str {
        &self.file
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Referenced section names, in order of first appearance.
    pub fn children(&self) -> &[SectionName] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub(crate) fn push_chunk(&mut self, text: String) {
        self.chunks.push(text);
    }

    /// Registers a child reference unless it is already known.
    pub(crate) fn add_child(&mut self, name: SectionName) {
        if !self.children.contains(&name) {
            self.children.push(name);
        }
    }
}
