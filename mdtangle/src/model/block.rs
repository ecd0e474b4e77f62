//! Code blocks handed to the store.

use crate::text_location::TextLocation;

/// A single annotated code block.
///
/// Blocks are produced by a document reader and consumed by
/// [`CodeStore::add_node`](super::CodeStore::add_node); their text lives on as
/// a chunk of the section they are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// The annotation (info string), e.g. `js > math.js#sum-body`.
    pub annotation: Option<String>,
    /// The raw code.
    pub text: String,
    /// Where the block came from, if known.
    pub location: Option<TextLocation>,
}

impl Block {
    /// Creates a block from an annotation and its text.
    pub fn new(annotation: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            annotation: Some(annotation.into()),
            text: text.into(),
            location: None,
        }
    }

    /// Creates a block without an annotation.
    pub fn unannotated(text: impl Into<String>) -> Self {
        Self {
            annotation: None,
            text: text.into(),
            location: None,
        }
    }

    /// Sets the source location.
    pub fn with_location(mut self, location: TextLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the annotation, if any.
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }
}
