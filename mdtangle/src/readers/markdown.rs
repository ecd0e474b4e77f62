//! Markdown parsing for code block extraction.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::Result;
use crate::model::{language_tag, Block};
use crate::text_location::TextLocation;

use super::fences::{extract_fences, Fence, FencedBlock};

/// A parsed markdown document.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    /// Code blocks in document order.
    pub blocks: Vec<Block>,
    /// Source file path.
    pub source_path: Option<PathBuf>,
}

impl ParsedDocument {
    /// Creates a new empty parsed document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source path.
    pub fn with_source_path(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }
}

/// Parses a markdown document and extracts its code blocks.
///
/// Every fenced block becomes a [`Block`] whose annotation is the fence's
/// info string; blocks whose language is not accepted by `config` are left
/// out. Unclosed fences are reported and skipped.
pub fn parse_markdown(
    input: &str,
    source_path: Option<&Path>,
    config: &Config,
) -> Result<ParsedDocument> {
    let mut doc = ParsedDocument::new();
    if let Some(path) = source_path {
        doc = doc.with_source_path(path.to_path_buf());
    }

    for fence in extract_fences(input) {
        match fence {
            Fence::Closed(fenced) => {
                if let Some(block) = process_code_block(fenced, source_path, config) {
                    doc.blocks.push(block);
                }
            }
            Fence::Unclosed(fenced) => {
                let location = locate(&fenced, source_path);
                tracing::warn!("Unclosed code block at {}, skipping", location);
            }
        }
    }

    Ok(doc)
}

fn locate(fenced: &FencedBlock, source_path: Option<&Path>) -> TextLocation {
    match source_path {
        Some(path) => fenced.location.clone().in_file(path),
        None => fenced.location.clone(),
    }
}

/// Turns a fenced block into a [`Block`], or `None` if its language is filtered out.
fn process_code_block(
    fenced: FencedBlock,
    source_path: Option<&Path>,
    config: &Config,
) -> Option<Block> {
    if !config.accepts_language(language_tag(&fenced.info)) {
        return None;
    }

    let location = locate(&fenced, source_path);
    let block = if fenced.info.is_empty() {
        Block::unannotated(fenced.content)
    } else {
        Block::new(fenced.info, fenced.content)
    };
    Some(block.with_location(location))
}

/// Reads a markdown file and parses it.
pub fn read_markdown_file(path: &Path, config: &Config) -> Result<ParsedDocument> {
    let content = std::fs::read_to_string(path)?;
    parse_markdown(&content, Some(path), config)
}
