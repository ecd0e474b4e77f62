//! Document-level tangling: from markdown files to queued writes.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::io::Transaction;
use crate::model::{Block, CodeStore};
use crate::readers::{parse_markdown, ParsedDocument};

use super::context::Context;

/// A markdown document loaded through the context's file cache.
#[derive(Debug)]
pub struct Document {
    /// Path to the source markdown file.
    pub path: PathBuf,
    /// Parsed document content.
    pub parsed: ParsedDocument,
}

impl Document {
    /// Loads a document from a file.
    pub fn load(path: &Path, ctx: &Context) -> Result<Self> {
        let content = ctx.file_cache.read(path)?;
        let parsed = parse_markdown(&content, Some(path), &ctx.config)?;

        Ok(Self {
            path: path.to_path_buf(),
            parsed,
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.parsed.blocks
    }
}

/// Builds a store from every block of the given documents, in order.
pub fn build_store(ctx: &Context, source_files: &[PathBuf]) -> Result<CodeStore> {
    let mut store = CodeStore::from_config(&ctx.config);

    for path in source_files {
        let doc = Document::load(path, ctx)?;
        tracing::debug!("{}: {} code blocks", path.display(), doc.blocks().len());
        store.add_nodes(doc.parsed.blocks)?;
    }

    Ok(store)
}

/// Renders one generated file as it will be written.
pub fn render_output(ctx: &Context, store: &CodeStore, name: &str) -> Result<String> {
    let text = store.generate_source(name)?;
    Ok(if ctx.config.trim_output {
        normalize_output(&text)
    } else {
        text
    })
}

/// Strips trailing whitespace and ends the text with exactly one newline.
pub fn normalize_output(text: &str) -> String {
    let mut output = text.trim_end().to_string();
    output.push('\n');
    output
}

/// Queues a write for every file in the store.
pub fn tangle_store(ctx: &Context, store: &CodeStore) -> Result<Transaction> {
    let mut transaction = Transaction::new();
    for name in store.file_names() {
        let content = render_output(ctx, store, name)?;
        transaction.write(ctx.output_path(name), content);
    }
    Ok(transaction)
}

/// Tangles all configured source documents.
pub fn tangle_documents(ctx: &Context) -> Result<Transaction> {
    let source_files = ctx.source_files()?;
    tangle_files(ctx, &source_files)
}

/// Tangles specific source files and produces output files.
pub fn tangle_files(ctx: &Context, source_files: &[PathBuf]) -> Result<Transaction> {
    let store = build_store(ctx, source_files)?;
    tracing::info!(
        "Tangled {} documents into {} files",
        source_files.len(),
        store.len()
    );
    tangle_store(ctx, &store)
}
