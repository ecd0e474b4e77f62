//! Tangle command implementation.

use std::path::PathBuf;

use mdtangle::errors::Result;
use mdtangle::interface::{tangle_documents, tangle_files, Context};

use super::helpers::{run_transaction, TransactionOptions};

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Dry run - show what would be done without doing it.
    pub dry_run: bool,
    /// Suppress normal output.
    pub quiet: bool,
    /// Glob patterns to filter source files.
    pub glob: Vec<String>,
    /// Specific files to tangle (empty means all).
    pub files: Vec<PathBuf>,
}

/// Executes the tangle command.
pub fn tangle(ctx: &Context, options: TangleOptions) -> Result<()> {
    let has_filters = !options.files.is_empty() || !options.glob.is_empty();

    let transaction = if !has_filters {
        tangle_documents(ctx)?
    } else {
        let mut selected = Vec::new();
        if !options.files.is_empty() {
            selected.extend(ctx.source_files_filtered(&options.files)?);
        }
        if !options.glob.is_empty() {
            selected.extend(ctx.source_files_glob(&options.glob)?);
        }
        selected.sort();
        selected.dedup();
        tangle_files(ctx, &selected)?
    };

    run_transaction(
        transaction,
        &TransactionOptions {
            dry_run: options.dry_run,
            quiet: options.quiet,
        },
    )
}
