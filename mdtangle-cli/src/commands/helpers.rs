//! Shared command helpers.

use mdtangle::errors::Result;
use mdtangle::interface::{build_store, Context};
use mdtangle::io::Transaction;
use mdtangle::CodeStore;

/// Common options for transaction-based commands.
pub struct TransactionOptions {
    pub dry_run: bool,
    pub quiet: bool,
}

/// Runs a transaction, honouring dry-run and quiet.
pub fn run_transaction(transaction: Transaction, options: &TransactionOptions) -> Result<()> {
    let pending = transaction.describe();

    if pending.is_empty() {
        if !options.quiet {
            println!("Nothing to tangle, all {} files up to date.", transaction.len());
        }
        return Ok(());
    }

    if options.dry_run {
        println!("Would perform {} actions:", pending.len());
        for desc in pending {
            println!("  {}", desc);
        }
        return Ok(());
    }

    let written = transaction.execute()?;

    if !options.quiet {
        println!("Tangled {} files.", written.len());
    }

    Ok(())
}

/// Builds a store from every configured source file.
pub fn load_store(ctx: &Context) -> Result<CodeStore> {
    let sources = ctx.source_files()?;
    build_store(ctx, &sources)
}
