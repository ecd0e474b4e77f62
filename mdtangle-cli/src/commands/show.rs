//! Show command implementation.

use mdtangle::errors::Result;
use mdtangle::interface::{render_output, Context};

use super::helpers::load_store;

/// Renders the generated file `target` as it would be written.
pub fn render(ctx: &Context, target: &str) -> Result<String> {
    let store = load_store(ctx)?;
    render_output(ctx, &store, target)
}

/// Executes the show command.
pub fn show(ctx: &Context, target: &str) -> Result<()> {
    print!("{}", render(ctx, target)?);
    Ok(())
}
