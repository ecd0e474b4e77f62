//! List command implementation.

use serde_json::{json, Value};

use mdtangle::errors::Result;
use mdtangle::interface::Context;
use mdtangle::CodeStore;

use super::helpers::load_store;

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Print JSON instead of text.
    pub json: bool,
}

/// Describes every generated file, its output path and its sections.
fn summarize(ctx: &Context, store: &CodeStore) -> Value {
    let files: Vec<Value> = store
        .files()
        .map(|file| {
            let sections: Vec<Value> = file
                .sections()
                .map(|section| {
                    json!({
                        "name": section.name(),
                        "blocks": section.chunks().len(),
                        "children": section.children(),
                    })
                })
                .collect();
            json!({
                "name": file.name(),
                "path": ctx.output_path(file.name()),
                "sections": sections,
            })
        })
        .collect();
    Value::Array(files)
}

fn format_text(store: &CodeStore) -> String {
    let mut out = String::new();
    for file in store.files() {
        out.push_str(file.name());
        out.push('\n');
        for section in file.sections() {
            out.push_str(&format!("  {} ({} blocks)", section.name(), section.chunks().len()));
            if !section.children().is_empty() {
                let children: Vec<&str> = section.children().iter().map(|c| c.as_str()).collect();
                out.push_str(&format!(" -> {}", children.join(", ")));
            }
            out.push('\n');
        }
    }
    out
}

/// Executes the list command.
pub fn list(ctx: &Context, options: ListOptions) -> Result<()> {
    let store = load_store(ctx)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summarize(ctx, &store))?);
    } else if store.is_empty() {
        println!("No generated files.");
    } else {
        print!("{}", format_text(&store));
    }

    Ok(())
}
