//! High-level interface for tangle passes.

mod context;
mod document;

pub use context::Context;
pub use document::{
    build_store, normalize_output, render_output, tangle_documents, tangle_files, tangle_store,
    Document,
};
