//! mdtangle - tangle annotated markdown code blocks into source files
//!
//! Code blocks carry an annotation of the form `<lang> > <filename>#<section>`.
//! Blocks are grouped into sections of output files, and a block may pull a
//! section into its text with a `<<#section>>` marker. Generating a file
//! expands its `root` section recursively.
//!
//! # Example
//!
//! ```
//! use mdtangle::{Block, CodeStore};
//!
//! let mut store = CodeStore::new();
//! store.add_node(Block::new("js > math.js", "function sum(a, b) {\n<<#body>>\n}")).unwrap();
//! store.add_node(Block::new("js > math.js#body", "  return a + b")).unwrap();
//!
//! assert_eq!(
//!     store.generate_source("math.js").unwrap(),
//!     "function sum(a, b) {\n  return a + b\n}"
//! );
//! ```
//!
//! Whole documents are handled by [`interface`]:
//!
//! ```no_run
//! use mdtangle::interface::{tangle_documents, Context};
//!
//! let ctx = Context::from_current_dir().unwrap();
//! let transaction = tangle_documents(&ctx).unwrap();
//! transaction.execute().unwrap();
//! ```

pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{Result, TangleError};
pub use interface::Context;
pub use model::{Block, CodeFile, CodeSection, CodeStore, SectionName};
