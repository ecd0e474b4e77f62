//! Document readers.

mod fences;
mod markdown;

pub use fences::{extract_fences, Fence, FencedBlock};
pub use markdown::{parse_markdown, read_markdown_file, ParsedDocument};
