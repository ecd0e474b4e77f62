//! Core model: annotations, blocks, the code store and the tangle algorithm.

mod annotation;
mod block;
mod code_file;
mod code_section;
mod code_store;
mod scanner;
mod section_name;
mod tangle;

pub use annotation::{
    language_tag, parse_annotation, parse_annotation_with_default, Annotation, DEFAULT_FILENAME,
};
pub use block::Block;
pub use code_file::CodeFile;
pub use code_section::CodeSection;
pub use code_store::CodeStore;
pub use scanner::{
    find_references, replace_references, scan_block, scan_block_with_default, scan_references,
    AnnotatedBlock, ReferenceMarker, REF_PATTERN,
};
pub use section_name::{SectionName, DEFAULT_ALIAS, ROOT_SECTION};
pub use tangle::{tangle_file, tangle_section, CycleDetector};
