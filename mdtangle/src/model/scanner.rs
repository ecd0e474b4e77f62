//! Reference markers inside code block text.
//!
//! A marker `<<name>>` splices the rendered text of section `name` into the
//! surrounding code. The leading `#` is optional, so `<<greet>>` and
//! `<<#greet>>` address the same section.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::annotation::{is_section_char, parse_annotation_with_default, DEFAULT_FILENAME};
use super::block::Block;
use super::section_name::SectionName;
use crate::errors::Result;

/// Pattern for marker candidates. A candidate is a marker only when its name
/// is made of the characters a block annotation accepts in a section name.
pub static REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<(?P<refname>#?[^<>#\s]+)>>").unwrap());

/// One occurrence of a reference marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMarker {
    /// The referenced section.
    pub name: SectionName,
    /// Byte range of the whole marker, delimiters included.
    pub range: Range<usize>,
}

/// A block with its destination resolved and its references collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedBlock {
    /// Language tag from the annotation.
    pub language: Option<String>,
    /// Target output file.
    pub filename: String,
    /// Target section.
    pub section: SectionName,
    /// Referenced sections, in order of first occurrence, without duplicates.
    pub child_sections: Vec<SectionName>,
}

/// Yields every marker in `text`, in order.
pub fn find_references(text: &str) -> impl Iterator<Item = ReferenceMarker> + '_ {
    REF_PATTERN.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let refname = &caps["refname"];
        if !refname.trim_start_matches('#').chars().all(is_section_char) {
            return None;
        }
        Some(ReferenceMarker {
            name: SectionName::new(refname),
            range: whole.range(),
        })
    })
}

/// Returns the distinct sections referenced in `text`, in first-occurrence order.
pub fn scan_references(text: &str) -> Vec<SectionName> {
    let mut names: Vec<SectionName> = Vec::new();
    for marker in find_references(text) {
        if !names.contains(&marker.name) {
            names.push(marker.name);
        }
    }
    names
}

/// Replaces each marker with the text produced by `expand`.
///
/// Everything outside the markers is copied verbatim. The first error from
/// `expand` aborts the replacement.
pub fn replace_references<F>(text: &str, mut expand: F) -> Result<String>
where
    F: FnMut(&SectionName) -> Result<String>,
{
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for marker in find_references(text) {
        output.push_str(&text[last..marker.range.start]);
        output.push_str(&expand(&marker.name)?);
        last = marker.range.end;
    }

    output.push_str(&text[last..]);
    Ok(output)
}

/// Resolves a block's destination and collects its references.
pub fn scan_block(block: &Block) -> Result<AnnotatedBlock> {
    scan_block_with_default(block, DEFAULT_FILENAME)
}

/// Like [`scan_block`], with a custom default filename.
pub fn scan_block_with_default(block: &Block, default_filename: &str) -> Result<AnnotatedBlock> {
    let annotation = parse_annotation_with_default(block.annotation(), default_filename)
        .map_err(|e| e.with_location(block.location.as_ref()))?;

    Ok(AnnotatedBlock {
        language: annotation.language,
        filename: annotation.filename,
        section: annotation.section,
        child_sections: scan_references(&block.text),
    })
}
