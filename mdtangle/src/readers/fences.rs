//! Fenced code block extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_location::TextLocation;

/// Pattern for matching code fence openings.
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<indent>\s*)(?P<fence>`{3,}|~{3,})(?P<info>.*)$").unwrap());

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    /// The info string after the opening fence, trimmed.
    pub info: String,
    /// Lines between the fences, joined by `\n`, fence indentation removed.
    pub content: String,
    /// Location of the opening fence.
    pub location: TextLocation,
    /// Indentation of the opening fence.
    pub indent: String,
}

/// Outcome of scanning one fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fence {
    /// A properly closed block.
    Closed(FencedBlock),
    /// The input ended before the closing fence.
    Unclosed(FencedBlock),
}

struct Opening<'a> {
    indent: &'a str,
    fence_char: char,
    fence_len: usize,
    info: &'a str,
}

fn opening(line: &str) -> Option<Opening<'_>> {
    let caps = FENCE_OPEN.captures(line)?;
    let fence = caps.name("fence")?.as_str();
    let info = caps.name("info")?.as_str();
    let fence_char = fence.chars().next()?;

    // A backtick fence cannot carry backticks in its info string.
    if fence_char == '`' && info.contains('`') {
        return None;
    }

    Some(Opening {
        indent: caps.name("indent")?.as_str(),
        fence_char,
        fence_len: fence.len(),
        info: info.trim(),
    })
}

fn is_closing(line: &str, fence_char: char, fence_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= fence_len && trimmed.chars().all(|c| c == fence_char)
}

/// Extracts every fenced code block from `input`, in document order.
pub fn extract_fences(input: &str) -> Vec<Fence> {
    let mut fences = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let Some(open) = opening(line) else {
            continue;
        };

        let mut content_lines = Vec::new();
        let mut closed = false;

        for (_, content_line) in lines.by_ref() {
            if is_closing(content_line, open.fence_char, open.fence_len) {
                closed = true;
                break;
            }
            let stripped = content_line
                .strip_prefix(open.indent)
                .unwrap_or(content_line);
            content_lines.push(stripped);
        }

        let block = FencedBlock {
            info: open.info.to_string(),
            content: content_lines.join("\n"),
            location: TextLocation::line_only(index + 1),
            indent: open.indent.to_string(),
        };

        fences.push(if closed {
            Fence::Closed(block)
        } else {
            Fence::Unclosed(block)
        });
    }

    fences
}
