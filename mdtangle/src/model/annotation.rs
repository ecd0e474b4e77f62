//! Annotation parsing for code blocks.
//!
//! An annotation is the info string attached to a code block. It names the
//! output file and the section the block belongs to:
//!
//! ```text
//! [<lang>] [> [<filename>][#<section>]]
//! ```
//!
//! `js`, `js > math.js`, `js > #greet` and ` > math.js#sum-body` are all valid.

use nom::{
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
    combinator::opt,
    sequence::preceded,
    IResult, Parser,
};

use super::section_name::SectionName;
use crate::errors::{Result, TangleError};

/// Output file used when an annotation does not name one.
pub const DEFAULT_FILENAME: &str = "index.js";

/// A parsed annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// The language tag before `>`, if any.
    pub language: Option<String>,
    /// Target output file.
    pub filename: String,
    /// Target section within the file.
    pub section: SectionName,
}

type Destination<'a> = (Option<&'a str>, Option<&'a str>);

/// Characters allowed in a section name.
pub(crate) fn is_section_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '/')
}

fn is_filename_char(c: char) -> bool {
    !c.is_whitespace() && c != '#' && c != '>'
}

/// Parse the language tag: everything before the first `>`.
fn parse_language(input: &str) -> IResult<&str, Option<&str>> {
    let (input, tag) = take_till(|c: char| c == '>').parse(input)?;
    let tag = tag.trim();
    Ok((input, (!tag.is_empty()).then_some(tag)))
}

/// Parse a section reference: `#name`
fn parse_section(input: &str) -> IResult<&str, &str> {
    preceded(char('#'), take_while1(is_section_char)).parse(input)
}

/// Parse the destination: `> [filename][#section]`
fn parse_destination(input: &str) -> IResult<&str, Destination<'_>> {
    preceded(
        (char('>'), multispace0),
        (opt(take_while1(is_filename_char)), opt(parse_section)),
    )
    .parse(input)
}

fn parse_annotation_inner(input: &str) -> IResult<&str, (Option<&str>, Option<Destination<'_>>)> {
    let (input, language) = parse_language(input)?;
    let (input, destination) = opt(parse_destination).parse(input)?;
    let (input, _) = multispace0.parse(input)?;
    Ok((input, (language, destination)))
}

/// Returns the language tag of an annotation without validating the rest.
pub fn language_tag(raw: &str) -> Option<&str> {
    parse_language(raw).ok().and_then(|(_, tag)| tag)
}

fn format_error(raw: &str, message: String) -> TangleError {
    TangleError::Format {
        annotation: raw.to_string(),
        message,
        location: None,
    }
}

/// Parses an annotation, defaulting the filename to [`DEFAULT_FILENAME`].
pub fn parse_annotation(raw: Option<&str>) -> Result<Annotation> {
    parse_annotation_with_default(raw, DEFAULT_FILENAME)
}

/// Parses an annotation with a custom default filename.
pub fn parse_annotation_with_default(raw: Option<&str>, default_filename: &str) -> Result<Annotation> {
    let raw = raw.unwrap_or_default();

    let (language, destination) = match parse_annotation_inner(raw) {
        Ok(("", parsed)) => parsed,
        Ok(("#", _)) => {
            return Err(format_error(raw, "missing section name after '#'".to_string()))
        }
        Ok((remaining, _)) => {
            return Err(format_error(raw, format!("unexpected input '{}'", remaining)))
        }
        Err(e) => return Err(format_error(raw, e.to_string())),
    };

    let (filename, section) = destination.unwrap_or((None, None));

    Ok(Annotation {
        language: language.map(str::to_string),
        filename: filename.unwrap_or(default_filename).to_string(),
        section: section.map(SectionName::new).unwrap_or_else(SectionName::root),
    })
}
