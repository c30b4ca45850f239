//! Directive and description extraction from YAML comments.
//!
//! Comments double as a documentation channel: they hold the field
//! description, an optional verbatim example, and `+doc-gen:` directives
//! that change how the walker treats a field. A comment is a directive only
//! when its whole text is a recognised token; anything else, including a
//! token on one line of a longer comment, is description text.

use crate::schema::SchemaMarker;

#[cfg(test)]
mod tests;

/// Line introducing a verbatim example block in a head comment.
pub const EXAMPLE_HEADER: &str = "Example:";

/// A control token embedded in a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Skip the field: no row, no recursion, dropped from the destination.
    Ignore,
    /// Document the field as a single leaf row and do not descend into it.
    Break,
}

impl Directive {
    /// The exact comment text that spells this directive.
    pub fn token(self) -> &'static str {
        match self {
            Directive::Ignore => "+doc-gen:ignore",
            Directive::Break => "+doc-gen:break",
        }
    }

    /// Parses a comment as a directive.
    ///
    /// Returns `None` unless the trimmed comment text equals a directive
    /// token exactly. A multi-line comment never matches.
    pub fn parse(comment: &str) -> Option<Self> {
        let value = comment_value(comment);
        [Directive::Ignore, Directive::Break]
            .into_iter()
            .find(|directive| directive.token() == value)
    }
}

/// Strips the comment marker and surrounding whitespace from a comment line.
///
/// # Example
///
/// ```
/// use valuedoc::annotation::comment_value;
///
/// assert_eq!(comment_value("  #   +doc-gen:break  "), "+doc-gen:break");
/// ```
pub fn comment_value(line: &str) -> String {
    let trimmed = line.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim().to_string()
}

/// Strips only the comment marker, keeping the text after it verbatim.
///
/// Used where the formatting of an example value must survive unchanged.
pub fn comment_example_value(line: &str) -> String {
    let trimmed = line.trim_start();
    trimmed.strip_prefix('#').unwrap_or(trimmed).to_string()
}

/// Checks whether the whole comment spells the directive.
pub fn has_directive(comment: &str, directive: Directive) -> bool {
    Directive::parse(comment) == Some(directive)
}

/// Extracts the descriptive text of a comment.
///
/// A comment that is a directive has no description. Otherwise schema
/// markers and everything from an `Example:` line on are skipped; the
/// remaining lines are trimmed and joined with single spaces.
pub fn description(comment: &str) -> String {
    if Directive::parse(comment).is_some() {
        return String::new();
    }

    comment
        .lines()
        .map(comment_value)
        .take_while(|value| !is_example_header(value))
        .filter(|value| !value.is_empty())
        .filter(|value| SchemaMarker::parse(value).is_none())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts the verbatim example block that follows an `Example:` line.
///
/// Returns `None` when the comment has no example header or the block is
/// empty.
pub fn example(comment: &str) -> Option<String> {
    let lines: Vec<String> = comment
        .lines()
        .skip_while(|line| !is_example_header(&comment_value(line)))
        .skip(1)
        .map(comment_example_value)
        .collect();

    if lines.iter().all(|line| line.trim().is_empty()) {
        return None;
    }
    Some(lines.join("\n"))
}

fn is_example_header(value: &str) -> bool {
    value.eq_ignore_ascii_case(EXAMPLE_HEADER)
}
