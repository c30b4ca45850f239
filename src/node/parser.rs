//! Indentation-driven parser for block-style YAML values documents.
//!
//! The parser works on the line stream produced by the scanner. Comments
//! are attached while parsing: full-line comments directly above a key (or a
//! sequence item) become its head comment, a trailing comment becomes its
//! line comment. A blank line discards the comments collected so far.

use std::collections::HashSet;

use super::{
    Annotations, MapEntry, Node, NodeKind, ParseError, ScalarStyle,
    flow::{parse_inline, parse_key},
    scanner::{self, Line},
};

/// Parses a values document into its root node.
///
/// An empty document (only blank lines and comments) yields a null node.
///
/// # Errors
///
/// Returns `ParseError` if the document is not well formed or uses YAML
/// features outside the supported subset.
///
/// # Example
///
/// ```
/// let root = valuedoc::node::parse("replicas: 3 # pod count\n").unwrap();
/// let entry = root.field("replicas").unwrap();
/// assert_eq!(entry.value.as_scalar(), Some("3"));
/// assert_eq!(entry.key.annotations.line_comment, "# pod count");
/// ```
pub fn parse(input: &str) -> Result<Node, ParseError> {
    Parser::new(scanner::scan(input)).parse_document()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    Clip,
    Strip,
    Keep,
}

#[derive(Debug, Clone, Copy)]
struct BlockScalarHeader {
    style: ScalarStyle,
    chomping: Chomping,
    indent: Option<usize>,
}

struct Parser {
    lines: Vec<Line>,
    pos: usize,
    pending_head: Vec<String>,
}

impl Parser {
    fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            pos: 0,
            pending_head: Vec::new(),
        }
    }

    fn parse_document(&mut self) -> Result<Node, ParseError> {
        self.skip_document_start();

        let Some(first) = self.peek_content() else {
            return Ok(Node::null());
        };
        let indent = first.indent;
        let root = self.parse_block(indent)?;

        let Some(line) = self.peek_content() else {
            return Ok(root);
        };
        let (number, text, line_indent) = (line.number, line.text.clone(), line.indent);

        match text.as_str() {
            "..." => {
                self.pos += 1;
                match self.peek_content() {
                    None => Ok(root),
                    Some(line) => Err(ParseError::new(
                        line.number,
                        "content after document end marker",
                    )),
                }
            }
            "---" => Err(ParseError::new(
                number,
                "multiple documents are not supported",
            )),
            _ if line_indent > indent => Err(ParseError::new(number, "unexpected indentation")),
            _ => Err(ParseError::new(
                number,
                format!("unexpected content '{text}'"),
            )),
        }
    }

    fn skip_document_start(&mut self) {
        loop {
            let Some(line) = self.peek_content() else {
                return;
            };
            if line.text == "---" || line.text.starts_with('%') {
                self.pos += 1;
                self.pending_head.clear();
            } else {
                return;
            }
        }
    }

    /// Skips blank and comment-only lines, collecting head comments, and
    /// returns the next content line.
    fn peek_content(&mut self) -> Option<&Line> {
        while let Some(line) = self.lines.get(self.pos) {
            if line.is_blank() {
                self.pending_head.clear();
            } else if line.is_comment_only() {
                if let Some(comment) = &line.comment {
                    self.pending_head.push(comment.clone());
                }
            } else {
                break;
            }
            self.pos += 1;
        }
        self.lines.get(self.pos)
    }

    fn take_head(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_head)
    }

    /// Parses the block starting at the current content line, which sits at
    /// `indent`.
    fn parse_block(&mut self, indent: usize) -> Result<Node, ParseError> {
        let Some(line) = self.peek_content().cloned() else {
            return Ok(Node::null());
        };
        check_indentation(&line)?;

        if is_sequence_item(&line.text) {
            self.parse_sequence(indent)
        } else if find_mapping_colon(&line.text).is_some() {
            self.parse_mapping(indent)
        } else if line.text.starts_with("? ") || line.text == "?" {
            Err(ParseError::new(line.number, "complex mapping keys are not supported"))
        } else {
            let head = self.take_head();
            self.pos += 1;
            let node = self.parse_value_text(&line.text, indent, line.number)?;
            Ok(node.with_annotations(Annotations {
                head_comment: head.join("\n"),
                line_comment: line.comment.unwrap_or_default(),
            }))
        }
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Node, ParseError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        loop {
            let Some(line) = self.peek_content() else {
                break;
            };
            if line.indent < indent || is_sequence_item(&line.text) || is_document_marker(&line.text)
            {
                break;
            }
            let line = line.clone();
            if line.indent > indent {
                return Err(ParseError::new(line.number, "unexpected indentation"));
            }
            check_indentation(&line)?;

            let colon = find_mapping_colon(&line.text).ok_or_else(|| {
                ParseError::new(
                    line.number,
                    format!("expected a mapping key, found '{}'", line.text),
                )
            })?;
            let key_text = line.text[..colon].trim_end();
            let rest = line.text[colon + 1..].trim();

            let key = parse_key(key_text, line.number)?.with_annotations(Annotations {
                head_comment: self.take_head().join("\n"),
                line_comment: line.comment.clone().unwrap_or_default(),
            });
            let name = key.as_scalar().unwrap_or_default().to_string();
            if !seen.insert(name.clone()) {
                return Err(ParseError::new(
                    line.number,
                    format!("duplicate key '{name}'"),
                ));
            }

            self.pos += 1;
            let value = if rest.is_empty() {
                self.parse_nested_value(indent)?
            } else {
                self.parse_value_text(rest, indent, line.number)?
            };

            entries.push(MapEntry::new(key, value));
        }

        Ok(Node::new(NodeKind::Map(entries)))
    }

    /// Parses the value of a `key:` line that has nothing after the colon.
    fn parse_nested_value(&mut self, parent_indent: usize) -> Result<Node, ParseError> {
        let Some(next) = self.peek_content() else {
            return Ok(Node::null());
        };

        if next.indent > parent_indent {
            let indent = next.indent;
            self.parse_block(indent)
        } else if next.indent == parent_indent && is_sequence_item(&next.text) {
            self.parse_sequence(parent_indent)
        } else {
            Ok(Node::null())
        }
    }

    fn parse_sequence(&mut self, indent: usize) -> Result<Node, ParseError> {
        let mut items = Vec::new();

        loop {
            let Some(line) = self.peek_content() else {
                break;
            };
            if line.indent < indent || (line.indent == indent && !is_sequence_item(&line.text)) {
                break;
            }
            let line = line.clone();
            if line.indent > indent {
                return Err(ParseError::new(line.number, "unexpected indentation"));
            }
            check_indentation(&line)?;

            let head = self.take_head();
            let after_dash = &line.text[1..];
            let rest = after_dash.trim_start();
            let item_indent = indent + 1 + (after_dash.len() - rest.len());

            let item = if rest.is_empty() {
                self.pos += 1;
                let value = match self.peek_content() {
                    Some(next) if next.indent > indent => {
                        let nested = next.indent;
                        self.parse_block(nested)?
                    }
                    _ => Node::null(),
                };
                annotate_item(value, head, line.comment)
            } else if is_sequence_item(rest) || find_mapping_colon(rest).is_some() {
                // Compact form (`- key: value`, `- - item`): reparse the rest of
                // the line as the first line of a block at the item's column.
                self.lines[self.pos] = Line {
                    indent: item_indent,
                    text: rest.to_string(),
                    ..line.clone()
                };
                self.pending_head = head;
                self.parse_block(item_indent)?
            } else {
                self.pos += 1;
                let value = self.parse_value_text(rest, indent, line.number)?;
                annotate_item(value, head, line.comment)
            };

            items.push(item);
        }

        Ok(Node::new(NodeKind::Sequence(items)))
    }

    /// Parses a value written on the same line as its key or dash.
    fn parse_value_text(
        &mut self,
        text: &str,
        parent_indent: usize,
        number: usize,
    ) -> Result<Node, ParseError> {
        match block_scalar_header(text) {
            Some(header) => self.parse_block_scalar(header, parent_indent),
            None => parse_inline(text, number),
        }
    }

    fn parse_block_scalar(
        &mut self,
        header: BlockScalarHeader,
        parent_indent: usize,
    ) -> Result<Node, ParseError> {
        let mut raw_lines: Vec<(usize, &str)> = Vec::new();
        let mut end = self.pos;

        while let Some(line) = self.lines.get(end) {
            let leading = leading_spaces(&line.raw);
            let blank = line.raw.trim().is_empty();
            if !blank && leading <= parent_indent {
                break;
            }
            raw_lines.push((line.number, line.raw.as_str()));
            end += 1;
        }

        let content_indent = match header.indent {
            Some(explicit) => parent_indent + explicit,
            None => raw_lines
                .iter()
                .find(|(_, raw)| !raw.trim().is_empty())
                .map(|(_, raw)| leading_spaces(raw))
                .unwrap_or(parent_indent + 1),
        };

        let mut content = Vec::with_capacity(raw_lines.len());
        for (line_number, raw) in &raw_lines {
            if raw.trim().is_empty() {
                content.push(String::new());
            } else if leading_spaces(raw) < content_indent {
                return Err(ParseError::new(
                    *line_number,
                    "insufficient indentation in block scalar",
                ));
            } else {
                content.push(raw[content_indent..].to_string());
            }
        }

        self.pos = end;

        Ok(Node::scalar_with_style(
            fold_block_scalar(&content, header),
            header.style,
        ))
    }
}

fn annotate_item(node: Node, head: Vec<String>, line_comment: Option<String>) -> Node {
    node.with_annotations(Annotations {
        head_comment: head.join("\n"),
        line_comment: line_comment.unwrap_or_default(),
    })
}

fn check_indentation(line: &Line) -> Result<(), ParseError> {
    if line.tab_indent {
        return Err(ParseError::new(
            line.number,
            "tabs are not allowed in indentation",
        ));
    }
    Ok(())
}

fn leading_spaces(raw: &str) -> usize {
    raw.chars().take_while(|c| *c == ' ').count()
}

fn is_sequence_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ") || text.starts_with("-\t")
}

fn is_document_marker(text: &str) -> bool {
    text == "---" || text == "..."
}

/// Finds the byte offset of the `:` separating a block mapping key from its
/// value, if the line is a mapping entry.
fn find_mapping_colon(text: &str) -> Option<usize> {
    let first = text.chars().next()?;

    let key_end = match first {
        '[' | '{' => return None,
        '"' | '\'' => closing_quote(text, first)? + 1,
        _ => 0,
    };

    let rest = &text[key_end..];
    if key_end > 0 {
        let trimmed = rest.trim_start();
        let offset = key_end + (rest.len() - trimmed.len());
        return trimmed
            .strip_prefix(':')
            .filter(|after| after.is_empty() || after.starts_with([' ', '\t']))
            .map(|_| offset);
    }

    let bytes = text.as_bytes();
    text.char_indices()
        .find(|(i, c)| {
            *c == ':'
                && bytes
                    .get(i + 1)
                    .is_none_or(|next| *next == b' ' || *next == b'\t')
        })
        .map(|(i, _)| i)
}

fn closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut chars = text.char_indices().skip(1).peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if quote == '"' => {
                chars.next();
            }
            '\'' if quote == '\'' && chars.peek().is_some_and(|(_, next)| *next == '\'') => {
                chars.next();
            }
            c if c == quote => return Some(i),
            _ => {}
        }
    }
    None
}

fn block_scalar_header(text: &str) -> Option<BlockScalarHeader> {
    let mut chars = text.chars();
    let style = match chars.next()? {
        '|' => ScalarStyle::Literal,
        '>' => ScalarStyle::Folded,
        _ => return None,
    };

    let mut header = BlockScalarHeader {
        style,
        chomping: Chomping::Clip,
        indent: None,
    };
    for c in chars {
        match c {
            '-' => header.chomping = Chomping::Strip,
            '+' => header.chomping = Chomping::Keep,
            '1'..='9' => header.indent = c.to_digit(10).map(|d| d as usize),
            _ => return None,
        }
    }
    Some(header)
}

fn fold_block_scalar(lines: &[String], header: BlockScalarHeader) -> String {
    let body_len = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |last| last + 1);
    let (body, trailing) = lines.split_at(body_len);

    let mut value = match header.style {
        ScalarStyle::Folded => fold_lines(body),
        _ => body.join("\n"),
    };

    match header.chomping {
        Chomping::Strip => {}
        Chomping::Clip => {
            if !value.is_empty() {
                value.push('\n');
            }
        }
        Chomping::Keep => {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(&"\n".repeat(trailing.len()));
        }
    }

    value
}

fn fold_lines(lines: &[String]) -> String {
    let mut folded = String::new();
    let mut previous: Option<&str> = None;

    for line in lines {
        if line.is_empty() {
            folded.push('\n');
        } else {
            if let Some(prev) = previous.filter(|prev| !prev.is_empty()) {
                let more_indented = |l: &str| l.starts_with([' ', '\t']);
                if more_indented(prev) || more_indented(line) {
                    folded.push('\n');
                } else {
                    folded.push(' ');
                }
            }
            folded.push_str(line);
        }
        previous = Some(line);
    }

    folded
}
