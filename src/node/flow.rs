//! Single-line values: plain and quoted scalars, flow mappings and sequences.

use std::collections::HashSet;

use super::{MapEntry, Node, NodeKind, ParseError, Scalar, ScalarStyle};

/// Parses the value part of a block line (`key: <value>` or `- <value>`).
pub(super) fn parse_inline(text: &str, line: usize) -> Result<Node, ParseError> {
    let mut parser = FlowParser::new(text, line);
    let node = parser.parse_value(false)?;
    parser.skip_whitespace();

    if !parser.is_eof() {
        let rest: String = parser.chars[parser.pos..].iter().collect();
        return Err(ParseError::new(
            line,
            format!("unexpected content after value: '{rest}'"),
        ));
    }

    if let NodeKind::Scalar(Scalar {
        value,
        style: ScalarStyle::Plain,
    }) = &node.kind
    {
        check_block_plain(value, line)?;
    }

    Ok(node)
}

/// Rejects block-context plain scalars that start a nested collection on the
/// same line (`k: a: b`, `k: - a`).
fn check_block_plain(value: &str, line: usize) -> Result<(), ParseError> {
    if value.contains(": ") || value.ends_with(':') {
        return Err(ParseError::new(
            line,
            format!("mapping values are not allowed here: '{value}'"),
        ));
    }
    if value == "-" || value.starts_with("- ") {
        return Err(ParseError::new(
            line,
            format!("sequence entries are not allowed here: '{value}'"),
        ));
    }
    Ok(())
}

/// Parses a block mapping key.
pub(super) fn parse_key(text: &str, line: usize) -> Result<Node, ParseError> {
    match text.chars().next() {
        Some('"' | '\'') => parse_inline(text, line),
        Some('[' | '{') => Err(ParseError::new(line, "complex mapping keys are not supported")),
        _ => Ok(Node::scalar(text)),
    }
}

struct FlowParser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl FlowParser {
    fn new(text: &str, line: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line,
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_n(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, message)
    }

    /// `in_flow` selects flow-context plain scalars, which end at `,`, `]`
    /// and `}`.
    fn parse_value(&mut self, in_flow: bool) -> Result<Node, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.parse_sequence(),
            Some('{') => self.parse_mapping(),
            Some('"') => self.parse_double_quoted(),
            Some('\'') => self.parse_single_quoted(),
            _ => Ok(self.parse_plain(in_flow, false)),
        }
    }

    fn parse_plain(&mut self, in_flow: bool, is_key: bool) -> Node {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if in_flow && matches!(c, ',' | ']' | '}') {
                break;
            }
            if is_key
                && c == ':'
                && self
                    .peek_n(1)
                    .is_none_or(|next| next.is_whitespace() || matches!(next, ',' | ']' | '}'))
            {
                break;
            }
            self.pos += 1;
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        let text = text.trim();
        if text.is_empty() && in_flow {
            Node::null()
        } else {
            Node::scalar(text)
        }
    }

    fn parse_sequence(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.advance();
                    break;
                }
                None => return Err(self.error(unterminated("sequence"))),
                _ => {}
            }

            items.push(self.parse_value(true)?);
            self.skip_whitespace();

            match self.advance() {
                Some(',') => continue,
                Some(']') => break,
                Some(c) => return Err(self.error(format!("expected ',' or ']' but found '{c}'"))),
                None => return Err(self.error(unterminated("sequence"))),
            }
        }

        Ok(Node::new(NodeKind::Sequence(items)))
    }

    fn parse_mapping(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.advance();
                    break;
                }
                None => return Err(self.error(unterminated("mapping"))),
                _ => {}
            }

            let key = match self.peek() {
                Some('"') => self.parse_double_quoted()?,
                Some('\'') => self.parse_single_quoted()?,
                Some('[' | '{') => return Err(self.error("complex mapping keys are not supported")),
                _ => self.parse_plain(true, true),
            };
            let name = key.as_scalar().unwrap_or_default().to_string();
            if !seen.insert(name.clone()) {
                return Err(self.error(format!("duplicate key '{name}'")));
            }

            self.skip_whitespace();
            let value = if self.peek() == Some(':') {
                self.advance();
                self.skip_whitespace();
                if matches!(self.peek(), Some(',' | '}')) {
                    Node::null()
                } else {
                    self.parse_value(true)?
                }
            } else {
                Node::null()
            };
            entries.push(MapEntry::new(key, value));

            self.skip_whitespace();
            match self.advance() {
                Some(',') => continue,
                Some('}') => break,
                Some(c) => return Err(self.error(format!("expected ',' or '}}' but found '{c}'"))),
                None => return Err(self.error(unterminated("mapping"))),
            }
        }

        Ok(Node::new(NodeKind::Map(entries)))
    }

    fn parse_double_quoted(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => value.push(self.parse_escape()?),
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated double-quoted scalar")),
            }
        }

        Ok(Node::scalar_with_style(value, ScalarStyle::DoubleQuoted))
    }

    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let c = self
            .advance()
            .ok_or_else(|| self.error("unterminated escape sequence"))?;

        let decoded = match c {
            '0' => '\0',
            'a' => '\u{07}',
            'b' => '\u{08}',
            't' | '\t' => '\t',
            'n' => '\n',
            'v' => '\u{0B}',
            'f' => '\u{0C}',
            'r' => '\r',
            'e' => '\u{1B}',
            ' ' => ' ',
            '"' => '"',
            '/' => '/',
            '\\' => '\\',
            'N' => '\u{85}',
            '_' => '\u{A0}',
            'x' => self.parse_hex_escape(2)?,
            'u' => self.parse_hex_escape(4)?,
            'U' => self.parse_hex_escape(8)?,
            other => return Err(self.error(format!("invalid escape sequence '\\{other}'"))),
        };

        Ok(decoded)
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Result<char, ParseError> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            let c = self
                .advance()
                .ok_or_else(|| self.error("unterminated escape sequence"))?;
            hex.push(c);
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("invalid unicode escape '{hex}'")))
    }

    fn parse_single_quoted(&mut self) -> Result<Node, ParseError> {
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') if self.peek() == Some('\'') => {
                    self.advance();
                    value.push('\'');
                }
                Some('\'') => break,
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated single-quoted scalar")),
            }
        }

        Ok(Node::scalar_with_style(value, ScalarStyle::SingleQuoted))
    }
}

fn unterminated(what: &str) -> String {
    format!("unterminated flow {what} (multi-line flow collections are not supported)")
}
