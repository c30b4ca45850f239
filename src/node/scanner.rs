//! Splits source text into indentation-aware lines with comments separated
//! from content.

/// One physical line of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Line {
    /// 1-based line number.
    pub number: usize,
    /// The line as written, without the line terminator.
    pub raw: String,
    /// Number of leading spaces.
    pub indent: usize,
    /// Whether the indentation contains a tab character.
    pub tab_indent: bool,
    /// Content after the indentation with any trailing comment removed.
    pub text: String,
    /// Trailing or full-line comment, starting at `#`.
    pub comment: Option<String>,
}

impl Line {
    /// A line holding neither content nor a comment.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.comment.is_none()
    }

    /// A line holding only a comment.
    pub fn is_comment_only(&self) -> bool {
        self.text.is_empty() && self.comment.is_some()
    }
}

/// Scans the whole document into lines.
///
/// A leading byte order mark is dropped.
pub(super) fn scan(input: &str) -> Vec<Line> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    input
        .lines()
        .enumerate()
        .map(|(index, raw)| scan_line(index + 1, raw.strip_suffix('\r').unwrap_or(raw)))
        .collect()
}

fn scan_line(number: usize, raw: &str) -> Line {
    let body = raw.trim_start_matches([' ', '\t']);
    let leading = &raw[..raw.len() - body.len()];
    let (text, comment) = split_comment(body);

    Line {
        number,
        raw: raw.to_string(),
        indent: leading.chars().take_while(|c| *c == ' ').count(),
        tab_indent: leading.contains('\t'),
        text: text.to_string(),
        comment: comment.map(str::to_string),
    }
}

/// Separates content from a trailing comment.
///
/// A `#` opens a comment when it starts the content or follows whitespace,
/// and is not inside a quoted scalar.
pub(super) fn split_comment(content: &str) -> (&str, Option<&str>) {
    let chars: Vec<(usize, char)> = content.char_indices().collect();
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match quote {
            Some('"') => match c {
                '\\' => i += 1,
                '"' => quote = None,
                _ => {}
            },
            Some(_) => {
                if c == '\'' {
                    if chars.get(i + 1).is_some_and(|(_, next)| *next == '\'') {
                        i += 1;
                    } else {
                        quote = None;
                    }
                }
            }
            None => match c {
                '#' if prev.is_none_or(char::is_whitespace) => {
                    return (content[..offset].trim_end(), Some(content[offset..].trim_end()));
                }
                '"' | '\'' if prev.is_none_or(|p| p.is_whitespace() || matches!(p, '[' | '{' | ',')) => {
                    quote = Some(c);
                }
                _ => {}
            },
        }
        prev = Some(c);
        i += 1;
    }

    (content.trim_end(), None)
}
