//! SQL statement scanning.
//!
//! Splits a raw SQL script into individually executable statements. A `;`
//! terminates a statement only when it occurs outside string literals,
//! quoted identifiers, comments, and dollar-quoted blocks; everywhere else
//! it is ordinary text and is kept verbatim.
//!
//! The scanner never fails. An unterminated literal, comment, or
//! dollar-quote consumes the remainder of the input, and whatever has
//! accumulated is emitted as the final statement.

/// Lexical mode of the scanner. Exactly one mode is active per character
/// position; the mode owns the rules for leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanMode {
    /// Top level, where `;` terminates a statement.
    Statement,
    /// Inside `-- ...`, through end of line.
    LineComment,
    /// Inside `/* ... */`.
    BlockComment,
    /// Inside `'...'`; a doubled `''` stays in the literal.
    SingleQuoted,
    /// Inside `"..."`.
    DoubleQuoted,
    /// Inside a dollar-quoted block, holding the full opening delimiter
    /// (`$$`, `$body$`, ...) that must reappear to close it.
    DollarQuoted(Vec<char>),
}

/// Split a SQL script into trimmed, non-empty statements.
///
/// Statement text is preserved verbatim, comments and original formatting
/// included; the terminating `;` is not part of the emitted statement.
/// Segments holding nothing but whitespace and comments are dropped, so a
/// script consisting solely of comments yields zero statements while a
/// comment attached to real SQL travels with it.
pub fn split_statements(sql: &str) -> Vec<String> {
    let chars: Vec<char> = sql.chars().collect();
    let mut statements = Vec::new();
    let mut buf = String::new();
    // Set once the current segment contains anything beyond comments and
    // whitespace; comment-only segments are never emitted.
    let mut has_content = false;
    let mut mode = ScanMode::Statement;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match &mode {
            ScanMode::Statement => match c {
                '-' if chars.get(i + 1) == Some(&'-') => {
                    buf.push_str("--");
                    i += 2;
                    mode = ScanMode::LineComment;
                }
                '/' if chars.get(i + 1) == Some(&'*') => {
                    buf.push_str("/*");
                    i += 2;
                    mode = ScanMode::BlockComment;
                }
                '\'' => {
                    buf.push(c);
                    has_content = true;
                    i += 1;
                    mode = ScanMode::SingleQuoted;
                }
                '"' => {
                    buf.push(c);
                    has_content = true;
                    i += 1;
                    mode = ScanMode::DoubleQuoted;
                }
                '$' => {
                    // A `$` opens a dollar-quote only when a full `$tag$`
                    // delimiter follows; otherwise it is an ordinary
                    // character (positional parameters, `$1 + $2`).
                    has_content = true;
                    if let Some(delimiter) = dollar_delimiter(&chars, i) {
                        buf.extend(delimiter.iter());
                        i += delimiter.len();
                        mode = ScanMode::DollarQuoted(delimiter);
                    } else {
                        buf.push(c);
                        i += 1;
                    }
                }
                ';' => {
                    flush(&mut buf, &mut has_content, &mut statements);
                    i += 1;
                }
                _ => {
                    buf.push(c);
                    if !c.is_whitespace() {
                        has_content = true;
                    }
                    i += 1;
                }
            },
            ScanMode::LineComment => {
                buf.push(c);
                i += 1;
                if c == '\n' {
                    mode = ScanMode::Statement;
                }
            }
            ScanMode::BlockComment => {
                if c == '*' && chars.get(i + 1) == Some(&'/') {
                    buf.push_str("*/");
                    i += 2;
                    mode = ScanMode::Statement;
                } else {
                    buf.push(c);
                    i += 1;
                }
            }
            ScanMode::SingleQuoted => {
                if c == '\'' && chars.get(i + 1) == Some(&'\'') {
                    // Escaped quote; both characters belong to the literal.
                    buf.push_str("''");
                    i += 2;
                } else {
                    buf.push(c);
                    i += 1;
                    if c == '\'' {
                        mode = ScanMode::Statement;
                    }
                }
            }
            ScanMode::DoubleQuoted => {
                buf.push(c);
                i += 1;
                if c == '"' {
                    mode = ScanMode::Statement;
                }
            }
            ScanMode::DollarQuoted(delimiter) => {
                if chars[i..].starts_with(delimiter.as_slice()) {
                    buf.extend(delimiter.iter());
                    i += delimiter.len();
                    mode = ScanMode::Statement;
                } else {
                    buf.push(c);
                    i += 1;
                }
            }
        }
    }

    // An unterminated construct has consumed the rest of the input by now;
    // whatever accumulated becomes the final statement.
    flush(&mut buf, &mut has_content, &mut statements);
    statements
}

/// Match a `$tag$` opening delimiter starting at `start`, which must hold a
/// `$`. The tag is zero or more alphanumeric/underscore characters. Returns
/// the full delimiter including both `$`s, or `None` when what follows does
/// not form a delimiter.
fn dollar_delimiter(chars: &[char], start: usize) -> Option<Vec<char>> {
    debug_assert_eq!(chars[start], '$');
    let mut end = start + 1;
    while end < chars.len() && (chars[end].is_alphanumeric() || chars[end] == '_') {
        end += 1;
    }
    if chars.get(end) == Some(&'$') {
        Some(chars[start..=end].to_vec())
    } else {
        None
    }
}

fn flush(buf: &mut String, has_content: &mut bool, statements: &mut Vec<String>) {
    let trimmed = buf.trim();
    if *has_content && !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
    buf.clear();
    *has_content = false;
}
