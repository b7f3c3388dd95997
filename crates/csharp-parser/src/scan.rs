//! Balanced-delimiter scanning on top of the lexer.
//!
//! All offsets are byte offsets into the text passed in.

use crate::lexer::{Lexer, TokenKind};

/// Returns the offset just past the delimiter closing the one at `open`.
///
/// `code[open..]` must start with `{`, `(` or `[`. Delimiters inside string
/// literals, char literals and comments are ignored. Returns `None` when the
/// text ends before the delimiter is closed.
pub fn find_closing(code: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for token in Lexer::at(code, open) {
        if token.kind.is_open() {
            depth += 1;
        } else if token.kind.is_close() {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(token.span.range().end);
            }
        }
    }
    None
}

/// Returns the offset just past the first `;` at nesting depth zero, scanning
/// from `from`.
///
/// Returns `None` if a closing delimiter leaves the enclosing scope first, or
/// if the text ends without a terminator.
pub fn find_statement_end(code: &str, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for token in Lexer::at(code, from) {
        match token.kind {
            kind if kind.is_open() => depth += 1,
            kind if kind.is_close() => depth = depth.checked_sub(1)?,
            TokenKind::Semicolon if depth == 0 => return Some(token.span.range().end),
            _ => {}
        }
    }
    None
}

/// Returns the offset of the first non-whitespace, non-comment byte at or
/// after `from`.
pub fn skip_trivia(code: &str, from: usize) -> usize {
    Lexer::at(code, from)
        .find(|token| !token.kind.is_trivia())
        .map_or(code.len(), |token| token.span.range().start)
}

/// Splits a list at top-level commas.
///
/// Commas nested in `()`, `[]`, `{}`, `<>` or string literals do not split.
/// Segments are trimmed; a trailing empty segment is dropped.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut lexer = Lexer::new(text);

    while let Some(token) = lexer.next() {
        match token.kind {
            kind if kind.is_open() => depth += 1,
            kind if kind.is_close() => depth -= 1,
            TokenKind::Punct => match lexer.slice() {
                "<" => depth += 1,
                ">" => depth -= 1,
                _ => {}
            },
            TokenKind::Comma if depth == 0 => {
                let range = token.span.range();
                parts.push(text[start..range.start].trim());
                start = range.end;
            }
            _ => {}
        }
    }

    let last = text[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    if parts.last() == Some(&"") {
        parts.pop();
    }
    parts
}

/// Returns the identifier that ends right before `offset`, skipping whitespace.
pub fn preceding_word(code: &str, offset: usize) -> &str {
    let before = code[..offset].trim_end();
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map_or(before.len(), |(i, _)| i);
    &before[start..]
}

/// Returns the byte offset of the character after the one at `offset`.
pub fn next_char_boundary(code: &str, offset: usize) -> usize {
    code[offset..]
        .chars()
        .next()
        .map_or(offset + 1, |c| offset + c.len_utf8())
}
