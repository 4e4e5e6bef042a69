//! Token definitions and low-level text machinery for OBO clause lines
//!
//! This module defines the tokens produced when lexing the value part of a
//! `tag: value` clause line, using the logos derive macro. The token stream
//! is only concerned with *line structure*: quoted strings are single
//! tokens (so that structural characters inside them stay inert), and the
//! characters that delimit qualifier lists, xref lists and trailing
//! comments are structural tokens. Everything below the line level
//! (identifiers, dates) is parsed from raw slices with the escape-aware
//! helpers at the bottom of this module.
//!
//! Escaping follows the OBO flat-file rules: a backslash makes the next
//! character literal, with `\n` and `\t` denoting newline and tab.

use std::ops::Range;

use logos::Logos;

use crate::obo::error::SyntaxError;

/// All tokens that can appear in the value part of a clause line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A complete quoted string, including its backslash escapes.
    #[regex(r#""([^"\\]|\\.)*""#)]
    QuotedString,

    /// A backslash escape outside of a quoted string.
    #[regex(r"\\.")]
    Escape,

    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,

    /// Starts a trailing comment when it appears at the top level.
    #[token("!")]
    Bang,

    #[regex(r"[ \t]+")]
    Whitespace,

    /// A run of ordinary value characters.
    #[regex(r#"[^ \t{}\[\],=!"\\]+"#)]
    Word,
}

impl Token {
    /// Check if this token is insignificant padding.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace)
    }
}

/// A token together with its byte span in the source line.
pub type Spanned = (Token, Range<usize>);

/// Tokenize the value part of a clause line.
///
/// Fails on input no token matches, which for this token set means an
/// unterminated quoted string or a trailing lone backslash. The error
/// value is the byte offset of the offending character.
pub fn tokenize(text: &str) -> Result<Vec<Spanned>, usize> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(t) => tokens.push((t, lexer.span())),
            Err(()) => return Err(lexer.span().start),
        }
    }
    Ok(tokens)
}

// --- Escape-aware string helpers -------------------------------------------

/// Characters escaped when rendering a clause tag.
pub const TAG_SPECIALS: &str = "\\:!{\"[";
/// Characters escaped when rendering an identifier prefix or an
/// unprefixed identifier, where a raw colon would change the parse.
pub const IDENT_PREFIX_SPECIALS: &str = "\\:!{}[],=\" \t";
/// Characters escaped when rendering the local part of an identifier.
/// The separator is the *first* colon, so local colons stay raw.
pub const IDENT_LOCAL_SPECIALS: &str = "\\!{}[],=\" \t";
/// Characters escaped when rendering unquoted free-text values.
pub const VALUE_SPECIALS: &str = "\\!{\"";
/// Characters escaped inside quoted strings.
pub const QUOTED_SPECIALS: &str = "\\\"";

/// Decode the backslash escapes of a raw slice.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            // trailing backslash stays literal
            None => out.push('\\'),
        }
    }
    out
}

/// Encode a decoded string, escaping newlines, tabs and every character
/// of `specials`.
pub fn escaped(text: &str, specials: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if specials.contains(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Find the byte offset of the first unescaped occurrence of `target`.
pub fn find_unescaped(text: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == target {
            return Some(index);
        }
    }
    None
}

/// Split a raw slice at its first unescaped whitespace, returning the
/// field and the rest with leading whitespace stripped.
pub fn split_field(text: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ' ' || c == '\t' {
            return (&text[..index], text[index..].trim_start());
        }
    }
    (text, "")
}

/// Parse a quoted string at the start of a raw slice.
///
/// Returns the decoded content and the remaining slice after the closing
/// quote (leading whitespace stripped).
pub fn parse_quoted(text: &str) -> Result<(String, &str), SyntaxError> {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => {
            return Err(SyntaxError::new(format!(
                "expected quoted string, found {:?}",
                text
            )))
        }
    }
    let mut escaped = false;
    for (index, c) in chars {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            let content = unescape(&text[1..index]);
            let rest = text[index + 1..].trim_start();
            return Ok((content, rest));
        }
    }
    Err(SyntaxError::new(format!(
        "unterminated quoted string {:?}",
        text
    )))
}

/// Split a raw slice on every unescaped, unquoted occurrence of `sep`.
///
/// Used to break xref and qualifier lists into items; separators inside
/// quoted descriptions or behind a backslash do not count.
pub fn split_unquoted(text: &str, sep: char) -> Result<Vec<&str>, SyntaxError> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    let mut quoted = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            quoted = !quoted;
        } else if c == sep && !quoted {
            parts.push(&text[start..index]);
            start = index + c.len_utf8();
        }
    }
    if quoted {
        return Err(SyntaxError::new(format!(
            "unterminated quoted string in {:?}",
            text
        )));
    }
    parts.push(&text[start..]);
    Ok(parts)
}
