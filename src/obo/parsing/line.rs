//! Clause line structure
//!
//! Every clause line has the shape `tag: value {qualifiers} ! comment`,
//! where the qualifier list and the comment are optional. The tag ends at
//! the first unescaped colon; the qualifier list and comment markers only
//! count at the top level, outside quoted strings and escapes, which is
//! what the token stream tracks.

use crate::obo::ast::qualifier::QualifierList;
use crate::obo::error::SyntaxError;
use crate::obo::lexing::{self, Token};

/// A clause line split into its structural parts.
///
/// The value is kept as the raw (still escaped) slice so each clause
/// codec can decode it according to its own payload grammar. Qualifiers
/// and comments are validated here and dropped by the frame parser.
#[derive(Debug)]
pub struct ClauseLine<'a> {
    pub tag: String,
    pub value: &'a str,
    pub qualifiers: Option<QualifierList>,
    pub comment: Option<&'a str>,
}

impl<'a> ClauseLine<'a> {
    /// Split one raw line, returning `None` for blank and comment-only
    /// lines.
    pub fn parse(raw: &'a str) -> Result<Option<ClauseLine<'a>>, SyntaxError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('!') {
            return Ok(None);
        }
        let colon = lexing::find_unescaped(trimmed, ':').ok_or_else(|| {
            SyntaxError::new(format!("expected 'tag: value' clause, found {:?}", trimmed))
        })?;
        let tag = lexing::unescape(trimmed[..colon].trim());
        if tag.is_empty() {
            return Err(SyntaxError::new(format!(
                "clause tag must not be empty in {:?}",
                trimmed
            )));
        }
        let rest = &trimmed[colon + 1..];

        let tokens = lexing::tokenize(rest).map_err(|offset| {
            SyntaxError::new(format!(
                "malformed value for '{}' clause near {:?}",
                tag,
                &rest[offset..]
            ))
        })?;

        // Locate the trailing qualifier list and the comment marker.
        let mut comment_start = None;
        let mut qualifier_open = None;
        let mut qualifier_close = None;
        let mut depth = 0usize;
        for (token, span) in &tokens {
            match token {
                Token::Bang if depth == 0 => {
                    comment_start = Some(span.start);
                    break;
                }
                Token::OpenBrace => {
                    if depth == 0 {
                        if qualifier_close.is_some() {
                            return Err(SyntaxError::new(format!(
                                "unexpected second qualifier list in '{}' clause",
                                tag
                            )));
                        }
                        qualifier_open = Some(span.start);
                    }
                    depth += 1;
                }
                Token::CloseBrace => {
                    // a stray '}' at the top level is ordinary value text
                    if depth > 0 {
                        depth -= 1;
                        if depth == 0 {
                            qualifier_close = Some(span.end);
                        }
                    }
                }
                Token::Whitespace => {}
                _ => {
                    if depth == 0 && qualifier_close.is_some() {
                        return Err(SyntaxError::new(format!(
                            "unexpected text after qualifier list in '{}' clause",
                            tag
                        )));
                    }
                }
            }
        }
        if depth > 0 {
            return Err(SyntaxError::new(format!(
                "unterminated qualifier list in '{}' clause",
                tag
            )));
        }

        let qualifiers = match (qualifier_open, qualifier_close) {
            (Some(open), Some(close)) => Some(rest[open..close].parse::<QualifierList>()?),
            _ => None,
        };
        let value_end = qualifier_open.or(comment_start).unwrap_or(rest.len());
        let value = rest[..value_end].trim();
        let comment = comment_start.map(|start| rest[start + 1..].trim());

        Ok(Some(ClauseLine {
            tag,
            value,
            qualifiers,
            comment,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ClauseLine<'_> {
        ClauseLine::parse(raw)
            .expect("parse failed")
            .expect("expected a clause line")
    }

    #[test]
    fn test_plain_clause() {
        let line = parse("name: mitochondrion inheritance");
        assert_eq!(line.tag, "name");
        assert_eq!(line.value, "mitochondrion inheritance");
        assert_eq!(line.qualifiers, None);
        assert_eq!(line.comment, None);
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert!(ClauseLine::parse("").expect("parse failed").is_none());
        assert!(ClauseLine::parse("   ").expect("parse failed").is_none());
        assert!(ClauseLine::parse("! just a comment")
            .expect("parse failed")
            .is_none());
    }

    #[test]
    fn test_trailing_comment() {
        let line = parse("name: beta-glucosidase activity ! checked");
        assert_eq!(line.value, "beta-glucosidase activity");
        assert_eq!(line.comment, Some("checked"));
    }

    #[test]
    fn test_trailing_qualifiers_and_comment() {
        let line = parse(r#"intersection_of: part_of GO:1 {cardinality="1"} ! note"#);
        assert_eq!(line.tag, "intersection_of");
        assert_eq!(line.value, "part_of GO:1");
        let qualifiers = line.qualifiers.expect("expected qualifiers");
        assert_eq!(qualifiers.len(), 1);
        assert_eq!(qualifiers[0].value(), "1");
        assert_eq!(line.comment, Some("note"));
    }

    #[test]
    fn test_braces_inside_quotes_are_inert() {
        let line = parse(r#"def: "curly {braces} here" [GO:1]"#);
        assert_eq!(line.value, r#""curly {braces} here" [GO:1]"#);
        assert_eq!(line.qualifiers, None);
    }

    #[test]
    fn test_bang_inside_quotes_is_inert() {
        let line = parse(r#"def: "watch out!" [GO:1]"#);
        assert_eq!(line.value, r#""watch out!" [GO:1]"#);
        assert_eq!(line.comment, None);
    }

    #[test]
    fn test_escaped_colon_in_tag() {
        let line = parse(r"odd\:tag: value");
        assert_eq!(line.tag, "odd:tag");
        assert_eq!(line.value, "value");
    }

    #[test]
    fn test_missing_colon_is_an_error() {
        let err = ClauseLine::parse("hello there").expect_err("expected error");
        assert!(err.message().contains("hello there"));
    }

    #[test]
    fn test_unterminated_qualifier_list() {
        assert!(ClauseLine::parse(r#"name: x {k="v""#).is_err());
    }

    #[test]
    fn test_text_after_qualifier_list() {
        assert!(ClauseLine::parse(r#"name: x {k="v"} trailing"#).is_err());
    }
}
