//! Path expression parser
//!
//! This module implements a character-level parser for the dotted path
//! micro-language. Each dot-separated token is an identifier with an
//! optional bracket qualifier:
//!
//! ```text
//! identifier ( '[' qualifierBody ']' )?
//! ```
//!
//! where the qualifier body is either an integer index (`d[3]`), a
//! predicate (`b[sub_key=val]`), or a bare key that qualifies as neither.
//! Underscores inside a predicate key stand for nested-path separators, so
//! `sub_key` addresses the nested field `sub.key` without colliding with
//! the outer dot-splitting.

use super::ast::{PathSegment, Qualifier};
use crate::{Error, Result};
use std::iter::Peekable;
use std::str::Chars;

/// Path expression parser
pub struct Parser<'a> {
    /// Input string being parsed
    input: &'a str,
    /// Character iterator
    chars: Peekable<Chars<'a>>,
    /// Current position in input
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::InvalidPath {
                path: input.to_string(),
                message: "empty path".to_string(),
            });
        }

        Ok(Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        })
    }

    /// Parse the input into an ordered list of segments
    pub fn parse(mut self) -> Result<Vec<PathSegment>> {
        let mut segments = Vec::new();

        loop {
            segments.push(self.parse_segment()?);
            match self.current_char() {
                None => break,
                Some('.') => {
                    self.advance();
                    if self.current_char().is_none() {
                        return Err(self.error("trailing dot"));
                    }
                }
                Some(ch) => {
                    return Err(self.error(format!("unexpected character `{}`", ch)));
                }
            }
        }

        Ok(segments)
    }

    /// Parse one `identifier ( '[' body ']' )?` token
    fn parse_segment(&mut self) -> Result<PathSegment> {
        let element = self.parse_identifier()?;

        if self.current_char() != Some('[') {
            return Ok(PathSegment::plain(element));
        }

        self.advance(); // consume '['
        let body = self.parse_bracket_body()?;
        self.advance(); // consume ']'

        let qualifier = self.classify_qualifier(&body)?;
        Ok(PathSegment::qualified(element, qualifier))
    }

    /// Parse the identifier part of a segment
    fn parse_identifier(&mut self) -> Result<String> {
        let mut identifier = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch == '.' || ch == '[' || ch == ']' {
                break;
            }
            identifier.push(ch);
            self.advance();
        }

        if identifier.is_empty() {
            return Err(self.error("empty path segment"));
        }

        Ok(identifier)
    }

    /// Collect the raw bracket body up to the closing `]`
    fn parse_bracket_body(&mut self) -> Result<String> {
        let mut body = String::new();

        loop {
            match self.chars.peek() {
                None => return Err(self.error("unterminated qualifier")),
                Some(']') => break,
                Some('[') => return Err(self.error("nested qualifier")),
                Some(&ch) => {
                    body.push(ch);
                    self.advance();
                }
            }
        }

        Ok(body)
    }

    /// Decide whether a bracket body is an index, a predicate, or bare
    fn classify_qualifier(&self, body: &str) -> Result<Qualifier> {
        if let Some((key, literal)) = body.split_once('=') {
            let key = key.trim();
            let literal = literal.trim();
            if key.is_empty() || literal.is_empty() {
                return Err(self.error("predicate requires both a key and a literal"));
            }
            return Ok(Qualifier::Predicate {
                key: key.replace('_', "."),
                literal: literal.to_string(),
            });
        }

        let body = body.trim();
        if body.is_empty() {
            return Err(self.error("empty qualifier"));
        }

        match body.parse::<usize>() {
            Ok(index) => Ok(Qualifier::Index(index)),
            Err(_) => Ok(Qualifier::Bare(body.to_string())),
        }
    }

    /// Peek at the current character without consuming it
    fn current_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consume the current character
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }

    /// Build a parse error at the current position
    fn error(&self, message: impl Into<String>) -> Error {
        Error::InvalidPath {
            path: self.input.to_string(),
            message: format!("{} at position {}", message.into(), self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<PathSegment>> {
        Parser::new(input)?.parse()
    }

    #[test]
    fn test_plain_segments() {
        let segments = parse("a.b.c").unwrap();
        assert_eq!(
            segments,
            vec![
                PathSegment::plain("a"),
                PathSegment::plain("b"),
                PathSegment::plain("c"),
            ]
        );
    }

    #[test]
    fn test_index_qualifier() {
        let segments = parse("d[3]").unwrap();
        assert_eq!(
            segments,
            vec![PathSegment::qualified("d", Qualifier::Index(3))]
        );
    }

    #[test]
    fn test_predicate_qualifier() {
        let segments = parse("b[c_d=e]").unwrap();
        assert_eq!(
            segments,
            vec![PathSegment::qualified(
                "b",
                Qualifier::Predicate {
                    key: "c.d".to_string(),
                    literal: "e".to_string(),
                }
            )]
        );
    }

    #[test]
    fn test_bare_qualifier() {
        let segments = parse("a[f]").unwrap();
        assert_eq!(
            segments,
            vec![PathSegment::qualified("a", Qualifier::Bare("f".to_string()))]
        );
    }

    #[test]
    fn test_mixed_path() {
        let segments = parse("a.b[sub_key=valueLiteral].c.d[3]").unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], PathSegment::plain("a"));
        assert_eq!(
            segments[1],
            PathSegment::qualified(
                "b",
                Qualifier::Predicate {
                    key: "sub.key".to_string(),
                    literal: "valueLiteral".to_string(),
                }
            )
        );
        assert_eq!(segments[2], PathSegment::plain("c"));
        assert_eq!(segments[3], PathSegment::qualified("d", Qualifier::Index(3)));
    }

    #[test]
    fn test_multi_character_components() {
        // Regression guard: every component longer than one character
        let segments = parse("abc.def[0].ghi[jkl=mno]").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], PathSegment::qualified("def", Qualifier::Index(0)));
        assert_eq!(
            segments[2],
            PathSegment::qualified(
                "ghi",
                Qualifier::Predicate {
                    key: "jkl".to_string(),
                    literal: "mno".to_string(),
                }
            )
        );
    }

    #[test]
    fn test_whitespace_in_qualifier() {
        let segments = parse("b[ c = d ]").unwrap();
        assert_eq!(
            segments,
            vec![PathSegment::qualified(
                "b",
                Qualifier::Predicate {
                    key: "c".to_string(),
                    literal: "d".to_string(),
                }
            )]
        );
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(parse("").is_err());
    }

    #[test]
    fn test_malformed_paths_rejected() {
        assert!(parse("a..b").is_err());
        assert!(parse("a.").is_err());
        assert!(parse(".a").is_err());
        assert!(parse("a[1").is_err());
        assert!(parse("a[]").is_err());
        assert!(parse("a[=x]").is_err());
        assert!(parse("a[k=]").is_err());
    }

    #[test]
    fn test_negative_index_is_bare() {
        // Negative indices are not addressable; they degrade to bare keys
        let segments = parse("a[-1]").unwrap();
        assert_eq!(
            segments,
            vec![PathSegment::qualified("a", Qualifier::Bare("-1".to_string()))]
        );
    }
}
