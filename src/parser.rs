use std::{iter::Peekable, vec::IntoIter};

use log::debug;

use crate::{
    errors::PathError,
    lexer::lex,
    path::{ParsedPath, Segment},
    token::{Token, TokenType},
};

use TokenType::*;

const EOP_TOKEN: Token = Token {
    kind: Eop,
    span: (0, 0),
};

type Tokens = Peekable<IntoIter<Token>>;

/// Parses `path` into a reusable [`ParsedPath`].
///
/// Outer whitespace is trimmed. An empty path, or one that starts or ends
/// with a dot, is an argument error. Anything else that doesn't fit the
/// grammar is a syntax error carrying the character offset of the first
/// offending character.
pub fn parse(path: &str) -> Result<ParsedPath, PathError> {
    let trimmed = path.trim();

    if trimmed.is_empty() {
        return Err(PathError::argument("path is required"));
    }

    if trimmed.starts_with('.') || trimmed.ends_with('.') {
        return Err(PathError::argument(
            "path should not start nor end with a dot",
        ));
    }

    let offset = path.chars().take_while(|c| c.is_whitespace()).count();
    let mut it = lex(trimmed, offset)?.into_iter().peekable();
    let segments = parse_segments(&mut it)?;

    debug!("parsed `{}` into {} segment(s)", trimmed, segments.len());
    Ok(ParsedPath::new(segments))
}

fn parse_segments(it: &mut Tokens) -> Result<Vec<Segment>, PathError> {
    let mut segments: Vec<Segment> = Vec::new();

    loop {
        let token = it.next().unwrap_or(EOP_TOKEN);
        match &token.kind {
            Eop => break,
            Dot => {
                // the lexer only emits a dot when a name follows
                if !matches!(it.peek(), Some(Token { kind: Name { .. }, .. })) {
                    return Err(PathError::syntax(
                        format!("expected name at position {}", token.span.1),
                        token.span.1,
                    ));
                }
            }
            Name { value } => {
                let segment = parse_named(it, value.to_string())?;
                segments.push(segment);
            }
            LBracket => {
                let segment = parse_index(it, None, &token)?;
                segments.push(segment);
            }
            LParen => {
                let segment = parse_key(it, None, &token)?;
                segments.push(segment);
            }
            kind => {
                return Err(PathError::syntax(
                    format!("unexpected token {} at position {}", kind, token.span.0),
                    token.span.0,
                ));
            }
        }
    }

    if segments.is_empty() {
        return Err(PathError::argument("path is required"));
    }

    Ok(segments)
}

/// A name followed by a suffix owns that suffix.
fn parse_named(it: &mut Tokens, name: String) -> Result<Segment, PathError> {
    if matches!(it.peek(), Some(Token { kind: LBracket, .. })) {
        let token = it.next().unwrap_or(EOP_TOKEN);
        parse_index(it, Some(name), &token)
    } else if matches!(it.peek(), Some(Token { kind: LParen, .. })) {
        let token = it.next().unwrap_or(EOP_TOKEN);
        parse_key(it, Some(name), &token)
    } else {
        Ok(Segment::Property { name })
    }
}

fn parse_index(it: &mut Tokens, name: Option<String>, open: &Token) -> Result<Segment, PathError> {
    #[cfg(debug_assertions)]
    debug_assert!(open.kind == LBracket, "expected the start of an index");

    let index = match it.next().unwrap_or(EOP_TOKEN) {
        Token {
            kind: Index { value },
            ..
        } => value,
        _ => {
            return Err(PathError::syntax(
                format!("could not parse index as integer at position {}", open.span.1),
                open.span.1,
            ))
        }
    };

    match it.next().unwrap_or(EOP_TOKEN) {
        Token { kind: RBracket, .. } => Ok(Segment::Index { name, index }),
        token => Err(PathError::syntax(
            format!("missing `]` at position {}", token.span.0),
            token.span.0,
        )),
    }
}

fn parse_key(it: &mut Tokens, name: Option<String>, open: &Token) -> Result<Segment, PathError> {
    #[cfg(debug_assertions)]
    debug_assert!(open.kind == LParen, "expected the start of a key");

    let key = match it.next().unwrap_or(EOP_TOKEN) {
        Token {
            kind: Key { value },
            ..
        } => String::from(value),
        token => {
            return Err(PathError::syntax(
                format!("missing `)` at position {}", token.span.0),
                token.span.0,
            ))
        }
    };

    match it.next().unwrap_or(EOP_TOKEN) {
        Token { kind: RParen, .. } => Ok(Segment::Mapped { name, key }),
        token => Err(PathError::syntax(
            format!("missing `)` at position {}", token.span.0),
            token.span.0,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str) -> Segment {
        Segment::Property {
            name: name.to_owned(),
        }
    }

    fn index(name: Option<&str>, index: i64) -> Segment {
        Segment::Index {
            name: name.map(String::from),
            index,
        }
    }

    fn mapped(name: Option<&str>, key: &str) -> Segment {
        Segment::Mapped {
            name: name.map(String::from),
            key: key.to_owned(),
        }
    }

    #[test]
    fn simple_path() {
        let path = parse("foo.bar").unwrap();
        assert_eq!(path.segments(), &[property("foo"), property("bar")]);
    }

    #[test]
    fn complex_path() {
        let path = parse("foo.bar[0].meh.pow[0][1]").unwrap();
        assert_eq!(
            path.segments(),
            &[
                property("foo"),
                index(Some("bar"), 0),
                property("meh"),
                index(Some("pow"), 0),
                index(None, 1),
            ]
        );
    }

    #[test]
    fn mapped_suffixes() {
        let path = parse("books[0].written(year)").unwrap();
        assert_eq!(
            path.segments(),
            &[index(Some("books"), 0), mapped(Some("written"), "year")]
        );

        let path = parse("(foo)(bar)").unwrap();
        assert_eq!(path.segments(), &[mapped(None, "foo"), mapped(None, "bar")]);
    }

    #[test]
    fn mixed_chain() {
        let path = parse("a(x)[2](y z).b").unwrap();
        assert_eq!(
            path.segments(),
            &[
                mapped(Some("a"), "x"),
                index(None, 2),
                mapped(None, "y z"),
                property("b"),
            ]
        );
    }

    #[test]
    fn key_may_contain_path_punctuation() {
        let path = parse("(a.b[0](c)").unwrap();
        assert_eq!(path.segments(), &[mapped(None, "a.b[0](c")]);
    }

    #[test]
    fn outer_whitespace_is_trimmed() {
        let path = parse("  foo.bar\n").unwrap();
        assert_eq!(path.to_string(), "foo.bar");
    }

    #[test]
    fn positions_account_for_trimmed_whitespace() {
        let err = parse("  foo..bar").unwrap_err();
        assert_eq!(err.position, Some(6));
    }

    #[test]
    fn parse_is_deterministic() {
        let a = parse("x.y[-3](k)").unwrap();
        let b = parse("x.y[-3](k)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blank_path() {
        let err = parse("   ").unwrap_err();
        assert!(err.is_argument());
        assert_eq!(err.msg, "path is required");
    }

    #[test]
    fn unexpected_token_order() {
        let tokens = vec![
            Token::new(RBracket, 0, 1),
            Token::new(Eop, 1, 1),
        ];
        let err = parse_segments(&mut tokens.into_iter().peekable()).unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.position, Some(0));
    }
}
