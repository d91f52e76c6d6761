use core::fmt;

pub const EOP: char = '\0';

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    Eop,
    Error { msg: Box<str>, position: usize },

    Dot,
    Name { value: Box<str> },
    LBracket,
    Index { value: i64 },
    RBracket,
    LParen,
    Key { value: Box<str> },
    RParen,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Eop => f.write_str("'end of path'"),
            TokenType::Error { msg, .. } => write!(f, "error: {}", *msg),
            TokenType::Dot => f.write_str("'.'"),
            TokenType::Name { value } => write!(f, "'{}'", *value),
            TokenType::LBracket => f.write_str("'['"),
            TokenType::Index { value } => write!(f, "{}", value),
            TokenType::RBracket => f.write_str("']'"),
            TokenType::LParen => f.write_str("'('"),
            TokenType::Key { value } => write!(f, "'{}'", *value),
            TokenType::RParen => f.write_str("')'"),
        }
    }
}

/// A path token, as produced by the lexer.
///
/// Spans are character offsets into the caller's path string.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenType,
    pub span: (usize, usize),
}

impl Token {
    pub fn new(kind: TokenType, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: (start, end),
        }
    }
}
