//! A state machine scanner for property paths.
//!
//! The lexer works on a path that has already been trimmed of surrounding
//! whitespace. `offset` is the number of characters that were trimmed from
//! the front, so that error positions can be reported in the caller's
//! coordinates.
use crate::{
    errors::PathError,
    token::{Token, TokenType, EOP},
};

use std::str::CharIndices;

enum State {
    Error,
    EndOfPath,
    LexRoot,
    LexSegment,
    LexName,
    LexIndex,
    LexKey,
}

/// A property path tokenizer, producing a vector of tokens.
struct Lexer<'p> {
    path: &'p str,
    offset: usize,
    tokens: Vec<Token>,

    chars: CharIndices<'p>,
    start: usize,
    pos: usize,
    start_char: usize,
    chars_read: usize,
}

impl<'p> Lexer<'p> {
    fn new(path: &'p str, offset: usize) -> Self {
        Self {
            path,
            offset,
            tokens: Vec::new(),
            chars: path.char_indices(),
            start: 0,
            pos: 0,
            start_char: 0,
            chars_read: 0,
        }
    }

    fn run(&mut self) {
        let mut state = State::LexRoot;
        loop {
            match state {
                State::Error | State::EndOfPath => break,
                State::LexRoot => state = lex_root(self),
                State::LexSegment => state = lex_segment(self),
                State::LexName => state = lex_name(self),
                State::LexIndex => state = lex_index(self),
                State::LexKey => state = lex_key(self),
            }
        }
    }

    fn emit(&mut self, t: TokenType) {
        let start = self.offset + self.start_char;
        self.tokens.push(Token::new(t, start, self.position()));
        self.start = self.pos;
        self.start_char = self.chars_read;
    }

    fn value(&self) -> &str {
        self.path
            .get(self.start..self.pos)
            .expect("lexer error: slice out of bounds or not on codepoint boundary")
    }

    fn boxed_value(&self) -> Box<str> {
        self.value().to_string().into_boxed_str()
    }

    fn next(&mut self) -> Option<char> {
        if let Some((pos, ch)) = self.chars.next() {
            self.pos = pos + ch.len_utf8();
            self.chars_read += 1;

            #[cfg(debug_assertions)]
            debug_assert!(
                self.pos <= self.path.len(),
                "current position is out of bounds"
            );

            Some(ch)
        } else {
            None
        }
    }

    fn peek(&self) -> char {
        if let Some((_, ch)) = self.chars.clone().next() {
            ch
        } else {
            EOP
        }
    }

    fn is_eop(&self) -> bool {
        self.chars.clone().next().is_none()
    }

    fn accept(&mut self, ch: char) -> bool {
        if !self.is_eop() && self.peek() == ch {
            self.next();
            true
        } else {
            false
        }
    }

    fn accept_if(&mut self, pred: impl FnOnce(char) -> bool) -> bool {
        if !self.is_eop() && pred(self.peek()) {
            self.next();
            true
        } else {
            false
        }
    }

    fn accept_run(&mut self, pred: impl Fn(char) -> bool) -> bool {
        let mut accepted = false;
        while !self.is_eop() && pred(self.peek()) {
            self.next();
            accepted = true;
        }
        accepted
    }

    /// Character offset of the next unread character, in caller coordinates.
    fn position(&self) -> usize {
        self.offset + self.chars_read
    }

    fn error(&mut self, msg: String) -> State {
        let position = self.position();
        self.error_at(msg, position)
    }

    fn error_at(&mut self, msg: String, position: usize) -> State {
        let start = self.offset + self.start_char;
        let end = self.position();
        self.tokens.push(Token::new(
            TokenType::Error {
                msg: msg.into_boxed_str(),
                position,
            },
            start,
            end,
        ));
        State::Error
    }
}

pub fn tokenize(path: &str, offset: usize) -> Vec<Token> {
    let mut lexer = Lexer::new(path, offset);
    lexer.run();
    lexer.tokens
}

pub fn lex(path: &str, offset: usize) -> Result<Vec<Token>, PathError> {
    let tokens = tokenize(path, offset);

    match tokens.last() {
        Some(Token {
            kind: TokenType::Error { msg, position },
            ..
        }) => Err(PathError::syntax((*msg).to_string(), *position)),
        _ => Ok(tokens),
    }
}

fn lex_root(l: &mut Lexer) -> State {
    // A path that doesn't open with a suffix reads as if it had a leading dot.
    match l.peek() {
        '[' | '(' => State::LexSegment,
        _ => State::LexName,
    }
}

fn lex_segment(l: &mut Lexer) -> State {
    if l.is_eop() {
        l.emit(TokenType::Eop);
        return State::EndOfPath;
    }

    if l.accept('.') {
        l.emit(TokenType::Dot);
        State::LexName
    } else if l.accept('[') {
        l.emit(TokenType::LBracket);
        State::LexIndex
    } else if l.accept('(') {
        l.emit(TokenType::LParen);
        State::LexKey
    } else {
        let msg = format!(
            "unexpected token `{}` at position {}",
            l.peek(),
            l.position()
        );
        l.error(msg)
    }
}

fn lex_name(l: &mut Lexer) -> State {
    if l.accept_if(is_name_first) {
        l.accept_run(is_name_char);
        l.emit(TokenType::Name {
            value: l.boxed_value(),
        });
        State::LexSegment
    } else {
        let msg = format!("expected name at position {}", l.position());
        l.error(msg)
    }
}

fn lex_index(l: &mut Lexer) -> State {
    let integer_start = l.position();

    l.accept('-');
    if !l.accept('0') {
        if l.accept_if(is_non_zero_digit) {
            l.accept_run(is_digit);
        } else {
            let msg = format!(
                "could not parse index as integer at position {}",
                l.position()
            );
            return l.error(msg);
        }
    }

    match l.value().parse::<i64>() {
        Ok(value) => l.emit(TokenType::Index { value }),
        Err(_) => {
            let msg = format!(
                "could not parse index as integer at position {}",
                integer_start
            );
            return l.error_at(msg, integer_start);
        }
    }

    if l.accept(']') {
        l.emit(TokenType::RBracket);
        State::LexSegment
    } else {
        let msg = format!("missing `]` at position {}", l.position());
        l.error(msg)
    }
}

fn lex_key(l: &mut Lexer) -> State {
    while !l.is_eop() && l.peek() != ')' {
        l.next();
    }

    if l.is_eop() {
        let msg = format!("missing `)` at position {}", l.position());
        return l.error(msg);
    }

    l.emit(TokenType::Key {
        value: l.boxed_value(),
    });
    l.next();
    l.emit(TokenType::RParen);
    State::LexSegment
}

fn is_name_first(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '?' | '!' | '_')
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_non_zero_digit(ch: char) -> bool {
    matches!(ch, '1'..='9')
}
