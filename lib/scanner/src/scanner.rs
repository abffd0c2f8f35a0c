use cursor::{Cursor, Line};
use errors::{Diagnostics, Reporter};
use log::trace;

pub mod token;
pub use token::{Literal, Token, TokenData, TokenType};

use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unterminated block comment.")]
    UnterminatedBlockComment,
}

/// The tokens of a source text together with everything that went wrong while scanning it.
#[derive(Debug, PartialEq)]
pub struct Scanned<'a> {
    pub tokens: Vec<Token<'a>>,
    pub diagnostics: Diagnostics,
}

/// Scans the whole source. Never fails: characters that can't be classified are
/// reported and skipped, and the last token is always [`TokenData::Eof`].
pub fn scan(source: &str) -> Scanned<'_> {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
    Scanned { tokens, diagnostics }
}

pub struct Scanner<'a> {
    start: Cursor<'a>,
    cursor: Cursor<'a>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        let cursor = Cursor::new(source);
        Self { start: cursor.clone(), cursor, tokens: Vec::new() }
    }

    pub fn scan_tokens(mut self, reporter: &mut impl Reporter) -> Vec<Token<'a>> {
        while !self.cursor.is_at_end() {
            self.start = self.cursor.clone();
            if let Err(error) = self.scan_token() {
                report(reporter, self.cursor.line(), error);
            }
        }

        self.tokens.push(Token::eof(self.cursor.line()));
        self.tokens
    }

    fn scan_token(&mut self) -> Result<(), ScanErrorType> {
        let Some(c) = self.cursor.next() else { return Ok(()) };
        match c {
            '(' => self.add_token(LeftParen),
            ')' => self.add_token(RightParen),
            '{' => self.add_token(LeftBrace),
            '}' => self.add_token(RightBrace),
            ',' => self.add_token(Comma),
            '.' => self.add_token(Dot),
            '-' => self.add_token(Minus),
            '+' => self.add_token(Plus),
            ';' => self.add_token(Semicolon),
            '*' => self.add_token(Star),

            '!' => self.add_token_if_matches('=', BangEqual, Bang),
            '=' => self.add_token_if_matches('=', EqualEqual, Equal),
            '<' => self.add_token_if_matches('=', LessEqual, Less),
            '>' => self.add_token_if_matches('=', GreaterEqual, Greater),

            '/' => {
                if self.cursor.advance_if('/') {
                    self.cursor.advance_while(|c| c != '\n');
                } else if self.cursor.advance_if('*') {
                    return self.block_comment();
                } else {
                    self.add_token(Slash)
                }
            }

            ' ' | '\r' | '\t' | '\n' => (),

            '"' => return self.string(),

            d if d.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),

            c => return Err(ScanErrorType::UnexpectedCharacter(c)),
        }
        Ok(())
    }

    fn add_token(&mut self, data: TokenData<'a>) {
        let token = Token::new(data, self.cursor.slice_from(&self.start), self.start.line());
        trace!("{:?} {:?} (line {})", token.kind(), token.lexeme, token.line);
        self.tokens.push(token);
    }

    fn add_token_if_matches(&mut self, expected: char, matched: TokenData<'a>, otherwise: TokenData<'a>) {
        if self.cursor.advance_if(expected) {
            self.add_token(matched)
        } else {
            self.add_token(otherwise)
        }
    }

    // The opening "/*" has already been consumed. Openers inside the comment nest.
    fn block_comment(&mut self) -> Result<(), ScanErrorType> {
        let mut depth = 1;
        while depth > 0 {
            match (self.cursor.peek(), self.cursor.peek_next()) {
                (None, _) => return Err(ScanErrorType::UnterminatedBlockComment),
                (Some('/'), Some('*')) => {
                    self.cursor.nth(1);
                    depth += 1;
                }
                (Some('*'), Some('/')) => {
                    self.cursor.nth(1);
                    depth -= 1;
                }
                _ => {
                    self.cursor.next();
                }
            }
        }
        Ok(())
    }

    fn string(&mut self) -> Result<(), ScanErrorType> {
        self.cursor.advance_while(|c| c != '"');
        if !self.cursor.advance_if('"') {
            return Err(ScanErrorType::UnterminatedString);
        }

        let lexeme = self.cursor.slice_from(&self.start);
        self.add_token(Str(&lexeme[1..lexeme.len() - 1]));
        Ok(())
    }

    fn number(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        // A trailing '.' is not part of the number, it has to be followed by a digit.
        if self.cursor.peek() == Some('.') && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.next();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        let value = self
            .cursor
            .slice_from(&self.start)
            .parse()
            .expect("a run of digits with at most one inner '.' is a valid f64");
        self.add_token(Number(value))
    }

    fn identifier(&mut self) {
        self.cursor.advance_while(|c| is_alpha(c) || c.is_ascii_digit());
        let text = self.cursor.slice_from(&self.start);
        self.add_token(TokenData::keyword(text).unwrap_or(Identifier))
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn report(reporter: &mut impl Reporter, line: Line, error: ScanErrorType) {
    reporter.report(line, "", &error.to_string());
}
