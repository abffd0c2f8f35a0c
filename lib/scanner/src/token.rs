use std::fmt::Display;

use cursor::Line;
use strum_macros::{Display as StrumDisplay, EnumDiscriminants};

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub data: TokenData<'a>,
    pub lexeme: &'a str,
    pub line: Line,
}

/// The decoded value carried by a literal token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Number(f64),
    Str(&'a str),
}

impl<'a> Token<'a> {
    pub fn new(data: TokenData<'a>, lexeme: &'a str, line: Line) -> Self {
        Self { data, lexeme, line }
    }

    pub fn eof(line: Line) -> Self {
        Self::new(TokenData::Eof, "", line)
    }

    pub fn kind(&self) -> TokenType {
        TokenType::from(&self.data)
    }

    pub fn literal(&self) -> Option<Literal<'a>> {
        match self.data {
            TokenData::Number(n) => Some(Literal::Number(n)),
            TokenData::Str(s) => Some(Literal::Str(s)),
            _ => None,
        }
    }

    /// Where a diagnostic about this token points, as shown after "Error".
    pub fn location(&self) -> String {
        match self.data {
            TokenData::Eof => " at end".to_string(),
            _ => format!(" at '{}'", self.lexeme),
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(TokenType), derive(StrumDisplay, Hash))]
pub enum TokenData<'a> {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    Str(&'a str),
    Number(f64),

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenData<'_> {
    pub fn keyword(text: &str) -> Option<Self> {
        use TokenData::*;
        Some(match text {
            "and" => And,
            "class" => Class,
            "else" => Else,
            "false" => False,
            "for" => For,
            "fun" => Fun,
            "if" => If,
            "nil" => Nil,
            "or" => Or,
            "print" => Print,
            "return" => Return,
            "super" => Super,
            "this" => This,
            "true" => True,
            "var" => Var,
            "while" => While,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn kind_and_literal() {
        let token = Token::new(TokenData::Number(1.5), "1.5", Line(1));
        assert_eq!(token.kind(), TokenType::Number);
        assert_eq!(token.literal(), Some(Literal::Number(1.5)));

        let token = Token::new(TokenData::Plus, "+", Line(1));
        assert_eq!(token.kind(), TokenType::Plus);
        assert_eq!(token.literal(), None);
    }

    #[test]
    fn location() {
        assert_eq!(Token::eof(Line(2)).location(), " at end");
        assert_eq!(Token::new(TokenData::Star, "*", Line(1)).location(), " at '*'");
    }

    #[test]
    fn keywords() {
        assert_eq!(TokenData::keyword("while"), Some(TokenData::While));
        assert_eq!(TokenData::keyword("nil"), Some(TokenData::Nil));
        assert_eq!(TokenData::keyword("While"), None);
        assert_eq!(TokenData::keyword("orchid"), None);
    }
}
