mod expr;

use cursor::Line;
use errors::{Diagnostics, Reporter};
use log::trace;
use scanner::{Literal, Token, TokenType};

pub use expr::{Expr, LiteralValue};

use TokenType::*;

pub type Result<T> = std::result::Result<T, ParseError>;

/// A syntax error at a token. Displays as the bare message, the sink adds line and location.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub line: Line,
    pub at: String,
}

impl ParseError {
    pub fn new(error: ParseErrorType, token: &Token) -> Self {
        Self { error, line: token.line, at: token.location() }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ParseErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect ';' after expression.")]
    ExpectedSemicolon,
}

/// Parses a single expression. Tokens following it are left unread.
pub fn parse<'a>(tokens: &[Token<'a>]) -> std::result::Result<Expr<'a>, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    match Parser::new(tokens).parse(&mut diagnostics) {
        Some(expr) if !diagnostics.had_error() => Ok(expr),
        _ => Err(diagnostics),
    }
}

/// Parses `;`-terminated expressions up to the end of input, recovering after each error.
pub fn parse_sequence<'a>(tokens: &[Token<'a>]) -> std::result::Result<Vec<Expr<'a>>, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let exprs = Parser::new(tokens).parse_sequence(&mut diagnostics);
    if diagnostics.had_error() {
        Err(diagnostics)
    } else {
        Ok(exprs)
    }
}

/// Scans and parses `source` as one expression.
///
/// Scan errors don't stop the parser, so that a single run reports as much as
/// possible. Any diagnostic, lexical or syntactic, makes the result an error.
pub fn parse_source(source: &str) -> std::result::Result<Expr<'_>, Diagnostics> {
    let scanned = scanner::scan(source);
    let mut diagnostics = scanned.diagnostics;
    let expr = Parser::new(&scanned.tokens).parse(&mut diagnostics);
    match expr {
        Some(expr) if !diagnostics.had_error() => Ok(expr),
        _ => Err(diagnostics),
    }
}

#[derive(Debug)]
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    current: usize,
    // Returned by peek() when the token slice isn't terminated by Eof
    eof: Token<'a>,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        let line = tokens.last().map_or(Line(1), |t| t.line);
        Self { tokens, current: 0, eof: Token::eof(line) }
    }

    pub fn parse(&mut self, reporter: &mut impl Reporter) -> Option<Expr<'a>> {
        match self.expression() {
            Ok(expr) => Some(expr),
            Err(e) => {
                report(reporter, e);
                None
            }
        }
    }

    pub fn parse_sequence(&mut self, reporter: &mut impl Reporter) -> Vec<Expr<'a>> {
        let mut exprs = Vec::new();
        while !self.is_at_end() {
            match self.terminated_expression() {
                Ok(expr) => exprs.push(expr),
                Err(e) => {
                    report(reporter, e);
                    self.synchronize();
                }
            }
        }
        exprs
    }

    fn terminated_expression(&mut self) -> Result<Expr<'a>> {
        let expr = self.expression()?;
        self.consume(Semicolon, ParseErrorType::ExpectedSemicolon)?;
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        trace!("expression");
        self.comma()
    }

    fn comma(&mut self) -> Result<Expr<'a>> {
        trace!("comma");
        let mut expr = self.equality()?;

        while let Some(operator) = self.match_any(&[Comma]) {
            let right = self.equality()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        trace!("equality");
        let mut expr = self.comparison()?;

        while let Some(operator) = self.match_any(&[BangEqual, EqualEqual]) {
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        trace!("comparison");
        let mut expr = self.term()?;

        while let Some(operator) = self.match_any(&[Greater, GreaterEqual, Less, LessEqual]) {
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        trace!("term");
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_any(&[Minus, Plus]) {
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        trace!("factor");
        let mut expr = self.unary()?;

        while let Some(operator) = self.match_any(&[Star, Slash]) {
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        trace!("unary");
        if let Some(operator) = self.match_any(&[Bang, Minus]) {
            let right = self.unary()?;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        trace!("primary at {:?}", self.peek().lexeme);
        let token = self.peek().clone();
        let expr = match token.kind() {
            False => Expr::Literal(LiteralValue::Boolean(false)),
            True => Expr::Literal(LiteralValue::Boolean(true)),
            Nil => Expr::Literal(LiteralValue::Nil),
            Number | Str => match token.literal() {
                Some(Literal::Number(n)) => Expr::Literal(LiteralValue::Number(n)),
                Some(Literal::Str(s)) => Expr::Literal(LiteralValue::Str(s)),
                None => return Err(ParseError::new(ParseErrorType::ExpectedExpression, &token)),
            },
            LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(RightParen, ParseErrorType::ExpectedRightParen)?;
                return Ok(Expr::grouping(expr));
            }
            _ => return Err(ParseError::new(ParseErrorType::ExpectedExpression, &token)),
        };
        self.advance();
        Ok(expr)
    }

    /// Skips tokens until the start of what is probably the next construct, so that
    /// parsing can resume after an error without reporting follow-up errors.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind() == Semicolon {
                return;
            }

            if let Class | Fun | Var | For | If | While | Print | Return = self.peek().kind() {
                return;
            }

            self.advance();
        }
    }
}

// Helpers
impl<'t, 'a> Parser<'t, 'a> {
    fn consume(&mut self, kind: TokenType, error: ParseErrorType) -> Result<Token<'a>> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(error, self.peek()))
        }
    }

    fn match_any(&mut self, kinds: &[TokenType]) -> Option<Token<'a>> {
        kinds.iter().any(|&kind| self.check(kind)).then(|| self.advance())
    }

    fn check(&self, kind: TokenType) -> bool {
        !self.is_at_end() && self.peek().kind() == kind
    }

    fn advance(&mut self) -> Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous().clone()
    }

    fn peek(&self) -> &Token<'a> {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn previous(&self) -> &Token<'a> {
        self.current.checked_sub(1).and_then(|i| self.tokens.get(i)).unwrap_or(&self.eof)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind() == Eof
    }
}

fn report(reporter: &mut impl Reporter, error: ParseError) {
    reporter.report(error.line, &error.at, &error.to_string());
}
