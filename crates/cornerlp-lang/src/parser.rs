use crate::ast::*;
use crate::lexer::{Span, Token, TokenKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token: expected {expected}, found {found} at position {span:?}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Invalid number: {0}")]
    InvalidNumber(String, Span),
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedToken { span, .. } | ParseError::InvalidNumber(_, span) => {
                Some(*span)
            }
            ParseError::UnexpectedEof => None,
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Comments are dropped here; newlines stay because they end statements.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .collect();
        Self { tokens, pos: 0 }
    }

    pub fn parse(source: &str) -> Result<Program, ParseError> {
        let tokens = crate::lexer::Lexer::tokenize(source);
        let mut parser = Parser::new(tokens);
        parser.parse_program()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn peek_kind_at(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn skip_newlines(&mut self) {
        while self.peek_kind() == TokenKind::Newline {
            self.advance();
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current() {
            Some(t) if t.kind != TokenKind::Eof => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: format!("{:?}", t.text),
                span: t.span,
            },
            _ => ParseError::UnexpectedEof,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.current().cloned() {
            Some(t) if t.kind == kind => {
                self.advance();
                Ok(t)
            }
            _ => Err(self.unexpected(&format!("{:?}", kind))),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_span(&self) -> Span {
        self.current()
            .map(|t| t.span)
            .or_else(|| self.tokens.last().map(|t| t.span))
            .unwrap_or(Span::new(0, 0))
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or(Span::new(0, 0))
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut items = Vec::new();

        loop {
            self.skip_newlines();
            match self.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::Maximize | TokenKind::Minimize => {
                    items.push(Item::Objective(self.parse_objective()?));
                }
                TokenKind::Subject | TokenKind::St => self.parse_header()?,
                _ => items.push(Item::Constraint(self.parse_constraint()?)),
            }
        }

        Ok(Program { items })
    }

    fn end_of_statement(&mut self) -> Result<(), ParseError> {
        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    /// `subject to` / `st`, with an optional trailing colon
    fn parse_header(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Subject) {
            self.expect(TokenKind::To)?;
        } else {
            self.expect(TokenKind::St)?;
        }
        self.eat(TokenKind::Colon);
        self.end_of_statement()
    }

    fn parse_objective(&mut self) -> Result<ObjectiveDecl, ParseError> {
        let start = self.current_span();
        let sense = match self.peek_kind() {
            TokenKind::Maximize => Sense::Maximize,
            _ => Sense::Minimize,
        };
        self.advance();
        self.eat(TokenKind::Colon);

        let expr = self.parse_expr()?;
        let span = start.merge(expr.span);
        self.end_of_statement()?;

        Ok(ObjectiveDecl { span, sense, expr })
    }

    fn parse_constraint(&mut self) -> Result<ConstraintDecl, ParseError> {
        let start = self.current_span();

        let label = if self.peek_kind() == TokenKind::Ident
            && self.peek_kind_at(1) == TokenKind::Colon
        {
            let name = self.expect(TokenKind::Ident)?.text;
            self.advance(); // :
            Some(name)
        } else {
            None
        };

        let lhs = self.parse_expr()?;
        let op = match self.peek_kind() {
            TokenKind::Le => RelOp::Le,
            TokenKind::Ge => RelOp::Ge,
            TokenKind::Eq => RelOp::Eq,
            _ => return Err(self.unexpected("<=, >= or =")),
        };
        self.advance();
        let rhs = self.parse_expr()?;
        let span = start.merge(rhs.span);
        self.end_of_statement()?;

        Ok(ConstraintDecl {
            span,
            label,
            lhs,
            op,
            rhs,
        })
    }

    fn parse_sign(&mut self) -> f64 {
        let mut sign = 1.0;
        loop {
            match self.peek_kind() {
                TokenKind::Plus => {}
                TokenKind::Minus => sign = -sign,
                _ => return sign,
            }
            self.advance();
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        let mut terms = Vec::new();

        let sign = self.parse_sign();
        terms.push(self.parse_term(sign, start)?);

        while matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            let term_start = self.current_span();
            let sign = self.parse_sign();
            terms.push(self.parse_term(sign, term_start)?);
        }

        Ok(Expr {
            span: start.merge(self.previous_span()),
            terms,
        })
    }

    /// `3`, `x`, `2x`, `2 * x`, `0.5 y`
    fn parse_term(&mut self, sign: f64, start: Span) -> Result<Term, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => {
                let token = self.expect(TokenKind::Number)?;
                let value: f64 = token
                    .text
                    .parse()
                    .map_err(|_| ParseError::InvalidNumber(token.text.clone(), token.span))?;

                let starred = self.eat(TokenKind::Star);
                let variable = if starred || self.peek_kind() == TokenKind::Ident {
                    Some(self.expect(TokenKind::Ident)?.text)
                } else {
                    None
                };

                Ok(Term {
                    span: start.merge(self.previous_span()),
                    coefficient: sign * value,
                    variable,
                })
            }
            TokenKind::Ident => {
                let token = self.expect(TokenKind::Ident)?;
                Ok(Term {
                    span: start.merge(token.span),
                    coefficient: sign,
                    variable: Some(token.text),
                })
            }
            _ => Err(self.unexpected("number or variable")),
        }
    }
}
