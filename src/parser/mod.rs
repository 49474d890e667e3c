//! Recursive-descent parser for the aster surface language.
//!
//! [`Parser::parse`] consumes exactly the tokens belonging to one top-level
//! form (or sub-expression when called recursively), mutating the token
//! cursor as it descends. Parenthesised expressions are disambiguated between
//! infix operator chains (handled by precedence climbing over the parser's
//! own [`OperatorTable`]) and prefix argument lists. A `defop` declaration
//! extends that table, so custom operators parse infix in the forms that
//! follow it.
//!
//! Any malformed input fails with a [`SyntaxError`] carrying the position of
//! the offending token; there is no recovery or resynchronisation.

pub mod ops;

use log::debug;

use crate::ast::{
    self, Boolean, Definition, Expression, Float, Function, FunctionDefinition, IfExpression,
    Integer, LetExpression, List, Name, StringLiteral, TypeOperator,
};
use crate::error::{FrontendError, SyntaxError, SyntaxErrorKind};
use crate::lexer::{Span, Token, TokenKind};

use ops::{Fixity, OperatorTable};

pub type ParseResult<T> = Result<T, FrontendError>;

/// Cursor over the token buffer. The parser is its only owner; every
/// recursive call sees the remainder left by its callee.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    last_span: Span,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            last_span: Span::default(),
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned()?;
        self.index += 1;
        self.last_span = token.span;
        Some(token)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// Span of the next token, or of the last consumed one at end of input.
    pub fn current_span(&self) -> Span {
        self.peek().map(|t| t.span).unwrap_or(self.last_span)
    }
}

pub struct Parser {
    state: ParseState,
    operators: OperatorTable,
}

fn is_binding_terminator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Comma | TokenKind::Arrow | TokenKind::RBrace | TokenKind::RSquare
    )
}

/// Tokens that may start a prefix argument inside a parenthesised
/// application.
fn valid_argument_token(token: &Token) -> bool {
    !matches!(
        token.kind,
        TokenKind::Def
            | TokenKind::Comma
            | TokenKind::RParen
            | TokenKind::RSquare
            | TokenKind::RBrace
            | TokenKind::LBrace
    )
}

fn into_names(items: Vec<Expression>) -> ParseResult<Vec<Name>> {
    items
        .into_iter()
        .map(|item| match item {
            Expression::Name(name) => Ok(name),
            other => Err(SyntaxError::new(
                SyntaxErrorKind::ExpectedFunctionName,
                other.position(),
            )
            .into()),
        })
        .collect()
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            state: ParseState::new(tokens),
            operators: OperatorTable::default(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    fn syntax(&self, kind: SyntaxErrorKind, span: Span) -> FrontendError {
        SyntaxError::new(kind, span).into()
    }

    fn unexpected_end(&self) -> FrontendError {
        self.syntax(SyntaxErrorKind::UnexpectedEnd, self.state.current_span())
    }

    fn peek_info(&self) -> Option<(TokenKind, Span)> {
        self.state.peek().map(|t| (t.kind, t.span))
    }

    fn describe_next(&self) -> String {
        self.state
            .peek()
            .map(|t| t.describe())
            .unwrap_or_else(|| "end of source".to_string())
    }

    /// Parse one top-level form or sub-expression, dispatching on the kind of
    /// the next token.
    pub fn parse(&mut self) -> ParseResult<Expression> {
        let token = match self.state.advance() {
            Some(token) => token,
            None => return Err(self.unexpected_end()),
        };
        let span = token.span;
        match token.kind {
            TokenKind::String => Ok(Expression::String(StringLiteral {
                value: token.text,
                position: span,
            })),
            TokenKind::Integer => {
                let value = token.text.parse::<i128>().map_err(|_| {
                    self.syntax(SyntaxErrorKind::InvalidNumber(token.text.clone()), span)
                })?;
                Ok(Expression::Integer(Integer {
                    value,
                    position: span,
                }))
            }
            TokenKind::Float => {
                let value = token.text.parse::<f64>().map_err(|_| {
                    self.syntax(SyntaxErrorKind::InvalidNumber(token.text.clone()), span)
                })?;
                Ok(Expression::Float(Float {
                    value,
                    position: span,
                }))
            }
            // Operators act as ordinary names in prefix position, which is
            // what makes `(- 5)` and operator sections like `(+)` parse.
            TokenKind::Identifier | TokenKind::Operator => Ok(Expression::Name(Name {
                value: token.text,
                position: span,
            })),
            TokenKind::Constructor => Ok(Expression::TypeOperator(TypeOperator {
                name: token.text,
                position: span,
            })),
            TokenKind::True => Ok(Expression::Boolean(Boolean {
                value: true,
                position: span,
            })),
            TokenKind::False => Ok(Expression::Boolean(Boolean {
                value: false,
                position: span,
            })),
            TokenKind::LSquare => self.parse_list(span),
            TokenKind::Lambda => self.parse_lambda(span),
            TokenKind::Def | TokenKind::Let => self.parse_def(span),
            TokenKind::Defop => self.parse_defop(span),
            TokenKind::If => self.parse_if(span),
            TokenKind::LParen => match self.peek_info() {
                Some((TokenKind::Lambda, lambda_span)) => {
                    self.state.advance();
                    let lambda = self.parse_lambda(lambda_span)?;
                    self.expect_closing_paren()?;
                    Ok(lambda)
                }
                _ => self.compute_app(span),
            },
            _ => Err(self.syntax(SyntaxErrorKind::UnexpectedToken(token.describe()), span)),
        }
    }

    /// Parse one item, then keep parsing while the next token passes
    /// `token_ok`, stopping early once a just-parsed result fails
    /// `result_ok`. Fails on an empty stream or an invalid first token.
    fn parse_many<P, R, V>(
        &mut self,
        mut parse_item: P,
        result_ok: R,
        token_ok: V,
    ) -> ParseResult<Vec<Expression>>
    where
        P: FnMut(&mut Self) -> ParseResult<Expression>,
        R: Fn(&Expression) -> bool,
        V: Fn(&Token) -> bool,
    {
        match self.state.peek() {
            None => return Err(self.unexpected_end()),
            Some(token) if !token_ok(token) => {
                let (found, span) = (token.describe(), token.span);
                return Err(self.syntax(SyntaxErrorKind::UnexpectedToken(found), span));
            }
            Some(_) => {}
        }
        let mut items = vec![parse_item(self)?];
        while let Some(token) = self.state.peek() {
            if !token_ok(token) {
                break;
            }
            let item = parse_item(self)?;
            let keep_going = result_ok(&item);
            items.push(item);
            if !keep_going {
                break;
            }
        }
        Ok(items)
    }

    /// Parse items separated by `separator` tokens, consuming each separator.
    fn parse_between<R>(&mut self, result_ok: R, separator: TokenKind) -> ParseResult<Vec<Expression>>
    where
        R: Fn(&Expression) -> bool,
    {
        let first = self.parse()?;
        if !result_ok(&first) {
            let span = first.position();
            return Err(self.syntax(
                SyntaxErrorKind::UnexpectedToken(first.kind().to_string()),
                span,
            ));
        }
        let mut items = vec![first];
        while matches!(self.peek_info(), Some((kind, _)) if kind == separator) {
            self.state.advance();
            items.push(self.parse()?);
        }
        Ok(items)
    }

    fn expect_closing_paren(&mut self) -> ParseResult<()> {
        match self.peek_info() {
            Some((TokenKind::RParen, _)) => {
                self.state.advance();
                Ok(())
            }
            Some((_, span)) => Err(self.syntax(SyntaxErrorKind::MismatchedParens, span)),
            None => Err(self.syntax(
                SyntaxErrorKind::MismatchedParens,
                self.state.current_span(),
            )),
        }
    }

    /// `[` already consumed: zero or more comma-separated elements up to `]`.
    fn parse_list(&mut self, span: Span) -> ParseResult<Expression> {
        let elements = match self.peek_info() {
            Some((TokenKind::RSquare, _)) => Vec::new(),
            Some(_) => self.parse_between(|_| true, TokenKind::Comma)?,
            None => return Err(self.unexpected_end()),
        };
        match self.peek_info() {
            Some((TokenKind::RSquare, _)) => {
                self.state.advance();
                Ok(Expression::List(List {
                    elements,
                    position: span,
                }))
            }
            Some((_, at)) => Err(self.syntax(SyntaxErrorKind::UnterminatedList, at)),
            None => Err(self.syntax(
                SyntaxErrorKind::UnterminatedList,
                self.state.current_span(),
            )),
        }
    }

    /// `\` already consumed: one or more parameters, an arrow, then the body.
    fn parse_lambda(&mut self, span: Span) -> ParseResult<Expression> {
        let params = self.parse_many(
            Self::parse,
            |item| matches!(item, Expression::Name(_)),
            |token| token.kind == TokenKind::Identifier,
        )?;
        let params = into_names(params)?;
        match self.peek_info() {
            Some((TokenKind::Arrow, _)) => {
                self.state.advance();
            }
            Some((_, at)) => {
                let found = self.describe_next();
                return Err(self.syntax(SyntaxErrorKind::LambdaMissingArrow(found), at));
            }
            None => return Err(self.unexpected_end()),
        }
        let body = self.parse()?;
        Ok(Expression::Function(Function {
            params,
            body: Box::new(body),
            position: span,
        }))
    }

    /// `def`/`let` already consumed: function definition, block form, or
    /// simple binding.
    fn parse_def(&mut self, span: Span) -> ParseResult<Expression> {
        match self.peek_info() {
            Some((TokenKind::LParen, _)) => {
                self.state.advance();
                self.parse_def_function(span, false)
            }
            Some((TokenKind::LBrace, _)) => {
                self.state.advance();
                self.parse_let_form(span)
            }
            Some((TokenKind::Identifier, _)) => {
                let name = match self.parse()? {
                    Expression::Name(name) => name,
                    other => {
                        return Err(
                            self.syntax(SyntaxErrorKind::ExpectedBindingName, other.position())
                        )
                    }
                };
                match self.peek_info() {
                    None => Err(self.unexpected_end()),
                    Some((kind, at)) if is_binding_terminator(kind) => {
                        let found = self.describe_next();
                        Err(self.syntax(
                            SyntaxErrorKind::InvalidBindingStart {
                                name: name.value.clone(),
                                found,
                            },
                            at,
                        ))
                    }
                    Some(_) => {
                        let value = self.parse()?;
                        if value.is_definition() {
                            return Err(self
                                .syntax(SyntaxErrorKind::DefinitionAsValue, value.position()));
                        }
                        Ok(Expression::Definition(Definition {
                            name,
                            value: Box::new(value),
                            position: span,
                        }))
                    }
                }
            }
            Some((_, at)) => {
                let found = self.describe_next();
                Err(self.syntax(SyntaxErrorKind::InvalidDefTarget(found), at))
            }
            None => Err(self.unexpected_end()),
        }
    }

    /// `(` already consumed: `name params... )` then the body. Inside a
    /// let/def block the parameter list must additionally be followed by an
    /// arrow.
    fn parse_def_function(&mut self, span: Span, in_let: bool) -> ParseResult<Expression> {
        let name = match self.parse()? {
            Expression::Name(name) => name,
            other => {
                return Err(self.syntax(SyntaxErrorKind::ExpectedFunctionName, other.position()))
            }
        };
        let params = match self.peek_info() {
            Some((TokenKind::RParen, _)) => Vec::new(),
            Some(_) => {
                let items = self.parse_many(
                    Self::parse,
                    |item| matches!(item, Expression::Name(_)),
                    |token| token.kind == TokenKind::Identifier,
                )?;
                into_names(items)?
            }
            None => return Err(self.unexpected_end()),
        };
        match self.peek_info() {
            Some((TokenKind::RParen, _)) => {
                self.state.advance();
            }
            Some((_, at)) => return Err(self.syntax(SyntaxErrorKind::UnterminatedParams, at)),
            None => {
                return Err(self.syntax(
                    SyntaxErrorKind::UnterminatedParams,
                    self.state.current_span(),
                ))
            }
        }
        if in_let {
            match self.peek_info() {
                Some((TokenKind::Arrow, _)) => {
                    self.state.advance();
                }
                Some((_, at)) => return Err(self.syntax(SyntaxErrorKind::MissingParamArrow, at)),
                None => return Err(self.unexpected_end()),
            }
        }
        let body = self.parse()?;
        Ok(Expression::FunctionDefinition(FunctionDefinition {
            name,
            params,
            body: Box::new(body),
            position: span,
        }))
    }

    /// `{` already consumed: bindings up to `}`, then the block's body.
    fn parse_let_form(&mut self, span: Span) -> ParseResult<Expression> {
        let bindings = self.parse_many(
            Self::parse_let_item,
            Expression::is_definition,
            |token| token.kind != TokenKind::RBrace,
        )?;
        match self.peek_info() {
            Some((TokenKind::RBrace, _)) => {
                self.state.advance();
            }
            Some((_, at)) => return Err(self.syntax(SyntaxErrorKind::UnterminatedLet, at)),
            None => {
                return Err(self.syntax(
                    SyntaxErrorKind::UnterminatedLet,
                    self.state.current_span(),
                ))
            }
        }
        if !self.state.has_next() {
            return Err(self.syntax(
                SyntaxErrorKind::MissingLetBody,
                self.state.current_span(),
            ));
        }
        let body = self.parse()?;
        if body.is_definition() {
            return Err(self.syntax(SyntaxErrorKind::DefinitionAsBody, body.position()));
        }
        let let_expr = LetExpression::new(bindings, body, span)?;
        Ok(Expression::Let(let_expr))
    }

    fn parse_let_item(&mut self) -> ParseResult<Expression> {
        match self.peek_info() {
            Some((TokenKind::LParen, at)) => {
                self.state.advance();
                self.parse_def_function(at, true)
            }
            Some(_) => self.parse_let_binding(),
            None => Err(self.unexpected_end()),
        }
    }

    /// `name = value` inside a let/def block.
    fn parse_let_binding(&mut self) -> ParseResult<Expression> {
        let span = self.state.current_span();
        let name = match self.parse()? {
            Expression::Name(name) => name,
            other => {
                return Err(self.syntax(SyntaxErrorKind::ExpectedBindingName, other.position()))
            }
        };
        match self.peek_info() {
            Some((TokenKind::Equals, _)) => {
                self.state.advance();
            }
            Some((_, at)) => return Err(self.syntax(SyntaxErrorKind::MissingBindingEquals, at)),
            None => return Err(self.unexpected_end()),
        }
        match self.peek_info() {
            None => return Err(self.unexpected_end()),
            Some((kind, at)) if is_binding_terminator(kind) => {
                let found = self.describe_next();
                return Err(self.syntax(
                    SyntaxErrorKind::InvalidBindingStart {
                        name: name.value.clone(),
                        found,
                    },
                    at,
                ));
            }
            Some(_) => {}
        }
        let value = self.parse()?;
        if value.is_definition() {
            return Err(self.syntax(SyntaxErrorKind::DefinitionAsValue, value.position()));
        }
        Ok(Expression::Definition(Definition {
            name,
            value: Box::new(value),
            position: span,
        }))
    }

    /// `defop` already consumed: precedence, fixity, `(lhs op rhs)`, body.
    /// Builds a two-parameter function definition named after the operator
    /// and registers the operator in the table for the rest of the parse.
    fn parse_defop(&mut self, span: Span) -> ParseResult<Expression> {
        let precedence = match self.state.peek() {
            Some(token) if token.kind == TokenKind::Integer => {
                token.text.parse::<u32>().ok().filter(|p| *p >= 1)
            }
            _ => None,
        };
        let precedence = match precedence {
            Some(p) => {
                self.state.advance();
                p
            }
            None => {
                let at = self.state.current_span();
                return Err(self.syntax(SyntaxErrorKind::InvalidDefopPrecedence, at));
            }
        };
        let fixity = match self.state.peek() {
            Some(token) if token.text == "Left" => Some(Fixity::Left),
            Some(token) if token.text == "Right" => Some(Fixity::Right),
            _ => None,
        };
        let fixity = match fixity {
            Some(fixity) => {
                self.state.advance();
                fixity
            }
            None => {
                let at = self.state.current_span();
                return Err(self.syntax(SyntaxErrorKind::InvalidDefopFixity, at));
            }
        };
        match self.peek_info() {
            Some((TokenKind::LParen, _)) => {
                self.state.advance();
            }
            Some((_, at)) => return Err(self.syntax(SyntaxErrorKind::MissingDefopParen, at)),
            None => return Err(self.unexpected_end()),
        }
        let mut pattern = Vec::with_capacity(3);
        for _ in 0..3 {
            match self.peek_info() {
                Some((TokenKind::Identifier, _)) => {
                    if let Some(token) = self.state.advance() {
                        pattern.push(Name {
                            value: token.text,
                            position: token.span,
                        });
                    }
                }
                Some((_, at)) => {
                    return Err(self.syntax(SyntaxErrorKind::InvalidDefopPattern, at))
                }
                None => return Err(self.unexpected_end()),
            }
        }
        match self.peek_info() {
            Some((TokenKind::RParen, _)) => {
                self.state.advance();
            }
            Some((_, at)) => {
                return Err(self.syntax(SyntaxErrorKind::UnterminatedDefopPattern, at))
            }
            None => return Err(self.unexpected_end()),
        }
        let mut pattern = pattern.into_iter();
        let (Some(lhs), Some(op), Some(rhs)) = (pattern.next(), pattern.next(), pattern.next())
        else {
            return Err(self.syntax(SyntaxErrorKind::InvalidDefopPattern, span));
        };
        self.operators.define(&op.value, precedence, fixity);
        debug!(
            "defop: registered `{}` with precedence {precedence} ({fixity:?})",
            op.value
        );
        let body = self.parse()?;
        Ok(Expression::FunctionDefinition(FunctionDefinition {
            name: op,
            params: vec![lhs, rhs],
            body: Box::new(body),
            position: span,
        }))
    }

    /// `if` already consumed: condition, `then` branch, mandatory `else`
    /// branch.
    fn parse_if(&mut self, span: Span) -> ParseResult<Expression> {
        match self.peek_info() {
            None => return Err(self.unexpected_end()),
            Some((kind, at))
                if matches!(kind, TokenKind::Def | TokenKind::Comma | TokenKind::Lambda) =>
            {
                let found = self.describe_next();
                return Err(self.syntax(SyntaxErrorKind::InvalidIfStart(found), at));
            }
            Some(_) => {}
        }
        let condition = self.parse()?;
        match self.peek_info() {
            Some((TokenKind::Then, _)) => {
                self.state.advance();
            }
            Some((_, at)) => {
                let found = self.describe_next();
                return Err(self.syntax(SyntaxErrorKind::MissingThen(found), at));
            }
            None => return Err(self.unexpected_end()),
        }
        let then_branch = self.parse()?;
        match self.peek_info() {
            Some((TokenKind::Else, _)) => {
                self.state.advance();
            }
            _ => return Err(self.syntax(SyntaxErrorKind::MissingElse, span)),
        }
        if !self.state.has_next() {
            return Err(self.unexpected_end());
        }
        let else_branch = self.parse()?;
        Ok(Expression::If(IfExpression {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
            position: span,
        }))
    }

    /// `(` already consumed and the next token is not a lambda marker:
    /// either an infix chain (next token is a known operator) or a prefix
    /// argument list, both closed by `)`.
    fn compute_app(&mut self, span: Span) -> ParseResult<Expression> {
        let lhs = self.parse()?;
        let (next_kind, is_infix) = match self.state.peek() {
            Some(token) => (token.kind, self.operators.lookup(&token.text).is_some()),
            None => return Err(self.unexpected_end()),
        };
        if is_infix {
            let result = self.parse_infix(1, lhs)?;
            self.expect_closing_paren()?;
            Ok(result)
        } else {
            let args = if next_kind == TokenKind::RParen {
                Vec::new()
            } else {
                self.parse_many(
                    Self::parse,
                    |item| !matches!(item, Expression::Definition(_)),
                    valid_argument_token,
                )?
            };
            self.expect_closing_paren()?;
            Ok(ast::make_app(lhs, args, span))
        }
    }

    /// Precedence climbing over the operator table; `min_prec` starts at 1.
    fn parse_infix(&mut self, min_prec: u32, mut lhs: Expression) -> ParseResult<Expression> {
        loop {
            let (text, at, info) = match self.state.peek() {
                Some(token) => match self.operators.lookup(&token.text) {
                    Some(info) => (token.text.clone(), token.span, info),
                    None => break,
                },
                None => return Err(self.unexpected_end()),
            };
            if info.precedence < min_prec {
                break;
            }
            self.state.advance();
            let next_min = match info.fixity {
                Fixity::Left => info.precedence.saturating_add(1),
                Fixity::Right => info.precedence,
            };
            let first = self.parse()?;
            let rhs = self.parse_infix(next_min, first)?;
            let op = Expression::Name(Name {
                value: text,
                position: at,
            });
            lhs = ast::make_app(op, vec![lhs, rhs], at);
        }
        Ok(lhs)
    }
}
