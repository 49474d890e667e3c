//! Error types for the aster front end.
//!
//! Two user-visible failure families exist: [`SyntaxError`] for malformed
//! source text detected by the lexer or parser, and [`InternalError`] for a
//! malformed intermediate tree (a construction invariant violated). Both
//! abort the whole run; the driver catches either through [`FrontendError`].

use thiserror::Error;

use crate::lexer::Span;

/// A character the lexer could not place in any token.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{span}: unrecognised character `{found}`")]
pub struct LexError {
    pub found: char,
    pub span: Span,
}

/// What exactly went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    #[error("unexpected end of source")]
    UnexpectedEnd,
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("invalid number: `{0}`")]
    InvalidNumber(String),
    #[error("a list must be terminated by `]`")]
    UnterminatedList,
    #[error("mismatched parentheses or missing parenthesis on right-hand side")]
    MismatchedParens,
    #[error("expected an identifier in a function definition")]
    ExpectedFunctionName,
    #[error("formal parameters must be followed by `)`")]
    UnterminatedParams,
    #[error("function parameters in a let/def form must be followed by `->`")]
    MissingParamArrow,
    #[error("an arrow must follow the parameters of a lambda, not {0}")]
    LambdaMissingArrow(String),
    #[error("expected an identifier in a let/def binding")]
    ExpectedBindingName,
    #[error("an identifier in a let/def binding must be followed by `=`")]
    MissingBindingEquals,
    #[error("the binding of `{name}` must not be followed by {found}")]
    InvalidBindingStart { name: String, found: String },
    #[error("`def` must be followed by an identifier, not {0}")]
    InvalidDefTarget(String),
    #[error("a definition cannot be the value of a binding")]
    DefinitionAsValue,
    #[error("the body of a let/def expression cannot be a definition")]
    DefinitionAsBody,
    #[error("a let/def form must have a closing `}}`")]
    UnterminatedLet,
    #[error("a let/def form must have a body")]
    MissingLetBody,
    #[error("defop must be followed by an integer precedence >= 1")]
    InvalidDefopPrecedence,
    #[error("defop precedence must be followed by either `Left` or `Right`")]
    InvalidDefopFixity,
    #[error("defop arguments must start with `(`")]
    MissingDefopParen,
    #[error("a defop pattern must be exactly three identifiers: `(lhs op rhs)`")]
    InvalidDefopPattern,
    #[error("a defop pattern must be terminated with `)`")]
    UnterminatedDefopPattern,
    #[error("`if` cannot be followed by {0}")]
    InvalidIfStart(String),
    #[error("the condition of an `if` must be followed by `then`, not {0}")]
    MissingThen(String),
    #[error("an `if` expression must include an `else` variant")]
    MissingElse,
}

/// Malformed input, reported with the position of the offending token.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{span}: syntax error: {kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// A construction invariant of the AST was violated. These signal a bug in
/// tree construction rather than bad surface syntax.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InternalError {
    #[error("let bindings must all be definitions, found {kind}")]
    LetBinding { kind: &'static str },
    #[error(
        "{span}: left-hand side of a type application must not be a type expression, \
         found {kind} `{value}`"
    )]
    TypeApplicationLhs {
        kind: &'static str,
        value: String,
        span: Span,
    },
    #[error(
        "{span}: right-hand side of a type application must be a type expression, \
         found {kind} `{value}`"
    )]
    TypeApplicationRhs {
        kind: &'static str,
        value: String,
        span: Span,
    },
}

/// Unified error for the whole front end; the first one aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}
