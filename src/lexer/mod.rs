//! Tokenizer for aster source text.
//!
//! The lexer turns raw source into a flat `Vec<Token>` consumed by the
//! parser. Every token carries its lexeme and a [`Span`]; spans are always
//! read and written in **(line, column)** order, both 1-based.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::LexError;

/// A source position in canonical (line, column) order, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    /// Capitalised identifier; parses to a type operator.
    Constructor,
    Integer,
    Float,
    String,
    True,
    False,
    Def,
    Let,
    Defop,
    If,
    Then,
    Else,
    /// The `\` lambda marker.
    Lambda,
    /// `->`, both the lambda arrow and the infix function-type operator.
    Arrow,
    /// `=`, the binding sign in let/def bindings.
    Equals,
    Comma,
    LParen,
    RParen,
    LSquare,
    RSquare,
    LBrace,
    RBrace,
    /// Any other symbolic operator (`+`, `::`, `>>=`, ...).
    Operator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier `{}`", self.text),
            TokenKind::Constructor => format!("constructor `{}`", self.text),
            TokenKind::Integer => format!("integer `{}`", self.text),
            TokenKind::Float => format!("float `{}`", self.text),
            TokenKind::String => format!("string \"{}\"", self.text),
            _ => format!("`{}`", self.text),
        }
    }
}

lazy_static! {
    static ref STRING: Regex = Regex::new(r#"^"([^"\\]|\\.)*""#).unwrap();
    static ref FLOAT: Regex = Regex::new(r"^[0-9]+\.[0-9]+").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^[0-9]+").unwrap();
    static ref IDENT: Regex = Regex::new(r"^[a-z_][A-Za-z0-9_']*").unwrap();
    static ref CONSTRUCTOR: Regex = Regex::new(r"^[A-Z][A-Za-z0-9_']*").unwrap();
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("def", TokenKind::Def);
        m.insert("let", TokenKind::Let);
        m.insert("defop", TokenKind::Defop);
        m.insert("if", TokenKind::If);
        m.insert("then", TokenKind::Then);
        m.insert("else", TokenKind::Else);
        m.insert("true", TokenKind::True);
        m.insert("false", TokenKind::False);
        m
    };
}

/// Fixed lexemes, longest first so that `>>=` wins over `>>` and `>=` over `>`.
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("<$>", TokenKind::Operator),
    (">>=", TokenKind::Operator),
    (">>", TokenKind::Operator),
    ("++", TokenKind::Operator),
    ("==", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    ("&&", TokenKind::Operator),
    ("||", TokenKind::Operator),
    ("::", TokenKind::Operator),
    ("->", TokenKind::Arrow),
    ("=", TokenKind::Equals),
    ("+", TokenKind::Operator),
    ("-", TokenKind::Operator),
    ("*", TokenKind::Operator),
    ("/", TokenKind::Operator),
    ("^", TokenKind::Operator),
    (">", TokenKind::Operator),
    ("<", TokenKind::Operator),
    ("$", TokenKind::Operator),
    (".", TokenKind::Operator),
    (":", TokenKind::Operator),
    (",", TokenKind::Comma),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("[", TokenKind::LSquare),
    ("]", TokenKind::RSquare),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("\\", TokenKind::Lambda),
];

fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Tokenize a whole source text.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = source;
    let mut line = 1usize;
    let mut column = 1usize;

    while let Some(next) = rest.chars().next() {
        if next.is_whitespace() {
            if next == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
            rest = &rest[next.len_utf8()..];
            continue;
        }

        let span = Span::new(line, column);
        let (token, consumed) = if let Some(m) = STRING.find(rest) {
            let inner = &rest[1..m.end() - 1];
            let token = Token {
                kind: TokenKind::String,
                text: unescape(inner),
                span,
            };
            (token, m.end())
        } else if let Some(m) = FLOAT.find(rest) {
            let token = Token {
                kind: TokenKind::Float,
                text: m.as_str().to_string(),
                span,
            };
            (token, m.end())
        } else if let Some(m) = INTEGER.find(rest) {
            let token = Token {
                kind: TokenKind::Integer,
                text: m.as_str().to_string(),
                span,
            };
            (token, m.end())
        } else if let Some(m) = IDENT.find(rest) {
            let kind = KEYWORDS
                .get(m.as_str())
                .copied()
                .unwrap_or(TokenKind::Identifier);
            let token = Token {
                kind,
                text: m.as_str().to_string(),
                span,
            };
            (token, m.end())
        } else if let Some(m) = CONSTRUCTOR.find(rest) {
            let token = Token {
                kind: TokenKind::Constructor,
                text: m.as_str().to_string(),
                span,
            };
            (token, m.end())
        } else if let Some(&(symbol, kind)) = SYMBOLS.iter().find(|(s, _)| rest.starts_with(s)) {
            let token = Token {
                kind,
                text: symbol.to_string(),
                span,
            };
            (token, symbol.len())
        } else {
            return Err(LexError { found: next, span });
        };

        for ch in rest[..consumed].chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        rest = &rest[consumed..];
        tokens.push(token);
    }

    Ok(tokens)
}
