//! aster - the front end of a small functional, Haskell-flavoured language.
//!
//! The crate covers everything between source text and the core tree a type
//! checker or evaluator would consume:
//!
//! 1. [`lexer`] turns source text into a token stream, every token annotated
//!    with a 1-based (line, column) [`lexer::Span`].
//! 2. [`parser`] builds the surface [`ast`] by recursive descent, resolving
//!    parenthesised infix chains by precedence climbing over an operator
//!    table that `defop` declarations can extend mid-parse.
//! 3. [`desugar`] lowers the surface tree into the [`core`] representation:
//!    functions are curried, list literals become cons chains, `::`
//!    ascriptions become explicit type applications.
//!
//! [`parse_source`] runs the whole pipeline over a sequence of top-level
//! forms and is what the `aster` binary calls:
//!
//! ```
//! let forms = aster::parse_source("def x (1 + 2)").unwrap();
//! assert_eq!(forms.len(), 1);
//! ```
//!
//! Failures at any stage surface as [`error::FrontendError`]; the first
//! error aborts the run, so a partial parse never escapes.

pub mod ast;
pub mod core;
pub mod desugar;
pub mod error;
pub mod fmt;
pub mod lexer;
pub mod parser;

use log::debug;

use crate::core::CoreExpr;
use crate::error::FrontendError;
use crate::parser::Parser;

/// Lex, parse, and desugar a whole source text. Returns the lowered
/// top-level forms in source order, or the first error encountered.
pub fn parse_source(source: &str) -> Result<Vec<CoreExpr>, FrontendError> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let mut forms = Vec::new();
    while parser.has_next() {
        let surface = parser.parse()?;
        debug!("parsed {surface}");
        forms.push(desugar::desugar(surface)?);
    }
    Ok(forms)
}
