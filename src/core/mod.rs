//! Core AST - the reduced tree shape after desugaring.
//!
//! The core language is what the type checker and evaluator would consume:
//! every function takes exactly one parameter (currying), list literals are
//! gone (replaced by `(:)`-application chains ending in [`CoreNil`]), and
//! type ascriptions are explicit [`CoreTypeApplication`] nodes.
//!
//! Position information survives desugaring: every synthesized node copies
//! its span from the surface node it was derived from, so diagnostics on any
//! curried layer still point at the user's source location.

use crate::error::InternalError;
use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreExpr {
    Integer(CoreInteger),
    Float(CoreFloat),
    String(CoreString),
    Boolean(CoreBoolean),
    Name(CoreName),
    Nil(CoreNil),
    Application(CoreApplication),
    UnaryOp(CoreUnaryOp),
    Function(CoreFunction),
    Definition(CoreDefinition),
    Let(CoreLet),
    If(CoreIf),
    TypeOperator(CoreTypeOperator),
    TypeVar(CoreTypeVar),
    TypeApplication(CoreTypeApplication),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreInteger {
    pub value: i128,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreFloat {
    pub value: f64,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreString {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreBoolean {
    pub value: bool,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreName {
    pub value: String,
    pub position: Span,
}

/// The empty-list terminator of a cons chain.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreNil {
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreApplication {
    pub func: Box<CoreExpr>,
    pub arg: Option<Box<CoreExpr>>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreUnaryOp {
    pub op: CoreName,
    pub operand: Box<CoreExpr>,
    pub position: Span,
}

/// A function with exactly one parameter; multi-parameter surface functions
/// arrive here as right-nested chains.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreFunction {
    pub param: CoreName,
    pub body: Box<CoreExpr>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreDefinition {
    pub name: CoreName,
    pub value: Box<CoreExpr>,
    pub position: Span,
}

/// Constructed through [`CoreLet::new`], which re-checks the all-definitions
/// invariant after desugaring.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreLet {
    pub bindings: Vec<CoreExpr>,
    pub body: Box<CoreExpr>,
    pub position: Span,
}

impl CoreLet {
    pub fn new(
        bindings: Vec<CoreExpr>,
        body: CoreExpr,
        position: Span,
    ) -> Result<Self, InternalError> {
        if let Some(offender) = bindings.iter().find(|b| !b.is_definition()) {
            return Err(InternalError::LetBinding {
                kind: offender.kind(),
            });
        }
        Ok(Self {
            bindings,
            body: Box::new(body),
            position,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreIf {
    pub condition: Box<CoreExpr>,
    pub then_branch: Box<CoreExpr>,
    pub else_branch: Option<Box<CoreExpr>>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreTypeOperator {
    pub name: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreTypeVar {
    pub name: String,
    pub position: Span,
}

/// `expr :: type`, introduced only by desugaring. [`CoreTypeApplication::new`]
/// enforces the type-expression capability on both operands.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreTypeApplication {
    pub expr: Box<CoreExpr>,
    pub ty: Box<CoreExpr>,
    pub position: Span,
}

impl CoreTypeApplication {
    pub fn new(expr: CoreExpr, ty: CoreExpr, position: Span) -> Result<Self, InternalError> {
        if expr.is_type_expr() {
            return Err(InternalError::TypeApplicationLhs {
                kind: expr.kind(),
                value: expr.to_string(),
                span: position,
            });
        }
        if !ty.is_type_expr() {
            return Err(InternalError::TypeApplicationRhs {
                kind: ty.kind(),
                value: ty.to_string(),
                span: position,
            });
        }
        Ok(Self {
            expr: Box::new(expr),
            ty: Box::new(ty),
            position,
        })
    }
}

impl CoreExpr {
    pub fn kind(&self) -> &'static str {
        match self {
            CoreExpr::Integer(_) => "Integer",
            CoreExpr::Float(_) => "Float",
            CoreExpr::String(_) => "String",
            CoreExpr::Boolean(_) => "Boolean",
            CoreExpr::Name(_) => "Name",
            CoreExpr::Nil(_) => "Nil",
            CoreExpr::Application(_) => "Application",
            CoreExpr::UnaryOp(_) => "UnaryOp",
            CoreExpr::Function(_) => "Function",
            CoreExpr::Definition(_) => "Definition",
            CoreExpr::Let(_) => "Let",
            CoreExpr::If(_) => "If",
            CoreExpr::TypeOperator(_) => "TypeOperator",
            CoreExpr::TypeVar(_) => "TypeVar",
            CoreExpr::TypeApplication(_) => "TypeApplication",
        }
    }

    pub fn position(&self) -> Span {
        match self {
            CoreExpr::Integer(i) => i.position,
            CoreExpr::Float(fl) => fl.position,
            CoreExpr::String(s) => s.position,
            CoreExpr::Boolean(b) => b.position,
            CoreExpr::Name(n) => n.position,
            CoreExpr::Nil(n) => n.position,
            CoreExpr::Application(a) => a.position,
            CoreExpr::UnaryOp(u) => u.position,
            CoreExpr::Function(f) => f.position,
            CoreExpr::Definition(d) => d.position,
            CoreExpr::Let(l) => l.position,
            CoreExpr::If(i) => i.position,
            CoreExpr::TypeOperator(t) => t.position,
            CoreExpr::TypeVar(t) => t.position,
            CoreExpr::TypeApplication(t) => t.position,
        }
    }

    /// The closed type-expression set: exactly `TypeVar`, `TypeOperator`, and
    /// `TypeApplication`.
    pub fn is_type_expr(&self) -> bool {
        matches!(
            self,
            CoreExpr::TypeVar(_) | CoreExpr::TypeOperator(_) | CoreExpr::TypeApplication(_)
        )
    }

    pub fn is_definition(&self) -> bool {
        matches!(self, CoreExpr::Definition(_))
    }
}
