//! Surface AST - the tree shape produced directly by parsing.
//!
//! The surface AST stays close to written syntax: functions are uncurried
//! (one node, many parameters), list literals are still lists, and the `::`
//! type ascription is an ordinary application of the `::` operator. The
//! desugarer lowers all of this into the [`crate::core`] representation.
//!
//! Every node carries the `Span` of the token that introduced it, so that
//! diagnostics in later stages can point back at the source.

use crate::error::InternalError;
use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(Integer),
    Float(Float),
    String(StringLiteral),
    Boolean(Boolean),
    List(List),
    Name(Name),
    Application(Application),
    UnaryOp(UnaryOp),
    Function(Function),
    TypeOperator(TypeOperator),
    TypeVar(TypeVar),
    FunctionDefinition(FunctionDefinition),
    Definition(Definition),
    Let(LetExpression),
    If(IfExpression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Integer {
    pub value: i128,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Float {
    pub value: f64,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boolean {
    pub value: bool,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub elements: Vec<Expression>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub value: String,
    pub position: Span,
}

/// Function application. The function slot is required; the argument slot is
/// optional to support zero-argument prefix forms like `(f)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub func: Box<Expression>,
    pub arg: Option<Box<Expression>>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: Name,
    pub operand: Box<Expression>,
    pub position: Span,
}

/// Anonymous function, still uncurried at this stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub params: Vec<Name>,
    pub body: Box<Expression>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeOperator {
    pub name: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeVar {
    pub name: String,
    pub position: Span,
}

/// `def (name params...) body`, also produced by `defop`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Box<Expression>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: Name,
    pub value: Box<Expression>,
    pub position: Span,
}

/// `let { bindings... } body`. Constructed through [`LetExpression::new`],
/// which enforces that every binding is a definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LetExpression {
    pub bindings: Vec<Expression>,
    pub body: Box<Expression>,
    pub position: Span,
}

impl LetExpression {
    pub fn new(
        bindings: Vec<Expression>,
        body: Expression,
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

/// The parser always fills in the else branch; it stays optional in the tree
/// and the desugarer tolerates its absence.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub then_branch: Box<Expression>,
    pub else_branch: Option<Box<Expression>>,
    pub position: Span,
}

impl Expression {
    /// The display/type capability shared by every variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Integer(_) => "Integer",
            Expression::Float(_) => "Float",
            Expression::String(_) => "String",
            Expression::Boolean(_) => "Boolean",
            Expression::List(_) => "List",
            Expression::Name(_) => "Name",
            Expression::Application(_) => "Application",
            Expression::UnaryOp(_) => "UnaryOp",
            Expression::Function(_) => "Function",
            Expression::TypeOperator(_) => "TypeOperator",
            Expression::TypeVar(_) => "TypeVar",
            Expression::FunctionDefinition(_) => "FunctionDefinition",
            Expression::Definition(_) => "Definition",
            Expression::Let(_) => "Let",
            Expression::If(_) => "If",
        }
    }

    pub fn position(&self) -> Span {
        match self {
            Expression::Integer(i) => i.position,
            Expression::Float(fl) => fl.position,
            Expression::String(s) => s.position,
            Expression::Boolean(b) => b.position,
            Expression::List(l) => l.position,
            Expression::Name(n) => n.position,
            Expression::Application(a) => a.position,
            Expression::UnaryOp(u) => u.position,
            Expression::Function(f) => f.position,
            Expression::TypeOperator(t) => t.position,
            Expression::TypeVar(t) => t.position,
            Expression::FunctionDefinition(d) => d.position,
            Expression::Definition(d) => d.position,
            Expression::Let(l) => l.position,
            Expression::If(i) => i.position,
        }
    }

    /// True exactly for the surface type-language variants.
    pub fn is_type_expr(&self) -> bool {
        matches!(self, Expression::TypeOperator(_) | Expression::TypeVar(_))
    }

    /// True for the two binding forms allowed inside a let/def block.
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            Expression::Definition(_) | Expression::FunctionDefinition(_)
        )
    }
}

/// Fold a function and its arguments into left-nested binary applications:
/// `f [a, b]` becomes `App(App(f, a), b)`. With no arguments the single
/// application node keeps an empty argument slot.
pub fn make_app(func: Expression, args: Vec<Expression>, position: Span) -> Expression {
    let mut args = args.into_iter();
    let first = match args.next() {
        Some(arg) => Expression::Application(Application {
            func: Box::new(func),
            arg: Some(Box::new(arg)),
            position,
        }),
        None => {
            return Expression::Application(Application {
                func: Box::new(func),
                arg: None,
                position,
            })
        }
    };
    args.fold(first, |acc, arg| {
        Expression::Application(Application {
            func: Box::new(acc),
            arg: Some(Box::new(arg)),
            position,
        })
    })
}
