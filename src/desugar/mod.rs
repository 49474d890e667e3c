//! Lowering from the surface AST to the core AST.
//!
//! Desugaring is total and purely structural: no name resolution, no
//! arithmetic, no dropped positions. The rewrites are
//!
//! - multi-parameter functions and function definitions become right-nested
//!   chains of single-parameter [`CoreFunction`]s,
//! - list literals become `(:)`-application chains ending in [`CoreNil`],
//! - applications of the `::` operator become [`CoreTypeApplication`] nodes,
//! - a `+` or `-` applied to a single operand becomes a [`CoreUnaryOp`],
//!   unless the application itself sits in function position (then it is an
//!   ordinary binary chain like `(a - b)`).

use log::trace;

use crate::ast::{Application, Expression, Name};
use crate::core::{
    CoreApplication, CoreBoolean, CoreDefinition, CoreExpr, CoreFloat, CoreFunction, CoreIf,
    CoreInteger, CoreLet, CoreName, CoreNil, CoreString, CoreTypeApplication, CoreTypeOperator,
    CoreTypeVar, CoreUnaryOp,
};
use crate::error::InternalError;
use crate::lexer::Span;

fn core_name(name: Name) -> CoreName {
    CoreName {
        value: name.value,
        position: name.position,
    }
}

/// Lower one surface expression into the core language.
pub fn desugar(expr: Expression) -> Result<CoreExpr, InternalError> {
    trace!("desugaring {} at {}", expr.kind(), expr.position());
    match expr {
        Expression::Integer(i) => Ok(CoreExpr::Integer(CoreInteger {
            value: i.value,
            position: i.position,
        })),
        Expression::Float(f) => Ok(CoreExpr::Float(CoreFloat {
            value: f.value,
            position: f.position,
        })),
        Expression::String(s) => Ok(CoreExpr::String(CoreString {
            value: s.value,
            position: s.position,
        })),
        Expression::Boolean(b) => Ok(CoreExpr::Boolean(CoreBoolean {
            value: b.value,
            position: b.position,
        })),
        Expression::Name(n) => Ok(CoreExpr::Name(core_name(n))),
        Expression::TypeOperator(t) => Ok(CoreExpr::TypeOperator(CoreTypeOperator {
            name: t.name,
            position: t.position,
        })),
        Expression::TypeVar(t) => Ok(CoreExpr::TypeVar(CoreTypeVar {
            name: t.name,
            position: t.position,
        })),
        Expression::List(list) => desugar_list(list.elements, list.position),
        Expression::Application(app) => desugar_application(app, false),
        Expression::UnaryOp(u) => Ok(CoreExpr::UnaryOp(CoreUnaryOp {
            op: core_name(u.op),
            operand: Box::new(desugar(*u.operand)?),
            position: u.position,
        })),
        Expression::Function(f) => curry(f.params, *f.body, f.position),
        Expression::FunctionDefinition(d) => {
            let value = curry(d.params, *d.body, d.position)?;
            Ok(CoreExpr::Definition(CoreDefinition {
                name: core_name(d.name),
                value: Box::new(value),
                position: d.position,
            }))
        }
        Expression::Definition(d) => Ok(CoreExpr::Definition(CoreDefinition {
            name: core_name(d.name),
            value: Box::new(desugar(*d.value)?),
            position: d.position,
        })),
        Expression::Let(l) => {
            let bindings = l
                .bindings
                .into_iter()
                .map(desugar)
                .collect::<Result<Vec<_>, _>>()?;
            let body = desugar(*l.body)?;
            Ok(CoreExpr::Let(CoreLet::new(bindings, body, l.position)?))
        }
        Expression::If(i) => {
            let else_branch = match i.else_branch {
                Some(branch) => Some(Box::new(desugar(*branch)?)),
                None => None,
            };
            Ok(CoreExpr::If(CoreIf {
                condition: Box::new(desugar(*i.condition)?),
                then_branch: Box::new(desugar(*i.then_branch)?),
                else_branch,
                position: i.position,
            }))
        }
    }
}

/// Curry a parameter list over a body, innermost parameter first. Every
/// synthesized function layer keeps the surface node's position.
fn curry(params: Vec<Name>, body: Expression, position: Span) -> Result<CoreExpr, InternalError> {
    let mut value = desugar(body)?;
    for param in params.into_iter().rev() {
        value = CoreExpr::Function(CoreFunction {
            param: core_name(param),
            body: Box::new(value),
            position,
        });
    }
    Ok(value)
}

/// `[a, b]` becomes `((:) a ((:) b []))`; synthesized cons and nil nodes all
/// carry the list literal's position.
fn desugar_list(elements: Vec<Expression>, position: Span) -> Result<CoreExpr, InternalError> {
    let mut result = CoreExpr::Nil(CoreNil { position });
    for element in elements.into_iter().rev() {
        let cons = CoreExpr::Application(CoreApplication {
            func: Box::new(CoreExpr::Name(CoreName {
                value: "(:)".to_string(),
                position,
            })),
            arg: Some(Box::new(desugar(element)?)),
            position,
        });
        result = CoreExpr::Application(CoreApplication {
            func: Box::new(cons),
            arg: Some(Box::new(result)),
            position,
        });
    }
    Ok(result)
}

/// Lower an application node. `applied` is true when this node itself sits
/// in the function position of an enclosing application; the unary `+`/`-`
/// rewrite is suppressed there, which is what keeps `(a - b)` a binary chain
/// while `(- a)` becomes a unary node.
fn desugar_application(app: Application, applied: bool) -> Result<CoreExpr, InternalError> {
    let Application {
        func,
        arg,
        position,
    } = app;

    let arg = match arg {
        Some(arg) => *arg,
        None => {
            return Ok(CoreExpr::Application(CoreApplication {
                func: Box::new(desugar_callee(*func)?),
                arg: None,
                position,
            }))
        }
    };

    if !applied {
        if let Expression::Name(name) = func.as_ref() {
            if name.value == "+" || name.value == "-" {
                return Ok(CoreExpr::UnaryOp(CoreUnaryOp {
                    op: CoreName {
                        value: name.value.clone(),
                        position: name.position,
                    },
                    operand: Box::new(desugar(arg)?),
                    position,
                }));
            }
        }
    }

    match *func {
        // `((:: e) T)` is the type ascription produced by the infix parse of
        // `(e :: T)`.
        Expression::Application(inner)
            if matches!(inner.func.as_ref(), Expression::Name(n) if n.value == "::") =>
        {
            match inner.arg {
                Some(lhs) => {
                    let ascription =
                        CoreTypeApplication::new(desugar(*lhs)?, desugar(arg)?, position)?;
                    Ok(CoreExpr::TypeApplication(ascription))
                }
                None => {
                    // `::` applied with no left operand stays an ordinary
                    // curried application.
                    let callee = CoreExpr::Application(CoreApplication {
                        func: Box::new(desugar(*inner.func)?),
                        arg: None,
                        position: inner.position,
                    });
                    Ok(CoreExpr::Application(CoreApplication {
                        func: Box::new(callee),
                        arg: Some(Box::new(desugar(arg)?)),
                        position,
                    }))
                }
            }
        }
        Expression::Application(inner) => Ok(CoreExpr::Application(CoreApplication {
            func: Box::new(desugar_application(inner, true)?),
            arg: Some(Box::new(desugar(arg)?)),
            position,
        })),
        other => Ok(CoreExpr::Application(CoreApplication {
            func: Box::new(desugar(other)?),
            arg: Some(Box::new(desugar(arg)?)),
            position,
        })),
    }
}

/// Lower the function slot of an application, keeping nested applications in
/// "applied" mode.
fn desugar_callee(expr: Expression) -> Result<CoreExpr, InternalError> {
    match expr {
        Expression::Application(app) => desugar_application(app, true),
        other => desugar(other),
    }
}
