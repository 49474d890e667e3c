//! Rendering of the core AST.
//!
//! Every output is fully parenthesised, so curried chains read as
//! `((f a) b)` and cons chains as `((:) a ...)`.

use std::fmt::{Display, Formatter, Result};

use crate::core::{
    CoreApplication, CoreBoolean, CoreDefinition, CoreExpr, CoreFloat, CoreFunction, CoreIf,
    CoreInteger, CoreLet, CoreName, CoreNil, CoreString, CoreTypeApplication, CoreTypeOperator,
    CoreTypeVar, CoreUnaryOp,
};

impl Display for CoreExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CoreExpr::Integer(i) => i.fmt(f),
            CoreExpr::Float(fl) => fl.fmt(f),
            CoreExpr::String(s) => s.fmt(f),
            CoreExpr::Boolean(b) => b.fmt(f),
            CoreExpr::Name(n) => n.fmt(f),
            CoreExpr::Nil(n) => n.fmt(f),
            CoreExpr::Application(a) => a.fmt(f),
            CoreExpr::UnaryOp(u) => u.fmt(f),
            CoreExpr::Function(fun) => fun.fmt(f),
            CoreExpr::Definition(d) => d.fmt(f),
            CoreExpr::Let(l) => l.fmt(f),
            CoreExpr::If(i) => i.fmt(f),
            CoreExpr::TypeOperator(t) => t.fmt(f),
            CoreExpr::TypeVar(t) => t.fmt(f),
            CoreExpr::TypeApplication(t) => t.fmt(f),
        }
    }
}

impl Display for CoreInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for CoreFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for CoreString {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "\"{}\"", self.value)
    }
}

impl Display for CoreBoolean {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for CoreName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for CoreNil {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[]")
    }
}

impl Display for CoreApplication {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.arg {
            Some(arg) => write!(f, "({} {})", self.func, arg),
            None => write!(f, "({})", self.func),
        }
    }
}

impl Display for CoreUnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {})", self.op, self.operand)
    }
}

impl Display for CoreFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(\\{} -> {})", self.param, self.body)
    }
}

impl Display for CoreDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(def {} {})", self.name, self.value)
    }
}

impl Display for CoreLet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(let {{")?;
        for binding in &self.bindings {
            write!(f, " {binding}")?;
        }
        write!(f, " }} {})", self.body)
    }
}

impl Display for CoreIf {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(if {} then {}", self.condition, self.then_branch)?;
        if let Some(else_branch) = &self.else_branch {
            write!(f, " else {else_branch}")?;
        }
        write!(f, ")")
    }
}

impl Display for CoreTypeOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}

impl Display for CoreTypeVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}

impl Display for CoreTypeApplication {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} :: {})", self.expr, self.ty)
    }
}
