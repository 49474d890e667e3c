//! Rendering of the surface AST.

use std::fmt::{Display, Formatter, Result};

use crate::ast::{
    Application, Boolean, Definition, Expression, Float, Function, FunctionDefinition,
    IfExpression, Integer, LetExpression, List, Name, StringLiteral, TypeOperator, TypeVar,
    UnaryOp,
};

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expression::Integer(i) => i.fmt(f),
            Expression::Float(fl) => fl.fmt(f),
            Expression::String(s) => s.fmt(f),
            Expression::Boolean(b) => b.fmt(f),
            Expression::List(l) => l.fmt(f),
            Expression::Name(n) => n.fmt(f),
            Expression::Application(a) => a.fmt(f),
            Expression::UnaryOp(u) => u.fmt(f),
            Expression::Function(fun) => fun.fmt(f),
            Expression::TypeOperator(t) => t.fmt(f),
            Expression::TypeVar(t) => t.fmt(f),
            Expression::FunctionDefinition(d) => d.fmt(f),
            Expression::Definition(d) => d.fmt(f),
            Expression::Let(l) => l.fmt(f),
            Expression::If(i) => i.fmt(f),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for Float {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "\"{}\"", self.value)
    }
}

impl Display for Boolean {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[")?;
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            element.fmt(f)?;
        }
        write!(f, "]")
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Display for Application {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.arg {
            Some(arg) => write!(f, "({} {})", self.func, arg),
            None => write!(f, "({})", self.func),
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {})", self.op, self.operand)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(\\")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            param.fmt(f)?;
        }
        write!(f, " -> {})", self.body)
    }
}

impl Display for TypeOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}

impl Display for TypeVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(def ({}", self.name)?;
        for param in &self.params {
            write!(f, " {param}")?;
        }
        write!(f, ") {})", self.body)
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(def {} {})", self.name, self.value)
    }
}

impl Display for LetExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(let {{")?;
        for binding in &self.bindings {
            write!(f, " {binding}")?;
        }
        write!(f, " }} {})", self.body)
    }
}

impl Display for IfExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "(if {} then {}", self.condition, self.then_branch)?;
        if let Some(else_branch) = &self.else_branch {
            write!(f, " else {else_branch}")?;
        }
        write!(f, ")")
    }
}
