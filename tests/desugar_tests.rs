use aster::core::CoreExpr;
use aster::desugar::desugar;
use aster::error::InternalError;
use aster::lexer::{tokenize, Span};
use aster::parser::Parser;

fn lower(input: &str) -> CoreExpr {
    let tokens = tokenize(input).expect("lexing failed");
    let mut parser = Parser::new(tokens);
    let expr = parser.parse().expect("parsing failed");
    assert!(!parser.has_next(), "trailing tokens after `{input}`");
    desugar(expr).expect("desugaring failed")
}

fn lower_err(input: &str) -> InternalError {
    let tokens = tokenize(input).expect("lexing failed");
    let mut parser = Parser::new(tokens);
    let expr = parser.parse().expect("parsing failed");
    match desugar(expr) {
        Ok(core) => panic!("expected desugaring of `{input}` to fail, got {core}"),
        Err(error) => error,
    }
}

#[test]
fn lambdas_are_curried_one_parameter_per_layer() {
    let CoreExpr::Function(outer) = lower("\\x y z -> x") else {
        panic!("expected a function");
    };
    assert_eq!(outer.param.value, "x");
    let CoreExpr::Function(middle) = *outer.body else {
        panic!("expected a curried layer");
    };
    assert_eq!(middle.param.value, "y");
    let CoreExpr::Function(inner) = *middle.body else {
        panic!("expected a curried layer");
    };
    assert_eq!(inner.param.value, "z");
    assert!(matches!(*inner.body, CoreExpr::Name(ref n) if n.value == "x"));

    // every synthesized layer points back at the lambda itself
    let origin = Span::new(1, 1);
    assert_eq!(outer.position, origin);
    assert_eq!(middle.position, origin);
    assert_eq!(inner.position, origin);
}

#[test]
fn function_definitions_lower_to_curried_definitions() {
    let core = lower("def (add a b) (a + b)");
    assert_eq!(
        core.to_string(),
        "(def add (\\a -> (\\b -> ((+ a) b))))"
    );
    assert!(matches!(core, CoreExpr::Definition(_)));
}

#[test]
fn empty_list_lowers_to_nil() {
    assert!(matches!(lower("[]"), CoreExpr::Nil(_)));
}

#[test]
fn lists_lower_to_cons_chains() {
    let core = lower("[1, 2]");
    assert_eq!(core.to_string(), "(((:) 1) (((:) 2) []))");
    assert_eq!(core.position(), Span::new(1, 1));
}

#[test]
fn single_operand_plus_and_minus_become_unary() {
    let CoreExpr::UnaryOp(negation) = lower("(- 5)") else {
        panic!("expected a unary operation");
    };
    assert_eq!(negation.op.value, "-");
    assert!(matches!(*negation.operand, CoreExpr::Integer(ref i) if i.value == 5));

    assert!(matches!(lower("(+ 5)"), CoreExpr::UnaryOp(_)));
}

#[test]
fn binary_minus_stays_an_application_chain() {
    let core = lower("(5 - 3)");
    assert_eq!(core.to_string(), "((- 5) 3)");
    assert!(matches!(core, CoreExpr::Application(_)));
}

#[test]
fn unary_rewrite_applies_in_argument_position() {
    let CoreExpr::Application(app) = lower("(f (- 5))") else {
        panic!("expected an application");
    };
    let arg = app.arg.expect("expected an argument");
    assert!(matches!(*arg, CoreExpr::UnaryOp(_)));
}

#[test]
fn ascription_lowers_to_a_type_application() {
    let CoreExpr::TypeApplication(ascription) = lower("(5 :: IntType)") else {
        panic!("expected a type application");
    };
    assert!(matches!(*ascription.expr, CoreExpr::Integer(_)));
    assert!(matches!(*ascription.ty, CoreExpr::TypeOperator(_)));
    assert_eq!(ascription.to_string(), "(5 :: IntType)");
}

#[test]
fn ascription_right_operand_must_be_a_type() {
    let error = lower_err("(5 :: 6)");
    let InternalError::TypeApplicationRhs { kind, value, .. } = error else {
        panic!("expected a right-hand-side type error, got {error}");
    };
    assert_eq!(kind, "Integer");
    assert_eq!(value, "6");
}

#[test]
fn ascription_left_operand_must_not_be_a_type() {
    let error = lower_err("(IntType :: IntType)");
    assert!(matches!(
        error,
        InternalError::TypeApplicationLhs { kind: "TypeOperator", .. }
    ));
}

#[test]
fn let_blocks_lower_binding_by_binding() {
    let core = lower("let { x = 5 } (x + 1)");
    assert_eq!(core.to_string(), "(let { (def x 5) } ((+ x) 1))");
    let CoreExpr::Let(let_expr) = core else {
        panic!("expected a let block");
    };
    assert!(let_expr.bindings.iter().all(CoreExpr::is_definition));
}

#[test]
fn if_branches_survive_lowering() {
    let CoreExpr::If(if_expr) = lower("if true then 1 else 2") else {
        panic!("expected an if expression");
    };
    assert!(matches!(*if_expr.condition, CoreExpr::Boolean(_)));
    assert!(if_expr.else_branch.is_some());
}

#[test]
fn operator_nodes_keep_the_operator_position() {
    let core = lower("(1 + 2)");
    // built from the `+` token, not the opening paren
    assert_eq!(core.position(), Span::new(1, 4));
}
