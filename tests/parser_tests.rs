use aster::ast::Expression;
use aster::error::{FrontendError, SyntaxErrorKind};
use aster::lexer::tokenize;
use aster::parser::Parser;

fn parse_one(input: &str) -> Expression {
    let tokens = tokenize(input).expect("lexing failed");
    let mut parser = Parser::new(tokens);
    let expr = parser.parse().expect("parsing failed");
    assert!(!parser.has_next(), "trailing tokens after `{input}`");
    expr
}

fn parse_err(input: &str) -> SyntaxErrorKind {
    let tokens = tokenize(input).expect("lexing failed");
    let mut parser = Parser::new(tokens);
    match parser.parse() {
        Ok(expr) => panic!("expected a syntax error for `{input}`, parsed {expr}"),
        Err(FrontendError::Syntax(error)) => error.kind,
        Err(other) => panic!("expected a syntax error for `{input}`, got {other}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = parse_one("(1 + 2 * 3)");
    assert_eq!(expr.to_string(), "((+ 1) ((* 2) 3))");
}

#[test]
fn exponentiation_is_right_associative() {
    let expr = parse_one("(2 ^ 3 ^ 2)");
    assert_eq!(expr.to_string(), "((^ 2) ((^ 3) 2))");
}

#[test]
fn subtraction_is_left_associative() {
    let expr = parse_one("(1 - 2 - 3)");
    assert_eq!(expr.to_string(), "((- ((- 1) 2)) 3)");
}

#[test]
fn prefix_and_infix_applications_share_a_shape() {
    let prefix = parse_one("(f a b)");
    let infix = parse_one("(a + b)");
    assert_eq!(prefix.to_string(), "((f a) b)");
    assert_eq!(infix.to_string(), "((+ a) b)");
    let Expression::Application(outer) = prefix else {
        panic!("expected an application");
    };
    assert!(matches!(*outer.func, Expression::Application(_)));
    let Expression::Application(outer) = infix else {
        panic!("expected an application");
    };
    assert!(matches!(*outer.func, Expression::Application(_)));
}

#[test]
fn zero_argument_application_keeps_an_empty_slot() {
    let Expression::Application(app) = parse_one("(f)") else {
        panic!("expected an application");
    };
    assert!(app.arg.is_none());
    assert!(matches!(*app.func, Expression::Name(ref n) if n.value == "f"));
}

#[test]
fn type_ascription_parses_as_an_infix_chain() {
    let expr = parse_one("(5 :: IntType)");
    assert_eq!(expr.to_string(), "((:: 5) IntType)");
}

#[test]
fn arrow_and_comma_are_infix_operators() {
    assert_eq!(
        parse_one("(IntType -> IntType)").to_string(),
        "((-> IntType) IntType)"
    );
    assert_eq!(parse_one("(1 , 2)").to_string(), "((, 1) 2)");
}

#[test]
fn out_of_range_integer_literals_are_rejected() {
    // one past i128::MAX
    let kind = parse_err("170141183460469231731687303715884105728");
    assert!(matches!(kind, SyntaxErrorKind::InvalidNumber(_)));
}

#[test]
fn missing_closing_paren_is_rejected() {
    assert_eq!(parse_err("(1 + 2]"), SyntaxErrorKind::MismatchedParens);
}

#[test]
fn lists_hold_comma_separated_elements() {
    let Expression::List(list) = parse_one("[1, 2, 3]") else {
        panic!("expected a list");
    };
    assert_eq!(list.elements.len(), 3);

    let Expression::List(list) = parse_one("[]") else {
        panic!("expected a list");
    };
    assert!(list.elements.is_empty());
}

#[test]
fn unterminated_list_is_rejected() {
    assert_eq!(parse_err("[1, 2"), SyntaxErrorKind::UnterminatedList);
}

#[test]
fn lambdas_collect_parameters_up_to_the_arrow() {
    let Expression::Function(function) = parse_one("\\x y -> (x + y)") else {
        panic!("expected a lambda");
    };
    let params: Vec<&str> = function.params.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(params, vec!["x", "y"]);
}

#[test]
fn lambda_without_arrow_is_rejected() {
    assert!(matches!(
        parse_err("\\x y 5"),
        SyntaxErrorKind::LambdaMissingArrow(_)
    ));
}

#[test]
fn def_binds_a_name_to_a_value() {
    let Expression::Definition(def) = parse_one("def x 5") else {
        panic!("expected a definition");
    };
    assert_eq!(def.name.value, "x");
    assert!(matches!(*def.value, Expression::Integer(ref i) if i.value == 5));
}

#[test]
fn def_with_parenthesised_head_defines_a_function() {
    let Expression::FunctionDefinition(def) = parse_one("def (add a b) (a + b)") else {
        panic!("expected a function definition");
    };
    assert_eq!(def.name.value, "add");
    let params: Vec<&str> = def.params.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(params, vec!["a", "b"]);
}

#[test]
fn definition_cannot_be_a_binding_value() {
    assert_eq!(
        parse_err("def x def y 5"),
        SyntaxErrorKind::DefinitionAsValue
    );
}

#[test]
fn let_block_collects_bindings_then_a_body() {
    let Expression::Let(let_expr) = parse_one("let { x = 5 (f y) -> y } (f x)") else {
        panic!("expected a let block");
    };
    assert_eq!(let_expr.bindings.len(), 2);
    assert!(matches!(let_expr.bindings[0], Expression::Definition(_)));
    assert!(matches!(
        let_expr.bindings[1],
        Expression::FunctionDefinition(_)
    ));
}

#[test]
fn let_block_requires_a_body() {
    assert_eq!(parse_err("let { x = 5 }"), SyntaxErrorKind::MissingLetBody);
}

#[test]
fn let_body_cannot_be_a_definition() {
    assert_eq!(
        parse_err("let { x = 5 } def y 2"),
        SyntaxErrorKind::DefinitionAsBody
    );
}

#[test]
fn let_binding_requires_an_equals_sign() {
    assert_eq!(
        parse_err("let { x 5 } x"),
        SyntaxErrorKind::MissingBindingEquals
    );
}

#[test]
fn if_requires_then_and_else() {
    let Expression::If(if_expr) = parse_one("if (a > b) then a else b") else {
        panic!("expected an if expression");
    };
    assert!(if_expr.else_branch.is_some());

    assert_eq!(parse_err("if true then 1"), SyntaxErrorKind::MissingElse);
    assert!(matches!(
        parse_err("if true 1 else 2"),
        SyntaxErrorKind::MissingThen(_)
    ));
}

#[test]
fn if_condition_cannot_start_with_a_definition() {
    assert!(matches!(
        parse_err("if def x 5 then 1 else 2"),
        SyntaxErrorKind::InvalidIfStart(_)
    ));
}

#[test]
fn defop_precedence_must_be_a_positive_integer() {
    assert_eq!(
        parse_err("defop 0 Left (a pip b) 1"),
        SyntaxErrorKind::InvalidDefopPrecedence
    );
}

#[test]
fn defop_fixity_must_be_left_or_right() {
    assert_eq!(
        parse_err("defop 5 Up (a pip b) 1"),
        SyntaxErrorKind::InvalidDefopFixity
    );
}

#[test]
fn defop_builds_a_two_parameter_function_definition() {
    let Expression::FunctionDefinition(def) = parse_one("defop 5 Left (a pip b) (b a)") else {
        panic!("expected a function definition");
    };
    assert_eq!(def.name.value, "pip");
    let params: Vec<&str> = def.params.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(params, vec!["a", "b"]);
}

#[test]
fn operators_parse_as_names_in_prefix_position() {
    assert_eq!(parse_one("(- 5)").to_string(), "(- 5)");
    assert_eq!(parse_one("(5 - 3)").to_string(), "((- 5) 3)");
}
