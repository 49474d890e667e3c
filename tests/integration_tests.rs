use aster::core::CoreExpr;
use aster::error::{FrontendError, SyntaxErrorKind};
use aster::lexer::Span;
use aster::parse_source;

#[test]
fn top_level_forms_lower_in_source_order() {
    let forms = parse_source("def x 5 def y (x + 1)").expect("pipeline failed");
    let rendered: Vec<String> = forms.iter().map(CoreExpr::to_string).collect();
    assert_eq!(rendered, vec!["(def x 5)", "(def y ((+ x) 1))"]);
}

#[test]
fn defop_extends_the_grammar_for_later_forms() {
    let forms =
        parse_source("defop 6 Left (a pow b) (a ^ b) (2 pow 3)").expect("pipeline failed");
    assert_eq!(forms.len(), 2);
    assert!(matches!(forms[0], CoreExpr::Definition(_)));
    assert_eq!(forms[1].to_string(), "((pow 2) 3)");
}

#[test]
fn custom_operator_precedence_is_respected() {
    let forms =
        parse_source("defop 6 Left (a pow b) (a ^ b) (2 pow 3 + 1)").expect("pipeline failed");
    // pow binds tighter than +
    assert_eq!(forms[1].to_string(), "((+ ((pow 2) 3)) 1)");
}

#[test]
fn maximum_precedence_operators_still_parse() {
    let forms =
        parse_source("defop 4294967295 Left (a op b) 1 (2 op 3)").expect("pipeline failed");
    assert_eq!(forms[1].to_string(), "((op 2) 3)");
}

#[test]
fn whole_pipeline_lowers_nested_forms() {
    let forms = parse_source("(map (\\x -> (x * x)) [1, 2])").expect("pipeline failed");
    assert_eq!(forms.len(), 1);
    assert_eq!(
        forms[0].to_string(),
        "((map (\\x -> ((* x) x))) (((:) 1) (((:) 2) [])))"
    );
}

#[test]
fn a_malformed_later_form_fails_the_whole_run() {
    let error = parse_source("def x 5 def y").expect_err("expected a failure");
    let FrontendError::Syntax(error) = error else {
        panic!("expected a syntax error, got {error}");
    };
    assert_eq!(error.kind, SyntaxErrorKind::UnexpectedEnd);
}

#[test]
fn lex_errors_surface_through_the_driver() {
    let error = parse_source("def x @").expect_err("expected a failure");
    assert!(matches!(error, FrontendError::Lex(_)));
}

#[test]
fn errors_carry_the_position_of_the_offending_token() {
    let error = parse_source("(1 + ").expect_err("expected a failure");
    let FrontendError::Syntax(error) = error else {
        panic!("expected a syntax error, got {error}");
    };
    assert_eq!(error.kind, SyntaxErrorKind::UnexpectedEnd);
    assert_eq!(error.span, Span::new(1, 4));
    assert!(error.to_string().starts_with("1:4: syntax error:"));
}
