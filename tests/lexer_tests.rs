use aster::lexer::{tokenize, Span, TokenKind};

#[test]
fn spans_are_line_then_column_one_based() {
    let tokens = tokenize("def x\n  5").expect("lexing failed");
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![Span::new(1, 1), Span::new(1, 5), Span::new(2, 3)]
    );
}

#[test]
fn longest_operator_wins() {
    let tokens = tokenize(">>= >> >= >").expect("lexing failed");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec![">>=", ">>", ">=", ">"]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Operator));
}

#[test]
fn keywords_are_not_identifier_prefixes() {
    let tokens = tokenize("def definition then thenx").expect("lexing failed");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Def,
            TokenKind::Identifier,
            TokenKind::Then,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn constructors_and_identifiers_split_on_case() {
    let tokens = tokenize("map Maybe x'").expect("lexing failed");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Constructor,
            TokenKind::Identifier,
        ]
    );
    assert_eq!(tokens[2].text, "x'");
}

#[test]
fn numbers_split_into_floats_and_integers() {
    let tokens = tokenize("3.14 42").expect("lexing failed");
    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].text, "3.14");
    assert_eq!(tokens[1].kind, TokenKind::Integer);
    assert_eq!(tokens[1].text, "42");
}

#[test]
fn strings_are_unescaped() {
    let tokens = tokenize(r#""a\nb \"quoted\"""#).expect("lexing failed");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "a\nb \"quoted\"");
}

#[test]
fn arrow_is_not_two_operators() {
    let tokens = tokenize("->").expect("lexing failed");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Arrow);

    let tokens = tokenize("- >").expect("lexing failed");
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Operator));
}

#[test]
fn unknown_character_reports_its_position() {
    let error = tokenize("def @").expect_err("expected a lex error");
    assert_eq!(error.found, '@');
    assert_eq!(error.span, Span::new(1, 5));
}
