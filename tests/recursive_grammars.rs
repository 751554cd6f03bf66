//! Lookahead over recursive grammars
//!
//! Recursion through structs, optionals and repetitions must always terminate, either
//! with tables or with an ambiguity error.

use grammar_lookahead::lookahead::report::lookahead_report;
use grammar_lookahead::lookahead::testing::{IDENT, LPAREN, NUMBER, RPAREN};
use grammar_lookahead::lookahead::{build_lookahead_with, Limits, LookaheadPass};
use grammar_lookahead::{apply_lookahead, Grammar, GrammarError, LookaheadError, Node};

#[test]
fn test_left_recursive_repetition_terminates() {
    // List = { [ List ] } ";"
    let mut grammar = Grammar::new();
    let end = grammar.literal(IDENT, ";");
    let list = grammar.reserve();
    let maybe = grammar.optional(list, Some(end));
    grammar
        .define(list, Node::repetition(maybe, Some(end)))
        .unwrap();

    let err = apply_lookahead(&grammar, list).unwrap_err();
    assert!(
        matches!(
            err,
            GrammarError::Lookahead {
                source: LookaheadError::Ambiguous { .. },
                ..
            }
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn test_nested_parentheses_compile() {
    // Expr = <number> | "(" Expr ")"
    let mut grammar = Grammar::new();
    let expr = grammar.reserve();
    let number = grammar.reference("number", NUMBER);
    let lparen = grammar.literal(LPAREN, "(");
    let rparen = grammar.literal(RPAREN, ")");
    let group = grammar.sequence([lparen, expr, rparen]).unwrap();
    let alt = grammar.disjunction([number, group]);
    grammar.define(expr, Node::strct("Expr", alt)).unwrap();

    assert_eq!(LookaheadPass::new(&grammar).run(expr).unwrap(), 1);
    insta::assert_snapshot!(grammar.render(alt), @r#"<number> | "(" Expr ")""#);
}

#[test]
fn test_tight_visit_cap_still_terminates() {
    // Items = { Item } with Item = "(" Items ")" | <ident>
    let mut grammar = Grammar::new();
    let items = grammar.reserve();
    let ident = grammar.reference("ident", IDENT);
    let lparen = grammar.literal(LPAREN, "(");
    let rparen = grammar.literal(RPAREN, ")");
    let nested = grammar.sequence([lparen, items, rparen]).unwrap();
    let item = grammar.disjunction([nested, ident]);
    grammar.define(items, Node::repetition(item, None)).unwrap();

    let limits = Limits { depth: 4, visits: 2 };
    let table = build_lookahead_with(&grammar, [Some(item), Some(rparen)], limits).unwrap();
    assert!(!table.is_empty());

    LookaheadPass::new(&grammar).with_limits(limits).run(items).unwrap();
    assert!(grammar.lookahead(items).is_some());
    assert!(grammar.lookahead(item).is_some());
}

#[test]
fn test_report_covers_recursive_grammar() {
    let mut grammar = Grammar::new();
    let expr = grammar.reserve();
    let number = grammar.reference("number", NUMBER);
    let lparen = grammar.literal(LPAREN, "(");
    let rparen = grammar.literal(RPAREN, ")");
    let group = grammar.sequence([lparen, expr, rparen]).unwrap();
    let alt = grammar.disjunction([number, group]);
    grammar.define(expr, Node::strct("Expr", alt)).unwrap();
    apply_lookahead(&grammar, expr).unwrap();

    let report = lookahead_report(&grammar).unwrap();
    let decisions = report.as_array().unwrap();
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0]["kind"], "disjunction");
    assert_eq!(decisions[0]["entries"].as_array().unwrap().len(), 2);
}
