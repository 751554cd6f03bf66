//! Property-based tests for lookahead computation
//!
//! These tests check the table shapes the walker produces for families of generated
//! alternatives:
//! - distinct first tokens resolve at depth 1
//! - a shared prefix of length k needs k+1 tokens
//! - identical alternatives fail instead of looping
//! - tables are always in selection order
//! - selecting on an alternative's own tokens picks that alternative

use grammar_lookahead::lookahead::testing::{lit, tokens, IDENT};
use grammar_lookahead::lookahead::TokenBuffer;
use grammar_lookahead::{
    build_lookahead, select, Grammar, LookaheadEntry, LookaheadError, LookaheadTable, NodeId,
    Selection, Token,
};
use proptest::prelude::*;

/// Distinct literal values, one per alternative
fn distinct_values_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,4}", 1..max).prop_map(|set| set.into_iter().collect())
}

/// Shared prefix tokens
fn prefix_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,3}", 0..5)
}

/// Arbitrary lookahead entries, for ordering checks
fn entry_strategy() -> impl Strategy<Value = LookaheadEntry> {
    (
        0usize..6,
        prop::collection::vec(("[a-z+]{0,3}", 1i32..4), 0..4),
    )
        .prop_map(|(root, pairs)| {
            LookaheadEntry::new(
                root,
                pairs.into_iter().map(|(v, t)| Token::new(t, v)).collect(),
            )
        })
}

/// One sequence per alternative: fresh literal nodes for `prefix`, then its own tail.
fn prefixed_alternatives(grammar: &mut Grammar, prefix: &[String], tails: &[String]) -> Vec<NodeId> {
    tails
        .iter()
        .map(|tail| {
            let mut nodes: Vec<NodeId> =
                prefix.iter().map(|v| grammar.literal(IDENT, v.as_str())).collect();
            nodes.push(grammar.literal(IDENT, tail.as_str()));
            grammar.sequence(nodes).expect("non-empty sequence")
        })
        .collect()
}

fn roots(ids: &[NodeId]) -> Vec<Option<NodeId>> {
    ids.iter().copied().map(Some).collect()
}

fn assert_ordered(table: &LookaheadTable) -> Result<(), TestCaseError> {
    for pair in table.entries().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(a.tokens.len() >= b.tokens.len(), "length order: {} before {}", a, b);
        if a.tokens.len() == b.tokens.len() {
            let last = |e: &LookaheadEntry| e.tokens.last().map_or(0, |t| t.value.len());
            prop_assert!(last(a) >= last(b), "final value order: {} before {}", a, b);
            if last(a) == last(b) {
                prop_assert!(a.root <= b.root, "root order: {} before {}", a, b);
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_distinct_first_tokens_resolve_at_depth_one(values in distinct_values_strategy(8)) {
        let mut grammar = Grammar::new();
        let ids: Vec<NodeId> = values.iter().map(|v| grammar.literal(IDENT, v.as_str())).collect();

        let table = build_lookahead(&grammar, roots(&ids)).unwrap();
        prop_assert_eq!(table.len(), values.len());
        prop_assert!(table.iter().all(|e| e.tokens.len() == 1));
    }

    #[test]
    fn test_shared_prefix_needs_one_more_token(
        prefix in prefix_strategy(),
        tails in distinct_values_strategy(5),
    ) {
        prop_assume!(tails.len() >= 2);
        let mut grammar = Grammar::new();
        let ids = prefixed_alternatives(&mut grammar, &prefix, &tails);

        let table = build_lookahead(&grammar, roots(&ids)).unwrap();
        prop_assert_eq!(table.len(), tails.len());
        for entry in &table {
            prop_assert!(entry.tokens.len() > prefix.len());
        }
    }

    #[test]
    fn test_identical_alternatives_fail(
        body in prop::collection::vec("[a-z]{1,3}", 1..5),
        copies in 2usize..4,
    ) {
        let mut grammar = Grammar::new();
        let tails = vec![body[body.len() - 1].clone(); copies];
        let ids = prefixed_alternatives(&mut grammar, &body[..body.len() - 1], &tails);

        let err = build_lookahead(&grammar, roots(&ids)).unwrap_err();
        prop_assert_eq!(err, LookaheadError::Ambiguous { depth: body.len() });
    }

    #[test]
    fn test_tables_are_in_selection_order(entries in prop::collection::vec(entry_strategy(), 0..10)) {
        let table = LookaheadTable::new(entries.clone());
        prop_assert_eq!(table.len(), entries.len());
        assert_ordered(&table)?;
    }

    #[test]
    fn test_selection_picks_matching_alternative(
        prefix in prefix_strategy(),
        tails in distinct_values_strategy(5),
    ) {
        let mut grammar = Grammar::new();
        let ids = prefixed_alternatives(&mut grammar, &prefix, &tails);
        let table = build_lookahead(&grammar, roots(&ids)).unwrap();
        assert_ordered(&table)?;

        for (root, tail) in tails.iter().enumerate() {
            let mut input: Vec<Token> = prefix.iter().map(|v| lit(IDENT, v)).collect();
            input.push(lit(IDENT, tail));
            input.extend(tokens(&[(IDENT, "trailing")]));
            let mut lexer = TokenBuffer::new(input);
            prop_assert_eq!(select(Some(&table), &mut lexer).unwrap(), Selection::Root(root));
            prop_assert_eq!(lexer.cursor(), 0);
        }
    }
}
