//! JSON report of the lookahead tables attached to a grammar
//!
//!     Useful when a grammar compiles but selects an unexpected branch: the report shows,
//!     per decision point, which token sequences lead to which root.
//!
//!     [
//!       {
//!         "node": 3,
//!         "kind": "disjunction",
//!         "construct": "\"+\" | \"++\"",
//!         "entries": [{"root": 1, "tokens": [{"type": 4, "value": "++"}]}, ...]
//!       }
//!     ]

use crate::lookahead::grammar::{Grammar, NodeId};
use crate::lookahead::table::LookaheadTable;
use serde::Serialize;

/// One decision point with its attached table.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionReport<'g> {
    pub node: NodeId,
    pub kind: &'static str,
    pub construct: String,
    pub entries: &'g LookaheadTable,
}

/// Every decision point that has a table, in node order.
pub fn decisions(grammar: &Grammar) -> Vec<DecisionReport<'_>> {
    grammar
        .ids()
        .filter_map(|id| {
            let node = grammar.get(id)?;
            let table = node.lookahead()?;
            Some(DecisionReport {
                node: id,
                kind: node.kind(),
                construct: grammar.render(id),
                entries: table,
            })
        })
        .collect()
}

/// Render [decisions] as a JSON value.
pub fn lookahead_report(grammar: &Grammar) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(decisions(grammar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookahead::attach::apply_lookahead;
    use serde_json::json;

    #[test]
    fn test_report_lists_attached_tables() {
        let mut grammar = Grammar::new();
        let plus = grammar.literal(3, "+");
        let incr = grammar.literal(4, "++");
        let alt = grammar.disjunction([plus, incr]);
        apply_lookahead(&grammar, alt).unwrap();

        assert_eq!(
            lookahead_report(&grammar).unwrap(),
            json!([
                {
                    "node": 2,
                    "kind": "disjunction",
                    "construct": "\"+\" | \"++\"",
                    "entries": [
                        {"root": 1, "tokens": [{"type": 4, "value": "++"}]},
                        {"root": 0, "tokens": [{"type": 3, "value": "+"}]}
                    ]
                }
            ])
        );
    }

    #[test]
    fn test_report_skips_uncompiled_grammar() {
        let mut grammar = Grammar::new();
        let a = grammar.literal(1, "a");
        grammar.optional(a, None);
        assert_eq!(lookahead_report(&grammar).unwrap(), json!([]));
    }
}
