//! Lookahead tables and runtime selection
//!
//!     A [LookaheadTable] is the artifact the walker leaves on a decision node. Each
//!     [LookaheadEntry] says "if the upcoming tokens look like this, take root N". Roots are
//!     the competing continuations in the order the decision node lists them:
//!
//!         disjunction    root i = i-th alternative
//!         optional       root 0 = take it, root 1 = skip to what follows
//!         repetition     root 0 = iterate again, root 1 = stop
//!
//! Ordering
//!
//!     Entries are stored pre-sorted so that selection can stop at the first match:
//!         1. longer token sequences first (more specific)
//!         2. then longer final token values first (a literal beats a shorter one)
//!         3. then lower roots first (first declared alternative wins)
//!
//! Selection
//!
//!     [select] peeks at the token stream without consuming it. An entry token matches a
//!     peeked token when its value is empty or equal, and its type is the wildcard or equal.

use crate::lookahead::lexing::PeekingLexer;
use crate::lookahead::token::Token;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Tokens that identify one root among its competitors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookaheadEntry {
    pub root: usize,
    pub tokens: Vec<Token>,
}

impl LookaheadEntry {
    pub fn new(root: usize, tokens: Vec<Token>) -> Self {
        LookaheadEntry { root, tokens }
    }

    fn last_value_len(&self) -> usize {
        self.tokens.last().map_or(0, |t| t.value.len())
    }

    /// Priority order used for tables; `Less` means "try first".
    fn priority(&self, other: &Self) -> Ordering {
        other
            .tokens
            .len()
            .cmp(&self.tokens.len())
            .then_with(|| other.last_value_len().cmp(&self.last_value_len()))
            .then_with(|| self.root.cmp(&other.root))
    }

    /// Whether every entry token accepts the token peeked at the same offset.
    pub fn matches<L: PeekingLexer>(&self, lexer: &mut L) -> Result<bool, L::Error> {
        for (depth, expected) in self.tokens.iter().enumerate() {
            let peeked = lexer.peek(depth)?;
            if !expected.accepts(peeked) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for LookaheadEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookahead{{root: {}, tokens: [", self.root)?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        write!(f, "]}}")
    }
}

/// Sorted entries attached to one decision node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookaheadTable {
    entries: Vec<LookaheadEntry>,
}

impl LookaheadTable {
    /// Build a table, sorting entries into selection order. The sort is stable, so entries
    /// equal under every rule keep the order they were given in.
    pub fn new(mut entries: Vec<LookaheadEntry>) -> Self {
        entries.sort_by(LookaheadEntry::priority);
        LookaheadTable { entries }
    }

    pub fn entries(&self) -> &[LookaheadEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LookaheadEntry> {
        self.entries.iter()
    }

    /// Root of the first entry matching the upcoming tokens, or `None` when nothing does.
    pub fn select<L: PeekingLexer>(&self, lexer: &mut L) -> Result<Option<usize>, L::Error> {
        for entry in &self.entries {
            if entry.matches(lexer)? {
                return Ok(Some(entry.root));
            }
        }
        Ok(None)
    }
}

impl<'a> IntoIterator for &'a LookaheadTable {
    type Item = &'a LookaheadEntry;
    type IntoIter = std::slice::Iter<'a, LookaheadEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for LookaheadTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Outcome of selecting at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// No table is attached, so there is nothing to decide here.
    NoDecision,
    /// A table exists but none of its entries matched the input.
    NoMatch,
    /// Take this root.
    Root(usize),
}

impl Selection {
    pub fn root(self) -> Option<usize> {
        match self {
            Selection::Root(root) => Some(root),
            _ => None,
        }
    }

    /// Integer form: `-2` for no decision, `-1` for no match, otherwise the root.
    pub fn to_index(self) -> isize {
        match self {
            Selection::NoDecision => -2,
            Selection::NoMatch => -1,
            Selection::Root(root) => root as isize,
        }
    }
}

/// Pick the alternative to take at a decision point.
///
/// Errors from the token source are returned unchanged; a table with no matching entry is
/// [Selection::NoMatch], not an error.
pub fn select<L: PeekingLexer>(
    table: Option<&LookaheadTable>,
    lexer: &mut L,
) -> Result<Selection, L::Error> {
    let Some(table) = table else {
        return Ok(Selection::NoDecision);
    };
    Ok(match table.select(lexer)? {
        Some(root) => Selection::Root(root),
        None => Selection::NoMatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookahead::lexing::TokenBuffer;
    use crate::lookahead::testing::{lit, reference, tokens};

    #[test]
    fn test_longer_entries_first() {
        let table = LookaheadTable::new(vec![
            LookaheadEntry::new(0, vec![lit(1, "a")]),
            LookaheadEntry::new(1, vec![lit(1, "a"), lit(1, "b")]),
        ]);
        let roots: Vec<_> = table.iter().map(|e| e.root).collect();
        assert_eq!(roots, vec![1, 0]);
    }

    #[test]
    fn test_longer_final_value_first() {
        let table = LookaheadTable::new(vec![
            LookaheadEntry::new(0, vec![lit(1, "+")]),
            LookaheadEntry::new(1, vec![lit(1, "++")]),
            LookaheadEntry::new(2, vec![reference(2)]),
        ]);
        let roots: Vec<_> = table.iter().map(|e| e.root).collect();
        assert_eq!(roots, vec![1, 0, 2]);
    }

    #[test]
    fn test_ties_keep_ascending_roots() {
        let table = LookaheadTable::new(vec![
            LookaheadEntry::new(2, vec![lit(1, "c")]),
            LookaheadEntry::new(0, vec![lit(1, "a")]),
            LookaheadEntry::new(1, vec![lit(1, "b")]),
        ]);
        let roots: Vec<_> = table.iter().map(|e| e.root).collect();
        assert_eq!(roots, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_entries_sort_last() {
        let table = LookaheadTable::new(vec![
            LookaheadEntry::new(0, vec![]),
            LookaheadEntry::new(1, vec![lit(1, "x")]),
        ]);
        assert_eq!(table.entries()[0].root, 1);
        assert_eq!(table.entries()[1].root, 0);
    }

    #[test]
    fn test_select_without_table() {
        let mut lexer = TokenBuffer::new(tokens(&[(1, "a")]));
        assert_eq!(select(None, &mut lexer).unwrap(), Selection::NoDecision);
    }

    #[test]
    fn test_select_no_match() {
        let table = LookaheadTable::new(vec![LookaheadEntry::new(0, vec![lit(1, "a")])]);
        let mut lexer = TokenBuffer::new(tokens(&[(1, "b")]));
        assert_eq!(select(Some(&table), &mut lexer).unwrap(), Selection::NoMatch);
    }

    #[test]
    fn test_select_does_not_consume() {
        let table = LookaheadTable::new(vec![
            LookaheadEntry::new(0, vec![lit(1, "a"), lit(1, "b")]),
            LookaheadEntry::new(1, vec![lit(1, "a"), lit(1, "c")]),
        ]);
        let mut lexer = TokenBuffer::new(tokens(&[(1, "a"), (1, "c")]));
        assert_eq!(select(Some(&table), &mut lexer).unwrap(), Selection::Root(1));
        assert_eq!(lexer.cursor(), 0);
    }

    #[test]
    fn test_entry_past_end_of_input_does_not_match() {
        let table = LookaheadTable::new(vec![
            LookaheadEntry::new(0, vec![lit(1, "a"), lit(1, "b")]),
            LookaheadEntry::new(1, vec![lit(1, "a")]),
        ]);
        let mut lexer = TokenBuffer::new(tokens(&[(1, "a")]));
        assert_eq!(select(Some(&table), &mut lexer).unwrap(), Selection::Root(1));
    }

    #[test]
    fn test_selection_indices() {
        assert_eq!(Selection::NoDecision.to_index(), -2);
        assert_eq!(Selection::NoMatch.to_index(), -1);
        assert_eq!(Selection::Root(3).to_index(), 3);
        assert_eq!(Selection::Root(3).root(), Some(3));
        assert_eq!(Selection::NoMatch.root(), None);
    }

    #[test]
    fn test_entry_display() {
        let entry = LookaheadEntry::new(1, vec![lit(1, "a"), reference(2)]);
        assert_eq!(entry.to_string(), "lookahead{root: 1, tokens: [\"a\":1 <2>]}");
    }
}
