//! Lookahead Walker
//!
//!     Given N competing start nodes (roots 0..N-1), the walker simulates all of them in
//!     lock-step, one token at a time, until every simulated path has a token sequence no
//!     other path shares. Those sequences become the lookahead table.
//!
//! Cursors
//!
//!     A cursor is one candidate path: the root it belongs to, the tokens it has produced so
//!     far, and the branch it resumes from. Stepping a cursor expands pass-through structure
//!     until it yields exactly one token or forks:
//!
//!         disjunction    fork one cursor per child, retire the original
//!         sequence       step the head, then resume from the next link
//!         capture        step the wrapped node
//!         struct         step the wrapped expression
//!         optional       step the child, then resume from `next` if there is one
//!         repetition     fork a cursor into the child and one into `next`, retire the original
//!         literal        append (type, value), clear the branch
//!         reference      append (type, ""), clear the branch
//!         parseable      nothing observable, clear the branch
//!
//!     A cleared branch means the cursor has finished and cannot be stepped again.
//!
//! Rounds
//!
//!     Each round groups live cursors by token sequence. Groups with a single member are
//!     resolved. Every member of a shared group is stepped one more token. The walk stops
//!     with a table once nothing is shared, or fails when the round limit runs out or no
//!     shared cursor can move.
//!
//! Termination
//!
//!     Grammars may be recursive and repetitions may loop without consuming anything. Each
//!     node keeps a visit count across the whole walk; once it exceeds [Limits::visits],
//!     stepping into that node does nothing. This is a heuristic bound, not a statement about
//!     grammar correctness: raising it lets deeper recursion be explored at higher cost.

use crate::lookahead::error::LookaheadError;
use crate::lookahead::grammar::{Grammar, Node, NodeId};
use crate::lookahead::table::{LookaheadEntry, LookaheadTable};
use crate::lookahead::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Default cap on lookahead rounds.
pub const LOOKAHEAD_LIMIT: usize = 32;
/// Default cap on visits to any single node during one walk.
pub const VISIT_CAP: usize = 32;

/// Work bounds for one walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum number of lookahead rounds.
    pub depth: usize,
    /// Maximum visits to a single node before stepping into it becomes a no-op.
    pub visits: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            depth: LOOKAHEAD_LIMIT,
            visits: VISIT_CAP,
        }
    }
}

#[derive(Debug, Clone)]
struct Cursor {
    root: usize,
    tokens: Vec<Token>,
    /// Node to resume from; `None` once the cursor has finished.
    branch: Option<NodeId>,
    retired: bool,
}

struct Walker<'g> {
    grammar: &'g Grammar,
    limits: Limits,
    seen: HashMap<NodeId, usize>,
    cursors: Vec<Cursor>,
}

impl<'g> Walker<'g> {
    fn new(grammar: &'g Grammar, limits: Limits) -> Self {
        Walker {
            grammar,
            limits,
            seen: HashMap::new(),
            cursors: Vec::new(),
        }
    }

    fn live(&self) -> impl Iterator<Item = (usize, &Cursor)> + '_ {
        self.cursors
            .iter()
            .enumerate()
            .filter(|(_, cursor)| !cursor.retired)
    }

    /// Start a cursor at `node` and step it once.
    fn push(&mut self, root: usize, node: NodeId, tokens: Vec<Token>) -> Result<(), LookaheadError> {
        let id = self.cursors.len();
        self.cursors.push(Cursor {
            root,
            tokens,
            branch: Some(node),
            retired: false,
        });
        self.step(node, id)?;
        Ok(())
    }

    /// Advance `cursor` through `node`. Returns whether a step happened.
    fn step(&mut self, node: NodeId, cursor: usize) -> Result<bool, LookaheadError> {
        let visits = {
            let count = self.seen.entry(node).or_insert(0);
            *count += 1;
            *count
        };
        if self.cursors[cursor].branch.is_none() {
            return Ok(false);
        }
        if visits > self.limits.visits {
            if visits == self.limits.visits + 1 {
                tracing::warn!(%node, cap = self.limits.visits, "node visit cap reached");
            }
            return Ok(false);
        }

        let grammar = self.grammar;
        match grammar.resolve(node)? {
            Node::Disjunction(n) => {
                let Cursor { root, tokens, .. } = self.cursors[cursor].clone();
                tracing::trace!(%node, root, forks = n.nodes.len(), "fork disjunction");
                for &child in &n.nodes {
                    self.push(root, child, tokens.clone())?;
                }
                self.cursors[cursor].retired = true;
            }
            Node::Sequence(n) => {
                self.step(n.node, cursor)?;
                self.cursors[cursor].branch = n.next;
            }
            Node::Capture(n) => {
                self.step(n.node, cursor)?;
            }
            Node::Struct(n) => {
                self.step(n.expr, cursor)?;
            }
            Node::Optional(n) => {
                self.step(n.node, cursor)?;
                if let Some(next) = n.next {
                    self.cursors[cursor].branch = Some(next);
                }
            }
            Node::Repetition(n) => {
                let Cursor { root, tokens, .. } = self.cursors[cursor].clone();
                tracing::trace!(%node, root, "fork repetition");
                self.push(root, n.node, tokens.clone())?;
                if let Some(next) = n.next {
                    self.push(root, next, tokens)?;
                }
                self.cursors[cursor].retired = true;
            }
            Node::Parseable(_) => {
                self.cursors[cursor].branch = None;
                return Ok(false);
            }
            Node::Literal(n) => {
                let current = &mut self.cursors[cursor];
                current.tokens.push(n.token());
                current.branch = None;
            }
            Node::Reference(n) => {
                let current = &mut self.cursors[cursor];
                current.tokens.push(n.token());
                current.branch = None;
            }
        }
        Ok(true)
    }

    /// Live cursors grouped by identical token sequences, keeping only shared groups.
    ///
    /// Groups come out in order of their first member, so stepping is deterministic.
    fn ambiguous(&self) -> Vec<Vec<usize>> {
        let mut index: HashMap<&[Token], usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (id, cursor) in self.live() {
            match index.entry(cursor.tokens.as_slice()) {
                Entry::Occupied(slot) => groups[*slot.get()].push(id),
                Entry::Vacant(slot) => {
                    slot.insert(groups.len());
                    groups.push(vec![id]);
                }
            }
        }
        groups.retain(|group| group.len() > 1);
        groups
    }

    fn collect(&self) -> LookaheadTable {
        LookaheadTable::new(
            self.live()
                .map(|(_, cursor)| LookaheadEntry::new(cursor.root, cursor.tokens.clone()))
                .collect(),
        )
    }

    fn failure(&self, ambiguous: &[Vec<usize>]) -> LookaheadError {
        let depth = ambiguous
            .iter()
            .flatten()
            .map(|&id| self.cursors[id].tokens.len())
            .max()
            .unwrap_or(0);
        LookaheadError::Ambiguous { depth }
    }
}

/// Compute the lookahead table distinguishing `roots` with the default [Limits].
///
/// Absent roots (an optional or repetition with nothing after it) keep their index but
/// produce no entries.
pub fn build_lookahead(
    grammar: &Grammar,
    roots: impl IntoIterator<Item = Option<NodeId>>,
) -> Result<LookaheadTable, LookaheadError> {
    build_lookahead_with(grammar, roots, Limits::default())
}

/// Compute the lookahead table distinguishing `roots` within `limits`.
pub fn build_lookahead_with(
    grammar: &Grammar,
    roots: impl IntoIterator<Item = Option<NodeId>>,
    limits: Limits,
) -> Result<LookaheadTable, LookaheadError> {
    let mut walker = Walker::new(grammar, limits);
    for (root, node) in roots.into_iter().enumerate() {
        if let Some(node) = node {
            walker.push(root, node, Vec::new())?;
        }
    }

    let mut rounds = 0;
    loop {
        let ambiguous = walker.ambiguous();
        if ambiguous.is_empty() {
            let table = walker.collect();
            tracing::debug!(rounds, entries = table.len(), "lookahead resolved");
            return Ok(table);
        }
        if rounds == limits.depth {
            let err = walker.failure(&ambiguous);
            tracing::debug!(rounds, %err, "lookahead depth limit reached");
            return Err(err);
        }

        let mut stepped = false;
        for group in &ambiguous {
            for &cursor in group {
                if let Some(branch) = walker.cursors[cursor].branch {
                    if walker.step(branch, cursor)? {
                        stepped = true;
                    }
                }
            }
        }
        if !stepped {
            let err = walker.failure(&ambiguous);
            tracing::debug!(rounds, %err, "lookahead expansion stalled");
            return Err(err);
        }
        rounds += 1;
    }
}
