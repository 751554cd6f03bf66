//! Lookahead Attachment Pass
//!
//!     Walks a grammar once from its root and attaches a lookahead table to every decision
//!     point it reaches:
//!
//!         disjunction    competing roots are its children, in order
//!         optional       root 0 = its child, root 1 = `next`
//!         repetition     root 0 = its child, root 1 = `next`
//!
//!     Everything else is traversed for the decision points it contains. Grammars can be
//!     cyclic, so each node is visited at most once per run.
//!
//!     The pass is all or nothing: tables are staged while walking and only written to the
//!     grammar once every reachable decision point has resolved. The first decision point
//!     the walker cannot resolve aborts the run with an error naming the construct, leaving
//!     the grammar untouched. Tables are write-once; running the pass again over a compiled
//!     grammar keeps what is there.

use crate::lookahead::error::{GrammarError, GrammarResult};
use crate::lookahead::grammar::{Grammar, Node, NodeId};
use crate::lookahead::table::LookaheadTable;
use crate::lookahead::walker::{build_lookahead_with, Limits};
use std::collections::HashSet;

/// One run of the attachment pass over a grammar.
pub struct LookaheadPass<'g> {
    grammar: &'g Grammar,
    limits: Limits,
    seen: HashSet<NodeId>,
    staged: Vec<(NodeId, LookaheadTable)>,
}

impl<'g> LookaheadPass<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        LookaheadPass {
            grammar,
            limits: Limits::default(),
            seen: HashSet::new(),
            staged: Vec::new(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Attach tables to every decision point reachable from `root`.
    ///
    /// Returns how many tables this run attached.
    pub fn run(mut self, root: NodeId) -> GrammarResult<usize> {
        self.visit(root)?;
        let mut attached = 0;
        for (id, table) in self.staged {
            let cell = self.grammar.get(id).and_then(Node::lookahead_cell);
            if cell.is_some_and(|cell| cell.set(table).is_ok()) {
                attached += 1;
            }
        }
        tracing::debug!(%root, attached, visited = self.seen.len(), "lookahead attached");
        Ok(attached)
    }

    fn visit(&mut self, id: NodeId) -> GrammarResult<()> {
        if !self.seen.insert(id) {
            return Ok(());
        }
        let grammar = self.grammar;
        let node = grammar.get(id).ok_or(GrammarError::UnknownNode(id))?;
        match node {
            Node::Disjunction(n) => {
                self.attach(id, node, n.nodes.iter().copied().map(Some).collect())?;
                for &child in &n.nodes {
                    self.visit(child)?;
                }
            }
            Node::Sequence(n) => {
                self.visit(n.node)?;
                let mut link = n.next;
                while let Some(next) = link {
                    match grammar.get(next) {
                        Some(Node::Sequence(seq)) => {
                            self.visit(seq.node)?;
                            link = seq.next;
                        }
                        _ => {
                            self.visit(next)?;
                            link = None;
                        }
                    }
                }
            }
            Node::Capture(n) => self.visit(n.node)?,
            Node::Struct(n) => self.visit(n.expr)?,
            Node::Optional(n) => {
                self.attach(id, node, vec![Some(n.node), n.next])?;
                self.visit(n.node)?;
                if let Some(next) = n.next {
                    self.visit(next)?;
                }
            }
            Node::Repetition(n) => {
                self.attach(id, node, vec![Some(n.node), n.next])?;
                self.visit(n.node)?;
                if let Some(next) = n.next {
                    self.visit(next)?;
                }
            }
            Node::Literal(_) | Node::Reference(_) | Node::Parseable(_) => {}
        }
        Ok(())
    }

    fn attach(&mut self, id: NodeId, node: &Node, roots: Vec<Option<NodeId>>) -> GrammarResult<()> {
        let Some(cell) = node.lookahead_cell() else {
            return Ok(());
        };
        if cell.get().is_some() {
            return Ok(());
        }
        let table = build_lookahead_with(self.grammar, roots, self.limits).map_err(|source| {
            GrammarError::Lookahead {
                node: id,
                construct: self.grammar.render(id),
                source,
            }
        })?;
        tracing::debug!(node = %id, kind = node.kind(), entries = table.len(), "stage lookahead");
        self.staged.push((id, table));
        Ok(())
    }
}

/// Attach lookahead tables to every decision point reachable from `root`, with default limits.
pub fn apply_lookahead(grammar: &Grammar, root: NodeId) -> GrammarResult<()> {
    LookaheadPass::new(grammar).run(root).map(|_| ())
}
