//! Grammar node arena
//!
//!     A [Grammar] owns every node; nodes point at each other through [NodeId]s. Identity
//!     is the id, so two structurally equal literals added twice are two distinct nodes, and
//!     "have I been here before" questions are answered with id-keyed sets and maps.
//!
//!     Recursive grammars need a node to exist before its definition is known. Use
//!     [Grammar::reserve] to hand out an id and [Grammar::define] to fill it later:
//!
//!         let expr = grammar.reserve();
//!         let group = grammar.sequence([lparen, expr, rparen])?;
//!         let alt = grammar.disjunction([number, group]);
//!         grammar.define(expr, Node::strct("Expr", alt))?;
//!
//!     The arena is only mutated while it is being built. After that, the one write the
//!     crate performs is filling each decision node's lookahead cell.

mod node;
mod render;

pub use node::{
    Capture, Disjunction, Literal, Node, NodeId, Optional, Parseable, Reference, Repetition,
    Sequence, Struct,
};

use crate::lookahead::error::{GrammarError, GrammarResult, LookaheadError};
use crate::lookahead::table::LookaheadTable;
use crate::lookahead::token::TokenType;

/// Arena of grammar nodes.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    nodes: Vec<Option<Node>>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar { nodes: Vec::new() }
    }

    /// Number of slots, defined or reserved.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId::from_index(self.nodes.len() - 1)
    }

    /// Allocate an id whose node is supplied later with [Grammar::define].
    pub fn reserve(&mut self) -> NodeId {
        self.nodes.push(None);
        NodeId::from_index(self.nodes.len() - 1)
    }

    pub fn define(&mut self, id: NodeId, node: Node) -> GrammarResult<()> {
        match self.nodes.get_mut(id.index()) {
            None => Err(GrammarError::UnknownNode(id)),
            Some(Some(_)) => Err(GrammarError::AlreadyDefined(id)),
            Some(slot) => {
                *slot = Some(node);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Like [Grammar::get], for callers that treat a missing node as a contract violation.
    pub(crate) fn resolve(&self, id: NodeId) -> Result<&Node, LookaheadError> {
        self.get(id)
            .ok_or(LookaheadError::UnsupportedNode { node: id })
    }

    /// The lookahead table attached to a decision node, if any.
    pub fn lookahead(&self, id: NodeId) -> Option<&LookaheadTable> {
        self.get(id).and_then(Node::lookahead)
    }

    /// Ids of every defined node, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeId::from_index(index))
    }

    pub fn literal(&mut self, token_type: impl Into<TokenType>, value: impl Into<String>) -> NodeId {
        self.add(Node::literal(token_type, value))
    }

    pub fn reference(&mut self, name: impl Into<String>, token_type: impl Into<TokenType>) -> NodeId {
        self.add(Node::reference(name, token_type))
    }

    pub fn parseable(&mut self, name: impl Into<String>) -> NodeId {
        self.add(Node::parseable(name))
    }

    pub fn capture(&mut self, field: impl Into<String>, node: NodeId) -> NodeId {
        self.add(Node::capture(field, node))
    }

    pub fn strct(&mut self, name: impl Into<String>, expr: NodeId) -> NodeId {
        self.add(Node::strct(name, expr))
    }

    pub fn disjunction(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.add(Node::disjunction(nodes.into_iter().collect()))
    }

    pub fn optional(&mut self, node: NodeId, next: Option<NodeId>) -> NodeId {
        self.add(Node::optional(node, next))
    }

    pub fn repetition(&mut self, node: NodeId, next: Option<NodeId>) -> NodeId {
        self.add(Node::repetition(node, next))
    }

    /// Build a sequence chain over `nodes` and return its first link.
    pub fn sequence(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> GrammarResult<NodeId> {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        let mut next = None;
        for node in nodes.into_iter().rev() {
            next = Some(self.add(Node::sequence(node, next)));
        }
        next.ok_or(GrammarError::EmptySequence)
    }
}
