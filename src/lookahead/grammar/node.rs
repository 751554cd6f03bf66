//! Grammar node variants
//!
//!     Nodes reference each other by [NodeId], never by pointer, so grammars can share
//!     sub-graphs and recurse without ownership cycles.
//!
//!     Decision nodes (Disjunction, Optional, Repetition) carry a write-once lookahead cell.
//!     It starts empty and is filled exactly once by the attachment pass.

use crate::lookahead::table::LookaheadTable;
use crate::lookahead::token::{Token, TokenType};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a node inside a [Grammar](super::Grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered alternatives; exactly one is taken.
#[derive(Debug, Clone)]
pub struct Disjunction {
    pub nodes: Vec<NodeId>,
    pub(crate) lookahead: OnceCell<LookaheadTable>,
}

/// One link of a sequence chain. `next` points at the following link.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub node: NodeId,
    pub next: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Capture {
    pub field: String,
    pub node: NodeId,
}

#[derive(Debug, Clone)]
pub struct Struct {
    pub name: String,
    pub expr: NodeId,
}

/// `node` may or may not match; `next` is what follows either way.
#[derive(Debug, Clone)]
pub struct Optional {
    pub node: NodeId,
    pub next: Option<NodeId>,
    pub(crate) lookahead: OnceCell<LookaheadTable>,
}

/// `node` matches zero or more times; `next` is what follows the last iteration.
#[derive(Debug, Clone)]
pub struct Repetition {
    pub node: NodeId,
    pub next: Option<NodeId>,
    pub(crate) lookahead: OnceCell<LookaheadTable>,
}

/// Exact token type and value.
#[derive(Debug, Clone)]
pub struct Literal {
    pub value: String,
    pub token_type: TokenType,
}

impl Literal {
    pub fn token(&self) -> Token {
        Token::new(self.token_type, self.value.clone())
    }
}

/// Any token of a given type.
#[derive(Debug, Clone)]
pub struct Reference {
    pub name: String,
    pub token_type: TokenType,
}

impl Reference {
    pub fn token(&self) -> Token {
        Token::of_type(self.token_type)
    }
}

/// Leaf matched by an external hook. Contributes no lookahead.
#[derive(Debug, Clone)]
pub struct Parseable {
    pub name: String,
}

/// A grammar construct.
#[derive(Debug, Clone)]
pub enum Node {
    Disjunction(Disjunction),
    Sequence(Sequence),
    Capture(Capture),
    Struct(Struct),
    Optional(Optional),
    Repetition(Repetition),
    Literal(Literal),
    Reference(Reference),
    Parseable(Parseable),
}

impl Node {
    pub fn disjunction(nodes: Vec<NodeId>) -> Self {
        Node::Disjunction(Disjunction {
            nodes,
            lookahead: OnceCell::new(),
        })
    }

    pub fn sequence(node: NodeId, next: Option<NodeId>) -> Self {
        Node::Sequence(Sequence { node, next })
    }

    pub fn capture(field: impl Into<String>, node: NodeId) -> Self {
        Node::Capture(Capture {
            field: field.into(),
            node,
        })
    }

    pub fn strct(name: impl Into<String>, expr: NodeId) -> Self {
        Node::Struct(Struct {
            name: name.into(),
            expr,
        })
    }

    pub fn optional(node: NodeId, next: Option<NodeId>) -> Self {
        Node::Optional(Optional {
            node,
            next,
            lookahead: OnceCell::new(),
        })
    }

    pub fn repetition(node: NodeId, next: Option<NodeId>) -> Self {
        Node::Repetition(Repetition {
            node,
            next,
            lookahead: OnceCell::new(),
        })
    }

    pub fn literal(token_type: impl Into<TokenType>, value: impl Into<String>) -> Self {
        Node::Literal(Literal {
            value: value.into(),
            token_type: token_type.into(),
        })
    }

    pub fn reference(name: impl Into<String>, token_type: impl Into<TokenType>) -> Self {
        Node::Reference(Reference {
            name: name.into(),
            token_type: token_type.into(),
        })
    }

    pub fn parseable(name: impl Into<String>) -> Self {
        Node::Parseable(Parseable { name: name.into() })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Disjunction(_) => "disjunction",
            Node::Sequence(_) => "sequence",
            Node::Capture(_) => "capture",
            Node::Struct(_) => "struct",
            Node::Optional(_) => "optional",
            Node::Repetition(_) => "repetition",
            Node::Literal(_) => "literal",
            Node::Reference(_) => "reference",
            Node::Parseable(_) => "parseable",
        }
    }

    /// Whether parsing must choose between continuations at this node.
    pub fn is_decision(&self) -> bool {
        self.lookahead_cell().is_some()
    }

    /// The attached lookahead table, once the attachment pass has run.
    pub fn lookahead(&self) -> Option<&LookaheadTable> {
        self.lookahead_cell().and_then(OnceCell::get)
    }

    pub(crate) fn lookahead_cell(&self) -> Option<&OnceCell<LookaheadTable>> {
        match self {
            Node::Disjunction(n) => Some(&n.lookahead),
            Node::Optional(n) => Some(&n.lookahead),
            Node::Repetition(n) => Some(&n.lookahead),
            _ => None,
        }
    }
}
