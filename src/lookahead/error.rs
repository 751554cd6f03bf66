//! Error types for lookahead construction and grammar building

use crate::lookahead::grammar::NodeId;

/// Errors raised by the lookahead walker for a single decision point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookaheadError {
    /// Competing alternatives still share a token sequence after the walker gave up,
    /// either because the depth limit ran out or because no cursor could advance.
    #[error("could not disambiguate after {depth} tokens of lookahead")]
    Ambiguous {
        /// Length of the longest token sequence still shared between cursors when the
        /// walker stopped, not the number of rounds it stepped.
        depth: usize,
    },

    /// The walker reached a node id with no definition in the grammar. This is a
    /// construction bug (a reserved slot never defined, or an id from another grammar).
    #[error("unsupported grammar node {node}")]
    UnsupportedNode { node: NodeId },
}

/// Errors raised while building a grammar or compiling its lookahead tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// A decision point could not be disambiguated. `construct` is the node's rendering.
    #[error("{source}: {construct}")]
    Lookahead {
        node: NodeId,
        construct: String,
        #[source]
        source: LookaheadError,
    },

    #[error("node {0} is already defined")]
    AlreadyDefined(NodeId),

    #[error("node {0} does not belong to this grammar")]
    UnknownNode(NodeId),

    #[error("a sequence needs at least one node")]
    EmptySequence,
}

impl GrammarError {
    /// Tokens of lookahead attempted before giving up, for lookahead failures.
    pub fn depth(&self) -> Option<usize> {
        match self {
            GrammarError::Lookahead {
                source: LookaheadError::Ambiguous { depth },
                ..
            } => Some(*depth),
            _ => None,
        }
    }

    /// The node the error is about, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            GrammarError::Lookahead { node, .. } => Some(*node),
            GrammarError::AlreadyDefined(node) | GrammarError::UnknownNode(node) => Some(*node),
            GrammarError::EmptySequence => None,
        }
    }
}

/// Type alias for grammar results
pub type GrammarResult<T> = Result<T, GrammarError>;
