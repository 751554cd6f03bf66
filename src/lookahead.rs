//! Lookahead computation for grammar graphs
//!
//!     A grammar is an arena of nodes (see [grammar]). Three node kinds are decision points:
//!     disjunctions (which branch?), optionals (take or skip?) and repetitions (iterate or
//!     stop?). Before any parsing happens, the [attach] pass visits every decision point once
//!     and asks the [walker] for the shortest token sequences that tell the competing
//!     continuations apart. The result is a [table::LookaheadTable] stored on the node.
//!
//!     At parse time, [table::select] peeks at upcoming tokens from a [lexing::PeekingLexer]
//!     and returns the alternative to take.
//!
//! Bounds
//!
//!     Lookahead depth and per-node revisits are capped (see [walker::Limits]). Grammars
//!     that stay ambiguous beyond those caps are rejected when tables are built, never at
//!     parse time.

pub mod attach;
pub mod error;
pub mod grammar;
pub mod lexing;
pub mod report;
pub mod table;
pub mod testing;
pub mod token;
pub mod walker;

pub use attach::{apply_lookahead, LookaheadPass};
pub use error::{GrammarError, GrammarResult, LookaheadError};
pub use grammar::{Grammar, Node, NodeId};
pub use lexing::{LexError, LogosLexer, PeekingLexer, TokenBuffer, TokenTag};
pub use table::{select, LookaheadEntry, LookaheadTable, Selection};
pub use token::{Token, TokenType};
pub use walker::{build_lookahead, build_lookahead_with, Limits};
