//! # grammar-lookahead
//!
//! Computes the minimal token lookahead a recursive descent parser needs to pick between
//! competing alternatives of a grammar graph without backtracking, and selects the right
//! alternative at parse time.
//!
//! File Layout
//!
//!     src/lookahead
//!       ├── token       Token type tags and token values
//!       ├── error       Build-time errors
//!       ├── grammar     The node arena the rest of the crate walks
//!       ├── walker      Cursor-based lookahead expansion
//!       ├── attach      One-time pass attaching tables to decision nodes
//!       ├── table       Lookahead tables and runtime selection
//!       ├── lexing      Peeking token sources (in-memory and logos backed)
//!       └── report      JSON dump of attached tables
//!
//! For test helpers, see the [testing module](lookahead::testing).

pub mod lookahead;

pub use lookahead::{
    apply_lookahead, build_lookahead, select, Grammar, GrammarError, LookaheadEntry,
    LookaheadError, LookaheadPass, LookaheadTable, Node, NodeId, PeekingLexer, Selection, Token,
    TokenType,
};
