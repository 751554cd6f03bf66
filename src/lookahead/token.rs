//! Token types shared by grammars, lookahead tables and token sources.
//!
//!     A token is a type tag plus the matched text. Tags are small integers chosen by whoever
//!     defines the lexer; the only tag this crate reserves is [TokenType::EOF].
//!
//!     Inside lookahead entries two values double as wildcards:
//!         - an empty `value` matches any text of the right type
//!         - a `token_type` of [TokenType::EOF] matches any type
//!
//!     The second convention conflates "end of input" with "any type". It is kept because
//!     selection relies on it; use [TokenType::is_wildcard] rather than comparing against
//!     `EOF` directly so that call sites say what they mean.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenType(pub i32);

impl TokenType {
    /// End of input. Also the "any type" wildcard in lookahead entries.
    pub const EOF: TokenType = TokenType(-1);

    pub fn is_eof(self) -> bool {
        self == Self::EOF
    }

    /// Whether this tag matches every token type when used in a lookahead entry.
    pub fn is_wildcard(self) -> bool {
        self == Self::EOF
    }
}

impl From<i32> for TokenType {
    fn from(tag: i32) -> Self {
        TokenType(tag)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "EOF")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A lexed token: type tag and matched text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub value: String,
}

impl Token {
    pub fn new(token_type: impl Into<TokenType>, value: impl Into<String>) -> Self {
        Token {
            token_type: token_type.into(),
            value: value.into(),
        }
    }

    /// A token of the given type with the wildcard (empty) value.
    pub fn of_type(token_type: impl Into<TokenType>) -> Self {
        Token::new(token_type, "")
    }

    pub fn eof() -> Self {
        Token::new(TokenType::EOF, "")
    }

    pub fn is_eof(&self) -> bool {
        self.token_type.is_eof()
    }

    /// Whether `other`, a concrete token from the input, satisfies this lookahead token.
    pub fn accepts(&self, other: &Token) -> bool {
        (self.value.is_empty() || self.value == other.value)
            && (self.token_type.is_wildcard() || self.token_type == other.token_type)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "<{}>", self.token_type)
        } else {
            write!(f, "{:?}:{}", self.value, self.token_type)
        }
    }
}
