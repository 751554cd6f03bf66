//! Peeking token sources
//!
//!     Selection never consumes input: it only needs to look at the token `offset` positions
//!     ahead of the parser. [PeekingLexer] is that contract. Implementations must:
//!         - return the same token for repeated peeks at the same offset (until something is
//!           consumed)
//!         - return an end-of-input token, not an error, when peeking past the input
//!
//!     Two implementations are provided:
//!         - [TokenBuffer]: tokens already in memory, infallible
//!         - [LogosLexer]: lazily pulls from any logos token enum, buffering what it peeks

use crate::lookahead::token::{Token, TokenType};
use logos::Logos;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::ops::Range;

/// Non-consuming lookahead over a token stream.
pub trait PeekingLexer {
    type Error: std::error::Error;

    /// Token `offset` positions past the current one; offset 0 is the next unconsumed token.
    fn peek(&mut self, offset: usize) -> Result<&Token, Self::Error>;
}

impl<L: PeekingLexer + ?Sized> PeekingLexer for &mut L {
    type Error = L::Error;

    fn peek(&mut self, offset: usize) -> Result<&Token, Self::Error> {
        (**self).peek(offset)
    }
}

/// In-memory token source with a consume cursor.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    cursor: usize,
    eof: Token,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenBuffer {
            tokens,
            cursor: 0,
            eof: Token::eof(),
        }
    }

    /// Number of tokens consumed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.cursor.min(self.tokens.len())..]
    }

    /// Consume the next token. Past the end this keeps returning end of input.
    pub fn next(&mut self) -> Token {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                token.clone()
            }
            None => self.eof.clone(),
        }
    }
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        TokenBuffer::new(tokens)
    }
}

impl PeekingLexer for TokenBuffer {
    type Error = Infallible;

    fn peek(&mut self, offset: usize) -> Result<&Token, Self::Error> {
        Ok(self
            .cursor
            .checked_add(offset)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&self.eof))
    }
}

/// Maps a logos token variant onto the crate's token type tags.
pub trait TokenTag {
    fn token_type(&self) -> TokenType;
}

/// Input the logos lexer could not tokenize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected input {text:?} at {}..{}", span.start, span.end)]
pub struct LexError {
    pub span: Range<usize>,
    pub text: String,
}

/// Lazily buffering token source over a logos lexer.
///
/// Tokens are produced on demand as peeks reach further ahead. A lexing failure is
/// remembered, so peeking at or past the failing position keeps returning the same error.
pub struct LogosLexer<'source, T: Logos<'source>> {
    inner: logos::Lexer<'source, T>,
    buffer: VecDeque<Token>,
    failure: Option<LexError>,
    exhausted: bool,
    consumed: usize,
    eof: Token,
}

impl<'source, T> LogosLexer<'source, T>
where
    T: Logos<'source, Source = str> + TokenTag,
    T::Extras: Default,
{
    pub fn new(source: &'source str) -> Self {
        LogosLexer {
            inner: T::lexer(source),
            buffer: VecDeque::new(),
            failure: None,
            exhausted: false,
            consumed: 0,
            eof: Token::eof(),
        }
    }

    /// Number of tokens consumed so far.
    pub fn cursor(&self) -> usize {
        self.consumed
    }

    /// Consume the next token.
    pub fn next(&mut self) -> Result<Token, LexError> {
        self.fill(1)?;
        match self.buffer.pop_front() {
            Some(token) => {
                self.consumed += 1;
                Ok(token)
            }
            None => Ok(self.eof.clone()),
        }
    }

    fn fill(&mut self, len: usize) -> Result<(), LexError> {
        while self.buffer.len() < len {
            if let Some(failure) = &self.failure {
                return Err(failure.clone());
            }
            if self.exhausted {
                return Ok(());
            }
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let token = Token::new(kind.token_type(), self.inner.slice());
                    self.buffer.push_back(token);
                }
                Some(Err(_)) => {
                    let failure = LexError {
                        span: self.inner.span(),
                        text: self.inner.slice().to_string(),
                    };
                    tracing::debug!(%failure, "token source failed");
                    self.failure = Some(failure);
                }
                None => self.exhausted = true,
            }
        }
        Ok(())
    }
}

impl<'source, T> PeekingLexer for LogosLexer<'source, T>
where
    T: Logos<'source, Source = str> + TokenTag,
    T::Extras: Default,
{
    type Error = LexError;

    fn peek(&mut self, offset: usize) -> Result<&Token, Self::Error> {
        self.fill(offset.saturating_add(1))?;
        Ok(self.buffer.get(offset).unwrap_or(&self.eof))
    }
}
