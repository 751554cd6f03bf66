//! Test helpers
//!
//!     Factories for tokens and a small logos token set, shared by unit tests and the
//!     integration tests under `tests/`.
//!
//!     Token type tags used by [CalcToken]:
//!         1 ident, 2 number, 3 "+", 4 "++", 5 "(", 6 ")", 7 ","

use crate::lookahead::lexing::TokenTag;
use crate::lookahead::token::{Token, TokenType};
use logos::Logos;

pub const IDENT: i32 = 1;
pub const NUMBER: i32 = 2;
pub const PLUS: i32 = 3;
pub const INCREMENT: i32 = 4;
pub const LPAREN: i32 = 5;
pub const RPAREN: i32 = 6;
pub const COMMA: i32 = 7;

/// Exact token.
pub fn lit(token_type: i32, value: &str) -> Token {
    Token::new(token_type, value)
}

/// Any-value token of a type.
pub fn reference(token_type: i32) -> Token {
    Token::of_type(token_type)
}

pub fn tokens(pairs: &[(i32, &str)]) -> Vec<Token> {
    pairs.iter().map(|(t, v)| lit(*t, v)).collect()
}

/// A tiny expression token set for exercising [LogosLexer](super::lexing::LogosLexer).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum CalcToken {
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex("[0-9]+")]
    Number,
    #[token("+")]
    Plus,
    #[token("++")]
    Increment,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
}

impl TokenTag for CalcToken {
    fn token_type(&self) -> TokenType {
        TokenType(match self {
            CalcToken::Ident => IDENT,
            CalcToken::Number => NUMBER,
            CalcToken::Plus => PLUS,
            CalcToken::Increment => INCREMENT,
            CalcToken::LParen => LPAREN,
            CalcToken::RParen => RPAREN,
            CalcToken::Comma => COMMA,
        })
    }
}
