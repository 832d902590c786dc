use crate::errors::token_err::InvalidTokenError;
use thiserror::Error;

/// A token sequence that does not form a well-formed expression.
///
/// `position` is the index of the offending token, or the length of the
/// sequence when the input ended too early.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error} at token {position}")]
pub struct InvalidExpressionError {
    pub expected: Option<Expected>,
    pub error: Error,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("unexpected token `{0}`")]
    UnexpectedTok(String),
    #[error("unexpected end of expression")]
    UnexpectedEOF,
    #[error("unclosed parenthesis")]
    UnclosedParen,
    #[error("closing parenthesis without a matching opening one")]
    UnopenedParen,
    #[error(transparent)]
    InvalidToken(#[from] InvalidTokenError),
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Named(&'static str),
}

impl InvalidExpressionError {
    pub fn new(error: Error, position: usize) -> Self {
        Self {
            expected: None,
            error,
            position,
        }
    }

    pub fn expected(mut self, expected: &'static str) -> Self {
        self.expected = Some(Expected::Named(expected));
        self
    }
}
