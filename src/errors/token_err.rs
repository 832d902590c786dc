use thiserror::Error;

/// A token that is not a number, an operator or a parenthesis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid token `{token}`: {reason}")]
pub struct InvalidTokenError {
    pub token: String,
    pub reason: InvalidTokenReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTokenReason {
    #[error("missing token")]
    Empty,
    #[error("malformed number")]
    MalformedNumber,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

impl InvalidTokenError {
    pub fn new(token: &str, reason: InvalidTokenReason) -> Self {
        Self {
            token: token.to_owned(),
            reason,
        }
    }
}
