pub mod err;

pub mod eval_err;

pub mod token_err;

pub use err::{Error, Expected, InvalidExpressionError};
pub use eval_err::{ArithmeticError, EvalError, UnknownAlgorithm};
pub use token_err::{InvalidTokenError, InvalidTokenReason};
