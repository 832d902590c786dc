//! Evaluation of infix arithmetic expressions.
//!
//! ```
//! assert_eq!(infix_calc::calc("2+2"), Ok(4.0));
//! assert_eq!(infix_calc::calc("2^2^3"), Ok(256.0));
//! ```
//!
//! Text goes through [`tokenize`], then an [`Evaluator`] computes the value
//! while checking the grammar. [`recognize`] checks the grammar alone.

pub mod errors;
pub mod syntax;

pub use errors::*;
pub use syntax::{
    evaluate, recognize, tokenize, validate_token, Algorithm, Evaluator, Operator,
    PrecedenceClimbing, ShuntingYard,
};

use tracing::debug;

/// Tokenizes and evaluates `text` with the default algorithm.
pub fn calc(text: &str) -> Result<f64, EvalError> {
    calc_with(text, Algorithm::default())
}

/// Tokenizes and evaluates `text` with `algorithm`. Quote characters are
/// dropped first so shell-quoted input works as is.
pub fn calc_with(text: &str, algorithm: Algorithm) -> Result<f64, EvalError> {
    let text = text.replace(&['\'', '"'][..], "");
    let tokens = tokenize(&text);
    debug!(%algorithm, expression = %text, "calc");
    algorithm.evaluate(&tokens)
}
