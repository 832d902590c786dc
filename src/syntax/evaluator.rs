use std::{fmt, str::FromStr};

use crate::{
    errors::eval_err::{EvalError, UnknownAlgorithm},
    syntax::{precedence_climbing::PrecedenceClimbing, shunting_yard::ShuntingYard},
};

/// A strategy that turns a token sequence into a value.
///
/// Implementations check the grammar themselves, they don't rely on
/// [`recognize`](crate::syntax::parser::recognize) having been called.
pub trait Evaluator {
    fn evaluate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<f64, EvalError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    ShuntingYard,
    PrecedenceClimbing,
}

impl Algorithm {
    pub fn evaluate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<f64, EvalError> {
        match self {
            Algorithm::ShuntingYard => ShuntingYard.evaluate(tokens),
            Algorithm::PrecedenceClimbing => PrecedenceClimbing.evaluate(tokens),
        }
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sh" | "shunting-yard" => Algorithm::ShuntingYard,
            "pc" | "precedence-climbing" => Algorithm::PrecedenceClimbing,
            _ => return Err(UnknownAlgorithm(s.to_owned())),
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::ShuntingYard => "shunting-yard",
            Algorithm::PrecedenceClimbing => "precedence-climbing",
        })
    }
}

/// Evaluates `tokens` with the shunting-yard algorithm.
pub fn evaluate<S: AsRef<str>>(tokens: &[S]) -> Result<f64, EvalError> {
    ShuntingYard.evaluate(tokens)
}
