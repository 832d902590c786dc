use crate::errors::err::InvalidExpressionError;
use thiserror::Error;

/// Failure while applying an operator to its operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("`{op}` overflowed")]
    Overflow { op: &'static str },
    #[error("`{op}` has no real result")]
    Undefined { op: &'static str },
    #[error("`{op}` applied to {found} operands")]
    Arity { op: &'static str, found: usize },
}

/// Everything that can go wrong while computing the value of an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Expression(#[from] InvalidExpressionError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// An evaluation strategy name that matches none of the known ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown evaluation algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);
