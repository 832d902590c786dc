use crate::errors::eval_err::ArithmeticError;

use phf::phf_map;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fixity {
    Prefix,
    Infix(Assoc),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Assoc {
    Right,
    Left,
}
impl Assoc {
    pub fn is_left(&self) -> bool {
        self == &Assoc::Left
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arity {
    Unary,
    Binary,
}

/// The values an operator is applied to, in source order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operands {
    Unary(f64),
    Binary(f64, f64),
}
impl Operands {
    pub fn len(&self) -> usize {
        match self {
            Operands::Unary(_) => 1,
            Operands::Binary(_, _) => 2,
        }
    }
}

/// Arithmetic operators.
///
/// Operators are ordered by precedence alone: `Plus == Minus` even though
/// they are different operators. Wrapped in an `Option`, `None` sits below
/// every operator and marks the bottom of an operator stack.
#[derive(Clone, Copy, Debug)]
pub enum Operator {
    UnaryMinus,
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn sym(&self) -> &'static str {
        match self {
            Operator::UnaryMinus | Operator::Minus => "-",
            Operator::Plus => "+",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
        }
    }

    pub fn prec(&self) -> u8 {
        match self {
            Operator::Plus | Operator::Minus => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 3,
            Operator::UnaryMinus => 4,
        }
    }

    pub fn fixity(&self) -> Fixity {
        match self {
            Operator::UnaryMinus => Fixity::Prefix,
            Operator::Power => Fixity::Infix(Assoc::Right),
            _ => Fixity::Infix(Assoc::Left),
        }
    }

    pub fn arity(&self) -> Arity {
        match self.fixity() {
            Fixity::Prefix => Arity::Unary,
            Fixity::Infix(_) => Arity::Binary,
        }
    }

    pub fn is_prefix(&self) -> bool {
        self.fixity() == Fixity::Prefix
    }

    pub fn is_left_assoc(&self) -> bool {
        match self.fixity() {
            Fixity::Infix(assoc) => assoc.is_left(),
            _ => false,
        }
    }

    pub fn is_right_assoc(&self) -> bool {
        self.fixity() == Fixity::Infix(Assoc::Right)
    }

    pub fn apply(&self, operands: Operands) -> Result<f64, ArithmeticError> {
        let value = match (self, operands) {
            (Operator::UnaryMinus, Operands::Unary(a)) => -a,
            (Operator::Plus, Operands::Binary(a, b)) => a + b,
            (Operator::Minus, Operands::Binary(a, b)) => a - b,
            (Operator::Multiply, Operands::Binary(a, b)) => a * b,
            (Operator::Divide, Operands::Binary(_, b)) if b == 0.0 => {
                return Err(ArithmeticError::DivisionByZero)
            }
            (Operator::Divide, Operands::Binary(a, b)) => a / b,
            (Operator::Power, Operands::Binary(a, b)) if a == 0.0 && b < 0.0 => {
                return Err(ArithmeticError::DivisionByZero)
            }
            (Operator::Power, Operands::Binary(a, b)) => a.powf(b),
            (op, operands) => {
                return Err(ArithmeticError::Arity {
                    op: op.sym(),
                    found: operands.len(),
                })
            }
        };
        check_finite(self.sym(), operands, value)
    }
}

// Infinite or NaN operands propagate, only a finite input going bad is an error
fn check_finite(op: &'static str, operands: Operands, value: f64) -> Result<f64, ArithmeticError> {
    let finite_inputs = match operands {
        Operands::Unary(a) => a.is_finite(),
        Operands::Binary(a, b) => a.is_finite() && b.is_finite(),
    };
    if !finite_inputs || value.is_finite() {
        Ok(value)
    } else if value.is_nan() {
        Err(ArithmeticError::Undefined { op })
    } else {
        Err(ArithmeticError::Overflow { op })
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.prec() == other.prec()
    }
}

impl PartialOrd for Operator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.prec().partial_cmp(&other.prec())
    }
}

pub const BINARY_OPERATOR_TABLE: phf::Map<&'static str, Operator> = phf_map! {
    "+" => Operator::Plus,
    "-" => Operator::Minus,
    "*" => Operator::Multiply,
    "/" => Operator::Divide,
    "^" => Operator::Power,
};

pub const UNARY_OPERATOR_TABLE: phf::Map<&'static str, Operator> = phf_map! {
    "-" => Operator::UnaryMinus,
};
