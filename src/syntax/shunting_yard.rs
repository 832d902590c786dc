use std::convert::TryFrom;

use tracing::{debug, trace};

use crate::{
    errors::{
        err::{Error, Expected, InvalidExpressionError},
        eval_err::EvalError,
    },
    syntax::{
        evaluator::Evaluator,
        operators::{Arity, Operands, Operator, BINARY_OPERATOR_TABLE, UNARY_OPERATOR_TABLE},
        parser::State,
        tokens::{parse_number, Delimiter, Token},
    },
};

/// Single left-to-right pass with an operand stack and an operator stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShuntingYard;

#[derive(Clone, Copy, Debug)]
enum Pending {
    Op(Operator),
    // an opening parenthesis and its token position
    Group(usize),
}

#[derive(Default)]
struct Stacks {
    operands: Vec<f64>,
    operators: Vec<Pending>,
}

impl Stacks {
    // `None` when the operator stack is empty or a group is open
    fn top(&self) -> Option<Operator> {
        match self.operators.last() {
            Some(Pending::Op(op)) => Some(*op),
            _ => None,
        }
    }

    // a prefix operator has no left operand yet, so it never pops anything
    fn push_operator(&mut self, op: Operator, position: usize) -> Result<(), EvalError> {
        if !op.is_prefix() {
            while let Some(top) = self.pop_tighter(op) {
                self.apply(top, position)?;
            }
        }
        self.operators.push(Pending::Op(op));
        Ok(())
    }

    fn pop_tighter(&mut self, incoming: Operator) -> Option<Operator> {
        let top = self.top();
        if binds_tighter(top, incoming) {
            self.operators.pop();
            top
        } else {
            None
        }
    }

    fn close_group(&mut self, position: usize) -> Result<(), EvalError> {
        loop {
            match self.operators.pop() {
                Some(Pending::Group(_)) => return Ok(()),
                Some(Pending::Op(op)) => self.apply(op, position)?,
                None => {
                    return Err(InvalidExpressionError::new(Error::UnopenedParen, position).into())
                }
            }
        }
    }

    fn apply(&mut self, op: Operator, position: usize) -> Result<(), EvalError> {
        let operands = match op.arity() {
            Arity::Unary => Operands::Unary(self.pop_operand(position)?),
            Arity::Binary => {
                let rhs = self.pop_operand(position)?;
                let lhs = self.pop_operand(position)?;
                Operands::Binary(lhs, rhs)
            }
        };
        let value = op.apply(operands)?;
        trace!(op = op.sym(), ?operands, value, "applied operator");
        self.operands.push(value);
        Ok(())
    }

    // cannot fail from `evaluate`, whose state machine pushes every operand
    // before its operator is applied
    fn pop_operand(&mut self, position: usize) -> Result<f64, InvalidExpressionError> {
        self.operands
            .pop()
            .ok_or_else(|| InvalidExpressionError::new(Error::UnexpectedEOF, position))
    }

    fn finish(mut self, end: usize) -> Result<f64, EvalError> {
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Op(op) => self.apply(op, end)?,
                Pending::Group(open) => {
                    return Err(InvalidExpressionError::new(Error::UnclosedParen, open).into())
                }
            }
        }
        // exactly one operand is left once every operator has been applied
        Ok(self.pop_operand(end)?)
    }
}

// Left-associative operators give way to an equal precedence on the stack,
// right-associative ones only to a strictly higher one.
fn binds_tighter(top: Option<Operator>, incoming: Operator) -> bool {
    if incoming.is_left_assoc() {
        top >= Some(incoming)
    } else {
        top > Some(incoming)
    }
}

fn unexpected(token: &str, position: usize, expected: &'static str) -> EvalError {
    InvalidExpressionError::new(Error::UnexpectedTok(token.to_owned()), position)
        .expected(expected)
        .into()
}

impl Evaluator for ShuntingYard {
    fn evaluate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<f64, EvalError> {
        debug!(algorithm = "shunting-yard", tokens = tokens.len(), "evaluating expression");
        let mut stacks = Stacks::default();
        let mut state = State::ExpectOperand;
        for (pos, raw) in tokens.iter().enumerate() {
            let raw = raw.as_ref();
            let tok = Token::try_from(raw)
                .map_err(|e| InvalidExpressionError::new(Error::InvalidToken(e), pos))?;
            state = match (state, tok) {
                (State::ExpectOperand, Token::Num(n)) => {
                    let value = parse_number(n)
                        .map_err(|e| InvalidExpressionError::new(Error::InvalidToken(e), pos))?;
                    stacks.operands.push(value);
                    State::ExpectOperator
                }
                (State::ExpectOperand, Token::Delimiter(Delimiter::LParen)) => {
                    stacks.operators.push(Pending::Group(pos));
                    State::ExpectOperand
                }
                (State::ExpectOperand, Token::Op(sym)) => match UNARY_OPERATOR_TABLE.get(sym) {
                    Some(op) => {
                        stacks.push_operator(*op, pos)?;
                        State::ExpectOperand
                    }
                    None => return Err(unexpected(raw, pos, "an operand")),
                },
                (State::ExpectOperand, _) => return Err(unexpected(raw, pos, "an operand")),
                (State::ExpectOperator, Token::Op(sym)) => match BINARY_OPERATOR_TABLE.get(sym) {
                    Some(op) => {
                        stacks.push_operator(*op, pos)?;
                        State::ExpectOperand
                    }
                    None => return Err(unexpected(raw, pos, "an operator")),
                },
                (State::ExpectOperator, Token::Delimiter(Delimiter::RParen)) => {
                    stacks.close_group(pos)?;
                    State::ExpectOperator
                }
                (State::ExpectOperator, _) => return Err(unexpected(raw, pos, "an operator")),
            };
        }
        if state == State::ExpectOperand {
            return Err(InvalidExpressionError {
                expected: Some(Expected::Named("an operand")),
                error: Error::UnexpectedEOF,
                position: tokens.len(),
            }
            .into());
        }
        let value = stacks.finish(tokens.len())?;
        debug!(algorithm = "shunting-yard", value, "evaluated expression");
        Ok(value)
    }
}
