use tracing::{debug, trace};

use crate::{
    errors::{
        err::{Error, InvalidExpressionError},
        eval_err::EvalError,
    },
    syntax::{
        evaluator::Evaluator,
        operators::{Operands, Operator},
        parser::Parser,
        tokens::{parse_number, Delimiter, Token},
    },
};

/// Recursive evaluation, one call level per precedence step.
///
/// Parentheses, unary minus and chains of `^` each nest a call level.
/// Nesting deeper than [`MAX_NESTING`] fails with
/// [`Error::NestingTooDeep`] instead of exhausting the stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrecedenceClimbing;

pub const MAX_NESTING: usize = 256;

struct Climber<'a, S> {
    parser: Parser<'a, S>,
    depth: usize,
}

impl<'a, S> Climber<'a, S>
where
    S: AsRef<str>,
{
    fn exp(&mut self, min_prec: u8) -> Result<f64, EvalError> {
        if self.depth == MAX_NESTING {
            let error = Error::NestingTooDeep { limit: MAX_NESTING };
            return Err(InvalidExpressionError::new(error, self.parser.position()).into());
        }
        self.depth += 1;
        let value = self.climb(min_prec);
        self.depth -= 1;
        value
    }

    /// Parses operators whose precedence is at least `min_prec`.
    fn climb(&mut self, min_prec: u8) -> Result<f64, EvalError> {
        let mut lhs = self.primary()?;
        while let Some(op) = self.parser.binary_op()? {
            if op.prec() < min_prec {
                break;
            }
            self.parser.bump();
            let next = if op.is_right_assoc() {
                op.prec()
            } else {
                op.prec() + 1
            };
            let rhs = self.exp(next)?;
            lhs = apply(op, Operands::Binary(lhs, rhs))?;
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        if let Some(op) = self.parser.unary_op()? {
            self.parser.bump();
            let operand = self.exp(op.prec())?;
            return apply(op, Operands::Unary(operand));
        }
        match self.parser.peek()? {
            Some(Token::Num(n)) => {
                let position = self.parser.position();
                self.parser.bump();
                parse_number(n)
                    .map_err(|e| InvalidExpressionError::new(Error::InvalidToken(e), position).into())
            }
            Some(Token::Delimiter(Delimiter::LParen)) => {
                self.parser.bump();
                let value = self.exp(0)?;
                self.parser.rparen()?;
                Ok(value)
            }
            _ => Err(self.parser.unexpected_tok_or_eof("an operand").into()),
        }
    }
}

fn apply(op: Operator, operands: Operands) -> Result<f64, EvalError> {
    let value = op.apply(operands)?;
    trace!(op = op.sym(), ?operands, value, "applied operator");
    Ok(value)
}

impl Evaluator for PrecedenceClimbing {
    fn evaluate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<f64, EvalError> {
        debug!(algorithm = "precedence-climbing", tokens = tokens.len(), "evaluating expression");
        let mut climber = Climber {
            parser: Parser::new(tokens),
            depth: 0,
        };
        let value = climber.exp(0)?;
        climber.parser.eof()?;
        debug!(algorithm = "precedence-climbing", value, "evaluated expression");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::eval_err::ArithmeticError;
    use pretty_assertions::assert_eq;

    fn eval(tokens: &[&str]) -> Result<f64, EvalError> {
        PrecedenceClimbing.evaluate(tokens)
    }

    fn error(tokens: &[&str]) -> Error {
        match eval(tokens) {
            Err(EvalError::Expression(e)) => e.error,
            other => panic!("{:?} should be malformed, got {:?}", tokens, other),
        }
    }

    #[test]
    fn evaluate_expressions() {
        assert_eq!(eval(&["1"]), Ok(1.0));
        assert_eq!(eval(&["-", "1.5"]), Ok(-1.5));
        assert_eq!(eval(&["-", "2", "+", "3"]), Ok(1.0));
        assert_eq!(eval(&["2", "-", "3", "*", "3"]), Ok(-7.0));
        assert_eq!(eval(&["1", "-", "2", "-", "3", "-", "4"]), Ok(-8.0));
        assert_eq!(eval(&["2", "^", "2", "^", "3"]), Ok(256.0));
        assert_eq!(eval(&["-", "2", "^", "2"]), Ok(4.0));
        assert_eq!(eval(&["2", "^", "-", "1"]), Ok(0.5));
        assert_eq!(eval(&["-", "3", "*", "-", "3"]), Ok(9.0));
        assert_eq!(eval(&["(", "7", "-", "4", ")", "/", "2"]), Ok(1.5));
    }

    #[test]
    fn malformed() {
        assert_eq!(error(&["1", "+"]), Error::UnexpectedEOF);
        assert_eq!(error(&["(", "6"]), Error::UnexpectedEOF);
        assert_eq!(error(&["6", ")"]), Error::UnopenedParen);
        assert_eq!(error(&["1", "2"]), Error::UnexpectedTok("2".into()));
        assert!(matches!(error(&["abc"]), Error::InvalidToken(_)));
    }

    #[test]
    fn nesting_limit() {
        fn nested(depth: usize) -> Vec<&'static str> {
            let mut tokens = vec!["("; depth];
            tokens.push("1");
            tokens.extend(vec![")"; depth]);
            tokens
        }
        assert_eq!(eval(&nested(MAX_NESTING - 1)), Ok(1.0));
        let too_deep = Error::NestingTooDeep { limit: MAX_NESTING };
        assert_eq!(error(&nested(100_000)), too_deep);

        let mut negated = vec!["-"; 100_000];
        negated.push("1");
        assert_eq!(error(&negated), too_deep);

        let mut tower = vec!["1"];
        for _ in 0..100_000 {
            tower.extend(&["^", "1"]);
        }
        assert_eq!(error(&tower), too_deep);
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(
            eval(&["0", "^", "-", "2"]),
            Err(EvalError::Arithmetic(ArithmeticError::DivisionByZero))
        );
    }
}
