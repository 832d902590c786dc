use std::{convert::TryFrom, iter::Enumerate, iter::Peekable, slice::Iter};

use crate::{
    errors::err::{Error, InvalidExpressionError},
    syntax::{
        operators::{Operator, BINARY_OPERATOR_TABLE, UNARY_OPERATOR_TABLE},
        tokens::{Delimiter, Token},
    },
};

macro_rules! token {
    ($name: ident, $p: pat, $expected: literal) => {
        pub fn $name(&mut self) -> Result<Token<'a>, InvalidExpressionError> {
            match self.peek()? {
                Some(tok @ $p) => {
                    self.bump();
                    Ok(tok)
                }
                _ => Err(self.unexpected_tok_or_eof($expected)),
            }
        }
    };
}

/// Cursor over a token sequence. Tokens are classified when they are
/// looked at, an invalid one turns into an [`InvalidExpressionError`].
pub struct Parser<'a, S> {
    tokens: Peekable<Enumerate<Iter<'a, S>>>,
    len: usize,
}

impl<'a, S> Parser<'a, S>
where
    S: AsRef<str>,
{
    pub fn new(tokens: &'a [S]) -> Self {
        Self {
            tokens: tokens.iter().enumerate().peekable(),
            len: tokens.len(),
        }
    }

    token!(
        rparen,
        Token::Delimiter(Delimiter::RParen),
        "right parenthesis"
    );

    /// Fails unless every token has been consumed.
    pub fn eof(&mut self) -> Result<(), InvalidExpressionError> {
        match self.peek()? {
            None => Ok(()),
            Some(Token::Delimiter(Delimiter::RParen)) => Err(InvalidExpressionError::new(
                Error::UnopenedParen,
                self.position(),
            )),
            Some(_) => Err(self.unexpected_tok_or_eof("an operator")),
        }
    }

    pub fn binary_op(&mut self) -> Result<Option<Operator>, InvalidExpressionError> {
        Ok(match self.peek()? {
            Some(Token::Op(sym)) => BINARY_OPERATOR_TABLE.get(sym).copied(),
            _ => None,
        })
    }

    pub fn unary_op(&mut self) -> Result<Option<Operator>, InvalidExpressionError> {
        Ok(match self.peek()? {
            Some(Token::Op(sym)) => UNARY_OPERATOR_TABLE.get(sym).copied(),
            _ => None,
        })
    }

    pub fn peek(&mut self) -> Result<Option<Token<'a>>, InvalidExpressionError> {
        match self.tokens.peek() {
            Some(&(pos, tok)) => Token::try_from(tok.as_ref())
                .map(Some)
                .map_err(|e| InvalidExpressionError::new(Error::InvalidToken(e), pos)),
            None => Ok(None),
        }
    }

    pub fn bump(&mut self) {
        self.tokens.next();
    }

    /// Index of the next token, or the sequence length once exhausted.
    pub fn position(&mut self) -> usize {
        self.tokens.peek().map_or(self.len, |(pos, _)| *pos)
    }

    pub fn unexpected_tok_or_eof(&mut self, expected: &'static str) -> InvalidExpressionError {
        let position = self.position();
        let error = match self.tokens.peek() {
            Some(&(_, tok)) => Error::UnexpectedTok(tok.as_ref().to_owned()),
            None => Error::UnexpectedEOF,
        };
        InvalidExpressionError::new(error, position).expected(expected)
    }
}

/// What the next token of an expression has to be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum State {
    ExpectOperand,
    ExpectOperator,
}

/// Checks that `tokens` form a well-formed expression without computing
/// anything.
///
/// expr := term (binop term)*
/// term := NUMBER | '-' term | '(' expr ')'
///
/// The grammar is walked with the two-state machine the shunting-yard
/// evaluator uses, so nesting only grows a counter.
pub fn recognize<S: AsRef<str>>(tokens: &[S]) -> Result<(), InvalidExpressionError> {
    let mut parser = Parser::new(tokens);
    let mut state = State::ExpectOperand;
    let mut depth = 0usize;
    while let Some(tok) = parser.peek()? {
        state = match (state, tok) {
            (State::ExpectOperand, Token::Num(_)) => State::ExpectOperator,
            (State::ExpectOperand, Token::Delimiter(Delimiter::LParen)) => {
                depth += 1;
                State::ExpectOperand
            }
            (State::ExpectOperand, Token::Op(sym)) if UNARY_OPERATOR_TABLE.contains_key(sym) => {
                State::ExpectOperand
            }
            (State::ExpectOperand, _) => return Err(parser.unexpected_tok_or_eof("an operand")),
            (State::ExpectOperator, Token::Op(sym)) if BINARY_OPERATOR_TABLE.contains_key(sym) => {
                State::ExpectOperand
            }
            (State::ExpectOperator, Token::Delimiter(Delimiter::RParen)) => {
                if depth == 0 {
                    return Err(InvalidExpressionError::new(
                        Error::UnopenedParen,
                        parser.position(),
                    ));
                }
                depth -= 1;
                State::ExpectOperator
            }
            (State::ExpectOperator, _) => return Err(parser.unexpected_tok_or_eof("an operator")),
        };
        parser.bump();
    }
    match state {
        State::ExpectOperand => Err(parser.unexpected_tok_or_eof("an operand")),
        State::ExpectOperator if depth > 0 => Err(parser.unexpected_tok_or_eof("right parenthesis")),
        State::ExpectOperator => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{err::Expected, token_err::InvalidTokenReason};
    use pretty_assertions::assert_eq;

    fn error_of(tokens: &[&str]) -> InvalidExpressionError {
        recognize(tokens).unwrap_err()
    }

    #[test]
    fn recognize_valid() {
        let valid: &[&[&str]] = &[
            &["1"],
            &["1.9"],
            &["-", "1"],
            &["-", "1.5"],
            &["2", "+", "3"],
            &["-", "2", "+", "3"],
            &["2", "*", "3"],
            &["2", "*", "(", "7", ")"],
            &["2", "*", "(", "7", "-", "4", ")"],
            &["(", "7", "-", "4", ")", "/", "2"],
            &["-", "-", "(", "-", "1", ")"],
            &["1", "-", "-", "2"],
            &["2", "^", "2", "^", "3"],
            &["(", "(", "1", ")", ")"],
            &[" 45 ", "*", "2"],
        ];
        for tokens in valid {
            assert_eq!(recognize(*tokens), Ok(()), "{:?}", tokens);
        }
    }

    #[test]
    fn dangling_operator() {
        let err = error_of(&["1", "+"]);
        assert_eq!(err.error, Error::UnexpectedEOF);
        assert_eq!(err.position, 2);
        assert_eq!(err.expected, Some(Expected::Named("an operand")));
    }

    #[test]
    fn invalid_token_is_an_expression_error() {
        let err = error_of(&["1", "#", "5"]);
        assert_eq!(err.position, 1);
        match err.error {
            Error::InvalidToken(e) => {
                assert_eq!(e.token, "#");
                assert_eq!(e.reason, InvalidTokenReason::UnexpectedChar('#'));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(error_of(&["abc"]).error, Error::InvalidToken(_)));
        assert!(matches!(error_of(&[""]).error, Error::InvalidToken(_)));
    }

    #[test]
    fn unbalanced_parens() {
        let err = error_of(&["1", "/", "(", "2", "+", "3"]);
        assert_eq!(err.error, Error::UnexpectedEOF);
        assert_eq!(err.expected, Some(Expected::Named("right parenthesis")));

        let err = error_of(&["1", ")"]);
        assert_eq!(err.error, Error::UnopenedParen);
        assert_eq!(err.position, 1);

        assert_eq!(error_of(&["(", "6"]).error, Error::UnexpectedEOF);
        assert_eq!(error_of(&["1", "+", "("]).error, Error::UnexpectedEOF);
    }

    #[test]
    fn malformed_shapes() {
        assert_eq!(error_of(&[]).error, Error::UnexpectedEOF);
        assert_eq!(error_of(&["(", ")"]).error, Error::UnexpectedTok(")".into()));
        assert_eq!(error_of(&["1", "*", "*", "2"]).error, Error::UnexpectedTok("*".into()));
        assert_eq!(error_of(&["+", "1"]).error, Error::UnexpectedTok("+".into()));
        assert_eq!(error_of(&["1", "2"]).error, Error::UnexpectedTok("2".into()));
        assert_eq!(error_of(&["2", "("]).error, Error::UnexpectedTok("(".into()));
    }

    #[test]
    fn deep_nesting() {
        const DEPTH: usize = 100_000;
        let mut tokens = vec!["("; DEPTH];
        tokens.push("1");
        tokens.extend(vec![")"; DEPTH]);
        assert_eq!(recognize(&tokens), Ok(()));

        tokens.pop();
        let err = error_of(&tokens);
        assert_eq!(err.error, Error::UnexpectedEOF);
        assert_eq!(err.expected, Some(Expected::Named("right parenthesis")));

        let mut negated = vec!["-"; DEPTH];
        negated.push("1");
        assert_eq!(recognize(&negated), Ok(()));
    }
}
