use crate::errors::token_err::{InvalidTokenError, InvalidTokenReason};
use std::convert::TryFrom;

/// Classification of a token string, computed on demand from the text.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token<'a> {
    Op(&'a str),

    // Kept as text, the evaluator parses the value when it needs it
    Num(&'a str),

    Delimiter(Delimiter),
}

impl<'a> TryFrom<&'a str> for Token<'a> {
    type Error = InvalidTokenError;
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(match value {
            "" => return Err(InvalidTokenError::new(value, InvalidTokenReason::Empty)),
            "+" | "-" | "*" | "/" | "^" => Token::Op(value),
            "(" => Token::Delimiter(Delimiter::LParen),
            ")" => Token::Delimiter(Delimiter::RParen),
            _ => {
                let trimmed = value.trim();
                match check_number(trimmed) {
                    Ok(()) => Token::Num(trimmed),
                    Err(reason) => return Err(InvalidTokenError::new(value, reason)),
                }
            }
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Delimiter {
    LParen,
    RParen,
}

/// Checks that `token` is a number, an operator or a parenthesis.
///
/// The empty string stands for a missing token. Numbers may be padded with
/// whitespace.
pub fn validate_token(token: &str) -> Result<(), InvalidTokenError> {
    Token::try_from(token).map(|_| ())
}

/// Numeric value of a number token.
pub fn parse_number(token: &str) -> Result<f64, InvalidTokenError> {
    let trimmed = token.trim();
    check_number(trimmed).map_err(|reason| InvalidTokenError::new(token, reason))?;
    trimmed
        .parse()
        .map_err(|_| InvalidTokenError::new(token, InvalidTokenReason::MalformedNumber))
}

// digits, at most one '.', then an optional e/E followed by digits
fn check_number(s: &str) -> Result<(), InvalidTokenReason> {
    if s.is_empty() {
        return Err(InvalidTokenReason::Empty);
    }
    if let Some(c) = s
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(*c, '.' | 'e' | 'E')))
    {
        return Err(InvalidTokenReason::UnexpectedChar(c));
    }
    let (mantissa, exponent) = match s.find(|c| c == 'e' || c == 'E') {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };
    let well_formed = mantissa.chars().any(|c| c.is_ascii_digit())
        && mantissa.matches('.').count() <= 1
        && exponent.map_or(true, |e| {
            !e.is_empty() && e.chars().all(|c| c.is_ascii_digit())
        });
    if well_formed {
        Ok(())
    } else {
        Err(InvalidTokenReason::MalformedNumber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn operators_and_parens() {
        for op in &["+", "-", "*", "/", "^"] {
            assert_eq!(Token::try_from(*op), Ok(Token::Op(*op)));
        }
        assert_eq!(Token::try_from("("), Ok(Token::Delimiter(Delimiter::LParen)));
        assert_eq!(Token::try_from(")"), Ok(Token::Delimiter(Delimiter::RParen)));
    }

    #[test]
    fn numbers() {
        for n in &["0", "5", "5.5", "00.000", "10e2", "1E3", ".5", "5.", "   45", "45 \t"] {
            assert!(validate_token(n).is_ok(), "{:?} should be a number", n);
        }
        assert_eq!(Token::try_from("  45 "), Ok(Token::Num("45")));
    }

    #[test]
    fn rejects_text() {
        let err = validate_token("a").unwrap_err();
        assert_eq!(err.reason, InvalidTokenReason::UnexpectedChar('a'));
        assert!(validate_token("azerty").is_err());
        assert!(validate_token("inf").is_err());
        assert!(validate_token("#").is_err());
        assert!(validate_token("++").is_err());
    }

    #[test]
    fn rejects_missing_token() {
        let err = validate_token("").unwrap_err();
        assert_eq!(err.reason, InvalidTokenReason::Empty);
        assert_eq!(validate_token("   ").unwrap_err().reason, InvalidTokenReason::Empty);
    }

    #[test]
    fn rejects_malformed_numbers() {
        for n in &["1.2.3", ".", "1e", "e5", "1e2e3", "1e2.5", "1ee2"] {
            let err = validate_token(n).unwrap_err();
            assert_eq!(err.reason, InvalidTokenReason::MalformedNumber, "{:?}", n);
        }
    }

    #[test]
    fn number_values() {
        assert_eq!(parse_number("1.9"), Ok(1.9));
        assert_eq!(parse_number(" 10e2 "), Ok(1000.0));
        assert_eq!(parse_number("00.000"), Ok(0.0));
        assert!(parse_number("1x").is_err());
    }
}
