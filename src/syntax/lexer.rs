use std::{iter::Peekable, str::CharIndices};

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

macro_rules! many {
    ($name: ident, $predicate: expr) => {
        pub fn $name(&mut self, start: usize, first: char) -> &'a str {
            let mut end = start + first.len_utf8();
            while let Some((pos, c)) = self.next_if($predicate) {
                end = pos + c.len_utf8();
            }
            &self.source[start..end]
        }
    };
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Splits the source into token strings. Never fails: characters that
    /// can't start a number come out as single-character tokens and are
    /// rejected later by validation.
    pub fn tokenize(mut self) -> Vec<&'a str> {
        let mut tokens = vec![];
        while let Some((pos, char)) = self.next() {
            match char {
                c if c.is_whitespace() => (),
                c if is_number_char(c) => tokens.push(self.num(pos, c)),
                // operators, parentheses and anything unknown stand alone
                c => tokens.push(&self.source[pos..pos + c.len_utf8()]),
            }
        }
        tokens
    }

    many!(num, is_number_char);

    pub fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<(usize, char)> {
        if predicate(self.peek()?.1) {
            return self.next();
        }
        None
    }

    fn peek(&mut self) -> Option<&(usize, char)> {
        self.chars.peek()
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, char);
    fn next(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E')
}

/// Splits `text` into token strings, see [`Lexer::tokenize`].
pub fn tokenize(text: &str) -> Vec<&str> {
    Lexer::new(text).tokenize()
}
