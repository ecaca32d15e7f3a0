use std::{convert::TryFrom, iter::Peekable, str::CharIndices};

use crate::{
    errors::LexError,
    syntax::{
        operators::OPERATOR_TABLE,
        tokens::{Delimiter, Spanned, SpannedTok, Token},
    },
};

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

macro_rules! many {
    ($name: ident, $predicate: expr, $token: path) => {
        pub fn $name(&mut self, start: usize) -> SpannedTok<'a> {
            let mut end = start + 1;
            while let Some((pos, c)) = self.next_if($predicate) {
                end = pos + c.len_utf8();
            }
            let span = start..end;
            Spanned {
                elem: $token(&self.source[span.clone()]),
                span,
            }
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

    /// Every token of the source, whitespace included.
    pub fn tokenize(mut self) -> Result<Vec<SpannedTok<'a>>, LexError> {
        let mut tokens = vec![];
        while let Some((pos, char)) = self.next() {
            let span = pos..pos + char.len_utf8();
            let elem = match char {
                c if c.is_ascii_digit() => {
                    tokens.push(self.num(pos));
                    continue;
                }
                ' ' | '\t' => Token::Whitespace(&self.source[span.clone()]),
                c => match (OPERATOR_TABLE.get(&c), Delimiter::try_from(c)) {
                    (Some(op), _) => Token::Op(*op),
                    (None, Ok(d)) => Token::Delimiter(d),
                    (None, Err(())) => return Err(LexError { span, found: c }),
                },
            };
            tokens.push(Spanned { elem, span });
        }
        Ok(tokens)
    }

    many!(num, |c| c.is_ascii_digit(), Token::Num);

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

/// Tokens the parser gets to see: whitespace is dropped.
pub fn tokenize(source: &str) -> Result<Vec<SpannedTok<'_>>, LexError> {
    let mut tokens = Lexer::new(source).tokenize()?;
    tokens.retain(|tok| !matches!(tok.elem, Token::Whitespace(_)));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::Operator;
    use pretty_assertions::assert_eq;

    fn elems(source: &str) -> Vec<Token<'_>> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|tok| tok.elem)
            .collect()
    }

    #[test]
    fn numbers_are_maximal_runs() {
        assert_eq!(
            elems("12+007"),
            vec![Token::Num("12"), Token::Op(Operator::Add), Token::Num("007")]
        );
        assert_eq!(elems("1 2"), vec![Token::Num("1"), Token::Num("2")]);
    }

    #[test]
    fn spans() {
        let tokens = tokenize(" 42\t*(3)").unwrap();
        let spans: Vec<_> = tokens.iter().map(|tok| tok.span.clone()).collect();
        assert_eq!(spans, vec![1..3, 4..5, 5..6, 6..7, 7..8]);
    }

    #[test]
    fn whitespace_is_kept_by_the_lexer() {
        let tokens = Lexer::new("1 \t2").tokenize().unwrap();
        assert_eq!(
            tokens.into_iter().map(|t| t.elem).collect::<Vec<_>>(),
            vec![
                Token::Num("1"),
                Token::Whitespace(" "),
                Token::Whitespace("\t"),
                Token::Num("2"),
            ]
        );
    }

    #[test]
    fn every_operator() {
        assert_eq!(
            elems("+-*/%^()"),
            vec![
                Token::Op(Operator::Add),
                Token::Op(Operator::Sub),
                Token::Op(Operator::Mul),
                Token::Op(Operator::Div),
                Token::Op(Operator::Rem),
                Token::Op(Operator::Pow),
                Token::Delimiter(Delimiter::LParen),
                Token::Delimiter(Delimiter::RParen),
            ]
        );
    }

    #[test]
    fn unknown_chars() {
        assert_eq!(
            tokenize("a+1"),
            Err(LexError {
                span: 0..1,
                found: 'a'
            })
        );
        assert_eq!(
            tokenize("1\n+1"),
            Err(LexError {
                span: 1..2,
                found: '\n'
            })
        );
        // the marker only exists in postfix output
        assert!(tokenize("~1").is_err());
        assert!(tokenize("1 + é").is_err());
    }

    #[test]
    fn empty() {
        assert!(elems("").is_empty());
        assert!(elems(" \t ").is_empty());
    }
}
