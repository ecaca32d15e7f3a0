use std::{convert::TryFrom, fmt};

pub use crate::source_pos::{Span, Spanned};
use crate::syntax::operators::{OPERATOR_TABLE, UNARY_OPERATOR_TABLE};

pub type SpannedTok<'a> = Spanned<Token<'a>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Token<'a> {
    // Literals stay as text, overflow is only detected once the evaluator parses them
    Num(&'a str),

    Op(Operator),

    Delimiter(Delimiter),

    Whitespace(&'a str),
}

impl<'a> Token<'a> {
    /// The exact text this token stands for. The unary marker reads `~`.
    pub fn text(&self) -> &'a str {
        match self {
            Token::Num(n) => n,
            Token::Whitespace(w) => w,
            Token::Op(op) => op.symbol(),
            Token::Delimiter(d) => d.symbol(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl<'a> TryFrom<&'a str> for Token<'a> {
    type Error = ();
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Token::Num(value));
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => OPERATOR_TABLE
                .get(&c)
                .or_else(|| UNARY_OPERATOR_TABLE.get(&c))
                .map(|op| Token::Op(*op))
                .or_else(|| Delimiter::try_from(c).ok().map(Token::Delimiter))
                .ok_or(()),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    /// Unary minus. Never produced by the lexer, the parser rewrites a prefix `-` into it.
    Neg,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Pow => "^",
            Operator::Neg => "~",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Delimiter {
    LParen,
    RParen,
}

impl Delimiter {
    pub fn symbol(self) -> &'static str {
        match self {
            Delimiter::LParen => "(",
            Delimiter::RParen => ")",
        }
    }
}

impl TryFrom<char> for Delimiter {
    type Error = ();
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            '(' => Delimiter::LParen,
            ')' => Delimiter::RParen,
            _ => return Err(()),
        })
    }
}
