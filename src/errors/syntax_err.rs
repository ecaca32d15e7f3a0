use std::fmt;

use crate::source_pos::Span;

/// A character the tokenizer has no class for.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: Span,
    pub found: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected character {:?} at {}..{}",
            self.found, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for LexError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub span: Span,
    pub reason: ParseErrReason,
    pub expected: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrReason {
    UnexpectedTok(String),
    UnexpectedEOF,
    /// A `)` with no `(` left on the operator stack.
    UnmatchedParen,
    /// A `(` still pending once the whole input was recognized.
    UnclosedParen,
    TrailingTokens,
    /// The line nests deeper than the parser is willing to recurse.
    TooDeep,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            ParseErrReason::UnexpectedTok(tok) => write!(f, "unexpected token `{}`", tok)?,
            ParseErrReason::UnexpectedEOF => write!(f, "unexpected end of input")?,
            ParseErrReason::UnmatchedParen => write!(f, "unmatched `)`")?,
            ParseErrReason::UnclosedParen => write!(f, "unclosed `(`")?,
            ParseErrReason::TrailingTokens => write!(f, "trailing tokens")?,
            ParseErrReason::TooDeep => write!(f, "expression too long or too deeply nested")?,
        }
        write!(f, " at {}..{}", self.span.start, self.span.end)?;
        if let Some(expected) = self.expected {
            write!(f, ", expected {}", expected)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
