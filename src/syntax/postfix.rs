use std::{convert::TryFrom, fmt};

use crate::{errors::LexError, syntax::tokens::Token};

/// A postfix sequence: numbers and operators only, `~` being unary minus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix<'a>(Vec<Token<'a>>);

impl<'a> Postfix<'a> {
    /// Reads back the space separated text `Display` produces.
    pub fn read(text: &'a str) -> Result<Self, LexError> {
        let mut tokens = vec![];
        let mut offset = 0;
        for word in text.split(|c: char| c == ' ' || c == '\t') {
            let span = offset..offset + word.len();
            offset = span.end + 1;
            if word.is_empty() {
                continue;
            }
            match Token::try_from(word) {
                Ok(tok @ Token::Num(_)) | Ok(tok @ Token::Op(_)) => tokens.push(tok),
                _ => {
                    return Err(LexError {
                        found: word
                            .chars()
                            .find(|c| !c.is_ascii_digit())
                            .unwrap_or_default(),
                        span,
                    })
                }
            }
        }
        Ok(Postfix(tokens))
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.0
    }
}

impl<'a> From<Vec<Token<'a>>> for Postfix<'a> {
    fn from(tokens: Vec<Token<'a>>) -> Self {
        Postfix(tokens)
    }
}

impl fmt::Display for Postfix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = self.0.iter();
        if let Some(first) = tokens.next() {
            write!(f, "{}", first)?;
            for tok in tokens {
                write!(f, " {}", tok)?;
            }
        }
        Ok(())
    }
}
