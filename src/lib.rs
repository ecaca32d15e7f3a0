//! Infix integer calculator.
//!
//! A line goes through three stages, each returning its own error type:
//! [`tokenize`], [`parse`] (infix to postfix), then [`evaluate`]. [`run`] chains them,
//! [`serve`] runs it over every line of a reader.

use std::{
    fmt,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use log::debug;

pub mod errors;
mod eval;
pub mod source_pos;
pub mod syntax;

pub use errors::{Error, EvalError, LexError, ParseErrReason, ParseError};
pub use eval::{evaluate, EvalResult};
pub use syntax::{parse, tokenize, Operator, Postfix, SpannedTok, Token};

/// What a successful line prints: the postfix form, then its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub postfix_text: String,
    pub value: i64,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.postfix_text, self.value)
    }
}

pub fn run(input: &str) -> Result<Evaluation, Error> {
    let tokens = tokenize(input)?;
    debug!("{} tokens in {:?}", tokens.len(), input);
    let postfix = parse(&tokens)?;
    debug!("postfix: {}", postfix);
    let EvalResult { postfix, value } = evaluate(postfix)?;
    Ok(Evaluation {
        postfix_text: postfix.to_string(),
        value,
    })
}

/// Answers every line of `input` on `out` until EOF or a line equal to `quit`.
///
/// A good line gets its postfix form and its value on two lines, a bad one gets
/// `error_marker` alone. Only I/O failures stop the loop early.
pub fn serve(
    input: impl BufRead,
    mut out: impl Write,
    quit: &str,
    error_marker: &str,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read an input line")?;
        if line == quit {
            break;
        }
        match run(&line) {
            Ok(evaluation) => writeln!(out, "{}", evaluation)?,
            Err(e) => {
                debug!("{:?}: {}", line, e);
                writeln!(out, "{}", error_marker)?;
            }
        }
    }
    out.flush().context("Failed to flush the output")
}
