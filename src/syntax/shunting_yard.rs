use crate::{
    errors::ParseErrReason,
    syntax::{
        postfix::Postfix,
        tokens::{Delimiter, Operator, Token},
    },
};

/// An entry of the operator stack. Numbers never land here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pending {
    Op(Operator),
    LParen,
}

/// Parser state: how far into the token list the parser is, plus the shunting-yard
/// output and operator stack built so far.
///
/// Transitions never touch `self`, a failed alternative can always resume from the
/// context it started from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Context<'a> {
    pub cursor: usize,
    output: Vec<Token<'a>>,
    op_stack: Vec<Pending>,
}

impl<'a> Context<'a> {
    /// Accepts the token under the cursor and moves past it.
    pub fn push(&self, tok: Token<'a>) -> Result<Context<'a>, ParseErrReason> {
        let mut output = self.output.clone();
        let mut op_stack = self.op_stack.clone();
        match tok {
            Token::Num(_) => output.push(tok),
            Token::Delimiter(Delimiter::LParen) => op_stack.push(Pending::LParen),
            Token::Delimiter(Delimiter::RParen) => loop {
                match op_stack.pop() {
                    Some(Pending::LParen) => break,
                    Some(Pending::Op(op)) => output.push(Token::Op(op)),
                    None => return Err(ParseErrReason::UnmatchedParen),
                }
            },
            Token::Op(op) => {
                while let Some(&Pending::Op(top)) = op_stack.last() {
                    if !top.has_bigger_prec(op) {
                        break;
                    }
                    output.push(Token::Op(top));
                    op_stack.pop();
                }
                op_stack.push(Pending::Op(op));
            }
            Token::Whitespace(_) => unreachable!("whitespace is dropped before parsing"),
        }
        Ok(Context {
            cursor: self.cursor + 1,
            output,
            op_stack,
        })
    }

    /// Drains the operator stack into the output once the whole input is recognized.
    pub fn terminate(self) -> Result<Postfix<'a>, ParseErrReason> {
        let Context {
            mut output,
            mut op_stack,
            ..
        } = self;
        while let Some(pending) = op_stack.pop() {
            match pending {
                Pending::Op(op) => output.push(Token::Op(op)),
                Pending::LParen => return Err(ParseErrReason::UnclosedParen),
            }
        }
        Ok(Postfix::from(output))
    }
}
