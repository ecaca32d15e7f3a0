use std::convert::TryFrom;

use log::debug;

use crate::{
    errors::EvalError,
    syntax::{Operator, Postfix, Token},
};

/// The value of a postfix sequence, along with the sequence itself.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult<'a> {
    pub postfix: Postfix<'a>,
    pub value: i64,
}

/// Runs a postfix sequence against an integer stack.
///
/// `+ - * ~` wrap on overflow. `/` and `%` truncate toward zero, so the remainder
/// takes the sign of the left operand.
pub fn evaluate(postfix: Postfix<'_>) -> Result<EvalResult<'_>, EvalError> {
    let mut operands: Vec<i64> = Vec::new();
    for tok in postfix.tokens() {
        let value = match *tok {
            Token::Num(lit) => lit
                .parse()
                .map_err(|_| EvalError::LiteralOverflow(lit.to_owned()))?,
            Token::Op(op) if op.is_prefix() => pop(&mut operands)?.wrapping_neg(),
            Token::Op(op) => {
                let right = pop(&mut operands)?;
                let left = pop(&mut operands)?;
                binary(op, left, right)?
            }
            Token::Delimiter(_) | Token::Whitespace(_) => {
                return Err(EvalError::StrayToken(tok.text().to_owned()))
            }
        };
        operands.push(value);
    }
    match operands.as_slice() {
        [value] => {
            debug!("{} evaluates to {}", postfix, value);
            Ok(EvalResult {
                value: *value,
                postfix,
            })
        }
        leftover => Err(EvalError::LeftoverOperands(leftover.len())),
    }
}

fn pop(operands: &mut Vec<i64>) -> Result<i64, EvalError> {
    operands.pop().ok_or(EvalError::StackUnderflow)
}

fn binary(op: Operator, left: i64, right: i64) -> Result<i64, EvalError> {
    Ok(match op {
        Operator::Add => left.wrapping_add(right),
        Operator::Sub => left.wrapping_sub(right),
        Operator::Mul => left.wrapping_mul(right),
        Operator::Div | Operator::Rem if right == 0 => return Err(EvalError::DivideByZero),
        Operator::Div => left.wrapping_div(right),
        Operator::Rem => left.wrapping_rem(right),
        Operator::Pow => pow(left, right)?,
        Operator::Neg => unreachable!("`~` takes a single operand"),
    })
}

/// `base ^ exp` as the truncated real result: exact when it fits, saturated when it
/// does not, and `0` for a negative power of anything but `1` and `-1`.
fn pow(base: i64, exp: i64) -> Result<i64, EvalError> {
    Ok(match (base, exp) {
        (0, e) if e < 0 => return Err(EvalError::ZeroToNegativePower),
        (_, 0) => 1,
        (0, _) => 0,
        (1, _) => 1,
        (-1, e) => {
            if e % 2 == 0 {
                1
            } else {
                -1
            }
        }
        (_, e) if e < 0 => 0,
        (b, e) => u32::try_from(e)
            .ok()
            .and_then(|e| b.checked_pow(e))
            .unwrap_or(if b < 0 && e % 2 == 1 {
                i64::MIN
            } else {
                i64::MAX
            }),
    })
}
