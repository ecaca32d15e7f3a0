use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// `n 0 /` or `n 0 %`.
    DivideByZero,
    /// `0 n ^` with `n < 0`.
    ZeroToNegativePower,
    /// A number literal that does not fit in an `i64`.
    LiteralOverflow(String),
    // The ones below can only come from a postfix sequence the parser would never emit.
    StackUnderflow,
    StrayToken(String),
    LeftoverOperands(usize),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DivideByZero => write!(f, "division by zero"),
            EvalError::ZeroToNegativePower => write!(f, "zero raised to a negative power"),
            EvalError::LiteralOverflow(lit) => write!(f, "number literal `{}` is too large", lit),
            EvalError::StackUnderflow => write!(f, "operator is missing an operand"),
            EvalError::StrayToken(tok) => write!(f, "`{}` cannot appear in a postfix expression", tok),
            EvalError::LeftoverOperands(n) => {
                write!(f, "{} operands left on the stack, expected exactly 1", n)
            }
        }
    }
}

impl std::error::Error for EvalError {}
