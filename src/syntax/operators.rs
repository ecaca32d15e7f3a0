use phf::phf_map;

use super::tokens::Operator;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fixity {
    Prefix,
    Infix(Assoc),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Assoc {
    Left,
    Right,
}
impl Assoc {
    pub fn is_left(&self) -> bool {
        self == &Assoc::Left
    }
}

impl Operator {
    pub fn prec(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div | Operator::Rem => 2,
            Operator::Neg => 3,
            Operator::Pow => 4,
        }
    }

    pub fn fixity(self) -> Fixity {
        match self {
            Operator::Neg => Fixity::Prefix,
            Operator::Pow => Fixity::Infix(Assoc::Right),
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Rem => {
                Fixity::Infix(Assoc::Left)
            }
        }
    }

    /// Whether `self`, sitting on the operator stack, must be emitted before `op` is pushed.
    pub fn has_bigger_prec(self, op: Operator) -> bool {
        self.prec() > op.prec() || (self.prec() == op.prec() && op.is_left_assoc())
    }

    pub fn is_prefix(self) -> bool {
        self.fixity() == Fixity::Prefix
    }

    pub fn is_left_assoc(self) -> bool {
        match self.fixity() {
            Fixity::Infix(assoc) => assoc.is_left(),
            Fixity::Prefix => false,
        }
    }
}

/// Operator characters the lexer accepts.
pub const OPERATOR_TABLE: phf::Map<char, Operator> = phf_map! {
    '+' => Operator::Add,
    '-' => Operator::Sub,
    '*' => Operator::Mul,
    '/' => Operator::Div,
    '%' => Operator::Rem,
    '^' => Operator::Pow,
};

/// Only ever read back from postfix text.
pub const UNARY_OPERATOR_TABLE: phf::Map<char, Operator> = phf_map! {
    '~' => Operator::Neg,
};
