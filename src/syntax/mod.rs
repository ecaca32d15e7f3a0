pub mod lexer;

pub mod operators;

pub mod parser;

pub mod postfix;

mod shunting_yard;

pub mod tokens;

pub use lexer::*;
pub use parser::*;
pub use postfix::*;
pub use tokens::*;
