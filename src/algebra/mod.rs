//! The symbolic algebra system.

mod linear;
pub mod ops;
mod parse;

pub use linear::{BinaryOperation, Linear};
pub use ops::{evaluate, evaluate_tokens, EvaluationError};
pub use parse::{tokenize, ParseError, Token, TokenKind};
