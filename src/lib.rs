//! Solve linear equations in a single unknown, `x`.
//!
//! Each side of an equation is reduced to the canonical form `a·x + b` (a
//! [`Linear`]) by a two-stack operator precedence evaluator, then the two
//! sides are combined into `a·x = b` and classified.
//!
//! ```rust
//! use linear_equations::{solve, solve_to_string, Solution};
//!
//! assert_eq!(solve("3 * -2 = -2x / -1").unwrap(), Solution::Exact(-3));
//! assert_eq!(solve_to_string("x + 3 = x + 6"), "No solution");
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod algebra;
mod equations;
mod options;
mod solve;

pub use algebra::{
    evaluate, tokenize, BinaryOperation, EvaluationError, Linear, ParseError,
    Token, TokenKind,
};
pub use equations::Equation;
pub use options::{DivisionPolicy, Options};
pub use solve::{
    solve, solve_to_string, solve_to_string_with, solve_with, Solution,
    SolveError,
};
