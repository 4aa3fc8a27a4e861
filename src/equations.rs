use crate::{
    algebra::{self, EvaluationError, Linear},
    solve::{Solution, SolveError},
    Options,
};
use std::str::FromStr;

/// A linear equation, `left = right`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Equation {
    pub left: Linear,
    pub right: Linear,
}

impl Equation {
    pub fn new(left: Linear, right: Linear) -> Self { Equation { left, right } }

    /// Parse an equation containing exactly one `=`, evaluating both sides.
    pub fn parse_with(s: &str, options: &Options) -> Result<Self, SolveError> {
        let equals_signs = s.matches('=').count();

        match s.find('=') {
            Some(index) if equals_signs == 1 => {
                let (left, right) = s.split_at(index);
                let right = &right[1..];

                Ok(Equation::new(
                    algebra::evaluate(left, options)?,
                    algebra::evaluate(right, options)?,
                ))
            },
            _ => Err(SolveError::InvalidEquation { equals_signs }),
        }
    }

    /// The `a` in `a·x = b` after moving everything involving `x` to the
    /// left.
    pub fn coefficient(&self) -> Result<i64, EvaluationError> {
        self.left
            .coefficient
            .checked_sub(self.right.coefficient)
            .ok_or(EvaluationError::Overflow)
    }

    /// The `b` in `a·x = b` after moving all constants to the right.
    pub fn constant(&self) -> Result<i64, EvaluationError> {
        self.right
            .constant
            .checked_sub(self.left.constant)
            .ok_or(EvaluationError::Overflow)
    }

    pub fn solve(&self) -> Result<Solution, SolveError> {
        crate::solve::classify(self.coefficient()?, self.constant()?)
    }
}

impl FromStr for Equation {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Equation::parse_with(s, &Options::default())
    }
}
