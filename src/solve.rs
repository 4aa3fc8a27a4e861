use crate::{algebra::EvaluationError, Equation, Options};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Solve a linear equation in `x` using the default [`Options`].
pub fn solve(line: &str) -> Result<Solution, SolveError> {
    solve_with(line, &Options::default())
}

pub fn solve_with(
    line: &str,
    options: &Options,
) -> Result<Solution, SolveError> {
    Equation::parse_with(line, options)?.solve()
}

/// Solve an equation and describe the outcome in a human-readable form.
///
/// Failures are described too, so this never fails.
pub fn solve_to_string(line: &str) -> String {
    solve_to_string_with(line, &Options::default())
}

pub fn solve_to_string_with(line: &str, options: &Options) -> String {
    match solve_with(line, options) {
        Ok(solution) => format!("{:.*}", options.precision, solution),
        Err(e) => e.to_string(),
    }
}

/// Classify `a·x = b`.
pub(crate) fn classify(a: i64, b: i64) -> Result<Solution, SolveError> {
    log::debug!("Solving {}x = {}", a, b);

    if a == 0 {
        return Ok(if b == 0 {
            Solution::Infinite
        } else {
            Solution::NoSolution
        });
    }

    match b.checked_rem(a) {
        Some(0) => Ok(Solution::Exact(b / a)),
        Some(_) => Solution::fraction(b, a),
        None => Err(EvaluationError::Overflow.into()),
    }
}

/// The outcome of solving an equation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Solution {
    /// `x` is a whole number.
    Exact(i64),
    /// `x` is a fraction, kept in lowest terms with a positive denominator.
    Fraction { numerator: i64, denominator: i64 },
    /// Every `x` satisfies the equation (e.g. `x = x`).
    Infinite,
    /// No `x` satisfies the equation (e.g. `x = x + 1`).
    NoSolution,
}

impl Solution {
    fn fraction(
        numerator: i64,
        denominator: i64,
    ) -> Result<Solution, SolveError> {
        let divisor =
            gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i64;
        let (mut numerator, mut denominator) =
            (numerator / divisor, denominator / divisor);

        if denominator < 0 {
            numerator = numerator
                .checked_neg()
                .ok_or(EvaluationError::Overflow)?;
            denominator = denominator
                .checked_neg()
                .ok_or(EvaluationError::Overflow)?;
        }

        Ok(Solution::Fraction {
            numerator,
            denominator,
        })
    }

    /// The value of `x`, if there is exactly one.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Solution::Exact(x) => Some(x as f64),
            Solution::Fraction {
                numerator,
                denominator,
            } => Some(numerator as f64 / denominator as f64),
            Solution::Infinite | Solution::NoSolution => None,
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }

    a
}

impl Display for Solution {
    /// Fractions are written as decimals using the formatter's precision
    /// (defaulting to [`Options::DEFAULT_PRECISION`]).
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Exact(x) => write!(f, "x = {}", x),
            Solution::Fraction {
                numerator,
                denominator,
            } => {
                let precision =
                    f.precision().unwrap_or(Options::DEFAULT_PRECISION);
                write!(f, "x = ")?;
                write_decimal(f, *numerator, *denominator, precision)
            },
            Solution::Infinite => write!(f, "Infinite solutions"),
            Solution::NoSolution => write!(f, "No solution"),
        }
    }
}

/// Write `numerator/denominator` as a decimal using exact long division,
/// rounding half away from zero in the last place.
fn write_decimal(
    f: &mut Formatter<'_>,
    numerator: i64,
    denominator: i64,
    precision: usize,
) -> fmt::Result {
    let denominator = u128::from(denominator.unsigned_abs());
    let numerator_magnitude = u128::from(numerator.unsigned_abs());

    let mut whole = numerator_magnitude / denominator;
    let mut remainder = numerator_magnitude % denominator;
    let mut digits = Vec::with_capacity(precision);

    for _ in 0..precision {
        remainder *= 10;
        digits.push((remainder / denominator) as u8);
        remainder %= denominator;
    }

    if remainder * 2 >= denominator {
        // propagate the carry from the last digit
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            whole += 1;
        }
    }

    if numerator < 0 {
        write!(f, "-")?;
    }
    write!(f, "{}", whole)?;

    if !digits.is_empty() {
        write!(f, ".")?;
        for digit in digits {
            write!(f, "{}", digit)?;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The text didn't contain exactly one `=`.
    InvalidEquation { equals_signs: usize },
    Eval(EvaluationError),
}

impl From<EvaluationError> for SolveError {
    fn from(e: EvaluationError) -> Self { SolveError::Eval(e) }
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidEquation { .. } => {
                write!(f, "Not a valid equation")
            },
            SolveError::Eval(inner) => write!(f, "{}", inner),
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolveError::Eval(inner) => Some(inner),
            _ => None,
        }
    }
}
