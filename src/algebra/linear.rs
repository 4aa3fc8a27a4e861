use crate::{algebra::EvaluationError, options::DivisionPolicy, Options};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A linear value, `a·x + b`.
///
/// Every operation is checked. Anything which would take the value out of
/// linear form (e.g. `x*x` or `1/x`) or overflow an `i64` is reported as an
/// [`EvaluationError`] instead of silently producing the wrong answer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Linear {
    /// The coefficient of `x`, `a`.
    pub coefficient: i64,
    /// The constant term, `b`.
    pub constant: i64,
}

impl Linear {
    pub const fn new(coefficient: i64, constant: i64) -> Self {
        Linear {
            coefficient,
            constant,
        }
    }

    pub const fn zero() -> Self { Linear::new(0, 0) }

    /// The unknown itself, `1·x + 0`.
    pub const fn x() -> Self { Linear::new(1, 0) }

    pub const fn from_constant(constant: i64) -> Self {
        Linear::new(0, constant)
    }

    /// Does this value not depend on `x`?
    pub fn is_constant(&self) -> bool { self.coefficient == 0 }

    pub fn checked_add(self, rhs: Linear) -> Result<Linear, EvaluationError> {
        Ok(Linear::new(
            checked(self.coefficient.checked_add(rhs.coefficient))?,
            checked(self.constant.checked_add(rhs.constant))?,
        ))
    }

    pub fn checked_sub(self, rhs: Linear) -> Result<Linear, EvaluationError> {
        Ok(Linear::new(
            checked(self.coefficient.checked_sub(rhs.coefficient))?,
            checked(self.constant.checked_sub(rhs.constant))?,
        ))
    }

    /// Multiply two values, distributing `(a1·x + b1)(a2·x + b2)`.
    ///
    /// At most one side may depend on `x`, otherwise we'd end up with an
    /// `x²` term.
    pub fn checked_mul(self, rhs: Linear) -> Result<Linear, EvaluationError> {
        if !self.is_constant() && !rhs.is_constant() {
            return Err(EvaluationError::NonLinearResult);
        }

        let coefficient = checked(
            checked(self.coefficient.checked_mul(rhs.constant))?
                .checked_add(checked(
                    self.constant.checked_mul(rhs.coefficient),
                )?),
        )?;
        let constant = checked(self.constant.checked_mul(rhs.constant))?;

        Ok(Linear::new(coefficient, constant))
    }

    /// Divide both terms by a constant.
    ///
    /// Integer division truncates towards zero unless the `policy` says
    /// inexact quotients should be rejected.
    pub fn checked_div(
        self,
        rhs: Linear,
        policy: DivisionPolicy,
    ) -> Result<Linear, EvaluationError> {
        if !rhs.is_constant() {
            return Err(EvaluationError::DivisionByVariable);
        }

        let divisor = rhs.constant;
        if divisor == 0 {
            return Err(EvaluationError::DivisionByZero);
        }

        let quotient = Linear::new(
            checked(self.coefficient.checked_div(divisor))?,
            checked(self.constant.checked_div(divisor))?,
        );

        let exact =
            self.coefficient % divisor == 0 && self.constant % divisor == 0;
        if !exact && policy == DivisionPolicy::Reject {
            return Err(EvaluationError::InexactDivision);
        }

        Ok(quotient)
    }

    pub fn checked_neg(self) -> Result<Linear, EvaluationError> {
        Ok(Linear::new(
            checked(self.coefficient.checked_neg())?,
            checked(self.constant.checked_neg())?,
        ))
    }

    /// Combine `self` and `rhs` using a binary operator.
    pub fn apply(
        self,
        op: BinaryOperation,
        rhs: Linear,
        options: &Options,
    ) -> Result<Linear, EvaluationError> {
        match op {
            BinaryOperation::Plus => self.checked_add(rhs),
            BinaryOperation::Minus => self.checked_sub(rhs),
            BinaryOperation::Times => self.checked_mul(rhs),
            BinaryOperation::Divide => {
                self.checked_div(rhs, options.inexact_division)
            },
        }
    }
}

fn checked(value: Option<i64>) -> Result<i64, EvaluationError> {
    value.ok_or(EvaluationError::Overflow)
}

impl FromStr for Linear {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::algebra::evaluate(s, &Options::default())
    }
}

impl Display for Linear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Linear {
            coefficient,
            constant,
        } = *self;

        match coefficient {
            0 => return write!(f, "{}", constant),
            1 => write!(f, "x")?,
            -1 => write!(f, "-x")?,
            other => write!(f, "{}x", other)?,
        }

        if constant > 0 {
            write!(f, " + {}", constant)
        } else if constant < 0 {
            write!(f, " - {}", constant.unsigned_abs())
        } else {
            Ok(())
        }
    }
}

/// An operation that can be applied to two arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperation {
    Plus,
    Minus,
    Times,
    Divide,
}

impl Display for BinaryOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperation::Plus => write!(f, "+"),
            BinaryOperation::Minus => write!(f, "-"),
            BinaryOperation::Times => write!(f, "*"),
            BinaryOperation::Divide => write!(f, "/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let inputs = vec![
            (Linear::zero(), "0"),
            (Linear::from_constant(3), "3"),
            (Linear::from_constant(-3), "-3"),
            (Linear::x(), "x"),
            (Linear::new(-1, 0), "-x"),
            (Linear::new(2, 0), "2x"),
            (Linear::new(3, 2), "3x + 2"),
            (Linear::new(-1, -4), "-x - 4"),
            (Linear::new(-12, 7), "-12x + 7"),
        ];

        for (value, should_be) in inputs {
            let got = value.to_string();
            assert_eq!(got, should_be);
        }
    }

    #[test]
    fn parsing_the_display_form_gives_back_the_original() {
        let values = [
            i64::MIN,
            i64::MIN + 1,
            -1000,
            -17,
            -2,
            -1,
            0,
            1,
            2,
            9,
            250,
            i64::MAX,
        ];

        for &coefficient in &values {
            for &constant in &values {
                let original = Linear::new(coefficient, constant);

                let got: Linear = original.to_string().parse().unwrap();

                assert_eq!(got, original, "{}", original);
            }
        }
    }

    #[test]
    fn multiplication_distributes_over_the_unknown() {
        let two_x_plus_three = Linear::new(2, 3);
        let four = Linear::from_constant(4);

        assert_eq!(
            two_x_plus_three.checked_mul(four).unwrap(),
            Linear::new(8, 12)
        );
        assert_eq!(
            four.checked_mul(two_x_plus_three).unwrap(),
            Linear::new(8, 12)
        );
    }

    #[test]
    fn x_squared_is_not_linear() {
        let got = Linear::x().checked_mul(Linear::new(2, 1));

        assert_eq!(got, Err(EvaluationError::NonLinearResult));
    }

    #[test]
    fn dividing_by_the_unknown_is_an_error() {
        let got = Linear::from_constant(4)
            .checked_div(Linear::x(), DivisionPolicy::Truncate);

        assert_eq!(got, Err(EvaluationError::DivisionByVariable));
    }

    #[test]
    fn dividing_by_zero_is_an_error() {
        let got = Linear::new(1, 4)
            .checked_div(Linear::zero(), DivisionPolicy::Truncate);

        assert_eq!(got, Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn inexact_division_follows_the_policy() {
        let numerator = Linear::new(3, -7);
        let two = Linear::from_constant(2);

        assert_eq!(
            numerator.checked_div(two, DivisionPolicy::Truncate),
            Ok(Linear::new(1, -3))
        );
        assert_eq!(
            numerator.checked_div(two, DivisionPolicy::Reject),
            Err(EvaluationError::InexactDivision)
        );
        assert_eq!(
            Linear::new(4, -8).checked_div(two, DivisionPolicy::Reject),
            Ok(Linear::new(2, -4))
        );
    }

    #[test]
    fn overflow_is_reported() {
        let big = Linear::from_constant(i64::MAX);

        assert_eq!(
            big.checked_add(Linear::from_constant(1)),
            Err(EvaluationError::Overflow)
        );
        assert_eq!(
            Linear::new(i64::MIN, 0).checked_neg(),
            Err(EvaluationError::Overflow)
        );
        assert_eq!(
            Linear::from_constant(i64::MIN)
                .checked_div(Linear::from_constant(-1), DivisionPolicy::Reject),
            Err(EvaluationError::Overflow)
        );
    }
}
