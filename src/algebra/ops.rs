//! Evaluating an expression down to a single [`Linear`] value.

use crate::{
    algebra::{tokenize, BinaryOperation, Linear, ParseError, Token, TokenKind},
    Options,
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Reduce some text (one side of an equation) to `a·x + b`.
///
/// An empty expression evaluates to `0`.
pub fn evaluate(
    src: &str,
    options: &Options,
) -> Result<Linear, EvaluationError> {
    let tokens = tokenize(src)?;
    let value = evaluate_tokens(&tokens, options)?;
    log::debug!("Evaluated \"{}\" as {}", src.trim(), value);

    Ok(value)
}

/// Evaluate an already normalized token stream using the classic two-stack
/// (operands and operators) precedence reduction.
///
/// Operators are reduced as soon as an operator of lower or equal priority
/// arrives, which gives us left-associative binary operators. Unary negation
/// is pushed without reducing anything because it has no left operand, so
/// chains like `--x` nest to the right.
///
/// A minus sign directly in front of a number is folded into the literal
/// (`a - 5` is `a + (-5)`), letting `i64::MIN` be written out.
pub fn evaluate_tokens(
    tokens: &[Token<'_>],
    options: &Options,
) -> Result<Linear, EvaluationError> {
    if tokens.is_empty() {
        return Ok(Linear::zero());
    }

    let mut stacks = Stacks::new(options);
    let mut tokens = tokens.iter().peekable();

    while let Some(token) = tokens.next() {
        let negates_a_number =
            matches!(token.kind, TokenKind::Minus | TokenKind::Negate)
                && tokens.peek().map(|t| t.kind) == Some(TokenKind::Number);

        if negates_a_number {
            if token.kind == TokenKind::Minus {
                stacks.push_binary(BinaryOperation::Plus)?;
            }
            if let Some(number) = tokens.next() {
                stacks.operands.push(number.negated_literal()?);
            }
            continue;
        }

        match token.kind {
            TokenKind::Number => stacks.operands.push(token.literal()?),
            TokenKind::OpenParen => stacks.operators.push(Operator::OpenParen),
            TokenKind::CloseParen => {
                stacks.reduce(0)?;

                match stacks.operators.pop() {
                    Some(Operator::OpenParen) => {},
                    _ => return Err(EvaluationError::MalformedExpression),
                }
            },
            TokenKind::Negate => stacks.operators.push(Operator::Negate),
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Times
            | TokenKind::Divide => {
                stacks.push_binary(as_binary_op(token.kind))?;
            },
        }
    }

    stacks.reduce(0)?;
    stacks.finish()
}

fn as_binary_op(kind: TokenKind) -> BinaryOperation {
    match kind {
        TokenKind::Plus => BinaryOperation::Plus,
        TokenKind::Minus => BinaryOperation::Minus,
        TokenKind::Times => BinaryOperation::Times,
        TokenKind::Divide => BinaryOperation::Divide,
        other => unreachable!("{:?} is not a binary op", other),
    }
}

/// Things which can live on the operator stack.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Operator {
    Binary(BinaryOperation),
    Negate,
    OpenParen,
}

impl Operator {
    fn priority(self) -> u8 {
        match self {
            Operator::Binary(BinaryOperation::Plus)
            | Operator::Binary(BinaryOperation::Minus) => 1,
            Operator::Binary(BinaryOperation::Times)
            | Operator::Binary(BinaryOperation::Divide) => 2,
            Operator::Negate => 3,
            Operator::OpenParen => 4,
        }
    }
}

/// The parser state for a single evaluation.
#[derive(Debug)]
struct Stacks<'o> {
    operands: Vec<Linear>,
    operators: Vec<Operator>,
    options: &'o Options,
}

impl<'o> Stacks<'o> {
    fn new(options: &'o Options) -> Self {
        Stacks {
            operands: Vec::new(),
            operators: Vec::new(),
            options,
        }
    }

    /// Push a binary operator after reducing everything on the stack which
    /// binds at least as tightly.
    fn push_binary(
        &mut self,
        op: BinaryOperation,
    ) -> Result<(), EvaluationError> {
        let op = Operator::Binary(op);
        self.reduce(op.priority())?;
        self.operators.push(op);

        Ok(())
    }

    /// Apply every operator on top of the stack with at least `priority`,
    /// stopping at the nearest `(`.
    fn reduce(&mut self, priority: u8) -> Result<(), EvaluationError> {
        while let Some(&top) = self.operators.last() {
            if top == Operator::OpenParen || top.priority() < priority {
                break;
            }

            self.operators.pop();
            let result = self.apply(top)?;
            self.operands.push(result);
        }

        Ok(())
    }

    fn apply(&mut self, op: Operator) -> Result<Linear, EvaluationError> {
        match op {
            Operator::Negate => {
                let operand = self.pop_operand()?;
                log::trace!("-({})", operand);
                operand.checked_neg()
            },
            Operator::Binary(op) => {
                let right = self.pop_operand()?;
                let left = self.pop_operand()?;
                log::trace!("({}) {} ({})", left, op, right);
                left.apply(op, right, self.options)
            },
            Operator::OpenParen => {
                unreachable!("Parentheses are never applied")
            },
        }
    }

    fn pop_operand(&mut self) -> Result<Linear, EvaluationError> {
        self.operands
            .pop()
            .ok_or(EvaluationError::MalformedExpression)
    }

    /// Check we've reduced everything down to exactly one value.
    fn finish(mut self) -> Result<Linear, EvaluationError> {
        if !self.operators.is_empty() || self.operands.len() != 1 {
            return Err(EvaluationError::MalformedExpression);
        }

        self.pop_operand()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    Parse(ParseError),
    /// The operators and operands didn't reduce to a single value (e.g.
    /// `2 +` or unbalanced parentheses).
    MalformedExpression,
    /// Tried to divide by something which depends on `x`.
    DivisionByVariable,
    DivisionByZero,
    /// A division wasn't exact and the options say to reject it.
    InexactDivision,
    /// A multiplication would have introduced an `x²` term.
    NonLinearResult,
    Overflow,
}

impl From<ParseError> for EvaluationError {
    fn from(e: ParseError) -> Self { EvaluationError::Parse(e) }
}

impl Display for EvaluationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::Parse(inner) => write!(f, "{}", inner),
            EvaluationError::MalformedExpression => {
                write!(f, "Malformed expression")
            },
            EvaluationError::DivisionByVariable => {
                write!(f, "Unable to divide by an expression containing x")
            },
            EvaluationError::DivisionByZero => write!(f, "Division by zero"),
            EvaluationError::InexactDivision => {
                write!(f, "The division doesn't give a whole number")
            },
            EvaluationError::NonLinearResult => {
                write!(f, "The equation isn't linear")
            },
            EvaluationError::Overflow => {
                write!(f, "The numbers are too large")
            },
        }
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EvaluationError::Parse(inner) => Some(inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DivisionPolicy;

    fn eval(src: &str) -> Result<Linear, EvaluationError> {
        evaluate(src, &Options::default())
    }

    #[test]
    fn reduce_to_linear_form() {
        let inputs = vec![
            ("", Linear::zero()),
            ("7", Linear::from_constant(7)),
            ("x", Linear::x()),
            ("2+3*4", Linear::from_constant(14)),
            ("(2+3)*4", Linear::from_constant(20)),
            ("x+x+x", Linear::new(3, 0)),
            ("-x+3", Linear::new(-1, 3)),
            ("3--2", Linear::from_constant(5)),
            ("3+-2", Linear::from_constant(1)),
            ("10-4-3", Linear::from_constant(3)),
            ("24/4/2", Linear::from_constant(3)),
            ("3 * -2", Linear::from_constant(-6)),
            ("-2x / -1", Linear::new(2, 0)),
            ("-(4 + x) * 2 + 5x", Linear::new(3, -8)),
            ("3x + 2 * 3 + 2 * (4x + 5)", Linear::new(11, 16)),
            (
                "-(2x + 5*(3 + 4x +(4*-x + 1)) + 3)",
                Linear::new(-2, -23),
            ),
            ("2 * (4x - 2) - 3 * 4", Linear::new(8, -16)),
            ("x*3", Linear::new(3, 0)),
            ("(x+1)/1", Linear::new(1, 1)),
            ("3---2", Linear::from_constant(1)),
            ("2*--x", Linear::new(2, 0)),
            ("-2*-3", Linear::from_constant(6)),
            ("((x))", Linear::x()),
            ("7/2", Linear::from_constant(3)),
            ("-7/2", Linear::from_constant(-3)),
        ];

        for (src, should_be) in inputs {
            let got = eval(src).unwrap();

            assert_eq!(got, should_be, "{}", src);
        }
    }

    #[test]
    fn whitespace_inside_numbers_is_ignored() {
        let inputs = vec![
            ("2 3", Linear::from_constant(23)),
            ("3 x", Linear::new(3, 0)),
            ("1 2 x + 4", Linear::new(12, 4)),
            (" 1\t0 * ( 2 x - 1 ) ", Linear::new(20, -10)),
        ];

        for (src, should_be) in inputs {
            let got = eval(src).unwrap();

            assert_eq!(got, should_be, "{:?}", src);
        }
    }

    #[test]
    fn the_full_i64_range_can_be_written() {
        let inputs = vec![
            ("-9223372036854775808", Linear::from_constant(i64::MIN)),
            ("-9223372036854775808x", Linear::new(i64::MIN, 0)),
            ("x - 9223372036854775808", Linear::new(1, i64::MIN)),
            ("-9223372036854775808 / 4", Linear::from_constant(i64::MIN / 4)),
            ("9223372036854775807x", Linear::new(i64::MAX, 0)),
            ("5 - 3 - 1", Linear::from_constant(1)),
            ("10 - 2 * 3", Linear::from_constant(4)),
        ];

        for (src, should_be) in inputs {
            let got = eval(src).unwrap();

            assert_eq!(got, should_be, "{}", src);
        }
    }

    #[test]
    fn malformed_expressions() {
        let inputs = vec![
            "2 +", "*3", "(1 + 2", "1 + 2)", "()", "x 2", "x(2)", "2xx", "-",
        ];

        for src in inputs {
            let got = eval(src);

            assert_eq!(
                got,
                Err(EvaluationError::MalformedExpression),
                "{}",
                src
            );
        }
    }

    #[test]
    fn domain_errors() {
        let inputs = vec![
            ("x*x", EvaluationError::NonLinearResult),
            ("(x+1)*(2x)", EvaluationError::NonLinearResult),
            ("3/x", EvaluationError::DivisionByVariable),
            ("3/(x-x+0)", EvaluationError::DivisionByZero),
            ("9223372036854775807 + 1", EvaluationError::Overflow),
            (
                "9223372036854775808",
                EvaluationError::Parse(ParseError::NumberOutOfRange {
                    text: "9223372036854775808".into(),
                    span: 0..19,
                }),
            ),
            (
                "2 ^ 3",
                EvaluationError::Parse(ParseError::UnsupportedOperator {
                    character: '^',
                    index: 2,
                }),
            ),
        ];

        for (src, should_be) in inputs {
            let got = eval(src);

            assert_eq!(got, Err(should_be), "{}", src);
        }
    }

    #[test]
    fn inexact_division_can_be_rejected() {
        let options =
            Options::default().with_inexact_division(DivisionPolicy::Reject);

        assert_eq!(
            evaluate("7/2", &options),
            Err(EvaluationError::InexactDivision)
        );
        assert_eq!(evaluate("(4x + 8)/4", &options), Ok(Linear::new(1, 2)));
    }

    #[test]
    fn each_evaluation_starts_from_scratch() {
        // a failed evaluation must not leave anything behind for the next one
        assert!(eval("2 + (3").is_err());

        assert_eq!(eval("x + 1").unwrap(), Linear::new(1, 1));
        assert_eq!(eval("x + 1").unwrap(), Linear::new(1, 1));
    }

    #[test]
    fn errors_chain_to_their_source() {
        let err = eval("1 % 2").unwrap_err();

        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Unsupported operator, \"%\", at index 2"
        );
    }
}
