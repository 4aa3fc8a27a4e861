/// Knobs for tweaking how equations are evaluated and reported.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Options {
    /// What to do when an intermediate division isn't exact (e.g. `7/2`).
    pub inexact_division: DivisionPolicy,
    /// The number of decimal places used when a solution isn't a whole
    /// number.
    pub precision: usize,
}

impl Options {
    pub const DEFAULT_PRECISION: usize = 6;

    pub fn with_inexact_division(mut self, policy: DivisionPolicy) -> Self {
        self.inexact_division = policy;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            inexact_division: DivisionPolicy::default(),
            precision: Options::DEFAULT_PRECISION,
        }
    }
}

/// How integer division handles a remainder.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DivisionPolicy {
    /// Round towards zero, so `7/2` is `3` and `-7/2` is `-3`.
    Truncate,
    /// Fail with [`crate::EvaluationError::InexactDivision`].
    Reject,
}

impl Default for DivisionPolicy {
    fn default() -> Self { DivisionPolicy::Truncate }
}
