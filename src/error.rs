//! Errors raised by distributions and the update loop
use std::fmt;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, BayesError>;

#[derive(Debug, Clone, PartialEq)]
pub enum BayesError {
    /// Every hypothesis has zero mass, so the distribution cannot be
    /// normalized. Raised when the observed data contradict the support of
    /// the prior.
    ZeroMass,
    /// A strict lookup or multiply named a hypothesis that is not a member of
    /// the distribution
    AbsentHypothesis,
    /// A percentile, fraction, or percentage was outside its domain
    OutOfRange { value: f64, min: f64, max: f64 },
    /// The statistic is undefined for a distribution with no hypotheses
    EmptyDistribution,
    /// A hypothesis has no `f64` representation
    NonNumericHypothesis,
    /// A mass, factor, or likelihood was negative, infinite, or NaN
    InvalidMass { mass: f64 },
}

impl BayesError {
    /// Check that `value` is in `[min, max]`. NaN is always out of range.
    pub(crate) fn check_range(value: f64, min: f64, max: f64) -> Result<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(BayesError::OutOfRange { value, min, max })
        }
    }

    /// Check that `mass` is a usable probability mass
    pub(crate) fn check_mass(mass: f64) -> Result<f64> {
        if mass.is_finite() && mass >= 0.0 {
            Ok(mass)
        } else {
            Err(BayesError::InvalidMass { mass })
        }
    }
}

impl fmt::Display for BayesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMass => {
                write!(f, "total probability mass is zero; cannot normalize")
            }
            Self::AbsentHypothesis => {
                write!(f, "hypothesis is not a member of the distribution")
            }
            Self::OutOfRange { value, min, max } => {
                write!(f, "{} is outside the range [{}, {}]", value, min, max)
            }
            Self::EmptyDistribution => {
                write!(f, "distribution has no hypotheses")
            }
            Self::NonNumericHypothesis => {
                write!(f, "hypothesis cannot be converted to f64")
            }
            Self::InvalidMass { mass } => {
                write!(f, "invalid probability mass: {}", mass)
            }
        }
    }
}

impl std::error::Error for BayesError {}
