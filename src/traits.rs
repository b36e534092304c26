//! Capability traits shared by the distribution types
use crate::error::Result;
use rand::Rng;

/// The probability of observing `data` under a hypothesis, *p(D|H)*.
///
/// Implementations must be pure: [`Suite::update`](crate::Suite::update)
/// calls `likelihood` once per hypothesis per observation and may call it
/// again with the same arguments in later updates. A return value of zero
/// marks the data as impossible under `hypo`.
///
/// Any `Fn(&D, &H) -> f64` closure is a `Likelihood`.
///
/// # Example
///
/// ```
/// use thinkbayes::Likelihood;
///
/// struct Dice;
///
/// impl Likelihood<u32, u32> for Dice {
///     fn likelihood(&self, roll: &u32, sides: &u32) -> f64 {
///         if sides < roll {
///             0.0
///         } else {
///             1.0 / f64::from(*sides)
///         }
///     }
/// }
///
/// assert_eq!(Dice.likelihood(&6, &4), 0.0);
/// assert_eq!(Dice.likelihood(&6, &8), 0.125);
/// ```
pub trait Likelihood<H, D: ?Sized> {
    fn likelihood(&self, data: &D, hypo: &H) -> f64;
}

impl<H, D: ?Sized, F> Likelihood<H, D> for F
where
    F: Fn(&D, &H) -> f64,
{
    fn likelihood(&self, data: &D, hypo: &H) -> f64 {
        self(data, hypo)
    }
}

/// A distribution that can be drawn from
pub trait Sampleable<H> {
    /// Single draw, with probability proportional to mass
    fn draw<R: Rng>(&self, rng: &mut R) -> Result<H>;

    /// Multiple draws
    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Vec<H>> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

/// Percentile queries over an ordered hypothesis space
pub trait Quantile<H> {
    /// The smallest hypothesis whose cumulative mass is at least `p`/100,
    /// for `p` in [0, 100].
    ///
    /// # Errors
    ///
    /// - [`BayesError::OutOfRange`](crate::BayesError::OutOfRange) if `p` is
    ///   outside [0, 100] or NaN
    /// - [`BayesError::EmptyDistribution`](crate::BayesError::EmptyDistribution)
    ///   if there are no hypotheses
    fn percentile(&self, p: f64) -> Result<&H>;

    /// The central interval containing `percentage`% of the mass
    fn credible_interval(&self, percentage: f64) -> Result<(&H, &H)> {
        crate::error::BayesError::check_range(percentage, 0.0, 100.0)?;
        let tail = (100.0 - percentage) / 2.0;
        Ok((self.percentile(tail)?, self.percentile(100.0 - tail)?))
    }

    /// The 50th percentile
    fn median(&self) -> Result<&H> {
        self.percentile(50.0)
    }
}
