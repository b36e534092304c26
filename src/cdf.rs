//! Cumulative distribution built from a [`Pmf`] snapshot
use crate::error::{BayesError, Result};
use crate::misc::first_at_least;
use crate::pmf::Pmf;
use crate::traits::{Quantile, Sampleable};
use itertools::Itertools;
use rand::Rng;
use tracing::trace;

/// Hypotheses in ascending order paired with their cumulative mass.
///
/// The final cumulative value equals the total mass of the source `Pmf`; it
/// is only one if the `Pmf` was normalized. A `Cdf` does not track later
/// changes to its source.
///
/// # Example
///
/// ```
/// use thinkbayes::{Pmf, Quantile};
///
/// let mut pmf = Pmf::from_hypos(1..=4_u8);
/// pmf.normalize().unwrap();
///
/// let cdf = pmf.make_cdf();
///
/// assert_eq!(cdf.percentile(50.0), Ok(&2));
/// assert_eq!(cdf.value(0.51), Ok(&3));
/// assert::close(cdf.prob(&3), 0.75, 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Cdf<H> {
    xs: Vec<H>,
    ps: Vec<f64>,
}

impl<H: Ord + Clone> Cdf<H> {
    /// Sort the hypotheses of `pmf` and accumulate their mass
    pub fn from_pmf(pmf: &Pmf<H>) -> Self {
        let (xs, ps): (Vec<H>, Vec<f64>) = pmf
            .items()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .scan(0.0, |total, (x, p)| {
                *total += p;
                Some((x.clone(), *total))
            })
            .unzip();
        trace!(n = xs.len(), "built cdf");
        Cdf { xs, ps }
    }
}

impl<H> Cdf<H> {
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// `(hypothesis, cumulative mass)` pairs in ascending order
    pub fn items(&self) -> impl Iterator<Item = (&H, f64)> + '_ {
        self.xs.iter().zip(self.ps.iter().copied())
    }

    /// Total mass, i.e. the last cumulative value
    pub fn total(&self) -> f64 {
        self.ps.last().copied().unwrap_or(0.0)
    }

    /// The smallest hypothesis whose cumulative mass is at least `fraction`,
    /// for `fraction` in [0, 1].
    ///
    /// If rounding leaves every cumulative value short of `fraction` the
    /// largest hypothesis is returned.
    ///
    /// # Errors
    ///
    /// - [`BayesError::OutOfRange`] if `fraction` is outside [0, 1] or NaN
    /// - [`BayesError::EmptyDistribution`] if there are no hypotheses
    pub fn value(&self, fraction: f64) -> Result<&H> {
        BayesError::check_range(fraction, 0.0, 1.0)?;
        let last = self.xs.last().ok_or(BayesError::EmptyDistribution)?;
        Ok(first_at_least(&self.ps, fraction).map_or(last, |ix| &self.xs[ix]))
    }

    /// Cumulative mass of every hypothesis less than or equal to `x`
    pub fn prob(&self, x: &H) -> f64
    where
        H: Ord,
    {
        match self.xs.partition_point(|h| h <= x) {
            0 => 0.0,
            ix => self.ps[ix - 1],
        }
    }

    /// `prob(x)` on the 0-100 scale
    pub fn percentile_rank(&self, x: &H) -> f64
    where
        H: Ord,
    {
        100.0 * self.prob(x)
    }
}

impl<H> Quantile<H> for Cdf<H> {
    fn percentile(&self, p: f64) -> Result<&H> {
        BayesError::check_range(p, 0.0, 100.0)?;
        self.value(p / 100.0)
    }
}

impl<H: Clone> Sampleable<H> for Cdf<H> {
    /// Inverse-transform draw
    fn draw<R: Rng>(&self, rng: &mut R) -> Result<H> {
        let total = self.total();
        if self.is_empty() {
            return Err(BayesError::EmptyDistribution);
        } else if total <= 0.0 {
            return Err(BayesError::ZeroMass);
        }
        let r = rng.gen::<f64>() * total;
        let ix = self.ps.partition_point(|&w| w <= r).min(self.len() - 1);
        Ok(self.xs[ix].clone())
    }
}
