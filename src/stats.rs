//! Summary statistics that work on any [`Pmf`]
use crate::error::{BayesError, Result};
use crate::pmf::Pmf;
use crate::suite::Suite;
use crate::traits::Likelihood;
use itertools::Itertools;
use std::hash::Hash;

/// The smallest hypothesis whose cumulative mass is at least `p`/100.
///
/// Scans the hypotheses in ascending order, accumulating mass as it goes.
/// Gives exactly the same answer as building a [`Cdf`](crate::Cdf) and
/// calling `percentile` on it: both sum in the same order and use the same
/// comparison. If rounding leaves the running total short of `p`/100, the
/// largest hypothesis is returned.
///
/// # Errors
///
/// - [`BayesError::OutOfRange`] if `p` is outside [0, 100] or NaN
/// - [`BayesError::EmptyDistribution`] if `pmf` has no hypotheses
///
/// # Example
///
/// ```
/// use thinkbayes::{stats, Pmf};
///
/// let mut pmf = Pmf::from_hypos(0..=100_u32);
/// pmf.normalize().unwrap();
///
/// assert_eq!(stats::percentile(&pmf, 50.0), Ok(&50));
/// ```
pub fn percentile<H: Ord>(pmf: &Pmf<H>, p: f64) -> Result<&H> {
    BayesError::check_range(p, 0.0, 100.0)?;
    let target = p / 100.0;

    let mut total = 0.0;
    let mut largest = None;
    for (x, mass) in pmf.items().sorted_by(|a, b| a.0.cmp(b.0)) {
        total += mass;
        if total >= target {
            return Ok(x);
        }
        largest = Some(x);
    }
    largest.ok_or(BayesError::EmptyDistribution)
}

/// The central interval containing `percentage`% of the mass of `pmf`.
///
/// Equivalent to `(percentile(pmf, (100 - percentage) / 2),
/// percentile(pmf, 100 - (100 - percentage) / 2))`.
///
/// # Example
///
/// ```
/// use thinkbayes::{stats, Pmf};
///
/// let mut pmf = Pmf::from_hypos(1..=100_u32);
/// pmf.normalize().unwrap();
///
/// let (lower, upper) = stats::credible_interval(&pmf, 90.0).unwrap();
/// assert_eq!((*lower, *upper), (5, 95));
/// ```
pub fn credible_interval<H: Ord>(
    pmf: &Pmf<H>,
    percentage: f64,
) -> Result<(&H, &H)> {
    BayesError::check_range(percentage, 0.0, 100.0)?;
    let tail = (100.0 - percentage) / 2.0;
    Ok((percentile(pmf, tail)?, percentile(pmf, 100.0 - tail)?))
}

/// Build a [`Suite`] with a uniform prior over `hypos` and update it with
/// every observation in `dataset`, in order.
///
/// # Example
///
/// ```
/// use thinkbayes::stats::make_posterior;
///
/// let train = |n_seen: &u32, n: &u32| {
///     if n < n_seen { 0.0 } else { 1.0 / f64::from(*n) }
/// };
/// let suite = make_posterior(1..=1000_u32, &[60], train).unwrap();
///
/// assert::close(suite.mean().unwrap(), 333.42, 0.01);
/// ```
pub fn make_posterior<'a, H, D, L, I, Ds>(
    hypos: I,
    dataset: Ds,
    likelihood: L,
) -> Result<Suite<H, L>>
where
    H: Eq + Hash + Clone,
    D: 'a + ?Sized,
    L: Likelihood<H, D>,
    I: IntoIterator<Item = H>,
    Ds: IntoIterator<Item = &'a D>,
{
    let mut suite = Suite::new(hypos, likelihood)?;
    suite.update_set(dataset)?;
    Ok(suite)
}
