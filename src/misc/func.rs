use crate::error::{BayesError, Result};
use rand::Rng;
use std::ops::AddAssign;

/// Cumulative sum of `xs`
///
/// # Example
///
/// ```rust
/// # use thinkbayes::misc::cumsum;
/// let xs: Vec<i32> = vec![1, 1, 2, 1];
/// assert_eq!(cumsum(&xs), vec![1, 2, 4, 5]);
/// ```
pub fn cumsum<T>(xs: &[T]) -> Vec<T>
where
    T: AddAssign + Copy + Default,
{
    xs.iter()
        .scan(T::default(), |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Index of the first cumulative weight that is at least `r`, or `None` if
/// every weight falls short.
#[inline]
pub(crate) fn first_at_least(cws: &[f64], r: f64) -> Option<usize> {
    let ix = cws.partition_point(|&w| w < r);
    if ix < cws.len() {
        Some(ix)
    } else {
        None
    }
}

// First bucket whose upper edge is strictly above `r`. Zero-width buckets are
// never chosen.
#[inline]
fn catflip(cws: &[f64], r: f64) -> Option<usize> {
    let ix = cws.partition_point(|&w| w <= r);
    if ix < cws.len() {
        Some(ix)
    } else {
        None
    }
}

/// Draw `n` indices in proportion to their `weights`
///
/// The weights need not sum to one.
///
/// # Example
///
/// ```rust
/// use thinkbayes::misc::pflip;
///
/// let weights: Vec<f64> = vec![0.4, 0.0, 0.3, 0.1];
/// let ixs = pflip(&weights, 100, &mut rand::thread_rng()).unwrap();
///
/// assert_eq!(ixs.len(), 100);
/// assert!(ixs.iter().all(|&ix| ix != 1 && ix <= 3));
/// ```
pub fn pflip<R: Rng>(
    weights: &[f64],
    n: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let cws: Vec<f64> = cumsum(weights);
    let scale = match cws.last() {
        None => return Err(BayesError::EmptyDistribution),
        Some(&total) if total > 0.0 => total,
        Some(_) => return Err(BayesError::ZeroMass),
    };
    let last_nonzero = weights
        .iter()
        .rposition(|&w| w > 0.0)
        .ok_or(BayesError::ZeroMass)?;

    let ixs = (0..n)
        .map(|_| {
            let r = rng.gen::<f64>() * scale;
            // Rounding can push r onto the final edge.
            catflip(&cws, r).unwrap_or(last_nonzero)
        })
        .collect();
    Ok(ixs)
}
