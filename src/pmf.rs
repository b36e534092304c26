//! Probability mass function over an arbitrary hypothesis space
use crate::cdf::Cdf;
use crate::error::{BayesError, Result};
use crate::misc::pflip;
use crate::traits::{Quantile, Sampleable};
use num_traits::ToPrimitive;
use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;

/// A mapping from hypotheses to (possibly unnormalized) probability mass.
///
/// Hypotheses are kept in insertion order, which is the order of
/// [`Pmf::items`] and [`Pmf::values`] and the tie-break order of
/// [`Pmf::maximum_likelihood`]. The order carries no probabilistic meaning.
///
/// Masses are never negative, infinite, or NaN. Nothing renormalizes
/// implicitly; call [`Pmf::normalize`] after a batch of edits.
///
/// # Example
///
/// ```
/// use thinkbayes::Pmf;
///
/// let mut pmf = Pmf::new();
/// pmf.set("Bowl 1", 0.5).unwrap();
/// pmf.set("Bowl 2", 0.5).unwrap();
/// pmf.mult(&"Bowl 1", 0.75).unwrap();
/// pmf.mult(&"Bowl 2", 0.5).unwrap();
///
/// let p_vanilla = pmf.normalize().unwrap();
///
/// assert::close(p_vanilla, 0.625, 1E-12);
/// assert::close(pmf.prob(&"Bowl 1"), 0.6, 1E-12);
/// ```
#[derive(Debug, Clone)]
pub struct Pmf<H> {
    hypos: Vec<H>,
    masses: Vec<f64>,
    index: HashMap<H, usize>,
}

impl<H> Default for Pmf<H> {
    fn default() -> Self {
        Pmf {
            hypos: Vec::new(),
            masses: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<H: PartialEq> PartialEq for Pmf<H> {
    fn eq(&self, other: &Self) -> bool {
        self.hypos == other.hypos && self.masses == other.masses
    }
}

impl<H> Pmf<H> {
    /// An empty distribution
    pub fn new() -> Self {
        Pmf::default()
    }

    /// Number of hypotheses
    #[inline]
    pub fn len(&self) -> usize {
        self.hypos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hypos.is_empty()
    }

    /// Hypotheses in insertion order
    pub fn values(&self) -> impl Iterator<Item = &H> + '_ {
        self.hypos.iter()
    }

    /// `(hypothesis, mass)` pairs in insertion order
    pub fn items(&self) -> impl Iterator<Item = (&H, f64)> + '_ {
        self.hypos.iter().zip(self.masses.iter().copied())
    }

    /// Masses in insertion order
    #[inline]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Sum of all masses
    pub fn total(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// Rescale so the masses sum to one.
    ///
    /// Returns the total mass before rescaling, which after a Bayesian
    /// update is the normalizing constant *p(D)*.
    ///
    /// # Errors
    ///
    /// [`BayesError::ZeroMass`] if the total mass is zero. The masses are
    /// left as they were. See [`Pmf::normalize_to`].
    pub fn normalize(&mut self) -> Result<f64> {
        self.normalize_to(1.0)
    }

    /// Rescale so the masses sum to `fraction`. Returns the prior total.
    ///
    /// Each mass is divided by the total before scaling, so a subnormal
    /// total (e.g. the evidence of a long run of observations) still
    /// normalizes cleanly.
    ///
    /// # Errors
    ///
    /// - [`BayesError::InvalidMass`] if `fraction` is not positive and
    ///   finite, the total overflows, or a rescaled mass is not finite
    /// - [`BayesError::ZeroMass`] if the total mass is zero
    ///
    /// The masses are left as they were on error.
    pub fn normalize_to(&mut self, fraction: f64) -> Result<f64> {
        if !(fraction.is_finite() && fraction > 0.0) {
            return Err(BayesError::InvalidMass { mass: fraction });
        }

        let total = self.total();
        if total == 0.0 {
            return Err(BayesError::ZeroMass);
        }
        // Every mass is finite, so only overflow of the sum lands here.
        let total = BayesError::check_mass(total)?;

        let scaled = self
            .masses
            .iter()
            .map(|&p| BayesError::check_mass(p / total * fraction))
            .collect::<Result<Vec<f64>>>()?;
        self.masses = scaled;
        Ok(total)
    }

    /// The hypothesis with the greatest mass. Ties go to the hypothesis
    /// inserted first.
    pub fn maximum_likelihood(&self) -> Result<&H> {
        self.items()
            .fold(None, |best: Option<(&H, f64)>, (h, p)| match best {
                Some((_, q)) if q >= p => best,
                _ => Some((h, p)),
            })
            .map(|(h, _)| h)
            .ok_or(BayesError::EmptyDistribution)
    }

    /// Expected value, Σ h·p(h), over the masses as stored.
    ///
    /// # Errors
    ///
    /// - [`BayesError::EmptyDistribution`] if there are no hypotheses
    /// - [`BayesError::NonNumericHypothesis`] if a hypothesis has no `f64`
    ///   representation
    pub fn mean(&self) -> Result<f64>
    where
        H: ToPrimitive,
    {
        if self.is_empty() {
            return Err(BayesError::EmptyDistribution);
        }
        self.items().try_fold(0.0, |acc, (h, p)| {
            h.to_f64()
                .map(|x| x.mul_add(p, acc))
                .ok_or(BayesError::NonNumericHypothesis)
        })
    }

    /// Σ p(h)·(h − mean)²
    pub fn variance(&self) -> Result<f64>
    where
        H: ToPrimitive,
    {
        let mean = self.mean()?;
        self.items().try_fold(0.0, |acc, (h, p)| {
            h.to_f64()
                .map(|x| (x - mean).powi(2).mul_add(p, acc))
                .ok_or(BayesError::NonNumericHypothesis)
        })
    }

    /// Snapshot the distribution as a [`Cdf`]
    pub fn make_cdf(&self) -> Cdf<H>
    where
        H: Ord + Clone,
    {
        Cdf::from_pmf(self)
    }
}

impl<H: Eq + Hash + Clone> Pmf<H> {
    /// A distribution over `hypos` with mass 1 on each. Repeated hypotheses
    /// are kept once.
    ///
    /// ```
    /// use thinkbayes::Pmf;
    ///
    /// let pmf = Pmf::from_hypos("ABC".chars());
    /// assert_eq!(pmf.len(), 3);
    /// assert_eq!(pmf.prob(&'B'), 1.0);
    /// ```
    pub fn from_hypos<I>(hypos: I) -> Self
    where
        I: IntoIterator<Item = H>,
    {
        let mut pmf = Pmf::new();
        hypos.into_iter().for_each(|h| pmf.insert(h, 1.0));
        pmf
    }

    /// A distribution built from `(hypothesis, weight)` pairs, e.g. a
    /// power-law prior. Later pairs overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// [`BayesError::InvalidMass`] if any weight is negative or not finite.
    ///
    /// ```
    /// use thinkbayes::Pmf;
    ///
    /// let mut prior = Pmf::from_weights((1..=4_u32).map(|n| (n, 1.0 / n as f64)))
    ///     .unwrap();
    /// prior.normalize().unwrap();
    /// assert::close(prior.prob(&1), 12.0 / 25.0, 1E-12);
    /// ```
    pub fn from_weights<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (H, f64)>,
    {
        let mut pmf = Pmf::new();
        for (h, w) in weights {
            pmf.set(h, w)?;
        }
        Ok(pmf)
    }

    #[inline]
    fn insert(&mut self, hypo: H, mass: f64) {
        match self.index.get(&hypo) {
            Some(&ix) => self.masses[ix] = mass,
            None => {
                self.index.insert(hypo.clone(), self.hypos.len());
                self.hypos.push(hypo);
                self.masses.push(mass);
            }
        }
    }

    /// Whether `hypo` is a member of the distribution
    pub fn contains(&self, hypo: &H) -> bool {
        self.index.contains_key(hypo)
    }

    /// Assign `mass` to `hypo`, overwriting any previous mass
    pub fn set(&mut self, hypo: H, mass: f64) -> Result<()> {
        let mass = BayesError::check_mass(mass)?;
        self.insert(hypo, mass);
        Ok(())
    }

    /// Add `delta` to the mass of `hypo`. An absent hypothesis starts at
    /// zero.
    ///
    /// # Errors
    ///
    /// [`BayesError::InvalidMass`] if the resulting mass would be negative or
    /// not finite. The mass is left unchanged.
    pub fn incr(&mut self, hypo: H, delta: f64) -> Result<()> {
        let mass = BayesError::check_mass(self.prob(&hypo) + delta)?;
        self.insert(hypo, mass);
        Ok(())
    }

    /// Multiply the mass of `hypo` by `factor`.
    ///
    /// An absent hypothesis has no mass to scale and stays absent. Use
    /// [`Pmf::mult_strict`] to treat that as an error.
    pub fn mult(&mut self, hypo: &H, factor: f64) -> Result<()> {
        let factor = BayesError::check_mass(factor)?;
        if let Some(&ix) = self.index.get(hypo) {
            self.masses[ix] = BayesError::check_mass(self.masses[ix] * factor)?;
        }
        Ok(())
    }

    /// Like [`Pmf::mult`], but an absent hypothesis is
    /// [`BayesError::AbsentHypothesis`].
    pub fn mult_strict(&mut self, hypo: &H, factor: f64) -> Result<()> {
        if self.contains(hypo) {
            self.mult(hypo, factor)
        } else {
            Err(BayesError::AbsentHypothesis)
        }
    }

    /// Mass of `hypo`, or zero if absent
    pub fn prob(&self, hypo: &H) -> f64 {
        self.prob_or(hypo, 0.0)
    }

    /// Mass of `hypo`, or `default` if absent
    pub fn prob_or(&self, hypo: &H, default: f64) -> f64 {
        self.index
            .get(hypo)
            .map_or(default, |&ix| self.masses[ix])
    }

    /// Mass of `hypo`, or [`BayesError::AbsentHypothesis`] if absent
    pub fn prob_strict(&self, hypo: &H) -> Result<f64> {
        self.index
            .get(hypo)
            .map(|&ix| self.masses[ix])
            .ok_or(BayesError::AbsentHypothesis)
    }

    /// Remove `hypo`, returning its mass if it was present
    pub fn remove(&mut self, hypo: &H) -> Option<f64> {
        let ix = self.index.remove(hypo)?;
        self.hypos.remove(ix);
        let mass = self.masses.remove(ix);
        self.index
            .values_mut()
            .filter(|jx| **jx > ix)
            .for_each(|jx| *jx -= 1);
        Some(mass)
    }

    // Per-index access for the update loop
    #[inline]
    pub(crate) fn hypos_and_masses_mut(&mut self) -> (&[H], &mut [f64]) {
        (&self.hypos, &mut self.masses)
    }
}

impl<H: Clone> Sampleable<H> for Pmf<H> {
    fn draw<R: Rng>(&self, rng: &mut R) -> Result<H> {
        let ix = pflip(&self.masses, 1, rng)?[0];
        Ok(self.hypos[ix].clone())
    }

    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Vec<H>> {
        let ixs = pflip(&self.masses, n, rng)?;
        Ok(ixs.iter().map(|&ix| self.hypos[ix].clone()).collect())
    }
}

impl<H: Ord> Quantile<H> for Pmf<H> {
    fn percentile(&self, p: f64) -> Result<&H> {
        crate::stats::percentile(self, p)
    }
}
