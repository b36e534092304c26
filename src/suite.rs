//! Bayesian update over a discrete hypothesis space
use crate::error::{BayesError, Result};
use crate::pmf::Pmf;
use crate::traits::Likelihood;
use std::hash::Hash;
use std::ops::Deref;
use tracing::{debug, warn};

/// A [`Pmf`] over hypotheses together with the [`Likelihood`] used to revise
/// it.
///
/// Each call to [`Suite::update`] applies Bayes' rule,
/// *p(H|D) ∝ p(H) p(D|H)*, and leaves the distribution normalized. All
/// read-only `Pmf` queries are available through `Deref`.
///
/// # Example
///
/// The Monty Hall problem: the contestant picks door A and Monty opens B.
///
/// ```
/// use thinkbayes::Suite;
///
/// let monty = |opened: &char, hypo: &char| match hypo {
///     h if h == opened => 0.0,
///     'A' => 0.5,
///     _ => 1.0,
/// };
///
/// let mut suite = Suite::new("ABC".chars(), monty).unwrap();
/// suite.update(&'B').unwrap();
///
/// assert::close(suite.prob(&'A'), 1.0 / 3.0, 1E-12);
/// assert_eq!(suite.prob(&'B'), 0.0);
/// assert::close(suite.prob(&'C'), 2.0 / 3.0, 1E-12);
/// ```
#[derive(Debug, Clone)]
pub struct Suite<H, L> {
    pmf: Pmf<H>,
    likelihood: L,
}

impl<H, L> Suite<H, L>
where
    H: Eq + Hash + Clone,
{
    /// A suite with a uniform prior over `hypos`
    ///
    /// # Errors
    ///
    /// [`BayesError::ZeroMass`] if `hypos` is empty.
    pub fn new<I>(hypos: I, likelihood: L) -> Result<Self>
    where
        I: IntoIterator<Item = H>,
    {
        Suite::from_pmf(Pmf::from_hypos(hypos), likelihood)
    }

    /// A suite with the given prior, normalized on construction
    ///
    /// # Errors
    ///
    /// [`BayesError::ZeroMass`] if the prior has no mass.
    ///
    /// # Example
    ///
    /// A power-law prior for the locomotive problem.
    ///
    /// ```
    /// use thinkbayes::{Pmf, Suite};
    ///
    /// let prior = Pmf::from_weights((1..=1000_u32).map(|n| (n, 1.0 / n as f64)))
    ///     .unwrap();
    /// let train = |n_seen: &u32, n: &u32| {
    ///     if n < n_seen { 0.0 } else { 1.0 / f64::from(*n) }
    /// };
    ///
    /// let mut suite = Suite::from_pmf(prior, train).unwrap();
    /// suite.update_set(&[30, 60, 90]).unwrap();
    ///
    /// assert::close(suite.mean().unwrap(), 133.3, 0.1);
    /// ```
    pub fn from_pmf(mut prior: Pmf<H>, likelihood: L) -> Result<Self> {
        prior.normalize()?;
        Ok(Suite::new_unchecked(prior, likelihood))
    }

    /// Update the distribution with one observation.
    ///
    /// Every hypothesis's mass is multiplied by `likelihood(data, h)` and the
    /// result renormalized. Returns the normalizing constant *p(D)*.
    ///
    /// All likelihoods are computed before any mass changes, so each
    /// hypothesis is weighed against its own prior mass and a failure leaves
    /// the suite untouched, with one exception: if the data are impossible
    /// under every hypothesis the multiplications have already happened when
    /// the final normalization reports [`BayesError::ZeroMass`]. The suite is
    /// then all-zero and must be rebuilt.
    ///
    /// # Errors
    ///
    /// - [`BayesError::InvalidMass`] if the likelihood returns a negative or
    ///   non-finite value, or a posterior mass overflows
    /// - [`BayesError::ZeroMass`] if every posterior mass is zero
    pub fn update<D>(&mut self, data: &D) -> Result<f64>
    where
        D: ?Sized,
        L: Likelihood<H, D>,
    {
        let (hypos, masses) = self.pmf.hypos_and_masses_mut();
        let posterior = hypos
            .iter()
            .zip(masses.iter())
            .map(|(h, &p)| {
                let like =
                    BayesError::check_mass(self.likelihood.likelihood(data, h))?;
                BayesError::check_mass(p * like)
            })
            .collect::<Result<Vec<f64>>>()?;
        masses.copy_from_slice(&posterior);

        match self.pmf.normalize() {
            Ok(p_data) => {
                debug!(n_hypos = self.pmf.len(), p_data, "suite update");
                Ok(p_data)
            }
            Err(BayesError::ZeroMass) => {
                warn!(
                    n_hypos = self.pmf.len(),
                    "observation is impossible under every hypothesis"
                );
                Err(BayesError::ZeroMass)
            }
            Err(err) => Err(err),
        }
    }

    /// Update with each observation in `dataset`, in order.
    ///
    /// Returns the log marginal likelihood of the dataset,
    /// *ln p(D<sub>1</sub>, ..., D<sub>n</sub>)*, the sum of the log
    /// normalizing constants of each step. Stops at the first error, leaving
    /// the earlier updates applied.
    pub fn update_set<'a, D, I>(&mut self, dataset: I) -> Result<f64>
    where
        D: 'a + ?Sized,
        L: Likelihood<H, D>,
        I: IntoIterator<Item = &'a D>,
    {
        let mut n_obs: usize = 0;
        let mut ln_m = 0.0;
        for data in dataset {
            ln_m += self.update(data)?.ln();
            n_obs += 1;
        }
        debug!(n_obs, ln_m, "suite update set");
        Ok(ln_m)
    }
}

impl<H, L> Suite<H, L> {
    /// Wrap `pmf` without normalizing it
    #[inline]
    pub fn new_unchecked(pmf: Pmf<H>, likelihood: L) -> Self {
        Suite { pmf, likelihood }
    }

    #[inline]
    pub fn pmf(&self) -> &Pmf<H> {
        &self.pmf
    }

    /// Mutable access to the masses. Edits are not renormalized.
    #[inline]
    pub fn pmf_mut(&mut self) -> &mut Pmf<H> {
        &mut self.pmf
    }

    #[inline]
    pub fn likelihood(&self) -> &L {
        &self.likelihood
    }

    pub fn into_pmf(self) -> Pmf<H> {
        self.pmf
    }
}

impl<H, L> Deref for Suite<H, L> {
    type Target = Pmf<H>;

    fn deref(&self) -> &Pmf<H> {
        &self.pmf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Quantile;
    use std::collections::HashMap;

    const TOL: f64 = 1E-12;

    #[derive(Clone)]
    struct Cookie {
        mixes: HashMap<&'static str, HashMap<&'static str, f64>>,
    }

    impl Cookie {
        fn new() -> Self {
            let bowl_1 = HashMap::from([("vanilla", 0.75), ("chocolate", 0.25)]);
            let bowl_2 = HashMap::from([("vanilla", 0.5), ("chocolate", 0.5)]);
            Cookie {
                mixes: HashMap::from([("Bowl 1", bowl_1), ("Bowl 2", bowl_2)]),
            }
        }
    }

    impl Likelihood<&'static str, str> for Cookie {
        fn likelihood(&self, data: &str, hypo: &&'static str) -> f64 {
            self.mixes
                .get(hypo)
                .and_then(|mix| mix.get(data))
                .copied()
                .unwrap_or(0.0)
        }
    }

    fn dice(roll: &u32, sides: &u32) -> f64 {
        if sides < roll {
            0.0
        } else {
            1.0 / f64::from(*sides)
        }
    }

    #[test]
    fn new_suite_is_uniform() {
        let suite = Suite::new(vec![4_u32, 6, 8, 12, 20], dice).unwrap();
        suite
            .items()
            .for_each(|(_, p)| assert::close(p, 0.2, TOL));
    }

    #[test]
    fn new_suite_without_hypotheses_is_zero_mass() {
        let res = Suite::new(Vec::<u32>::new(), dice);
        assert!(matches!(res, Err(BayesError::ZeroMass)));
    }

    #[test]
    fn cookie_vanilla() {
        let mut suite = Suite::new(vec!["Bowl 1", "Bowl 2"], Cookie::new())
            .unwrap();
        let p_data = suite.update("vanilla").unwrap();

        assert::close(p_data, 0.625, TOL);
        assert::close(suite.prob(&"Bowl 1"), 0.6, TOL);
        assert::close(suite.prob(&"Bowl 2"), 0.4, TOL);
    }

    #[test]
    fn cookie_dataset_matches_sequential_updates() {
        let mut a = Suite::new(vec!["Bowl 1", "Bowl 2"], Cookie::new()).unwrap();
        let mut b = a.clone();

        for data in ["vanilla", "chocolate", "vanilla"] {
            a.update(data).unwrap();
        }
        b.update_set(["vanilla", "chocolate", "vanilla"]).unwrap();

        assert_eq!(a.pmf(), b.pmf());
    }

    #[test]
    fn dice_rules_out_small_dice() {
        let mut suite = Suite::new(vec![4_u32, 6, 8, 12, 20], dice).unwrap();
        suite.update(&6).unwrap();

        assert_eq!(suite.prob(&4), 0.0);
        assert!(suite.prob(&6) > suite.prob(&8));
        assert::close(suite.total(), 1.0, 1E-9);

        suite.update_set(&[6, 8, 7, 7, 4]).unwrap();
        assert_eq!(suite.prob(&6), 0.0);
        assert::close(suite.prob(&8), 0.915_845_271_969_01, 1E-9);
        assert_eq!(suite.maximum_likelihood(), Ok(&8));
    }

    #[test]
    fn constant_likelihood_is_noop() {
        let prior =
            Pmf::from_weights(vec![(1_u8, 0.2), (2, 0.5), (3, 0.3)]).unwrap();
        let mut suite = Suite::from_pmf(prior, |_: &(), _: &u8| 1.0).unwrap();
        let before: Vec<f64> = suite.masses().to_vec();

        let p_data = suite.update(&()).unwrap();

        assert::close(p_data, 1.0, TOL);
        assert::close(suite.masses().to_vec(), before, TOL);
    }

    #[test]
    fn impossible_data_is_zero_mass() {
        let mut suite = Suite::new(vec![4_u32, 6], dice).unwrap();
        assert_eq!(suite.update(&7), Err(BayesError::ZeroMass));
        assert_eq!(suite.total(), 0.0);
    }

    #[test]
    fn update_with_subnormal_evidence_stays_finite() {
        let tally = |data: &(i32, i32), x: &u32| {
            let p = f64::from(*x) / 100.0;
            p.powi(data.0) * (1.0 - p).powi(data.1)
        };
        let mut suite = Suite::new(0..=100_u32, tally).unwrap();

        let p_data = suite.update(&(560, 466)).unwrap();

        assert!(p_data > 0.0 && p_data < f64::MIN_POSITIVE);
        assert!(suite.masses().iter().all(|p| p.is_finite()));
        assert::close(suite.total(), 1.0, 1E-9);
        assert_eq!(suite.maximum_likelihood(), Ok(&55));
        assert::close(suite.mean().unwrap(), 54.571_984_435_797_69, 1E-6);
    }

    #[test]
    fn overflowing_evidence_is_invalid_mass_not_zero_mass() {
        let pmf = Pmf::from_hypos(vec![1_u8, 2]);
        let mut suite = Suite::new_unchecked(pmf, |_: &(), _: &u8| f64::MAX);

        let res = suite.update(&());

        assert_eq!(res, Err(BayesError::InvalidMass { mass: f64::INFINITY }));
    }

    #[test]
    fn invalid_likelihood_leaves_suite_untouched() {
        let like = |data: &f64, hypo: &u8| if *hypo == 2 { *data } else { 0.5 };
        let mut suite = Suite::new(vec![1_u8, 2, 3], like).unwrap();
        let before = suite.pmf().clone();

        let res = suite.update(&-1.0);

        assert_eq!(res, Err(BayesError::InvalidMass { mass: -1.0 }));
        assert_eq!(suite.pmf(), &before);
    }

    #[test]
    fn update_set_returns_log_marginal_likelihood() {
        let mut suite = Suite::new(vec!["Bowl 1", "Bowl 2"], Cookie::new())
            .unwrap();
        let ln_m = suite.update_set(["vanilla", "vanilla"]).unwrap();

        // p(v) = 5/8, p(v | v) = 0.6 * 0.75 + 0.4 * 0.5 = 0.65
        assert::close(ln_m, (0.625_f64 * 0.65).ln(), TOL);
    }

    #[test]
    fn update_set_order_does_not_matter() {
        let mut a = Suite::new(vec![4_u32, 6, 8, 12, 20], dice).unwrap();
        let mut b = a.clone();
        a.update_set(&[6, 8, 7]).unwrap();
        b.update_set(&[7, 6, 8]).unwrap();

        assert::close(a.masses().to_vec(), b.masses().to_vec(), 1E-12);
    }

    #[test]
    fn update_set_stops_at_first_error() {
        let mut suite = Suite::new(vec![4_u32, 6], dice).unwrap();
        let res = suite.update_set(&[3, 7, 2]);
        assert_eq!(res, Err(BayesError::ZeroMass));
    }

    #[test]
    fn manual_edits_through_pmf_mut() {
        let mut suite = Suite::new(vec![4_u32, 6, 8], dice).unwrap();
        suite.pmf_mut().remove(&8);
        suite.pmf_mut().normalize().unwrap();
        suite.update(&5).unwrap();
        assert::close(suite.prob(&6), 1.0, TOL);
        assert_eq!(suite.percentile(50.0), Ok(&6));
    }

    #[test]
    fn into_pmf_keeps_posterior() {
        let mut suite = Suite::new(vec![4_u32, 6, 8], dice).unwrap();
        suite.update(&5).unwrap();
        let pmf = suite.into_pmf();
        assert_eq!(pmf.prob(&4), 0.0);
        assert::close(pmf.prob(&6), 4.0 / 7.0, TOL);
    }
}
