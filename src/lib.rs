//! Discrete Bayesian inference.
//!
//! A [`Pmf`] maps hypotheses to probability mass. A [`Suite`] pairs a `Pmf`
//! with a [`Likelihood`] and revises the mass with Bayes' rule as each
//! observation arrives. Posterior summaries come from the `Pmf` itself
//! ([`Pmf::mean`], [`Pmf::maximum_likelihood`]), from a [`Cdf`] snapshot, or
//! from the free functions in [`stats`].
//!
//! # Example
//!
//! Which die was rolled, given that it came up 6?
//!
//! ```
//! use thinkbayes::{Quantile, Suite};
//!
//! let dice = |roll: &u32, sides: &u32| {
//!     if sides < roll { 0.0 } else { 1.0 / f64::from(*sides) }
//! };
//!
//! let mut suite = Suite::new([4, 6, 8, 12, 20], dice).unwrap();
//! suite.update(&6).unwrap();
//!
//! assert_eq!(suite.prob(&4), 0.0);
//! assert_eq!(suite.maximum_likelihood(), Ok(&6));
//! assert_eq!(suite.percentile(50.0), Ok(&8));
//! ```
//!
//! # Logging
//!
//! Updates emit [`tracing`] events: `debug` per update, `warn` when an
//! observation rules out every hypothesis. No subscriber is installed.

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

pub mod cdf;
pub mod error;
pub mod misc;
pub mod pmf;
pub mod prelude;
pub mod stats;
pub mod suite;
pub mod traits;

pub use cdf::Cdf;
pub use error::{BayesError, Result};
pub use pmf::Pmf;
pub use suite::Suite;
pub use traits::{Likelihood, Quantile, Sampleable};
