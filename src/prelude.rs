//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::error::{BayesError, Result};
#[doc(no_inline)]
pub use crate::stats::{credible_interval, make_posterior, percentile};
#[doc(no_inline)]
pub use crate::traits::*;
#[doc(no_inline)]
pub use crate::{Cdf, Pmf, Suite};
