//! Tolerance-based validation of observed statistics
//!
//! Expectations are sparse: every field is optional and only the present
//! ones are compared, each within one absolute tolerance. [`validate`] and
//! [`validate_covariance`] answer yes or no; [`check`] and
//! [`check_covariance`] return the first [`Mismatch`] for diagnostics.
//!
//! # Example
//!
//! ```
//! use samplestats::statistics::observe;
//! use samplestats::validation::{validate, Validation};
//!
//! // A cheap deterministic stand-in for a uniform [0, 1) source
//! let mut state = 0.0_f64;
//! let stats = observe(
//!     || {
//!         state = (state + 0.618_033_988_749_895) % 1.0;
//!         state
//!     },
//!     10_000,
//! );
//!
//! let uniform = Validation::new()
//!     .tolerance(0.01)
//!     .min(0.0)
//!     .max(1.0)
//!     .mean(0.5)
//!     .variance(1.0 / 12.0);
//! assert!(validate(&stats, &uniform));
//! ```

mod check;
mod expected;

pub use check::{check, validate, Axis, Field, Mismatch};
pub use expected::{Validation, DEFAULT_TOLERANCE};

#[cfg(feature = "covariance")]
pub use check::{check_covariance, validate_covariance};
#[cfg(feature = "covariance")]
pub use expected::CovarianceValidation;
