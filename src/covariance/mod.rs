//! Joint statistics for paired streams
//!
//! [`CovarianceIngestor`] runs two univariate accumulators in lockstep and
//! adds a running covariance; [`observe_covariance`] is the pull form that
//! draws pairs from a generator.
//!
//! # Example
//!
//! ```
//! use samplestats::covariance::observe_covariance;
//!
//! let half = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0];
//! let mut i = 0;
//! let stats = observe_covariance(
//!     || {
//!         let pair = (half[i], i as f64);
//!         i += 1;
//!         pair
//!     },
//!     half.len(),
//! );
//!
//! println!("Cov: {}", stats.covariance);
//! println!("Corr: {}", stats.correlation());
//! ```

mod comoments;

pub use comoments::{
    observe_covariance, observe_covariance_with, CovarianceIngestor, CovarianceStats,
};
