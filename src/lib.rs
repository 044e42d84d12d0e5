//! # Samplestats
//!
//! Single-pass descriptive statistics for sample streams, and tolerance-based
//! checks of those statistics against expected values.
//!
//! Samplestats is built for test harnesses and simulations that need to
//! assert properties of a random or pseudo-random source ("this
//! distribution has mean ≈ 0.5 and variance ≈ 1/12") without buffering the
//! samples.
//!
//! ## Features
//!
//! - **Running Statistics**: mean, variance, min, max with Welford's algorithm
//! - **Covariance**: two aligned streams plus their covariance, in one pass
//! - **Push or Pull**: feed an ingestor sample by sample, or let a batch
//!   observer call your generator a fixed number of times
//! - **Validation**: sparse expectations checked within an absolute tolerance
//!
//! ## Quick Start
//!
//! ```rust
//! use samplestats::prelude::*;
//!
//! let mut seed = 7u64;
//! let mut uniform = || {
//!     seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
//!     (seed >> 11) as f64 / (1u64 << 53) as f64
//! };
//!
//! let stats = observe(&mut uniform, 100_000);
//! let expected = Validation::new()
//!     .tolerance(0.01)
//!     .min(0.0)
//!     .max(1.0)
//!     .mean(0.5)
//!     .variance(1.0 / 12.0);
//!
//! assert!(validate(&stats, &expected));
//! ```
//!
//! ## Variance Convention
//!
//! Every accumulator divides by `count - 1` (Bessel's correction) unless it
//! is built with [`VarianceConvention::Population`](traits::VarianceConvention).
//! The convention applies to every variance and covariance the accumulator
//! reports, whether it is driven incrementally or in batch:
//!
//! ```rust
//! use samplestats::statistics::{observe_with, StatsIngestor};
//! use samplestats::traits::VarianceConvention;
//!
//! let mut i = 0.0;
//! let population = observe_with(
//!     || {
//!         i += 1.0;
//!         i
//!     },
//!     4,
//!     VarianceConvention::Population,
//! );
//! let sample: StatsIngestor = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
//!
//! assert!((population.variance - 1.25).abs() < 1e-12);
//! assert!((sample.stats().variance - 5.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! Algorithm families (pick what you need):
//! - `statistics` (default): running mean, variance, min, max
//! - `covariance` (default): joint statistics of paired streams
//! - `validation` (default): tolerance checks of observed statistics
//! - `full`: Enable everything
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization of records and expectations
//! - `tracing`: Emit diagnostic events for batch runs and failed checks

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core traits always available
pub mod traits;

mod math;

#[cfg(all(feature = "serde", feature = "statistics"))]
mod serde_nan;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "covariance")]
#[cfg_attr(docsrs, doc(cfg(feature = "covariance")))]
pub mod covariance;

#[cfg(feature = "validation")]
#[cfg_attr(docsrs, doc(cfg(feature = "validation")))]
pub mod validation;

pub mod prelude {
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::{observe, observe_with, Stats, StatsIngestor};

    #[cfg(feature = "covariance")]
    pub use crate::covariance::{
        observe_covariance, observe_covariance_with, CovarianceIngestor, CovarianceStats,
    };

    #[cfg(feature = "validation")]
    pub use crate::validation::{check, validate, Mismatch, Validation};

    #[cfg(all(feature = "validation", feature = "covariance"))]
    pub use crate::validation::{check_covariance, validate_covariance, CovarianceValidation};
}

#[cfg(feature = "statistics")]
pub use statistics::{Stats, StatsIngestor};

#[cfg(feature = "covariance")]
pub use covariance::{CovarianceIngestor, CovarianceStats};
