//! Statistical summaries for streaming data
//!
//! This module provides single-pass mean, variance, min and max over a
//! stream of numbers, with constant memory.
//!
//! Two access patterns share one accumulator:
//! - push: feed a [`StatsIngestor`] one sample at a time, getting the updated
//!   [`Stats`] back from every call;
//! - pull: [`observe`] calls a generator a fixed number of times and returns
//!   only the final [`Stats`].
//!
//! # Example
//!
//! ```
//! use samplestats::statistics::{observe, StatsIngestor};
//!
//! let mut ingestor = StatsIngestor::new();
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     ingestor.ingest(value);
//! }
//!
//! let mut counter = 0.0;
//! let pulled = observe(
//!     || {
//!         counter += 1.0;
//!         counter
//!     },
//!     5,
//! );
//!
//! assert_eq!(ingestor.stats().min, pulled.min);
//! assert!((ingestor.stats().variance - pulled.variance).abs() < 1e-12);
//! println!("Mean: {}", pulled.mean);
//! println!("Stddev: {}", pulled.stddev());
//! ```

mod moments;

#[cfg(feature = "covariance")]
pub(crate) use moments::Step;
pub use moments::{observe, observe_with, Stats, StatsIngestor};
