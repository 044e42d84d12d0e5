//! Core traits for streaming accumulators
//!
//! Every accumulator implements [`Ingestor`]: it owns its running state,
//! takes one sample at a time and hands back a freshly built summary.
//! [`VarianceConvention`] fixes the divisor used for every second-order
//! moment the accumulator reports.

use core::fmt::Debug;

/// Divisor applied to sums of squared (or cross) errors
///
/// One convention is chosen per accumulator and applied to every variance
/// and covariance it reports, on both the incremental and batch paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VarianceConvention {
    /// Divide by `count - 1` (Bessel's correction)
    ///
    /// Unbiased estimate of the population variance from a sample. With a
    /// single sample this is `0 / 0`, so the variance is NaN.
    #[default]
    Sample,
    /// Divide by `count`
    Population,
}

impl VarianceConvention {
    /// Divisor for `count` samples under this convention
    #[inline]
    pub fn divisor(self, count: u64) -> f64 {
        match self {
            VarianceConvention::Sample => count as f64 - 1.0,
            VarianceConvention::Population => count as f64,
        }
    }

    /// Apply the divisor to an accumulated error sum
    ///
    /// No guard against a zero divisor: the degenerate result (NaN or
    /// infinite) is the documented output.
    #[inline]
    pub fn divide(self, sum: f64, count: u64) -> f64 {
        sum / self.divisor(count)
    }
}

impl core::fmt::Display for VarianceConvention {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VarianceConvention::Sample => write!(f, "sample (n - 1)"),
            VarianceConvention::Population => write!(f, "population (n)"),
        }
    }
}

/// Core trait for single-pass accumulators
///
/// An ingestor is a small state machine with one state, "accumulating".
/// It is not meant to be shared: each instance is fed by exactly one owner.
pub trait Ingestor: Clone + Debug {
    /// What one ingestion consumes
    type Sample;

    /// Summary of everything ingested so far
    type Output: Copy;

    /// Fold one sample into the running state and return the new summary
    fn ingest(&mut self, sample: Self::Sample) -> Self::Output;

    /// Summary of everything ingested so far, without ingesting
    ///
    /// Before the first sample this is the null summary.
    fn current(&self) -> Self::Output;

    /// Number of samples ingested
    fn count(&self) -> u64;

    /// Divisor convention applied to second moments
    fn convention(&self) -> VarianceConvention;

    /// Reset to the freshly constructed state, keeping the convention
    fn clear(&mut self);

    /// Check if nothing has been ingested
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Drive `ingestor` with `sample_count` pulls from `generator`
///
/// The generator is called strictly in sequence, exactly `sample_count`
/// times. Returns the summary after the last sample, or the ingestor's
/// current summary if `sample_count` is zero.
#[cfg(feature = "statistics")]
pub(crate) fn drive<I, G>(mut ingestor: I, mut generator: G, sample_count: usize) -> I::Output
where
    I: Ingestor,
    G: FnMut() -> I::Sample,
{
    #[cfg(feature = "tracing")]
    tracing::trace!(
        sample_count,
        convention = ?ingestor.convention(),
        "batch observation started"
    );

    let mut last = ingestor.current();
    for _ in 0..sample_count {
        last = ingestor.ingest(generator());
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(ingested = ingestor.count(), "batch observation finished");

    last
}
