//! Running statistics (mean, variance, min, max)
//!
//! Computes streaming statistics using Welford's numerically stable online algorithm.

use crate::math;
use crate::traits::{drive, Ingestor, VarianceConvention};

/// Mean, variance and extrema of every sample ingested so far
///
/// Immutable: an ingestor builds a new record on every sample. The null
/// record ([`Stats::null`]) has every field NaN, so it can never be mistaken
/// for a computed result such as a variance of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Arithmetic mean
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_nan"))]
    pub mean: f64,
    /// Variance under the producing ingestor's [`VarianceConvention`]
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_nan"))]
    pub variance: f64,
    /// Smallest sample
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_nan"))]
    pub min: f64,
    /// Largest sample
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_nan"))]
    pub max: f64,
}

impl Stats {
    /// The "no data yet" record
    pub const fn null() -> Self {
        Self {
            mean: f64::NAN,
            variance: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }

    /// True only for the null record
    ///
    /// A single-sample record under the sample convention has a NaN
    /// variance but real mean and extrema, so it is not null.
    pub fn is_null(&self) -> bool {
        self.mean.is_nan() && self.variance.is_nan() && self.min.is_nan() && self.max.is_nan()
    }

    /// Standard deviation (square root of the variance)
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance)
    }

    /// Spread between the extrema
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::null()
    }
}

/// Single-pass accumulator of [`Stats`]
///
/// O(1) time and memory per sample. The mean is updated before the squared
/// error is accumulated, and the increment multiplies the error against the
/// old mean by the error against the new one. That product never goes
/// negative and does not cancel for large or shifted samples.
///
/// Inputs are not sanitized: NaN or infinite samples propagate into the
/// mean and variance.
///
/// # Example
///
/// ```
/// use samplestats::statistics::StatsIngestor;
///
/// let mut ingestor = StatsIngestor::new();
/// let mut stats = ingestor.stats();
/// assert!(stats.is_null());
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats = ingestor.ingest(value);
/// }
///
/// assert!((stats.mean - 5.0).abs() < 1e-12);
/// assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
/// assert_eq!(stats.min, 2.0);
/// assert_eq!(stats.max, 9.0);
/// ```
#[derive(Clone, Debug)]
pub struct StatsIngestor {
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared errors against the running mean
    m2: f64,
    /// Minimum value
    min: f64,
    /// Maximum value
    max: f64,
    convention: VarianceConvention,
}

/// Errors produced by one Welford step
///
/// `pre` is measured against the mean before the update, `post` against
/// the mean after it.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(not(feature = "covariance"), allow(dead_code))]
pub(crate) struct Step {
    pub pre: f64,
    pub post: f64,
}

impl Default for StatsIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsIngestor {
    /// Create an empty ingestor using Bessel's correction
    pub fn new() -> Self {
        Self::with_convention(VarianceConvention::default())
    }

    /// Create an empty ingestor with an explicit divisor convention
    pub fn with_convention(convention: VarianceConvention) -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            convention,
        }
    }

    /// Add a sample and return the updated statistics
    pub fn ingest(&mut self, sample: f64) -> Stats {
        self.step(sample);
        self.stats()
    }

    /// One Welford update, in the order the stability depends on
    #[inline]
    pub(crate) fn step(&mut self, sample: f64) -> Step {
        self.count += 1;

        if sample < self.min {
            self.min = sample;
        }
        if sample > self.max {
            self.max = sample;
        }

        let pre = sample - self.mean;
        self.mean += pre / self.count as f64;
        let post = sample - self.mean;
        self.m2 += pre * post;

        Step { pre, post }
    }

    /// Statistics of everything ingested so far
    ///
    /// Returns [`Stats::null`] before the first sample.
    pub fn stats(&self) -> Stats {
        if self.count == 0 {
            return Stats::null();
        }
        Stats {
            mean: self.mean,
            variance: self.convention.divide(self.m2, self.count),
            min: self.min,
            max: self.max,
        }
    }

    /// Get the number of samples
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

}

impl Ingestor for StatsIngestor {
    type Sample = f64;
    type Output = Stats;

    fn ingest(&mut self, sample: f64) -> Stats {
        StatsIngestor::ingest(self, sample)
    }

    fn current(&self) -> Stats {
        self.stats()
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn convention(&self) -> VarianceConvention {
        self.convention
    }

    fn clear(&mut self) {
        *self = Self::with_convention(self.convention);
    }
}

impl Extend<f64> for StatsIngestor {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for sample in iter {
            self.step(sample);
        }
    }
}

impl FromIterator<f64> for StatsIngestor {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut ingestor = Self::new();
        ingestor.extend(iter);
        ingestor
    }
}

/// Statistics of `sample_count` successive calls to `generator`
///
/// Uses Bessel's correction. Equivalent to feeding a fresh
/// [`StatsIngestor`] and keeping the last result; returns [`Stats::null`]
/// when `sample_count` is zero.
///
/// # Example
///
/// ```
/// use samplestats::statistics::observe;
///
/// let values = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0];
/// let mut next = values.iter().copied();
/// let stats = observe(|| next.next().unwrap_or(f64::NAN), values.len());
///
/// assert!((stats.mean - 0.5).abs() < 1e-12);
/// assert!((stats.variance - 0.25 * 10.0 / 9.0).abs() < 1e-12);
/// ```
pub fn observe<G>(generator: G, sample_count: usize) -> Stats
where
    G: FnMut() -> f64,
{
    observe_with(generator, sample_count, VarianceConvention::default())
}

/// [`observe`] with an explicit divisor convention
pub fn observe_with<G>(generator: G, sample_count: usize, convention: VarianceConvention) -> Stats
where
    G: FnMut() -> f64,
{
    drive(
        StatsIngestor::with_convention(convention),
        generator,
        sample_count,
    )
}
