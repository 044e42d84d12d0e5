//! Joint running statistics of two aligned streams
//!
//! Two Welford accumulators advance in lockstep while a cross-error sum
//! tracks their covariance in the same pass.

use crate::math;
use crate::statistics::{Stats, StatsIngestor};
use crate::traits::{drive, Ingestor, VarianceConvention};

/// Marginal statistics of two streams plus their covariance
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CovarianceStats {
    /// Statistics of the first stream
    pub x: Stats,
    /// Statistics of the second stream
    pub y: Stats,
    /// Covariance, under the same divisor as both marginal variances
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_nan"))]
    pub covariance: f64,
}

impl CovarianceStats {
    /// The "no data yet" record: both marginals null, covariance NaN
    pub const fn null() -> Self {
        Self {
            x: Stats::null(),
            y: Stats::null(),
            covariance: f64::NAN,
        }
    }

    /// True only for the null record
    pub fn is_null(&self) -> bool {
        self.x.is_null() && self.y.is_null() && self.covariance.is_nan()
    }

    /// Pearson correlation coefficient
    ///
    /// The divisor convention cancels out. NaN when either stream has zero
    /// variance.
    pub fn correlation(&self) -> f64 {
        self.covariance / math::sqrt(self.x.variance * self.y.variance)
    }
}

impl Default for CovarianceStats {
    fn default() -> Self {
        Self::null()
    }
}

/// Single-pass accumulator of [`CovarianceStats`]
///
/// Both values of a pair are required on every call, so the two streams can
/// never drift out of alignment.
///
/// The cross term multiplies x's error against its old mean by y's error
/// against its new mean. The mirrored product would give the same sum; this
/// one is kept so results are reproducible bit for bit.
///
/// # Example
///
/// ```
/// use samplestats::covariance::CovarianceIngestor;
///
/// let mut ingestor = CovarianceIngestor::new();
/// let mut stats = ingestor.stats();
/// for (x, y) in [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)] {
///     stats = ingestor.ingest(x, y);
/// }
///
/// assert!((stats.x.mean - 2.0).abs() < 1e-12);
/// assert!((stats.y.mean - 4.0).abs() < 1e-12);
/// assert!((stats.covariance - 2.0).abs() < 1e-12);
/// assert!((stats.correlation() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct CovarianceIngestor {
    x: StatsIngestor,
    y: StatsIngestor,
    /// Sum of cross errors
    cross: f64,
    convention: VarianceConvention,
}

impl Default for CovarianceIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl CovarianceIngestor {
    /// Create an empty ingestor using Bessel's correction
    pub fn new() -> Self {
        Self::with_convention(VarianceConvention::default())
    }

    /// Create an empty ingestor with an explicit divisor convention
    ///
    /// The convention covers both marginal variances and the covariance.
    pub fn with_convention(convention: VarianceConvention) -> Self {
        Self {
            x: StatsIngestor::with_convention(convention),
            y: StatsIngestor::with_convention(convention),
            cross: 0.0,
            convention,
        }
    }

    /// Add one pair and return the updated statistics
    pub fn ingest(&mut self, x: f64, y: f64) -> CovarianceStats {
        self.step(x, y);
        self.stats()
    }

    /// Advance both streams, then accumulate x's pre-update error against
    /// y's post-update error
    #[inline]
    fn step(&mut self, x: f64, y: f64) {
        let sx = self.x.step(x);
        let sy = self.y.step(y);
        self.cross += sx.pre * sy.post;
    }

    /// Statistics of everything ingested so far
    ///
    /// Returns [`CovarianceStats::null`] before the first pair.
    pub fn stats(&self) -> CovarianceStats {
        if self.is_empty() {
            return CovarianceStats::null();
        }
        CovarianceStats {
            x: self.x.stats(),
            y: self.y.stats(),
            covariance: self.convention.divide(self.cross, self.len()),
        }
    }

    /// Get the number of pairs
    pub fn len(&self) -> u64 {
        self.x.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl Ingestor for CovarianceIngestor {
    type Sample = (f64, f64);
    type Output = CovarianceStats;

    fn ingest(&mut self, (x, y): (f64, f64)) -> CovarianceStats {
        CovarianceIngestor::ingest(self, x, y)
    }

    fn current(&self) -> CovarianceStats {
        self.stats()
    }

    fn count(&self) -> u64 {
        self.len()
    }

    fn convention(&self) -> VarianceConvention {
        self.convention
    }

    fn clear(&mut self) {
        *self = Self::with_convention(self.convention);
    }
}

impl Extend<(f64, f64)> for CovarianceIngestor {
    fn extend<T: IntoIterator<Item = (f64, f64)>>(&mut self, iter: T) {
        for (x, y) in iter {
            self.step(x, y);
        }
    }
}

impl FromIterator<(f64, f64)> for CovarianceIngestor {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        let mut ingestor = Self::new();
        ingestor.extend(iter);
        ingestor
    }
}

/// Joint statistics of `sample_count` pairs pulled from `generator`
///
/// Uses Bessel's correction. Returns [`CovarianceStats::null`] when
/// `sample_count` is zero.
///
/// # Example
///
/// ```
/// use samplestats::covariance::observe_covariance;
///
/// let mut i = 0.0;
/// let stats = observe_covariance(
///     || {
///         i += 1.0;
///         (i, -i)
///     },
///     4,
/// );
///
/// assert!((stats.covariance + stats.x.variance).abs() < 1e-12);
/// ```
pub fn observe_covariance<G>(generator: G, sample_count: usize) -> CovarianceStats
where
    G: FnMut() -> (f64, f64),
{
    observe_covariance_with(generator, sample_count, VarianceConvention::default())
}

/// [`observe_covariance`] with an explicit divisor convention
pub fn observe_covariance_with<G>(
    generator: G,
    sample_count: usize,
    convention: VarianceConvention,
) -> CovarianceStats
where
    G: FnMut() -> (f64, f64),
{
    drive(
        CovarianceIngestor::with_convention(convention),
        generator,
        sample_count,
    )
}
