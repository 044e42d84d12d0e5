//! Sparse expectation records

/// Tolerance used when an expectation does not name one
///
/// Machine epsilon rather than zero, so an exact expectation survives
/// representation error in the observed value.
pub const DEFAULT_TOLERANCE: f64 = f64::EPSILON;

/// Expected values for a [`Stats`](crate::statistics::Stats) record
///
/// Only the fields that are `Some` are checked.
///
/// ```
/// use samplestats::validation::Validation;
///
/// let uniform = Validation::new()
///     .tolerance(0.01)
///     .mean(0.5)
///     .variance(1.0 / 12.0);
///
/// assert_eq!(uniform.min, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Validation {
    /// Absolute tolerance, [`DEFAULT_TOLERANCE`] when absent
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tolerance: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mean: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub variance: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub min: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub max: Option<f64>,
}

impl Validation {
    /// An expectation that checks nothing
    pub const fn new() -> Self {
        Self {
            tolerance: None,
            mean: None,
            variance: None,
            min: None,
            max: None,
        }
    }

    pub const fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub const fn mean(mut self, mean: f64) -> Self {
        self.mean = Some(mean);
        self
    }

    pub const fn variance(mut self, variance: f64) -> Self {
        self.variance = Some(variance);
        self
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Tolerance applied to every present field
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }
}

/// Expected values for a
/// [`CovarianceStats`](crate::covariance::CovarianceStats) record
///
/// A top-level `tolerance` overrides whatever `x` and `y` carry.
#[cfg(feature = "covariance")]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CovarianceValidation {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tolerance: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub x: Option<Validation>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub y: Option<Validation>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub covariance: Option<f64>,
}

#[cfg(feature = "covariance")]
impl CovarianceValidation {
    pub const fn new() -> Self {
        Self {
            tolerance: None,
            x: None,
            y: None,
            covariance: None,
        }
    }

    pub const fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub const fn x(mut self, x: Validation) -> Self {
        self.x = Some(x);
        self
    }

    pub const fn y(mut self, y: Validation) -> Self {
        self.y = Some(y);
        self
    }

    pub const fn covariance(mut self, covariance: f64) -> Self {
        self.covariance = Some(covariance);
        self
    }

    /// Tolerance for the covariance term
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    /// Marginal expectation with the top-level tolerance applied, if any
    pub(crate) fn resolve(&self, marginal: &Validation) -> Validation {
        Validation {
            tolerance: self.tolerance.or(marginal.tolerance),
            ..*marginal
        }
    }
}
