//! Tolerance comparison of observed statistics against expectations

use super::expected::Validation;
use crate::math;
use crate::statistics::Stats;

#[cfg(feature = "covariance")]
use super::expected::CovarianceValidation;
#[cfg(feature = "covariance")]
use crate::covariance::CovarianceStats;

/// Which stream of a pair a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// A checked statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Mean,
    Variance,
    Min,
    Max,
    Covariance,
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Field::Mean => "mean",
            Field::Variance => "variance",
            Field::Min => "min",
            Field::Max => "max",
            Field::Covariance => "covariance",
        };
        f.write_str(name)
    }
}

/// First expected value the observation missed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    /// Stream the field belongs to; `None` for univariate checks and for
    /// the covariance term
    pub axis: Option<Axis>,
    pub field: Field,
    pub observed: f64,
    pub expected: f64,
    pub tolerance: f64,
}

impl core::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.axis {
            Some(Axis::X) => write!(f, "x.")?,
            Some(Axis::Y) => write!(f, "y.")?,
            None => {}
        }
        write!(
            f,
            "{}: observed {}, expected {} ± {}",
            self.field, self.observed, self.expected, self.tolerance
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Mismatch {}

fn check_field(
    field: Field,
    observed: f64,
    expected: Option<f64>,
    tolerance: f64,
) -> Result<(), Mismatch> {
    let Some(expected) = expected else {
        return Ok(());
    };
    if math::within(observed, expected, tolerance) {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        %field,
        observed,
        expected,
        tolerance,
        "statistic outside tolerance"
    );

    Err(Mismatch {
        axis: None,
        field,
        observed,
        expected,
        tolerance,
    })
}

/// Check every present field of `expected` against `observed`
///
/// Fields are checked in the order mean, variance, min, max; the first one
/// outside tolerance is returned.
///
/// ```
/// use samplestats::statistics::Stats;
/// use samplestats::validation::{check, Field, Validation};
///
/// let observed = Stats { mean: 0.0, variance: 0.0, min: 0.0, max: 0.0 };
///
/// let err = check(&observed, &Validation::new().tolerance(0.0).min(1.0)).unwrap_err();
/// assert_eq!(err.field, Field::Min);
/// assert_eq!(err.to_string(), "min: observed 0, expected 1 ± 0");
/// ```
pub fn check(observed: &Stats, expected: &Validation) -> Result<(), Mismatch> {
    let tolerance = expected.effective_tolerance();

    check_field(Field::Mean, observed.mean, expected.mean, tolerance)?;
    check_field(Field::Variance, observed.variance, expected.variance, tolerance)?;
    check_field(Field::Min, observed.min, expected.min, tolerance)?;
    check_field(Field::Max, observed.max, expected.max, tolerance)
}

/// True iff every present field of `expected` is within tolerance
///
/// Absent fields always pass, so an empty [`Validation`] accepts anything,
/// including the null record.
///
/// ```
/// use samplestats::statistics::observe;
/// use samplestats::validation::{validate, Validation};
///
/// let stats = observe(|| 1.0, 10);
///
/// assert!(validate(&stats, &Validation::new().tolerance(0.0).min(1.0).max(1.0)));
/// assert!(!validate(&stats, &Validation::new().tolerance(0.1).min(0.85)));
/// ```
pub fn validate(observed: &Stats, expected: &Validation) -> bool {
    check(observed, expected).is_ok()
}

/// Check a [`CovarianceStats`] record: x, then y, then the covariance
///
/// A top-level tolerance replaces the marginal ones; the covariance uses
/// the top-level tolerance or the default.
#[cfg(feature = "covariance")]
pub fn check_covariance(
    observed: &CovarianceStats,
    expected: &CovarianceValidation,
) -> Result<(), Mismatch> {
    if let Some(x) = &expected.x {
        check(&observed.x, &expected.resolve(x)).map_err(|m| Mismatch {
            axis: Some(Axis::X),
            ..m
        })?;
    }
    if let Some(y) = &expected.y {
        check(&observed.y, &expected.resolve(y)).map_err(|m| Mismatch {
            axis: Some(Axis::Y),
            ..m
        })?;
    }
    check_field(
        Field::Covariance,
        observed.covariance,
        expected.covariance,
        expected.effective_tolerance(),
    )
}

/// True iff the x, y and covariance expectations all hold
#[cfg(feature = "covariance")]
pub fn validate_covariance(observed: &CovarianceStats, expected: &CovarianceValidation) -> bool {
    check_covariance(observed, expected).is_ok()
}
