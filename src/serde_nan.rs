//! Serde adapter for NaN-capable statistic fields
//!
//! NaN is written as `None` (JSON `null`) and `None` is read back as NaN, so
//! the null record and degenerate variances survive a round trip. Formats
//! that also write infinities as `null` read them back as NaN.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_nan() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(value)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
