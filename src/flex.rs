//! Numbers that upstream feeds send as JSON numbers in one document and as
//! strings in the next.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Integer decoded from either a JSON number or its string form.
/// The empty string decodes to [`FlexInt::EMPTY`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FlexInt(pub i64);

impl FlexInt {
    pub const EMPTY: FlexInt = FlexInt(-1);

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<FlexInt> for i64 {
    fn from(value: FlexInt) -> Self {
        value.0
    }
}

impl FromStr for FlexInt {
    type Err = ParseIntError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Ok(FlexInt::EMPTY);
        }
        raw.parse::<i64>().map(FlexInt).inspect_err(|e| {
            warn!(value = %raw, error = %e, "flexible integer is not numeric");
        })
    }
}

struct FlexIntVisitor;

impl<'de> Visitor<'de> for FlexIntVisitor {
    type Value = FlexInt;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlexInt, E> {
        Ok(FlexInt(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlexInt, E> {
        i64::try_from(v)
            .map(FlexInt)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FlexInt, E> {
        v.parse::<FlexInt>()
            .map_err(|e| E::custom(format_args!("invalid flexible integer `{v}`: {e}")))
    }

    // null leaves the zero value, same as an absent field
    fn visit_unit<E: de::Error>(self) -> Result<FlexInt, E> {
        Ok(FlexInt::default())
    }
}

impl<'de> Deserialize<'de> for FlexInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexIntVisitor)
    }
}

/// Float decoded from either a JSON number or its string form.
/// The empty string decodes to `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FlexFloat(pub f64);

impl FlexFloat {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<FlexFloat> for f64 {
    fn from(value: FlexFloat) -> Self {
        value.0
    }
}

impl FromStr for FlexFloat {
    type Err = FlexFloatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Ok(FlexFloat(0.0));
        }
        let parsed = raw.parse::<f64>().inspect_err(|e| {
            warn!(value = %raw, error = %e, "flexible float is not numeric");
        })?;
        if !parsed.is_finite() {
            warn!(value = %raw, "flexible float is not finite");
            return Err(FlexFloatError::NotFinite(raw.to_string()));
        }
        Ok(FlexFloat(parsed))
    }
}

/// Text that does not hold a finite float.
#[derive(Debug, Error)]
pub enum FlexFloatError {
    #[error(transparent)]
    Parse(#[from] ParseFloatError),
    #[error("`{0}` is not a finite number")]
    NotFinite(String),
}

struct FlexFloatVisitor;

impl<'de> Visitor<'de> for FlexFloatVisitor {
    type Value = FlexFloat;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlexFloat, E> {
        Ok(FlexFloat(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlexFloat, E> {
        Ok(FlexFloat(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FlexFloat, E> {
        Ok(FlexFloat(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FlexFloat, E> {
        v.parse::<FlexFloat>()
            .map_err(|e| E::custom(format_args!("invalid flexible float `{v}`: {e}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FlexFloat, E> {
        Ok(FlexFloat::default())
    }
}

impl<'de> Deserialize<'de> for FlexFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexFloatVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_sentinel() {
        assert_eq!("".parse::<FlexInt>().unwrap(), FlexInt::EMPTY);
        assert_eq!("".parse::<FlexFloat>().unwrap(), FlexFloat(0.0));
    }

    #[test]
    fn rejects_non_finite_float_text() {
        for raw in ["nan", "NaN", "inf", "-infinity"] {
            assert!(
                matches!(raw.parse::<FlexFloat>(), Err(FlexFloatError::NotFinite(_))),
                "{raw} should not decode"
            );
            assert!(serde_json::from_str::<FlexFloat>(&format!("\"{raw}\"")).is_err());
        }
    }

    #[test]
    fn rejects_fractional_integer() {
        assert!(serde_json::from_str::<FlexInt>("2.5").is_err());
        assert!(serde_json::from_str::<FlexInt>("\"2.5\"").is_err());
    }
}
