//! Types that can be used in other crates

use std::fmt::Display;

use error_stack::report;
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ValidationError};

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// gets amount as i64 value
    pub fn get_amount_as_i64(&self) -> i64 {
        self.0
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Converts an amount in a two decimal currency's major unit, rounding half to even.
    #[allow(clippy::as_conversions)]
    pub fn from_major_unit_as_f64(amount: f64) -> CustomResult<Self, ValidationError> {
        let minor = (amount * 100.0).round_ties_even();
        if !minor.is_finite() || minor < i64::MIN as f64 || minor > i64::MAX as f64 {
            return Err(report!(ValidationError::InvalidValue {
                message: format!("amount {amount} cannot be represented in minor units"),
            }));
        }
        Ok(Self(minor as i64))
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn minor_unit_from_major_unit_rounds_half_to_even() {
        assert_eq!(MinorUnit::from_major_unit_as_f64(12.5).unwrap(), MinorUnit::new(1250));
        assert_eq!(MinorUnit::from_major_unit_as_f64(0.125).unwrap(), MinorUnit::new(12));
        assert_eq!(MinorUnit::from_major_unit_as_f64(0.135).unwrap(), MinorUnit::new(14));
    }

    #[test]
    fn minor_unit_rejects_non_finite_amounts() {
        assert!(MinorUnit::from_major_unit_as_f64(f64::NAN).is_err());
        assert!(MinorUnit::from_major_unit_as_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn minor_unit_serializes_as_plain_number() {
        let amount = MinorUnit::new(100);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "100");
        assert_eq!(amount.to_string(), "100");
    }
}
