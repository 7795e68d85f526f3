//! Physical measurements carried on items and shipping packages.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A measurement with a unit of measure and an exact decimal value.
macro_rules! impl_measurement {
    ($t:ident, $default_unit:literal, $name:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $t {
            unit: String,
            value: Decimal,
        }

        impl $t {
            #[doc = concat!("Unit used when none is given: `", $default_unit, "`.")]
            pub const DEFAULT_UNIT: &'static str = $default_unit;

            pub fn new(value: Decimal) -> Self {
                Self {
                    unit: Self::DEFAULT_UNIT.to_string(),
                    value,
                }
            }

            pub fn with_unit(value: Decimal, unit: impl Into<String>) -> Self {
                Self {
                    unit: unit.into(),
                    value,
                }
            }

            /// Build from the textual `unit`/`value` attribute pair.
            pub fn parse(unit: Option<&str>, value: &str) -> Result<Self, DomainError> {
                let value = Decimal::from_str(value.trim())
                    .map_err(|e| DomainError::validation(format!("{} value '{}': {}", $name, value, e)))?;
                Ok(Self::with_unit(value, unit.unwrap_or(Self::DEFAULT_UNIT)))
            }

            pub fn unit(&self) -> &str {
                &self.unit
            }

            pub fn value(&self) -> Decimal {
                self.value
            }

            /// Plain decimal rendering of the value: `2.2`, `10`, `0.5`.
            pub fn value_text(&self) -> String {
                self.value.normalize().to_string()
            }
        }

        impl ValueObject for $t {}

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.value_text(), self.unit)
            }
        }
    };
}

impl_measurement!(Weight, "LB", "Weight");
impl_measurement!(Dimension, "IN", "Dimension");
