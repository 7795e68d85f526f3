//! Money value object: integer minor units plus an ISO currency code.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// An amount of money in minor units (cents, pence).
///
/// Formatting always yields exactly two fractional digits, independent of
/// locale: `Money::new(22606, "GBP").to_string() == "226.06"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount_minor_units: i64,
    currency: String,
}

impl Money {
    pub fn new(amount_minor_units: i64, currency: impl Into<String>) -> Self {
        Self {
            amount_minor_units,
            currency: currency.into(),
        }
    }

    /// Parse a decimal amount (`"226.06"`) exactly and attach `currency`.
    ///
    /// The value is scaled by 100 and rounded half away from zero, so
    /// `"0.005"` becomes one minor unit. Binary floats are never involved.
    pub fn from_decimal_str(text: &str, currency: impl Into<String>) -> DomainResult<Self> {
        let trimmed = text.trim();
        let value: Decimal = trimmed
            .parse()
            .map_err(|e| DomainError::validation(format!("money amount '{trimmed}': {e}")))?;

        let out_of_range = || DomainError::validation(format!("money amount '{trimmed}' out of range"));
        let minor = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(out_of_range)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or_else(out_of_range)?;

        Ok(Self::new(minor, currency))
    }

    pub fn amount_minor_units(&self) -> i64 {
        self.amount_minor_units
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Amount in major units as an exact decimal.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount_minor_units, 2)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor_units == 0
    }
}

impl ValueObject for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_minor_units < 0 { "-" } else { "" };
        let abs = self.amount_minor_units.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
