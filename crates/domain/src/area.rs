//! Geographic areas used by tax rules, shipping restrictions and address filters.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use checkout_core::{DomainError, DomainResult};

/// Fixed region codes for a US country area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsCountryRegion {
    #[serde(rename = "CONTINENTAL_48")]
    Continental48,
    #[serde(rename = "FULL_50_STATES")]
    Full50States,
    All,
}

impl UsCountryRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsCountryRegion::Continental48 => "CONTINENTAL_48",
            UsCountryRegion::Full50States => "FULL_50_STATES",
            UsCountryRegion::All => "ALL",
        }
    }
}

impl fmt::Display for UsCountryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsCountryRegion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONTINENTAL_48" => Ok(UsCountryRegion::Continental48),
            "FULL_50_STATES" => Ok(UsCountryRegion::Full50States),
            "ALL" => Ok(UsCountryRegion::All),
            other => Err(DomainError::validation(format!("invalid US country area: {other}"))),
        }
    }
}

/// Two-letter upper-case US state code (`CA`, `NY`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UsState(String);

impl UsState {
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let valid = code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase());
        if !valid {
            return Err(DomainError::validation(format!("invalid US state: {code}")));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UsState {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UsState> for String {
    fn from(value: UsState) -> Self {
        value.0
    }
}

/// A geographic matcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Area {
    World,
    UsCountry { region: UsCountryRegion },
    UsState { state: UsState },
    UsZip { pattern: String },
    Postal {
        country_code: String,
        postal_code_pattern: Option<String>,
    },
}

impl Area {
    pub fn world() -> Self {
        Area::World
    }

    pub fn us_country(region: UsCountryRegion) -> Self {
        Area::UsCountry { region }
    }

    /// Parse the region from its wire code (`CONTINENTAL_48`, `FULL_50_STATES`, `ALL`).
    pub fn parse_us_country(region: &str) -> DomainResult<Self> {
        Ok(Area::UsCountry {
            region: region.parse()?,
        })
    }

    pub fn us_state(code: impl Into<String>) -> DomainResult<Self> {
        Ok(Area::UsState {
            state: UsState::new(code)?,
        })
    }

    /// Zip pattern such as `94043` or `940*`.
    pub fn us_zip(pattern: impl Into<String>) -> Self {
        Area::UsZip {
            pattern: pattern.into(),
        }
    }

    pub fn postal(country_code: impl Into<String>, postal_code_pattern: Option<String>) -> Self {
        Area::Postal {
            country_code: country_code.into(),
            postal_code_pattern,
        }
    }
}
