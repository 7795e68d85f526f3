//! Buyer and ship-from addresses.

use serde::{Deserialize, Serialize};

/// Location part of an address, without any personal data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymousAddress {
    pub address_id: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub region: String,
    pub country_code: String,
}

impl AnonymousAddress {
    pub fn new(
        city: impl Into<String>,
        region: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address_id: None,
            city: city.into(),
            postal_code: postal_code.into(),
            region: region.into(),
            country_code: country_code.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.address_id = Some(id.into());
        self
    }
}

/// Full postal address with contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub location: AnonymousAddress,
    pub contact_name: Option<String>,
    pub company_name: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
}

impl Address {
    pub fn city(&self) -> &str {
        &self.location.city
    }

    pub fn region(&self) -> &str {
        &self.location.region
    }

    pub fn postal_code(&self) -> &str {
        &self.location.postal_code
    }

    pub fn country_code(&self) -> &str {
        &self.location.country_code
    }
}
