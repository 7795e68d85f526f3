//! Third-party tracking URLs filled in by the provider after checkout.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use checkout_core::{DomainError, DomainResult};

/// Order value substituted into a URL parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlParameterType {
    BuyerId,
    OrderId,
    OrderSubtotal,
    OrderSubtotalPlusTax,
    OrderSubtotalPlusShipping,
    OrderTotal,
    TaxAmount,
    ShippingAmount,
    CouponAmount,
    BillingCity,
    BillingRegion,
    BillingPostalCode,
    BillingCountryCode,
    ShippingCity,
    ShippingRegion,
    ShippingPostalCode,
    ShippingCountryCode,
}

impl UrlParameterType {
    pub const ALL: [UrlParameterType; 17] = [
        UrlParameterType::BuyerId,
        UrlParameterType::OrderId,
        UrlParameterType::OrderSubtotal,
        UrlParameterType::OrderSubtotalPlusTax,
        UrlParameterType::OrderSubtotalPlusShipping,
        UrlParameterType::OrderTotal,
        UrlParameterType::TaxAmount,
        UrlParameterType::ShippingAmount,
        UrlParameterType::CouponAmount,
        UrlParameterType::BillingCity,
        UrlParameterType::BillingRegion,
        UrlParameterType::BillingPostalCode,
        UrlParameterType::BillingCountryCode,
        UrlParameterType::ShippingCity,
        UrlParameterType::ShippingRegion,
        UrlParameterType::ShippingPostalCode,
        UrlParameterType::ShippingCountryCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlParameterType::BuyerId => "buyer-id",
            UrlParameterType::OrderId => "order-id",
            UrlParameterType::OrderSubtotal => "order-subtotal",
            UrlParameterType::OrderSubtotalPlusTax => "order-subtotal-plus-tax",
            UrlParameterType::OrderSubtotalPlusShipping => "order-subtotal-plus-shipping",
            UrlParameterType::OrderTotal => "order-total",
            UrlParameterType::TaxAmount => "tax-amount",
            UrlParameterType::ShippingAmount => "shipping-amount",
            UrlParameterType::CouponAmount => "coupon-amount",
            UrlParameterType::BillingCity => "billing-city",
            UrlParameterType::BillingRegion => "billing-region",
            UrlParameterType::BillingPostalCode => "billing-postal-code",
            UrlParameterType::BillingCountryCode => "billing-country-code",
            UrlParameterType::ShippingCity => "shipping-city",
            UrlParameterType::ShippingRegion => "shipping-region",
            UrlParameterType::ShippingPostalCode => "shipping-postal-code",
            UrlParameterType::ShippingCountryCode => "shipping-country-code",
        }
    }
}

impl fmt::Display for UrlParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlParameterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("invalid url-parameter type: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParameter {
    pub name: String,
    pub parameter_type: UrlParameterType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterizedUrl {
    pub url: String,
    pub parameters: Vec<UrlParameter>,
}

impl ParameterizedUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            parameters: Vec::new(),
        }
    }

    /// Add a parameter whose type is given by its wire name (`order-total`).
    pub fn add_parameter(&mut self, name: impl Into<String>, parameter_type: &str) -> DomainResult<&UrlParameter> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("url-parameter name must not be empty"));
        }
        let parameter_type = parameter_type.parse()?;
        self.parameters.push(UrlParameter { name, parameter_type });
        let last = self.parameters.len() - 1;
        Ok(&self.parameters[last])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_url_has_no_parameters() {
        let url = ParameterizedUrl::new("http://testurl.com");
        assert_eq!(url.url, "http://testurl.com");
        assert!(url.parameters.is_empty());
    }

    #[test]
    fn add_parameter_validates_type() {
        let mut url = ParameterizedUrl::new("http://testurl.com");
        let param = url.add_parameter("orderID", "order-id").unwrap();
        assert_eq!(param.parameter_type, UrlParameterType::OrderId);

        let err = url.add_parameter("total", "grand-total").unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error"),
        }
        assert_eq!(url.parameters.len(), 1);
    }

    #[test]
    fn add_parameter_rejects_blank_name() {
        let mut url = ParameterizedUrl::new("http://testurl.com");
        assert!(url.add_parameter("  ", "order-id").is_err());
    }

    #[test]
    fn every_type_round_trips_through_its_name() {
        for t in UrlParameterType::ALL {
            assert_eq!(t.as_str().parse::<UrlParameterType>().unwrap(), t);
        }
    }
}
