//! Delivery methods offered at checkout.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use checkout_core::{Dimension, DomainError, Money};

use crate::address::AnonymousAddress;
use crate::area::Area;

/// Allowed/excluded areas plus the US PO box switch.
///
/// Used for both shipping restrictions and merchant-calculated address filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaFilter {
    pub allowed_areas: Vec<Area>,
    pub excluded_areas: Vec<Area>,
    pub allow_us_po_box: bool,
}

impl Default for AreaFilter {
    fn default() -> Self {
        Self {
            allowed_areas: Vec::new(),
            excluded_areas: Vec::new(),
            allow_us_po_box: true,
        }
    }
}

impl AreaFilter {
    pub fn allow(mut self, area: Area) -> Self {
        self.allowed_areas.push(area);
        self
    }

    pub fn exclude(mut self, area: Area) -> Self {
        self.excluded_areas.push(area);
        self
    }

    pub fn with_allow_us_po_box(mut self, allow: bool) -> Self {
        self.allow_us_po_box = allow;
        self
    }

    /// Whether any area is listed at all.
    pub fn has_areas(&self) -> bool {
        !self.allowed_areas.is_empty() || !self.excluded_areas.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupShipping {
    pub name: String,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRateShipping {
    pub name: String,
    pub price: Money,
    pub shipping_restrictions: AreaFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCalculatedShipping {
    pub name: String,
    /// Fallback price if the merchant calculation callback fails.
    pub price: Money,
    pub shipping_restrictions: AreaFilter,
    pub address_filters: AreaFilter,
}

/// Carriers supported for carrier-calculated shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingCompany {
    FedEx,
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "USPS")]
    Usps,
}

impl ShippingCompany {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingCompany::FedEx => "FedEx",
            ShippingCompany::Ups => "UPS",
            ShippingCompany::Usps => "USPS",
        }
    }
}

impl fmt::Display for ShippingCompany {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingCompany {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FedEx" => Ok(ShippingCompany::FedEx),
            "UPS" => Ok(ShippingCompany::Ups),
            "USPS" => Ok(ShippingCompany::Usps),
            other => Err(DomainError::validation(format!("unknown shipping company: {other}"))),
        }
    }
}

/// How the parcel reaches the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierPickup {
    DropOff,
    RegularPickup,
    SpecialPickup,
}

impl CarrierPickup {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierPickup::DropOff => "DROP_OFF",
            CarrierPickup::RegularPickup => "REGULAR_PICKUP",
            CarrierPickup::SpecialPickup => "SPECIAL_PICKUP",
        }
    }
}

impl FromStr for CarrierPickup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DROP_OFF" => Ok(CarrierPickup::DropOff),
            "REGULAR_PICKUP" => Ok(CarrierPickup::RegularPickup),
            "SPECIAL_PICKUP" => Ok(CarrierPickup::SpecialPickup),
            other => Err(DomainError::validation(format!("unknown carrier pickup: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryAddressCategory {
    Residential,
    Commercial,
}

impl DeliveryAddressCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryAddressCategory::Residential => "RESIDENTIAL",
            DeliveryAddressCategory::Commercial => "COMMERCIAL",
        }
    }
}

impl FromStr for DeliveryAddressCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESIDENTIAL" => Ok(DeliveryAddressCategory::Residential),
            "COMMERCIAL" => Ok(DeliveryAddressCategory::Commercial),
            other => Err(DomainError::validation(format!("unknown delivery address category: {other}"))),
        }
    }
}

/// A carrier service the buyer may pick (e.g. FedEx "Priority Overnight").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierCalculatedShippingOption {
    pub shipping_company: ShippingCompany,
    pub shipping_type: String,
    /// Default price shown when the carrier rate is unavailable.
    pub price: Money,
    pub carrier_pickup: Option<CarrierPickup>,
    pub additional_fixed_charge: Option<Money>,
    pub additional_variable_charge_percent: Option<f64>,
}

impl CarrierCalculatedShippingOption {
    pub fn new(shipping_company: ShippingCompany, shipping_type: impl Into<String>, price: Money) -> Self {
        Self {
            shipping_company,
            shipping_type: shipping_type.into(),
            price,
            carrier_pickup: None,
            additional_fixed_charge: None,
            additional_variable_charge_percent: None,
        }
    }
}

/// A package shipped from a merchant location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPackage {
    pub ship_from: AnonymousAddress,
    pub delivery_address_category: Option<DeliveryAddressCategory>,
    pub height: Option<Dimension>,
    pub length: Option<Dimension>,
    pub width: Option<Dimension>,
}

impl ShippingPackage {
    pub fn new(ship_from: AnonymousAddress) -> Self {
        Self {
            ship_from,
            delivery_address_category: None,
            height: None,
            length: None,
            width: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierCalculatedShipping {
    pub options: Vec<CarrierCalculatedShippingOption>,
    pub packages: Vec<ShippingPackage>,
}

/// Closed set of delivery methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryMethod {
    Pickup(PickupShipping),
    FlatRate(FlatRateShipping),
    MerchantCalculated(MerchantCalculatedShipping),
    CarrierCalculated(CarrierCalculatedShipping),
}

impl DeliveryMethod {
    pub fn pickup(name: impl Into<String>, price: Money) -> Self {
        DeliveryMethod::Pickup(PickupShipping {
            name: name.into(),
            price,
        })
    }

    pub fn flat_rate(name: impl Into<String>, price: Money, shipping_restrictions: AreaFilter) -> Self {
        DeliveryMethod::FlatRate(FlatRateShipping {
            name: name.into(),
            price,
            shipping_restrictions,
        })
    }

    pub fn merchant_calculated(
        name: impl Into<String>,
        price: Money,
        shipping_restrictions: AreaFilter,
        address_filters: AreaFilter,
    ) -> Self {
        DeliveryMethod::MerchantCalculated(MerchantCalculatedShipping {
            name: name.into(),
            price,
            shipping_restrictions,
            address_filters,
        })
    }

    /// Display name, absent for carrier-calculated shipping.
    pub fn name(&self) -> Option<&str> {
        match self {
            DeliveryMethod::Pickup(m) => Some(&m.name),
            DeliveryMethod::FlatRate(m) => Some(&m.name),
            DeliveryMethod::MerchantCalculated(m) => Some(&m.name),
            DeliveryMethod::CarrierCalculated(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn area_filter_allows_po_boxes_by_default() {
        let filter = AreaFilter::default();
        assert!(filter.allow_us_po_box);
        assert!(!filter.has_areas());
    }

    #[test]
    fn area_filter_reports_listed_areas() {
        let filter = AreaFilter::default().exclude(Area::us_state("AK").unwrap());
        assert!(filter.has_areas());
    }

    #[rstest]
    #[case("FedEx", ShippingCompany::FedEx)]
    #[case("UPS", ShippingCompany::Ups)]
    #[case("USPS", ShippingCompany::Usps)]
    fn shipping_company_codes(#[case] code: &str, #[case] company: ShippingCompany) {
        assert_eq!(code.parse::<ShippingCompany>().unwrap(), company);
        assert_eq!(company.to_string(), code);
    }

    #[test]
    fn carrier_pickup_and_category_reject_unknown_codes() {
        assert!("HELICOPTER".parse::<CarrierPickup>().is_err());
        assert!("INDUSTRIAL".parse::<DeliveryAddressCategory>().is_err());
        assert_eq!("REGULAR_PICKUP".parse::<CarrierPickup>().unwrap(), CarrierPickup::RegularPickup);
    }

    #[test]
    fn carrier_calculated_shipping_has_no_name() {
        let method = DeliveryMethod::CarrierCalculated(CarrierCalculatedShipping::default());
        assert!(method.name().is_none());
        assert_eq!(DeliveryMethod::pickup("Store", Money::new(0, "USD")).name(), Some("Store"));
    }
}
