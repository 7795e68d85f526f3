//! Order states and per-order value objects shared by commands and notifications.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use checkout_core::{DomainError, Money};

/// Financial state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialState {
    Reviewing,
    Chargeable,
    Charging,
    Charged,
    PaymentDeclined,
    Cancelled,
    CancelledByGoogle,
}

impl FinancialState {
    pub const ALL: [FinancialState; 7] = [
        FinancialState::Reviewing,
        FinancialState::Chargeable,
        FinancialState::Charging,
        FinancialState::Charged,
        FinancialState::PaymentDeclined,
        FinancialState::Cancelled,
        FinancialState::CancelledByGoogle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialState::Reviewing => "REVIEWING",
            FinancialState::Chargeable => "CHARGEABLE",
            FinancialState::Charging => "CHARGING",
            FinancialState::Charged => "CHARGED",
            FinancialState::PaymentDeclined => "PAYMENT_DECLINED",
            FinancialState::Cancelled => "CANCELLED",
            FinancialState::CancelledByGoogle => "CANCELLED_BY_GOOGLE",
        }
    }
}

impl fmt::Display for FinancialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("invalid financial state {s}")))
    }
}

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentState {
    New,
    Processing,
    Delivered,
    WillNotDeliver,
}

impl FulfillmentState {
    pub const ALL: [FulfillmentState; 4] = [
        FulfillmentState::New,
        FulfillmentState::Processing,
        FulfillmentState::Delivered,
        FulfillmentState::WillNotDeliver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentState::New => "NEW",
            FulfillmentState::Processing => "PROCESSING",
            FulfillmentState::Delivered => "DELIVERED",
            FulfillmentState::WillNotDeliver => "WILL_NOT_DELIVER",
        }
    }
}

impl fmt::Display for FulfillmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("invalid fulfillment state {s}")))
    }
}

/// Carrier plus tracking number of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingData {
    pub carrier: String,
    pub tracking_number: String,
}

impl TrackingData {
    pub fn new(carrier: impl Into<String>, tracking_number: impl Into<String>) -> Self {
        Self {
            carrier: carrier.into(),
            tracking_number: tracking_number.into(),
        }
    }
}

/// A merchant item referenced by an item-level command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub merchant_item_id: String,
    pub tracking_data: Vec<TrackingData>,
}

impl ItemInfo {
    pub fn new(merchant_item_id: impl Into<String>) -> Self {
        Self {
            merchant_item_id: merchant_item_id.into(),
            tracking_data: Vec::new(),
        }
    }

    pub fn add_tracking_data(&mut self, carrier: impl Into<String>, tracking_number: impl Into<String>) -> &TrackingData {
        self.tracking_data.push(TrackingData::new(carrier, tracking_number));
        let last = self.tracking_data.len() - 1;
        &self.tracking_data[last]
    }

    pub fn with_tracking_data(mut self, carrier: impl Into<String>, tracking_number: impl Into<String>) -> Self {
        self.add_tracking_data(carrier, tracking_number);
        self
    }
}

/// Processing fee reported with a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeFee {
    pub flat: Money,
    pub percentage: f64,
    pub total: Money,
}
