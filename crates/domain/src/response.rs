//! Synchronous responses and merchant-originated replies.

use serde::{Deserialize, Serialize};

use checkout_core::{GoogleOrderNumber, Money, SerialNumber};

use crate::notification::{MerchantCodeKind, Notification};

/// Where to send the buyer after a checkout was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRedirect {
    pub serial_number: SerialNumber,
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestReceived {
    pub serial_number: SerialNumber,
}

/// Acceptance of an order recurrence request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequestReceived {
    pub serial_number: SerialNumber,
    pub new_google_order_number: GoogleOrderNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationHistoryResponse {
    pub notifications: Vec<Notification>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDataTokenResponse {
    pub serial_number: SerialNumber,
    pub continue_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDataResponse {
    pub serial_number: SerialNumber,
    pub continue_token: String,
    pub has_more_notifications: bool,
    pub notifications: Vec<Notification>,
}

/// Reply to a notification, optionally echoing its serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAcknowledgment {
    pub serial_number: Option<SerialNumber>,
}

impl NotificationAcknowledgment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_notification(notification: &Notification) -> Self {
        Self {
            serial_number: Some(notification.serial_number().clone()),
        }
    }
}

/// Outcome of a coupon or gift certificate in a merchant calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCodeResult {
    pub kind: MerchantCodeKind,
    pub valid: bool,
    pub code: String,
    pub calculated_amount: Money,
    pub message: String,
}

/// Shipping and tax for one shipping method and one buyer address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCalculationResult {
    pub shipping_name: String,
    pub address_id: String,
    pub shipping_rate: Money,
    pub shippable: bool,
    pub total_tax: Option<Money>,
    pub merchant_code_results: Vec<MerchantCodeResult>,
}

/// Reply to a merchant calculation callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCalculationResults {
    pub results: Vec<MerchantCalculationResult>,
}
