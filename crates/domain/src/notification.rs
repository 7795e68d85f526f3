//! Inbound notifications about state changes of existing orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use checkout_core::{GoogleOrderNumber, Money, SerialNumber};

use crate::address::Address;
use crate::cart::ShoppingCart;
use crate::order::{ChargeFee, FinancialState, FulfillmentState};

/// Fields every notification carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationHeader {
    pub serial_number: SerialNumber,
    pub google_order_number: GoogleOrderNumber,
    pub timestamp: DateTime<Utc>,
}

/// Shipping line applied to a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingAdjustmentKind {
    FlatRate,
    MerchantCalculated,
    Pickup,
    CarrierCalculated,
}

impl ShippingAdjustmentKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ShippingAdjustmentKind::FlatRate => "flat-rate-shipping-adjustment",
            ShippingAdjustmentKind::MerchantCalculated => "merchant-calculated-shipping-adjustment",
            ShippingAdjustmentKind::Pickup => "pickup-shipping-adjustment",
            ShippingAdjustmentKind::CarrierCalculated => "carrier-calculated-shipping-adjustment",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "flat-rate-shipping-adjustment" => Some(ShippingAdjustmentKind::FlatRate),
            "merchant-calculated-shipping-adjustment" => Some(ShippingAdjustmentKind::MerchantCalculated),
            "pickup-shipping-adjustment" => Some(ShippingAdjustmentKind::Pickup),
            "carrier-calculated-shipping-adjustment" => Some(ShippingAdjustmentKind::CarrierCalculated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAdjustment {
    pub kind: ShippingAdjustmentKind,
    pub shipping_name: Option<String>,
    pub shipping_cost: Option<Money>,
}

/// Coupon or gift certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantCodeKind {
    Coupon,
    GiftCertificate,
}

/// A coupon or gift certificate applied to a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCodeAdjustment {
    pub kind: MerchantCodeKind,
    pub code: String,
    pub calculated_amount: Option<Money>,
    pub applied_amount: Option<Money>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAdjustment {
    pub adjustment_total: Option<Money>,
    pub total_tax: Option<Money>,
    pub merchant_calculation_successful: Option<bool>,
    pub shipping: Option<ShippingAdjustment>,
    pub merchant_codes: Vec<MerchantCodeAdjustment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderNotification {
    pub header: NotificationHeader,
    pub buyer_id: Option<String>,
    pub buyer_billing_address: Address,
    pub buyer_shipping_address: Address,
    pub email_allowed: Option<bool>,
    pub shopping_cart: ShoppingCart,
    pub order_adjustment: Option<OrderAdjustment>,
    pub order_total: Money,
    pub financial_order_state: FinancialState,
    pub fulfillment_order_state: FulfillmentState,
}

/// Fraud-screening data for the buyer's payment instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInformation {
    pub billing_address: Address,
    pub ip_address: Option<String>,
    pub avs_response: Option<String>,
    pub cvn_response: Option<String>,
    pub eligible_for_protection: bool,
    /// Last digits of the card; kept as text so leading zeros survive.
    pub partial_cc_number: Option<String>,
    /// Age of the buyer's account in days.
    pub buyer_account_age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInformationNotification {
    pub header: NotificationHeader,
    pub risk_information: RiskInformation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStateChangeNotification {
    pub header: NotificationHeader,
    pub new_financial_order_state: FinancialState,
    pub previous_financial_order_state: FinancialState,
    pub new_fulfillment_order_state: FulfillmentState,
    pub previous_fulfillment_order_state: FulfillmentState,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeAmountNotification {
    pub header: NotificationHeader,
    pub latest_charge_amount: Money,
    pub total_charge_amount: Money,
    pub latest_charge_fee: Option<ChargeFee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationAmountNotification {
    pub header: NotificationHeader,
    pub authorization_amount: Money,
    pub authorization_expiration_date: Option<DateTime<Utc>>,
    pub avs_response: Option<String>,
    pub cvn_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundAmountNotification {
    pub header: NotificationHeader,
    pub latest_refund_amount: Money,
    pub total_refund_amount: Money,
    pub latest_fee_refund_amount: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargebackAmountNotification {
    pub header: NotificationHeader,
    pub latest_chargeback_amount: Money,
    pub total_chargeback_amount: Money,
    pub latest_fee_refund_amount: Option<Money>,
    pub latest_chargeback_fee_amount: Option<Money>,
}

/// All inbound notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Notification {
    NewOrder(NewOrderNotification),
    RiskInformation(RiskInformationNotification),
    OrderStateChange(OrderStateChangeNotification),
    ChargeAmount(ChargeAmountNotification),
    AuthorizationAmount(AuthorizationAmountNotification),
    RefundAmount(RefundAmountNotification),
    ChargebackAmount(ChargebackAmountNotification),
}

impl Notification {
    /// Root element name of the notification document.
    pub fn notification_type(&self) -> &'static str {
        match self {
            Notification::NewOrder(_) => "new-order-notification",
            Notification::RiskInformation(_) => "risk-information-notification",
            Notification::OrderStateChange(_) => "order-state-change-notification",
            Notification::ChargeAmount(_) => "charge-amount-notification",
            Notification::AuthorizationAmount(_) => "authorization-amount-notification",
            Notification::RefundAmount(_) => "refund-amount-notification",
            Notification::ChargebackAmount(_) => "chargeback-amount-notification",
        }
    }

    pub fn header(&self) -> &NotificationHeader {
        match self {
            Notification::NewOrder(n) => &n.header,
            Notification::RiskInformation(n) => &n.header,
            Notification::OrderStateChange(n) => &n.header,
            Notification::ChargeAmount(n) => &n.header,
            Notification::AuthorizationAmount(n) => &n.header,
            Notification::RefundAmount(n) => &n.header,
            Notification::ChargebackAmount(n) => &n.header,
        }
    }

    pub fn serial_number(&self) -> &SerialNumber {
        &self.header().serial_number
    }

    pub fn google_order_number(&self) -> &GoogleOrderNumber {
        &self.header().google_order_number
    }

    /// When the provider emitted the notification.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.header().timestamp
    }
}
