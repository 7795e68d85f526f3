//! Outbound commands.
//!
//! A command is a request to the checkout provider: start a checkout, charge
//! an order, ship items, pull a report. Every variant carries exactly the data
//! its wire document needs.
//!
//! ## Order targeting
//!
//! All commands acting on an existing order carry a [`GoogleOrderNumber`];
//! [`Command::google_order_number`] exposes it uniformly. Checkout, the order
//! report and the notification polling requests are not order-targeted.
//!
//! Validation happens at construction: report date order, states and tax
//! table membership are checked before a command can exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use checkout_core::{DomainError, DomainResult, GoogleOrderNumber, Money, SerialNumber};

use crate::cart::ShoppingCart;
use crate::order::{FinancialState, FulfillmentState, ItemInfo, TrackingData};
use crate::parameterized_url::ParameterizedUrl;
use crate::shipping::DeliveryMethod;
use crate::tax::TaxTable;

/// Merchant calculation callback settings of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCalculations {
    pub url: String,
    pub accept_merchant_coupons: Option<bool>,
    pub accept_gift_certificates: Option<bool>,
}

impl MerchantCalculations {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            accept_merchant_coupons: None,
            accept_gift_certificates: None,
        }
    }
}

/// Command: start a checkout for a shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutCommand {
    pub shopping_cart: ShoppingCart,
    tax_tables: Vec<TaxTable>,
    pub shipping_methods: Vec<DeliveryMethod>,
    pub parameterized_urls: Vec<ParameterizedUrl>,
    pub edit_cart_url: Option<String>,
    pub continue_shopping_url: Option<String>,
    pub request_buyer_phone_number: Option<bool>,
    pub merchant_calculations: Option<MerchantCalculations>,
    pub platform_id: Option<String>,
    pub analytics_data: Option<String>,
}

impl CheckoutCommand {
    /// Create a checkout with the tax tables in effect. The first table is the default one.
    pub fn new(tax_tables: Vec<TaxTable>) -> Self {
        Self {
            shopping_cart: ShoppingCart::new(),
            tax_tables,
            shipping_methods: Vec::new(),
            parameterized_urls: Vec::new(),
            edit_cart_url: None,
            continue_shopping_url: None,
            request_buyer_phone_number: None,
            merchant_calculations: None,
            platform_id: None,
            analytics_data: None,
        }
    }

    pub fn tax_tables(&self) -> &[TaxTable] {
        &self.tax_tables
    }

    /// Append a table. Appending never changes which table is the default.
    pub fn register_tax_table(&mut self, table: TaxTable) {
        self.tax_tables.push(table);
    }

    /// Select a registered tax table for the cart item at `item_index`.
    pub fn assign_tax_table(&mut self, item_index: usize, table: &TaxTable) -> DomainResult<()> {
        let item = self
            .shopping_cart
            .items
            .get_mut(item_index)
            .ok_or_else(|| DomainError::validation(format!("no cart item at index {item_index}")))?;
        item.line.set_tax_table(table, &self.tax_tables)
    }

    pub fn add_shipping_method(&mut self, method: DeliveryMethod) {
        self.shipping_methods.push(method);
    }

    pub fn add_parameterized_url(&mut self, url: impl Into<String>) -> &mut ParameterizedUrl {
        self.parameterized_urls.push(ParameterizedUrl::new(url));
        let last = self.parameterized_urls.len() - 1;
        &mut self.parameterized_urls[last]
    }
}

/// Command: charge an order, optionally for a partial amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeOrder {
    pub google_order_number: GoogleOrderNumber,
    pub amount: Option<Money>,
}

/// Command: charge and mark as shipped in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeAndShipOrder {
    pub google_order_number: GoogleOrderNumber,
    pub amount: Option<Money>,
    pub tracking_data: Option<TrackingData>,
    pub send_email: bool,
}

/// Command: refund (part of) a charged order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundOrder {
    pub google_order_number: GoogleOrderNumber,
    pub amount: Option<Money>,
    pub reason: String,
    pub comment: Option<String>,
}

/// Command: cancel an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub google_order_number: GoogleOrderNumber,
    pub reason: String,
    pub comment: Option<String>,
}

/// Commands that need nothing but the order number.
macro_rules! order_command {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
            pub struct $name {
                pub google_order_number: GoogleOrderNumber,
            }

            impl $name {
                pub fn new(google_order_number: GoogleOrderNumber) -> Self {
                    Self { google_order_number }
                }
            }
        )+
    };
}

order_command!(
    /// Command: re-authorize the buyer's card.
    AuthorizeOrder,
    /// Command: move the order to `PROCESSING`.
    ProcessOrder,
    ArchiveOrder,
    UnarchiveOrder,
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMerchantOrderNumber {
    pub google_order_number: GoogleOrderNumber,
    pub merchant_order_number: String,
}

/// Command: mark an order as delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverOrder {
    pub google_order_number: GoogleOrderNumber,
    pub tracking_data: Option<TrackingData>,
    pub send_email: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTrackingData {
    pub google_order_number: GoogleOrderNumber,
    pub tracking_data: TrackingData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendBuyerMessage {
    pub google_order_number: GoogleOrderNumber,
    pub message: String,
    pub send_email: Option<bool>,
}

/// Command: charge a new recurrence of a subscription order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRecurrenceRequest {
    pub google_order_number: GoogleOrderNumber,
    pub shopping_cart: ShoppingCart,
}

/// Item-level command (ship, backorder, return, reset shipping information).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsCommand {
    pub google_order_number: GoogleOrderNumber,
    pub item_infos: Vec<ItemInfo>,
    pub send_email: bool,
}

impl ItemsCommand {
    pub fn new(google_order_number: GoogleOrderNumber) -> Self {
        Self {
            google_order_number,
            item_infos: Vec::new(),
            send_email: false,
        }
    }

    pub fn with_item(mut self, item_info: ItemInfo) -> Self {
        self.item_infos.push(item_info);
        self
    }
}

/// Item-level commands that carry nothing beyond their [`ItemsCommand`].
macro_rules! items_command {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
            pub struct $name {
                pub items: ItemsCommand,
            }

            impl $name {
                pub fn new(google_order_number: GoogleOrderNumber) -> Self {
                    Self {
                        items: ItemsCommand::new(google_order_number),
                    }
                }

                pub fn with_item(mut self, item_info: ItemInfo) -> Self {
                    self.items.item_infos.push(item_info);
                    self
                }
            }
        )+
    };
}

items_command!(ShipItems, BackorderItems, ReturnItems, ResetItemsShippingInformation);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelItems {
    pub items: ItemsCommand,
    pub reason: String,
    pub comment: Option<String>,
}

/// Command: list orders of a time window (CSV report).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReport {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    pub financial_state: Option<FinancialState>,
    pub fulfillment_state: Option<FulfillmentState>,
    pub date_time_zone: Option<String>,
}

impl OrderReport {
    /// Wire format of the window bounds.
    pub const DATE_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";

    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> DomainResult<Self> {
        if end_date < start_date {
            return Err(DomainError::validation("end_date has to be after start_date"));
        }
        Ok(Self {
            start_date,
            end_date,
            financial_state: None,
            fulfillment_state: None,
            date_time_zone: None,
        })
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn formatted_start_date(&self) -> String {
        self.start_date.format(Self::DATE_FORMAT).to_string()
    }

    pub fn formatted_end_date(&self) -> String {
        self.end_date.format(Self::DATE_FORMAT).to_string()
    }

    /// Set the financial state filter from its wire code (`CHARGED`).
    pub fn set_financial_state(&mut self, state: &str) -> DomainResult<()> {
        self.financial_state = Some(state.parse()?);
        Ok(())
    }

    /// Set the fulfillment state filter from its wire code (`NEW`).
    pub fn set_fulfillment_state(&mut self, state: &str) -> DomainResult<()> {
        self.fulfillment_state = Some(state.parse()?);
        Ok(())
    }
}

/// Command: page through historic notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationHistoryRequest {
    pub serial_number: Option<SerialNumber>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notification_types: Vec<String>,
    pub order_numbers: Vec<GoogleOrderNumber>,
    pub next_page_token: Option<String>,
}

impl NotificationHistoryRequest {
    /// Request the single notification with the given serial number.
    pub fn for_serial_number(serial_number: SerialNumber) -> Self {
        Self {
            serial_number: Some(serial_number),
            ..Self::default()
        }
    }
}

/// Command: obtain a continue token for notification polling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDataTokenRequest {
    pub start_time: Option<DateTime<Utc>>,
}

/// Command: poll the notifications after a continue token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDataRequest {
    pub continue_token: String,
}

/// All outbound commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Command {
    Checkout(CheckoutCommand),
    ChargeOrder(ChargeOrder),
    ChargeAndShipOrder(ChargeAndShipOrder),
    RefundOrder(RefundOrder),
    CancelOrder(CancelOrder),
    AuthorizeOrder(AuthorizeOrder),
    ProcessOrder(ProcessOrder),
    AddMerchantOrderNumber(AddMerchantOrderNumber),
    DeliverOrder(DeliverOrder),
    AddTrackingData(AddTrackingData),
    SendBuyerMessage(SendBuyerMessage),
    ArchiveOrder(ArchiveOrder),
    UnarchiveOrder(UnarchiveOrder),
    CreateOrderRecurrenceRequest(CreateOrderRecurrenceRequest),
    ShipItems(ShipItems),
    BackorderItems(BackorderItems),
    CancelItems(CancelItems),
    ReturnItems(ReturnItems),
    ResetItemsShippingInformation(ResetItemsShippingInformation),
    OrderReport(OrderReport),
    NotificationHistoryRequest(NotificationHistoryRequest),
    NotificationDataRequest(NotificationDataRequest),
    NotificationDataTokenRequest(NotificationDataTokenRequest),
}

/// Which API endpoint family a command is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    Checkout,
    OrderProcessing,
    Reports,
    Polling,
}

impl Command {
    /// Root element name of the command document.
    pub fn tag(&self) -> &'static str {
        match self {
            Command::Checkout(_) => "checkout-shopping-cart",
            Command::ChargeOrder(_) => "charge-order",
            Command::ChargeAndShipOrder(_) => "charge-and-ship-order",
            Command::RefundOrder(_) => "refund-order",
            Command::CancelOrder(_) => "cancel-order",
            Command::AuthorizeOrder(_) => "authorize-order",
            Command::ProcessOrder(_) => "process-order",
            Command::AddMerchantOrderNumber(_) => "add-merchant-order-number",
            Command::DeliverOrder(_) => "deliver-order",
            Command::AddTrackingData(_) => "add-tracking-data",
            Command::SendBuyerMessage(_) => "send-buyer-message",
            Command::ArchiveOrder(_) => "archive-order",
            Command::UnarchiveOrder(_) => "unarchive-order",
            Command::CreateOrderRecurrenceRequest(_) => "create-order-recurrence-request",
            Command::ShipItems(_) => "ship-items",
            Command::BackorderItems(_) => "backorder-items",
            Command::CancelItems(_) => "cancel-items",
            Command::ReturnItems(_) => "return-items",
            Command::ResetItemsShippingInformation(_) => "reset-items-shipping-information",
            Command::OrderReport(_) => "order-list-request",
            Command::NotificationHistoryRequest(_) => "notification-history-request",
            Command::NotificationDataRequest(_) => "notification-data-request",
            Command::NotificationDataTokenRequest(_) => "notification-data-token-request",
        }
    }

    /// The order a command acts on, `None` for checkout, reports and polling.
    pub fn google_order_number(&self) -> Option<&GoogleOrderNumber> {
        match self {
            Command::Checkout(_)
            | Command::OrderReport(_)
            | Command::NotificationHistoryRequest(_)
            | Command::NotificationDataRequest(_)
            | Command::NotificationDataTokenRequest(_) => None,
            Command::ChargeOrder(c) => Some(&c.google_order_number),
            Command::ChargeAndShipOrder(c) => Some(&c.google_order_number),
            Command::RefundOrder(c) => Some(&c.google_order_number),
            Command::CancelOrder(c) => Some(&c.google_order_number),
            Command::AuthorizeOrder(AuthorizeOrder { google_order_number })
            | Command::ProcessOrder(ProcessOrder { google_order_number })
            | Command::ArchiveOrder(ArchiveOrder { google_order_number })
            | Command::UnarchiveOrder(UnarchiveOrder { google_order_number }) => Some(google_order_number),
            Command::AddMerchantOrderNumber(c) => Some(&c.google_order_number),
            Command::DeliverOrder(c) => Some(&c.google_order_number),
            Command::AddTrackingData(c) => Some(&c.google_order_number),
            Command::SendBuyerMessage(c) => Some(&c.google_order_number),
            Command::CreateOrderRecurrenceRequest(c) => Some(&c.google_order_number),
            Command::ShipItems(ShipItems { items })
            | Command::BackorderItems(BackorderItems { items })
            | Command::ReturnItems(ReturnItems { items })
            | Command::ResetItemsShippingInformation(ResetItemsShippingInformation { items })
            | Command::CancelItems(CancelItems { items, .. }) => Some(&items.google_order_number),
        }
    }

    pub fn endpoint_kind(&self) -> EndpointKind {
        match self {
            Command::Checkout(_) => EndpointKind::Checkout,
            Command::OrderReport(_) | Command::NotificationHistoryRequest(_) => EndpointKind::Reports,
            Command::NotificationDataRequest(_) | Command::NotificationDataTokenRequest(_) => {
                EndpointKind::Polling
            }
            _ => EndpointKind::OrderProcessing,
        }
    }
}
