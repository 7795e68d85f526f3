//! Merchant configuration and the command factory.
//!
//! A [`Frontend`] binds a merchant account to the tax tables in effect and
//! creates commands for it. It is also the decode context: tax table
//! selectors in inbound carts resolve against [`Frontend::tax_tables`].

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use checkout_core::{DomainError, DomainResult, GoogleOrderNumber, SerialNumber};

use crate::command::{
    AddMerchantOrderNumber, AddTrackingData, ArchiveOrder, AuthorizeOrder, BackorderItems, CancelItems, CancelOrder,
    ChargeAndShipOrder, ChargeOrder, CheckoutCommand, Command, CreateOrderRecurrenceRequest, DeliverOrder,
    EndpointKind, ItemsCommand, NotificationDataRequest, NotificationDataTokenRequest, NotificationHistoryRequest,
    OrderReport, ProcessOrder, RefundOrder, ResetItemsShippingInformation, ReturnItems, SendBuyerMessage, ShipItems,
    UnarchiveOrder,
};
use crate::cart::ShoppingCart;
use crate::order::TrackingData;
use crate::tax::TaxTable;

const SANDBOX_URL_PREFIX: &str = "https://sandbox.google.com/checkout/";
const PRODUCTION_URL_PREFIX: &str = "https://checkout.google.com/";

/// Regular merchant account or donation account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseType {
    #[default]
    Merchant,
    Donation,
}

impl PurchaseType {
    fn path_segment(&self) -> &'static str {
        match self {
            PurchaseType::Merchant => "Merchant",
            PurchaseType::Donation => "Donations",
        }
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseType::Merchant => f.write_str("merchant"),
            PurchaseType::Donation => f.write_str("donation"),
        }
    }
}

impl FromStr for PurchaseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merchant" => Ok(PurchaseType::Merchant),
            "donation" => Ok(PurchaseType::Donation),
            other => Err(DomainError::validation(format!("invalid purchase type: {other}"))),
        }
    }
}

/// Merchant account settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub merchant_id: String,
    pub merchant_key: String,
    #[serde(default)]
    pub use_sandbox: bool,
    #[serde(default)]
    pub purchase_type: PurchaseType,
}

impl FrontendConfig {
    pub const MERCHANT_ID_VAR: &'static str = "CHECKOUT_MERCHANT_ID";
    pub const MERCHANT_KEY_VAR: &'static str = "CHECKOUT_MERCHANT_KEY";
    pub const USE_SANDBOX_VAR: &'static str = "CHECKOUT_USE_SANDBOX";
    pub const PURCHASE_TYPE_VAR: &'static str = "CHECKOUT_PURCHASE_TYPE";

    pub fn new(merchant_id: impl Into<String>, merchant_key: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_key: merchant_key.into(),
            use_sandbox: false,
            purchase_type: PurchaseType::Merchant,
        }
    }

    pub fn with_sandbox(mut self, use_sandbox: bool) -> Self {
        self.use_sandbox = use_sandbox;
        self
    }

    pub fn with_purchase_type(mut self, purchase_type: PurchaseType) -> Self {
        self.purchase_type = purchase_type;
        self
    }

    /// Read the configuration from `CHECKOUT_*` environment variables.
    ///
    /// Merchant id and key are required; the sandbox flag defaults to `false`
    /// and the purchase type to `merchant`.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let merchant_id = lookup(Self::MERCHANT_ID_VAR)
            .ok_or_else(|| DomainError::validation(format!("{} must be set", Self::MERCHANT_ID_VAR)))?;
        let merchant_key = lookup(Self::MERCHANT_KEY_VAR)
            .ok_or_else(|| DomainError::validation(format!("{} must be set", Self::MERCHANT_KEY_VAR)))?;
        let use_sandbox = lookup(Self::USE_SANDBOX_VAR)
            .map(|v| v.trim().parse::<bool>())
            .transpose()
            .map_err(|e| DomainError::validation(format!("{}: {e}", Self::USE_SANDBOX_VAR)))?
            .unwrap_or(false);
        let purchase_type = lookup(Self::PURCHASE_TYPE_VAR)
            .map(|v| v.parse::<PurchaseType>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            merchant_id,
            merchant_key,
            use_sandbox,
            purchase_type,
        })
    }
}

/// Source of the tax tables in effect at a point in time.
pub trait TaxTableFactory: Send + Sync {
    fn effective_tax_tables_at(&self, time: DateTime<Utc>) -> Vec<TaxTable>;
}

/// Merchant frontend: configuration plus tax table source.
#[derive(Clone)]
pub struct Frontend {
    config: FrontendConfig,
    tax_table_factory: Option<Arc<dyn TaxTableFactory>>,
}

impl fmt::Debug for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frontend")
            .field("merchant_id", &self.config.merchant_id)
            .field("use_sandbox", &self.config.use_sandbox)
            .field("purchase_type", &self.config.purchase_type)
            .field("has_tax_table_factory", &self.tax_table_factory.is_some())
            .finish()
    }
}

impl Frontend {
    pub fn new(config: FrontendConfig) -> Self {
        Self {
            config,
            tax_table_factory: None,
        }
    }

    pub fn with_tax_table_factory(mut self, factory: Arc<dyn TaxTableFactory>) -> Self {
        self.tax_table_factory = Some(factory);
        self
    }

    pub fn set_tax_table_factory(&mut self, factory: Arc<dyn TaxTableFactory>) {
        self.tax_table_factory = Some(factory);
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Tax tables in effect now; empty without a factory.
    pub fn tax_tables(&self) -> Vec<TaxTable> {
        self.tax_tables_at(Utc::now())
    }

    pub fn tax_tables_at(&self, time: DateTime<Utc>) -> Vec<TaxTable> {
        self.tax_table_factory
            .as_ref()
            .map(|factory| factory.effective_tax_tables_at(time))
            .unwrap_or_default()
    }

    /// API URL a command is posted to.
    pub fn endpoint_url(&self, command: &Command) -> String {
        let prefix = if self.config.use_sandbox {
            SANDBOX_URL_PREFIX
        } else {
            PRODUCTION_URL_PREFIX
        };
        let purchase = self.config.purchase_type;
        // Donation accounts have no separate polling endpoint.
        let api = match (command.endpoint_kind(), purchase) {
            (EndpointKind::Checkout, _) => "api/checkout/v2/merchantCheckout",
            (EndpointKind::Reports, _) | (EndpointKind::Polling, PurchaseType::Merchant) => "api/checkout/v2/reports",
            (EndpointKind::OrderProcessing, _) | (EndpointKind::Polling, PurchaseType::Donation) => {
                "api/checkout/v2/request"
            }
        };
        format!("{prefix}{api}/{}/{}", purchase.path_segment(), self.config.merchant_id)
    }

    pub fn create_checkout_command(&self) -> CheckoutCommand {
        let tax_tables = self.tax_tables();
        debug!(tax_tables = tax_tables.len(), "creating checkout command");
        CheckoutCommand::new(tax_tables)
    }

    pub fn create_charge_order_command(&self, google_order_number: GoogleOrderNumber) -> ChargeOrder {
        ChargeOrder {
            google_order_number,
            amount: None,
        }
    }

    pub fn create_charge_and_ship_order_command(&self, google_order_number: GoogleOrderNumber) -> ChargeAndShipOrder {
        ChargeAndShipOrder {
            google_order_number,
            amount: None,
            tracking_data: None,
            send_email: false,
        }
    }

    pub fn create_refund_order_command(
        &self,
        google_order_number: GoogleOrderNumber,
        reason: impl Into<String>,
    ) -> RefundOrder {
        RefundOrder {
            google_order_number,
            amount: None,
            reason: reason.into(),
            comment: None,
        }
    }

    pub fn create_cancel_order_command(
        &self,
        google_order_number: GoogleOrderNumber,
        reason: impl Into<String>,
    ) -> CancelOrder {
        CancelOrder {
            google_order_number,
            reason: reason.into(),
            comment: None,
        }
    }

    pub fn create_authorize_order_command(&self, google_order_number: GoogleOrderNumber) -> AuthorizeOrder {
        AuthorizeOrder::new(google_order_number)
    }

    pub fn create_process_order_command(&self, google_order_number: GoogleOrderNumber) -> ProcessOrder {
        ProcessOrder::new(google_order_number)
    }

    pub fn create_archive_order_command(&self, google_order_number: GoogleOrderNumber) -> ArchiveOrder {
        ArchiveOrder::new(google_order_number)
    }

    pub fn create_unarchive_order_command(&self, google_order_number: GoogleOrderNumber) -> UnarchiveOrder {
        UnarchiveOrder::new(google_order_number)
    }

    pub fn create_add_merchant_order_number_command(
        &self,
        google_order_number: GoogleOrderNumber,
        merchant_order_number: impl Into<String>,
    ) -> AddMerchantOrderNumber {
        AddMerchantOrderNumber {
            google_order_number,
            merchant_order_number: merchant_order_number.into(),
        }
    }

    pub fn create_deliver_order_command(&self, google_order_number: GoogleOrderNumber) -> DeliverOrder {
        DeliverOrder {
            google_order_number,
            tracking_data: None,
            send_email: false,
        }
    }

    pub fn create_add_tracking_data_command(
        &self,
        google_order_number: GoogleOrderNumber,
        tracking_data: TrackingData,
    ) -> AddTrackingData {
        AddTrackingData {
            google_order_number,
            tracking_data,
        }
    }

    pub fn create_send_buyer_message_command(
        &self,
        google_order_number: GoogleOrderNumber,
        message: impl Into<String>,
    ) -> SendBuyerMessage {
        SendBuyerMessage {
            google_order_number,
            message: message.into(),
            send_email: None,
        }
    }

    pub fn create_order_recurrence_request_command(
        &self,
        google_order_number: GoogleOrderNumber,
    ) -> CreateOrderRecurrenceRequest {
        CreateOrderRecurrenceRequest {
            google_order_number,
            shopping_cart: ShoppingCart::new(),
        }
    }

    pub fn create_ship_items_command(&self, google_order_number: GoogleOrderNumber) -> ShipItems {
        ShipItems::new(google_order_number)
    }

    pub fn create_backorder_items_command(&self, google_order_number: GoogleOrderNumber) -> BackorderItems {
        BackorderItems::new(google_order_number)
    }

    pub fn create_return_items_command(&self, google_order_number: GoogleOrderNumber) -> ReturnItems {
        ReturnItems::new(google_order_number)
    }

    pub fn create_reset_items_shipping_information_command(
        &self,
        google_order_number: GoogleOrderNumber,
    ) -> ResetItemsShippingInformation {
        ResetItemsShippingInformation::new(google_order_number)
    }

    pub fn create_cancel_items_command(
        &self,
        google_order_number: GoogleOrderNumber,
        reason: impl Into<String>,
    ) -> CancelItems {
        CancelItems {
            items: ItemsCommand::new(google_order_number),
            reason: reason.into(),
            comment: None,
        }
    }

    pub fn create_order_report_command(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> DomainResult<OrderReport> {
        OrderReport::new(start_date, end_date)
    }

    pub fn create_notification_history_request_command(&self) -> NotificationHistoryRequest {
        NotificationHistoryRequest::default()
    }

    pub fn create_notification_history_request_for_serial(&self, serial_number: SerialNumber) -> NotificationHistoryRequest {
        NotificationHistoryRequest::for_serial_number(serial_number)
    }

    pub fn create_notification_data_token_request_command(
        &self,
        start_time: Option<DateTime<Utc>>,
    ) -> NotificationDataTokenRequest {
        NotificationDataTokenRequest { start_time }
    }

    pub fn create_notification_data_request_command(
        &self,
        continue_token: impl Into<String>,
    ) -> NotificationDataRequest {
        NotificationDataRequest {
            continue_token: continue_token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::Area;
    use crate::tax::TaxRule;
    use chrono::TimeZone;
    use std::collections::HashMap;

    struct TestTaxTableFactory;

    impl TaxTableFactory for TestTaxTableFactory {
        fn effective_tax_tables_at(&self, _time: DateTime<Utc>) -> Vec<TaxTable> {
            vec![
                TaxTable::new("Default", false).with_rule(TaxRule::new(0.05, Area::world())),
                TaxTable::new("Some Table", true).with_rule(TaxRule::new(0.1, Area::us_state("CA").unwrap())),
            ]
        }
    }

    fn test_order_number() -> GoogleOrderNumber {
        GoogleOrderNumber::new("841171949013218").unwrap()
    }

    fn test_frontend(use_sandbox: bool, purchase_type: PurchaseType) -> Frontend {
        Frontend::new(
            FrontendConfig::new("123456", "secret")
                .with_sandbox(use_sandbox)
                .with_purchase_type(purchase_type),
        )
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn checkout_command_receives_factory_tables() {
        let frontend = test_frontend(true, PurchaseType::Merchant).with_tax_table_factory(Arc::new(TestTaxTableFactory));
        let command = frontend.create_checkout_command();
        let names: Vec<&str> = command.tax_tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Default", "Some Table"]);
    }

    #[test]
    fn no_factory_means_no_tables() {
        let frontend = test_frontend(true, PurchaseType::Merchant);
        assert!(frontend.tax_tables().is_empty());
        assert!(frontend.create_checkout_command().tax_tables().is_empty());
    }

    #[test]
    fn endpoint_urls_for_sandbox_merchant() {
        let frontend = test_frontend(true, PurchaseType::Merchant);
        let checkout = Command::Checkout(frontend.create_checkout_command());
        let charge = Command::ChargeOrder(frontend.create_charge_order_command(test_order_number()));
        let report = Command::NotificationHistoryRequest(frontend.create_notification_history_request_command());
        let polling = Command::NotificationDataRequest(frontend.create_notification_data_request_command("t"));

        assert_eq!(
            frontend.endpoint_url(&checkout),
            "https://sandbox.google.com/checkout/api/checkout/v2/merchantCheckout/Merchant/123456"
        );
        assert_eq!(
            frontend.endpoint_url(&charge),
            "https://sandbox.google.com/checkout/api/checkout/v2/request/Merchant/123456"
        );
        assert_eq!(
            frontend.endpoint_url(&report),
            "https://sandbox.google.com/checkout/api/checkout/v2/reports/Merchant/123456"
        );
        assert_eq!(
            frontend.endpoint_url(&polling),
            "https://sandbox.google.com/checkout/api/checkout/v2/reports/Merchant/123456"
        );
    }

    #[test]
    fn endpoint_urls_for_production_donations() {
        let frontend = test_frontend(false, PurchaseType::Donation);
        let checkout = Command::Checkout(frontend.create_checkout_command());
        let report = Command::OrderReport(
            frontend
                .create_order_report_command(
                    Utc.with_ymd_and_hms(2007, 9, 1, 0, 0, 0).unwrap(),
                    Utc.with_ymd_and_hms(2007, 9, 30, 23, 59, 59).unwrap(),
                )
                .unwrap(),
        );
        let archive = Command::ArchiveOrder(frontend.create_archive_order_command(test_order_number()));

        assert_eq!(
            frontend.endpoint_url(&checkout),
            "https://checkout.google.com/api/checkout/v2/merchantCheckout/Donations/123456"
        );
        assert_eq!(
            frontend.endpoint_url(&report),
            "https://checkout.google.com/api/checkout/v2/reports/Donations/123456"
        );
        assert_eq!(
            frontend.endpoint_url(&archive),
            "https://checkout.google.com/api/checkout/v2/request/Donations/123456"
        );
    }

    #[test]
    fn factory_creates_every_order_command_for_the_order() {
        let frontend = test_frontend(true, PurchaseType::Merchant);
        let commands = vec![
            Command::ChargeOrder(frontend.create_charge_order_command(test_order_number())),
            Command::ChargeAndShipOrder(frontend.create_charge_and_ship_order_command(test_order_number())),
            Command::RefundOrder(frontend.create_refund_order_command(test_order_number(), "damaged")),
            Command::CancelOrder(frontend.create_cancel_order_command(test_order_number(), "out of stock")),
            Command::AuthorizeOrder(frontend.create_authorize_order_command(test_order_number())),
            Command::ProcessOrder(frontend.create_process_order_command(test_order_number())),
            Command::AddMerchantOrderNumber(
                frontend.create_add_merchant_order_number_command(test_order_number(), "M-1"),
            ),
            Command::DeliverOrder(frontend.create_deliver_order_command(test_order_number())),
            Command::AddTrackingData(
                frontend.create_add_tracking_data_command(test_order_number(), TrackingData::new("UPS", "1Z")),
            ),
            Command::SendBuyerMessage(frontend.create_send_buyer_message_command(test_order_number(), "hello")),
            Command::ArchiveOrder(frontend.create_archive_order_command(test_order_number())),
            Command::UnarchiveOrder(frontend.create_unarchive_order_command(test_order_number())),
            Command::CreateOrderRecurrenceRequest(frontend.create_order_recurrence_request_command(test_order_number())),
            Command::ShipItems(frontend.create_ship_items_command(test_order_number())),
            Command::BackorderItems(frontend.create_backorder_items_command(test_order_number())),
            Command::CancelItems(frontend.create_cancel_items_command(test_order_number(), "lost")),
            Command::ReturnItems(frontend.create_return_items_command(test_order_number())),
            Command::ResetItemsShippingInformation(frontend.create_reset_items_shipping_information_command(test_order_number())),
        ];

        for command in &commands {
            assert_eq!(command.google_order_number(), Some(&test_order_number()), "{}", command.tag());
        }
    }

    #[test]
    fn config_from_env_reads_all_variables() {
        let config = FrontendConfig::from_lookup(lookup(&[
            ("CHECKOUT_MERCHANT_ID", "42"),
            ("CHECKOUT_MERCHANT_KEY", "key"),
            ("CHECKOUT_USE_SANDBOX", "true"),
            ("CHECKOUT_PURCHASE_TYPE", "donation"),
        ]))
        .unwrap();

        assert_eq!(config.merchant_id, "42");
        assert_eq!(config.merchant_key, "key");
        assert!(config.use_sandbox);
        assert_eq!(config.purchase_type, PurchaseType::Donation);
    }

    #[test]
    fn config_from_env_defaults_optional_variables() {
        let config =
            FrontendConfig::from_lookup(lookup(&[("CHECKOUT_MERCHANT_ID", "42"), ("CHECKOUT_MERCHANT_KEY", "key")]))
                .unwrap();
        assert!(!config.use_sandbox);
        assert_eq!(config.purchase_type, PurchaseType::Merchant);
    }

    #[test]
    fn config_from_env_requires_credentials() {
        let err = FrontendConfig::from_lookup(lookup(&[("CHECKOUT_MERCHANT_ID", "42")])).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("CHECKOUT_MERCHANT_KEY")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn config_from_env_rejects_bad_flags() {
        assert!(
            FrontendConfig::from_lookup(lookup(&[
                ("CHECKOUT_MERCHANT_ID", "42"),
                ("CHECKOUT_MERCHANT_KEY", "key"),
                ("CHECKOUT_USE_SANDBOX", "sometimes"),
            ]))
            .is_err()
        );
        assert!(
            FrontendConfig::from_lookup(lookup(&[
                ("CHECKOUT_MERCHANT_ID", "42"),
                ("CHECKOUT_MERCHANT_KEY", "key"),
                ("CHECKOUT_PURCHASE_TYPE", "charity"),
            ]))
            .is_err()
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: FrontendConfig =
            serde_json::from_str(r#"{"merchant_id":"1","merchant_key":"k"}"#).unwrap();
        assert!(!config.use_sandbox);
        assert_eq!(config.purchase_type, PurchaseType::Merchant);
    }
}
