//! Inbound document routing.
//!
//! Every body the provider sends (a synchronous reply to a command, a
//! notification callback, a polling page) is a single XML document whose root
//! tag names its type. The router parses the body once, switches on the root
//! tag and hands the tree to the matching decoder.
//!
//! ```text
//! body
//!   ↓
//! 1. parse into an Element tree
//!   ↓
//! 2. switch on the root tag
//!   ↓
//! 3. decode into a domain value (or CheckoutError for <error>)
//! ```
//!
//! Decoding needs the merchant's active tax tables to resolve item
//! tax-table selectors, so it takes the [`Frontend`] as context.

use tracing::debug;

use checkout_domain::{
    CheckoutRedirect, Frontend, Notification, NotificationAcknowledgment, NotificationDataResponse,
    NotificationDataTokenResponse, NotificationHistoryResponse, OrderReport, RequestReceived,
    SubscriptionRequestReceived, TaxTable,
};

use crate::decode::{self, NOTIFICATION_TAGS};
use crate::error::{CodecError, CodecResult};
use crate::tree::{parse, Element};

/// A decoded inbound document.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    CheckoutRedirect(CheckoutRedirect),
    RequestReceived(RequestReceived),
    SubscriptionRequestReceived(SubscriptionRequestReceived),
    Notification(Notification),
    NotificationHistory(NotificationHistoryResponse),
    NotificationDataToken(NotificationDataTokenResponse),
    NotificationData(NotificationDataResponse),
    /// An `order-list-request` echoed back as its command.
    OrderReport(OrderReport),
    NotificationAcknowledgment(NotificationAcknowledgment),
}

impl Inbound {
    /// Root tag the document was decoded from.
    pub fn root_tag(&self) -> &'static str {
        match self {
            Inbound::CheckoutRedirect(_) => "checkout-redirect",
            Inbound::RequestReceived(_) => "request-received",
            Inbound::SubscriptionRequestReceived(_) => "subscription-request-received",
            Inbound::Notification(n) => n.notification_type(),
            Inbound::NotificationHistory(_) => "notification-history-response",
            Inbound::NotificationDataToken(_) => "notification-data-token-response",
            Inbound::NotificationData(_) => "notification-data-response",
            Inbound::OrderReport(_) => "order-list-request",
            Inbound::NotificationAcknowledgment(_) => "notification-acknowledgment",
        }
    }
}

/// Parse and decode an inbound body.
///
/// An `<error>` root becomes [`CodecError::Checkout`]; `<order-summary>` is
/// recognised but [`CodecError::Unsupported`]; any other unknown root is
/// [`CodecError::UnknownRoot`].
pub fn decode(xml: &str, frontend: &Frontend) -> CodecResult<Inbound> {
    let root = parse(xml)?;
    decode_element(&root, &frontend.tax_tables())
}

/// Like [`decode`], attaching the HTTP status of the response to a provider error.
pub fn decode_response(xml: &str, status: u16, frontend: &Frontend) -> CodecResult<Inbound> {
    decode(xml, frontend).map_err(|err| match err {
        CodecError::Checkout(error) => CodecError::Checkout(error.with_response_code(status)),
        other => other,
    })
}

/// Decode an already parsed document.
pub fn decode_element(root: &Element, tax_tables: &[TaxTable]) -> CodecResult<Inbound> {
    let inbound = match root.name() {
        "checkout-redirect" => Inbound::CheckoutRedirect(decode::decode_checkout_redirect(root)?),
        "request-received" => Inbound::RequestReceived(decode::decode_request_received(root)?),
        "subscription-request-received" => {
            Inbound::SubscriptionRequestReceived(decode::decode_subscription_request_received(root)?)
        }
        tag if NOTIFICATION_TAGS.contains(&tag) => {
            Inbound::Notification(decode::decode_notification(root, tax_tables)?)
        }
        "notification-history-response" => {
            Inbound::NotificationHistory(decode::decode_notification_history_response(root, tax_tables)?)
        }
        "notification-data-token-response" => {
            Inbound::NotificationDataToken(decode::decode_notification_data_token_response(root)?)
        }
        "notification-data-response" => {
            Inbound::NotificationData(decode::decode_notification_data_response(root, tax_tables)?)
        }
        "order-list-request" => Inbound::OrderReport(decode::decode_order_report(root)?),
        "notification-acknowledgment" => {
            Inbound::NotificationAcknowledgment(decode::decode_notification_acknowledgment(root)?)
        }
        "order-summary" => return Err(CodecError::Unsupported("order-summary".to_string())),
        "error" => return Err(decode::decode_checkout_error(root)?.into()),
        other => return Err(CodecError::UnknownRoot(other.to_string())),
    };
    debug!(root = inbound.root_tag(), "decoded inbound document");
    Ok(inbound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_domain::FrontendConfig;

    fn frontend() -> Frontend {
        Frontend::new(FrontendConfig::new("1234567890", "merchant-key"))
    }

    #[test]
    fn routes_request_received() {
        let inbound = decode(
            r#"<?xml version="1.0" encoding="UTF-8"?><request-received xmlns="http://checkout.google.com/schema/2" serial-number="bea6bc1b"/>"#,
            &frontend(),
        )
        .unwrap();
        assert_eq!(inbound.root_tag(), "request-received");
        let Inbound::RequestReceived(received) = inbound else {
            panic!("expected request-received");
        };
        assert_eq!(received.serial_number.as_str(), "bea6bc1b");
    }

    #[test]
    fn order_summary_is_unsupported() {
        assert_eq!(
            decode("<order-summary/>", &frontend()).unwrap_err(),
            CodecError::Unsupported("order-summary".to_string())
        );
    }

    #[test]
    fn unknown_root_fails() {
        assert_eq!(
            decode("<foo/>", &frontend()).unwrap_err(),
            CodecError::UnknownRoot("foo".to_string())
        );
    }

    #[test]
    fn malformed_body_is_an_xml_error() {
        assert!(matches!(decode("<request-received>", &frontend()), Err(CodecError::Xml(_))));
    }

    #[test]
    fn response_status_is_attached_to_provider_errors() {
        let xml = r#"<error serial-number="3c394432-8270-411b-9239-98c2c499f87f"><error-message>Bad username and/or password for API Access.</error-message></error>"#;
        let Err(CodecError::Checkout(error)) = decode_response(xml, 401, &frontend()) else {
            panic!("expected checkout error");
        };
        assert_eq!(error.response_code, Some(401));
        assert_eq!(error.message, "Bad username and/or password for API Access.");

        assert_eq!(
            decode_response("<foo/>", 400, &frontend()).unwrap_err(),
            CodecError::UnknownRoot("foo".to_string())
        );
    }
}
