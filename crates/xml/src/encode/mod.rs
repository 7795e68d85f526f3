//! Domain → XML.
//!
//! Every entity has a function building its [`Element`]; [`encode`] picks the
//! root for a command and serializes the finished tree.

mod area;
mod cart;
mod checkout;
mod commands;
mod private_data;
mod responses;
mod shipping;
mod tax;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use checkout_core::{GoogleOrderNumber, Money};
use checkout_domain::Command;

use crate::error::CodecResult;
use crate::tree::Element;

pub use private_data::sanitize_tag;
pub use responses::{encode_acknowledgment, encode_merchant_calculation_results};

pub(crate) use area::area_element;
pub(crate) use cart::shopping_cart_element;
pub(crate) use private_data::write_private_data;

/// Serialize a command into its XML document.
pub fn encode(command: &Command) -> CodecResult<String> {
    let root = commands::command_element(command)?;
    let xml = root.to_document()?;
    debug!(
        command = command.tag(),
        google_order_number = command.google_order_number().map(|n| n.as_str()),
        bytes = xml.len(),
        "encoded command"
    );
    Ok(xml)
}

/// Namespaced root, carrying `google-order-number` for order-targeted commands.
pub(crate) fn command_root(tag: &str, google_order_number: Option<&GoogleOrderNumber>) -> Element {
    let root = Element::root(tag);
    match google_order_number {
        Some(number) => root.with_attribute("google-order-number", number.as_str()),
        None => root,
    }
}

/// `<name currency="XXX">12.34</name>`
pub(crate) fn money_element(name: &str, money: &Money) -> Element {
    Element::new(name)
        .with_attribute("currency", money.currency())
        .with_text(money.to_string())
}

pub(crate) fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

pub(crate) fn timestamp_text(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decimal text of a rate or percentage; integral values keep one fractional digit.
pub(crate) fn rate_text(rate: f64) -> String {
    let text = rate.to_string();
    if text.contains(['.', 'e', 'E']) || !rate.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn money_element_carries_currency_and_two_digits() {
        let el = money_element("amount", &Money::new(22606, "GBP"));
        assert_eq!(el.attribute("currency"), Some("GBP"));
        assert_eq!(el.text(), "226.06");
    }

    #[test]
    fn rate_text_keeps_a_fraction() {
        assert_eq!(rate_text(0.0825), "0.0825");
        assert_eq!(rate_text(1.0), "1.0");
        assert_eq!(rate_text(0.0), "0.0");
    }

    #[test]
    fn timestamps_use_utc_designator() {
        let time = Utc.with_ymd_and_hms(2007, 4, 30, 8, 3, 57).unwrap();
        assert_eq!(timestamp_text(&time), "2007-04-30T08:03:57Z");
    }

    #[test]
    fn command_root_only_adds_order_number_when_given() {
        let number = GoogleOrderNumber::new("841171949013218").unwrap();
        let root = command_root("charge-order", Some(&number));
        assert_eq!(root.attribute("google-order-number"), Some("841171949013218"));
        assert_eq!(root.attribute("xmlns"), Some(crate::tree::NAMESPACE));

        let root = command_root("order-list-request", None);
        assert_eq!(root.attribute("google-order-number"), None);
    }
}
