//! XML → domain.
//!
//! Decoders are small functions over [`Element`]s that compose the same way the
//! documents nest. Required content that is absent or malformed fails the whole
//! decode; optional content uses explicit presence checks and becomes `None`.

mod address;
mod cart;
mod notification;
mod private_data;
mod report;
mod response;

use chrono::{DateTime, NaiveDateTime, Utc};

use checkout_core::Money;

use crate::error::{CodecError, CodecResult};
use crate::tree::Element;

pub use address::{decode_address, decode_anonymous_address};
pub use cart::{decode_digital_content, decode_item, decode_line_item, decode_shopping_cart, decode_subscription};
pub use notification::{decode_notification, NOTIFICATION_TAGS};
pub use private_data::{decode_private_data, decode_private_data_map};
pub use report::decode_order_report;

pub(crate) use response::{
    decode_checkout_error, decode_checkout_redirect, decode_notification_acknowledgment,
    decode_notification_data_response, decode_notification_data_token_response,
    decode_notification_history_response, decode_request_received, decode_subscription_request_received,
};

/// Money from an element's text and its `currency` attribute.
pub(crate) fn money(el: &Element) -> CodecResult<Money> {
    let currency = el.required_attribute("currency")?;
    Money::from_decimal_str(el.text(), currency).map_err(|e| CodecError::invalid_value(el.name(), el.text(), e))
}

pub(crate) fn required_money(parent: &Element, name: &str) -> CodecResult<Money> {
    money(parent.required_child(name)?)
}

pub(crate) fn optional_money(parent: &Element, name: &str) -> CodecResult<Option<Money>> {
    parent.child(name).map(money).transpose()
}

/// Text of an optional child; empty text counts as absent.
pub(crate) fn optional_text(parent: &Element, name: &str) -> Option<String> {
    parent
        .child_text(name)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

pub(crate) fn parse_bool(element: &str, text: &str) -> CodecResult<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CodecError::invalid_value(element, other, "expected true or false")),
    }
}

pub(crate) fn optional_bool(parent: &Element, name: &str) -> CodecResult<Option<bool>> {
    parent.child_text(name).map(|text| parse_bool(name, text)).transpose()
}

pub(crate) fn parse_u32(element: &str, text: &str) -> CodecResult<u32> {
    text.parse()
        .map_err(|e| CodecError::invalid_value(element, text, e))
}

/// Parse an XML schema timestamp. Values without an offset are taken as UTC.
pub(crate) fn parse_timestamp(element: &str, text: &str) -> CodecResult<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| CodecError::invalid_value(element, text, e))
}

pub(crate) fn required_timestamp(parent: &Element, name: &str) -> CodecResult<DateTime<Utc>> {
    parse_timestamp(name, parent.required_child_text(name)?)
}

pub(crate) fn optional_timestamp(parent: &Element, name: &str) -> CodecResult<Option<DateTime<Utc>>> {
    parent
        .child_text(name)
        .filter(|text| !text.is_empty())
        .map(|text| parse_timestamp(name, text))
        .transpose()
}
