use tracing::warn;

use checkout_core::Weight;
use checkout_domain::{
    DigitalContent, DisplayDisposition, Item, LineItem, ShoppingCart, Subscription, SubscriptionPayment, TaxTable,
};

use crate::decode::private_data::decode_private_data_map;
use crate::decode::{optional_bool, optional_text, parse_timestamp, parse_u32, required_money};
use crate::error::{CodecError, CodecResult};
use crate::tree::Element;

/// Decode a `<shopping-cart>`; `tax_tables` resolves item tax-table selectors.
pub fn decode_shopping_cart(el: &Element, tax_tables: &[TaxTable]) -> CodecResult<ShoppingCart> {
    let mut cart = ShoppingCart::new();

    if let Some(text) = el
        .path("cart-expiration/good-until-date")
        .map(Element::text)
        .filter(|t| !t.is_empty())
    {
        cart.expires_at = Some(parse_timestamp("good-until-date", text)?);
    }
    cart.private_data = el.child("merchant-private-data").and_then(decode_private_data_map);

    if let Some(items) = el.child("items") {
        for item in items.children_named("item") {
            cart.items.push(decode_item(item, tax_tables)?);
        }
    }
    Ok(cart)
}

/// Decode a cart `<item>` including its subscription.
pub fn decode_item(el: &Element, tax_tables: &[TaxTable]) -> CodecResult<Item> {
    let line = decode_line_item(el, tax_tables)?;
    let subscription = el
        .child("subscription")
        .map(|s| decode_subscription(s, tax_tables))
        .transpose()?;
    Ok(Item { line, subscription })
}

/// Decode the fields shared by `<item>` and `<recurrent-item>`.
pub fn decode_line_item(el: &Element, tax_tables: &[TaxTable]) -> CodecResult<LineItem> {
    let mut line = LineItem::named(el.required_child_text("item-name")?);
    line.description = Some(el.required_child_text("item-description")?.to_string()).filter(|d| !d.is_empty());
    line.unit_price = Some(required_money(el, "unit-price")?);
    line.quantity = parse_u32("quantity", el.required_child_text("quantity")?)?;
    line.merchant_item_id = optional_text(el, "merchant-item-id");

    if let Some(weight) = el.child("item-weight") {
        line.weight = Some(decode_weight(weight)?);
    }
    line.private_data = el.child("merchant-private-item-data").and_then(decode_private_data_map);

    if let Some(selector) = optional_text(el, "tax-table-selector")
        && !line.resolve_tax_table(&selector, tax_tables)
    {
        warn!(tax_table = %selector, item = %line.name, "tax table selector does not match any active table");
    }

    if let Some(content) = el.child("digital-content") {
        line.digital_content = Some(decode_digital_content(content)?);
    }
    Ok(line)
}

pub fn decode_digital_content(el: &Element) -> CodecResult<DigitalContent> {
    let display_disposition = match el.child_text("display-disposition").filter(|t| !t.is_empty()) {
        Some(text) => text
            .parse::<DisplayDisposition>()
            .map_err(|e| CodecError::invalid_value("display-disposition", text, e))?,
        None => DisplayDisposition::default(),
    };
    Ok(DigitalContent {
        description: optional_text(el, "description"),
        email_delivery: optional_bool(el, "email-delivery")?,
        key: optional_text(el, "key"),
        url: optional_text(el, "url"),
        display_disposition,
    })
}

/// Decode a `<subscription>`.
///
/// Attributes are read leniently: a missing or unknown value leaves the field unset.
pub fn decode_subscription(el: &Element, tax_tables: &[TaxTable]) -> CodecResult<Subscription> {
    let mut subscription = Subscription::empty();
    subscription.period = el.attribute("period").and_then(|p| p.parse().ok());
    subscription.kind = el.attribute("type").and_then(|t| t.parse().ok());
    subscription.no_charge_after = el
        .attribute("no-charge-after")
        .and_then(|t| parse_timestamp("no-charge-after", t).ok());
    subscription.start_date = el
        .attribute("start-date")
        .and_then(|t| parse_timestamp("start-date", t).ok());

    if let Some(payments) = el.child("payments") {
        for payment in payments.children_named("subscription-payment") {
            subscription.payments.push(decode_payment(payment)?);
        }
    }
    for item in el.children_named("recurrent-item") {
        subscription.recurrent_items.push(decode_line_item(item, tax_tables)?);
    }
    Ok(subscription)
}

fn decode_payment(el: &Element) -> CodecResult<SubscriptionPayment> {
    let mut payment = SubscriptionPayment::new(required_money(el, "maximum-charge")?);
    payment.times = el.attribute("times").and_then(|t| t.trim().parse().ok());
    Ok(payment)
}

fn decode_weight(el: &Element) -> CodecResult<Weight> {
    let value = el.required_attribute("value")?;
    Weight::parse(el.attribute("unit"), value).map_err(|e| CodecError::invalid_value(el.name(), value, e))
}
