use checkout_domain::{DigitalContent, Item, LineItem, ShoppingCart, Subscription, SubscriptionPayment};

use crate::encode::private_data::write_private_data;
use crate::encode::{bool_text, money_element, timestamp_text};
use crate::error::{CodecError, CodecResult};
use crate::tree::Element;

pub(crate) fn shopping_cart_element(cart: &ShoppingCart) -> CodecResult<Element> {
    let mut el = Element::new("shopping-cart");

    if let Some(expires_at) = &cart.expires_at {
        el.add_child("cart-expiration")
            .add_text_child("good-until-date", timestamp_text(expires_at));
    }
    if let Some(data) = &cart.private_data {
        write_private_data(el.add_child("merchant-private-data"), data)?;
    }

    let items = el.add_child("items");
    for item in &cart.items {
        items.push(item_element(item)?);
    }
    Ok(el)
}

fn item_element(item: &Item) -> CodecResult<Element> {
    let mut el = line_item_element("item", &item.line)?;
    if let Some(subscription) = &item.subscription {
        el.push(subscription_element(subscription)?);
    }
    Ok(el)
}

/// Fields shared by cart items and recurrent items, under the element `tag`.
fn line_item_element(tag: &str, line: &LineItem) -> CodecResult<Element> {
    let unit_price = line
        .unit_price
        .as_ref()
        .ok_or_else(|| CodecError::missing_element(tag, "unit-price"))?;

    let mut el = Element::new(tag);
    el.add_text_child("item-name", line.name.as_str());
    el.add_text_child("item-description", line.description.clone().unwrap_or_default());
    el.push(money_element("unit-price", unit_price));
    el.add_text_child("quantity", line.quantity.to_string());

    if let Some(id) = &line.merchant_item_id {
        el.add_text_child("merchant-item-id", id.as_str());
    }
    if let Some(weight) = &line.weight {
        el.push(
            Element::new("item-weight")
                .with_attribute("unit", weight.unit())
                .with_attribute("value", weight.value_text()),
        );
    }
    if let Some(data) = &line.private_data {
        write_private_data(el.add_child("merchant-private-item-data"), data)?;
    }
    if let Some(table) = line.tax_table() {
        el.add_text_child("tax-table-selector", table);
    }
    if let Some(content) = &line.digital_content {
        el.push(digital_content_element(content));
    }
    Ok(el)
}

fn digital_content_element(content: &DigitalContent) -> Element {
    let mut el = Element::new("digital-content");
    if let Some(description) = &content.description {
        el.add_text_child("description", description.as_str());
    }
    if let Some(email_delivery) = content.email_delivery {
        el.add_text_child("email-delivery", bool_text(email_delivery));
    }
    if let Some(key) = &content.key {
        el.add_text_child("key", key.as_str());
    }
    if let Some(url) = &content.url {
        el.add_text_child("url", url.as_str());
    }
    el.add_text_child("display-disposition", content.display_disposition.as_str());
    el
}

fn subscription_element(subscription: &Subscription) -> CodecResult<Element> {
    let mut el = Element::new("subscription");
    if let Some(period) = subscription.period {
        el.set_attribute("period", period.as_str());
    }
    if let Some(kind) = subscription.kind {
        el.set_attribute("type", kind.as_str());
    }
    if let Some(no_charge_after) = &subscription.no_charge_after {
        el.set_attribute("no-charge-after", timestamp_text(no_charge_after));
    }
    if let Some(start_date) = &subscription.start_date {
        el.set_attribute("start-date", timestamp_text(start_date));
    }

    if !subscription.payments.is_empty() {
        let payments = el.add_child("payments");
        for payment in &subscription.payments {
            payments.push(payment_element(payment));
        }
    }
    for item in &subscription.recurrent_items {
        el.push(line_item_element("recurrent-item", item)?);
    }
    Ok(el)
}

fn payment_element(payment: &SubscriptionPayment) -> Element {
    let mut el = Element::new("subscription-payment");
    if let Some(times) = payment.times {
        el.set_attribute("times", times.to_string());
    }
    el.push(money_element("maximum-charge", &payment.maximum_charge));
    el
}
