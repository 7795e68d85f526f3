use tracing::debug;

use checkout_core::{DomainError, GoogleOrderNumber, Money, SerialNumber};
use checkout_domain::{
    AuthorizationAmountNotification, ChargeAmountNotification, ChargeFee, ChargebackAmountNotification,
    MerchantCodeAdjustment, MerchantCodeKind, NewOrderNotification, Notification,
    NotificationHeader, OrderAdjustment, OrderStateChangeNotification, RefundAmountNotification, RiskInformation,
    RiskInformationNotification, ShippingAdjustment, ShippingAdjustmentKind, TaxTable,
};

use crate::decode::address::decode_address;
use crate::decode::cart::decode_shopping_cart;
use crate::decode::{
    money, optional_bool, optional_money, optional_text, optional_timestamp, parse_bool, parse_u32,
    required_money, required_timestamp,
};
use crate::error::{CodecError, CodecResult};
use crate::tree::Element;

/// Root tags of every notification document.
pub const NOTIFICATION_TAGS: [&str; 7] = [
    "new-order-notification",
    "risk-information-notification",
    "order-state-change-notification",
    "charge-amount-notification",
    "authorization-amount-notification",
    "refund-amount-notification",
    "chargeback-amount-notification",
];

/// Decode a notification from its root element.
///
/// `tax_tables` resolves tax-table selectors of new-order cart items. Any root
/// outside [`NOTIFICATION_TAGS`] is [`CodecError::UnknownRoot`].
pub fn decode_notification(root: &Element, tax_tables: &[TaxTable]) -> CodecResult<Notification> {
    if !NOTIFICATION_TAGS.contains(&root.name()) {
        return Err(CodecError::UnknownRoot(root.name().to_string()));
    }
    let header = decode_header(root)?;
    let notification = match root.name() {
        "new-order-notification" => Notification::NewOrder(decode_new_order(root, header, tax_tables)?),
        "risk-information-notification" => Notification::RiskInformation(RiskInformationNotification {
            header,
            risk_information: decode_risk_information(root.required_child("risk-information")?)?,
        }),
        "order-state-change-notification" => Notification::OrderStateChange(decode_state_change(root, header)?),
        "charge-amount-notification" => Notification::ChargeAmount(ChargeAmountNotification {
            header,
            latest_charge_amount: required_money(root, "latest-charge-amount")?,
            total_charge_amount: required_money(root, "total-charge-amount")?,
            latest_charge_fee: root.child("latest-charge-fee").map(|fee| decode_charge_fee(root, fee)).transpose()?,
        }),
        "authorization-amount-notification" => Notification::AuthorizationAmount(AuthorizationAmountNotification {
            header,
            authorization_amount: required_money(root, "authorization-amount")?,
            authorization_expiration_date: optional_timestamp(root, "authorization-expiration-date")?,
            avs_response: optional_text(root, "avs-response"),
            cvn_response: optional_text(root, "cvn-response"),
        }),
        "refund-amount-notification" => Notification::RefundAmount(RefundAmountNotification {
            header,
            latest_refund_amount: required_money(root, "latest-refund-amount")?,
            total_refund_amount: required_money(root, "total-refund-amount")?,
            latest_fee_refund_amount: optional_money(root, "latest-fee-refund-amount")?,
        }),
        "chargeback-amount-notification" => Notification::ChargebackAmount(ChargebackAmountNotification {
            header,
            latest_chargeback_amount: required_money(root, "latest-chargeback-amount")?,
            total_chargeback_amount: required_money(root, "total-chargeback-amount")?,
            latest_fee_refund_amount: optional_money(root, "latest-fee-refund-amount")?,
            latest_chargeback_fee_amount: optional_money(root, "latest-chargeback-fee-amount")?,
        }),
        other => return Err(CodecError::UnknownRoot(other.to_string())),
    };

    debug!(
        notification = notification.notification_type(),
        serial_number = %notification.serial_number(),
        google_order_number = %notification.google_order_number(),
        "decoded notification"
    );
    Ok(notification)
}

fn decode_header(root: &Element) -> CodecResult<NotificationHeader> {
    let serial = root.required_attribute("serial-number")?;
    let order_number = root.required_child_text("google-order-number")?;
    Ok(NotificationHeader {
        serial_number: SerialNumber::new(serial).map_err(|e| CodecError::invalid_value("serial-number", serial, e))?,
        google_order_number: GoogleOrderNumber::new(order_number)
            .map_err(|e| CodecError::invalid_value("google-order-number", order_number, e))?,
        timestamp: required_timestamp(root, "timestamp")?,
    })
}

fn decode_new_order(
    root: &Element,
    header: NotificationHeader,
    tax_tables: &[TaxTable],
) -> CodecResult<NewOrderNotification> {
    Ok(NewOrderNotification {
        header,
        buyer_id: optional_text(root, "buyer-id"),
        buyer_billing_address: decode_address(root.required_child("buyer-billing-address")?)?,
        buyer_shipping_address: decode_address(root.required_child("buyer-shipping-address")?)?,
        email_allowed: root
            .child("buyer-marketing-preferences")
            .map(|prefs| optional_bool(prefs, "email-allowed"))
            .transpose()?
            .flatten(),
        shopping_cart: decode_shopping_cart(root.required_child("shopping-cart")?, tax_tables)?,
        order_adjustment: root.child("order-adjustment").map(decode_order_adjustment).transpose()?,
        order_total: required_money(root, "order-total")?,
        financial_order_state: state(root, "financial-order-state")?,
        fulfillment_order_state: state(root, "fulfillment-order-state")?,
    })
}

fn decode_order_adjustment(el: &Element) -> CodecResult<OrderAdjustment> {
    let mut adjustment = OrderAdjustment {
        adjustment_total: optional_money(el, "adjustment-total")?,
        total_tax: optional_money(el, "total-tax")?,
        merchant_calculation_successful: optional_bool(el, "merchant-calculation-successful")?,
        ..OrderAdjustment::default()
    };

    if let Some(shipping) = el.child("shipping") {
        // At most one shipping adjustment is present.
        for child in shipping.children() {
            let kind = ShippingAdjustmentKind::from_tag(child.name())
                .ok_or_else(|| CodecError::UnknownRoot(child.name().to_string()))?;
            adjustment.shipping = Some(ShippingAdjustment {
                kind,
                shipping_name: optional_text(child, "shipping-name"),
                shipping_cost: optional_money(child, "shipping-cost")?,
            });
        }
    }

    if let Some(codes) = el.child("merchant-codes") {
        for child in codes.children() {
            let kind = match child.name() {
                "coupon-adjustment" => MerchantCodeKind::Coupon,
                "gift-certificate-adjustment" => MerchantCodeKind::GiftCertificate,
                other => return Err(CodecError::UnknownRoot(other.to_string())),
            };
            adjustment.merchant_codes.push(MerchantCodeAdjustment {
                kind,
                code: child.required_child_text("code")?.to_string(),
                calculated_amount: optional_money(child, "calculated-amount")?,
                applied_amount: optional_money(child, "applied-amount")?,
                message: optional_text(child, "message"),
            });
        }
    }
    Ok(adjustment)
}

fn decode_risk_information(el: &Element) -> CodecResult<RiskInformation> {
    Ok(RiskInformation {
        billing_address: decode_address(el.required_child("billing-address")?)?,
        ip_address: optional_text(el, "ip-address"),
        avs_response: optional_text(el, "avs-response"),
        cvn_response: optional_text(el, "cvn-response"),
        eligible_for_protection: match el.child_text("eligible-for-protection") {
            Some(text) => parse_bool("eligible-for-protection", text)?,
            None => false,
        },
        partial_cc_number: optional_text(el, "partial-cc-number"),
        buyer_account_age: el
            .child_text("buyer-account-age")
            .map(|text| parse_u32("buyer-account-age", text))
            .transpose()?,
    })
}

fn decode_state_change(root: &Element, header: NotificationHeader) -> CodecResult<OrderStateChangeNotification> {
    Ok(OrderStateChangeNotification {
        header,
        new_financial_order_state: state(root, "new-financial-order-state")?,
        previous_financial_order_state: state(root, "previous-financial-order-state")?,
        new_fulfillment_order_state: state(root, "new-fulfillment-order-state")?,
        previous_fulfillment_order_state: state(root, "previous-fulfillment-order-state")?,
        reason: optional_text(root, "reason"),
    })
}

/// `<latest-charge-fee>` falls back to the latest charge currency when the
/// fee element carries none.
fn decode_charge_fee(root: &Element, fee: &Element) -> CodecResult<ChargeFee> {
    let currency = match fee.attribute("currency") {
        Some(currency) => currency.to_string(),
        None => money(root.required_child("latest-charge-amount")?)?.currency().to_string(),
    };
    let amount = |name: &str| -> CodecResult<Money> {
        let el = fee.required_child(name)?;
        let currency = el.attribute("currency").unwrap_or(&currency);
        Money::from_decimal_str(el.text(), currency)
            .map_err(|e| CodecError::invalid_value(name, el.text(), e))
    };
    let percentage_text = fee.required_child_text("percentage")?;
    Ok(ChargeFee {
        flat: amount("flat")?,
        percentage: percentage_text
            .parse()
            .map_err(|e| CodecError::invalid_value("percentage", percentage_text, e))?,
        total: amount("total")?,
    })
}

fn state<S>(root: &Element, name: &str) -> CodecResult<S>
where
    S: std::str::FromStr<Err = DomainError>,
{
    let text = root.required_child_text(name)?;
    text.parse().map_err(|e| CodecError::invalid_value(name, text, e))
}
