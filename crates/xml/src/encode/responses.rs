use tracing::debug;

use checkout_domain::{MerchantCalculationResult, MerchantCalculationResults, MerchantCodeKind, MerchantCodeResult, NotificationAcknowledgment};

use crate::encode::{bool_text, money_element};
use crate::error::CodecResult;
use crate::tree::Element;

/// Serialize the reply to a notification.
pub fn encode_acknowledgment(ack: &NotificationAcknowledgment) -> CodecResult<String> {
    let mut root = Element::root("notification-acknowledgment");
    if let Some(serial_number) = &ack.serial_number {
        root.set_attribute("serial-number", serial_number.as_str());
    }
    debug!(serial_number = ack.serial_number.as_ref().map(|s| s.as_str()), "encoded acknowledgment");
    root.to_document()
}

/// Serialize the reply to a merchant calculation callback.
pub fn encode_merchant_calculation_results(results: &MerchantCalculationResults) -> CodecResult<String> {
    let mut root = Element::root("merchant-calculation-results");
    let list = root.add_child("results");
    for result in &results.results {
        list.push(result_element(result));
    }
    debug!(results = results.results.len(), "encoded merchant calculation results");
    root.to_document()
}

fn result_element(result: &MerchantCalculationResult) -> Element {
    let mut el = Element::new("result")
        .with_attribute("shipping-name", result.shipping_name.as_str())
        .with_attribute("address-id", result.address_id.as_str());
    el.push(money_element("shipping-rate", &result.shipping_rate));
    el.add_text_child("shippable", bool_text(result.shippable));
    if let Some(tax) = &result.total_tax {
        el.push(money_element("total-tax", tax));
    }
    let codes = el.add_child("merchant-code-results");
    for code in &result.merchant_code_results {
        codes.push(code_result_element(code));
    }
    el
}

fn code_result_element(code: &MerchantCodeResult) -> Element {
    let tag = match code.kind {
        MerchantCodeKind::Coupon => "coupon-result",
        MerchantCodeKind::GiftCertificate => "gift-certificate-result",
    };
    let mut el = Element::new(tag);
    el.add_text_child("valid", bool_text(code.valid));
    el.add_text_child("code", code.code.as_str());
    el.push(money_element("calculated-amount", &code.calculated_amount));
    el.add_text_child("message", code.message.as_str());
    el
}
