use checkout_domain::{CheckoutCommand, ParameterizedUrl};

use crate::encode::shipping::shipping_method_element;
use crate::encode::tax::tax_tables_element;
use crate::encode::{bool_text, command_root, shopping_cart_element};
use crate::error::CodecResult;
use crate::tree::Element;

/// `<checkout-shopping-cart>` document root.
pub(crate) fn checkout_element(command: &CheckoutCommand) -> CodecResult<Element> {
    let mut root = command_root("checkout-shopping-cart", None);
    root.push(shopping_cart_element(&command.shopping_cart)?);

    let flow = root
        .add_child("checkout-flow-support")
        .add_child("merchant-checkout-flow-support");

    if let Some(tables) = tax_tables_element(command.tax_tables()) {
        flow.push(tables);
    }
    if let Some(url) = &command.continue_shopping_url {
        flow.add_text_child("continue-shopping-url", url.as_str());
    }
    if let Some(url) = &command.edit_cart_url {
        flow.add_text_child("edit-cart-url", url.as_str());
    }
    if let Some(request) = command.request_buyer_phone_number {
        flow.add_text_child("request-buyer-phone-number", bool_text(request));
    }
    if let Some(calculations) = &command.merchant_calculations {
        let el = flow.add_child("merchant-calculations");
        el.add_text_child("merchant-calculations-url", calculations.url.as_str());
        if let Some(accept) = calculations.accept_merchant_coupons {
            el.add_text_child("accept-merchant-coupons", bool_text(accept));
        }
        if let Some(accept) = calculations.accept_gift_certificates {
            el.add_text_child("accept-gift-certificates", bool_text(accept));
        }
    }
    if let Some(platform_id) = &command.platform_id {
        flow.add_text_child("platform-id", platform_id.as_str());
    }

    let methods = flow.add_child("shipping-methods");
    for method in &command.shipping_methods {
        methods.push(shipping_method_element(method));
    }

    if let Some(analytics) = &command.analytics_data {
        flow.add_text_child("analytics-data", analytics.as_str());
    }
    if !command.parameterized_urls.is_empty() {
        let urls = flow.add_child("parameterized-urls");
        for url in &command.parameterized_urls {
            urls.push(parameterized_url_element(url));
        }
    }

    Ok(root)
}

fn parameterized_url_element(url: &ParameterizedUrl) -> Element {
    let mut el = Element::new("parameterized-url").with_attribute("url", url.url.as_str());
    let parameters = el.add_child("parameters");
    for parameter in &url.parameters {
        parameters.push(
            Element::new("url-parameter")
                .with_attribute("name", parameter.name.as_str())
                .with_attribute("type", parameter.parameter_type.as_str()),
        );
    }
    el
}
