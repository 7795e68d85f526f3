use checkout_domain::{
    AreaFilter, CarrierCalculatedShipping, CarrierCalculatedShippingOption, DeliveryMethod, ShippingPackage,
};
use checkout_core::{Dimension, Money};

use crate::encode::{area_element, bool_text, money_element, rate_text};
use crate::tree::Element;

pub(crate) fn shipping_method_element(method: &DeliveryMethod) -> Element {
    match method {
        DeliveryMethod::Pickup(pickup) => named_method("pickup", &pickup.name, &pickup.price),
        DeliveryMethod::FlatRate(flat) => {
            let mut el = named_method("flat-rate-shipping", &flat.name, &flat.price);
            if let Some(filter) = area_filter_element("shipping-restrictions", &flat.shipping_restrictions) {
                el.push(filter);
            }
            el
        }
        DeliveryMethod::MerchantCalculated(merchant) => {
            let mut el = named_method("merchant-calculated-shipping", &merchant.name, &merchant.price);
            if let Some(filter) = area_filter_element("shipping-restrictions", &merchant.shipping_restrictions) {
                el.push(filter);
            }
            if let Some(filter) = area_filter_element("address-filters", &merchant.address_filters) {
                el.push(filter);
            }
            el
        }
        DeliveryMethod::CarrierCalculated(carrier) => carrier_calculated_element(carrier),
    }
}

fn named_method(tag: &str, name: &str, price: &Money) -> Element {
    let mut el = Element::new(tag).with_attribute("name", name);
    el.push(money_element("price", price));
    el
}

/// `shipping-restrictions` / `address-filters`, only when some area is listed.
fn area_filter_element(tag: &str, filter: &AreaFilter) -> Option<Element> {
    if !filter.has_areas() {
        return None;
    }

    let mut el = Element::new(tag);
    el.add_text_child("allow-us-po-box", bool_text(filter.allow_us_po_box));
    if !filter.allowed_areas.is_empty() {
        let allowed = el.add_child("allowed-areas");
        for area in &filter.allowed_areas {
            allowed.push(area_element(area));
        }
    }
    if !filter.excluded_areas.is_empty() {
        let excluded = el.add_child("excluded-areas");
        for area in &filter.excluded_areas {
            excluded.push(area_element(area));
        }
    }
    Some(el)
}

fn carrier_calculated_element(shipping: &CarrierCalculatedShipping) -> Element {
    let mut el = Element::new("carrier-calculated-shipping");

    let options = el.add_child("carrier-calculated-shipping-options");
    for option in &shipping.options {
        options.push(carrier_option_element(option));
    }

    let packages = el.add_child("shipping-packages");
    for package in &shipping.packages {
        packages.push(package_element(package));
    }
    el
}

fn carrier_option_element(option: &CarrierCalculatedShippingOption) -> Element {
    let mut el = Element::new("carrier-calculated-shipping-option");
    el.push(money_element("price", &option.price));
    el.add_text_child("shipping-company", option.shipping_company.as_str());
    el.add_text_child("shipping-type", option.shipping_type.as_str());
    if let Some(pickup) = option.carrier_pickup {
        el.add_text_child("carrier-pickup", pickup.as_str());
    }
    if let Some(charge) = &option.additional_fixed_charge {
        el.push(money_element("additional-fixed-charge", charge));
    }
    if let Some(percent) = option.additional_variable_charge_percent {
        el.add_text_child("additional-variable-charge-percent", rate_text(percent));
    }
    el
}

fn package_element(package: &ShippingPackage) -> Element {
    let mut el = Element::new("shipping-package");

    let from = &package.ship_from;
    let ship_from = el.add_child("ship-from");
    if let Some(id) = &from.address_id {
        ship_from.set_attribute("id", id.as_str());
    }
    ship_from.add_text_child("city", from.city.as_str());
    ship_from.add_text_child("region", from.region.as_str());
    ship_from.add_text_child("country-code", from.country_code.as_str());
    ship_from.add_text_child("postal-code", from.postal_code.as_str());

    if let Some(category) = package.delivery_address_category {
        el.add_text_child("delivery-address-category", category.as_str());
    }
    for (tag, dimension) in [("height", &package.height), ("length", &package.length), ("width", &package.width)] {
        if let Some(dimension) = dimension {
            el.push(dimension_element(tag, dimension));
        }
    }
    el
}

fn dimension_element(tag: &str, dimension: &Dimension) -> Element {
    Element::new(tag)
        .with_attribute("unit", dimension.unit())
        .with_attribute("value", dimension.value_text())
}
