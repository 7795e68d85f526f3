use checkout_domain::{Address, AnonymousAddress};

use crate::decode::optional_text;
use crate::error::CodecResult;
use crate::tree::Element;

/// Address given in merchant calculation callbacks and ship-from blocks.
pub fn decode_anonymous_address(el: &Element) -> CodecResult<AnonymousAddress> {
    let mut address = AnonymousAddress::new(
        el.required_child_text("city")?,
        el.required_child_text("region")?,
        el.required_child_text("postal-code")?,
        el.required_child_text("country-code")?,
    );
    address.address_id = el.attribute("id").map(str::to_string);
    Ok(address)
}

/// Buyer billing or shipping address.
pub fn decode_address(el: &Element) -> CodecResult<Address> {
    Ok(Address {
        location: decode_anonymous_address(el)?,
        contact_name: optional_text(el, "contact-name"),
        company_name: optional_text(el, "company-name"),
        address1: el.required_child_text("address1")?.to_string(),
        address2: optional_text(el, "address2"),
        email: optional_text(el, "email"),
        phone: optional_text(el, "phone"),
        fax: optional_text(el, "fax"),
    })
}
