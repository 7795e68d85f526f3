//! XML wire mapping for the checkout domain.
//!
//! Outbound, [`encode`] turns a [`checkout_domain::Command`] into the request
//! document the provider expects. Inbound, [`decode`] parses any document the
//! provider sends and routes it by root tag into an [`Inbound`] value, or a
//! [`CodecError`] carrying the provider's own [`CheckoutError`].
//!
//! Both directions go through the small [`tree::Element`] model: encoders
//! build a tree and serialize it, decoders parse a tree and walk it.

pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod tree;

pub use dispatch::{decode, decode_element, decode_response, Inbound};
pub use encode::{encode, encode_acknowledgment, encode_merchant_calculation_results};
pub use error::{CheckoutError, CodecError, CodecResult};
pub use tree::{Element, NAMESPACE};
