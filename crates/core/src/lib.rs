//! Value types shared by the checkout model and its wire codec.
//!
//! This crate contains **pure domain** primitives (no XML, no transport concerns).

pub mod error;
pub mod id;
pub mod money;
pub mod units;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{GoogleOrderNumber, SerialNumber};
pub use money::Money;
pub use units::{Dimension, Weight};
pub use value_object::ValueObject;
