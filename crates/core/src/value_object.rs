//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Money`
/// instances with the same amount and currency are the same money, and a
/// `Weight` of `2.2 LB` is interchangeable with any other `2.2 LB`.
///
/// To "modify" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
