//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined
//! entirely by their attribute values. Two value objects with the same values are
//! considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared field by field**. To "modify"
/// one, construct a new value; partial in-place updates are not part of the
/// contract. This gives them primitive-like semantics: safe to copy, share, and
/// compare in assertions without reference identity getting in the way.
///
/// Example: a contact point (address + contact info) is a value object; a
/// delivery is an entity because it keeps its identity while its state changes.
///
/// The trait requires:
/// - **Clone**: values are copied, not referenced
/// - **PartialEq**: structural comparison
/// - **Debug**: loggable and testable
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
