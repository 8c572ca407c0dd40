//! Contact point value object (address + contact info).

use parceltrack_core::ValueObject;
use serde::{Deserialize, Serialize};

/// Where a delivery is picked up from or handed over to.
///
/// Immutable once constructed; replacing a delivery's sender or recipient
/// replaces the whole value, never individual fields. Equality and hashing
/// are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactPoint {
    pub zip_code: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub name: String,
    pub phone: String,
}

impl ContactPoint {
    pub fn new(
        zip_code: impl Into<String>,
        street: impl Into<String>,
        number: impl Into<String>,
        complement: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            zip_code: zip_code.into(),
            street: street.into(),
            number: number.into(),
            complement: complement.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}

impl ValueObject for ContactPoint {}
