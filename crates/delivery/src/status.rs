//! Delivery status lifecycle as a closed enumeration with an explicit
//! transition table.

use serde::{Deserialize, Serialize};

/// Delivery status lifecycle.
///
/// `Draft` is the sole initial state and `Delivered` the sole terminal one;
/// no edge leaves `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Draft,
    WaitingForCourier,
    InTransit,
    Delivered,
}

impl DeliveryStatus {
    /// Legal transitions. Single source of truth for the state machine:
    /// no self-loops, no reverse edges, no skip-ahead moves.
    pub fn can_change_to(self, target: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, target),
            (Draft, WaitingForCourier) | (WaitingForCourier, InTransit) | (InTransit, Delivered)
        )
    }

    pub fn can_not_change_to(self, target: DeliveryStatus) -> bool {
        !self.can_change_to(target)
    }
}

impl core::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            DeliveryStatus::Draft => "DRAFT",
            DeliveryStatus::WaitingForCourier => "WAITING_FOR_COURIER",
            DeliveryStatus::InTransit => "IN_TRANSIT",
            DeliveryStatus::Delivered => "DELIVERED",
        };
        f.write_str(s)
    }
}
