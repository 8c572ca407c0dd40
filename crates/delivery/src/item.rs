//! Item child entity, owned exclusively by a [`crate::Delivery`].

use parceltrack_core::{AggregateId, Entity};
use serde::{Deserialize, Serialize};

/// Item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub AggregateId);

impl ItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A line of the delivery: what is being carried and how many.
///
/// Constructed only through `Delivery::add_item`; its identity is generated
/// there and never reassigned. Two items may share a name but never an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    quantity: u32,
}

impl Item {
    pub(crate) fn brand_new(name: String, quantity: u32) -> Self {
        Self {
            id: ItemId::new(AggregateId::new()),
            name,
            quantity,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
