//! Delivery tracking domain module.
//!
//! This crate contains the business rules for the delivery lifecycle,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). All mutation funnels through the [`Delivery`] aggregate root.

pub mod contact_point;
pub mod delivery;
pub mod item;
pub mod status;

pub use contact_point::ContactPoint;
pub use delivery::{Delivery, DeliveryId, PreparationDetails};
pub use item::{Item, ItemId};
pub use status::DeliveryStatus;
