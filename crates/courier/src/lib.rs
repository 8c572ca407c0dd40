//! Courier payout calculation.
//!
//! Thin collaborator around the delivery aggregate: given a distance, it
//! produces the monetary amount a courier earns for the trip. The result
//! feeds `PreparationDetails::courier_payout` at the service boundary.

pub mod payout;

pub use payout::PayoutPolicy;
