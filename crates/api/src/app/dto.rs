use rust_decimal::Decimal;
use serde::Deserialize;

use parceltrack_delivery::{ContactPoint, Delivery, Item};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct EditPreparationRequest {
    pub sender: ContactPoint,
    pub recipient: ContactPoint,
    pub distance_fee: Decimal,
    /// Trip distance; courier payout is computed from it at the boundary.
    pub distance_km: Decimal,
    pub expected_delivery_minutes: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChangeItemQuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct PickUpRequest {
    pub courier_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn delivery_to_json(delivery: &Delivery) -> serde_json::Value {
    serde_json::json!({
        "id": delivery.id_typed().to_string(),
        "status": delivery.status(),
        "courier_id": delivery.courier_id().map(|id| id.to_string()),
        "placed_at": delivery.placed_at(),
        "assigned_at": delivery.assigned_at(),
        "expected_delivery_at": delivery.expected_delivery_at(),
        "fulfilled_at": delivery.fulfilled_at(),
        "distance_fee": delivery.distance_fee(),
        "courier_payout": delivery.courier_payout(),
        "total_cost": delivery.total_cost(),
        "total_items": delivery.total_items(),
        "sender": delivery.sender(),
        "recipient": delivery.recipient(),
        "items": delivery.items().iter().map(item_to_json).collect::<Vec<_>>(),
    })
}

fn item_to_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "id": item.id_typed().to_string(),
        "name": item.name(),
        "quantity": item.quantity(),
    })
}
