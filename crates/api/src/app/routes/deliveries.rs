use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Duration, Utc};

use parceltrack_core::{AggregateId, CourierId};
use parceltrack_delivery::{DeliveryId, ItemId, PreparationDetails};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_delivery).get(list_deliveries))
        .route("/:id", get(get_delivery))
        .route("/:id/preparation", put(edit_preparation_details))
        .route("/:id/items", post(add_item).delete(remove_items))
        .route(
            "/:id/items/:item_id",
            put(change_item_quantity).delete(remove_item),
        )
        .route("/:id/placement", post(place_delivery))
        .route("/:id/pickup", post(pick_up_delivery))
        .route("/:id/completion", post(complete_delivery))
}

fn parse_delivery_id(raw: &str) -> Result<DeliveryId, axum::response::Response> {
    raw.parse::<AggregateId>()
        .map(DeliveryId::new)
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid delivery id"))
}

pub async fn create_delivery(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.create_draft() {
        Ok(delivery) => {
            tracing::info!(delivery_id = %delivery.id_typed(), "delivery drafted");
            (StatusCode::CREATED, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_deliveries(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::PageParams>,
) -> axum::response::Response {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);

    match services.list(page, per_page) {
        Ok(result) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": result.items.iter().map(dto::delivery_to_json).collect::<Vec<_>>(),
                "page": result.page,
                "per_page": result.per_page,
                "total": result.total,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get(&delivery_id) {
        Ok(Some(delivery)) => {
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "delivery not found"),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn edit_preparation_details(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::EditPreparationRequest>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let details = PreparationDetails {
        sender: body.sender,
        recipient: body.recipient,
        distance_fee: body.distance_fee,
        courier_payout: services.payout_policy().calculate(body.distance_km),
        expected_delivery_time: Duration::minutes(body.expected_delivery_minutes),
    };

    match services.update(&delivery_id, |delivery| {
        delivery.edit_preparation_details(details, Utc::now())
    }) {
        Ok((delivery, ())) => {
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.update(&delivery_id, |delivery| {
        delivery.add_item(body.name.clone(), body.quantity)
    }) {
        Ok((delivery, item_id)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "item_id": item_id.to_string(),
                "delivery": dto::delivery_to_json(&delivery),
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn change_item_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, item_id)): Path<(String, String)>,
    Json(body): Json<dto::ChangeItemQuantityRequest>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let item_id: ItemId = match item_id.parse::<AggregateId>() {
        Ok(v) => ItemId::new(v),
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    match services.update(&delivery_id, |delivery| {
        delivery.change_item_quantity(item_id, body.quantity)
    }) {
        Ok((delivery, ())) => {
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, item_id)): Path<(String, String)>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let item_id: ItemId = match item_id.parse::<AggregateId>() {
        Ok(v) => ItemId::new(v),
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"),
    };

    match services.update(&delivery_id, |delivery| {
        delivery.remove_item(item_id);
        Ok(())
    }) {
        Ok((delivery, ())) => {
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.update(&delivery_id, |delivery| {
        delivery.remove_items();
        Ok(())
    }) {
        Ok((delivery, ())) => {
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn place_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.update(&delivery_id, |delivery| delivery.place(Utc::now())) {
        Ok((delivery, ())) => {
            tracing::info!(delivery_id = %delivery.id_typed(), "delivery placed");
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn pick_up_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::PickUpRequest>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let courier_id: CourierId = match body.courier_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid courier id")
        }
    };

    match services.update(&delivery_id, |delivery| {
        delivery.pick_up(courier_id, Utc::now())
    }) {
        Ok((delivery, ())) => {
            tracing::info!(delivery_id = %delivery.id_typed(), courier_id = %courier_id, "delivery picked up");
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn complete_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let delivery_id = match parse_delivery_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.update(&delivery_id, |delivery| delivery.mark_as_delivered(Utc::now())) {
        Ok((delivery, ())) => {
            tracing::info!(delivery_id = %delivery.id_typed(), "delivery fulfilled");
            (StatusCode::OK, Json(dto::delivery_to_json(&delivery))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
