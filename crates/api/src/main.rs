use core::str::FromStr;

use rust_decimal::Decimal;

use parceltrack_courier::PayoutPolicy;

#[tokio::main]
async fn main() {
    parceltrack_observability::init();

    let payout_policy = match std::env::var("PAYOUT_RATE_PER_KM") {
        Ok(raw) => match Decimal::from_str(&raw) {
            Ok(rate) => PayoutPolicy::new(rate),
            Err(_) => {
                tracing::warn!("PAYOUT_RATE_PER_KM is not a decimal; using default rate");
                PayoutPolicy::default()
            }
        },
        Err(_) => PayoutPolicy::default(),
    };

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = parceltrack_api::app::build_app(payout_policy);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
