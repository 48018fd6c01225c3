use axum::{Router, routing::post};

use crate::handlers::{self, AppState};

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions/parse", post(handlers::parse_transactions))
        .route("/transactions/validator", post(handlers::validate))
        .route("/transactions/filter", post(handlers::filter))
}
