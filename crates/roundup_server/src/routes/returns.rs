use axum::{Router, routing::post};

use crate::handlers::{self, AppState};

pub fn returns_routes() -> Router<AppState> {
    Router::new()
        .route("/returns/nps", post(handlers::pension_returns))
        .route("/returns/index", post(handlers::index_returns))
}
