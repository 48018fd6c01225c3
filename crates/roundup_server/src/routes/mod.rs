pub mod returns;
pub mod transactions;

pub use returns::returns_routes;
pub use transactions::transaction_routes;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Prefix shared by every pipeline endpoint
pub const API_BASE: &str = "/blackrock/challenge/v1";

/// Full application router with middleware applied
pub fn app(state: AppState, body_limit: usize) -> Router {
    let api = Router::new()
        .merge(transaction_routes())
        .merge(returns_routes())
        .route("/performance", get(handlers::performance));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest(API_BASE, api)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
