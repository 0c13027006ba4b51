use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Row;
use crate::error::ApiError;
use crate::state::AppState;

pub mod health;
pub mod players;
pub mod teams;

/// Build the full application router around the given state.
pub fn router(state: AppState) -> Router {
    // The dashboard frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    Router::new()
        .route("/", get(|| async { "Cricket Stats API - v1.0" }))
        .route("/health", get(health::health_check))
        .route("/api/players", get(players::get_players))
        .route("/api/teams", get(teams::get_teams))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let err = ApiError::from_panic(payload);
    tracing::error!("Handler panicked: {}", err);
    err.into_response()
}

/// Deserialize raw rows into typed records, preserving their order.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, ApiError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(ApiError::from))
        .collect()
}
