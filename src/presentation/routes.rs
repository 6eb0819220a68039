// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_user_profile, health_check};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/user/:username", get(get_user_profile))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
