// HTTP request handlers
use crate::domain::profile::{ProfileError, UserProfile};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::InvalidUsername(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Look up a user profile; unknown users get a placeholder
pub async fn get_user_profile(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.profile_service.get_profile(&username).await?;
    Ok(Json(profile))
}
