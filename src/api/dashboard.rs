//! Dashboard endpoints: the latest evaluation cycle and manual refresh.

use crate::api::ApiResponse;
use crate::error::AppError;
use crate::types::CycleResult;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/refresh", post(refresh_dashboard))
}

/// Latest published cycle result.
async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CycleResult>>, AppError> {
    let result = state
        .dashboard
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No evaluation cycle has completed yet".to_string()))?;

    Ok(Json(ApiResponse::new(result)))
}

/// Trigger a refresh cycle and return the latest result. A refresh
/// already in flight coalesces; the response carries whatever is
/// published once this call's refresh returns. A rejected metric set
/// surfaces as 422 and the previously published result is untouched.
async fn refresh_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CycleResult>>, AppError> {
    state.dashboard.refresh().await?;

    let result = state
        .dashboard
        .latest()
        .await
        .ok_or_else(|| AppError::ExternalApi("Refresh cycle produced no result".to_string()))?;

    Ok(Json(ApiResponse::new(result)))
}
