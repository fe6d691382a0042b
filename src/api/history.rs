//! Signal history endpoints: log, statistics, export, daily snapshots.

use crate::api::ApiResponse;
use crate::error::AppError;
use crate::types::{DailySnapshot, HistoryEntry, SignalStats};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
struct WindowQuery {
    /// Trailing window in days.
    days: Option<i64>,
}

impl WindowQuery {
    fn days(&self) -> Result<i64, AppError> {
        let days = self.days.unwrap_or(DEFAULT_WINDOW_DAYS);
        if days <= 0 {
            return Err(AppError::BadRequest(format!(
                "days must be positive, got {}",
                days
            )));
        }
        Ok(days)
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_history))
        .route("/stats", get(get_stats))
        .route("/export", get(export_history))
        .route("/snapshots", get(get_snapshots))
}

/// Signal log entries within the trailing window, newest first.
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, AppError> {
    let entries = state.history.recent(query.days()?)?;
    Ok(Json(ApiResponse::new(entries)))
}

/// Aggregate signal statistics over the trailing window.
async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ApiResponse<SignalStats>>, AppError> {
    let stats = state.history.stats(query.days()?)?;
    Ok(Json(ApiResponse::new(stats)))
}

/// Full retained log as a downloadable JSON document.
async fn export_history(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let json = state.history.export_json()?;
    let filename = format!(
        "attachment; filename=\"btc-signals-{}.json\"",
        chrono::Utc::now().format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        json,
    ))
}

/// Daily metric snapshots within the trailing window, newest first.
async fn get_snapshots(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ApiResponse<Vec<DailySnapshot>>>, AppError> {
    let snapshots = state.history.recent_snapshots(query.days()?)?;
    Ok(Json(ApiResponse::new(snapshots)))
}
