use axum::{
    Json,
    extract::{Query, State},
};
use campusgate_core::{AppError, ErrorResponse};
use campusgate_models::access_logs::{
    AccessAnalytics, AccessLogFilterParams, AnalyticsParams, PaginatedAccessLogsResponse,
};
use tracing::instrument;

use crate::modules::access_logs::service::AccessLogService;
use crate::state::AppState;

/// List access logs, newest first
#[utoipa::path(
    get,
    path = "/api/access-logs",
    params(AccessLogFilterParams),
    responses(
        (status = 200, description = "Matching access logs", body = PaginatedAccessLogsResponse),
        (status = 400, description = "Invalid filter value", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Access Logs"
)]
#[instrument(skip(state))]
pub async fn list_access_logs(
    State(state): State<AppState>,
    Query(params): Query<AccessLogFilterParams>,
) -> Result<Json<PaginatedAccessLogsResponse>, AppError> {
    let logs = AccessLogService::list_logs(&state.db, params).await?;
    Ok(Json(logs))
}

/// Access counts by status, room and time bucket
#[utoipa::path(
    get,
    path = "/api/access-logs/analytics",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "Aggregated access logs", body = AccessAnalytics),
        (status = 400, description = "Invalid filter value", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Access Logs"
)]
#[instrument(skip(state))]
pub async fn get_access_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AccessAnalytics>, AppError> {
    let time_frame = params.time_frame.unwrap_or_default();
    let analytics = AccessLogService::analytics(&state.db, params.filter, time_frame).await?;
    Ok(Json(analytics))
}
