use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use campusgate_access::{AccessOptions, Catalog, filter_options, reconcile_selection};
use campusgate_core::{AppError, ErrorResponse};
use campusgate_models::access::{
    CandidatePoolResponse, CandidatesQuery, ReselectRequest, ReselectResponse,
};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::json_rejection_error;

/// Departments, roles and per-department resource counts
#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "The campus catalog", body = Catalog)
    ),
    tag = "Access Options"
)]
#[instrument(skip(state))]
pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

/// Every generated access option, grouped by category
#[utoipa::path(
    get,
    path = "/api/access-options",
    responses(
        (status = 200, description = "Generated access options", body = AccessOptions)
    ),
    tag = "Access Options"
)]
#[instrument(skip(state))]
pub async fn get_access_options(State(state): State<AppState>) -> Json<AccessOptions> {
    Json(state.access_options.as_ref().clone())
}

/// Candidate pool for a department and role
#[utoipa::path(
    get,
    path = "/api/access-options/candidates",
    params(CandidatesQuery),
    responses(
        (status = 200, description = "Options that may be offered", body = CandidatePoolResponse),
        (status = 400, description = "Unknown department or role", body = ErrorResponse)
    ),
    tag = "Access Options"
)]
#[instrument(skip(state))]
pub async fn get_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidatesQuery>,
) -> Json<CandidatePoolResponse> {
    let options = filter_options(
        query.department,
        query.role,
        &state.access_options,
        &state.catalog,
    );

    Json(CandidatePoolResponse {
        department: query.department,
        role: query.role,
        total: options.len(),
        options,
    })
}

/// Recompute the pool after a department or role change and reconcile the
/// current selection with it
#[utoipa::path(
    post,
    path = "/api/access-options/reselect",
    request_body = ReselectRequest,
    responses(
        (status = 200, description = "New pool and reconciled selection", body = ReselectResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    ),
    tag = "Access Options"
)]
#[instrument(skip(state, body))]
pub async fn reselect(
    State(state): State<AppState>,
    body: Result<Json<ReselectRequest>, JsonRejection>,
) -> Result<Json<ReselectResponse>, AppError> {
    let Json(request) = body.map_err(json_rejection_error)?;

    let candidates = filter_options(
        request.department,
        request.role,
        &state.access_options,
        &state.catalog,
    );
    let selection = reconcile_selection(&request.current_selection, &candidates, request.policy);

    Ok(Json(ReselectResponse {
        candidates,
        selection,
    }))
}
