use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use campusgate_core::errors::field_errors;
use campusgate_core::{AppError, ErrorResponse};
use campusgate_models::users::{
    AccessAuditResponse, CreateUserDto, FormValidationResponse, PaginatedUsersResponse,
    UpdateUserAccessDto, User, UserFilterParams,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, json_rejection_error};

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "CMS ID and email already registered together", body = ErrorResponse),
        (status = 422, description = "Field validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(&state.db, &state.catalog, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users matching the given filters
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "Users, newest first", body = PaginatedUsersResponse),
        (status = 400, description = "Invalid filter value", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filters): Query<UserFilterParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let users = UserService::list_users(&state.db, filters).await?;
    Ok(Json(users))
}

/// Check a user form without saving it
///
/// Applies the entry form's rules, which require a CMS ID of at least six
/// characters.
#[utoipa::path(
    post,
    path = "/api/users/validate",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "Validation result", body = FormValidationResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(body))]
pub async fn validate_user_form(
    body: Result<Json<CreateUserDto>, JsonRejection>,
) -> Result<Json<FormValidationResponse>, AppError> {
    let Json(dto) = body.map_err(json_rejection_error)?;

    let response = match dto.validate_form() {
        Ok(()) => FormValidationResponse {
            valid: true,
            fields: Vec::new(),
        },
        Err(errors) => FormValidationResponse {
            valid: false,
            fields: field_errors(&errors),
        },
    };

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Compare a user's stored access with their current candidate pool
#[utoipa::path(
    get,
    path = "/api/users/{id}/access-audit",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Stored access split by pool membership", body = AccessAuditResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn access_audit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccessAuditResponse>, AppError> {
    let audit =
        UserService::access_audit(&state.db, &state.catalog, &state.access_options, id).await?;
    Ok(Json(audit))
}

/// Find a user by CMS ID
#[utoipa::path(
    get,
    path = "/api/users/cms/{cms_id}",
    params(
        ("cms_id" = String, Path, description = "CMS ID")
    ),
    responses(
        (status = 200, description = "Earliest user registered with this CMS ID", body = User),
        (status = 404, description = "No user with this CMS ID", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_by_cms_id(
    State(state): State<AppState>,
    Path(cms_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user_by_cms_id(&state.db, &cms_id).await?;
    Ok(Json(user))
}

/// Replace a user's role and access list
#[utoipa::path(
    put,
    path = "/api/users/cms/{cms_id}",
    params(
        ("cms_id" = String, Path, description = "CMS ID")
    ),
    request_body = UpdateUserAccessDto,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "No user with this CMS ID", body = ErrorResponse),
        (status = 422, description = "Field validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user_access(
    State(state): State<AppState>,
    Path(cms_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserAccessDto>,
) -> Result<Json<User>, AppError> {
    let user =
        UserService::update_role_and_access(&state.db, &state.catalog, &cms_id, dto).await?;
    Ok(Json(user))
}
