use utoipa::OpenApi;

use campusgate_access::{
    AccessCategory, AccessOptions, Catalog, Department, Role, SelectionPolicy,
};
use campusgate_core::{ErrorResponse, FieldError, PaginationMeta, PaginationParams};
use campusgate_models::access::{
    CandidatePoolResponse, CandidatesQuery, ReselectRequest, ReselectResponse,
};
use campusgate_models::access_logs::{
    AccessAnalytics, AccessLogEntry, AccessStatus, PaginatedAccessLogsResponse, RoomAccessStats,
    StatusCount, TimeBucket, TimeFrame,
};
use campusgate_models::users::{
    AccessAuditResponse, CreateUserDto, FormValidationResponse, PaginatedUsersResponse,
    UpdateUserAccessDto, User,
};

use crate::modules::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::access_options::controller::get_catalog,
        crate::modules::access_options::controller::get_access_options,
        crate::modules::access_options::controller::get_candidates,
        crate::modules::access_options::controller::reselect,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::validate_user_form,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::access_audit,
        crate::modules::users::controller::get_user_by_cms_id,
        crate::modules::users::controller::update_user_access,
        crate::modules::access_logs::controller::list_access_logs,
        crate::modules::access_logs::controller::get_access_analytics,
    ),
    components(
        schemas(
            HealthResponse,
            Catalog,
            Department,
            Role,
            AccessCategory,
            AccessOptions,
            SelectionPolicy,
            CandidatesQuery,
            CandidatePoolResponse,
            ReselectRequest,
            ReselectResponse,
            User,
            CreateUserDto,
            UpdateUserAccessDto,
            FormValidationResponse,
            AccessAuditResponse,
            PaginatedUsersResponse,
            AccessLogEntry,
            AccessStatus,
            PaginatedAccessLogsResponse,
            TimeFrame,
            AccessAnalytics,
            StatusCount,
            RoomAccessStats,
            TimeBucket,
            ErrorResponse,
            FieldError,
            PaginationMeta,
            PaginationParams,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Access Options", description = "Catalog, generated access options and the privilege filter"),
        (name = "Users", description = "User records and their access lists"),
        (name = "Access Logs", description = "Read-only access history and analytics")
    ),
    info(
        title = "Campusgate API",
        version = "0.1.0",
        description = "Admin API for campus room-access control, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
