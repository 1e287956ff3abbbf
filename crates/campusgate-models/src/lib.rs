//! # Campusgate Models
//!
//! Domain models and DTOs for the Campusgate API.
//!
//! # Modules
//!
//! - [`access`]: catalog, candidate-pool and reselection DTOs
//! - [`access_logs`]: access-log entries, filters and analytics
//! - [`users`]: user records, creation/update DTOs and their validation
//!
//! # Example
//!
//! ```ignore
//! use campusgate_access::Catalog;
//! use campusgate_models::users::CreateUserDto;
//!
//! let new_user = dto.validate_with_catalog(&Catalog::default())?;
//! ```

pub mod access;
pub mod access_logs;
pub mod users;

pub use access::{CandidatePoolResponse, CandidatesQuery, ReselectRequest, ReselectResponse};

pub use access_logs::{
    AccessAnalytics, AccessLogEntry, AccessLogError, AccessLogFilter, AccessLogFilterParams,
    AccessStatus, AnalyticsParams, PaginatedAccessLogsResponse, RoomAccessStats, StatusCount,
    TimeBucket, TimeFrame,
};

pub use users::{
    AccessAuditResponse, CreateUserDto, FORM_CMS_ID_MIN_LENGTH, FormValidationResponse, NewUser,
    PaginatedUsersResponse, UpdateUserAccessDto, User, UserFilterParams,
};
