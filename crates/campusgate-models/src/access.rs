//! Request and response DTOs for the catalog and access-option endpoints.

use campusgate_access::{Department, Role, SelectionPolicy};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query for the candidate pool of a (department, role) pair.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct CandidatesQuery {
    pub department: Department,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidatePoolResponse {
    pub department: Department,
    pub role: Role,
    pub total: usize,
    /// Classes, then labs, then the staff room, then personal rooms
    pub options: Vec<String>,
}

/// Sent when an operator changes the department or role on the user form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReselectRequest {
    #[serde(alias = "dept")]
    pub department: Department,
    pub role: Role,
    #[serde(default, alias = "currentSelection")]
    pub current_selection: Vec<String>,
    #[serde(default)]
    pub policy: SelectionPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReselectResponse {
    pub candidates: Vec<String>,
    pub selection: Vec<String>,
}
