//! User domain models and DTOs.
//!
//! A user is a person holding campus access: a CMS ID, a department, a role
//! and the list of access-option identifiers granted to them. Department and
//! role arrive as strings so that a bad value surfaces as a field error
//! ("Invalid department.") instead of a body-parsing failure.

use std::borrow::Cow;
use std::fmt;

use campusgate_access::{Catalog, Department, Role, dedup_access};
use campusgate_core::serde::{deserialize_optional_from_str, deserialize_optional_string};
use campusgate_core::{FieldError, PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Minimum CMS ID length enforced by the portal's entry form.
pub const FORM_CMS_ID_MIN_LENGTH: usize = 6;

const CMS_ID_REQUIRED: &str = "CMS ID is required.";
const INVALID_DEPARTMENT: &str = "Invalid department.";
const INVALID_ROLE: &str = "Invalid role.";

/// A stored user record.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub cms_id: String,
    #[sqlx(try_from = "String")]
    pub department: Department,
    #[sqlx(try_from = "String")]
    pub role: Role,
    /// Granted access-option identifiers, without duplicates
    pub access: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_department(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Department>()
        .map(|_| ())
        .map_err(|_| field_error("department", INVALID_DEPARTMENT))
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Role>()
        .map(|_| ())
        .map_err(|_| field_error("role", INVALID_ROLE))
}

/// DTO for creating a user.
///
/// Accepts the portal's camelCase names (`fullName`, `cmsId`, `dept`) as
/// well as snake_case.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, message = "Full name is required."))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format."))]
    pub email: String,
    #[serde(alias = "cmsId")]
    #[validate(length(min = 1, message = "CMS ID is required."))]
    pub cms_id: String,
    #[serde(alias = "dept")]
    #[validate(custom(function = "validate_department"))]
    #[schema(example = "Seecs")]
    pub department: String,
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "Student")]
    pub role: String,
    /// Access-option identifiers. Not checked against the candidate pool.
    pub access: Vec<String>,
    /// Accepted from the portal form and ignored.
    #[serde(default)]
    #[schema(write_only)]
    pub password: Option<String>,
}

impl fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("cms_id", &self.cms_id)
            .field("department", &self.department)
            .field("role", &self.role)
            .field("access", &self.access)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A user that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub cms_id: String,
    pub department: Department,
    pub role: Role,
    pub access: Vec<String>,
}

impl CreateUserDto {
    /// Boundary rules plus the entry form's stricter CMS ID length.
    pub fn validate_form(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let cms_id_reported = errors.field_errors().contains_key("cms_id");
        if !cms_id_reported && self.cms_id.chars().count() < FORM_CMS_ID_MIN_LENGTH {
            errors.add("cms_id", field_error("length", CMS_ID_REQUIRED));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates against the boundary rules and the given catalog, producing
    /// a record with a de-duplicated access list.
    pub fn validate_with_catalog(&self, catalog: &Catalog) -> Result<NewUser, ValidationErrors> {
        self.validate()?;

        let mut errors = ValidationErrors::new();
        let department = self
            .department
            .parse::<Department>()
            .ok()
            .filter(|d| catalog.has_department(*d));
        let role = self.role.parse::<Role>().ok().filter(|r| catalog.has_role(*r));

        if department.is_none() {
            errors.add("department", field_error("department", INVALID_DEPARTMENT));
        }
        if role.is_none() {
            errors.add("role", field_error("role", INVALID_ROLE));
        }

        match (department, role) {
            (Some(department), Some(role)) => Ok(NewUser {
                full_name: self.full_name.clone(),
                email: self.email.clone(),
                cms_id: self.cms_id.clone(),
                department,
                role,
                access: dedup_access(self.access.iter().cloned()),
            }),
            _ => Err(errors),
        }
    }
}

/// DTO for changing a user's role and access list.
///
/// The full access list is replaced; the department never changes here.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateUserAccessDto {
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "Teacher")]
    pub role: String,
    pub access: Vec<String>,
}

impl UpdateUserAccessDto {
    pub fn validate_with_catalog(
        &self,
        catalog: &Catalog,
    ) -> Result<(Role, Vec<String>), ValidationErrors> {
        self.validate()?;

        match self.role.parse::<Role>() {
            Ok(role) if catalog.has_role(role) => {
                Ok((role, dedup_access(self.access.iter().cloned())))
            }
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("role", field_error("role", INVALID_ROLE));
                Err(errors)
            }
        }
    }
}

/// Query parameters for filtering users.
///
/// Text filters are case-insensitive substring matches; department and
/// role match exactly. All filters combine with AND.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct UserFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub cms_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub department: Option<Department>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing users.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

/// A user's stored access list split against their current candidate pool.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessAuditResponse {
    pub user_id: Uuid,
    pub cms_id: String,
    pub department: Department,
    pub role: Role,
    /// Stored entries the privilege filter would still offer
    pub within_pool: Vec<String>,
    /// Stored entries outside the pool (kept, but flagged for review)
    pub outside_pool: Vec<String>,
}

/// Result of the entry-form preflight.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusgate_core::errors::field_errors;

    fn dto() -> CreateUserDto {
        CreateUserDto {
            full_name: "Ayesha Khan".to_string(),
            email: "ayesha@example.edu".to_string(),
            cms_id: "123456".to_string(),
            department: "Seecs".to_string(),
            role: "Student".to_string(),
            access: vec!["Seecs Class 1".to_string()],
            password: None,
        }
    }

    fn messages(errors: &ValidationErrors) -> Vec<(String, String)> {
        field_errors(errors)
            .into_iter()
            .map(|f| (f.field, f.message))
            .collect()
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut d = dto();
        d.password = Some("hunter2-secret".to_string());

        let rendered = format!("{:?}", d);
        assert!(!rendered.contains("hunter2-secret"));
        assert!(rendered.contains("password: Some(\"[REDACTED]\")"));
        assert!(rendered.contains("cms_id: \"123456\""));

        assert!(format!("{:?}", dto()).contains("password: None"));
    }

    #[test]
    fn test_valid_dto_passes() {
        assert!(dto().validate().is_ok());
        assert!(dto().validate_form().is_ok());
    }

    #[test]
    fn test_empty_full_name_rejected() {
        let mut d = dto();
        d.full_name = String::new();
        let errors = d.validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![("full_name".to_string(), "Full name is required.".to_string())]
        );
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut d = dto();
        d.email = "not-an-email".to_string();
        let errors = d.validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![("email".to_string(), "Invalid email format.".to_string())]
        );
    }

    #[test]
    fn test_empty_cms_id_rejected() {
        let mut d = dto();
        d.cms_id = String::new();
        let errors = d.validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![("cms_id".to_string(), CMS_ID_REQUIRED.to_string())]
        );
    }

    #[test]
    fn test_department_and_role_are_case_sensitive() {
        let mut d = dto();
        d.department = "SEECS".to_string();
        d.role = "student".to_string();
        let errors = d.validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                ("department".to_string(), INVALID_DEPARTMENT.to_string()),
                ("role".to_string(), INVALID_ROLE.to_string()),
            ]
        );
    }

    #[test]
    fn test_lab_instructors_role_accepted() {
        let mut d = dto();
        d.role = "Lab Instructors".to_string();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_form_rejects_short_cms_id_that_boundary_accepts() {
        let mut d = dto();
        d.cms_id = "12345".to_string();
        assert!(d.validate().is_ok());

        let errors = d.validate_form().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![("cms_id".to_string(), CMS_ID_REQUIRED.to_string())]
        );
    }

    #[test]
    fn test_form_reports_empty_cms_id_once() {
        let mut d = dto();
        d.cms_id = String::new();
        let errors = d.validate_form().unwrap_err();
        assert_eq!(errors.field_errors()["cms_id"].len(), 1);
    }

    #[test]
    fn test_access_entries_are_not_shape_checked() {
        let mut d = dto();
        d.access = vec!["Rooftop".to_string(), String::new()];
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_validate_with_catalog_dedups_access() {
        let mut d = dto();
        d.access = vec![
            "Seecs Lab 1".to_string(),
            "Seecs Class 1".to_string(),
            "Seecs Lab 1".to_string(),
        ];
        let user = d.validate_with_catalog(&Catalog::default()).unwrap();
        assert_eq!(user.department, Department::Seecs);
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.access, vec!["Seecs Lab 1", "Seecs Class 1"]);
    }

    #[test]
    fn test_validate_with_catalog_rejects_values_outside_catalog() {
        let catalog = Catalog::new(vec![Department::Nls], vec![Role::Admin]);
        let errors = dto().validate_with_catalog(&catalog).unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                ("department".to_string(), INVALID_DEPARTMENT.to_string()),
                ("role".to_string(), INVALID_ROLE.to_string()),
            ]
        );
    }

    #[test]
    fn test_deserialize_accepts_portal_field_names() {
        let d: CreateUserDto = serde_json::from_str(
            r#"{
                "fullName": "Bilal Ahmed",
                "email": "bilal@example.edu",
                "cmsId": "654321",
                "dept": "Nls",
                "role": "Admin",
                "access": [],
                "password": "ignored"
            }"#,
        )
        .unwrap();
        assert_eq!(d.full_name, "Bilal Ahmed");
        assert_eq!(d.cms_id, "654321");
        assert_eq!(d.department, "Nls");
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_update_dto_validation() {
        let update = UpdateUserAccessDto {
            role: "Teacher".to_string(),
            access: vec!["A".to_string(), "A".to_string()],
        };
        let (role, access) = update.validate_with_catalog(&Catalog::default()).unwrap();
        assert_eq!(role, Role::Teacher);
        assert_eq!(access, vec!["A"]);

        let update = UpdateUserAccessDto {
            role: "Dean".to_string(),
            access: vec![],
        };
        assert!(update.validate_with_catalog(&Catalog::default()).is_err());
    }

    #[test]
    fn test_filter_params_from_query_values() {
        let filters: UserFilterParams = serde_json::from_value(serde_json::json!({
            "full_name": " ali ",
            "department": "Seecs",
            "role": "Lab Instructors",
            "email": "",
            "limit": "5"
        }))
        .unwrap();
        assert_eq!(filters.full_name.as_deref(), Some("ali"));
        assert_eq!(filters.department, Some(Department::Seecs));
        assert_eq!(filters.role, Some(Role::LabInstructors));
        assert_eq!(filters.email, None);
        assert_eq!(filters.pagination.limit(), 5);
    }

    #[test]
    fn test_user_serializes_enums_as_display_strings() {
        let user = User {
            id: Uuid::nil(),
            full_name: "Sana".to_string(),
            email: "sana@example.edu".to_string(),
            cms_id: "777777".to_string(),
            department: Department::S3h,
            role: Role::LabInstructors,
            access: vec![],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["department"], "S3h");
        assert_eq!(json["role"], "Lab Instructors");
    }
}
