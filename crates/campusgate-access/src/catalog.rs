//! The department and role catalog.
//!
//! Departments and roles are closed sets. Their display strings are the
//! authoritative spellings used in stored records and in every generated
//! access-option identifier, so parsing is case-sensitive.
//!
//! The [`Catalog`] value bundles the ordered departments and roles together
//! with the per-department resource counts. It is built once at startup and
//! handed to the generator and validator by value or reference; nothing reads
//! it from global state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Error returned when a department or role string is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown department: {0}")]
    UnknownDepartment(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// One of the fourteen campus departments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum Department {
    Seecs,
    Sada,
    Iaec,
    S3h,
    Smme,
    Rimms,
    Ns,
    Sns,
    Nshs,
    Igis,
    Nice,
    Scme,
    Asap,
    Nls,
}

impl Department {
    /// All departments in catalog order.
    pub const ALL: [Department; 14] = [
        Department::Seecs,
        Department::Sada,
        Department::Iaec,
        Department::S3h,
        Department::Smme,
        Department::Rimms,
        Department::Ns,
        Department::Sns,
        Department::Nshs,
        Department::Igis,
        Department::Nice,
        Department::Scme,
        Department::Asap,
        Department::Nls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Seecs => "Seecs",
            Department::Sada => "Sada",
            Department::Iaec => "Iaec",
            Department::S3h => "S3h",
            Department::Smme => "Smme",
            Department::Rimms => "Rimms",
            Department::Ns => "Ns",
            Department::Sns => "Sns",
            Department::Nshs => "Nshs",
            Department::Igis => "Igis",
            Department::Nice => "Nice",
            Department::Scme => "Scme",
            Department::Asap => "Asap",
            Department::Nls => "Nls",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .iter()
            .copied()
            .find(|department| department.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownDepartment(s.to_string()))
    }
}

impl TryFrom<String> for Department {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One of the five user classifications.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum Role {
    Teacher,
    Student,
    Admin,
    #[serde(rename = "Lab Instructors")]
    LabInstructors,
    Intern,
}

impl Role {
    /// All roles in catalog order.
    pub const ALL: [Role; 5] = [
        Role::Teacher,
        Role::Student,
        Role::Admin,
        Role::LabInstructors,
        Role::Intern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Admin => "Admin",
            Role::LabInstructors => "Lab Instructors",
            Role::Intern => "Intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable description of the campus: which departments and roles exist
/// and how many resources each department generates.
///
/// [`Catalog::default`] is the standard campus. Narrower catalogs can be
/// built with [`Catalog::new`] and the `with_*` methods, which is mostly
/// useful in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Catalog {
    departments: Vec<Department>,
    roles: Vec<Role>,
    classes_per_department: u32,
    labs_per_department: u32,
    personal_rooms_per_department: u32,
    personal_room_roles: Vec<Role>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            departments: Department::ALL.to_vec(),
            roles: Role::ALL.to_vec(),
            classes_per_department: 15,
            labs_per_department: 5,
            personal_rooms_per_department: 10,
            personal_room_roles: vec![Role::Teacher, Role::Admin],
        }
    }
}

impl Catalog {
    /// Builds a catalog over the given departments and roles with the
    /// standard resource counts and personal-room roles.
    pub fn new(departments: Vec<Department>, roles: Vec<Role>) -> Self {
        Self {
            departments,
            roles,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_counts(mut self, classes: u32, labs: u32, personal_rooms: u32) -> Self {
        self.classes_per_department = classes;
        self.labs_per_department = labs;
        self.personal_rooms_per_department = personal_rooms;
        self
    }

    #[must_use]
    pub fn with_personal_room_roles(mut self, roles: Vec<Role>) -> Self {
        self.personal_room_roles = roles;
        self
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn classes_per_department(&self) -> u32 {
        self.classes_per_department
    }

    pub fn labs_per_department(&self) -> u32 {
        self.labs_per_department
    }

    pub fn personal_rooms_per_department(&self) -> u32 {
        self.personal_rooms_per_department
    }

    pub fn has_department(&self, department: Department) -> bool {
        self.departments.contains(&department)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether holders of `role` may be offered personal rooms.
    pub fn grants_personal_rooms(&self, role: Role) -> bool {
        self.personal_room_roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_order_and_count() {
        let names: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Seecs", "Sada", "Iaec", "S3h", "Smme", "Rimms", "Ns", "Sns", "Nshs", "Igis",
                "Nice", "Scme", "Asap", "Nls"
            ]
        );
    }

    #[test]
    fn test_department_parse_is_case_sensitive() {
        assert_eq!("S3h".parse::<Department>(), Ok(Department::S3h));
        assert_eq!(
            "seecs".parse::<Department>(),
            Err(CatalogError::UnknownDepartment("seecs".to_string()))
        );
        assert!("".parse::<Department>().is_err());
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("Lab Instructors".parse::<Role>(), Ok(Role::LabInstructors));
        assert_eq!(Role::LabInstructors.to_string(), "Lab Instructors");
        assert!("LabInstructors".parse::<Role>().is_err());
        assert!("teacher".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_uses_display_spelling() {
        let json = serde_json::to_string(&Role::LabInstructors).unwrap();
        assert_eq!(json, "\"Lab Instructors\"");

        let role: Role = serde_json::from_str("\"Intern\"").unwrap();
        assert_eq!(role, Role::Intern);
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(Department::try_from("Nls".to_string()), Ok(Department::Nls));
        assert!(Role::try_from("Janitor".to_string()).is_err());
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.departments().len(), 14);
        assert_eq!(catalog.roles().len(), 5);
        assert_eq!(catalog.classes_per_department(), 15);
        assert_eq!(catalog.labs_per_department(), 5);
        assert_eq!(catalog.personal_rooms_per_department(), 10);
    }

    #[test]
    fn test_personal_room_roles() {
        let catalog = Catalog::default();
        assert!(catalog.grants_personal_rooms(Role::Teacher));
        assert!(catalog.grants_personal_rooms(Role::Admin));
        assert!(!catalog.grants_personal_rooms(Role::Student));
        assert!(!catalog.grants_personal_rooms(Role::LabInstructors));
        assert!(!catalog.grants_personal_rooms(Role::Intern));
    }

    #[test]
    fn test_narrow_catalog() {
        let catalog = Catalog::new(vec![Department::Nice], vec![Role::Intern])
            .with_counts(2, 1, 3)
            .with_personal_room_roles(vec![Role::Intern]);

        assert!(catalog.has_department(Department::Nice));
        assert!(!catalog.has_department(Department::Seecs));
        assert!(catalog.has_role(Role::Intern));
        assert!(!catalog.has_role(Role::Admin));
        assert!(catalog.grants_personal_rooms(Role::Intern));
        assert_eq!(catalog.classes_per_department(), 2);
    }
}
