//! Access-option generation.
//!
//! Every department contributes four kinds of addressable resource:
//!
//! ```text
//! "{D} Class {1..=15}"          shared with every user
//! "{D} Lab {1..=5}"             department-scoped
//! "{D} Staff Room"              department-scoped, exactly one
//! "{D} Personal Room {1..=10}"  department-scoped, role-gated
//! ```
//!
//! Downstream consumers match on these strings by substring, so the formats
//! must not drift.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

use crate::catalog::{Catalog, Department};

/// The four kinds of access option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessCategory {
    Class,
    Lab,
    StaffRoom,
    PersonalRoom,
}

impl AccessCategory {
    fn label(&self) -> &'static str {
        match self {
            AccessCategory::Class => "Class",
            AccessCategory::Lab => "Lab",
            AccessCategory::StaffRoom => "Staff Room",
            AccessCategory::PersonalRoom => "Personal Room",
        }
    }
}

/// A single structured access option.
///
/// `number` is `None` only for staff rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessOption {
    pub department: Department,
    pub category: AccessCategory,
    pub number: Option<u32>,
}

impl AccessOption {
    pub fn class(department: Department, number: u32) -> Self {
        Self::numbered(department, AccessCategory::Class, number)
    }

    pub fn lab(department: Department, number: u32) -> Self {
        Self::numbered(department, AccessCategory::Lab, number)
    }

    pub fn staff_room(department: Department) -> Self {
        Self {
            department,
            category: AccessCategory::StaffRoom,
            number: None,
        }
    }

    pub fn personal_room(department: Department, number: u32) -> Self {
        Self::numbered(department, AccessCategory::PersonalRoom, number)
    }

    fn numbered(department: Department, category: AccessCategory, number: u32) -> Self {
        Self {
            department,
            category,
            number: Some(number),
        }
    }

    /// Parses an identifier produced by [`AccessOption`]'s `Display`.
    ///
    /// Returns `None` for anything that does not match one of the four
    /// formats exactly. Numbers must be positive and written without
    /// leading zeros. Whether the number is within the catalog's counts is
    /// not checked here; see [`AccessOptions::contains`].
    pub fn parse(identifier: &str) -> Option<Self> {
        let (department, rest) = identifier.split_once(' ')?;
        let department = department.parse::<Department>().ok()?;

        if rest == AccessCategory::StaffRoom.label() {
            return Some(Self::staff_room(department));
        }

        let numbered = [
            AccessCategory::Class,
            AccessCategory::Lab,
            AccessCategory::PersonalRoom,
        ];
        numbered.into_iter().find_map(|category| {
            let digits = rest.strip_prefix(category.label())?.strip_prefix(' ')?;
            let number = parse_positive(digits)?;
            Some(Self::numbered(department, category, number))
        })
    }
}

fn parse_positive(digits: &str) -> Option<u32> {
    if digits.starts_with('0') || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

impl fmt::Display for AccessOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "{} {} {}", self.department, self.category.label(), number),
            None => write!(f, "{} {}", self.department, self.category.label()),
        }
    }
}

/// Every access option the catalog can produce, grouped by category.
///
/// Classes are flattened into one list because they are offered to every
/// user. The other categories are keyed by department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccessOptions {
    pub all_classes: Vec<String>,
    #[schema(value_type = Object)]
    pub labs: BTreeMap<Department, Vec<String>>,
    #[schema(value_type = Object)]
    pub staff_rooms: BTreeMap<Department, Vec<String>>,
    #[schema(value_type = Object)]
    pub personal_rooms: BTreeMap<Department, Vec<String>>,
}

impl AccessOptions {
    /// Expands the catalog into concrete identifiers.
    ///
    /// Deterministic and side-effect free; calling it twice with the same
    /// catalog yields equal values.
    pub fn generate(catalog: &Catalog) -> Self {
        let departments = catalog.departments();
        let mut all_classes =
            Vec::with_capacity(departments.len() * catalog.classes_per_department() as usize);
        let mut labs = BTreeMap::new();
        let mut staff_rooms = BTreeMap::new();
        let mut personal_rooms = BTreeMap::new();

        for &department in departments {
            all_classes.extend(
                (1..=catalog.classes_per_department())
                    .map(|i| AccessOption::class(department, i).to_string()),
            );

            labs.insert(
                department,
                (1..=catalog.labs_per_department())
                    .map(|i| AccessOption::lab(department, i).to_string())
                    .collect(),
            );

            staff_rooms.insert(
                department,
                vec![AccessOption::staff_room(department).to_string()],
            );

            personal_rooms.insert(
                department,
                (1..=catalog.personal_rooms_per_department())
                    .map(|i| AccessOption::personal_room(department, i).to_string())
                    .collect(),
            );
        }

        Self {
            all_classes,
            labs,
            staff_rooms,
            personal_rooms,
        }
    }

    pub fn labs_for(&self, department: Department) -> &[String] {
        self.labs.get(&department).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn staff_rooms_for(&self, department: Department) -> &[String] {
        self.staff_rooms
            .get(&department)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn personal_rooms_for(&self, department: Department) -> &[String] {
        self.personal_rooms
            .get(&department)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `identifier` is one of the generated options.
    pub fn contains(&self, identifier: &str) -> bool {
        let Some(option) = AccessOption::parse(identifier) else {
            return false;
        };
        let haystack: &[String] = match option.category {
            AccessCategory::Class => &self.all_classes,
            AccessCategory::Lab => self.labs_for(option.department),
            AccessCategory::StaffRoom => self.staff_rooms_for(option.department),
            AccessCategory::PersonalRoom => self.personal_rooms_for(option.department),
        };
        haystack.iter().any(|candidate| candidate == identifier)
    }

    /// Total number of generated identifiers across all categories.
    pub fn len(&self) -> usize {
        let keyed = |map: &BTreeMap<Department, Vec<String>>| {
            map.values().map(Vec::len).sum::<usize>()
        };
        self.all_classes.len()
            + keyed(&self.labs)
            + keyed(&self.staff_rooms)
            + keyed(&self.personal_rooms)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_counts_per_department() {
        let options = AccessOptions::generate(&Catalog::default());

        for department in Department::ALL {
            let classes = options
                .all_classes
                .iter()
                .filter(|c| c.starts_with(&format!("{} Class ", department)))
                .count();
            assert_eq!(classes, 15, "classes for {}", department);
            assert_eq!(options.labs_for(department).len(), 5);
            assert_eq!(options.staff_rooms_for(department).len(), 1);
            assert_eq!(options.personal_rooms_for(department).len(), 10);
        }
    }

    #[test]
    fn test_all_classes_are_unique() {
        let options = AccessOptions::generate(&Catalog::default());
        assert_eq!(options.all_classes.len(), 210);

        let unique: HashSet<&String> = options.all_classes.iter().collect();
        assert_eq!(unique.len(), 210);
    }

    #[test]
    fn test_identifier_formats() {
        let options = AccessOptions::generate(&Catalog::default());

        assert_eq!(options.all_classes[0], "Seecs Class 1");
        assert_eq!(options.all_classes[14], "Seecs Class 15");
        assert_eq!(options.all_classes[15], "Sada Class 1");
        assert_eq!(options.all_classes[209], "Nls Class 15");
        assert_eq!(options.labs_for(Department::S3h)[4], "S3h Lab 5");
        assert_eq!(options.staff_rooms_for(Department::Igis), ["Igis Staff Room"]);
        assert_eq!(
            options.personal_rooms_for(Department::Nls)[9],
            "Nls Personal Room 10"
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let catalog = Catalog::default();
        assert_eq!(AccessOptions::generate(&catalog), AccessOptions::generate(&catalog));
    }

    #[test]
    fn test_total_len() {
        let options = AccessOptions::generate(&Catalog::default());
        assert_eq!(options.len(), 14 * (15 + 5 + 1 + 10));
        assert!(!options.is_empty());
    }

    #[test]
    fn test_narrow_catalog_generation() {
        let catalog = Catalog::new(vec![Department::Nice, Department::Asap], Vec::new())
            .with_counts(2, 1, 0);
        let options = AccessOptions::generate(&catalog);

        assert_eq!(
            options.all_classes,
            vec!["Nice Class 1", "Nice Class 2", "Asap Class 1", "Asap Class 2"]
        );
        assert_eq!(options.labs_for(Department::Asap), ["Asap Lab 1"]);
        assert!(options.personal_rooms_for(Department::Nice).is_empty());
        assert!(options.labs_for(Department::Seecs).is_empty());
    }

    #[test]
    fn test_parse_round_trips_every_generated_identifier() {
        let options = AccessOptions::generate(&Catalog::default());
        let everything = options
            .all_classes
            .iter()
            .chain(options.labs.values().flatten())
            .chain(options.staff_rooms.values().flatten())
            .chain(options.personal_rooms.values().flatten());

        for identifier in everything {
            let parsed = AccessOption::parse(identifier)
                .unwrap_or_else(|| panic!("failed to parse {}", identifier));
            assert_eq!(&parsed.to_string(), identifier);
        }
    }

    #[test]
    fn test_parse_categories() {
        assert_eq!(
            AccessOption::parse("Rimms Personal Room 3"),
            Some(AccessOption::personal_room(Department::Rimms, 3))
        );
        assert_eq!(
            AccessOption::parse("Ns Staff Room"),
            Some(AccessOption::staff_room(Department::Ns))
        );
        assert_eq!(
            AccessOption::parse("Sns Lab 2").map(|o| o.category),
            Some(AccessCategory::Lab)
        );
    }

    #[test]
    fn test_parse_rejects_foreign_strings() {
        assert_eq!(AccessOption::parse("Main Gate"), None);
        assert_eq!(AccessOption::parse("seecs Class 1"), None);
        assert_eq!(AccessOption::parse("Seecs Class 0"), None);
        assert_eq!(AccessOption::parse("Seecs Class 01"), None);
        assert_eq!(AccessOption::parse("Seecs Class"), None);
        assert_eq!(AccessOption::parse("Seecs Room 1"), None);
        assert_eq!(AccessOption::parse("Seecs Staff Room 1"), None);
        assert_eq!(AccessOption::parse(""), None);
    }

    #[test]
    fn test_contains_respects_counts() {
        let options = AccessOptions::generate(&Catalog::default());
        assert!(options.contains("Seecs Class 15"));
        assert!(!options.contains("Seecs Class 16"));
        assert!(options.contains("Nls Personal Room 10"));
        assert!(!options.contains("Nls Personal Room 11"));
        assert!(!options.contains("Seecs Room 1"));
    }

    #[test]
    fn test_serialized_shape() {
        let catalog = Catalog::new(vec![Department::Nls], Vec::new()).with_counts(1, 1, 1);
        let value = serde_json::to_value(AccessOptions::generate(&catalog)).unwrap();

        assert_eq!(value["all_classes"][0], "Nls Class 1");
        assert_eq!(value["labs"]["Nls"][0], "Nls Lab 1");
        assert_eq!(value["staff_rooms"]["Nls"][0], "Nls Staff Room");
        assert_eq!(value["personal_rooms"]["Nls"][0], "Nls Personal Room 1");
    }
}
