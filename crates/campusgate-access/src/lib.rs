//! # Campusgate Access
//!
//! The access-privilege rules for Campusgate, free of any I/O.
//!
//! - [`catalog`]: departments, roles and the injectable [`Catalog`]
//! - [`options`]: generation and parsing of access-option identifiers
//! - [`privileges`]: the (department, role) candidate-pool filter
//! - [`selection`]: reconciling a chosen access list with a new pool
//!
//! # Example
//!
//! ```
//! use campusgate_access::{AccessOptions, Catalog, Department, Role, filter_options};
//!
//! let catalog = Catalog::default();
//! let options = AccessOptions::generate(&catalog);
//!
//! let pool = filter_options(Department::Seecs, Role::Student, &options, &catalog);
//! assert_eq!(pool.len(), 216);
//! ```

pub mod catalog;
pub mod options;
pub mod privileges;
pub mod selection;

pub use catalog::{Catalog, CatalogError, Department, Role};
pub use options::{AccessCategory, AccessOption, AccessOptions};
pub use privileges::filter_options;
pub use selection::{SelectionPolicy, dedup_access, partition_by_pool, reconcile_selection};
