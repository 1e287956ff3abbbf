//! # Campusgate Core
//!
//! Foundational types shared by every Campusgate crate:
//!
//! - [`errors`]: [`AppError`] and its JSON rendering
//! - [`pagination`]: query parameters and response metadata for lists
//! - [`serde`]: lenient deserializers for query-string filters
//!
//! # Example
//!
//! ```ignore
//! use campusgate_core::{AppError, PaginationMeta};
//!
//! let err = AppError::conflict(anyhow::anyhow!("duplicate user"));
//! let meta = PaginationMeta::new(total, &filters.pagination);
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

pub use errors::{AppError, ErrorResponse, FieldError};
pub use pagination::{PaginationMeta, PaginationParams};
