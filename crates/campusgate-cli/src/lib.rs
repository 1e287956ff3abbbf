//! # Campusgate CLI
//!
//! Database seeding utilities for Campusgate testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use campusgate_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(200).with_logs_per_user(20);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
