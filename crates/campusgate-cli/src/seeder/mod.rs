//! Database seeding module for populating test data.
//!
//! # Module Structure
//!
//! - [`users`] - User generation with pool-respecting access lists
//! - [`access_logs`] - Allowed and denied access events for stored users
//! - [`models`] - Data structures for seeding configuration
//!
//! # Usage
//!
//! ```ignore
//! use campusgate_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(100).with_logs_per_user(20).with_days_back(60);
//! seed_all(&db, config).await?;
//! ```
//!
//! Seeded users are recognizable by their `@example.com` email, which is
//! what [`clear_all`] keys on.

pub mod access_logs;
pub mod models;
pub mod users;

pub use models::SeedConfig;

use campusgate_access::{AccessOptions, Catalog};
use chrono::Utc;
use sqlx::PgPool;
use std::time::Instant;

/// Seeds users and then access logs for them.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting full database seeding...");
    println!("   - Users: {}", config.num_users);
    println!(
        "   - Access logs per user: {} over the last {} days",
        config.logs_per_user, config.days_back
    );

    let catalog = Catalog::default();
    let options = AccessOptions::generate(&catalog);

    // Step 1: Users
    let seeds = users::generate_users(
        &catalog,
        &options,
        config.num_users,
        config.max_access_per_user,
    );
    let users_created = users::insert_users_batch(db, &seeds).await?;

    // Step 2: Logs for the users just generated
    let user_access: Vec<(String, Vec<String>)> = seeds
        .into_iter()
        .map(|seed| (seed.cms_id, seed.access))
        .collect();
    let logs = access_logs::generate_access_logs(
        &user_access,
        &options,
        config.logs_per_user,
        config.days_back,
        Utc::now(),
    );
    let logs_created = access_logs::insert_access_logs_batch(db, &logs).await?;

    println!(
        "\n✅ Seeding complete! Created {} users and {} access logs in {:?}",
        users_created,
        logs_created,
        start_time.elapsed()
    );

    Ok(())
}

/// Seeds only users
pub async fn seed_users_only(
    db: &PgPool,
    count: usize,
    max_access: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let catalog = Catalog::default();
    let options = AccessOptions::generate(&catalog);
    let seeds = users::generate_users(&catalog, &options, count, max_access);
    users::insert_users_batch(db, &seeds).await
}

/// Seeds access logs for every user already in the database.
pub async fn seed_logs_only(
    db: &PgPool,
    logs_per_user: usize,
    days_back: i64,
) -> Result<u64, Box<dyn std::error::Error>> {
    let user_access = users::fetch_user_access(db).await?;
    if user_access.is_empty() {
        return Err("No users found. Run `seed-users` first.".into());
    }

    let options = AccessOptions::generate(&Catalog::default());
    let logs = access_logs::generate_access_logs(
        &user_access,
        &options,
        logs_per_user,
        days_back,
        Utc::now(),
    );
    access_logs::insert_access_logs_batch(db, &logs).await
}

/// Clears seeded access logs, then seeded users.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🧹 Clearing all seeded data...");

    let logs_deleted = access_logs::clear_access_logs(db).await?;
    let users_deleted = users::clear_users(db).await?;

    println!(
        "\n✅ Cleared {} users and {} access logs in {:?}",
        users_deleted,
        logs_deleted,
        start_time.elapsed()
    );

    Ok(())
}
