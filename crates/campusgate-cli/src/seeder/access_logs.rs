//! Access log seeding functionality.
//!
//! Each seeded event is either a visit to one of the user's own rooms,
//! which is allowed, or a stray attempt on any generated room, which is
//! allowed only if the user happens to hold it.

use campusgate_access::AccessOptions;
use campusgate_models::access_logs::AccessStatus;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{AccessLogSeed, SEED_EMAIL_DOMAIN};

/// Share of events that target a room the user already holds.
const OWN_ROOM_RATIO: f64 = 0.8;

fn all_rooms(options: &AccessOptions) -> Vec<&String> {
    options
        .all_classes
        .iter()
        .chain(options.labs.values().flatten())
        .chain(options.staff_rooms.values().flatten())
        .chain(options.personal_rooms.values().flatten())
        .collect()
}

/// Generates `logs_per_user` events for every `(cms_id, access)` pair, with
/// timestamps spread over the `days_back` days before `now`.
pub fn generate_access_logs(
    users: &[(String, Vec<String>)],
    options: &AccessOptions,
    logs_per_user: usize,
    days_back: i64,
    now: DateTime<Utc>,
) -> Vec<AccessLogSeed> {
    let rooms = all_rooms(options);
    let window_secs = days_back.max(1) * 24 * 60 * 60;

    users
        .par_iter()
        .flat_map(|(cms_id, access)| {
            let mut rng = rand::thread_rng();
            let mut logs = Vec::with_capacity(logs_per_user);

            for _ in 0..logs_per_user {
                let own = if rng.gen_bool(OWN_ROOM_RATIO) {
                    access.choose(&mut rng)
                } else {
                    None
                };
                let Some(room) = own.or_else(|| rooms.choose(&mut rng).copied()) else {
                    continue;
                };

                let access_status = if access.contains(room) {
                    AccessStatus::Allowed
                } else {
                    AccessStatus::Denied
                };

                logs.push(AccessLogSeed {
                    user_id: cms_id.clone(),
                    room_name: room.clone(),
                    access_status,
                    accessed_at: now - Duration::seconds(rng.gen_range(0..window_secs)),
                });
            }

            logs
        })
        .collect()
}

/// Inserts access logs in batches within a single transaction.
pub async fn insert_access_logs_batch(
    db: &PgPool,
    logs: &[AccessLogSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🚪 Inserting {} access logs...", logs.len());

    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 2000;
    let mut inserted = 0;

    for chunk in logs.chunks(BATCH_SIZE) {
        inserted += insert_access_logs_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} access logs in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_access_logs_chunk(
    tx: &mut Transaction<'_, Postgres>,
    logs: &[AccessLogSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if logs.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO access_logs (user_id, room_name, access_status, accessed_at) VALUES ",
    );

    for (i, _) in logs.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }

    let mut q = sqlx::query(&query);
    for log in logs {
        q = q
            .bind(&log.user_id)
            .bind(&log.room_name)
            .bind(log.access_status.as_str())
            .bind(log.accessed_at);
    }

    let result = q.execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

/// Deletes the access logs of seeded users. Must run before the users
/// themselves are cleared.
pub async fn clear_access_logs(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded access logs...");

    let result = sqlx::query(
        "DELETE FROM access_logs WHERE user_id IN (SELECT cms_id FROM users WHERE email LIKE $1)",
    )
    .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Deleted {} access logs in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
