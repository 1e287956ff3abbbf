//! User seeding functionality.
//!
//! Generates users with a random department and role, and an access list
//! drawn from the candidate pool the privilege filter allows for them.

use campusgate_access::{AccessOptions, Catalog, filter_options};
use fake::Fake;
use fake::faker::name::en::*;
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

/// Seeded CMS IDs count up from here so they always have six digits.
const CMS_ID_BASE: usize = 100_000;

fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

/// Generates `count` users over the catalog's departments and roles.
///
/// Every access entry comes from the user's own candidate pool, so seeded
/// data never carries access the portal would not have offered.
pub fn generate_users(
    catalog: &Catalog,
    options: &AccessOptions,
    count: usize,
    max_access: usize,
) -> Vec<UserSeed> {
    let departments = catalog.departments();
    let roles = catalog.roles();
    if departments.is_empty() || roles.is_empty() {
        return Vec::new();
    }

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let mut rng = rand::thread_rng();
            let department = departments[rng.gen_range(0..departments.len())];
            let role = roles[rng.gen_range(0..roles.len())];

            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let pool = filter_options(department, role, options, catalog);
            let take = rng.gen_range(1..=max_access.max(1)).min(pool.len());
            let access: Vec<String> = pool.choose_multiple(&mut rng, take).cloned().collect();

            UserSeed {
                email: format!(
                    "{}.{}.{}@{}",
                    email_part(&first_name),
                    email_part(&last_name),
                    idx,
                    SEED_EMAIL_DOMAIN
                ),
                full_name: format!("{} {}", first_name, last_name),
                cms_id: (CMS_ID_BASE + idx).to_string(),
                department,
                role,
                access,
            }
        })
        .collect()
}

/// Inserts users in batches within a single transaction.
///
/// Rows whose (CMS ID, email) pair already exists are skipped. Returns the
/// number of rows actually inserted.
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👤 Inserting {} users...", users.len());

    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 1000;
    let mut inserted = 0;

    for chunk in users.chunks(BATCH_SIZE) {
        inserted += insert_users_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO users (full_name, email, cms_id, department, role, access) VALUES ",
    );

    for (i, _) in users.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 6;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5,
            param_idx + 6
        ));
    }

    query.push_str(" ON CONFLICT (cms_id, email) DO NOTHING");

    let mut q = sqlx::query(&query);
    for user in users {
        q = q
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.cms_id)
            .bind(user.department.as_str())
            .bind(user.role.as_str())
            .bind(&user.access);
    }

    let result = q.execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

/// Loads `(cms_id, access)` for every stored user, for log generation.
pub async fn fetch_user_access(
    db: &PgPool,
) -> Result<Vec<(String, Vec<String>)>, Box<dyn std::error::Error>> {
    let rows = sqlx::query_as::<_, (String, Vec<String>)>(
        "SELECT cms_id, access FROM users ORDER BY created_at",
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Deletes every user whose email is on the seed domain.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusgate_access::{Department, Role};
    use std::collections::HashSet;

    fn standard() -> (Catalog, AccessOptions) {
        let catalog = Catalog::default();
        let options = AccessOptions::generate(&catalog);
        (catalog, options)
    }

    #[test]
    fn test_generate_users_count_and_identity() {
        let (catalog, options) = standard();
        let users = generate_users(&catalog, &options, 40, 8);

        assert_eq!(users.len(), 40);
        let cms_ids: HashSet<&str> = users.iter().map(|u| u.cms_id.as_str()).collect();
        assert_eq!(cms_ids.len(), 40);
        for user in &users {
            assert_eq!(user.cms_id.len(), 6);
            assert!(user.email.ends_with("@example.com"));
            assert!(!user.full_name.trim().is_empty());
        }
    }

    #[test]
    fn test_generated_access_stays_within_pool() {
        let (catalog, options) = standard();

        for user in generate_users(&catalog, &options, 60, 12) {
            let pool = filter_options(user.department, user.role, &options, &catalog);
            assert!(!user.access.is_empty());
            assert!(user.access.len() <= 12);
            assert!(user.access.iter().all(|entry| pool.contains(entry)));

            let unique: HashSet<&String> = user.access.iter().collect();
            assert_eq!(unique.len(), user.access.len());
        }
    }

    #[test]
    fn test_generate_users_respects_narrow_catalog() {
        let catalog = Catalog::new(vec![Department::Nls], vec![Role::Student]);
        let options = AccessOptions::generate(&catalog);

        let users = generate_users(&catalog, &options, 10, 3);
        assert!(
            users
                .iter()
                .all(|u| u.department == Department::Nls && u.role == Role::Student)
        );
    }

    #[test]
    fn test_generate_users_empty_catalog() {
        let catalog = Catalog::new(Vec::new(), Vec::new());
        let options = AccessOptions::generate(&catalog);
        assert!(generate_users(&catalog, &options, 5, 3).is_empty());
    }

    #[test]
    fn test_email_part_strips_punctuation() {
        assert_eq!(email_part("O'Keefe"), "okeefe");
        assert_eq!(email_part("Anne Marie"), "annemarie");
    }
}
