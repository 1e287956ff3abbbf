use campusgate_access::{AccessOptions, Catalog, filter_options, partition_by_pool};
use campusgate_core::{AppError, PaginationMeta};
use campusgate_models::users::{
    AccessAuditResponse, CreateUserDto, PaginatedUsersResponse, UpdateUserAccessDto, User,
    UserFilterParams,
};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{
    track_user_conflict, track_user_created, track_user_deleted, track_user_updated,
};

const USER_COLUMNS: &str =
    "id, full_name, email, cms_id, department, role, access, created_at, updated_at";

const CONFLICT_MESSAGE: &str = "A user with this CMS ID and email already exists";

/// Wraps `value` for a case-insensitive substring match, escaping LIKE
/// metacharacters so they match literally.
pub(crate) fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn user_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("User not found"))
}

fn cms_id_not_found(cms_id: &str) -> AppError {
    AppError::not_found(anyhow::anyhow!("No user found with CMS ID {}", cms_id))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn find_by_cms_id_and_email(
        db: &PgPool,
        cms_id: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE cms_id = $1 AND email = $2 LIMIT 1",
            USER_COLUMNS
        ))
        .bind(cms_id)
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// CMS IDs are not unique on their own; the earliest created match wins.
    #[instrument(skip(db))]
    pub async fn find_by_cms_id(db: &PgPool, cms_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE cms_id = $1 ORDER BY created_at ASC, id ASC LIMIT 1",
            USER_COLUMNS
        ))
        .bind(cms_id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_cms_id(db: &PgPool, cms_id: &str) -> Result<User, AppError> {
        Self::find_by_cms_id(db, cms_id)
            .await?
            .ok_or_else(|| cms_id_not_found(cms_id))
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(user_not_found)
    }

    /// Validates and stores a new user.
    ///
    /// Only an exact (CMS ID, email) pair counts as a duplicate: a new record
    /// sharing just one of the two is accepted. This mirrors how the portal
    /// has always behaved, but whether either field alone should be unique
    /// is still an open product decision.
    #[instrument(skip(db, catalog, dto), fields(cms_id = %dto.cms_id))]
    pub async fn create_user(
        db: &PgPool,
        catalog: &Catalog,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        let new_user = dto
            .validate_with_catalog(catalog)
            .map_err(|errors| AppError::validation(&errors))?;

        if Self::find_by_cms_id_and_email(db, &new_user.cms_id, &new_user.email)
            .await?
            .is_some()
        {
            track_user_conflict();
            return Err(AppError::conflict(anyhow::anyhow!(CONFLICT_MESSAGE)));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (full_name, email, cms_id, department, role, access)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(&new_user.full_name)
        .bind(&new_user.email)
        .bind(&new_user.cms_id)
        .bind(new_user.department.as_str())
        .bind(new_user.role.as_str())
        .bind(&new_user.access)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // The pre-check above can race a concurrent insert.
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                track_user_conflict();
                return AppError::conflict(anyhow::anyhow!(CONFLICT_MESSAGE));
            }
            AppError::database(e)
        })?;

        track_user_created(user.role);
        tracing::info!(user_id = %user.id, role = %user.role, "User created");

        Ok(user)
    }

    /// Replaces the role and the whole access list of the user found by
    /// [`find_by_cms_id`](Self::find_by_cms_id). Department is untouched.
    #[instrument(skip(db, catalog, dto))]
    pub async fn update_role_and_access(
        db: &PgPool,
        catalog: &Catalog,
        cms_id: &str,
        dto: UpdateUserAccessDto,
    ) -> Result<User, AppError> {
        let (role, access) = dto
            .validate_with_catalog(catalog)
            .map_err(|errors| AppError::validation(&errors))?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
               SET role = $2, access = $3, updated_at = NOW()
               WHERE id = (
                   SELECT id FROM users WHERE cms_id = $1
                   ORDER BY created_at ASC, id ASC LIMIT 1
               )
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(cms_id)
        .bind(role.as_str())
        .bind(&access)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| cms_id_not_found(cms_id))?;

        track_user_updated(user.role);

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        track_user_deleted();
        Ok(())
    }

    /// Lists users matching every given filter, newest first.
    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE TRUE");
        let mut params: Vec<String> = Vec::new();

        let substring_filters = [
            ("cms_id", &filters.cms_id),
            ("full_name", &filters.full_name),
            ("email", &filters.email),
        ];
        for (column, value) in substring_filters {
            if let Some(value) = value {
                params.push(like_pattern(value));
                where_clause.push_str(&format!(" AND {} ILIKE ${}", column, params.len()));
            }
        }

        if let Some(department) = filters.department {
            params.push(department.as_str().to_string());
            where_clause.push_str(&format!(" AND department = ${}", params.len()));
        }

        if let Some(role) = filters.role {
            params.push(role.as_str().to_string());
            where_clause.push_str(&format!(" AND role = ${}", params.len()));
        }

        let count_query = format!("SELECT COUNT(*) FROM users{}", where_clause);
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {} FROM users{} ORDER BY created_at DESC, id DESC LIMIT {} OFFSET {}",
            USER_COLUMNS, where_clause, limit, offset
        );
        let mut data_sql = sqlx::query_as::<_, User>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let users = data_sql.fetch_all(db).await?;

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    /// Reports which stored access entries the privilege filter would no
    /// longer offer for the user's department and role. Nothing is changed.
    #[instrument(skip(db, catalog, options))]
    pub async fn access_audit(
        db: &PgPool,
        catalog: &Catalog,
        options: &AccessOptions,
        id: Uuid,
    ) -> Result<AccessAuditResponse, AppError> {
        let user = Self::get_user(db, id).await?;
        let pool = filter_options(user.department, user.role, options, catalog);
        let (within_pool, outside_pool) = partition_by_pool(&user.access, &pool);

        Ok(AccessAuditResponse {
            user_id: user.id,
            cms_id: user.cms_id,
            department: user.department,
            role: user.role,
            within_pool,
            outside_pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_value() {
        assert_eq!(like_pattern("ali"), "%ali%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
