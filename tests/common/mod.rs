use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use campusgate::campusgate_access::Catalog;
use campusgate::campusgate_config::{CorsConfig, DatabaseConfig};
use campusgate::campusgate_db::init_lazy_pool;
use campusgate::router::init_router;
use campusgate::state::AppState;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub cms_id: String,
    pub email: String,
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(pool, Catalog::default(), CorsConfig::default());
    init_router(state)
}

/// An app whose pool never connects. Only for routes that do not touch
/// the database.
#[allow(dead_code)]
pub fn setup_app_without_db() -> Router {
    let pool = init_lazy_pool(&DatabaseConfig::new("postgres://localhost/unused")).unwrap();
    setup_test_app(pool)
}

#[allow(dead_code)]
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    cms_id: &str,
    email: &str,
    department: &str,
    role: &str,
    access: &[&str],
) -> TestUser {
    let access: Vec<String> = access.iter().map(|a| a.to_string()).collect();

    let (id, cms_id, email): (Uuid, String, String) = sqlx::query_as(
        r#"
        INSERT INTO users (full_name, email, cms_id, department, role, access)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, cms_id, email
        "#,
    )
    .bind("Test User")
    .bind(email)
    .bind(cms_id)
    .bind(department)
    .bind(role)
    .bind(&access)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser { id, cms_id, email }
}

/// Inserts a Seecs student with an explicit creation time.
#[allow(dead_code)]
pub async fn create_test_user_at(
    tx: &mut Transaction<'_, Postgres>,
    full_name: &str,
    cms_id: &str,
    email: &str,
    created_at: DateTime<Utc>,
) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (full_name, email, cms_id, department, role, access, created_at, updated_at)
        VALUES ($1, $2, $3, 'Seecs', 'Student', '{}', $4, $4)
        RETURNING id
        "#,
    )
    .bind(full_name)
    .bind(email)
    .bind(cms_id)
    .bind(created_at)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_access_log(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &str,
    room_name: &str,
    access_status: &str,
    accessed_at: DateTime<Utc>,
) {
    sqlx::query(
        r#"
        INSERT INTO access_logs (user_id, room_name, access_status, accessed_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user_id)
    .bind(room_name)
    .bind(access_status)
    .bind(accessed_at)
    .execute(&mut **tx)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Shared buffer that collects formatted log output.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes every event and span on this thread into a buffer until the
/// guard drops.
#[allow(dead_code)]
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::NEW)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
