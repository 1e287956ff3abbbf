use std::sync::Arc;

use campusgate_access::{AccessOptions, Catalog};
use campusgate_config::{CorsConfig, DatabaseConfig};
use campusgate_db::{PgPool, init_db_pool};

/// Shared, read-only application state cloned into every handler.
///
/// The catalog and the generated access options are computed once and
/// shared behind `Arc`s.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub catalog: Arc<Catalog>,
    pub access_options: Arc<AccessOptions>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, catalog: Catalog, cors_config: CorsConfig) -> Self {
        let access_options = AccessOptions::generate(&catalog);
        tracing::debug!(
            options = access_options.len(),
            "Generated access options"
        );

        Self {
            db,
            catalog: Arc::new(catalog),
            access_options: Arc::new(access_options),
            cors_config,
        }
    }
}

pub async fn init_app_state(db_config: &DatabaseConfig) -> anyhow::Result<AppState> {
    let db = init_db_pool(db_config).await?;
    Ok(AppState::new(db, Catalog::default(), CorsConfig::from_env()))
}
