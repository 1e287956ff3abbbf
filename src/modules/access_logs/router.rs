use crate::modules::access_logs::controller::{get_access_analytics, list_access_logs};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_access_logs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_access_logs))
        .route("/analytics", get(get_access_analytics))
}
