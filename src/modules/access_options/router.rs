use crate::modules::access_options::controller::{
    get_access_options, get_candidates, get_catalog, reselect,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_catalog_router() -> Router<AppState> {
    Router::new().route("/", get(get_catalog))
}

pub fn init_access_options_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_access_options))
        .route("/candidates", get(get_candidates))
        .route("/reselect", post(reselect))
}
