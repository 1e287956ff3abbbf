use crate::modules::users::controller::{
    access_audit, create_user, delete_user, get_user, get_user_by_cms_id, list_users,
    update_user_access, validate_user_form,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/validate", post(validate_user_form))
        .route("/cms/{cms_id}", get(get_user_by_cms_id).put(update_user_access))
        .route("/{id}", get(get_user).delete(delete_user))
        .route("/{id}/access-audit", get(access_audit))
}
