use std::path::Path;
use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::{handler::*, middleware::mw_require_auth, AppState};

pub fn create_router(app_state: Arc<AppState>, public_dir: &Path) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/add-task", post(add_task))
        .route("/delete/:id", post(delete_task))
        .route_layer(from_fn_with_state(app_state.clone(), mw_require_auth))
        .route("/", get(index))
        .route("/signup", get(show_signup).post(signup))
        .route("/login", get(show_login).post(login))
        .route("/logout", get(logout))
        .nest_service("/static", ServeDir::new(public_dir))
        .with_state(app_state)
}
