//! Session-gated task tracker: server-rendered signup/login/dashboard pages
//! over provider-backed identity, session, and task storage.

pub mod config;
pub mod error;
pub mod handler;
pub mod identity;
pub mod middleware;
pub mod model;
pub mod route;
pub mod schema;
pub mod session;
pub mod store;
pub mod view;

use std::sync::Arc;

use identity::IdentityGateway;
use session::SessionStore;
use store::TaskStore;
use view::Views;

/// Everything a request handler needs, threaded through axum state: the
/// provider capabilities behind their traits plus the template environment.
pub struct AppState {
    pub identity: Arc<dyn IdentityGateway>,
    pub tasks: Arc<dyn TaskStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub views: Views,
}
