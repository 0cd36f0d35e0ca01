use std::sync::Arc;

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{session, AppState};

/// Access gate for the task-management routes. A request passes iff its
/// session cookie resolves to a live session; the gate then inserts the
/// session's user into request extensions and hands over to the handler.
/// Everything else is redirected to the login page. Failing the gate is a
/// navigational side effect, not an error.
pub async fn mw_require_auth<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let token = match session::session_token(request.headers()) {
        Some(token) => token,
        None => return Redirect::to("/login").into_response(),
    };

    match state.sessions.read(&token).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}
