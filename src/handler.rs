use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use minijinja::context;
use tracing::warn;

use crate::{
    error::ProviderError,
    model::CurrentUser,
    schema::{LoginSchema, NewTaskSchema, SignupSchema},
    session, AppState,
};

// Handler for the root route
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

// Handler for the signup page
pub async fn show_signup(State(state): State<Arc<AppState>>) -> Response {
    state.views.render("signup.html", context! {})
}

// Handler for signup form submissions
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Form(body): Form<SignupSchema>,
) -> Result<Redirect, ProviderError> {
    state
        .identity
        .create_account(&body.email, &body.password)
        .await
        .map_err(|err| {
            warn!(email = %body.email, %err, "signup failed");
            err
        })?;

    Ok(Redirect::to("/login"))
}

// Handler for the login page
pub async fn show_login(State(state): State<Arc<AppState>>) -> Response {
    state.views.render("login.html", context! {})
}

// Handler for login form submissions. The lookup goes by email alone, and
// every failure collapses into one fixed message.
pub async fn login(State(state): State<Arc<AppState>>, Form(body): Form<LoginSchema>) -> Response {
    let account = match state.identity.find_account_by_email(&body.email).await {
        Ok(account) => account,
        Err(err) => {
            warn!(email = %body.email, %err, "login failed");
            return "Invalid credentials".into_response();
        }
    };

    let user = CurrentUser {
        id: account.id,
        email: account.email,
    };

    match state.sessions.create(user).await {
        Ok(token) => (
            [(SET_COOKIE, session::install_cookie(&token))],
            Redirect::to("/dashboard"),
        )
            .into_response(),
        Err(err) => {
            warn!(%err, "session creation failed");
            "Invalid credentials".into_response()
        }
    }
}

// Handler for the dashboard: the session owner's tasks, newest first
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ProviderError> {
    let tasks = state.tasks.tasks_for_owner(&user.id).await.map_err(|err| {
        warn!(owner = %user.id, %err, "task listing failed");
        err
    })?;

    Ok(state
        .views
        .render("dashboard.html", context! { user => user, tasks => tasks }))
}

// Handler for adding a task. The owner always comes from the session,
// never from the form.
pub async fn add_task(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Form(body): Form<NewTaskSchema>,
) -> Result<Redirect, ProviderError> {
    let record = body.into_record(&user.id);
    state.tasks.insert(record).await.map_err(|err| {
        warn!(owner = %user.id, %err, "task insert failed");
        err
    })?;

    Ok(Redirect::to("/dashboard"))
}

// Handler for deleting a task. Deletion goes by id alone; any
// authenticated user can remove any task it can name.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, ProviderError> {
    state.tasks.delete(&id).await.map_err(|err| {
        warn!(task = %id, %err, "task delete failed");
        err
    })?;

    Ok(Redirect::to("/dashboard"))
}

// Handler for logout. Destruction completes before the redirect goes out.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session::session_token(&headers) {
        state.sessions.destroy(&token).await;
    }

    (
        [(SET_COOKIE, session::clear_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}
