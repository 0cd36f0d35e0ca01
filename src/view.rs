use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::value::Value;
use minijinja::Environment;

/// Server-rendered page templates, embedded at compile time.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        // The .html names keep minijinja's default auto-escaping in force.
        env.add_template("signup.html", include_str!("../templates/signup.html"))?;
        env.add_template("login.html", include_str!("../templates/login.html"))?;
        env.add_template("dashboard.html", include_str!("../templates/dashboard.html"))?;
        Ok(Self { env })
    }

    /// Renders a named template. A rendering failure surfaces as a plain
    /// 500 with the engine's message.
    pub fn render(&self, name: &str, ctx: Value) -> Response {
        match self
            .env
            .get_template(name)
            .and_then(|template| template.render(&ctx))
        {
            Ok(body) => Html(body).into_response(),
            Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
        }
    }
}
