use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskboard::{
    config::Config, identity::CognitoIdentityGateway, route::create_router,
    session::MemorySessionStore, store::SqliteTaskStore, view::Views, AppState,
};

// Entry point of the application
#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskboard=info")),
        )
        .init();

    let config = Config::from_env()?;

    let tasks = SqliteTaskStore::connect(&config.database_url)
        .await
        .context("failed to open the task database")?;
    let identity = CognitoIdentityGateway::from_env(&config).await;
    let sessions = MemorySessionStore::new(&config.session_secret);

    let app_state = Arc::new(AppState {
        identity: Arc::new(identity),
        tasks: Arc::new(tasks),
        sessions: Arc::new(sessions),
        views: Views::new().context("failed to load page templates")?,
    });

    let app = create_router(app_state, &config.public_dir);

    info!(addr = %config.bind_addr, "listening");
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
