use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration, gathered once at startup from the environment.
/// A `.env` file is honored when present.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to. `BIND_ADDR`, default `127.0.0.1:3000`.
    pub bind_addr: SocketAddr,
    /// Sqlite connection string. `DATABASE_URL`, default `sqlite://tasks.db`.
    pub database_url: String,
    /// Directory served under `/static`. `PUBLIC_DIR`, default `public`.
    pub public_dir: PathBuf,
    /// Key used to sign session tokens. `SESSION_SECRET`, required.
    pub session_secret: String,
    /// Cognito user pool id. `USER_POOL_ID`, required.
    pub user_pool_id: String,
    /// Cognito app client id. `CLIENT_ID`, required.
    pub client_id: String,
    /// Cognito app client secret. `CLIENT_SECRET`, required.
    pub client_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        Ok(Self {
            bind_addr,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://tasks.db".to_string()),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            session_secret: require("SESSION_SECRET")?,
            user_pool_id: require("USER_POOL_ID")?,
            client_id: require("CLIENT_ID")?,
            client_secret: require("CLIENT_SECRET")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} must be set"))
}
