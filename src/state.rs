use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::warn;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let connect_opts = PgConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .options([(
                "statement_timeout",
                config.statement_timeout_ms.to_string(),
            )]);

        let pool_opts = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5));

        let db = match pool_opts.connect_with(connect_opts.clone()).await {
            Ok(pool) => pool,
            Err(e) if !config.require_db => {
                warn!(error = %e, "database unreachable at startup; continuing with lazy pool");
                PgPoolOptions::new()
                    .max_connections(10)
                    .acquire_timeout(Duration::from_secs(5))
                    .connect_lazy_with(connect_opts)
            }
            Err(e) => return Err(e).context("connect to database"),
        };

        Ok(Self { db, config })
    }
}
