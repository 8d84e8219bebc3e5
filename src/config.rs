use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// When true, an unreachable database at startup is a fatal error.
    pub require_db: bool,
    /// Upper bound on any single statement, applied per connection.
    pub statement_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let require_db = std::env::var("DB_REQUIRED")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let statement_timeout_ms = std::env::var("DB_STATEMENT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5_000);
        Ok(Self {
            database_url,
            require_db,
            statement_timeout_ms,
        })
    }
}
