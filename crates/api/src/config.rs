use udyam_core::validation::ValidatorConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Environment label reported by `/health` (default: `development`).
    pub environment: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes (default: 10 MiB).
    pub body_limit_bytes: usize,
    /// PostgreSQL URL. When absent the in-memory store is used.
    pub database_url: Option<String>,
    /// Connection pool size (default: `20`).
    pub db_max_connections: u32,
    /// Length of the per-client rate limit window in milliseconds (default: 15 minutes).
    pub rate_limit_window_ms: u64,
    /// Requests allowed per client in one window (default: `100`).
    pub rate_limit_max_requests: u64,
    /// Override of the disposable email domain blocklist.
    pub disposable_email_domains: Option<Vec<String>>,
    /// Override of the accepted business types.
    pub business_types: Option<Vec<String>>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3001`                  |
    /// | `APP_ENV`                  | `development`           |
    /// | `CORS_ORIGINS`             | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `BODY_LIMIT_BYTES`         | `10485760`              |
    /// | `DATABASE_URL`             | unset                   |
    /// | `DB_MAX_CONNECTIONS`       | `20`                    |
    /// | `RATE_LIMIT_WINDOW_MS`     | `900000`                |
    /// | `RATE_LIMIT_MAX_REQUESTS`  | `100`                   |
    /// | `DISPOSABLE_EMAIL_DOMAINS` | built-in list           |
    /// | `BUSINESS_TYPES`           | built-in list           |
    ///
    /// Panics on unparseable numbers so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let cors_origins = parse_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let body_limit_bytes: usize = std::env::var("BODY_LIMIT_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("BODY_LIMIT_BYTES must be a valid usize");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let rate_limit_window_ms: u64 = std::env::var("RATE_LIMIT_WINDOW_MS")
            .unwrap_or_else(|_| "900000".into())
            .parse()
            .expect("RATE_LIMIT_WINDOW_MS must be a valid u64");

        let rate_limit_max_requests: u64 = std::env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("RATE_LIMIT_MAX_REQUESTS must be a valid u64");

        let disposable_email_domains = std::env::var("DISPOSABLE_EMAIL_DOMAINS")
            .ok()
            .map(|v| parse_list(&v))
            .filter(|list| !list.is_empty());

        let business_types = std::env::var("BUSINESS_TYPES")
            .ok()
            .map(|v| parse_list(&v))
            .filter(|list| !list.is_empty());

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            body_limit_bytes,
            database_url,
            db_max_connections,
            rate_limit_window_ms,
            rate_limit_max_requests,
            disposable_email_domains,
            business_types,
        }
    }

    /// Validator lists, falling back to the built-in defaults.
    pub fn validator_config(&self) -> ValidatorConfig {
        let defaults = ValidatorConfig::default();
        ValidatorConfig {
            disposable_email_domains: self
                .disposable_email_domains
                .clone()
                .unwrap_or(defaults.disposable_email_domains),
            business_types: self
                .business_types
                .clone()
                .unwrap_or(defaults.business_types),
        }
    }
}

/// Split a comma-separated value, trimming entries and dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
