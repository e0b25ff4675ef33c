use crate::auth::{JwtConfig, JwtError};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP port |
/// | DATABASE_URL | sqlite://data/tea.db | SQLite database |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | - | daily rolling log directory (must exist) |
/// | LOG_JSON | false | JSON log lines |
/// | CORS_ORIGIN | - | allowed origin, permissive when unset |
/// | COOKIE_SECURE | true in production | `Secure` flag on the auth cookie |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | - | bootstrap admin account |
/// | LOGIN_RATE_LIMIT | 5 | login attempts per IP per minute |
/// | REGISTER_RATE_LIMIT | 3 | registrations per IP per minute |
/// | TRUST_PROXY_HEADERS | false | take the client IP from `X-Forwarded-For`; only behind a proxy that overwrites it |
/// | REQUEST_TIMEOUT_MS | 30000 | request timeout |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | graceful shutdown budget |
/// | BUSINESS_UTC_OFFSET_MINUTES | 420 | day boundary for dashboard charts (UTC+7) |
///
/// JWT settings are read by [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_url: String,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    pub cors_origin: Option<String>,
    pub cookie_secure: bool,
    pub jwt: JwtConfig,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub login_rate_limit: u32,
    pub register_rate_limit: u32,
    pub trust_proxy_headers: bool,
    pub request_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
    pub business_utc_offset_minutes: i32,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, JwtError> {
        let environment = env_string("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_production = environment == "production";

        Ok(Self {
            http_port: env_parse("HTTP_PORT").unwrap_or(3000),
            database_url: env_string("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://data/tea.db".into()),
            log_level: env_string("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_string("LOG_DIR"),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            cors_origin: env_string("CORS_ORIGIN"),
            cookie_secure: env_parse("COOKIE_SECURE").unwrap_or(is_production),
            jwt: JwtConfig::from_env()?,
            admin_email: env_string("ADMIN_EMAIL"),
            admin_password: env_string("ADMIN_PASSWORD"),
            login_rate_limit: env_parse("LOGIN_RATE_LIMIT").unwrap_or(5),
            register_rate_limit: env_parse("REGISTER_RATE_LIMIT").unwrap_or(3),
            trust_proxy_headers: env_parse("TRUST_PROXY_HEADERS").unwrap_or(false),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(30000),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS").unwrap_or(10000),
            business_utc_offset_minutes: env_parse("BUSINESS_UTC_OFFSET_MINUTES").unwrap_or(420),
            environment,
        })
    }

    /// Configuration for tests: in-memory database, fixed JWT secret, no rate limiting
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_url: "sqlite::memory:".into(),
            environment: "test".into(),
            log_level: "warn".into(),
            log_dir: None,
            log_json: false,
            cors_origin: None,
            cookie_secure: false,
            jwt: JwtConfig::with_secret("test-secret-key-that-is-at-least-32-chars"),
            admin_email: Some("admin@tea.test".into()),
            admin_password: Some("admin-password".into()),
            login_rate_limit: 1000,
            register_rate_limit: 1000,
            trust_proxy_headers: false,
            request_timeout_ms: 30000,
            shutdown_timeout_ms: 1000,
            business_utc_offset_minutes: 420,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn business_offset_millis(&self) -> i64 {
        self.business_utc_offset_minutes as i64 * 60 * 1000
    }
}
