use std::str::FromStr;

use hrdesk_core::currency::{CurrencyRates, DEFAULT_EUR_TO_USD, DEFAULT_RUB_TO_USD};

use crate::auth::jwt::JwtConfig;

/// Default upload body limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted salary upload body in bytes.
    pub max_upload_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Conversion rates used to express salaries in USD.
    pub currency: CurrencyRates,
    /// Admin account to create at startup, if configured.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the admin account created on first start.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `MAX_UPLOAD_BYTES`         | `10485760`                 |
    /// | `CURRENCY_EUR_TO_USD`      | `1.1328`                   |
    /// | `CURRENCY_RUB_TO_USD`      | `0.014`                    |
    /// | `BOOTSTRAP_ADMIN_USERNAME` | unset                      |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                      |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values; misconfiguration should stop startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins = parse_cors_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let max_upload_bytes: usize = env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES);

        let currency = CurrencyRates {
            eur_to_usd: env_or("CURRENCY_EUR_TO_USD", DEFAULT_EUR_TO_USD),
            rub_to_usd: env_or("CURRENCY_RUB_TO_USD", DEFAULT_RUB_TO_USD),
        };
        assert!(
            currency.eur_to_usd.is_finite() && currency.eur_to_usd > 0.0,
            "CURRENCY_EUR_TO_USD must be a positive number"
        );
        assert!(
            currency.rub_to_usd.is_finite() && currency.rub_to_usd > 0.0,
            "CURRENCY_RUB_TO_USD must be a positive number"
        );

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_USERNAME"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.trim().is_empty() => Some(BootstrapAdmin {
                username: username.trim().to_string(),
                password,
            }),
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            jwt,
            currency,
            bootstrap_admin,
        }
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value: '{raw}'")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
