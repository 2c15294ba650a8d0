//! Process configuration, read once at startup from the environment.

use std::net::SocketAddr;

use thiserror::Error;

use admissions_observability::LogFormat;

const DEV_JWT_SECRET: &str = "dev-secret";

/// Longest accepted access-token lifetime (30 days).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 30 * 24 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration of the API server.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    /// Cookie consulted when no `Authorization` header is sent.
    pub auth_cookie: String,
    /// Expose internal error detail in 500 responses.
    pub dev_mode: bool,
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
    /// Bootstrap admin account (both must be set).
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_minutes: 60,
            auth_cookie: "auth_token".to_string(),
            dev_mode: false,
            max_body_bytes: 1024 * 1024,
            log_format: LogFormat::Json,
            admin_email: None,
            admin_password: None,
        }
    }
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("auth_cookie", &self.auth_cookie)
            .field("dev_mode", &self.dev_mode)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("log_format", &self.log_format)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AppConfig {
    /// True when no `JWT_SECRET` was configured.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Load from the process environment, honoring a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(v) => parse("BIND_ADDR", v)?,
            None => defaults.bind_addr,
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| defaults.jwt_secret.clone());

        let token_ttl_minutes = match get("TOKEN_TTL_MINUTES") {
            Some(v) => match v.parse::<i64>() {
                Ok(n) if (1..=MAX_TOKEN_TTL_MINUTES).contains(&n) => n,
                _ => return Err(invalid("TOKEN_TTL_MINUTES", v)),
            },
            None => defaults.token_ttl_minutes,
        };

        let dev_mode = match get("APP_ENV").as_deref() {
            Some("development") | Some("dev") => true,
            Some("production") | Some("prod") | Some("test") | None => false,
            Some(other) => return Err(invalid("APP_ENV", other.to_string())),
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(v) => parse("MAX_BODY_BYTES", v)?,
            None => defaults.max_body_bytes,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(v) => v.parse::<LogFormat>().map_err(|_| invalid("LOG_FORMAT", v))?,
            None => defaults.log_format,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl_minutes,
            auth_cookie: get("AUTH_COOKIE").unwrap_or(defaults.auth_cookie),
            dev_mode,
            max_body_bytes,
            log_format,
            admin_email: get("ADMIN_EMAIL"),
            admin_password: get("ADMIN_PASSWORD"),
        })
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, value }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| invalid(key, value))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(load(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn missing_secret_is_flagged() {
        assert!(load(&[]).unwrap().uses_dev_secret());
        assert!(!load(&[("JWT_SECRET", "s3cret")]).unwrap().uses_dev_secret());
    }

    #[test]
    fn values_are_read() {
        let cfg = load(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_MINUTES", "15"),
            ("AUTH_COOKIE", "session"),
            ("APP_ENV", "development"),
            ("MAX_BODY_BYTES", "2048"),
            ("LOG_FORMAT", "pretty"),
            ("ADMIN_EMAIL", "admin@uni.edu"),
            ("ADMIN_PASSWORD", "changeme"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.token_ttl_minutes, 15);
        assert_eq!(cfg.auth_cookie, "session");
        assert!(cfg.dev_mode);
        assert_eq!(cfg.max_body_bytes, 2048);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.admin_email.as_deref(), Some("admin@uni.edu"));
    }

    #[test]
    fn bad_values_are_reported() {
        assert_eq!(
            load(&[("TOKEN_TTL_MINUTES", "-5")]).unwrap_err(),
            ConfigError::Invalid {
                key: "TOKEN_TTL_MINUTES",
                value: "-5".to_string()
            }
        );
        assert!(load(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(load(&[("TOKEN_TTL_MINUTES", "0")]).is_err());
        assert!(load(&[("APP_ENV", "staging")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn token_ttl_is_bounded() {
        let max = MAX_TOKEN_TTL_MINUTES.to_string();
        let config = load(&[("TOKEN_TTL_MINUTES", &max)]).unwrap();
        assert_eq!(config.token_ttl_minutes, MAX_TOKEN_TTL_MINUTES);

        for huge in ["43201", "1000000000000", &i64::MAX.to_string()] {
            assert_eq!(
                load(&[("TOKEN_TTL_MINUTES", huge)]).unwrap_err(),
                ConfigError::Invalid {
                    key: "TOKEN_TTL_MINUTES",
                    value: huge.to_string()
                }
            );
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let cfg = load(&[("JWT_SECRET", "topsecret"), ("ADMIN_PASSWORD", "hunter2")]).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(!rendered.contains("hunter2"));
    }
}
