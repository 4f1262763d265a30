use std::path::PathBuf;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// The two domains and the frontend path have no sensible default and must
/// be provided; everything else falls back to a local-development value.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `2458`).
    pub port: u16,
    /// SQLite connection URL (default: `sqlite://database.sqlite`).
    pub database_url: String,
    /// Host name the JSON API answers on.
    pub api_domain: String,
    /// Host name the static frontend answers on.
    pub frontend_domain: String,
    /// Directory holding the built frontend.
    pub frontend_path: PathBuf,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `API_DOMAIN`           | required                   |
    /// | `FRONTEND_DOMAIN`      | required                   |
    /// | `FRONTEND_PATH`        | required                   |
    /// | `API_PORT`             | `2458`                     |
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `DATABASE_URL`         | `sqlite://database.sqlite` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let api_domain = required("API_DOMAIN")?;
        let frontend_domain = required("FRONTEND_DOMAIN")?;
        let frontend_path = PathBuf::from(required("FRONTEND_PATH")?);

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let database_url = get("DATABASE_URL").unwrap_or_else(|| "sqlite://database.sqlite".into());

        let port = match get("API_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "API_PORT",
                expected: "u16",
                value,
            })?,
            None => 2458,
        };

        let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                expected: "u64",
                value,
            })?,
            None => 30,
        };

        Ok(Self {
            host,
            port,
            database_url,
            api_domain,
            frontend_domain,
            frontend_path,
            request_timeout_secs,
        })
    }

    /// Origins allowed by CORS: both schemes of both domains.
    pub fn cors_origins(&self) -> Vec<String> {
        [&self.api_domain, &self.frontend_domain]
            .into_iter()
            .flat_map(|domain| [format!("http://{domain}"), format!("https://{domain}")])
            .collect()
    }
}

/// Output format of the tracing subscriber, from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (default).
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}
