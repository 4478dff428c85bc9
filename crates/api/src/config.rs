use std::path::PathBuf;

/// Execution mode, selected by the `APP_ENV` environment variable.
///
/// Development binds to loopback and logs at debug level; production binds
/// to all interfaces and logs at info level. Test mirrors development and is
/// used by the integration suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Development,
    Production,
    Test,
}

impl AppMode {
    /// Read `APP_ENV`. Anything other than `production` or `test` (including
    /// an unset variable) is development.
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Self::Production,
            Ok("test") => Self::Test,
            _ => Self::Development,
        }
    }

    /// Default `RUST_LOG`-style filter when none is configured.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Self::Production => "cashier_api=info,tower_http=info",
            Self::Development | Self::Test => "cashier_api=debug,tower_http=debug",
        }
    }

    /// Default bind host: loopback outside production.
    fn default_host(self) -> &'static str {
        match self {
            Self::Production => "0.0.0.0",
            Self::Development | Self::Test => "127.0.0.1",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Execution mode (`APP_ENV`).
    pub mode: AppMode,
    /// Bind address (default depends on mode).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// The single value `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory for stored product images (default: `assets/image`), also
    /// served read-only at `/assets/image`.
    pub image_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                           |
    /// |------------------------|-----------------------------------|
    /// | `APP_ENV`              | `development`                     |
    /// | `HOST`                 | `127.0.0.1` (`0.0.0.0` in prod)   |
    /// | `PORT`                 | `8080`                            |
    /// | `CORS_ORIGINS`         | `*`                               |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                              |
    /// | `IMAGE_DIR`            | `assets/image`                    |
    pub fn from_env() -> Self {
        let mode = AppMode::from_env();

        let host = std::env::var("HOST").unwrap_or_else(|_| mode.default_host().into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let image_dir = PathBuf::from(
            std::env::var("IMAGE_DIR").unwrap_or_else(|_| "assets/image".into()),
        );

        Self {
            mode,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            image_dir,
        }
    }
}
