use metaforge_core::workspace::{DEFAULT_WORKSPACE_NAME, ENV_DEFAULT_WORKSPACE_NAME};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8237`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Name of the workspace unscoped requests fall back to.
    pub default_workspace_name: String,
    /// Password for the bootstrap admin user created on an empty database.
    pub initial_admin_password: String,
    /// Whether the workload manager (and the deployment logs endpoint) is
    /// enabled.
    pub workload_manager_enabled: bool,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                            | Default     |
    /// |------------------------------------|-------------|
    /// | `HOST`                             | `0.0.0.0`   |
    /// | `PORT`                             | `8237`      |
    /// | `CORS_ORIGINS`                     | *(empty)*   |
    /// | `REQUEST_TIMEOUT_SECS`             | `30`        |
    /// | `METAFORGE_DEFAULT_WORKSPACE_NAME` | `default`   |
    /// | `METAFORGE_ADMIN_PASSWORD`         | `admin`     |
    /// | `WORKLOAD_MANAGER_ENABLED`         | `false`     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8237".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_workspace_name = std::env::var(ENV_DEFAULT_WORKSPACE_NAME)
            .unwrap_or_else(|_| DEFAULT_WORKSPACE_NAME.into());

        let initial_admin_password =
            std::env::var("METAFORGE_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into());

        let workload_manager_enabled = std::env::var("WORKLOAD_MANAGER_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_workspace_name,
            initial_admin_password,
            workload_manager_enabled,
            jwt,
        }
    }
}
