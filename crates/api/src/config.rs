use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secrets, expiry durations).
    pub jwt: JwtConfig,
    /// Appended to every password before hashing (default: empty).
    pub password_pepper: String,
    /// PDF renderer settings.
    pub renderer: RendererConfig,
    /// Startup attempts to reach the database (default: `5`).
    pub db_connect_attempts: u32,
}

/// Settings for the external PDF renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Path or name of the `wkhtmltopdf` binary (default: `wkhtmltopdf`).
    pub binary: String,
    /// Wall-clock limit for a single render, in seconds (default: `60`).
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PASSWORD_PEPPER`      | empty                      |
    /// | `WKHTMLTOPDF_PATH`     | `wkhtmltopdf`              |
    /// | `RENDER_TIMEOUT_SECS`  | `60`                       |
    /// | `DB_CONNECT_ATTEMPTS`  | `5`                        |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let password_pepper = std::env::var("PASSWORD_PEPPER").unwrap_or_default();

        let renderer = RendererConfig {
            binary: std::env::var("WKHTMLTOPDF_PATH").unwrap_or_else(|_| "wkhtmltopdf".into()),
            timeout_secs: std::env::var("RENDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("RENDER_TIMEOUT_SECS must be a valid u64"),
        };

        let db_connect_attempts: u32 = std::env::var("DB_CONNECT_ATTEMPTS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_CONNECT_ATTEMPTS must be a valid u32");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            password_pepper,
            renderer,
            db_connect_attempts,
        }
    }
}
