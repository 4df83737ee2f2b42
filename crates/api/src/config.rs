//! # API Configuration Module
//!
//! Loads all server configuration from the environment once at startup;
//! nothing else in the codebase reads ambient environment state. Optional
//! sections (admin credentials, meeting provider, mail provider) become
//! `None` when fully absent — the features they back then answer with
//! `NotConfigured`/`UpstreamFailure` — and a partially supplied section
//! fails startup so a broken deployment is caught immediately.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: bind address (default: "0.0.0.0")
//! - `API_PORT`: listen port (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: request timeout (default: 30)
//! - `ADMIN_NAME` / `ADMIN_PASSWORD`: operator credentials for the admin
//!   surface
//! - `ZOOM_CLIENT_ID` / `ZOOM_CLIENT_SECRET` / `ZOOM_ACCOUNT_ID`: meeting
//!   provider credentials
//! - `SENDGRID_API_KEY` / `CONTACT_FROM_EMAIL` / `CONTACT_TO_EMAIL`: mail
//!   provider credentials, sender, and operator recipients

use eyre::{eyre, Result, WrapErr};
use slotline_integrations::mail::MailConfig;
use slotline_integrations::meetings::ZoomConfig;
use std::env;
use tracing::Level;

/// The operator credential pair guarding the admin surface.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    fn from_env() -> Result<Option<Self>> {
        let username = env::var("ADMIN_NAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let password = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Some(Self { username, password })),
            (None, None) => Ok(None),
            _ => Err(eyre!(
                "Partial admin configuration: set both ADMIN_NAME and ADMIN_PASSWORD or neither"
            )),
        }
    }
}

/// Configuration for the Slotline API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Operator credentials for the admin surface
    pub admin: Option<AdminCredentials>,

    /// Meeting provider credentials
    pub zoom: Option<ZoomConfig>,

    /// Mail provider credentials and addresses
    pub mail: Option<MailConfig>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is unset, `API_PORT` is not a u16, or any
    /// optional section is only partially supplied.
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Provider sections
        let admin = AdminCredentials::from_env()?;
        let zoom = ZoomConfig::from_env()?;
        let mail = MailConfig::from_env()?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            admin,
            zoom,
            mail,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080").
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
