//! # Slotline API
//!
//! The API crate provides the web server for the Slotline booking funnel:
//! public availability reads, the booking protocol, the contact relay, and
//! the credential-gated admin slot manager.
//!
//! ## Architecture
//!
//! - **Routes**: define API endpoints and URL structure
//! - **Handlers**: implement request processing logic
//! - **Middleware**: auth gate and error-to-HTTP mapping
//! - **Config**: environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database
//! interactions; outbound providers come in through the traits in
//! `slotline-integrations`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use slotline_core::errors::{FunnelError, FunnelResult};
use slotline_integrations::mail::{MailConfig, Mailer, SendGridMailer};
use slotline_integrations::meetings::{MeetingProvider, ZoomMeetings};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::config::AdminCredentials;

/// Shared application state that is accessible to all request handlers.
///
/// Unconfigured providers are `None`; the handlers that need them answer
/// with the matching taxonomy error instead of panicking or reading the
/// environment at call time.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Meeting provider, when credentials were supplied
    pub meetings: Option<Arc<dyn MeetingProvider>>,
    /// Mail provider, when credentials were supplied
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Mail sender/recipient addresses, present iff `mailer` is
    pub mail: Option<MailConfig>,
    /// Operator credentials for the admin surface
    pub admin: Option<AdminCredentials>,
}

impl ApiState {
    /// The meeting provider, or the booking-protocol error for a missing
    /// one.
    pub fn meetings(&self) -> FunnelResult<&Arc<dyn MeetingProvider>> {
        self.meetings
            .as_ref()
            .ok_or_else(|| FunnelError::Upstream("Meeting provider not configured".to_string()))
    }

    /// The mailer plus its address book, or the booking-protocol error for
    /// a missing one.
    pub fn mail(&self) -> FunnelResult<(&MailConfig, &Arc<dyn Mailer>)> {
        match (&self.mail, &self.mailer) {
            (Some(config), Some(mailer)) => Ok((config, mailer)),
            _ => Err(FunnelError::Upstream("Email not configured".to_string())),
        }
    }
}

/// Starts the API server with the provided configuration and database
/// connection.
///
/// Initializes logging, builds the provider adapters from config, wires up
/// routes, and serves until the process exits.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Build provider adapters once from config
    let meetings = config
        .zoom
        .clone()
        .map(|zoom| Arc::new(ZoomMeetings::new(zoom)) as Arc<dyn MeetingProvider>);
    let mailer = config
        .mail
        .as_ref()
        .map(|mail| Arc::new(SendGridMailer::new(&mail.api_key)) as Arc<dyn Mailer>);

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        meetings,
        mailer,
        mail: config.mail.clone(),
        admin: config.admin.clone(),
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public availability listing
        .merge(routes::availability::routes())
        // Booking protocol endpoint
        .merge(routes::booking::routes())
        // Contact relay endpoint
        .merge(routes::contact::routes())
        // Admin slot management endpoints
        .merge(routes::admin::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse()
                    .map_err(|_| eyre::eyre!("Invalid CORS origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
