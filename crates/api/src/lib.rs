//! # Eventhall API
//!
//! The API crate provides the web server for the Eventhall venue booking
//! service: event requests, admin approval, attendee registration and
//! reminder dispatch.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into manager calls
//! - **Middleware**: Admin authentication and error mapping
//! - **Config**: Environment configuration
//!
//! Handlers never touch storage directly; they go through the managers in
//! `eventhall-core`, which are built over whatever repositories and
//! notifier the binary wires in.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eventhall_core::{
    auth::AdminKey,
    join_link::JoinLinks,
    lifecycle::EventLifecycleManager,
    notifier::Notifier,
    registration::RegistrationManager,
    reminders::ReminderDispatcher,
    repository::{AttendeeRepository, EventRepository},
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub lifecycle: EventLifecycleManager,
    pub registrations: RegistrationManager,
    pub reminders: ReminderDispatcher,
    pub admin_key: AdminKey,
}

impl ApiState {
    /// Builds the managers over one set of repositories and one notifier.
    pub fn new(
        events: Arc<dyn EventRepository>,
        attendees: Arc<dyn AttendeeRepository>,
        notifier: Arc<dyn Notifier>,
        links: JoinLinks,
        admin_key: AdminKey,
    ) -> Self {
        Self {
            lifecycle: EventLifecycleManager::new(
                events.clone(),
                attendees.clone(),
                notifier.clone(),
                links,
            ),
            registrations: RegistrationManager::new(
                events.clone(),
                attendees.clone(),
                notifier.clone(),
            ),
            reminders: ReminderDispatcher::new(events, attendees, notifier),
            admin_key,
        }
    }
}

/// Installs the global fmt subscriber at the given level.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Event requests, listings and join links
        .merge(routes::events::routes())
        // Approval decisions
        .merge(routes::admin::routes())
        // Registration and reminders
        .merge(routes::attendees::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and state
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use eventhall_api::{config::ApiConfig, start_server, ApiState};
/// # async fn run(state: Arc<ApiState>) -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// start_server(config, state).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(handle_timeout))
            .timeout(std::time::Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_timeout(err: tower::BoxError) -> (axum::http::StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            axum::http::StatusCode::REQUEST_TIMEOUT,
            "Request timed out".to_string(),
        )
    } else {
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    }
}
