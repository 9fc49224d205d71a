//! HTTP server configuration and request routing.
//!
//! Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Timeout enforcement
//! 4. Handler execution
//!
//! # Graceful Shutdown
//!
//! On SIGTERM or CTRL+C the server stops accepting connections and lets
//! in-flight requests finish.

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use userstore_core::UserService;
use uuid::Uuid;

use crate::{handlers, AppState};

/// Request timeout used by [`create_router`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates the router with the default request timeout.
///
/// # Example
///
/// ```no_run
/// use userstore_api::create_router;
/// use userstore_core::{Storage, UserService};
///
/// async fn start(pool: sqlx::SqlitePool) {
///     let app = create_router(UserService::new(Storage::new(pool)));
///     // Serve the app...
/// }
/// ```
pub fn create_router(users: UserService) -> Router {
    create_router_with_timeout(users, DEFAULT_REQUEST_TIMEOUT)
}

/// Creates the router with all routes and middleware.
///
/// Routes:
/// - `POST /create`
/// - `GET /user/{id}`
/// - `GET /health`
pub fn create_router_with_timeout(users: UserService, request_timeout: Duration) -> Router {
    let user_routes = Router::new()
        .route("/create", post(handlers::create_user))
        .route("/user/{id}", get(handlers::get_user_by_id));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(user_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(AppState::new(users))
}

/// Middleware to inject request ID into all responses.
///
/// Adds X-Request-Id header for correlating logs with client reports.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// # Errors
///
/// Returns `std::io::Error` if the address cannot be bound.
pub async fn start_server(
    users: UserService,
    addr: SocketAddr,
    request_timeout: Duration,
) -> Result<(), std::io::Error> {
    let app = create_router_with_timeout(users, request_timeout);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!(addr = %actual_addr, "HTTP server listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
