//! HTTP server for the contact book.
//!
//! Routes the `/api` endpoints to their handlers, logs every request, answers
//! CORS preflights for the configured browser origin, and runs the listener
//! until Ctrl-C.

pub mod handlers;
pub mod responses;

pub use handlers::AppState;
pub use responses::ApiError;

use anyhow::Result;
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// CORS policy for the browser client served from `origin`.
///
/// Requests from any other origin get no CORS headers.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the application router, allowing browser calls from `cors_origin`.
pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/criar", post(handlers::create_contact))
        .route("/api/listar", get(handlers::list_contacts))
        .route("/api/buscar", get(handlers::search_contacts))
        .route("/api/editar/:id", put(handlers::update_contact))
        .route("/api/editar", put(handlers::missing_id))
        .route("/api/editar/", put(handlers::missing_id))
        .route("/api/removercontatos/:id", delete(handlers::delete_contact))
        .route("/api/removercontatos", delete(handlers::missing_id))
        .route("/api/removercontatos/", delete(handlers::missing_id))
        .layer(middleware::from_fn(log_requests))
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

/// Serve `router` on `listener` until Ctrl-C.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn run_server(listener: TcpListener, router: Router) -> Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}
