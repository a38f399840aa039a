//! HTTP server: route table, request logging, and the serve loop.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::Uri;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::handlers::{category, task};
use super::AppState;
use crate::{AppError, Result};

/// Handler for `GET /health`: returns 200 OK with a plain-text body.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency = ?started.elapsed(),
        "request handled"
    );
    response
}

/// Build the application router over `state`.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(task::list_tasks))
        .route("/categories", get(category::list_categories))
        .route(
            "/add_category",
            get(category::add_category_form).post(category::create_category),
        )
        .route(
            "/edit_category/{id}",
            get(category::edit_category_form).post(category::update_category),
        )
        .route("/delete_category/{id}", get(category::delete_category))
        .route("/add_task", get(task::add_task_form).post(task::create_task))
        .route(
            "/edit_task/{id}",
            get(task::edit_task_form).post(task::update_task),
        )
        .route("/delete_task/{id}", get(task::delete_task))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Serve the application on an already-bound listener until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Io` if the listener fails while serving.
pub async fn serve(
    state: Arc<AppState>,
    listener: TcpListener,
    ct: CancellationToken,
) -> Result<()> {
    let addr = listener
        .local_addr()
        .map_err(|err| AppError::Io(format!("listener has no local address: {err}")))?;
    info!(%addr, "serving task manager");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Io(format!("http server error: {err}")))?;

    info!("http server shut down");
    Ok(())
}
