use super::config::ServerConfig;
use super::handlers::{
    handle_artifact, handle_branch, handle_model, handle_repo, handle_tag, handle_unrouted,
};
use super::middleware::{request_context, BodyLimit};
use crate::core::error::Result;
use crate::core::traits::SharedModel;
use axum::routing::any;
use axum::{Extension, Router};
use tokio::net::TcpListener;

/// Build the API router with default limits.
pub fn stagger_service(model: SharedModel) -> Router {
    stagger_router(model, &ServerConfig::default())
}

/// Build the API router.
///
/// Every resource path accepts any method; the handler decides which verbs
/// it serves and answers the rest with a route-not-found error. Bodies are
/// buffered by the handler, and only for PUT, up to `max_body_bytes`.
pub fn stagger_router(model: SharedModel, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/data", any(handle_model))
        .route("/api/repos/{repo_id}", any(handle_repo))
        .route("/api/repos/{repo_id}/branches/{branch_id}", any(handle_branch))
        .route(
            "/api/repos/{repo_id}/branches/{branch_id}/tags/{tag_id}",
            any(handle_tag),
        )
        .route(
            "/api/repos/{repo_id}/branches/{branch_id}/tags/{tag_id}/artifacts/{artifact_id}",
            any(handle_artifact),
        )
        .fallback(handle_unrouted)
        .layer(Extension(BodyLimit(config.max_body_bytes)))
        .layer(axum::middleware::from_fn_with_state(model, request_context))
}

/// Bind the configured address and serve until ctrl-c.
pub async fn run_server(config: ServerConfig, model: SharedModel) -> Result<()> {
    let addr = config.bind_addr()?;
    let app = stagger_router(model, &config);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("stagger listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
