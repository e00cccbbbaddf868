#![forbid(unsafe_code)]

//! HTTP server and command-line front end for topic clouds.
//!
//! Routes:
//! - `GET /api/topics`: the aggregated topic mapping as JSON
//! - `GET /`: a page with the server-rendered cloud and a detail panel
//! - anything else: static files from the public directory, then `404`

pub mod app;
pub mod config;
pub mod page;

pub use app::{APOLOGY, AppError, AppState, app, load_topics};
pub use config::Environment;

use anyhow::Context as _;
use config::ServeArgs;

pub async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let state = AppState::from(&args);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!(
        addr = %args.bind,
        topics = %state.topics_path.display(),
        public_dir = %state.public_dir.display(),
        env = ?state.env,
        "topic cloud server listening"
    );
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
