use crate::config::{Environment, ServeArgs};
use crate::page;
use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use topicloud::TopicMapping;
use topicloud::render::{CloudOptions, HeadlessError};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub const APOLOGY: &str = "Sorry! Something has gone wrong on our side.";

/// Immutable per-server configuration shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub topics_path: PathBuf,
    pub public_dir: PathBuf,
    pub env: Environment,
    pub cloud: CloudOptions,
}

impl AppState {
    pub fn new(topics_path: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            topics_path: topics_path.into(),
            public_dir: public_dir.into(),
            env: Environment::default(),
            cloud: CloudOptions {
                id: Some(page::CLOUD_ID.to_string()),
                ..CloudOptions::default()
            },
        }
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }
}

impl From<&ServeArgs> for AppState {
    fn from(args: &ServeArgs) -> Self {
        Self {
            topics_path: args.source.topics.clone(),
            public_dir: args.public_dir.clone(),
            env: args.env,
            cloud: args.cloud.options(Some(page::CLOUD_ID)),
        }
    }
}

/// Handler failures. The detail is logged; clients only ever see [`APOLOGY`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] topicloud::Error),
    #[error(transparent)]
    Render(#[from] HeadlessError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, APOLOGY).into_response()
    }
}

pub fn app(state: AppState) -> Router {
    let static_files =
        ServeDir::new(&state.public_dir).not_found_service(not_found.into_service());
    let logs_requests = state.env.logs_requests();

    let router = Router::new()
        .route("/", get(index))
        .route("/api/topics", get(api_topics))
        .route("/api/topics/", get(api_topics))
        .fallback_service(static_files)
        .with_state(Arc::new(state));

    if logs_requests {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Reads and aggregates the topic source. The file is re-read on every call.
pub async fn load_topics(path: &Path) -> topicloud::Result<TopicMapping> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| topicloud::Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    topicloud::parse_source(&bytes)
}

async fn api_topics(State(state): State<Arc<AppState>>) -> Result<Json<TopicMapping>, AppError> {
    let topics = load_topics(&state.topics_path).await?;
    Ok(Json(topics))
}

async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let topics = load_topics(&state.topics_path).await?;
    let svg = topicloud::render::render_svg(&topics, &state.cloud).await?;
    Ok(Html(page::index(&svg, &topics, state.env.pretty_pages())))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
