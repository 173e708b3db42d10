use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::project::{NewProject, Project, ProjectId};
use crate::readme::ReadmeResolver;
use crate::storage::{categories, ProjectStore};
use crate::{FolioError, Result};

const PROJECT_NOT_FOUND: &str = "Project not found";

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub readme: Arc<ReadmeResolver>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProjectStore>, readme: ReadmeResolver) -> Self {
        Self {
            store,
            readme: Arc::new(readme),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.open_store()?, config.resolver()?))
    }

    /// Run a store operation off the async workers, since backends may
    /// block on file or database access.
    async fn with_store<T, F>(&self, operation: F) -> ApiResult<T>
    where
        F: FnOnce(&dyn ProjectStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || operation(store.as_ref()))
            .await
            .map_err(|err| {
                log::error!("Store task failed: {}", err);
                ApiError::internal()
            })?
            .map_err(ApiError::from)
    }
}

/// Error body: `{"message": .., "field": ..}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadmeBody {
    pub readme: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    fn new<M: Into<String>>(status: StatusCode, message: M) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                field: None,
            },
        }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, PROJECT_NOT_FOUND)
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::InvalidSourceUrl(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid GitHub URL")
            }
            FolioError::ReadmeNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "README not found")
            }
            FolioError::Validation { field, message } => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    message,
                    field: Some(field),
                },
            },
            FolioError::ReadOnly(message) => {
                Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
            }
            other => {
                log::error!("Request failed: {}", other);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Project>>> {
    let category = params.category.filter(|c| !c.is_empty());
    let projects = state
        .with_store(move |store| store.list(category.as_deref()))
        .await?;
    Ok(Json(projects))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Project>> {
    // Ids that are not numbers cannot match any project.
    let id: ProjectId = id.parse().map_err(|_| ApiError::not_found())?;
    state
        .with_store(move |store| store.get(id))
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

async fn get_project_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Project>> {
    state
        .with_store(move |store| store.get_by_slug(&slug))
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

async fn get_readme(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ReadmeBody>> {
    let project = state
        .with_store(move |store| store.get_by_slug(&slug))
        .await?
        .ok_or_else(ApiError::not_found)?;
    let github_url = project
        .github_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(ApiError::not_found)?;

    let readme = state.readme.fetch(&github_url).await?;
    Ok(Json(ReadmeBody { readme }))
}

async fn create_project(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let new: NewProject = serde_json::from_slice(&body).map_err(|err| {
        ApiError::from(FolioError::validation("body", err.to_string()))
    })?;
    let project = state
        .with_store(move |store| store.create(new))
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<String>>> {
    let categories = state
        .with_store(|store| categories(store))
        .await?;
    Ok(Json(categories))
}

/// The same array a static deployment ships as `projects.json`.
async fn static_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state
        .with_store(|store| store.projects())
        .await?;
    Ok(Json(projects))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/:id", get(get_project))
        .route("/api/projects/slug/:slug", get(get_project_by_slug))
        .route("/api/projects/slug/:slug/readme", get(get_readme))
        .route("/api/categories", get(list_categories))
        .route("/projects.json", get(static_projects))
        .route("/healthz", get(healthz))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Ctrl-C received, shutting down");
}
