//! Spellcheck HTTP Service
//!
//! JSON endpoints for editor clients:
//! - `GET /health` - `{ok}`; true iff the model service answers
//! - `GET /models` - `{models: [name, ...]}` from the model service
//! - `POST /spellcheck` - `{text, model?, max_chunk_chars?}` -> `{corrections}`
//! - `POST /correct` - `{text, model?}` -> `{text}`
//!
//! CORS is fully permissive; the service is meant for local editors.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::llm::LLMError;
use crate::core::spellcheck::{Correction, SpellcheckService};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SpellcheckRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_chunk_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellcheckResponse {
    pub corrections: Vec<Correction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorrectRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectResponse {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Failure surfaced to HTTP clients as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl From<LLMError> for ApiError {
    fn from(error: LLMError) -> Self {
        log::error!("Upstream model service failure: {}", error);
        Self::internal(format!("Model service error: {}", error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router around `service`.
pub fn router(service: Arc<SpellcheckService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/models", get(models))
        .route("/spellcheck", post(spellcheck))
        .route("/correct", post(correct))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

// ============================================================================
// Spellcheck Server
// ============================================================================

/// HTTP server hosting the spellcheck router.
pub struct SpellcheckServer {
    addr: SocketAddr,
    service: Arc<SpellcheckService>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl SpellcheckServer {
    pub fn new(addr: SocketAddr, service: Arc<SpellcheckService>) -> Self {
        Self {
            addr,
            service,
            shutdown_tx: None,
        }
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        log::info!("Spellcheck service listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router(self.service))
            .with_graceful_shutdown(shutdown)
            .await?;

        log::info!("Spellcheck service stopped");
        Ok(())
    }

    /// Bind and serve on a background task. Returns the bound address,
    /// which differs from the configured one when port 0 was requested.
    pub async fn start(&mut self) -> std::io::Result<SocketAddr> {
        if self.shutdown_tx.is_some() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "Server already running",
            ));
        }

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let bound = listener.local_addr()?;
        let app = router(self.service.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            log::info!("Spellcheck service started on http://{}", bound);
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                log::error!("Spellcheck service error: {}", e);
            }
        });

        self.addr = bound;
        self.shutdown_tx = Some(shutdown_tx);
        Ok(bound)
    }

    /// Stop a server started with [`start`](Self::start).
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            log::info!("Spellcheck service shutting down");
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

// ============================================================================
// HTTP Handlers
// ============================================================================

async fn health(State(service): State<Arc<SpellcheckService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: service.generator().health_check().await,
    })
}

async fn models(
    State(service): State<Arc<SpellcheckService>>,
) -> Result<Json<ModelsResponse>, ApiError> {
    match service.generator().list_models().await {
        Ok(models) => Ok(Json(ModelsResponse { models })),
        Err(e) => {
            log::warn!("Listing models failed: {}", e);
            Err(ApiError::internal(format!("Failed to fetch models: {}", e)))
        }
    }
}

async fn spellcheck(
    State(service): State<Arc<SpellcheckService>>,
    Json(request): Json<SpellcheckRequest>,
) -> Result<Json<SpellcheckResponse>, ApiError> {
    let corrections = service
        .spellcheck(&request.text, request.model.as_deref(), request.max_chunk_chars)
        .await?;
    Ok(Json(SpellcheckResponse { corrections }))
}

async fn correct(
    State(service): State<Arc<SpellcheckService>>,
    Json(request): Json<CorrectRequest>,
) -> Result<Json<CorrectResponse>, ApiError> {
    let text = service
        .correct(&request.text, request.model.as_deref())
        .await?;
    Ok(Json(CorrectResponse { text }))
}
