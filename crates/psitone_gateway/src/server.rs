use crate::types::{ErrorBody, GenerateResponse, HistoryResponse};
use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use psitone_core::{PsiError, TurnRequest};
use psitone_memory::Conversation;
use psitone_reasoning::ResponseEngine;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use uuid::Uuid;

/// Shared state for the gateway server.
#[derive(Clone)]
struct AppState {
    engine: Arc<ResponseEngine>,
    /// The single conversation this process serves.
    conversation: Arc<Conversation>,
}

/// The gateway HTTP server.
///
/// - `POST /generate_response` — run one tuned turn
/// - `GET /history` — turns recorded so far
/// - `GET /health` — health check
pub struct GatewayServer {
    state: AppState,
    host: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(
        engine: Arc<ResponseEngine>,
        conversation: Arc<Conversation>,
        host: &str,
        port: u16,
    ) -> Self {
        Self {
            state: AppState {
                engine,
                conversation,
            },
            host: host.to_string(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the router. CORS is open to every origin.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/generate_response", post(generate_response))
            .route("/history", get(history))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Bind and serve until the server stops. A bind failure is returned, not logged away.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.addr();
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Gateway failed to bind {}", addr))?;
        tracing::info!("Gateway listening on {}", addr);
        axum::serve(listener, app)
            .await
            .context("Gateway server error")
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Maps each error kind to its response class.
struct ApiError(PsiError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            PsiError::Validation(_) => StatusCode::BAD_REQUEST,
            PsiError::Generation(_) | PsiError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorBody::from(&self.0))).into_response()
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

/// POST /generate_response
///
/// Malformed JSON is a client error, reported in the same body shape as a
/// parameter violation.
async fn generate_response(
    State(state): State<AppState>,
    payload: Result<Json<TurnRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            tracing::warn!("Rejected malformed request: {}", rejection.body_text());
            let body = ErrorBody {
                error: rejection.body_text(),
                kind: "validation".to_string(),
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let span = tracing::info_span!("generate_response", request_id = %Uuid::new_v4());
    let result = state
        .engine
        .handle(&state.conversation, request)
        .instrument(span)
        .await;

    match result {
        Ok(tuned) => Json(GenerateResponse::from(tuned)).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// GET /history
///
/// Reads through the same lock a turn holds during generation, so while a
/// turn is in flight this waits for it to finish (at most `llm.timeout_secs`)
/// and then returns the history including that turn.
async fn history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        turns: state.conversation.snapshot().await,
    })
}
