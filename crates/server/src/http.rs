//! HTTP endpoints
//!
//! One POST `/ask` per user turn. The server mints a session id when
//! the client sends none; the client must echo it back for the
//! context to carry across turns.

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use krishi_core::Entities;

use crate::session::SessionStore;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.settings.server.cors_origins);

    Router::new()
        .route("/", get(home))
        .route("/ask", post(ask))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins; with none configured
/// only local tooling is allowed.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!(origins = parsed.len(), "CORS configured");
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub session_id: String,
    pub response: String,
    pub intent: &'static str,
    pub entities: Entities,
    pub awaiting_weather_location: bool,
    pub awaiting_mandi_info: bool,
    pub farewell: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Resolve one user turn.
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.query.trim().is_empty() {
        return Err(bad_request("No query provided"));
    }

    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let context = state.sessions.get_or_create(&session_id).await;
    let mut context = context.lock().await;

    tracing::debug!(session_id = %session_id, query = %request.query, "Resolving turn");
    let outcome = state.resolver.resolve_turn(&request.query, &mut context).await;

    Ok(Json(AskResponse {
        session_id,
        response: outcome.reply.text,
        intent: outcome.nlu.intent.as_str(),
        entities: outcome.nlu.entities,
        awaiting_weather_location: context.awaiting_weather_location,
        awaiting_mandi_info: context.awaiting_mandi_info,
        farewell: outcome.farewell,
    }))
}

async fn home() -> &'static str {
    "कृषि मित्र AI - API is running"
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len().await,
    }))
}
