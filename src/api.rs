//! HTTP API
//!
//! Routes:
//! - `GET  /health`                   liveness probe
//! - `GET  /api/health-signals`       realtime snapshot
//! - `GET  /api/historical-dashboard` historical snapshot
//! - `POST /lg/user-message`          assistant reply

use crate::assistant::{reply_to, ReplyProvider, UserMessage};
use crate::error::ApiError;
use crate::generator::HealthSignalGenerator;
use crate::snapshot::{historical_snapshot, realtime_snapshot};
use crate::types::{HistoricalSnapshot, RealtimeSnapshot};
use crate::{SERVICE_NAME, VERSION};
use axum::{
    extract::State,
    http::{header::InvalidHeaderValue, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Where per-request generators get their randomness
#[derive(Clone)]
pub enum SignalSource {
    /// Fresh OS entropy for every request
    Entropy,
    /// Child seeds drawn from one seeded root, reproducible across restarts
    Seeded(Arc<Mutex<StdRng>>),
}

impl SignalSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => SignalSource::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))),
            None => SignalSource::Entropy,
        }
    }

    /// Build a generator for one request
    pub fn generator(&self) -> Result<HealthSignalGenerator, ApiError> {
        match self {
            SignalSource::Entropy => Ok(HealthSignalGenerator::from_entropy()),
            SignalSource::Seeded(root) => {
                let child_seed: u64 = root
                    .lock()
                    .map_err(|_| ApiError::Internal("seeded random source poisoned".to_string()))?
                    .gen();
                Ok(HealthSignalGenerator::seeded(child_seed))
            }
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub signals: SignalSource,
    pub reply_provider: Arc<dyn ReplyProvider>,
}

impl AppState {
    pub fn new(signals: SignalSource, reply_provider: Arc<dyn ReplyProvider>) -> Self {
        Self {
            signals,
            reply_provider,
        }
    }
}

/// CORS policy for the dashboard frontend.
///
/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using a wildcard.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the application router
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let signals = Router::new()
        .route("/health-signals", get(health_signals))
        .route("/historical-dashboard", get(historical_dashboard));

    let assistant = Router::new().route("/user-message", post(user_message));

    Router::new()
        .route("/health", get(liveness))
        .nest("/api", signals)
        .nest("/lg", assistant)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": VERSION
    }))
}

async fn health_signals(State(state): State<AppState>) -> Result<Json<RealtimeSnapshot>, ApiError> {
    let mut generator = state.signals.generator()?;
    let snapshot = realtime_snapshot(&mut generator)?;

    tracing::debug!(risk_score = snapshot.risk_score, "Generated realtime snapshot");

    Ok(Json(snapshot))
}

async fn historical_dashboard(
    State(state): State<AppState>,
) -> Result<Json<HistoricalSnapshot>, ApiError> {
    let mut generator = state.signals.generator()?;
    let snapshot = historical_snapshot(&mut generator);

    tracing::debug!(timestamp = %snapshot.timestamp, "Generated historical snapshot");

    Ok(Json(snapshot))
}

async fn user_message(
    State(state): State<AppState>,
    Json(message): Json<UserMessage>,
) -> Result<Json<UserMessage>, ApiError> {
    if message.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Message text must not be empty".to_string()));
    }

    let reply = reply_to(&message, state.reply_provider.as_ref(), Utc::now()).await?;

    tracing::info!(
        message_id = %message.id,
        reply_id = %reply.id,
        provider = state.reply_provider.name(),
        "Answered user message"
    );

    Ok(Json(reply))
}
