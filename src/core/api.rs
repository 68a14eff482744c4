//! HTTP + WebSocket API for MindWatch
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /api/text/evaluate - Crisis assessment + stress level for a message
//! - POST /api/face/session/new - Create face session
//! - GET /api/face/session/{id} - Session status
//! - POST /api/face/session/{id}/frame - Ingest one expression frame
//! - GET /api/face/session/{id}/timeline - Sampled timeline
//! - POST /api/face/session/{id}/analyze - Insight (provider or fallback)
//! - DELETE /api/face/session/{id} - End session
//! - POST /api/wellness/overview - Period overview
//! - POST /api/wellness/stress-report - Stress report
//! - POST /api/wellness/mood-stats - Mood averages, trend, frequencies
//! - POST /api/wellness/breathing-stats - Breathing practice stats
//! - GET /api/wellness/techniques - Breathing technique catalog
//! - WS /ws/{id} - Live readings

use axum::{
    extract::{
        rejection::JsonRejection,
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::config::Config;
use crate::core::insight::{analyze_or_fallback, fallback_insight, InsightProvider};
use crate::core::techniques::TECHNIQUES;
use crate::core::{wellness, CrisisClassifier, ExpressionProcessor};
use crate::error::{MindwatchError, Result};
use crate::types::{
    BreathingSession, BreathingStats, ExpressionFrame, FaceInsight, FaceReading, MoodEntry,
    MoodStats, StressReport, TechniqueInfo, TextEvaluation, TimelineSample, WellnessOverview,
};

/// JSON body whose rejection is turned into a `MindwatchError` by the handler
type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

/// One live camera session
#[derive(Debug)]
pub struct FaceSession {
    pub id: String,
    pub processor: ExpressionProcessor,
    pub created_at: DateTime<Utc>,
    pub started: Instant,
    pub update_tx: broadcast::Sender<FaceReading>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, FaceSession>>,
    pub config: Config,
    pub classifier: CrisisClassifier,
    pub insight: Option<Arc<dyn InsightProvider>>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub frame_count: u64,
    pub window_frames: usize,
    pub timeline_samples: usize,
    pub last_reading: Option<FaceReading>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub session_id: String,
    pub average_stress: f64,
    pub samples: Vec<TimelineSample>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Defaults to the time since the session was created
    #[serde(default)]
    pub session_duration_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub data: FaceInsight,
    pub fallback: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRequest {
    #[serde(default)]
    pub mood_logs: Vec<MoodEntry>,
    #[serde(default)]
    pub journal_entries: usize,
    #[serde(default)]
    pub chat_sessions: usize,
    #[serde(default)]
    pub breathing_sessions: Vec<BreathingSession>,
}

/// Body for the stress report and mood stats
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodLogsRequest {
    #[serde(default)]
    pub mood_logs: Vec<MoodEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingStatsRequest {
    #[serde(default)]
    pub breathing_sessions: Vec<BreathingSession>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router with no insight provider (fallback only)
pub fn create_router(config: Config) -> Router {
    create_router_with_provider(config, None)
}

/// Create the API router backed by an insight provider
pub fn create_router_with_provider(
    config: Config,
    insight: Option<Arc<dyn InsightProvider>>,
) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        config,
        classifier: CrisisClassifier::new(),
        insight,
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/text/evaluate", post(evaluate_text))
        .route("/api/face/session/new", post(create_session))
        .route("/api/face/session/:id", get(get_session).delete(end_session))
        .route("/api/face/session/:id/frame", post(add_frame))
        .route("/api/face/session/:id/timeline", get(get_timeline))
        .route("/api/face/session/:id/analyze", post(analyze_session))
        .route("/api/wellness/overview", post(wellness_overview))
        .route("/api/wellness/stress-report", post(wellness_stress_report))
        .route("/api/wellness/mood-stats", post(wellness_mood_stats))
        .route("/api/wellness/breathing-stats", post(wellness_breathing_stats))
        .route("/api/wellness/techniques", get(breathing_techniques))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Evaluate one message
async fn evaluate_text(
    State(state): State<Arc<AppState>>,
    body: JsonBody<EvaluateTextRequest>,
) -> Result<Json<TextEvaluation>> {
    let Json(req) = body?;
    if req.text.trim().is_empty() {
        return Err(MindwatchError::Validation("text is required".to_string()));
    }
    Ok(Json(state.classifier.evaluate(&req.text)))
}

/// Create new face session
async fn create_session(State(state): State<Arc<AppState>>) -> Result<Json<NewSessionResponse>> {
    let mut sessions = state.sessions.write().await;
    if sessions.len() >= state.config.max_sessions {
        return Err(MindwatchError::SessionLimit(sessions.len()));
    }

    let session_id = uuid::Uuid::new_v4().to_string();
    let (tx, _) = broadcast::channel(state.config.broadcast_capacity);
    sessions.insert(
        session_id.clone(),
        FaceSession {
            id: session_id.clone(),
            processor: ExpressionProcessor::new(),
            created_at: Utc::now(),
            started: Instant::now(),
            update_tx: tx,
        },
    );
    info!(session = %session_id, active = sessions.len(), "face session created");

    Ok(Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| MindwatchError::SessionNotFound(id.clone()))?;

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        created_at: session.created_at,
        frame_count: session.processor.frame_count(),
        window_frames: session.processor.history_len(),
        timeline_samples: session.processor.timeline().len(),
        last_reading: session.processor.last_reading().cloned(),
    }))
}

/// Ingest one frame into a session
async fn add_frame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: JsonBody<ExpressionFrame>,
) -> Result<Json<FaceReading>> {
    let Json(frame) = body?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| MindwatchError::SessionNotFound(id.clone()))?;

    let reading = session.processor.update(frame);
    // No subscribers is not an error
    let _ = session.update_tx.send(reading.clone());

    Ok(Json(reading))
}

/// Get the sampled timeline
async fn get_timeline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TimelineResponse>> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| MindwatchError::SessionNotFound(id.clone()))?;
    let timeline = session.processor.timeline();

    Ok(Json(TimelineResponse {
        session_id: id,
        average_stress: timeline.average_stress(),
        samples: timeline.samples().cloned().collect(),
    }))
}

/// Ask the insight provider about the session, falling back when unavailable
async fn analyze_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: JsonBody<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    // The body is optional; only a body that is present and unreadable fails
    let req = match body {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => AnalyzeRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let request = {
        let sessions = state.sessions.read().await;
        let session = sessions
            .get(&id)
            .ok_or_else(|| MindwatchError::SessionNotFound(id.clone()))?;
        let duration = req
            .session_duration_secs
            .unwrap_or_else(|| session.started.elapsed().as_secs());
        session.processor.insight_request(duration)
    };

    let score = request.stress_score;
    let provider = state.insight.clone();
    // Provider may block on network I/O; keep it off the async workers
    let (data, fallback) = tokio::task::spawn_blocking(move || {
        analyze_or_fallback(provider.as_deref(), &request)
    })
    .await
    .unwrap_or_else(|_| (fallback_insight(score), true));

    debug!(session = %id, fallback, "insight produced");
    Ok(Json(AnalyzeResponse { data, fallback }))
}

/// End a session and drop its live channel
async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .remove(&id)
        .ok_or_else(|| MindwatchError::SessionNotFound(id.clone()))?;
    info!(
        session = %id,
        frames = session.processor.frame_count(),
        "face session ended"
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn wellness_overview(body: JsonBody<OverviewRequest>) -> Result<Json<WellnessOverview>> {
    let Json(req) = body?;
    let overview = wellness::overview(
        &req.mood_logs,
        req.journal_entries,
        req.chat_sessions,
        &req.breathing_sessions,
    )?;
    Ok(Json(overview))
}

async fn wellness_stress_report(body: JsonBody<MoodLogsRequest>) -> Result<Json<StressReport>> {
    let Json(req) = body?;
    Ok(Json(wellness::stress_report(&req.mood_logs)?))
}

async fn wellness_mood_stats(body: JsonBody<MoodLogsRequest>) -> Result<Json<MoodStats>> {
    let Json(req) = body?;
    Ok(Json(wellness::mood_stats(&req.mood_logs)?))
}

async fn wellness_breathing_stats(
    body: JsonBody<BreathingStatsRequest>,
) -> Result<Json<BreathingStats>> {
    let Json(req) = body?;
    Ok(Json(wellness::breathing_stats(&req.breathing_sessions)?))
}

async fn breathing_techniques() -> Json<&'static [TechniqueInfo]> {
    Json(TECHNIQUES)
}

/// WebSocket handler for live readings
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| MindwatchError::SessionNotFound(id.clone()))?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| handle_websocket(socket, rx)))
}

/// Forward readings until the client leaves or the session ends
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<FaceReading>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(reading) => {
                    let Ok(json) = serde_json::to_string(&reading) else {
                        continue;
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "live subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Run the API server
pub async fn run_server(config: Config) -> Result<()> {
    let addr = config.addr.clone();
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "MindWatch API listening");
    info!("  POST   /api/text/evaluate              - Evaluate message");
    info!("  POST   /api/face/session/new           - Create face session");
    info!("  POST   /api/face/session/:id/frame     - Ingest frame");
    info!("  GET    /api/face/session/:id/timeline  - Timeline");
    info!("  POST   /api/face/session/:id/analyze   - Insight");
    info!("  POST   /api/wellness/overview          - Overview");
    info!("  POST   /api/wellness/stress-report     - Stress report");
    info!("  POST   /api/wellness/mood-stats        - Mood stats");
    info!("  POST   /api/wellness/breathing-stats   - Breathing stats");
    info!("  GET    /api/wellness/techniques        - Breathing techniques");
    info!("  WS     /ws/:id                         - Live readings");
    axum::serve(listener, router).await?;
    Ok(())
}
