//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json, Redirect,
    },
};
use futures::stream::{self, Stream};
use tracing::{info, warn};

use crate::{
    error::AppResult,
    state::{AppState, ControlView},
    tasks::countdown_timer_task,
};
use super::{
    extract::{ApiJson, ApiQuery},
    responses::{
        HealthResponse, NavigationResponse, SendCodeRequest, SendCodeResponse, SessionQuery,
        SessionResponse, StatusResponse, VerifyRequest,
    },
};

/// Handle POST /api/session - Open a session for a freshly loaded page
pub async fn session_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<SessionResponse>> {
    let (session, control) = state.open_session()?;
    info!("Session endpoint called - opened session {}", session);
    Ok(Json(SessionResponse::new(session, control)))
}

/// Handle POST /api/send-code - Validate the phone number and start the cooldown
pub async fn send_code_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SendCodeRequest>,
) -> AppResult<Json<SendCodeResponse>> {
    let outcome = state.send_code(&request.session, &request.phone)?;

    if outcome.started {
        let timer_state = Arc::clone(&state);
        let session = request.session.clone();
        tokio::spawn(async move {
            countdown_timer_task(timer_state, session).await;
        });
        info!("Send-code endpoint called - cooldown started for {}", request.session);
    } else {
        info!("Send-code endpoint called - cooldown already running for {}", request.session);
    }

    Ok(Json(SendCodeResponse::new(outcome.started, outcome.control)))
}

/// Handle GET /api/countdown - Current send control state of a session
pub async fn countdown_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SessionQuery>,
) -> AppResult<Json<ControlView>> {
    Ok(Json(state.control(&query.session)?))
}

/// Handle GET /api/countdown/events - Stream a session's send control updates
pub async fn countdown_events_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SessionQuery>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let rx = state.subscribe(&query.session)?;

    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let view = rx.borrow_and_update().clone();
        match Event::default().event("control").json_data(&view) {
            Ok(event) => Some((Ok::<_, Infallible>(event), (rx, false))),
            Err(e) => {
                warn!("Failed to encode control event: {}", e);
                None
            }
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Handle POST /api/verify - Check the submitted verification code
pub async fn verify_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> AppResult<Json<NavigationResponse>> {
    let navigation = state.submit_code(request.code.as_deref())?;
    info!("Verify endpoint called - redirecting to {}", navigation.redirect);
    Ok(Json(NavigationResponse::ok(navigation.redirect)))
}

/// Handle GET /api/home - Home destination as JSON
pub async fn home_api_handler(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    Json(NavigationResponse::ok(state.go_home().redirect))
}

/// Handle GET /home - Redirect the browser to the home page
pub async fn home_handler(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&state.go_home().redirect)
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        active_sessions: state.sessions.len(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
