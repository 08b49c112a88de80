//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use super::dto::{
    CreateSessionRequest, DateChangeResult, HealthResponse, ObservationsData, ObservationsQuery,
    PointQueryRequest, SelectionDetail, SessionInfo, SetDateRequest, StandardsData,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{parse_calendar_date, GeoPoint};
use crate::services::sessions::Session;
use crate::services::store::refresh_shared;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw {
        None => Ok(chrono::Local::now().date_naive()),
        Some(raw) => parse_calendar_date(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date '{}'", raw))),
    }
}

fn lookup_session(state: &AppState, id: Uuid) -> Result<Arc<Session>, AppError> {
    state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}

async fn change_date(
    state: &AppState,
    session: &Session,
    date: NaiveDate,
) -> Result<DateChangeResult, AppError> {
    let outcome = refresh_shared(&session.store, state.repository.as_ref(), date).await?;
    Ok(DateChangeResult {
        session: SessionInfo::from(session),
        outcome,
    })
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the row source is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
        sessions: state.sessions.len(),
    }))
}

// =============================================================================
// Reference data and stateless joins
// =============================================================================

/// GET /v1/standards
pub async fn get_standards() -> HandlerResult<StandardsData> {
    Ok(Json(StandardsData::current()))
}

/// GET /v1/observations?date=YYYY-MM-DD
///
/// Join both tables for one date without touching any session.
pub async fn get_observations(
    State(state): State<AppState>,
    Query(query): Query<ObservationsQuery>,
) -> HandlerResult<ObservationsData> {
    let date = parse_date(query.date.as_deref())?;
    let outcome = db_services::load_observations(state.repository.as_ref(), date).await?;
    Ok(Json(ObservationsData::new(Some(date), &outcome.observations)))
}

// =============================================================================
// Sessions
// =============================================================================

/// POST /v1/sessions
///
/// Create a session and load its first date.
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<DateChangeResult>), AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let date = parse_date(request.date.as_deref())?;

    let session = state.sessions.create();
    match change_date(&state, &session, date).await {
        Ok(result) => Ok((StatusCode::CREATED, Json(result))),
        Err(e) => {
            state.sessions.remove(&session.id);
            Err(e)
        }
    }
}

/// DELETE /v1/sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(&session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "Session {} not found",
            session_id
        )))
    }
}

/// PUT /v1/sessions/{session_id}/date
///
/// Change the session's date. A failed fetch keeps the previous observations.
pub async fn set_session_date(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetDateRequest>,
) -> HandlerResult<DateChangeResult> {
    let date = parse_date(Some(&request.date))?;
    let session = lookup_session(&state, session_id)?;
    Ok(Json(change_date(&state, &session, date).await?))
}

/// GET /v1/sessions/{session_id}/observations
pub async fn get_session_observations(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<ObservationsData> {
    let session = lookup_session(&state, session_id)?;
    let snapshot = session.store.lock().snapshot();
    Ok(Json(ObservationsData::from(snapshot.as_ref())))
}

/// POST /v1/sessions/{session_id}/query
///
/// Select the sensor nearest to a point. Returns `null` when the session
/// has no observations.
pub async fn query_point(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PointQueryRequest>,
) -> HandlerResult<Option<SelectionDetail>> {
    let point = GeoPoint::new(request.lat, request.lon);
    if !point.is_valid() {
        return Err(AppError::BadRequest(format!(
            "Invalid coordinates ({}, {})",
            request.lat, request.lon
        )));
    }

    let session = lookup_session(&state, session_id)?;
    let mut store = session.store.lock();
    Ok(Json(store.on_point_query(point).map(SelectionDetail::from)))
}

/// GET /v1/sessions/{session_id}/selection
pub async fn get_selection(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<Option<SelectionDetail>> {
    let session = lookup_session(&state, session_id)?;
    let store = session.store.lock();
    Ok(Json(store.selected().map(SelectionDetail::from)))
}
