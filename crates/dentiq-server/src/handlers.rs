use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use dentiq_core::{AppointmentSnapshot, PatientSnapshot, Visit, VisitState, generate_id};
use dentiq_storage::StorageError;
use dentiq_workflow::TriggerContext;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Dentiq Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn readyz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

// ---- Visits ----

#[derive(Debug, Deserialize)]
pub struct CreateVisitRequest {
    pub appointment_id: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub status: Option<VisitState>,
}

pub async fn create_visit(
    State(state): State<AppState>,
    Path(clinic_id): Path<String>,
    Json(payload): Json<CreateVisitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.appointment_id.is_empty() {
        return Err(ApiError::bad_request("appointment_id must not be empty"));
    }

    let mut visit = Visit::new(generate_id(), &clinic_id, &payload.appointment_id);
    if let Some(room) = payload.room {
        visit = visit.with_room(room);
    }
    if let Some(status) = payload.status {
        visit = visit.with_status(status);
    }

    let created = state.visits.create(visit).await?;
    tracing::info!(visit = %created.id, clinic = %clinic_id, "visit created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_visit(
    State(state): State<AppState>,
    Path((clinic_id, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let visit = state
        .visits
        .get(&clinic_id, &id)
        .await?
        .ok_or_else(|| StorageError::not_found("Visit", &id))?;
    Ok(Json(visit))
}

pub async fn list_visits(
    State(state): State<AppState>,
    Path(clinic_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let visits = state.visits.list_by_clinic(&clinic_id).await?;
    Ok(Json(visits))
}

// ---- Transition ----

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub to: VisitState,
    #[serde(default)]
    pub workflow_template: Option<String>,
    pub appointment: AppointmentSnapshot,
    #[serde(default)]
    pub patient: Option<PatientSnapshot>,
}

/// Moves a visit to the requested state, then dispatches workflow triggers
/// for the observed transition.
///
/// The status update is authoritative: trigger failures are contained inside
/// the dispatcher and the updated visit is returned regardless.
pub async fn transition_visit(
    State(state): State<AppState>,
    Path((clinic_id, id)): Path<(String, String)>,
    Json(payload): Json<TransitionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let visit = state
        .visits
        .get(&clinic_id, &id)
        .await?
        .ok_or_else(|| StorageError::not_found("Visit", &id))?;

    let from = visit.status;
    let updated = state.visits.update_status(&clinic_id, &id, payload.to).await?;

    tracing::info!(
        visit = %updated.id,
        clinic = %clinic_id,
        from = %from,
        to = %payload.to,
        "visit transitioned"
    );

    let mut ctx = TriggerContext::new(&clinic_id, payload.appointment, updated.clone());
    if let Some(patient) = payload.patient {
        ctx = ctx.with_patient(patient);
    }
    if let Some(template) = payload.workflow_template {
        ctx = ctx.with_workflow_template(template);
    }

    state.dispatcher.run_visit_triggers(from, payload.to, &ctx).await;

    Ok(Json(updated))
}

// ---- Notifications ----

pub async fn list_notifications(
    State(state): State<AppState>,
    Path((clinic_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .notifications
        .list_for_user(&clinic_id, &user_id)
        .await?;
    Ok(Json(rows))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path((clinic_id, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.notifications.mark_read(&clinic_id, &id).await?;
    Ok(Json(updated))
}

// ---- Invoices ----

pub async fn list_invoices(
    State(state): State<AppState>,
    Path(clinic_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let invoices = state.invoices.list_by_clinic(&clinic_id).await?;
    Ok(Json(invoices))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path((clinic_id, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = state
        .invoices
        .get(&clinic_id, &id)
        .await?
        .ok_or_else(|| StorageError::not_found("Invoice", &id))?;
    let items = state.invoices.items(&invoice.id).await?;
    Ok(Json(json!({ "invoice": invoice, "items": items })))
}
