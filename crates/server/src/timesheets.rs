//! Timesheets API endpoints.

use api_types::{
    Deleted,
    timesheet::{TimesheetNew, TimesheetView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

fn draft_from(payload: TimesheetNew) -> engine::TimesheetDraft {
    engine::TimesheetDraft {
        employee_id: payload.employee_id,
        work_date: payload.work_date,
        minutes: payload.minutes,
        note: payload.note,
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TimesheetView>>, ServerError> {
    let timesheets = state.engine.list_timesheets(&user.company_id).await?;
    Ok(Json(timesheets.into_iter().map(views::timesheet).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<TimesheetNew>,
) -> Result<(StatusCode, Json<TimesheetView>), ServerError> {
    let timesheet = state
        .engine
        .create_timesheet(&user.company_id, draft_from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(views::timesheet(timesheet))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TimesheetNew>,
) -> Result<Json<TimesheetView>, ServerError> {
    let timesheet = state
        .engine
        .update_timesheet(&user.company_id, id, draft_from(payload))
        .await?;
    Ok(Json(views::timesheet(timesheet)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_timesheet(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
