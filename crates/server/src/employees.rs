//! Employees API endpoints.

use api_types::{
    Deleted,
    employee::{EmployeeNew, EmployeeView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<EmployeeView>>, ServerError> {
    let employees = state.engine.list_employees(&user.company_id).await?;
    Ok(Json(employees.into_iter().map(views::employee).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeNew>,
) -> Result<(StatusCode, Json<EmployeeView>), ServerError> {
    let employee = state
        .engine
        .create_employee(
            &user.company_id,
            engine::EmployeeDraft {
                name: payload.name,
                email: payload.email,
                position: payload.position,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::employee(employee))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeeNew>,
) -> Result<Json<EmployeeView>, ServerError> {
    let employee = state
        .engine
        .update_employee(
            &user.company_id,
            id,
            engine::EmployeeDraft {
                name: payload.name,
                email: payload.email,
                position: payload.position,
            },
        )
        .await?;
    Ok(Json(views::employee(employee)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_employee(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
