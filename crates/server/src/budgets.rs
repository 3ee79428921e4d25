//! Budgets API endpoints.

use api_types::{
    Deleted,
    budget::{BudgetNew, BudgetView},
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
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let budgets = state.engine.list_budgets(&user.company_id).await?;
    Ok(Json(budgets.into_iter().map(views::budget).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .create_budget(
            &user.company_id,
            engine::BudgetDraft {
                name: payload.name,
                category: payload.category,
                limit_minor: payload.limit_minor,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::budget(budget))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetNew>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state
        .engine
        .update_budget(
            &user.company_id,
            id,
            engine::BudgetDraft {
                name: payload.name,
                category: payload.category,
                limit_minor: payload.limit_minor,
            },
        )
        .await?;
    Ok(Json(views::budget(budget)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_budget(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
