//! Goals API endpoints, including the contribution composite.

use api_types::{
    Deleted,
    goal::{GoalContribute, GoalContributed, GoalNew, GoalUpdate, GoalView},
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
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.list_goals(&user.company_id).await?;
    Ok(Json(goals.into_iter().map(views::goal).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let goal = state
        .engine
        .create_goal(
            &user.company_id,
            engine::GoalDraft {
                name: payload.name,
                target_minor: payload.target_minor,
                deadline: payload.deadline,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::goal(goal))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state
        .engine
        .update_goal(
            &user.company_id,
            id,
            engine::GoalDraft {
                name: payload.name,
                target_minor: payload.target_minor,
                deadline: payload.deadline,
            },
        )
        .await?;
    Ok(Json(views::goal(goal)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_goal(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}

/// Funds a goal from a wallet; the balance bump and the expense
/// transaction commit together or not at all.
pub async fn contribute(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalContribute>,
) -> Result<Json<GoalContributed>, ServerError> {
    let contribution = state
        .engine
        .contribute_to_goal(
            &user.company_id,
            id,
            payload.amount_minor,
            payload.wallet_id,
        )
        .await?;
    Ok(Json(GoalContributed {
        goal: views::goal(contribution.goal),
        transaction: views::transaction(contribution.transaction),
    }))
}
