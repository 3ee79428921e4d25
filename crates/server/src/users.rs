//! Users API endpoints.
//!
//! Credential hashing and session issuance are the auth service's concern;
//! these endpoints manage the user directory of the caller's company.

use api_types::{
    Deleted,
    user::{UserNew, UserUpdate, UserView},
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
) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state.engine.list_users(&user.company_id).await?;
    Ok(Json(users.into_iter().map(views::user).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let created = state
        .engine
        .create_user(
            &user.company_id,
            engine::UserDraft {
                name: payload.name,
                email: payload.email,
                password: Some(payload.password),
                role: payload.role,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::user(created))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<UserView>, ServerError> {
    let updated = state
        .engine
        .update_user(
            &user.company_id,
            id,
            engine::UserDraft {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                role: payload.role,
            },
        )
        .await?;
    Ok(Json(views::user(updated)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_user(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
