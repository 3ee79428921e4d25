//! Accounts API endpoints.

use api_types::{
    Deleted,
    account::{AccountNew, AccountView},
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
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.list_accounts(&user.company_id).await?;
    Ok(Json(accounts.into_iter().map(views::account).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let account = state
        .engine
        .create_account(
            &user.company_id,
            engine::AccountDraft {
                code: payload.code,
                name: payload.name,
                kind: views::account_kind_to_engine(payload.kind),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::account(account))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AccountNew>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state
        .engine
        .update_account(
            &user.company_id,
            id,
            engine::AccountDraft {
                code: payload.code,
                name: payload.name,
                kind: views::account_kind_to_engine(payload.kind),
            },
        )
        .await?;
    Ok(Json(views::account(account)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_account(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
