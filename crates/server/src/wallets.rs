//! Wallets API endpoints.

use api_types::{
    Deleted,
    wallet::{WalletNew, WalletView},
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
) -> Result<Json<Vec<WalletView>>, ServerError> {
    let wallets = state.engine.list_wallets(&user.company_id).await?;
    Ok(Json(wallets.into_iter().map(views::wallet).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<WalletNew>,
) -> Result<(StatusCode, Json<WalletView>), ServerError> {
    let wallet = state
        .engine
        .create_wallet(
            &user.company_id,
            &payload.name,
            payload.balance_minor.unwrap_or(0),
            payload
                .currency
                .map(views::currency_to_engine)
                .unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::wallet(wallet))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<WalletNew>,
) -> Result<Json<WalletView>, ServerError> {
    let wallet = state
        .engine
        .update_wallet(
            &user.company_id,
            id,
            &payload.name,
            payload.balance_minor.unwrap_or(0),
            payload
                .currency
                .map(views::currency_to_engine)
                .unwrap_or_default(),
        )
        .await?;
    Ok(Json(views::wallet(wallet)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_wallet(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
