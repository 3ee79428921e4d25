//! Transactions API endpoints.

use api_types::{
    Deleted,
    transaction::{TransactionNew, TransactionView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

fn draft_from(payload: TransactionNew) -> engine::TransactionDraft {
    engine::TransactionDraft {
        entry_date: payload.entry_date,
        description: payload.description,
        amount_minor: payload.amount_minor,
        kind: views::transaction_kind_to_engine(payload.kind),
        category: payload.category,
        wallet_id: payload.wallet_id,
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.list_transactions(&user.company_id).await?;
    Ok(Json(
        transactions.into_iter().map(views::transaction).collect(),
    ))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(&user.company_id, draft_from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(views::transaction(tx))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .engine
        .update_transaction(&user.company_id, id, draft_from(payload))
        .await?;
    Ok(Json(views::transaction(tx)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state
        .engine
        .delete_transaction(&user.company_id, id)
        .await?;
    Ok(Json(Deleted { id }))
}
