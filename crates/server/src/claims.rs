//! Expense claims API endpoints, including the approval composite.

use api_types::{
    Deleted,
    expense_claim::{ClaimApprove, ClaimApproved, ClaimNew, ClaimUpdate, ClaimView},
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
) -> Result<Json<Vec<ClaimView>>, ServerError> {
    let claims = state.engine.list_claims(&user.company_id).await?;
    Ok(Json(claims.into_iter().map(views::claim).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ClaimNew>,
) -> Result<(StatusCode, Json<ClaimView>), ServerError> {
    let claim = state
        .engine
        .create_claim(
            &user.company_id,
            engine::ClaimDraft {
                employee_id: payload.employee_id,
                claim_date: payload.claim_date,
                category: payload.category,
                amount_minor: payload.amount_minor,
                description: payload.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::claim(claim))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClaimUpdate>,
) -> Result<Json<ClaimView>, ServerError> {
    let claim = state
        .engine
        .update_claim(
            &user.company_id,
            id,
            engine::ClaimDraft {
                employee_id: payload.employee_id,
                claim_date: payload.claim_date,
                category: payload.category,
                amount_minor: payload.amount_minor,
                description: payload.description,
            },
        )
        .await?;
    Ok(Json(views::claim(claim)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_claim(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}

/// Approves a pending claim; the status flip and the reimbursement
/// transaction commit together or not at all.
pub async fn approve(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClaimApprove>,
) -> Result<Json<ClaimApproved>, ServerError> {
    let approval = state
        .engine
        .approve_claim(&user.company_id, id, payload.wallet_id)
        .await?;
    Ok(Json(ClaimApproved {
        claim: views::claim(approval.claim),
        transaction: views::transaction(approval.transaction),
    }))
}

pub async fn reject(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimView>, ServerError> {
    let claim = state.engine.reject_claim(&user.company_id, id).await?;
    Ok(Json(views::claim(claim)))
}
