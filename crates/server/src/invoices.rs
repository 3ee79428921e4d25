//! Invoices API endpoints.

use api_types::{
    Deleted,
    invoice::{InvoiceNew, InvoiceView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

fn draft_from(payload: InvoiceNew) -> engine::InvoiceDraft {
    engine::InvoiceDraft {
        customer_id: payload.customer_id,
        issue_date: payload.issue_date,
        due_date: payload.due_date,
        status: payload.status.map(views::invoice_status_to_engine),
        total_minor: payload.total_minor,
        currency: payload.currency.map(views::currency_to_engine),
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<InvoiceView>>, ServerError> {
    let invoices = state.engine.list_invoices(&user.company_id).await?;
    Ok(Json(invoices.into_iter().map(views::invoice).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceNew>,
) -> Result<(StatusCode, Json<InvoiceView>), ServerError> {
    let invoice = state
        .engine
        .create_invoice(&user.company_id, draft_from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(views::invoice(invoice))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoiceNew>,
) -> Result<Json<InvoiceView>, ServerError> {
    let invoice = state
        .engine
        .update_invoice(&user.company_id, id, draft_from(payload))
        .await?;
    Ok(Json(views::invoice(invoice)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_invoice(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
