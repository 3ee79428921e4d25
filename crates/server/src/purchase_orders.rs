//! Purchase order API endpoints, including the receipt composite.

use api_types::{
    Deleted,
    purchase_order::{PurchaseOrderNew, PurchaseOrderReceived, PurchaseOrderView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

fn draft_from(payload: PurchaseOrderNew) -> engine::PurchaseOrderDraft {
    engine::PurchaseOrderDraft {
        supplier_id: payload.supplier_id,
        order_date: payload.order_date,
        expected_date: payload.expected_date,
        status: payload.status.map(views::po_status_to_engine),
        items: payload
            .items
            .into_iter()
            .map(|item| engine::PurchaseOrderItemDraft {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_cost_minor: item.unit_cost_minor,
            })
            .collect(),
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<PurchaseOrderView>>, ServerError> {
    let orders = state.engine.list_purchase_orders(&user.company_id).await?;
    Ok(Json(orders.into_iter().map(views::purchase_order).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<PurchaseOrderNew>,
) -> Result<(StatusCode, Json<PurchaseOrderView>), ServerError> {
    let order = state
        .engine
        .create_purchase_order(&user.company_id, draft_from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(views::purchase_order(order))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PurchaseOrderNew>,
) -> Result<Json<PurchaseOrderView>, ServerError> {
    let order = state
        .engine
        .update_purchase_order(&user.company_id, id, draft_from(payload))
        .await?;
    Ok(Json(views::purchase_order(order)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state
        .engine
        .delete_purchase_order(&user.company_id, id)
        .await?;
    Ok(Json(Deleted { id }))
}

/// Receives an open order: one unit of work flips the status and applies
/// every line item's stock increment exactly once.
pub async fn receive(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PurchaseOrderReceived>, ServerError> {
    let receipt = state
        .engine
        .receive_purchase_order(&user.company_id, id)
        .await?;
    Ok(Json(PurchaseOrderReceived {
        purchase_order: views::purchase_order(receipt.purchase_order),
        updated_products: receipt
            .updated_products
            .into_iter()
            .map(views::product)
            .collect(),
        missing_products: receipt.missing_products,
    }))
}
