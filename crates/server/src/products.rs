//! Products API endpoints.

use api_types::{
    Deleted,
    product::{ProductNew, ProductUpdate, ProductView},
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
) -> Result<Json<Vec<ProductView>>, ServerError> {
    let products = state.engine.list_products(&user.company_id).await?;
    Ok(Json(products.into_iter().map(views::product).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ProductNew>,
) -> Result<(StatusCode, Json<ProductView>), ServerError> {
    let product = state
        .engine
        .create_product(
            &user.company_id,
            engine::ProductDraft {
                sku: payload.sku,
                name: payload.name,
                description: payload.description,
                price_minor: payload.price_minor,
                cost_minor: payload.cost_minor,
                stock: payload.stock,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::product(product))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductUpdate>,
) -> Result<Json<ProductView>, ServerError> {
    let product = state
        .engine
        .update_product(
            &user.company_id,
            id,
            engine::ProductUpdate {
                sku: payload.sku,
                name: payload.name,
                description: payload.description,
                price_minor: payload.price_minor,
                cost_minor: payload.cost_minor,
            },
        )
        .await?;
    Ok(Json(views::product(product)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_product(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
