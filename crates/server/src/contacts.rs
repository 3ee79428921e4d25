//! Contacts API endpoints.

use api_types::{
    Deleted,
    contact::{ContactNew, ContactView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

fn draft_from(payload: ContactNew) -> engine::ContactDraft {
    engine::ContactDraft {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        kind: views::contact_kind_to_engine(payload.kind),
        stage: payload.stage.map(views::pipeline_stage_to_engine),
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ContactView>>, ServerError> {
    let contacts = state.engine.list_contacts(&user.company_id).await?;
    Ok(Json(contacts.into_iter().map(views::contact).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ContactNew>,
) -> Result<(StatusCode, Json<ContactView>), ServerError> {
    let contact = state
        .engine
        .create_contact(&user.company_id, draft_from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(views::contact(contact))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContactNew>,
) -> Result<Json<ContactView>, ServerError> {
    let contact = state
        .engine
        .update_contact(&user.company_id, id, draft_from(payload))
        .await?;
    Ok(Json(views::contact(contact)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_contact(&user.company_id, id).await?;
    Ok(Json(Deleted { id }))
}
