//! Journal entry API endpoints.
//!
//! The balance invariant is enforced by the engine before anything is
//! persisted; these handlers only shape the payloads.

use api_types::{
    Deleted,
    journal::{JournalEntryNew, JournalEntryView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, auth::AuthUser, server::ServerState, views};

fn draft_from(payload: JournalEntryNew) -> engine::JournalEntryDraft {
    engine::JournalEntryDraft {
        entry_date: payload.entry_date,
        reference: payload.reference,
        lines: payload
            .lines
            .into_iter()
            .map(|line| engine::JournalLineDraft {
                account_id: line.account_id,
                debit_minor: line.debit_minor,
                credit_minor: line.credit_minor,
                note: line.note,
            })
            .collect(),
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<JournalEntryView>>, ServerError> {
    let entries = state.engine.list_journal_entries(&user.company_id).await?;
    Ok(Json(entries.into_iter().map(views::journal_entry).collect()))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<JournalEntryNew>,
) -> Result<(StatusCode, Json<JournalEntryView>), ServerError> {
    let entry = state
        .engine
        .create_journal_entry(&user.company_id, draft_from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(views::journal_entry(entry))))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<JournalEntryNew>,
) -> Result<Json<JournalEntryView>, ServerError> {
    let entry = state
        .engine
        .update_journal_entry(&user.company_id, id, draft_from(payload))
        .await?;
    Ok(Json(views::journal_entry(entry)))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ServerError> {
    state
        .engine
        .delete_journal_entry(&user.company_id, id)
        .await?;
    Ok(Json(Deleted { id }))
}
