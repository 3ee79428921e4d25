//! AI assistant endpoint.
//!
//! The provider is a pure external text-completion service. This handler
//! gathers a tenant-scoped financial snapshot, renders it into a context
//! block, and forwards prompt + context. The provider being unconfigured
//! or unreachable is a dependency failure, never a silent empty answer.

use api_types::ai::{AiAnswer, AiQuery};
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{ServerError, auth::AuthUser, server::ServerState};
use engine::FinancialSnapshot;

/// Where to reach the external completion service.
#[derive(Clone, Debug)]
pub struct AiProvider {
    pub url: String,
    pub token: Option<String>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    context: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    completion: String,
}

fn render_context(snapshot: &FinancialSnapshot) -> String {
    let mut out = String::new();

    out.push_str("Wallets (baseline balances, minor units):\n");
    for wallet in &snapshot.wallets {
        out.push_str(&format!(
            "- {}: {} {}\n",
            wallet.name,
            wallet.balance_minor,
            wallet.currency.code()
        ));
    }

    out.push_str("Recent transactions (signed minor amounts):\n");
    for tx in &snapshot.recent_transactions {
        out.push_str(&format!(
            "- {} | {} | {} {}\n",
            tx.entry_date,
            tx.description,
            tx.amount_minor,
            tx.currency.code()
        ));
    }

    out.push_str("Recent invoices:\n");
    for invoice in &snapshot.recent_invoices {
        out.push_str(&format!(
            "- {} | issued {} | {} {} | {}\n",
            invoice.number,
            invoice.issue_date,
            invoice.total_minor,
            invoice.currency.code(),
            invoice.status.as_str()
        ));
    }

    out
}

pub async fn query(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<AiQuery>,
) -> Result<Json<AiAnswer>, ServerError> {
    let prompt = payload.prompt.trim();
    if prompt.is_empty() {
        return Err(ServerError::Generic("prompt must not be empty".to_string()));
    }

    let Some(provider) = state.ai.as_ref() else {
        return Err(ServerError::Provider(
            "no completion provider configured".to_string(),
        ));
    };

    let snapshot = state.engine.financial_snapshot(&user.company_id, 50).await?;
    let context = render_context(&snapshot);

    let mut request = state.http.post(&provider.url).json(&CompletionRequest {
        prompt,
        context: &context,
    });
    if let Some(token) = provider.token.as_deref() {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|err| {
        tracing::error!("completion provider unreachable: {err}");
        ServerError::Provider("completion provider unreachable".to_string())
    })?;
    if !response.status().is_success() {
        tracing::error!(status = %response.status(), "completion provider returned an error");
        return Err(ServerError::Provider(
            "completion provider returned an error".to_string(),
        ));
    }

    let body: CompletionResponse = response.json().await.map_err(|err| {
        tracing::error!("invalid completion provider response: {err}");
        ServerError::Provider("invalid completion provider response".to_string())
    })?;

    Ok(Json(AiAnswer {
        answer: body.completion,
    }))
}
