use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod access;
mod accounts;
mod budgets;
mod contacts;
mod employees;
mod expense_claims;
mod goals;
mod insights;
mod invoices;
mod journal;
mod products;
mod purchase_orders;
mod timesheets;
mod transactions;
mod users;
mod wallets;

pub use expense_claims::ClaimApproval;
pub use goals::{GoalContribution, INTERNAL_TRANSFER_CATEGORY};
pub use insights::FinancialSnapshot;
pub use purchase_orders::PurchaseOrderReceipt;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The tenant-scoped core. Every operation takes the caller's `company_id`
/// (derived from the authenticated principal, never from payloads) and
/// touches only rows of that company.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn require_positive(amount_minor: i64, label: &str) -> ResultEngine<i64> {
    if amount_minor <= 0 {
        return Err(EngineError::Validation(format!("{label} must be > 0")));
    }
    Ok(amount_minor)
}

fn require_non_negative(amount_minor: i64, label: &str) -> ResultEngine<i64> {
    if amount_minor < 0 {
        return Err(EngineError::Validation(format!("{label} must be >= 0")));
    }
    Ok(amount_minor)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
