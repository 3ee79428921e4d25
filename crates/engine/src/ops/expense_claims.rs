//! Expense claim operations.
//!
//! Approval is the first of the three composite financial operations: a
//! status transition plus a reimbursement transaction, committed as one
//! unit of work. The transition is conditioned on the current status so a
//! concurrent or repeated approval affects zero rows and fails as a
//! conflict instead of double-spending.

use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    ClaimDraft, ClaimStatus, Currency, EngineError, ExpenseClaim, ResultEngine, Transaction,
    TransactionKind, expense_claims, transactions,
};

use super::{Engine, normalize_required_text, require_positive, with_tx};

/// Result of a successful claim approval.
#[derive(Clone, Debug)]
pub struct ClaimApproval {
    pub claim: ExpenseClaim,
    pub transaction: Transaction,
}

impl Engine {
    pub async fn list_claims(&self, company_id: &str) -> ResultEngine<Vec<ExpenseClaim>> {
        let models = expense_claims::Entity::find()
            .filter(expense_claims::Column::CompanyId.eq(company_id))
            .order_by_desc(expense_claims::Column::ClaimDate)
            .all(&self.database)
            .await?;
        models.into_iter().map(ExpenseClaim::try_from).collect()
    }

    pub async fn create_claim(
        &self,
        company_id: &str,
        draft: ClaimDraft,
    ) -> ResultEngine<ExpenseClaim> {
        let category = normalize_required_text(&draft.category, "claim category")?;
        let description = normalize_required_text(&draft.description, "claim description")?;
        let amount_minor = require_positive(draft.amount_minor, "claim amount")?;
        with_tx!(self, |db_tx| {
            self.require_employee_in_company(&db_tx, company_id, draft.employee_id)
                .await?;

            let claim = ExpenseClaim::new(
                draft.employee_id,
                draft.claim_date,
                category,
                amount_minor,
                description,
            );
            let mut model = expense_claims::ActiveModel::from(&claim);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(claim)
        })
    }

    /// Updates a claim's details. Only pending claims can change; approved
    /// and rejected claims are part of the financial record.
    pub async fn update_claim(
        &self,
        company_id: &str,
        claim_id: Uuid,
        draft: ClaimDraft,
    ) -> ResultEngine<ExpenseClaim> {
        let category = normalize_required_text(&draft.category, "claim category")?;
        let description = normalize_required_text(&draft.description, "claim description")?;
        let amount_minor = require_positive(draft.amount_minor, "claim amount")?;
        with_tx!(self, |db_tx| {
            let current = self
                .require_claim_in_company(&db_tx, company_id, claim_id)
                .await?;
            if ClaimStatus::try_from(current.status.as_str())? != ClaimStatus::Pending {
                return Err(EngineError::InvalidState(format!(
                    "claim is {}, only pending claims can be edited",
                    current.status
                )));
            }
            self.require_employee_in_company(&db_tx, company_id, draft.employee_id)
                .await?;

            let active = expense_claims::ActiveModel {
                id: ActiveValue::Set(claim_id.to_string()),
                employee_id: ActiveValue::Set(draft.employee_id.to_string()),
                claim_date: ActiveValue::Set(draft.claim_date),
                category: ActiveValue::Set(category.clone()),
                amount_minor: ActiveValue::Set(amount_minor),
                description: ActiveValue::Set(description.clone()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(ExpenseClaim {
                id: claim_id,
                employee_id: draft.employee_id,
                claim_date: draft.claim_date,
                category,
                amount_minor,
                description,
                status: ClaimStatus::Pending,
            })
        })
    }

    pub async fn delete_claim(&self, company_id: &str, claim_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = expense_claims::Entity::delete_many()
                .filter(expense_claims::Column::Id.eq(claim_id.to_string()))
                .filter(expense_claims::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(
                    "expense claim not exists".to_string(),
                ));
            }
            Ok(())
        })
    }

    /// Approves a pending claim and writes the reimbursement transaction.
    ///
    /// Both mutations commit together: if the wallet lookup or the insert
    /// fails, the status flip rolls back and the claim stays pending.
    /// `wallet_id` may be omitted when the company has exactly one wallet.
    pub async fn approve_claim(
        &self,
        company_id: &str,
        claim_id: Uuid,
        wallet_id: Option<Uuid>,
    ) -> ResultEngine<ClaimApproval> {
        let today = Utc::now().date_naive();
        with_tx!(self, |db_tx| {
            let flipped = expense_claims::Entity::update_many()
                .col_expr(
                    expense_claims::Column::Status,
                    Expr::value(ClaimStatus::Approved.as_str()),
                )
                .filter(expense_claims::Column::Id.eq(claim_id.to_string()))
                .filter(expense_claims::Column::CompanyId.eq(company_id))
                .filter(expense_claims::Column::Status.eq(ClaimStatus::Pending.as_str()))
                .exec(&db_tx)
                .await?
                .rows_affected;
            if flipped == 0 {
                let current = expense_claims::Entity::find_by_id(claim_id.to_string())
                    .filter(expense_claims::Column::CompanyId.eq(company_id))
                    .one(&db_tx)
                    .await?;
                return Err(match current {
                    Some(model) => EngineError::InvalidState(format!(
                        "claim is {}, only pending claims can be approved",
                        model.status
                    )),
                    None => EngineError::KeyNotFound("expense claim not exists".to_string()),
                });
            }

            let claim_model = expense_claims::Entity::find_by_id(claim_id.to_string())
                .filter(expense_claims::Column::CompanyId.eq(company_id))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("expense claim not exists".to_string()))?;
            let claim = ExpenseClaim::try_from(claim_model)?;

            let wallet_model = self.resolve_wallet(&db_tx, company_id, wallet_id).await?;
            let resolved_wallet_id = Uuid::parse_str(&wallet_model.id)
                .map_err(|_| EngineError::KeyNotFound("wallet not exists".to_string()))?;
            let currency = Currency::try_from(wallet_model.currency.as_str()).unwrap_or_default();

            let tx = Transaction::new(
                today,
                format!("Reimbursement: {}", claim.description),
                -claim.amount_minor.abs(),
                TransactionKind::Expense,
                Some(claim.category.clone()),
                resolved_wallet_id,
                currency,
            );
            let mut tx_model = transactions::ActiveModel::from(&tx);
            tx_model.company_id = ActiveValue::Set(company_id.to_string());
            tx_model.insert(&db_tx).await?;

            Ok(ClaimApproval {
                claim,
                transaction: tx,
            })
        })
    }

    /// Rejects a pending claim. Terminal, no side effect.
    pub async fn reject_claim(
        &self,
        company_id: &str,
        claim_id: Uuid,
    ) -> ResultEngine<ExpenseClaim> {
        with_tx!(self, |db_tx| {
            let flipped = expense_claims::Entity::update_many()
                .col_expr(
                    expense_claims::Column::Status,
                    Expr::value(ClaimStatus::Rejected.as_str()),
                )
                .filter(expense_claims::Column::Id.eq(claim_id.to_string()))
                .filter(expense_claims::Column::CompanyId.eq(company_id))
                .filter(expense_claims::Column::Status.eq(ClaimStatus::Pending.as_str()))
                .exec(&db_tx)
                .await?
                .rows_affected;
            if flipped == 0 {
                let current = expense_claims::Entity::find_by_id(claim_id.to_string())
                    .filter(expense_claims::Column::CompanyId.eq(company_id))
                    .one(&db_tx)
                    .await?;
                return Err(match current {
                    Some(model) => EngineError::InvalidState(format!(
                        "claim is {}, only pending claims can be rejected",
                        model.status
                    )),
                    None => EngineError::KeyNotFound("expense claim not exists".to_string()),
                });
            }

            let claim_model = expense_claims::Entity::find_by_id(claim_id.to_string())
                .filter(expense_claims::Column::CompanyId.eq(company_id))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("expense claim not exists".to_string()))?;
            ExpenseClaim::try_from(claim_model)
        })
    }
}
