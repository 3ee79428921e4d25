use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Currency, EngineError, ResultEngine, Transaction, TransactionDraft, TransactionKind,
    transactions,
};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

/// The stored amount is signed; its sign must agree with the kind so that
/// derived balances and income/expense totals stay coherent.
fn validate_signed_amount(amount_minor: i64, kind: TransactionKind) -> ResultEngine<()> {
    match kind {
        _ if amount_minor == 0 => Err(EngineError::Validation(
            "amount must not be 0".to_string(),
        )),
        TransactionKind::Income if amount_minor < 0 => Err(EngineError::Validation(
            "income amount must be positive".to_string(),
        )),
        TransactionKind::Expense if amount_minor > 0 => Err(EngineError::Validation(
            "expense amount must be negative".to_string(),
        )),
        _ => Ok(()),
    }
}

impl Engine {
    pub async fn list_transactions(&self, company_id: &str) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::CompanyId.eq(company_id))
            .order_by_desc(transactions::Column::EntryDate)
            .all(&self.database)
            .await?;
        models.into_iter().map(Transaction::try_from).collect()
    }

    pub async fn create_transaction(
        &self,
        company_id: &str,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let description = normalize_required_text(&draft.description, "description")?;
        validate_signed_amount(draft.amount_minor, draft.kind)?;
        let category = normalize_optional_text(draft.category.as_deref());
        with_tx!(self, |db_tx| {
            let wallet_model = self
                .require_wallet_in_company(&db_tx, company_id, draft.wallet_id)
                .await?;
            let currency = Currency::try_from(wallet_model.currency.as_str()).unwrap_or_default();

            let tx = Transaction::new(
                draft.entry_date,
                description,
                draft.amount_minor,
                draft.kind,
                category,
                draft.wallet_id,
                currency,
            );
            let mut model = transactions::ActiveModel::from(&tx);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(tx)
        })
    }

    pub async fn update_transaction(
        &self,
        company_id: &str,
        transaction_id: Uuid,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let description = normalize_required_text(&draft.description, "description")?;
        validate_signed_amount(draft.amount_minor, draft.kind)?;
        let category = normalize_optional_text(draft.category.as_deref());
        with_tx!(self, |db_tx| {
            self.require_transaction_in_company(&db_tx, company_id, transaction_id)
                .await?;
            let wallet_model = self
                .require_wallet_in_company(&db_tx, company_id, draft.wallet_id)
                .await?;
            let currency = Currency::try_from(wallet_model.currency.as_str()).unwrap_or_default();

            let active = transactions::ActiveModel {
                id: ActiveValue::Set(transaction_id.to_string()),
                entry_date: ActiveValue::Set(draft.entry_date),
                description: ActiveValue::Set(description.clone()),
                amount_minor: ActiveValue::Set(draft.amount_minor),
                kind: ActiveValue::Set(draft.kind.as_str().to_string()),
                category: ActiveValue::Set(category.clone()),
                currency: ActiveValue::Set(currency.code().to_string()),
                wallet_id: ActiveValue::Set(draft.wallet_id.to_string()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Transaction {
                id: transaction_id,
                entry_date: draft.entry_date,
                description,
                amount_minor: draft.amount_minor,
                kind: draft.kind,
                category,
                wallet_id: draft.wallet_id,
                currency,
            })
        })
    }

    pub async fn delete_transaction(
        &self,
        company_id: &str,
        transaction_id: Uuid,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = transactions::Entity::delete_many()
                .filter(transactions::Column::Id.eq(transaction_id.to_string()))
                .filter(transactions::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(
                    "transaction not exists".to_string(),
                ));
            }
            Ok(())
        })
    }
}
