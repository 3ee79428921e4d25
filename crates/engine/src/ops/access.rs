use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, accounts, budgets, contacts, employees, expense_claims, goals,
    invoices, journal_entries, products, purchase_orders, sequences, timesheets, transactions,
    users, wallets,
};

use super::Engine;

/// Generates a `require_<entity>_in_company` lookup for a target entity.
///
/// The dual `id AND company_id` predicate is the tenant-isolation mechanism:
/// a row owned by another company resolves to the same `KeyNotFound` as a
/// row that does not exist at all.
macro_rules! impl_company_row {
    ($require_fn:ident, $module:ident, $err_msg:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            company_id: &str,
            target_id: Uuid,
        ) -> ResultEngine<$module::Model> {
            $module::Entity::find_by_id(target_id.to_string())
                .filter($module::Column::CompanyId.eq(company_id))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_company_row!(require_account_in_company, accounts, "account not exists");

    impl_company_row!(require_budget_in_company, budgets, "budget not exists");

    impl_company_row!(require_contact_in_company, contacts, "contact not exists");

    impl_company_row!(require_employee_in_company, employees, "employee not exists");

    impl_company_row!(
        require_claim_in_company,
        expense_claims,
        "expense claim not exists"
    );

    impl_company_row!(require_goal_in_company, goals, "goal not exists");

    impl_company_row!(require_invoice_in_company, invoices, "invoice not exists");

    impl_company_row!(
        require_entry_in_company,
        journal_entries,
        "journal entry not exists"
    );

    impl_company_row!(require_product_in_company, products, "product not exists");

    impl_company_row!(
        require_order_in_company,
        purchase_orders,
        "purchase order not exists"
    );

    impl_company_row!(
        require_timesheet_in_company,
        timesheets,
        "timesheet not exists"
    );

    impl_company_row!(
        require_transaction_in_company,
        transactions,
        "transaction not exists"
    );

    impl_company_row!(require_user_in_company, users, "user not exists");

    impl_company_row!(require_wallet_in_company, wallets, "wallet not exists");

    /// Resolves the wallet a financial side effect should hit.
    ///
    /// An explicit id is validated in-company. Without one the company's
    /// single wallet is used; with several wallets the caller must pick, so
    /// the choice never depends on row order.
    pub(super) async fn resolve_wallet(
        &self,
        db: &DatabaseTransaction,
        company_id: &str,
        wallet_id: Option<Uuid>,
    ) -> ResultEngine<wallets::Model> {
        if let Some(id) = wallet_id {
            return self.require_wallet_in_company(db, company_id, id).await;
        }

        let wallet_models: Vec<wallets::Model> = wallets::Entity::find()
            .filter(wallets::Column::CompanyId.eq(company_id))
            .all(db)
            .await?;

        let mut iter = wallet_models.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| EngineError::KeyNotFound("missing wallet".to_string()))?;
        if iter.next().is_some() {
            return Err(EngineError::Validation(
                "wallet_id is required when more than one wallet exists".to_string(),
            ));
        }
        Ok(first)
    }

    /// Hands out the next human-readable number for `scope` ("E-001", ...).
    ///
    /// The counter row is bumped inside the caller's transaction; the unique
    /// index on the numbered table catches a counter that ever drifts.
    pub(super) async fn next_sequence(
        &self,
        db: &DatabaseTransaction,
        company_id: &str,
        scope: &str,
        prefix: &str,
    ) -> ResultEngine<String> {
        let current = sequences::Entity::find_by_id((company_id.to_string(), scope.to_string()))
            .one(db)
            .await?;

        let value = match current {
            Some(row) => {
                let next = sequences::ActiveModel {
                    company_id: ActiveValue::Set(row.company_id.clone()),
                    scope: ActiveValue::Set(row.scope.clone()),
                    next_value: ActiveValue::Set(row.next_value + 1),
                };
                next.update(db).await?;
                row.next_value
            }
            None => {
                let first = sequences::ActiveModel {
                    company_id: ActiveValue::Set(company_id.to_string()),
                    scope: ActiveValue::Set(scope.to_string()),
                    next_value: ActiveValue::Set(2),
                };
                first.insert(db).await?;
                1
            }
        };

        Ok(format!("{prefix}-{value:03}"))
    }
}
