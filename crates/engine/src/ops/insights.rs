//! Tenant-scoped context gathering for the AI assistant.
//!
//! The snapshot reads go through the same company predicate as every other
//! list; the assistant never sees another tenant's rows.

use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    Invoice, ResultEngine, Transaction, Wallet, invoices, transactions, wallets,
};

use super::Engine;

/// The financial context forwarded to the external completion provider.
#[derive(Clone, Debug)]
pub struct FinancialSnapshot {
    pub wallets: Vec<Wallet>,
    pub recent_transactions: Vec<Transaction>,
    pub recent_invoices: Vec<Invoice>,
}

impl Engine {
    pub async fn financial_snapshot(
        &self,
        company_id: &str,
        transaction_limit: u64,
    ) -> ResultEngine<FinancialSnapshot> {
        let wallet_models = wallets::Entity::find()
            .filter(wallets::Column::CompanyId.eq(company_id))
            .order_by_asc(wallets::Column::Name)
            .all(&self.database)
            .await?;
        let wallets = wallet_models
            .into_iter()
            .map(Wallet::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        let tx_models = transactions::Entity::find()
            .filter(transactions::Column::CompanyId.eq(company_id))
            .order_by_desc(transactions::Column::EntryDate)
            .limit(transaction_limit)
            .all(&self.database)
            .await?;
        let recent_transactions = tx_models
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        let invoice_models = invoices::Entity::find()
            .filter(invoices::Column::CompanyId.eq(company_id))
            .order_by_desc(invoices::Column::IssueDate)
            .limit(transaction_limit)
            .all(&self.database)
            .await?;
        let recent_invoices = invoice_models
            .into_iter()
            .map(Invoice::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(FinancialSnapshot {
            wallets,
            recent_transactions,
            recent_invoices,
        })
    }
}
