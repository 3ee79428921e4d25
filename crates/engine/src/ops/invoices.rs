use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Invoice, InvoiceDraft, ResultEngine, invoices,
};

use super::{Engine, require_non_negative, with_tx};

impl Engine {
    pub async fn list_invoices(&self, company_id: &str) -> ResultEngine<Vec<Invoice>> {
        let models = invoices::Entity::find()
            .filter(invoices::Column::CompanyId.eq(company_id))
            .order_by_desc(invoices::Column::Number)
            .all(&self.database)
            .await?;
        models.into_iter().map(Invoice::try_from).collect()
    }

    pub async fn create_invoice(
        &self,
        company_id: &str,
        draft: InvoiceDraft,
    ) -> ResultEngine<Invoice> {
        let total_minor = require_non_negative(draft.total_minor, "invoice total")?;
        with_tx!(self, |db_tx| {
            self.require_contact_in_company(&db_tx, company_id, draft.customer_id)
                .await?;

            let number = self.next_sequence(&db_tx, company_id, "invoice", "INV").await?;
            let invoice = Invoice::new(
                number,
                draft.customer_id,
                draft.issue_date,
                draft.due_date,
                draft.status.unwrap_or_default(),
                total_minor,
                draft.currency.unwrap_or_default(),
            );
            let mut model = invoices::ActiveModel::from(&invoice);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(invoice)
        })
    }

    pub async fn update_invoice(
        &self,
        company_id: &str,
        invoice_id: Uuid,
        draft: InvoiceDraft,
    ) -> ResultEngine<Invoice> {
        let total_minor = require_non_negative(draft.total_minor, "invoice total")?;
        with_tx!(self, |db_tx| {
            let current = self
                .require_invoice_in_company(&db_tx, company_id, invoice_id)
                .await?;
            self.require_contact_in_company(&db_tx, company_id, draft.customer_id)
                .await?;

            let status = draft.status.unwrap_or(crate::InvoiceStatus::try_from(
                current.status.as_str(),
            )?);
            let currency = draft
                .currency
                .unwrap_or(crate::Currency::try_from(current.currency.as_str()).unwrap_or_default());

            let active = invoices::ActiveModel {
                id: ActiveValue::Set(invoice_id.to_string()),
                customer_id: ActiveValue::Set(draft.customer_id.to_string()),
                issue_date: ActiveValue::Set(draft.issue_date),
                due_date: ActiveValue::Set(draft.due_date),
                status: ActiveValue::Set(status.as_str().to_string()),
                total_minor: ActiveValue::Set(total_minor),
                currency: ActiveValue::Set(currency.code().to_string()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Invoice {
                id: invoice_id,
                number: current.number,
                customer_id: draft.customer_id,
                issue_date: draft.issue_date,
                due_date: draft.due_date,
                status,
                total_minor,
                currency,
            })
        })
    }

    pub async fn delete_invoice(&self, company_id: &str, invoice_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = invoices::Entity::delete_many()
                .filter(invoices::Column::Id.eq(invoice_id.to_string()))
                .filter(invoices::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("invoice not exists".to_string()));
            }
            Ok(())
        })
    }
}
