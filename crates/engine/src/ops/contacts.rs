use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Contact, ContactDraft, EngineError, ResultEngine, contacts};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

impl Engine {
    pub async fn list_contacts(&self, company_id: &str) -> ResultEngine<Vec<Contact>> {
        let models = contacts::Entity::find()
            .filter(contacts::Column::CompanyId.eq(company_id))
            .order_by_asc(contacts::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Contact::try_from).collect()
    }

    pub async fn create_contact(
        &self,
        company_id: &str,
        draft: ContactDraft,
    ) -> ResultEngine<Contact> {
        let name = normalize_required_text(&draft.name, "contact name")?;
        let email = normalize_optional_text(draft.email.as_deref());
        let phone = normalize_optional_text(draft.phone.as_deref());
        with_tx!(self, |db_tx| {
            let contact = Contact::new(name, email, phone, draft.kind, draft.stage.unwrap_or_default());
            let mut model = contacts::ActiveModel::from(&contact);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(contact)
        })
    }

    pub async fn update_contact(
        &self,
        company_id: &str,
        contact_id: Uuid,
        draft: ContactDraft,
    ) -> ResultEngine<Contact> {
        let name = normalize_required_text(&draft.name, "contact name")?;
        let email = normalize_optional_text(draft.email.as_deref());
        let phone = normalize_optional_text(draft.phone.as_deref());
        with_tx!(self, |db_tx| {
            let current = self
                .require_contact_in_company(&db_tx, company_id, contact_id)
                .await?;
            let stage = match draft.stage {
                Some(stage) => stage,
                None => crate::PipelineStage::try_from(current.stage.as_str())?,
            };

            let active = contacts::ActiveModel {
                id: ActiveValue::Set(contact_id.to_string()),
                name: ActiveValue::Set(name.clone()),
                email: ActiveValue::Set(email.clone()),
                phone: ActiveValue::Set(phone.clone()),
                kind: ActiveValue::Set(draft.kind.as_str().to_string()),
                stage: ActiveValue::Set(stage.as_str().to_string()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Contact {
                id: contact_id,
                name,
                email,
                phone,
                kind: draft.kind,
                stage,
            })
        })
    }

    pub async fn delete_contact(&self, company_id: &str, contact_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = contacts::Entity::delete_many()
                .filter(contacts::Column::Id.eq(contact_id.to_string()))
                .filter(contacts::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("contact not exists".to_string()));
            }
            Ok(())
        })
    }
}
