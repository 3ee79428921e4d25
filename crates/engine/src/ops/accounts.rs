use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Account, AccountDraft, EngineError, ResultEngine, accounts};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// List the company's chart of accounts, ordered by code.
    pub async fn list_accounts(&self, company_id: &str) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::CompanyId.eq(company_id))
            .order_by_asc(accounts::Column::Code)
            .all(&self.database)
            .await?;
        models.into_iter().map(Account::try_from).collect()
    }

    pub async fn create_account(
        &self,
        company_id: &str,
        draft: AccountDraft,
    ) -> ResultEngine<Account> {
        let code = normalize_required_text(&draft.code, "account code")?;
        let name = normalize_required_text(&draft.name, "account name")?;
        with_tx!(self, |db_tx| {
            let exists = accounts::Entity::find()
                .filter(accounts::Column::CompanyId.eq(company_id))
                .filter(accounts::Column::Code.eq(code.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(code));
            }

            let account = Account::new(code, name, draft.kind);
            let mut model = accounts::ActiveModel::from(&account);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(account)
        })
    }

    pub async fn update_account(
        &self,
        company_id: &str,
        account_id: Uuid,
        draft: AccountDraft,
    ) -> ResultEngine<Account> {
        let code = normalize_required_text(&draft.code, "account code")?;
        let name = normalize_required_text(&draft.name, "account name")?;
        with_tx!(self, |db_tx| {
            self.require_account_in_company(&db_tx, company_id, account_id)
                .await?;

            let taken = accounts::Entity::find()
                .filter(accounts::Column::CompanyId.eq(company_id))
                .filter(accounts::Column::Code.eq(code.clone()))
                .filter(accounts::Column::Id.ne(account_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(code));
            }

            let active = accounts::ActiveModel {
                id: ActiveValue::Set(account_id.to_string()),
                code: ActiveValue::Set(code.clone()),
                name: ActiveValue::Set(name.clone()),
                kind: ActiveValue::Set(draft.kind.as_str().to_string()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Account {
                id: account_id,
                code,
                name,
                kind: draft.kind,
            })
        })
    }

    pub async fn delete_account(&self, company_id: &str, account_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = accounts::Entity::delete_many()
                .filter(accounts::Column::Id.eq(account_id.to_string()))
                .filter(accounts::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("account not exists".to_string()));
            }
            Ok(())
        })
    }
}
