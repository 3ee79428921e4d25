use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{Currency, EngineError, ResultEngine, Wallet, wallets};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    pub async fn list_wallets(&self, company_id: &str) -> ResultEngine<Vec<Wallet>> {
        let models = wallets::Entity::find()
            .filter(wallets::Column::CompanyId.eq(company_id))
            .order_by_asc(wallets::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Wallet::try_from).collect()
    }

    /// Add a new wallet. The name must be unique within the company
    /// (case-insensitive); the balance is the stored baseline.
    pub async fn create_wallet(
        &self,
        company_id: &str,
        name: &str,
        balance_minor: i64,
        currency: Currency,
    ) -> ResultEngine<Wallet> {
        let name = normalize_required_text(name, "wallet name")?;
        with_tx!(self, |db_tx| {
            let exists = wallets::Entity::find()
                .filter(wallets::Column::CompanyId.eq(company_id))
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let wallet = Wallet::new(name, balance_minor, currency);
            let mut model = wallets::ActiveModel::from(&wallet);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(wallet)
        })
    }

    pub async fn update_wallet(
        &self,
        company_id: &str,
        wallet_id: Uuid,
        name: &str,
        balance_minor: i64,
        currency: Currency,
    ) -> ResultEngine<Wallet> {
        let name = normalize_required_text(name, "wallet name")?;
        with_tx!(self, |db_tx| {
            self.require_wallet_in_company(&db_tx, company_id, wallet_id)
                .await?;

            let taken = wallets::Entity::find()
                .filter(wallets::Column::CompanyId.eq(company_id))
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .filter(wallets::Column::Id.ne(wallet_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(name));
            }

            let active = wallets::ActiveModel {
                id: ActiveValue::Set(wallet_id.to_string()),
                name: ActiveValue::Set(name.clone()),
                balance_minor: ActiveValue::Set(balance_minor),
                currency: ActiveValue::Set(currency.code().to_string()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Wallet {
                id: wallet_id,
                name,
                balance_minor,
                currency,
            })
        })
    }

    pub async fn delete_wallet(&self, company_id: &str, wallet_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = wallets::Entity::delete_many()
                .filter(wallets::Column::Id.eq(wallet_id.to_string()))
                .filter(wallets::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("wallet not exists".to_string()));
            }
            Ok(())
        })
    }
}
