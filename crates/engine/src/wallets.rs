//! The module contains the `Wallet` struct and its persistence model.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError};

/// A wallet.
///
/// A wallet is a representation of a real wallet, a bank account or anything
/// else where money is kept. `balance_minor` is the stored baseline; the
/// effective balance additionally includes the signed amounts of all
/// transactions referencing the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wallet {
    /// Stable identifier, generated once and persisted so the wallet can be
    /// renamed without breaking references.
    pub id: Uuid,
    pub name: String,
    pub balance_minor: i64,
    pub currency: Currency,
}

impl Wallet {
    pub fn new(name: String, balance_minor: i64, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            balance_minor,
            currency,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub balance_minor: i64,
    pub currency: String,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Wallet> for ActiveModel {
    fn from(value: &Wallet) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            balance_minor: ActiveValue::Set(value.balance_minor),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Wallet {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("wallet not exists".to_string()))?,
            name: model.name,
            balance_minor: model.balance_minor,
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
        })
    }
}
