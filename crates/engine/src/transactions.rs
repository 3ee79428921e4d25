//! Transaction primitives.
//!
//! A `Transaction` is a single signed movement of money against a wallet:
//! negative amounts are expenses, positive amounts income. Reimbursements
//! and goal contributions are recorded through the same table.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, EngineError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::Validation(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub entry_date: NaiveDate,
    pub description: String,
    /// Signed minor amount; the sign must agree with `kind`.
    pub amount_minor: i64,
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub wallet_id: Uuid,
    pub currency: Currency,
}

impl Transaction {
    pub fn new(
        entry_date: NaiveDate,
        description: String,
        amount_minor: i64,
        kind: TransactionKind,
        category: Option<String>,
        wallet_id: Uuid,
        currency: Currency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entry_date,
            description,
            amount_minor,
            kind,
            category,
            wallet_id,
            currency,
        }
    }
}

/// Create/update payload for a user-entered transaction.
#[derive(Clone, Debug)]
pub struct TransactionDraft {
    pub entry_date: NaiveDate,
    pub description: String,
    pub amount_minor: i64,
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub wallet_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub entry_date: Date,
    pub description: String,
    pub amount_minor: i64,
    pub kind: String,
    pub category: Option<String>,
    pub currency: String,
    pub wallet_id: String,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Wallets,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            entry_date: ActiveValue::Set(tx.entry_date),
            description: ActiveValue::Set(tx.description.clone()),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            category: ActiveValue::Set(tx.category.clone()),
            currency: ActiveValue::Set(tx.currency.code().to_string()),
            wallet_id: ActiveValue::Set(tx.wallet_id.to_string()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            entry_date: model.entry_date,
            description: model.description,
            amount_minor: model.amount_minor,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            category: model.category,
            wallet_id: Uuid::parse_str(&model.wallet_id)
                .map_err(|_| EngineError::KeyNotFound("wallet not exists".to_string()))?,
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
        })
    }
}
