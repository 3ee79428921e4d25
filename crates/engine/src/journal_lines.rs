use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// One side of a journal entry: a debit or a credit against an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalLine {
    pub id: Uuid,
    pub account_id: Uuid,
    pub debit_minor: i64,
    pub credit_minor: i64,
    pub note: Option<String>,
}

impl JournalLine {
    pub fn new(
        account_id: Uuid,
        debit_minor: i64,
        credit_minor: i64,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            debit_minor,
            credit_minor,
            note,
        }
    }
}

#[derive(Clone, Debug)]
pub struct JournalLineDraft {
    pub account_id: Uuid,
    pub debit_minor: i64,
    pub credit_minor: i64,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "journal_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub entry_id: String,
    pub account_id: String,
    pub debit_minor: i64,
    pub credit_minor: i64,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::EntryId",
        to = "super::journal_entries::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    JournalEntries,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Accounts,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&JournalLine> for ActiveModel {
    fn from(value: &JournalLine) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            entry_id: ActiveValue::NotSet,
            account_id: ActiveValue::Set(value.account_id.to_string()),
            debit_minor: ActiveValue::Set(value.debit_minor),
            credit_minor: ActiveValue::Set(value.credit_minor),
            note: ActiveValue::Set(value.note.clone()),
        }
    }
}

impl TryFrom<Model> for JournalLine {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("journal line not exists".to_string()))?,
            account_id: Uuid::parse_str(&model.account_id)
                .map_err(|_| EngineError::KeyNotFound("account not exists".to_string()))?,
            debit_minor: model.debit_minor,
            credit_minor: model.credit_minor,
            note: model.note,
        })
    }
}
