use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// A spending budget for a category. Progress against the limit is derived
/// by clients from the transaction list, not persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub limit_minor: i64,
}

impl Budget {
    pub fn new(name: String, category: String, limit_minor: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            limit_minor,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BudgetDraft {
    pub name: String,
    pub category: String,
    pub limit_minor: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub limit_minor: i64,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(value: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            category: ActiveValue::Set(value.category.clone()),
            limit_minor: ActiveValue::Set(value.limit_minor),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            name: model.name,
            category: model.category,
            limit_minor: model.limit_minor,
        })
    }
}
