//! Financial goals.
//!
//! `current_minor` is mutated exclusively by the contribution operation and
//! only ever grows; no exposed operation decrements it.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: Option<NaiveDate>,
}

impl Goal {
    pub fn new(name: String, target_minor: i64, deadline: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            target_minor,
            current_minor: 0,
            deadline,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoalDraft {
    pub name: String,
    pub target_minor: i64,
    pub deadline: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: Option<Date>,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Goal> for ActiveModel {
    fn from(value: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            target_minor: ActiveValue::Set(value.target_minor),
            current_minor: ActiveValue::Set(value.current_minor),
            deadline: ActiveValue::Set(value.deadline),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Goal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("goal not exists".to_string()))?,
            name: model.name,
            target_minor: model.target_minor,
            current_minor: model.current_minor,
            deadline: model.deadline,
        })
    }
}
