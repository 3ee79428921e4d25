use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// An employee record. The human-readable `number` ("E-001") comes from the
/// per-company sequence counter and never changes after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub number: String,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
}

impl Employee {
    pub fn new(
        number: String,
        name: String,
        email: Option<String>,
        position: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            name,
            email,
            position,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub number: String,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timesheets::Entity")]
    Timesheets,
    #[sea_orm(has_many = "super::expense_claims::Entity")]
    ExpenseClaims,
}

impl Related<super::timesheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timesheets.def()
    }
}

impl Related<super::expense_claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseClaims.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Employee> for ActiveModel {
    fn from(value: &Employee) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            number: ActiveValue::Set(value.number.clone()),
            name: ActiveValue::Set(value.name.clone()),
            email: ActiveValue::Set(value.email.clone()),
            position: ActiveValue::Set(value.position.clone()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Employee {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("employee not exists".to_string()))?,
            number: model.number,
            name: model.name,
            email: model.email,
            position: model.position,
        })
    }
}
