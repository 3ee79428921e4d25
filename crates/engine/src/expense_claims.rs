//! Employee expense claims.
//!
//! A claim is created `Pending` and moves exactly once to `Approved` (which
//! writes the reimbursement transaction) or `Rejected` (terminal, no side
//! effect). The transition is guarded at update time so concurrent approvals
//! cannot double-spend.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for ClaimStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(EngineError::Validation(format!(
                "invalid claim status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseClaim {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub claim_date: NaiveDate,
    pub category: String,
    /// Positive minor amount; negated when the reimbursement is written.
    pub amount_minor: i64,
    pub description: String,
    pub status: ClaimStatus,
}

impl ExpenseClaim {
    pub fn new(
        employee_id: Uuid,
        claim_date: NaiveDate,
        category: String,
        amount_minor: i64,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            claim_date,
            category,
            amount_minor,
            description,
            status: ClaimStatus::Pending,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClaimDraft {
    pub employee_id: Uuid,
    pub claim_date: NaiveDate,
    pub category: String,
    pub amount_minor: i64,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_claims")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub employee_id: String,
    pub claim_date: Date,
    pub category: String,
    pub amount_minor: i64,
    pub description: String,
    pub status: String,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Employees,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ExpenseClaim> for ActiveModel {
    fn from(value: &ExpenseClaim) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            employee_id: ActiveValue::Set(value.employee_id.to_string()),
            claim_date: ActiveValue::Set(value.claim_date),
            category: ActiveValue::Set(value.category.clone()),
            amount_minor: ActiveValue::Set(value.amount_minor),
            description: ActiveValue::Set(value.description.clone()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for ExpenseClaim {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("expense claim not exists".to_string()))?,
            employee_id: Uuid::parse_str(&model.employee_id)
                .map_err(|_| EngineError::KeyNotFound("employee not exists".to_string()))?,
            claim_date: model.claim_date,
            category: model.category,
            amount_minor: model.amount_minor,
            description: model.description,
            status: ClaimStatus::try_from(model.status.as_str())?,
        })
    }
}
