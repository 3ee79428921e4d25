use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, EngineError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl TryFrom<&str> for InvoiceStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            other => Err(EngineError::Validation(format!(
                "invalid invoice status: {other}"
            ))),
        }
    }
}

/// A customer invoice. `number` ("INV-001") comes from the per-company
/// sequence counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub customer_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub total_minor: i64,
    pub currency: Currency,
}

impl Invoice {
    pub fn new(
        number: String,
        customer_id: Uuid,
        issue_date: NaiveDate,
        due_date: Option<NaiveDate>,
        status: InvoiceStatus,
        total_minor: i64,
        currency: Currency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            customer_id,
            issue_date,
            due_date,
            status,
            total_minor,
            currency,
        }
    }
}

#[derive(Clone, Debug)]
pub struct InvoiceDraft {
    pub customer_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub total_minor: i64,
    pub currency: Option<Currency>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub issue_date: Date,
    pub due_date: Option<Date>,
    pub status: String,
    pub total_minor: i64,
    pub currency: String,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contacts::Entity",
        from = "Column::CustomerId",
        to = "super::contacts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Contacts,
}

impl Related<super::contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contacts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Invoice> for ActiveModel {
    fn from(value: &Invoice) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            number: ActiveValue::Set(value.number.clone()),
            customer_id: ActiveValue::Set(value.customer_id.to_string()),
            issue_date: ActiveValue::Set(value.issue_date),
            due_date: ActiveValue::Set(value.due_date),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            total_minor: ActiveValue::Set(value.total_minor),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Invoice {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("invoice not exists".to_string()))?,
            number: model.number,
            customer_id: Uuid::parse_str(&model.customer_id)
                .map_err(|_| EngineError::KeyNotFound("contact not exists".to_string()))?,
            issue_date: model.issue_date,
            due_date: model.due_date,
            status: InvoiceStatus::try_from(model.status.as_str())?,
            total_minor: model.total_minor,
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
        })
    }
}
