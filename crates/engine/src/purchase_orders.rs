//! Purchase orders.
//!
//! Receipt is the terminal happy path: it flips the status once and
//! increments each line item's product stock exactly once. The transition
//! is guarded on the current status so a duplicate receive cannot re-apply
//! stock.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, purchase_order_items::PurchaseOrderItem};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ordered => "ordered",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the order can still be received.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Draft | Self::Ordered)
    }
}

impl TryFrom<&str> for PurchaseOrderStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(Self::Draft),
            "ordered" => Ok(Self::Ordered),
            "received" => Ok(Self::Received),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::Validation(format!(
                "invalid purchase order status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub number: String,
    pub supplier_id: Uuid,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    pub total_cost_minor: i64,
    pub items: Vec<PurchaseOrderItem>,
}

#[derive(Clone, Debug)]
pub struct PurchaseOrderItemDraft {
    pub product_id: Uuid,
    pub quantity: i64,
    pub unit_cost_minor: i64,
}

#[derive(Clone, Debug)]
pub struct PurchaseOrderDraft {
    pub supplier_id: Uuid,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    pub status: Option<PurchaseOrderStatus>,
    pub items: Vec<PurchaseOrderItemDraft>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub number: String,
    pub supplier_id: String,
    pub order_date: Date,
    pub expected_date: Option<Date>,
    pub status: String,
    pub total_cost_minor: i64,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order_items::Entity")]
    Items,
    #[sea_orm(
        belongs_to = "super::contacts::Entity",
        from = "Column::SupplierId",
        to = "super::contacts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Contacts,
}

impl Related<super::purchase_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contacts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for PurchaseOrder {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("purchase order not exists".to_string()))?,
            number: model.number,
            supplier_id: Uuid::parse_str(&model.supplier_id)
                .map_err(|_| EngineError::KeyNotFound("contact not exists".to_string()))?,
            order_date: model.order_date,
            expected_date: model.expected_date,
            status: PurchaseOrderStatus::try_from(model.status.as_str())?,
            total_cost_minor: model.total_cost_minor,
            items: Vec::new(),
        })
    }
}

impl From<&PurchaseOrder> for ActiveModel {
    fn from(value: &PurchaseOrder) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            number: ActiveValue::Set(value.number.clone()),
            supplier_id: ActiveValue::Set(value.supplier_id.to_string()),
            order_date: ActiveValue::Set(value.order_date),
            expected_date: ActiveValue::Set(value.expected_date),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            total_cost_minor: ActiveValue::Set(value.total_cost_minor),
            company_id: ActiveValue::NotSet,
        }
    }
}
