use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// A single line of a purchase order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseOrderItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    pub unit_cost_minor: i64,
}

impl PurchaseOrderItem {
    pub fn new(product_id: Uuid, quantity: i64, unit_cost_minor: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            unit_cost_minor,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub purchase_order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_cost_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_orders::Entity",
        from = "Column::PurchaseOrderId",
        to = "super::purchase_orders::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PurchaseOrders,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Products,
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PurchaseOrderItem> for ActiveModel {
    fn from(value: &PurchaseOrderItem) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            purchase_order_id: ActiveValue::NotSet,
            product_id: ActiveValue::Set(value.product_id.to_string()),
            quantity: ActiveValue::Set(value.quantity),
            unit_cost_minor: ActiveValue::Set(value.unit_cost_minor),
        }
    }
}

impl TryFrom<Model> for PurchaseOrderItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("purchase order item not exists".to_string()))?,
            product_id: Uuid::parse_str(&model.product_id)
                .map_err(|_| EngineError::KeyNotFound("product not exists".to_string()))?,
            quantity: model.quantity,
            unit_cost_minor: model.unit_cost_minor,
        })
    }
}
