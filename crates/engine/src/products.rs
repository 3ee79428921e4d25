//! Inventory products.
//!
//! `stock` is only ever incremented by purchase-order receipt; regular
//! product updates cannot touch it.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i64,
    pub cost_minor: i64,
    pub stock: i64,
}

impl Product {
    pub fn new(
        sku: String,
        name: String,
        description: Option<String>,
        price_minor: i64,
        cost_minor: i64,
        stock: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku,
            name,
            description,
            price_minor,
            cost_minor,
            stock,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i64,
    pub cost_minor: i64,
    /// Opening stock at creation; defaults to 0.
    pub stock: Option<i64>,
}

/// Update payload; stock moves only via purchase-order receipt.
#[derive(Clone, Debug)]
pub struct ProductUpdate {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i64,
    pub cost_minor: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i64,
    pub cost_minor: i64,
    pub stock: i64,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order_items::Entity")]
    PurchaseOrderItems,
}

impl Related<super::purchase_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Product> for ActiveModel {
    fn from(value: &Product) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            sku: ActiveValue::Set(value.sku.clone()),
            name: ActiveValue::Set(value.name.clone()),
            description: ActiveValue::Set(value.description.clone()),
            price_minor: ActiveValue::Set(value.price_minor),
            cost_minor: ActiveValue::Set(value.cost_minor),
            stock: ActiveValue::Set(value.stock),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Product {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("product not exists".to_string()))?,
            sku: model.sku,
            name: model.name,
            description: model.description,
            price_minor: model.price_minor,
            cost_minor: model.cost_minor,
            stock: model.stock,
        })
    }
}
