//! Purchase order operations, including the receipt composite.

use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    EngineError, Product, PurchaseOrder, PurchaseOrderDraft, PurchaseOrderItem,
    PurchaseOrderItemDraft, PurchaseOrderStatus, ResultEngine, products, purchase_order_items,
    purchase_orders,
};

use super::{Engine, require_non_negative, require_positive, with_tx};

/// Result of a successful purchase order receipt.
#[derive(Clone, Debug)]
pub struct PurchaseOrderReceipt {
    pub purchase_order: PurchaseOrder,
    pub updated_products: Vec<Product>,
    /// Line-item products that vanished before receipt. Their stock was not
    /// incremented; reported instead of silently skipped.
    pub missing_products: Vec<Uuid>,
}

fn validate_items(items: &[PurchaseOrderItemDraft]) -> ResultEngine<i64> {
    if items.is_empty() {
        return Err(EngineError::Validation(
            "purchase order must have at least one line item".to_string(),
        ));
    }
    let mut total: i64 = 0;
    for item in items {
        require_positive(item.quantity, "line item quantity")?;
        require_non_negative(item.unit_cost_minor, "line item unit cost")?;
        total += item.quantity * item.unit_cost_minor;
    }
    Ok(total)
}

impl Engine {
    async fn load_items(
        &self,
        db: &sea_orm::DatabaseTransaction,
        order_id: Uuid,
    ) -> ResultEngine<Vec<PurchaseOrderItem>> {
        let models = purchase_order_items::Entity::find()
            .filter(purchase_order_items::Column::PurchaseOrderId.eq(order_id.to_string()))
            .all(db)
            .await?;
        models.into_iter().map(PurchaseOrderItem::try_from).collect()
    }

    pub async fn list_purchase_orders(&self, company_id: &str) -> ResultEngine<Vec<PurchaseOrder>> {
        let order_models = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::CompanyId.eq(company_id))
            .order_by_desc(purchase_orders::Column::Number)
            .all(&self.database)
            .await?;
        if order_models.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<String> = order_models.iter().map(|m| m.id.clone()).collect();
        let item_models = purchase_order_items::Entity::find()
            .filter(purchase_order_items::Column::PurchaseOrderId.is_in(order_ids))
            .all(&self.database)
            .await?;

        let mut items_by_order: HashMap<String, Vec<PurchaseOrderItem>> = HashMap::new();
        for model in item_models {
            let order_id = model.purchase_order_id.clone();
            items_by_order
                .entry(order_id)
                .or_default()
                .push(PurchaseOrderItem::try_from(model)?);
        }

        let mut out = Vec::with_capacity(order_models.len());
        for model in order_models {
            let key = model.id.clone();
            let mut order = PurchaseOrder::try_from(model)?;
            order.items = items_by_order.remove(&key).unwrap_or_default();
            out.push(order);
        }
        Ok(out)
    }

    pub async fn create_purchase_order(
        &self,
        company_id: &str,
        draft: PurchaseOrderDraft,
    ) -> ResultEngine<PurchaseOrder> {
        let total_cost_minor = validate_items(&draft.items)?;
        let status = draft.status.unwrap_or_default();
        if status == PurchaseOrderStatus::Received {
            return Err(EngineError::Validation(
                "a purchase order cannot be created as received".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            self.require_contact_in_company(&db_tx, company_id, draft.supplier_id)
                .await?;
            for item in &draft.items {
                self.require_product_in_company(&db_tx, company_id, item.product_id)
                    .await?;
            }

            let number = self
                .next_sequence(&db_tx, company_id, "purchase_order", "PO")
                .await?;
            let order = PurchaseOrder {
                id: Uuid::new_v4(),
                number,
                supplier_id: draft.supplier_id,
                order_date: draft.order_date,
                expected_date: draft.expected_date,
                status,
                total_cost_minor,
                items: draft
                    .items
                    .iter()
                    .map(|item| {
                        PurchaseOrderItem::new(item.product_id, item.quantity, item.unit_cost_minor)
                    })
                    .collect(),
            };

            let mut order_model = purchase_orders::ActiveModel::from(&order);
            order_model.company_id = ActiveValue::Set(company_id.to_string());
            order_model.insert(&db_tx).await?;

            for item in &order.items {
                let mut item_model = purchase_order_items::ActiveModel::from(item);
                item_model.purchase_order_id = ActiveValue::Set(order.id.to_string());
                item_model.insert(&db_tx).await?;
            }

            Ok(order)
        })
    }

    /// Replaces the header and line items of an open order. Received and
    /// cancelled orders are frozen; their items back the stock history.
    pub async fn update_purchase_order(
        &self,
        company_id: &str,
        order_id: Uuid,
        draft: PurchaseOrderDraft,
    ) -> ResultEngine<PurchaseOrder> {
        let total_cost_minor = validate_items(&draft.items)?;
        with_tx!(self, |db_tx| {
            let current = self
                .require_order_in_company(&db_tx, company_id, order_id)
                .await?;
            let current_status = PurchaseOrderStatus::try_from(current.status.as_str())?;
            if !current_status.is_open() {
                return Err(EngineError::InvalidState(format!(
                    "purchase order is {}, only draft or ordered orders can be edited",
                    current.status
                )));
            }
            let status = draft.status.unwrap_or(current_status);
            if status == PurchaseOrderStatus::Received {
                return Err(EngineError::InvalidState(
                    "receiving goes through the receive operation".to_string(),
                ));
            }
            self.require_contact_in_company(&db_tx, company_id, draft.supplier_id)
                .await?;
            for item in &draft.items {
                self.require_product_in_company(&db_tx, company_id, item.product_id)
                    .await?;
            }

            let active = purchase_orders::ActiveModel {
                id: ActiveValue::Set(order_id.to_string()),
                supplier_id: ActiveValue::Set(draft.supplier_id.to_string()),
                order_date: ActiveValue::Set(draft.order_date),
                expected_date: ActiveValue::Set(draft.expected_date),
                status: ActiveValue::Set(status.as_str().to_string()),
                total_cost_minor: ActiveValue::Set(total_cost_minor),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            purchase_order_items::Entity::delete_many()
                .filter(purchase_order_items::Column::PurchaseOrderId.eq(order_id.to_string()))
                .exec(&db_tx)
                .await?;

            let items: Vec<PurchaseOrderItem> = draft
                .items
                .iter()
                .map(|item| {
                    PurchaseOrderItem::new(item.product_id, item.quantity, item.unit_cost_minor)
                })
                .collect();
            for item in &items {
                let mut item_model = purchase_order_items::ActiveModel::from(item);
                item_model.purchase_order_id = ActiveValue::Set(order_id.to_string());
                item_model.insert(&db_tx).await?;
            }

            Ok(PurchaseOrder {
                id: order_id,
                number: current.number,
                supplier_id: draft.supplier_id,
                order_date: draft.order_date,
                expected_date: draft.expected_date,
                status,
                total_cost_minor,
                items,
            })
        })
    }

    pub async fn delete_purchase_order(
        &self,
        company_id: &str,
        order_id: Uuid,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_order_in_company(&db_tx, company_id, order_id)
                .await?;

            purchase_order_items::Entity::delete_many()
                .filter(purchase_order_items::Column::PurchaseOrderId.eq(order_id.to_string()))
                .exec(&db_tx)
                .await?;
            purchase_orders::Entity::delete_many()
                .filter(purchase_orders::Column::Id.eq(order_id.to_string()))
                .filter(purchase_orders::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Receives an open order: flips the status and increments each line
    /// item's product stock by its quantity, exactly once, in one unit of
    /// work. A second receive finds zero receivable rows and fails as a
    /// conflict with stock untouched.
    pub async fn receive_purchase_order(
        &self,
        company_id: &str,
        order_id: Uuid,
    ) -> ResultEngine<PurchaseOrderReceipt> {
        with_tx!(self, |db_tx| {
            let flipped = purchase_orders::Entity::update_many()
                .col_expr(
                    purchase_orders::Column::Status,
                    Expr::value(PurchaseOrderStatus::Received.as_str()),
                )
                .filter(purchase_orders::Column::Id.eq(order_id.to_string()))
                .filter(purchase_orders::Column::CompanyId.eq(company_id))
                .filter(purchase_orders::Column::Status.is_in([
                    PurchaseOrderStatus::Draft.as_str(),
                    PurchaseOrderStatus::Ordered.as_str(),
                ]))
                .exec(&db_tx)
                .await?
                .rows_affected;
            if flipped == 0 {
                let current = purchase_orders::Entity::find_by_id(order_id.to_string())
                    .filter(purchase_orders::Column::CompanyId.eq(company_id))
                    .one(&db_tx)
                    .await?;
                return Err(match current {
                    Some(model) => EngineError::InvalidState(format!(
                        "purchase order is {}, only draft or ordered orders can be received",
                        model.status
                    )),
                    None => EngineError::KeyNotFound("purchase order not exists".to_string()),
                });
            }

            let order_model = purchase_orders::Entity::find_by_id(order_id.to_string())
                .filter(purchase_orders::Column::CompanyId.eq(company_id))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("purchase order not exists".to_string()))?;
            let mut order = PurchaseOrder::try_from(order_model)?;
            order.items = self.load_items(&db_tx, order_id).await?;

            let mut updated_products = Vec::new();
            let mut missing_products = Vec::new();
            for item in &order.items {
                let product_model = products::Entity::find_by_id(item.product_id.to_string())
                    .filter(products::Column::CompanyId.eq(company_id))
                    .one(&db_tx)
                    .await?;
                match product_model {
                    Some(model) => {
                        let new_stock = model.stock + item.quantity;
                        let active = products::ActiveModel {
                            id: ActiveValue::Set(model.id.clone()),
                            stock: ActiveValue::Set(new_stock),
                            ..Default::default()
                        };
                        active.update(&db_tx).await?;

                        let mut product = Product::try_from(model)?;
                        product.stock = new_stock;
                        updated_products.push(product);
                    }
                    None => {
                        tracing::warn!(
                            product_id = %item.product_id,
                            purchase_order = %order.number,
                            "line item product no longer exists; stock not incremented"
                        );
                        missing_products.push(item.product_id);
                    }
                }
            }

            Ok(PurchaseOrderReceipt {
                purchase_order: order,
                updated_products,
                missing_products,
            })
        })
    }
}
