use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Product, ProductDraft, ProductUpdate, ResultEngine, products,
};

use super::{Engine, normalize_optional_text, normalize_required_text, require_non_negative, with_tx};

impl Engine {
    pub async fn list_products(&self, company_id: &str) -> ResultEngine<Vec<Product>> {
        let models = products::Entity::find()
            .filter(products::Column::CompanyId.eq(company_id))
            .order_by_asc(products::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Product::try_from).collect()
    }

    pub async fn create_product(
        &self,
        company_id: &str,
        draft: ProductDraft,
    ) -> ResultEngine<Product> {
        let sku = normalize_required_text(&draft.sku, "product sku")?;
        let name = normalize_required_text(&draft.name, "product name")?;
        let description = normalize_optional_text(draft.description.as_deref());
        let price_minor = require_non_negative(draft.price_minor, "product price")?;
        let cost_minor = require_non_negative(draft.cost_minor, "product cost")?;
        let stock = require_non_negative(draft.stock.unwrap_or(0), "product stock")?;
        with_tx!(self, |db_tx| {
            let exists = products::Entity::find()
                .filter(products::Column::CompanyId.eq(company_id))
                .filter(products::Column::Sku.eq(sku.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(sku));
            }

            let product = Product::new(sku, name, description, price_minor, cost_minor, stock);
            let mut model = products::ActiveModel::from(&product);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(product)
        })
    }

    /// Updates the catalog fields. Stock is deliberately absent from the
    /// payload; it moves only through purchase-order receipt.
    pub async fn update_product(
        &self,
        company_id: &str,
        product_id: Uuid,
        update: ProductUpdate,
    ) -> ResultEngine<Product> {
        let sku = normalize_required_text(&update.sku, "product sku")?;
        let name = normalize_required_text(&update.name, "product name")?;
        let description = normalize_optional_text(update.description.as_deref());
        let price_minor = require_non_negative(update.price_minor, "product price")?;
        let cost_minor = require_non_negative(update.cost_minor, "product cost")?;
        with_tx!(self, |db_tx| {
            let current = self
                .require_product_in_company(&db_tx, company_id, product_id)
                .await?;

            let taken = products::Entity::find()
                .filter(products::Column::CompanyId.eq(company_id))
                .filter(products::Column::Sku.eq(sku.clone()))
                .filter(products::Column::Id.ne(product_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(sku));
            }

            let active = products::ActiveModel {
                id: ActiveValue::Set(product_id.to_string()),
                sku: ActiveValue::Set(sku.clone()),
                name: ActiveValue::Set(name.clone()),
                description: ActiveValue::Set(description.clone()),
                price_minor: ActiveValue::Set(price_minor),
                cost_minor: ActiveValue::Set(cost_minor),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Product {
                id: product_id,
                sku,
                name,
                description,
                price_minor,
                cost_minor,
                stock: current.stock,
            })
        })
    }

    pub async fn delete_product(&self, company_id: &str, product_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = products::Entity::delete_many()
                .filter(products::Column::Id.eq(product_id.to_string()))
                .filter(products::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("product not exists".to_string()));
            }
            Ok(())
        })
    }
}
