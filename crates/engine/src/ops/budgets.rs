use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Budget, BudgetDraft, EngineError, ResultEngine, budgets};

use super::{Engine, normalize_required_text, require_non_negative, with_tx};

impl Engine {
    pub async fn list_budgets(&self, company_id: &str) -> ResultEngine<Vec<Budget>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::CompanyId.eq(company_id))
            .order_by_asc(budgets::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Budget::try_from).collect()
    }

    pub async fn create_budget(
        &self,
        company_id: &str,
        draft: BudgetDraft,
    ) -> ResultEngine<Budget> {
        let name = normalize_required_text(&draft.name, "budget name")?;
        let category = normalize_required_text(&draft.category, "budget category")?;
        let limit_minor = require_non_negative(draft.limit_minor, "budget limit")?;
        with_tx!(self, |db_tx| {
            let budget = Budget::new(name, category, limit_minor);
            let mut model = budgets::ActiveModel::from(&budget);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(budget)
        })
    }

    pub async fn update_budget(
        &self,
        company_id: &str,
        budget_id: Uuid,
        draft: BudgetDraft,
    ) -> ResultEngine<Budget> {
        let name = normalize_required_text(&draft.name, "budget name")?;
        let category = normalize_required_text(&draft.category, "budget category")?;
        let limit_minor = require_non_negative(draft.limit_minor, "budget limit")?;
        with_tx!(self, |db_tx| {
            self.require_budget_in_company(&db_tx, company_id, budget_id)
                .await?;

            let active = budgets::ActiveModel {
                id: ActiveValue::Set(budget_id.to_string()),
                name: ActiveValue::Set(name.clone()),
                category: ActiveValue::Set(category.clone()),
                limit_minor: ActiveValue::Set(limit_minor),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Budget {
                id: budget_id,
                name,
                category,
                limit_minor,
            })
        })
    }

    pub async fn delete_budget(&self, company_id: &str, budget_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = budgets::Entity::delete_many()
                .filter(budgets::Column::Id.eq(budget_id.to_string()))
                .filter(budgets::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("budget not exists".to_string()));
            }
            Ok(())
        })
    }
}
