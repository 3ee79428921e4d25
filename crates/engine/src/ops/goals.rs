//! Goal operations, including the contribution composite.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Currency, EngineError, Goal, GoalDraft, ResultEngine, Transaction, TransactionKind, goals,
    transactions,
};

use super::{Engine, normalize_required_text, require_positive, with_tx};

/// Category stamped on transactions generated by goal contributions.
pub const INTERNAL_TRANSFER_CATEGORY: &str = "internal-transfer";

/// Result of a successful goal contribution.
#[derive(Clone, Debug)]
pub struct GoalContribution {
    pub goal: Goal,
    pub transaction: Transaction,
}

impl Engine {
    pub async fn list_goals(&self, company_id: &str) -> ResultEngine<Vec<Goal>> {
        let models = goals::Entity::find()
            .filter(goals::Column::CompanyId.eq(company_id))
            .order_by_asc(goals::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Goal::try_from).collect()
    }

    pub async fn create_goal(&self, company_id: &str, draft: GoalDraft) -> ResultEngine<Goal> {
        let name = normalize_required_text(&draft.name, "goal name")?;
        let target_minor = require_positive(draft.target_minor, "goal target")?;
        with_tx!(self, |db_tx| {
            let goal = Goal::new(name, target_minor, draft.deadline);
            let mut model = goals::ActiveModel::from(&goal);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(goal)
        })
    }

    /// Updates name/target/deadline. `current_minor` is out of reach here;
    /// it moves only through [`Engine::contribute_to_goal`].
    pub async fn update_goal(
        &self,
        company_id: &str,
        goal_id: Uuid,
        draft: GoalDraft,
    ) -> ResultEngine<Goal> {
        let name = normalize_required_text(&draft.name, "goal name")?;
        let target_minor = require_positive(draft.target_minor, "goal target")?;
        with_tx!(self, |db_tx| {
            let current = self
                .require_goal_in_company(&db_tx, company_id, goal_id)
                .await?;

            let active = goals::ActiveModel {
                id: ActiveValue::Set(goal_id.to_string()),
                name: ActiveValue::Set(name.clone()),
                target_minor: ActiveValue::Set(target_minor),
                deadline: ActiveValue::Set(draft.deadline),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Goal {
                id: goal_id,
                name,
                target_minor,
                current_minor: current.current_minor,
                deadline: draft.deadline,
            })
        })
    }

    pub async fn delete_goal(&self, company_id: &str, goal_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = goals::Entity::delete_many()
                .filter(goals::Column::Id.eq(goal_id.to_string()))
                .filter(goals::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("goal not exists".to_string()));
            }
            Ok(())
        })
    }

    /// Moves money into a goal and records the matching expense transaction.
    ///
    /// One unit of work: a failed wallet lookup or insert rolls back the
    /// `current_minor` bump. Over-funding past the target is permitted and
    /// nothing ever decrements `current_minor`.
    pub async fn contribute_to_goal(
        &self,
        company_id: &str,
        goal_id: Uuid,
        amount_minor: i64,
        wallet_id: Uuid,
    ) -> ResultEngine<GoalContribution> {
        let amount_minor = require_positive(amount_minor, "contribution amount")?;
        let today = Utc::now().date_naive();
        with_tx!(self, |db_tx| {
            let goal_model = self
                .require_goal_in_company(&db_tx, company_id, goal_id)
                .await?;
            let wallet_model = self
                .require_wallet_in_company(&db_tx, company_id, wallet_id)
                .await?;

            let new_current = goal_model.current_minor + amount_minor;
            let active = goals::ActiveModel {
                id: ActiveValue::Set(goal_id.to_string()),
                current_minor: ActiveValue::Set(new_current),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            let mut goal = Goal::try_from(goal_model)?;
            goal.current_minor = new_current;

            let currency = Currency::try_from(wallet_model.currency.as_str()).unwrap_or_default();
            let tx = Transaction::new(
                today,
                format!("Contribution to goal: {}", goal.name),
                -amount_minor.abs(),
                TransactionKind::Expense,
                Some(INTERNAL_TRANSFER_CATEGORY.to_string()),
                wallet_id,
                currency,
            );
            let mut tx_model = transactions::ActiveModel::from(&tx);
            tx_model.company_id = ActiveValue::Set(company_id.to_string());
            tx_model.insert(&db_tx).await?;

            Ok(GoalContribution {
                goal,
                transaction: tx,
            })
        })
    }
}
