use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, User, UserDraft, users};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    pub async fn list_users(&self, company_id: &str) -> ResultEngine<Vec<User>> {
        let models = users::Entity::find()
            .filter(users::Column::CompanyId.eq(company_id))
            .order_by_asc(users::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(User::try_from).collect()
    }

    pub async fn create_user(&self, company_id: &str, draft: UserDraft) -> ResultEngine<User> {
        let name = normalize_required_text(&draft.name, "user name")?;
        let email = normalize_required_text(&draft.email, "user email")?;
        let role = normalize_required_text(&draft.role, "user role")?;
        let password =
            normalize_required_text(draft.password.as_deref().unwrap_or(""), "user password")?;
        with_tx!(self, |db_tx| {
            // Emails are the login identity, unique across companies.
            let exists = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(email));
            }

            let user = User {
                id: Uuid::new_v4(),
                name,
                email,
                role,
            };
            let model = users::ActiveModel {
                id: ActiveValue::Set(user.id.to_string()),
                name: ActiveValue::Set(user.name.clone()),
                email: ActiveValue::Set(user.email.clone()),
                password: ActiveValue::Set(password),
                role: ActiveValue::Set(user.role.clone()),
                company_id: ActiveValue::Set(company_id.to_string()),
            };
            model.insert(&db_tx).await?;
            Ok(user)
        })
    }

    pub async fn update_user(
        &self,
        company_id: &str,
        user_id: Uuid,
        draft: UserDraft,
    ) -> ResultEngine<User> {
        let name = normalize_required_text(&draft.name, "user name")?;
        let email = normalize_required_text(&draft.email, "user email")?;
        let role = normalize_required_text(&draft.role, "user role")?;
        with_tx!(self, |db_tx| {
            self.require_user_in_company(&db_tx, company_id, user_id)
                .await?;

            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .filter(users::Column::Id.ne(user_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(email));
            }

            let mut active = users::ActiveModel {
                id: ActiveValue::Set(user_id.to_string()),
                name: ActiveValue::Set(name.clone()),
                email: ActiveValue::Set(email.clone()),
                role: ActiveValue::Set(role.clone()),
                ..Default::default()
            };
            // Absent password keeps the stored credential.
            if let Some(password) = draft.password.as_deref() {
                active.password =
                    ActiveValue::Set(normalize_required_text(password, "user password")?);
            }
            active.update(&db_tx).await?;

            Ok(User {
                id: user_id,
                name,
                email,
                role,
            })
        })
    }

    pub async fn delete_user(&self, company_id: &str, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = users::Entity::delete_many()
                .filter(users::Column::Id.eq(user_id.to_string()))
                .filter(users::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("user not exists".to_string()));
            }
            Ok(())
        })
    }
}
