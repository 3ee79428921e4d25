//! Application users.
//!
//! Credentials are stored as provided; hashing and session issuance belong
//! to the external auth service. The engine never reads `password` back
//! into a domain value.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Clone, Debug)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    /// Required on create; `None` on update keeps the stored credential.
    pub password: Option<String>,
    pub role: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("user not exists".to_string()))?,
            name: model.name,
            email: model.email,
            role: model.role,
        })
    }
}
