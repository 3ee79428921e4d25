//! CRM contacts: customers, suppliers and pipeline leads.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Customer,
    Supplier,
    Lead,
}

impl ContactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::Lead => "lead",
        }
    }
}

impl TryFrom<&str> for ContactKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "customer" => Ok(Self::Customer),
            "supplier" => Ok(Self::Supplier),
            "lead" => Ok(Self::Lead),
            other => Err(EngineError::Validation(format!(
                "invalid contact kind: {other}"
            ))),
        }
    }
}

/// Sales pipeline stage; clients render one kanban column per stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    #[default]
    Lead,
    Contacted,
    Proposal,
    Won,
    Lost,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Contacted => "contacted",
            Self::Proposal => "proposal",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl TryFrom<&str> for PipelineStage {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "lead" => Ok(Self::Lead),
            "contacted" => Ok(Self::Contacted),
            "proposal" => Ok(Self::Proposal),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            other => Err(EngineError::Validation(format!(
                "invalid pipeline stage: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: ContactKind,
    pub stage: PipelineStage,
}

impl Contact {
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        kind: ContactKind,
        stage: PipelineStage,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            kind,
            stage,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContactDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: ContactKind,
    pub stage: Option<PipelineStage>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: String,
    pub stage: String,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Contact> for ActiveModel {
    fn from(value: &Contact) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            email: ActiveValue::Set(value.email.clone()),
            phone: ActiveValue::Set(value.phone.clone()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            stage: ActiveValue::Set(value.stage.as_str().to_string()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Contact {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("contact not exists".to_string()))?,
            name: model.name,
            email: model.email,
            phone: model.phone,
            kind: ContactKind::try_from(model.kind.as_str())?,
            stage: PipelineStage::try_from(model.stage.as_str())?,
        })
    }
}
