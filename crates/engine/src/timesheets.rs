use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// A single day's worked time for an employee, in minutes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timesheet {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub minutes: i32,
    pub note: Option<String>,
}

impl Timesheet {
    pub fn new(
        employee_id: Uuid,
        work_date: NaiveDate,
        minutes: i32,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            work_date,
            minutes,
            note,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TimesheetDraft {
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub minutes: i32,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timesheets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub employee_id: String,
    pub work_date: Date,
    pub minutes: i32,
    pub note: Option<String>,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Employees,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Timesheet> for ActiveModel {
    fn from(value: &Timesheet) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            employee_id: ActiveValue::Set(value.employee_id.to_string()),
            work_date: ActiveValue::Set(value.work_date),
            minutes: ActiveValue::Set(value.minutes),
            note: ActiveValue::Set(value.note.clone()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Timesheet {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("timesheet not exists".to_string()))?,
            employee_id: Uuid::parse_str(&model.employee_id)
                .map_err(|_| EngineError::KeyNotFound("employee not exists".to_string()))?,
            work_date: model.work_date,
            minutes: model.minutes,
            note: model.note,
        })
    }
}
