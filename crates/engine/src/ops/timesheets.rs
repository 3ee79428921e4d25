use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, Timesheet, TimesheetDraft, timesheets};

use super::{Engine, normalize_optional_text, with_tx};

impl Engine {
    pub async fn list_timesheets(&self, company_id: &str) -> ResultEngine<Vec<Timesheet>> {
        let models = timesheets::Entity::find()
            .filter(timesheets::Column::CompanyId.eq(company_id))
            .order_by_desc(timesheets::Column::WorkDate)
            .all(&self.database)
            .await?;
        models.into_iter().map(Timesheet::try_from).collect()
    }

    pub async fn create_timesheet(
        &self,
        company_id: &str,
        draft: TimesheetDraft,
    ) -> ResultEngine<Timesheet> {
        if draft.minutes <= 0 {
            return Err(EngineError::Validation("minutes must be > 0".to_string()));
        }
        let note = normalize_optional_text(draft.note.as_deref());
        with_tx!(self, |db_tx| {
            self.require_employee_in_company(&db_tx, company_id, draft.employee_id)
                .await?;

            let timesheet = Timesheet::new(draft.employee_id, draft.work_date, draft.minutes, note);
            let mut model = timesheets::ActiveModel::from(&timesheet);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(timesheet)
        })
    }

    pub async fn update_timesheet(
        &self,
        company_id: &str,
        timesheet_id: Uuid,
        draft: TimesheetDraft,
    ) -> ResultEngine<Timesheet> {
        if draft.minutes <= 0 {
            return Err(EngineError::Validation("minutes must be > 0".to_string()));
        }
        let note = normalize_optional_text(draft.note.as_deref());
        with_tx!(self, |db_tx| {
            self.require_timesheet_in_company(&db_tx, company_id, timesheet_id)
                .await?;
            self.require_employee_in_company(&db_tx, company_id, draft.employee_id)
                .await?;

            let active = timesheets::ActiveModel {
                id: ActiveValue::Set(timesheet_id.to_string()),
                employee_id: ActiveValue::Set(draft.employee_id.to_string()),
                work_date: ActiveValue::Set(draft.work_date),
                minutes: ActiveValue::Set(draft.minutes),
                note: ActiveValue::Set(note.clone()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Timesheet {
                id: timesheet_id,
                employee_id: draft.employee_id,
                work_date: draft.work_date,
                minutes: draft.minutes,
                note,
            })
        })
    }

    pub async fn delete_timesheet(&self, company_id: &str, timesheet_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = timesheets::Entity::delete_many()
                .filter(timesheets::Column::Id.eq(timesheet_id.to_string()))
                .filter(timesheets::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("timesheet not exists".to_string()));
            }
            Ok(())
        })
    }
}
