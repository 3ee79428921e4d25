use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Employee, EmployeeDraft, EngineError, ResultEngine, employees};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

impl Engine {
    pub async fn list_employees(&self, company_id: &str) -> ResultEngine<Vec<Employee>> {
        let models = employees::Entity::find()
            .filter(employees::Column::CompanyId.eq(company_id))
            .order_by_asc(employees::Column::Number)
            .all(&self.database)
            .await?;
        models.into_iter().map(Employee::try_from).collect()
    }

    pub async fn create_employee(
        &self,
        company_id: &str,
        draft: EmployeeDraft,
    ) -> ResultEngine<Employee> {
        let name = normalize_required_text(&draft.name, "employee name")?;
        let email = normalize_optional_text(draft.email.as_deref());
        let position = normalize_optional_text(draft.position.as_deref());
        with_tx!(self, |db_tx| {
            let number = self.next_sequence(&db_tx, company_id, "employee", "E").await?;
            let employee = Employee::new(number, name, email, position);
            let mut model = employees::ActiveModel::from(&employee);
            model.company_id = ActiveValue::Set(company_id.to_string());
            model.insert(&db_tx).await?;
            Ok(employee)
        })
    }

    pub async fn update_employee(
        &self,
        company_id: &str,
        employee_id: Uuid,
        draft: EmployeeDraft,
    ) -> ResultEngine<Employee> {
        let name = normalize_required_text(&draft.name, "employee name")?;
        let email = normalize_optional_text(draft.email.as_deref());
        let position = normalize_optional_text(draft.position.as_deref());
        with_tx!(self, |db_tx| {
            let current = self
                .require_employee_in_company(&db_tx, company_id, employee_id)
                .await?;

            // The assigned number is immutable; only the profile changes.
            let active = employees::ActiveModel {
                id: ActiveValue::Set(employee_id.to_string()),
                name: ActiveValue::Set(name.clone()),
                email: ActiveValue::Set(email.clone()),
                position: ActiveValue::Set(position.clone()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok(Employee {
                id: employee_id,
                number: current.number,
                name,
                email,
                position,
            })
        })
    }

    pub async fn delete_employee(&self, company_id: &str, employee_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let res = employees::Entity::delete_many()
                .filter(employees::Column::Id.eq(employee_id.to_string()))
                .filter(employees::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("employee not exists".to_string()));
            }
            Ok(())
        })
    }
}
