//! Double-entry journal entries.
//!
//! The balance invariant is enforced here, at the point of persistence:
//! an entry is accepted only when its debits and credits match and the
//! totals are positive. Client-side checks are a UX nicety, not a defense.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError,
    journal_lines::{JournalLine, JournalLineDraft},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub entry_date: NaiveDate,
    pub reference: Option<String>,
    pub lines: Vec<JournalLine>,
}

#[derive(Clone, Debug)]
pub struct JournalEntryDraft {
    pub entry_date: NaiveDate,
    pub reference: Option<String>,
    pub lines: Vec<JournalLineDraft>,
}

/// Checks the double-entry invariant over a set of draft lines.
///
/// Rules:
/// - every line has `debit_minor >= 0` and `credit_minor >= 0`;
/// - no line carries both a debit and a credit (a 0/0 line is degenerate
///   but tolerated);
/// - `sum(debit) == sum(credit)` across the entry and the total is `> 0`.
pub fn validate_lines(lines: &[JournalLineDraft]) -> Result<(), EngineError> {
    if lines.is_empty() {
        return Err(EngineError::Unbalanced(
            "entry must have at least one line".to_string(),
        ));
    }

    let mut total_debit: i64 = 0;
    let mut total_credit: i64 = 0;
    for line in lines {
        if line.debit_minor < 0 || line.credit_minor < 0 {
            return Err(EngineError::Validation(
                "debit and credit must not be negative".to_string(),
            ));
        }
        if line.debit_minor > 0 && line.credit_minor > 0 {
            return Err(EngineError::Validation(
                "a line must not carry both a debit and a credit".to_string(),
            ));
        }
        total_debit += line.debit_minor;
        total_credit += line.credit_minor;
    }

    if total_debit != total_credit {
        return Err(EngineError::Unbalanced(format!(
            "debits ({total_debit}) do not equal credits ({total_credit})"
        )));
    }
    if total_debit == 0 {
        return Err(EngineError::Unbalanced(
            "entry total must be positive".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub entry_date: Date,
    pub reference: Option<String>,
    pub company_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    Lines,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&JournalEntry> for ActiveModel {
    fn from(value: &JournalEntry) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            entry_date: ActiveValue::Set(value.entry_date),
            reference: ActiveValue::Set(value.reference.clone()),
            company_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for JournalEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("journal entry not exists".to_string()))?,
            entry_date: model.entry_date,
            reference: model.reference,
            lines: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(debit: i64, credit: i64) -> JournalLineDraft {
        JournalLineDraft {
            account_id: Uuid::new_v4(),
            debit_minor: debit,
            credit_minor: credit,
            note: None,
        }
    }

    #[test]
    fn balanced_entry_is_accepted() {
        assert!(validate_lines(&[line(100, 0), line(0, 100)]).is_ok());
    }

    #[test]
    fn split_balanced_entry_is_accepted() {
        assert!(validate_lines(&[line(60, 0), line(40, 0), line(0, 100)]).is_ok());
    }

    #[test]
    fn unbalanced_entry_is_rejected() {
        assert_eq!(
            validate_lines(&[line(100, 0), line(0, 90)]),
            Err(EngineError::Unbalanced(
                "debits (100) do not equal credits (90)".to_string()
            ))
        );
    }

    #[test]
    fn all_zero_entry_is_rejected() {
        assert!(matches!(
            validate_lines(&[line(0, 0), line(0, 0)]),
            Err(EngineError::Unbalanced(_))
        ));
    }

    #[test]
    fn zero_zero_line_is_tolerated_in_balanced_entry() {
        assert!(validate_lines(&[line(100, 0), line(0, 0), line(0, 100)]).is_ok());
    }

    #[test]
    fn double_sided_line_is_rejected() {
        assert!(matches!(
            validate_lines(&[line(100, 100)]),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn negative_side_is_rejected() {
        assert!(matches!(
            validate_lines(&[line(-100, 0), line(0, -100)]),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn empty_entry_is_rejected() {
        assert!(matches!(
            validate_lines(&[]),
            Err(EngineError::Unbalanced(_))
        ));
    }
}
