//! Journal entry operations.
//!
//! The double-entry invariant is checked by `validate_lines` before any row
//! is written; an unbalanced entry never reaches the store, regardless of
//! what the submitting client validated.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    JournalEntry, JournalEntryDraft, JournalLine, ResultEngine,
    journal_entries::{self, validate_lines},
    journal_lines,
};

use super::{Engine, with_tx};

impl Engine {
    /// Lists the company's journal, newest first, lines included.
    pub async fn list_journal_entries(&self, company_id: &str) -> ResultEngine<Vec<JournalEntry>> {
        let entry_models = journal_entries::Entity::find()
            .filter(journal_entries::Column::CompanyId.eq(company_id))
            .order_by_desc(journal_entries::Column::EntryDate)
            .all(&self.database)
            .await?;
        if entry_models.is_empty() {
            return Ok(Vec::new());
        }

        let entry_ids: Vec<String> = entry_models.iter().map(|m| m.id.clone()).collect();
        let line_models = journal_lines::Entity::find()
            .filter(journal_lines::Column::EntryId.is_in(entry_ids))
            .all(&self.database)
            .await?;

        let mut lines_by_entry: HashMap<String, Vec<JournalLine>> = HashMap::new();
        for model in line_models {
            let entry_id = model.entry_id.clone();
            lines_by_entry
                .entry(entry_id)
                .or_default()
                .push(JournalLine::try_from(model)?);
        }

        let mut out = Vec::with_capacity(entry_models.len());
        for model in entry_models {
            let key = model.id.clone();
            let mut entry = JournalEntry::try_from(model)?;
            entry.lines = lines_by_entry.remove(&key).unwrap_or_default();
            out.push(entry);
        }
        Ok(out)
    }

    async fn require_line_accounts(
        &self,
        db: &sea_orm::DatabaseTransaction,
        company_id: &str,
        draft: &JournalEntryDraft,
    ) -> ResultEngine<()> {
        let mut seen = HashSet::new();
        for line in &draft.lines {
            if seen.insert(line.account_id) {
                self.require_account_in_company(db, company_id, line.account_id)
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn create_journal_entry(
        &self,
        company_id: &str,
        draft: JournalEntryDraft,
    ) -> ResultEngine<JournalEntry> {
        validate_lines(&draft.lines)?;
        with_tx!(self, |db_tx| {
            self.require_line_accounts(&db_tx, company_id, &draft).await?;

            let entry = JournalEntry {
                id: Uuid::new_v4(),
                entry_date: draft.entry_date,
                reference: draft.reference.clone(),
                lines: draft
                    .lines
                    .iter()
                    .map(|line| {
                        JournalLine::new(
                            line.account_id,
                            line.debit_minor,
                            line.credit_minor,
                            line.note.clone(),
                        )
                    })
                    .collect(),
            };

            let mut entry_model = journal_entries::ActiveModel::from(&entry);
            entry_model.company_id = ActiveValue::Set(company_id.to_string());
            entry_model.insert(&db_tx).await?;

            for line in &entry.lines {
                let mut line_model = journal_lines::ActiveModel::from(line);
                line_model.entry_id = ActiveValue::Set(entry.id.to_string());
                line_model.insert(&db_tx).await?;
            }

            Ok(entry)
        })
    }

    /// Replaces an entry's header and lines; the replacement is re-validated
    /// against the balance invariant before anything changes.
    pub async fn update_journal_entry(
        &self,
        company_id: &str,
        entry_id: Uuid,
        draft: JournalEntryDraft,
    ) -> ResultEngine<JournalEntry> {
        validate_lines(&draft.lines)?;
        with_tx!(self, |db_tx| {
            self.require_entry_in_company(&db_tx, company_id, entry_id)
                .await?;
            self.require_line_accounts(&db_tx, company_id, &draft).await?;

            let active = journal_entries::ActiveModel {
                id: ActiveValue::Set(entry_id.to_string()),
                entry_date: ActiveValue::Set(draft.entry_date),
                reference: ActiveValue::Set(draft.reference.clone()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            journal_lines::Entity::delete_many()
                .filter(journal_lines::Column::EntryId.eq(entry_id.to_string()))
                .exec(&db_tx)
                .await?;

            let lines: Vec<JournalLine> = draft
                .lines
                .iter()
                .map(|line| {
                    JournalLine::new(
                        line.account_id,
                        line.debit_minor,
                        line.credit_minor,
                        line.note.clone(),
                    )
                })
                .collect();
            for line in &lines {
                let mut line_model = journal_lines::ActiveModel::from(line);
                line_model.entry_id = ActiveValue::Set(entry_id.to_string());
                line_model.insert(&db_tx).await?;
            }

            Ok(JournalEntry {
                id: entry_id,
                entry_date: draft.entry_date,
                reference: draft.reference,
                lines,
            })
        })
    }

    pub async fn delete_journal_entry(
        &self,
        company_id: &str,
        entry_id: Uuid,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_entry_in_company(&db_tx, company_id, entry_id)
                .await?;

            journal_lines::Entity::delete_many()
                .filter(journal_lines::Column::EntryId.eq(entry_id.to_string()))
                .exec(&db_tx)
                .await?;
            journal_entries::Entity::delete_many()
                .filter(journal_entries::Column::Id.eq(entry_id.to_string()))
                .filter(journal_entries::Column::CompanyId.eq(company_id))
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
