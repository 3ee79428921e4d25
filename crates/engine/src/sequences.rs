//! Per-company monotonic counters.
//!
//! These back the human-readable numbers ("E-001", "INV-001", "PO-001").
//! The counter row is read and bumped inside the caller's transaction, so
//! concurrent creates cannot hand out the same number; the unique index on
//! each numbered table is the backstop.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sequences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub company_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub scope: String,
    pub next_value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
