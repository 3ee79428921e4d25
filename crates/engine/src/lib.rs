//! The tenant-scoped core of the ERP backend.
//!
//! Every operation is keyed by the caller's `company_id` and runs inside a
//! database transaction; the composite financial operations (claim
//! approval, goal contribution, purchase-order receipt) commit all of
//! their mutations or none of them.

pub use accounts::{Account, AccountDraft, AccountKind};
pub use budgets::{Budget, BudgetDraft};
pub use contacts::{Contact, ContactDraft, ContactKind, PipelineStage};
pub use currency::Currency;
pub use employees::{Employee, EmployeeDraft};
pub use error::EngineError;
pub use expense_claims::{ClaimDraft, ClaimStatus, ExpenseClaim};
pub use goals::{Goal, GoalDraft};
pub use invoices::{Invoice, InvoiceDraft, InvoiceStatus};
pub use journal_entries::{JournalEntry, JournalEntryDraft};
pub use journal_lines::{JournalLine, JournalLineDraft};
pub use ops::{
    ClaimApproval, Engine, EngineBuilder, FinancialSnapshot, GoalContribution,
    INTERNAL_TRANSFER_CATEGORY, PurchaseOrderReceipt,
};
pub use products::{Product, ProductDraft, ProductUpdate};
pub use purchase_orders::{
    PurchaseOrder, PurchaseOrderDraft, PurchaseOrderItemDraft, PurchaseOrderStatus,
};
pub use purchase_order_items::PurchaseOrderItem;
pub use timesheets::{Timesheet, TimesheetDraft};
pub use transactions::{Transaction, TransactionDraft, TransactionKind};
pub use users::{User, UserDraft};
pub use wallets::Wallet;

mod accounts;
mod budgets;
mod contacts;
mod currency;
mod employees;
mod error;
mod expense_claims;
mod goals;
mod invoices;
mod journal_entries;
mod journal_lines;
mod ops;
mod products;
mod purchase_order_items;
mod purchase_orders;
mod sequences;
mod timesheets;
mod transactions;
mod users;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
