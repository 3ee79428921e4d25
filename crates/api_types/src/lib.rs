use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

/// Response body for every delete endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub id: Uuid,
}

pub mod account {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AccountKind {
        Asset,
        Liability,
        Equity,
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub code: String,
        pub name: String,
        pub kind: AccountKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: Uuid,
        pub code: String,
        pub name: String,
        pub kind: AccountKind,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub name: String,
        pub category: String,
        pub limit_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub name: String,
        pub category: String,
        pub limit_minor: i64,
    }
}

pub mod contact {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ContactKind {
        Customer,
        Supplier,
        Lead,
    }

    /// Sales pipeline stage, rendered as a kanban column by clients.
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

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactNew {
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub kind: ContactKind,
        pub stage: Option<PipelineStage>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactView {
        pub id: Uuid,
        pub name: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub kind: ContactKind,
        pub stage: PipelineStage,
    }
}

pub mod employee {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EmployeeNew {
        pub name: String,
        pub email: Option<String>,
        pub position: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EmployeeView {
        pub id: Uuid,
        /// Human-readable sequence number ("E-001"), assigned at creation.
        pub number: String,
        pub name: String,
        pub email: Option<String>,
        pub position: Option<String>,
    }
}

pub mod timesheet {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TimesheetNew {
        pub employee_id: Uuid,
        pub work_date: NaiveDate,
        /// Worked time in minutes; avoids fractional-hour rounding.
        pub minutes: i32,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TimesheetView {
        pub id: Uuid,
        pub employee_id: Uuid,
        pub work_date: NaiveDate,
        pub minutes: i32,
        pub note: Option<String>,
    }
}

pub mod expense_claim {
    use super::*;
    use super::transaction::TransactionView;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ClaimStatus {
        Pending,
        Approved,
        Rejected,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClaimNew {
        pub employee_id: Uuid,
        pub claim_date: NaiveDate,
        pub category: String,
        /// Positive amount in minor units; the reimbursement transaction is
        /// written with the negated value.
        pub amount_minor: i64,
        pub description: String,
    }

    /// Update payload; status is only ever changed via approve/reject.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClaimUpdate {
        pub employee_id: Uuid,
        pub claim_date: NaiveDate,
        pub category: String,
        pub amount_minor: i64,
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClaimView {
        pub id: Uuid,
        pub employee_id: Uuid,
        pub claim_date: NaiveDate,
        pub category: String,
        pub amount_minor: i64,
        pub description: String,
        pub status: ClaimStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClaimApprove {
        /// Wallet to debit. May be omitted when the company has exactly one
        /// wallet; required otherwise.
        pub wallet_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClaimApproved {
        pub claim: ClaimView,
        pub transaction: TransactionView,
    }
}

pub mod goal {
    use super::*;
    use super::transaction::TransactionView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        pub target_minor: i64,
        pub deadline: Option<NaiveDate>,
    }

    /// Update payload; `current_minor` is only ever changed via contribute.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalUpdate {
        pub name: String,
        pub target_minor: i64,
        pub deadline: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: Uuid,
        pub name: String,
        pub target_minor: i64,
        pub current_minor: i64,
        pub deadline: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalContribute {
        pub amount_minor: i64,
        pub wallet_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalContributed {
        pub goal: GoalView,
        pub transaction: TransactionView,
    }
}

pub mod invoice {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum InvoiceStatus {
        #[default]
        Draft,
        Sent,
        Paid,
        Overdue,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceNew {
        pub customer_id: Uuid,
        pub issue_date: NaiveDate,
        pub due_date: Option<NaiveDate>,
        pub status: Option<InvoiceStatus>,
        pub total_minor: i64,
        pub currency: Option<Currency>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceView {
        pub id: Uuid,
        /// Human-readable sequence number ("INV-001"), assigned at creation.
        pub number: String,
        pub customer_id: Uuid,
        pub issue_date: NaiveDate,
        pub due_date: Option<NaiveDate>,
        pub status: InvoiceStatus,
        pub total_minor: i64,
        pub currency: Currency,
    }
}

pub mod journal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct JournalLineNew {
        pub account_id: Uuid,
        pub debit_minor: i64,
        pub credit_minor: i64,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct JournalEntryNew {
        pub entry_date: NaiveDate,
        pub reference: Option<String>,
        pub lines: Vec<JournalLineNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct JournalLineView {
        pub id: Uuid,
        pub account_id: Uuid,
        pub debit_minor: i64,
        pub credit_minor: i64,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct JournalEntryView {
        pub id: Uuid,
        pub entry_date: NaiveDate,
        pub reference: Option<String>,
        pub lines: Vec<JournalLineView>,
    }
}

pub mod product {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductNew {
        pub sku: String,
        pub name: String,
        pub description: Option<String>,
        pub price_minor: i64,
        pub cost_minor: i64,
        /// Opening stock; later changes only happen via purchase-order receipt.
        pub stock: Option<i64>,
    }

    /// Update payload; stock is only ever changed via purchase-order receipt.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductUpdate {
        pub sku: String,
        pub name: String,
        pub description: Option<String>,
        pub price_minor: i64,
        pub cost_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductView {
        pub id: Uuid,
        pub sku: String,
        pub name: String,
        pub description: Option<String>,
        pub price_minor: i64,
        pub cost_minor: i64,
        pub stock: i64,
    }
}

pub mod purchase_order {
    use super::*;
    use super::product::ProductView;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PurchaseOrderStatus {
        #[default]
        Draft,
        Ordered,
        Received,
        Cancelled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderItemNew {
        pub product_id: Uuid,
        pub quantity: i64,
        pub unit_cost_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderNew {
        pub supplier_id: Uuid,
        pub order_date: NaiveDate,
        pub expected_date: Option<NaiveDate>,
        pub status: Option<PurchaseOrderStatus>,
        pub items: Vec<PurchaseOrderItemNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderItemView {
        pub id: Uuid,
        pub product_id: Uuid,
        pub quantity: i64,
        pub unit_cost_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderView {
        pub id: Uuid,
        /// Human-readable sequence number ("PO-001"), assigned at creation.
        pub number: String,
        pub supplier_id: Uuid,
        pub order_date: NaiveDate,
        pub expected_date: Option<NaiveDate>,
        pub status: PurchaseOrderStatus,
        pub total_cost_minor: i64,
        pub items: Vec<PurchaseOrderItemView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderReceived {
        pub purchase_order: PurchaseOrderView,
        pub updated_products: Vec<ProductView>,
        /// Line-item products that no longer exist; reported, not silently
        /// skipped.
        pub missing_products: Vec<Uuid>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub entry_date: NaiveDate,
        pub description: String,
        /// Signed minor amount: negative for expenses, positive for income.
        pub amount_minor: i64,
        pub kind: TransactionKind,
        pub category: Option<String>,
        pub wallet_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub entry_date: NaiveDate,
        pub description: String,
        pub amount_minor: i64,
        pub kind: TransactionKind,
        pub category: Option<String>,
        pub wallet_id: Uuid,
        pub currency: Currency,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        /// Already-hashed credential; hashing is the auth service's concern.
        pub password: String,
        pub role: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub name: String,
        pub email: String,
        pub password: Option<String>,
        pub role: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub role: String,
    }
}

pub mod wallet {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletNew {
        pub name: String,
        pub balance_minor: Option<i64>,
        pub currency: Option<Currency>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletView {
        pub id: Uuid,
        pub name: String,
        pub balance_minor: i64,
        pub currency: Currency,
    }
}

pub mod ai {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AiQuery {
        pub prompt: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AiAnswer {
        pub answer: String,
    }
}
