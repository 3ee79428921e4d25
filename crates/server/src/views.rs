//! Mapping between engine domain types and API response types.

use api_types::{
    Currency, account::AccountView, budget::BudgetView, contact::ContactView,
    employee::EmployeeView, expense_claim::ClaimView, goal::GoalView, invoice::InvoiceView,
    journal::{JournalEntryView, JournalLineView}, product::ProductView,
    purchase_order::{PurchaseOrderItemView, PurchaseOrderView}, timesheet::TimesheetView,
    transaction::TransactionView, user::UserView, wallet::WalletView,
};

pub fn currency(value: engine::Currency) -> Currency {
    match value {
        engine::Currency::Usd => Currency::Usd,
        engine::Currency::Eur => Currency::Eur,
        engine::Currency::Gbp => Currency::Gbp,
    }
}

pub fn currency_to_engine(value: Currency) -> engine::Currency {
    match value {
        Currency::Usd => engine::Currency::Usd,
        Currency::Eur => engine::Currency::Eur,
        Currency::Gbp => engine::Currency::Gbp,
    }
}

pub fn account_kind(value: engine::AccountKind) -> api_types::account::AccountKind {
    use api_types::account::AccountKind as Api;
    match value {
        engine::AccountKind::Asset => Api::Asset,
        engine::AccountKind::Liability => Api::Liability,
        engine::AccountKind::Equity => Api::Equity,
        engine::AccountKind::Income => Api::Income,
        engine::AccountKind::Expense => Api::Expense,
    }
}

pub fn account_kind_to_engine(value: api_types::account::AccountKind) -> engine::AccountKind {
    use api_types::account::AccountKind as Api;
    match value {
        Api::Asset => engine::AccountKind::Asset,
        Api::Liability => engine::AccountKind::Liability,
        Api::Equity => engine::AccountKind::Equity,
        Api::Income => engine::AccountKind::Income,
        Api::Expense => engine::AccountKind::Expense,
    }
}

pub fn contact_kind(value: engine::ContactKind) -> api_types::contact::ContactKind {
    use api_types::contact::ContactKind as Api;
    match value {
        engine::ContactKind::Customer => Api::Customer,
        engine::ContactKind::Supplier => Api::Supplier,
        engine::ContactKind::Lead => Api::Lead,
    }
}

pub fn contact_kind_to_engine(value: api_types::contact::ContactKind) -> engine::ContactKind {
    use api_types::contact::ContactKind as Api;
    match value {
        Api::Customer => engine::ContactKind::Customer,
        Api::Supplier => engine::ContactKind::Supplier,
        Api::Lead => engine::ContactKind::Lead,
    }
}

pub fn pipeline_stage(value: engine::PipelineStage) -> api_types::contact::PipelineStage {
    use api_types::contact::PipelineStage as Api;
    match value {
        engine::PipelineStage::Lead => Api::Lead,
        engine::PipelineStage::Contacted => Api::Contacted,
        engine::PipelineStage::Proposal => Api::Proposal,
        engine::PipelineStage::Won => Api::Won,
        engine::PipelineStage::Lost => Api::Lost,
    }
}

pub fn pipeline_stage_to_engine(value: api_types::contact::PipelineStage) -> engine::PipelineStage {
    use api_types::contact::PipelineStage as Api;
    match value {
        Api::Lead => engine::PipelineStage::Lead,
        Api::Contacted => engine::PipelineStage::Contacted,
        Api::Proposal => engine::PipelineStage::Proposal,
        Api::Won => engine::PipelineStage::Won,
        Api::Lost => engine::PipelineStage::Lost,
    }
}

pub fn claim_status(value: engine::ClaimStatus) -> api_types::expense_claim::ClaimStatus {
    use api_types::expense_claim::ClaimStatus as Api;
    match value {
        engine::ClaimStatus::Pending => Api::Pending,
        engine::ClaimStatus::Approved => Api::Approved,
        engine::ClaimStatus::Rejected => Api::Rejected,
    }
}

pub fn invoice_status(value: engine::InvoiceStatus) -> api_types::invoice::InvoiceStatus {
    use api_types::invoice::InvoiceStatus as Api;
    match value {
        engine::InvoiceStatus::Draft => Api::Draft,
        engine::InvoiceStatus::Sent => Api::Sent,
        engine::InvoiceStatus::Paid => Api::Paid,
        engine::InvoiceStatus::Overdue => Api::Overdue,
    }
}

pub fn invoice_status_to_engine(value: api_types::invoice::InvoiceStatus) -> engine::InvoiceStatus {
    use api_types::invoice::InvoiceStatus as Api;
    match value {
        Api::Draft => engine::InvoiceStatus::Draft,
        Api::Sent => engine::InvoiceStatus::Sent,
        Api::Paid => engine::InvoiceStatus::Paid,
        Api::Overdue => engine::InvoiceStatus::Overdue,
    }
}

pub fn po_status(
    value: engine::PurchaseOrderStatus,
) -> api_types::purchase_order::PurchaseOrderStatus {
    use api_types::purchase_order::PurchaseOrderStatus as Api;
    match value {
        engine::PurchaseOrderStatus::Draft => Api::Draft,
        engine::PurchaseOrderStatus::Ordered => Api::Ordered,
        engine::PurchaseOrderStatus::Received => Api::Received,
        engine::PurchaseOrderStatus::Cancelled => Api::Cancelled,
    }
}

pub fn po_status_to_engine(
    value: api_types::purchase_order::PurchaseOrderStatus,
) -> engine::PurchaseOrderStatus {
    use api_types::purchase_order::PurchaseOrderStatus as Api;
    match value {
        Api::Draft => engine::PurchaseOrderStatus::Draft,
        Api::Ordered => engine::PurchaseOrderStatus::Ordered,
        Api::Received => engine::PurchaseOrderStatus::Received,
        Api::Cancelled => engine::PurchaseOrderStatus::Cancelled,
    }
}

pub fn transaction_kind(value: engine::TransactionKind) -> api_types::transaction::TransactionKind {
    use api_types::transaction::TransactionKind as Api;
    match value {
        engine::TransactionKind::Income => Api::Income,
        engine::TransactionKind::Expense => Api::Expense,
    }
}

pub fn transaction_kind_to_engine(
    value: api_types::transaction::TransactionKind,
) -> engine::TransactionKind {
    use api_types::transaction::TransactionKind as Api;
    match value {
        Api::Income => engine::TransactionKind::Income,
        Api::Expense => engine::TransactionKind::Expense,
    }
}

pub fn account(value: engine::Account) -> AccountView {
    AccountView {
        id: value.id,
        code: value.code,
        name: value.name,
        kind: account_kind(value.kind),
    }
}

pub fn budget(value: engine::Budget) -> BudgetView {
    BudgetView {
        id: value.id,
        name: value.name,
        category: value.category,
        limit_minor: value.limit_minor,
    }
}

pub fn contact(value: engine::Contact) -> ContactView {
    ContactView {
        id: value.id,
        name: value.name,
        email: value.email,
        phone: value.phone,
        kind: contact_kind(value.kind),
        stage: pipeline_stage(value.stage),
    }
}

pub fn employee(value: engine::Employee) -> EmployeeView {
    EmployeeView {
        id: value.id,
        number: value.number,
        name: value.name,
        email: value.email,
        position: value.position,
    }
}

pub fn timesheet(value: engine::Timesheet) -> TimesheetView {
    TimesheetView {
        id: value.id,
        employee_id: value.employee_id,
        work_date: value.work_date,
        minutes: value.minutes,
        note: value.note,
    }
}

pub fn claim(value: engine::ExpenseClaim) -> ClaimView {
    ClaimView {
        id: value.id,
        employee_id: value.employee_id,
        claim_date: value.claim_date,
        category: value.category,
        amount_minor: value.amount_minor,
        description: value.description,
        status: claim_status(value.status),
    }
}

pub fn goal(value: engine::Goal) -> GoalView {
    GoalView {
        id: value.id,
        name: value.name,
        target_minor: value.target_minor,
        current_minor: value.current_minor,
        deadline: value.deadline,
    }
}

pub fn invoice(value: engine::Invoice) -> InvoiceView {
    InvoiceView {
        id: value.id,
        number: value.number,
        customer_id: value.customer_id,
        issue_date: value.issue_date,
        due_date: value.due_date,
        status: invoice_status(value.status),
        total_minor: value.total_minor,
        currency: currency(value.currency),
    }
}

pub fn journal_entry(value: engine::JournalEntry) -> JournalEntryView {
    JournalEntryView {
        id: value.id,
        entry_date: value.entry_date,
        reference: value.reference,
        lines: value.lines.into_iter().map(journal_line).collect(),
    }
}

pub fn journal_line(value: engine::JournalLine) -> JournalLineView {
    JournalLineView {
        id: value.id,
        account_id: value.account_id,
        debit_minor: value.debit_minor,
        credit_minor: value.credit_minor,
        note: value.note,
    }
}

pub fn product(value: engine::Product) -> ProductView {
    ProductView {
        id: value.id,
        sku: value.sku,
        name: value.name,
        description: value.description,
        price_minor: value.price_minor,
        cost_minor: value.cost_minor,
        stock: value.stock,
    }
}

pub fn purchase_order(value: engine::PurchaseOrder) -> PurchaseOrderView {
    PurchaseOrderView {
        id: value.id,
        number: value.number,
        supplier_id: value.supplier_id,
        order_date: value.order_date,
        expected_date: value.expected_date,
        status: po_status(value.status),
        total_cost_minor: value.total_cost_minor,
        items: value.items.into_iter().map(purchase_order_item).collect(),
    }
}

pub fn purchase_order_item(value: engine::PurchaseOrderItem) -> PurchaseOrderItemView {
    PurchaseOrderItemView {
        id: value.id,
        product_id: value.product_id,
        quantity: value.quantity,
        unit_cost_minor: value.unit_cost_minor,
    }
}

pub fn transaction(value: engine::Transaction) -> TransactionView {
    TransactionView {
        id: value.id,
        entry_date: value.entry_date,
        description: value.description,
        amount_minor: value.amount_minor,
        kind: transaction_kind(value.kind),
        category: value.category,
        wallet_id: value.wallet_id,
        currency: currency(value.currency),
    }
}

pub fn user(value: engine::User) -> UserView {
    UserView {
        id: value.id,
        name: value.name,
        email: value.email,
        role: value.role,
    }
}

pub fn wallet(value: engine::Wallet) -> WalletView {
    WalletView {
        id: value.id,
        name: value.name,
        balance_minor: value.balance_minor,
        currency: currency(value.currency),
    }
}
