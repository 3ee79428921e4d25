//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Bottega:
//!
//! - `companies`: tenants, the unit of data isolation
//! - `users`: authentication principals, owned by a company
//! - `wallets`: money locations (cash, bank account)
//! - `transactions`: signed money movements against wallets
//! - `budgets`: per-category spending limits
//! - `goals`: savings goals funded via contributions
//! - `contacts`: customers, suppliers and pipeline leads
//! - `employees`, `timesheets`, `expense_claims`: HR
//! - `products`, `purchase_orders`, `purchase_order_items`: inventory
//! - `accounts`, `journal_entries`, `journal_lines`: double-entry journal
//! - `invoices`: customer invoices
//! - `sequences`: per-company counters behind human-readable numbers

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    Role,
    CompanyId,
}

#[derive(Iden)]
enum Wallets {
    Table,
    Id,
    Name,
    BalanceMinor,
    Currency,
    CompanyId,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    EntryDate,
    Description,
    AmountMinor,
    Kind,
    Category,
    Currency,
    WalletId,
    CompanyId,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    Name,
    Category,
    LimitMinor,
    CompanyId,
}

#[derive(Iden)]
enum Goals {
    Table,
    Id,
    Name,
    TargetMinor,
    CurrentMinor,
    Deadline,
    CompanyId,
}

#[derive(Iden)]
enum Contacts {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Kind,
    Stage,
    CompanyId,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    Number,
    Name,
    Email,
    Position,
    CompanyId,
}

#[derive(Iden)]
enum Timesheets {
    Table,
    Id,
    EmployeeId,
    WorkDate,
    Minutes,
    Note,
    CompanyId,
}

#[derive(Iden)]
enum ExpenseClaims {
    Table,
    Id,
    EmployeeId,
    ClaimDate,
    Category,
    AmountMinor,
    Description,
    Status,
    CompanyId,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Sku,
    Name,
    Description,
    PriceMinor,
    CostMinor,
    Stock,
    CompanyId,
}

#[derive(Iden)]
enum PurchaseOrders {
    Table,
    Id,
    Number,
    SupplierId,
    OrderDate,
    ExpectedDate,
    Status,
    TotalCostMinor,
    CompanyId,
}

#[derive(Iden)]
enum PurchaseOrderItems {
    Table,
    Id,
    PurchaseOrderId,
    ProductId,
    Quantity,
    UnitCostMinor,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Code,
    Name,
    Kind,
    CompanyId,
}

#[derive(Iden)]
enum JournalEntries {
    Table,
    Id,
    EntryDate,
    Reference,
    CompanyId,
}

#[derive(Iden)]
enum JournalLines {
    Table,
    Id,
    EntryId,
    AccountId,
    DebitMinor,
    CreditMinor,
    Note,
}

#[derive(Iden)]
enum Invoices {
    Table,
    Id,
    Number,
    CustomerId,
    IssueDate,
    DueDate,
    Status,
    TotalMinor,
    Currency,
    CompanyId,
}

#[derive(Iden)]
enum Sequences {
    Table,
    CompanyId,
    Scope,
    NextValue,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Companies
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("member"),
                    )
                    .col(ColumnDef::new(Users::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-company_id")
                            .from(Users::Table, Users::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Wallets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wallets::Name).string().not_null())
                    .col(
                        ColumnDef::new(Wallets::BalanceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wallets::Currency)
                            .string()
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(Wallets::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wallets-company_id")
                            .from(Wallets::Table, Wallets::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-wallets-company_id-name-unique")
                    .table(Wallets::Table)
                    .col(Wallets::CompanyId)
                    .col(Wallets::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::EntryDate).date().not_null())
                    .col(
                        ColumnDef::new(Transactions::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::Category).string())
                    .col(ColumnDef::new(Transactions::Currency).string().not_null())
                    .col(ColumnDef::new(Transactions::WalletId).string().not_null())
                    .col(ColumnDef::new(Transactions::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-wallet_id")
                            .from(Transactions::Table, Transactions::WalletId)
                            .to(Wallets::Table, Wallets::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-company_id")
                            .from(Transactions::Table, Transactions::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-company_id-entry_date")
                    .table(Transactions::Table)
                    .col(Transactions::CompanyId)
                    .col(Transactions::EntryDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-wallet_id")
                    .table(Transactions::Table)
                    .col(Transactions::WalletId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Budgets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::Name).string().not_null())
                    .col(ColumnDef::new(Budgets::Category).string().not_null())
                    .col(
                        ColumnDef::new(Budgets::LimitMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Budgets::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-company_id")
                            .from(Budgets::Table, Budgets::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Goals
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Goals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Goals::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Goals::Name).string().not_null())
                    .col(
                        ColumnDef::new(Goals::TargetMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Goals::CurrentMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Goals::Deadline).date())
                    .col(ColumnDef::new(Goals::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-goals-company_id")
                            .from(Goals::Table, Goals::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Contacts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::Name).string().not_null())
                    .col(ColumnDef::new(Contacts::Email).string())
                    .col(ColumnDef::new(Contacts::Phone).string())
                    .col(ColumnDef::new(Contacts::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Contacts::Stage)
                            .string()
                            .not_null()
                            .default("lead"),
                    )
                    .col(ColumnDef::new(Contacts::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-contacts-company_id")
                            .from(Contacts::Table, Contacts::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Employees
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Number).string().not_null())
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::Email).string())
                    .col(ColumnDef::new(Employees::Position).string())
                    .col(ColumnDef::new(Employees::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employees-company_id")
                            .from(Employees::Table, Employees::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-employees-company_id-number-unique")
                    .table(Employees::Table)
                    .col(Employees::CompanyId)
                    .col(Employees::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 9. Timesheets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Timesheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Timesheets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Timesheets::EmployeeId).string().not_null())
                    .col(ColumnDef::new(Timesheets::WorkDate).date().not_null())
                    .col(ColumnDef::new(Timesheets::Minutes).integer().not_null())
                    .col(ColumnDef::new(Timesheets::Note).string())
                    .col(ColumnDef::new(Timesheets::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-timesheets-employee_id")
                            .from(Timesheets::Table, Timesheets::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-timesheets-company_id")
                            .from(Timesheets::Table, Timesheets::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-timesheets-company_id-work_date")
                    .table(Timesheets::Table)
                    .col(Timesheets::CompanyId)
                    .col(Timesheets::WorkDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 10. Expense Claims
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ExpenseClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenseClaims::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExpenseClaims::EmployeeId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExpenseClaims::ClaimDate).date().not_null())
                    .col(ColumnDef::new(ExpenseClaims::Category).string().not_null())
                    .col(
                        ColumnDef::new(ExpenseClaims::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseClaims::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseClaims::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ExpenseClaims::CompanyId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_claims-employee_id")
                            .from(ExpenseClaims::Table, ExpenseClaims::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_claims-company_id")
                            .from(ExpenseClaims::Table, ExpenseClaims::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expense_claims-company_id-status")
                    .table(ExpenseClaims::Table)
                    .col(ExpenseClaims::CompanyId)
                    .col(ExpenseClaims::Status)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 11. Products
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Sku).string().not_null())
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Description).string())
                    .col(
                        ColumnDef::new(Products::PriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::CostMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::Stock)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Products::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-products-company_id")
                            .from(Products::Table, Products::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-products-company_id-sku-unique")
                    .table(Products::Table)
                    .col(Products::CompanyId)
                    .col(Products::Sku)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 12. Purchase Orders
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PurchaseOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseOrders::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PurchaseOrders::Number).string().not_null())
                    .col(
                        ColumnDef::new(PurchaseOrders::SupplierId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::OrderDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseOrders::ExpectedDate).date())
                    .col(
                        ColumnDef::new(PurchaseOrders::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::TotalCostMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::CompanyId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_orders-supplier_id")
                            .from(PurchaseOrders::Table, PurchaseOrders::SupplierId)
                            .to(Contacts::Table, Contacts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_orders-company_id")
                            .from(PurchaseOrders::Table, PurchaseOrders::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase_orders-company_id-number-unique")
                    .table(PurchaseOrders::Table)
                    .col(PurchaseOrders::CompanyId)
                    .col(PurchaseOrders::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 13. Purchase Order Items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PurchaseOrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseOrderItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrderItems::PurchaseOrderId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrderItems::ProductId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrderItems::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrderItems::UnitCostMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_order_items-purchase_order_id")
                            .from(
                                PurchaseOrderItems::Table,
                                PurchaseOrderItems::PurchaseOrderId,
                            )
                            .to(PurchaseOrders::Table, PurchaseOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase_order_items-purchase_order_id")
                    .table(PurchaseOrderItems::Table)
                    .col(PurchaseOrderItems::PurchaseOrderId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 14. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Code).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Kind).string().not_null())
                    .col(ColumnDef::new(Accounts::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-company_id")
                            .from(Accounts::Table, Accounts::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-company_id-code-unique")
                    .table(Accounts::Table)
                    .col(Accounts::CompanyId)
                    .col(Accounts::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 15. Journal Entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::EntryDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntries::Reference).string())
                    .col(
                        ColumnDef::new(JournalEntries::CompanyId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-journal_entries-company_id")
                            .from(JournalEntries::Table, JournalEntries::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-journal_entries-company_id-entry_date")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::CompanyId)
                    .col(JournalEntries::EntryDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 16. Journal Lines
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(JournalLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalLines::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JournalLines::EntryId).string().not_null())
                    .col(ColumnDef::new(JournalLines::AccountId).string().not_null())
                    .col(
                        ColumnDef::new(JournalLines::DebitMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(JournalLines::CreditMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(JournalLines::Note).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-journal_lines-entry_id")
                            .from(JournalLines::Table, JournalLines::EntryId)
                            .to(JournalEntries::Table, JournalEntries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-journal_lines-account_id")
                            .from(JournalLines::Table, JournalLines::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-journal_lines-entry_id")
                    .table(JournalLines::Table)
                    .col(JournalLines::EntryId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 17. Invoices
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoices::Number).string().not_null())
                    .col(ColumnDef::new(Invoices::CustomerId).string().not_null())
                    .col(ColumnDef::new(Invoices::IssueDate).date().not_null())
                    .col(ColumnDef::new(Invoices::DueDate).date())
                    .col(
                        ColumnDef::new(Invoices::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Invoices::TotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::Currency)
                            .string()
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(Invoices::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invoices-customer_id")
                            .from(Invoices::Table, Invoices::CustomerId)
                            .to(Contacts::Table, Contacts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invoices-company_id")
                            .from(Invoices::Table, Invoices::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-invoices-company_id-number-unique")
                    .table(Invoices::Table)
                    .col(Invoices::CompanyId)
                    .col(Invoices::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 18. Sequences
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Sequences::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sequences::CompanyId).string().not_null())
                    .col(ColumnDef::new(Sequences::Scope).string().not_null())
                    .col(
                        ColumnDef::new(Sequences::NextValue)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Sequences::CompanyId)
                            .col(Sequences::Scope),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sequences-company_id")
                            .from(Sequences::Table, Sequences::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Sequences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseOrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseClaims::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Timesheets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Goals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        Ok(())
    }
}
