use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    ClaimDraft, ClaimStatus, Currency, Engine, EngineError, GoalDraft, INTERNAL_TRANSFER_CATEGORY,
    JournalEntryDraft, JournalLineDraft, ProductDraft, PurchaseOrderDraft, PurchaseOrderItemDraft,
    PurchaseOrderStatus, TransactionKind,
};
use migration::MigratorTrait;

const COMPANY: &str = "11111111-1111-1111-1111-111111111111";

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    insert_company(&db, COMPANY, "Acme Ltd").await;
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn insert_company(db: &DatabaseConnection, id: &str, name: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO companies (id, name) VALUES (?, ?)",
        vec![id.into(), name.into()],
    ))
    .await
    .unwrap();
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

async fn new_employee(engine: &Engine) -> Uuid {
    engine
        .create_employee(
            COMPANY,
            engine::EmployeeDraft {
                name: "Dana".to_string(),
                email: None,
                position: None,
            },
        )
        .await
        .unwrap()
        .id
}

async fn new_claim(engine: &Engine, employee_id: Uuid, amount_minor: i64) -> Uuid {
    engine
        .create_claim(
            COMPANY,
            ClaimDraft {
                employee_id,
                claim_date: date(2),
                category: "travel".to_string(),
                amount_minor,
                description: "client visit".to_string(),
            },
        )
        .await
        .unwrap()
        .id
}

async fn new_supplier(engine: &Engine) -> Uuid {
    engine
        .create_contact(
            COMPANY,
            engine::ContactDraft {
                name: "Supplies Inc".to_string(),
                email: None,
                phone: None,
                kind: engine::ContactKind::Supplier,
                stage: None,
            },
        )
        .await
        .unwrap()
        .id
}

async fn new_product(engine: &Engine, sku: &str, stock: i64) -> Uuid {
    engine
        .create_product(
            COMPANY,
            ProductDraft {
                sku: sku.to_string(),
                name: format!("Product {sku}"),
                description: None,
                price_minor: 1500,
                cost_minor: 900,
                stock: Some(stock),
            },
        )
        .await
        .unwrap()
        .id
}

// ─── Expense claim approval ─────────────────────────────────────────────────

#[tokio::test]
async fn approving_claim_writes_reimbursement() {
    let (engine, _db) = engine_with_db().await;
    let employee_id = new_employee(&engine).await;
    let claim_id = new_claim(&engine, employee_id, 5000).await;
    let wallet = engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();

    let approval = engine.approve_claim(COMPANY, claim_id, None).await.unwrap();

    assert_eq!(approval.claim.status, ClaimStatus::Approved);
    assert_eq!(approval.transaction.amount_minor, -5000);
    assert_eq!(approval.transaction.kind, TransactionKind::Expense);
    assert_eq!(approval.transaction.category.as_deref(), Some("travel"));
    assert_eq!(approval.transaction.wallet_id, wallet.id);
    assert_eq!(approval.transaction.currency, Currency::Usd);
    assert_eq!(approval.transaction.description, "Reimbursement: client visit");

    let transactions = engine.list_transactions(COMPANY).await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount_minor, -5000);
}

#[tokio::test]
async fn approving_twice_fails_without_second_transaction() {
    let (engine, _db) = engine_with_db().await;
    let employee_id = new_employee(&engine).await;
    let claim_id = new_claim(&engine, employee_id, 5000).await;
    engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();

    engine.approve_claim(COMPANY, claim_id, None).await.unwrap();
    let err = engine
        .approve_claim(COMPANY, claim_id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));

    let transactions = engine.list_transactions(COMPANY).await.unwrap();
    assert_eq!(transactions.len(), 1);
}

#[tokio::test]
async fn approving_rejected_claim_fails() {
    let (engine, _db) = engine_with_db().await;
    let employee_id = new_employee(&engine).await;
    let claim_id = new_claim(&engine, employee_id, 5000).await;
    engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();

    let rejected = engine.reject_claim(COMPANY, claim_id).await.unwrap();
    assert_eq!(rejected.status, ClaimStatus::Rejected);

    let err = engine
        .approve_claim(COMPANY, claim_id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
    assert!(engine.list_transactions(COMPANY).await.unwrap().is_empty());
}

#[tokio::test]
async fn approval_without_wallet_rolls_back_status() {
    let (engine, _db) = engine_with_db().await;
    let employee_id = new_employee(&engine).await;
    let claim_id = new_claim(&engine, employee_id, 5000).await;

    // No wallet exists: the approval must fail as a whole, leaving the
    // claim pending and no transaction behind.
    let err = engine
        .approve_claim(COMPANY, claim_id, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("missing wallet".to_string())
    );

    let claims = engine.list_claims(COMPANY).await.unwrap();
    assert_eq!(claims[0].status, ClaimStatus::Pending);
    assert!(engine.list_transactions(COMPANY).await.unwrap().is_empty());
}

#[tokio::test]
async fn approval_with_multiple_wallets_requires_explicit_choice() {
    let (engine, _db) = engine_with_db().await;
    let employee_id = new_employee(&engine).await;
    let claim_id = new_claim(&engine, employee_id, 5000).await;
    engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();
    let second = engine
        .create_wallet(COMPANY, "Savings", 0, Currency::Usd)
        .await
        .unwrap();

    let err = engine
        .approve_claim(COMPANY, claim_id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let claims = engine.list_claims(COMPANY).await.unwrap();
    assert_eq!(claims[0].status, ClaimStatus::Pending);
    assert!(engine.list_transactions(COMPANY).await.unwrap().is_empty());

    let approval = engine
        .approve_claim(COMPANY, claim_id, Some(second.id))
        .await
        .unwrap();
    assert_eq!(approval.transaction.wallet_id, second.id);
}

#[tokio::test]
async fn editing_approved_claim_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let employee_id = new_employee(&engine).await;
    let claim_id = new_claim(&engine, employee_id, 5000).await;
    engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();
    engine.approve_claim(COMPANY, claim_id, None).await.unwrap();

    let err = engine
        .update_claim(
            COMPANY,
            claim_id,
            ClaimDraft {
                employee_id,
                claim_date: date(3),
                category: "travel".to_string(),
                amount_minor: 9999,
                description: "bigger claim".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

// ─── Goal contributions ─────────────────────────────────────────────────────

#[tokio::test]
async fn contribution_moves_goal_and_writes_transaction() {
    let (engine, _db) = engine_with_db().await;
    let wallet = engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();
    let goal = engine
        .create_goal(
            COMPANY,
            GoalDraft {
                name: "New van".to_string(),
                target_minor: 50000,
                deadline: None,
            },
        )
        .await
        .unwrap();

    let first = engine
        .contribute_to_goal(COMPANY, goal.id, 10000, wallet.id)
        .await
        .unwrap();
    assert_eq!(first.goal.current_minor, 10000);
    assert_eq!(first.transaction.amount_minor, -10000);
    assert_eq!(
        first.transaction.category.as_deref(),
        Some(INTERNAL_TRANSFER_CATEGORY)
    );
    assert_eq!(first.transaction.description, "Contribution to goal: New van");

    let second = engine
        .contribute_to_goal(COMPANY, goal.id, 2500, wallet.id)
        .await
        .unwrap();
    assert_eq!(second.goal.current_minor, 12500);

    let transactions = engine.list_transactions(COMPANY).await.unwrap();
    assert_eq!(transactions.len(), 2);
}

#[tokio::test]
async fn over_funding_a_goal_is_permitted() {
    let (engine, _db) = engine_with_db().await;
    let wallet = engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();
    let goal = engine
        .create_goal(
            COMPANY,
            GoalDraft {
                name: "Buffer".to_string(),
                target_minor: 100,
                deadline: None,
            },
        )
        .await
        .unwrap();

    let result = engine
        .contribute_to_goal(COMPANY, goal.id, 500, wallet.id)
        .await
        .unwrap();
    assert_eq!(result.goal.current_minor, 500);
}

#[tokio::test]
async fn failed_contribution_changes_nothing() {
    let (engine, _db) = engine_with_db().await;
    let wallet = engine
        .create_wallet(COMPANY, "Main", 0, Currency::Usd)
        .await
        .unwrap();
    let goal = engine
        .create_goal(
            COMPANY,
            GoalDraft {
                name: "New van".to_string(),
                target_minor: 50000,
                deadline: None,
            },
        )
        .await
        .unwrap();

    // Unknown wallet: nothing moves.
    let err = engine
        .contribute_to_goal(COMPANY, goal.id, 1000, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // Non-positive amount: rejected before touching the store.
    let err = engine
        .contribute_to_goal(COMPANY, goal.id, 0, wallet.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let goals = engine.list_goals(COMPANY).await.unwrap();
    assert_eq!(goals[0].current_minor, 0);
    assert!(engine.list_transactions(COMPANY).await.unwrap().is_empty());
}

// ─── Purchase order receipt ─────────────────────────────────────────────────

#[tokio::test]
async fn receiving_po_increments_stock_exactly_once() {
    let (engine, _db) = engine_with_db().await;
    let supplier_id = new_supplier(&engine).await;
    let product_id = new_product(&engine, "SKU-1", 5).await;

    let order = engine
        .create_purchase_order(
            COMPANY,
            PurchaseOrderDraft {
                supplier_id,
                order_date: date(1),
                expected_date: Some(date(10)),
                status: Some(PurchaseOrderStatus::Ordered),
                items: vec![PurchaseOrderItemDraft {
                    product_id,
                    quantity: 10,
                    unit_cost_minor: 900,
                }],
            },
        )
        .await
        .unwrap();
    assert_eq!(order.total_cost_minor, 9000);

    let receipt = engine
        .receive_purchase_order(COMPANY, order.id)
        .await
        .unwrap();
    assert_eq!(receipt.purchase_order.status, PurchaseOrderStatus::Received);
    assert_eq!(receipt.updated_products.len(), 1);
    assert_eq!(receipt.updated_products[0].stock, 15);
    assert!(receipt.missing_products.is_empty());

    // Second receive: conflict, stock untouched.
    let err = engine
        .receive_purchase_order(COMPANY, order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));

    let products = engine.list_products(COMPANY).await.unwrap();
    assert_eq!(products[0].stock, 15);
}

#[tokio::test]
async fn receiving_reports_missing_products() {
    let (engine, _db) = engine_with_db().await;
    let supplier_id = new_supplier(&engine).await;
    let kept = new_product(&engine, "SKU-1", 0).await;
    let doomed = new_product(&engine, "SKU-2", 0).await;

    let order = engine
        .create_purchase_order(
            COMPANY,
            PurchaseOrderDraft {
                supplier_id,
                order_date: date(1),
                expected_date: None,
                status: Some(PurchaseOrderStatus::Ordered),
                items: vec![
                    PurchaseOrderItemDraft {
                        product_id: kept,
                        quantity: 3,
                        unit_cost_minor: 100,
                    },
                    PurchaseOrderItemDraft {
                        product_id: doomed,
                        quantity: 7,
                        unit_cost_minor: 100,
                    },
                ],
            },
        )
        .await
        .unwrap();

    engine.delete_product(COMPANY, doomed).await.unwrap();

    let receipt = engine
        .receive_purchase_order(COMPANY, order.id)
        .await
        .unwrap();
    assert_eq!(receipt.updated_products.len(), 1);
    assert_eq!(receipt.updated_products[0].id, kept);
    assert_eq!(receipt.updated_products[0].stock, 3);
    assert_eq!(receipt.missing_products, vec![doomed]);
}

#[tokio::test]
async fn cancelled_po_cannot_be_received() {
    let (engine, _db) = engine_with_db().await;
    let supplier_id = new_supplier(&engine).await;
    let product_id = new_product(&engine, "SKU-1", 0).await;

    let order = engine
        .create_purchase_order(
            COMPANY,
            PurchaseOrderDraft {
                supplier_id,
                order_date: date(1),
                expected_date: None,
                status: None,
                items: vec![PurchaseOrderItemDraft {
                    product_id,
                    quantity: 1,
                    unit_cost_minor: 100,
                }],
            },
        )
        .await
        .unwrap();

    engine
        .update_purchase_order(
            COMPANY,
            order.id,
            PurchaseOrderDraft {
                supplier_id,
                order_date: date(1),
                expected_date: None,
                status: Some(PurchaseOrderStatus::Cancelled),
                items: vec![PurchaseOrderItemDraft {
                    product_id,
                    quantity: 1,
                    unit_cost_minor: 100,
                }],
            },
        )
        .await
        .unwrap();

    let err = engine
        .receive_purchase_order(COMPANY, order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));

    let products = engine.list_products(COMPANY).await.unwrap();
    assert_eq!(products[0].stock, 0);
}

// ─── Journal entries ────────────────────────────────────────────────────────

async fn two_accounts(engine: &Engine) -> (Uuid, Uuid) {
    let cash = engine
        .create_account(
            COMPANY,
            engine::AccountDraft {
                code: "1000".to_string(),
                name: "Cash".to_string(),
                kind: engine::AccountKind::Asset,
            },
        )
        .await
        .unwrap();
    let sales = engine
        .create_account(
            COMPANY,
            engine::AccountDraft {
                code: "4000".to_string(),
                name: "Sales".to_string(),
                kind: engine::AccountKind::Income,
            },
        )
        .await
        .unwrap();
    (cash.id, sales.id)
}

fn line(account_id: Uuid, debit: i64, credit: i64) -> JournalLineDraft {
    JournalLineDraft {
        account_id,
        debit_minor: debit,
        credit_minor: credit,
        note: None,
    }
}

#[tokio::test]
async fn balanced_entry_is_accepted_and_unbalanced_rejected() {
    let (engine, _db) = engine_with_db().await;
    let (cash, sales) = two_accounts(&engine).await;

    let entry = engine
        .create_journal_entry(
            COMPANY,
            JournalEntryDraft {
                entry_date: date(5),
                reference: Some("2026-001".to_string()),
                lines: vec![line(cash, 100, 0), line(sales, 0, 100)],
            },
        )
        .await
        .unwrap();
    assert_eq!(entry.lines.len(), 2);

    let err = engine
        .create_journal_entry(
            COMPANY,
            JournalEntryDraft {
                entry_date: date(6),
                reference: None,
                lines: vec![line(cash, 100, 0), line(sales, 0, 90)],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unbalanced(_)));

    let entries = engine.list_journal_entries(COMPANY).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn updating_entry_revalidates_balance() {
    let (engine, _db) = engine_with_db().await;
    let (cash, sales) = two_accounts(&engine).await;

    let entry = engine
        .create_journal_entry(
            COMPANY,
            JournalEntryDraft {
                entry_date: date(5),
                reference: None,
                lines: vec![line(cash, 100, 0), line(sales, 0, 100)],
            },
        )
        .await
        .unwrap();

    let err = engine
        .update_journal_entry(
            COMPANY,
            entry.id,
            JournalEntryDraft {
                entry_date: date(5),
                reference: None,
                lines: vec![line(cash, 100, 0), line(sales, 0, 40)],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unbalanced(_)));

    // The stored lines are unchanged.
    let entries = engine.list_journal_entries(COMPANY).await.unwrap();
    let total_credit: i64 = entries[0].lines.iter().map(|l| l.credit_minor).sum();
    assert_eq!(total_credit, 100);

    let updated = engine
        .update_journal_entry(
            COMPANY,
            entry.id,
            JournalEntryDraft {
                entry_date: date(7),
                reference: Some("fixed".to_string()),
                lines: vec![line(cash, 250, 0), line(sales, 0, 250)],
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.lines.len(), 2);

    let entries = engine.list_journal_entries(COMPANY).await.unwrap();
    assert_eq!(entries.len(), 1);
    let total_debit: i64 = entries[0].lines.iter().map(|l| l.debit_minor).sum();
    assert_eq!(total_debit, 250);
}

// ─── Sequence numbers ───────────────────────────────────────────────────────

#[tokio::test]
async fn sequence_numbers_are_per_company_and_monotonic() {
    let (engine, db) = engine_with_db().await;
    insert_company(&db, "22222222-2222-2222-2222-222222222222", "Other Co").await;
    const OTHER: &str = "22222222-2222-2222-2222-222222222222";

    let first = engine
        .create_employee(
            COMPANY,
            engine::EmployeeDraft {
                name: "Dana".to_string(),
                email: None,
                position: None,
            },
        )
        .await
        .unwrap();
    let second = engine
        .create_employee(
            COMPANY,
            engine::EmployeeDraft {
                name: "Eli".to_string(),
                email: None,
                position: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(first.number, "E-001");
    assert_eq!(second.number, "E-002");

    // Another tenant starts at 1 again.
    let other = engine
        .create_employee(
            OTHER,
            engine::EmployeeDraft {
                name: "Noa".to_string(),
                email: None,
                position: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(other.number, "E-001");

    // Invoices and purchase orders use their own scopes.
    let customer = engine
        .create_contact(
            COMPANY,
            engine::ContactDraft {
                name: "Client".to_string(),
                email: None,
                phone: None,
                kind: engine::ContactKind::Customer,
                stage: None,
            },
        )
        .await
        .unwrap();
    let invoice = engine
        .create_invoice(
            COMPANY,
            engine::InvoiceDraft {
                customer_id: customer.id,
                issue_date: date(1),
                due_date: None,
                status: None,
                total_minor: 1000,
                currency: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(invoice.number, "INV-001");
}
