//! A principal of company A must never read, update or delete a row of
//! company B, even with B's row id in hand. Misses resolve to the same
//! `KeyNotFound` as nonexistent rows so existence does not leak.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{ClaimDraft, Currency, Engine, EngineError, GoalDraft, ProductDraft};
use migration::MigratorTrait;

const COMPANY_A: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
const COMPANY_B: &str = "bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb";

async fn engine_with_two_companies() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for (id, name) in [(COMPANY_A, "Alpha"), (COMPANY_B, "Beta")] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO companies (id, name) VALUES (?, ?)",
            vec![id.into(), name.into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn is_not_found(err: &EngineError) -> bool {
    matches!(err, EngineError::KeyNotFound(_))
}

#[tokio::test]
async fn lists_are_scoped_to_the_caller() {
    let (engine, _db) = engine_with_two_companies().await;
    engine
        .create_wallet(COMPANY_B, "Beta Cash", 1000, Currency::Eur)
        .await
        .unwrap();

    assert!(engine.list_wallets(COMPANY_A).await.unwrap().is_empty());
    assert_eq!(engine.list_wallets(COMPANY_B).await.unwrap().len(), 1);
}

#[tokio::test]
async fn foreign_rows_cannot_be_updated_or_deleted() {
    let (engine, _db) = engine_with_two_companies().await;
    let wallet = engine
        .create_wallet(COMPANY_B, "Beta Cash", 1000, Currency::Eur)
        .await
        .unwrap();
    let product = engine
        .create_product(
            COMPANY_B,
            ProductDraft {
                sku: "B-1".to_string(),
                name: "Beta widget".to_string(),
                description: None,
                price_minor: 100,
                cost_minor: 50,
                stock: Some(3),
            },
        )
        .await
        .unwrap();

    let err = engine
        .update_wallet(COMPANY_A, wallet.id, "Stolen", 0, Currency::Eur)
        .await
        .unwrap_err();
    assert!(is_not_found(&err));

    let err = engine.delete_wallet(COMPANY_A, wallet.id).await.unwrap_err();
    assert!(is_not_found(&err));

    let err = engine.delete_product(COMPANY_A, product.id).await.unwrap_err();
    assert!(is_not_found(&err));

    // Rows are untouched for their owner.
    let wallets = engine.list_wallets(COMPANY_B).await.unwrap();
    assert_eq!(wallets[0].name, "Beta Cash");
    assert_eq!(engine.list_products(COMPANY_B).await.unwrap().len(), 1);
}

#[tokio::test]
async fn composite_operations_are_tenant_scoped() {
    let (engine, _db) = engine_with_two_companies().await;

    let employee = engine
        .create_employee(
            COMPANY_B,
            engine::EmployeeDraft {
                name: "Noa".to_string(),
                email: None,
                position: None,
            },
        )
        .await
        .unwrap();
    let claim = engine
        .create_claim(
            COMPANY_B,
            ClaimDraft {
                employee_id: employee.id,
                claim_date: date(),
                category: "travel".to_string(),
                amount_minor: 700,
                description: "conference".to_string(),
            },
        )
        .await
        .unwrap();
    engine
        .create_wallet(COMPANY_B, "Beta Cash", 0, Currency::Eur)
        .await
        .unwrap();

    // A cannot approve B's claim, even knowing its id.
    let err = engine
        .approve_claim(COMPANY_A, claim.id, None)
        .await
        .unwrap_err();
    assert!(is_not_found(&err));

    let claims = engine.list_claims(COMPANY_B).await.unwrap();
    assert_eq!(claims[0].status, engine::ClaimStatus::Pending);
    assert!(engine.list_transactions(COMPANY_B).await.unwrap().is_empty());
}

#[tokio::test]
async fn contribution_cannot_use_a_foreign_wallet() {
    let (engine, _db) = engine_with_two_companies().await;

    let goal = engine
        .create_goal(
            COMPANY_A,
            GoalDraft {
                name: "Alpha goal".to_string(),
                target_minor: 1000,
                deadline: None,
            },
        )
        .await
        .unwrap();
    let foreign_wallet = engine
        .create_wallet(COMPANY_B, "Beta Cash", 0, Currency::Eur)
        .await
        .unwrap();

    let err = engine
        .contribute_to_goal(COMPANY_A, goal.id, 100, foreign_wallet.id)
        .await
        .unwrap_err();
    assert!(is_not_found(&err));

    let goals = engine.list_goals(COMPANY_A).await.unwrap();
    assert_eq!(goals[0].current_minor, 0);
}

#[tokio::test]
async fn unknown_ids_and_foreign_ids_are_indistinguishable() {
    let (engine, _db) = engine_with_two_companies().await;
    let wallet = engine
        .create_wallet(COMPANY_B, "Beta Cash", 0, Currency::Eur)
        .await
        .unwrap();

    let foreign = engine.delete_wallet(COMPANY_A, wallet.id).await.unwrap_err();
    let unknown = engine
        .delete_wallet(COMPANY_A, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(foreign, unknown);
}
