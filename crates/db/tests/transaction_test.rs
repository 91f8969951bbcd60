//! Integration tests for the transaction repository.

use chrono::NaiveDate;
use finboard_db::entities::transactions::TransactionKind;
use finboard_db::migration::{Migrator, MigratorTrait};
use finboard_db::repositories::{NewTransaction, TransactionFilter};
use finboard_db::{TransactionRepository, UserRepository};
use finboard_shared::types::PageRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh in-memory database with the schema applied.
async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Registers a throwaway user and returns its id.
async fn seed_user(db: &DatabaseConnection) -> Uuid {
    let repo = UserRepository::new(db.clone());
    let email = format!("test-{}@example.com", Uuid::new_v4());
    repo.create(&email, "$argon2id$test_hash")
        .await
        .expect("Failed to create user")
        .id
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

// Amounts stick to halves and quarters so they survive SQLite's numeric
// storage exactly.
fn entry(user_id: Uuid, on: NaiveDate, amount: Decimal, kind: TransactionKind) -> NewTransaction {
    NewTransaction {
        user_id,
        date: on,
        description: Some("test entry".to_string()),
        category: Some("General".to_string()),
        amount,
        kind,
    }
}

const FULL_PAGE: PageRequest = PageRequest {
    limit: 100,
    offset: 0,
};

#[tokio::test]
async fn test_insert_returns_stored_row() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    let row = repo
        .insert(entry(
            user_id,
            date(2025, 9, 1),
            dec!(1200.50),
            TransactionKind::Income,
        ))
        .await
        .expect("Failed to insert transaction");

    assert_eq!(row.user_id, user_id);
    assert_eq!(row.date, date(2025, 9, 1));
    assert_eq!(row.amount, dec!(1200.50));
    assert_eq!(row.kind, TransactionKind::Income);
    assert_eq!(row.description.as_deref(), Some("test entry"));
}

#[tokio::test]
async fn test_ids_increase_with_insertion_order() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    let first = repo
        .insert(entry(user_id, date(2025, 9, 1), dec!(10.00), TransactionKind::Income))
        .await
        .expect("insert");
    let second = repo
        .insert(entry(user_id, date(2025, 9, 1), dec!(20.00), TransactionKind::Income))
        .await
        .expect("insert");

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_list_only_returns_own_rows() {
    let db = setup_db().await;
    let alice = seed_user(&db).await;
    let bob = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    repo.insert(entry(alice, date(2025, 9, 1), dec!(100.00), TransactionKind::Income))
        .await
        .expect("insert");
    repo.insert(entry(alice, date(2025, 9, 2), dec!(-40.50), TransactionKind::Expense))
        .await
        .expect("insert");
    repo.insert(entry(bob, date(2025, 9, 1), dec!(999.00), TransactionKind::Income))
        .await
        .expect("insert");

    let rows = repo
        .list(alice, &TransactionFilter::default(), &FULL_PAGE)
        .await
        .expect("Failed to list transactions");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.user_id == alice));
}

#[tokio::test]
async fn test_list_orders_newest_date_first() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    // Insertion order differs from date order.
    repo.insert(entry(user_id, date(2025, 9, 3), dec!(-150.00), TransactionKind::Expense))
        .await
        .expect("insert");
    repo.insert(entry(user_id, date(2025, 9, 1), dec!(1200.00), TransactionKind::Income))
        .await
        .expect("insert");
    repo.insert(entry(user_id, date(2025, 9, 2), dec!(35.25), TransactionKind::Income))
        .await
        .expect("insert");

    let rows = repo
        .list(user_id, &TransactionFilter::default(), &FULL_PAGE)
        .await
        .expect("Failed to list transactions");

    let dates: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
    assert_eq!(dates, vec![date(2025, 9, 3), date(2025, 9, 2), date(2025, 9, 1)]);
}

#[tokio::test]
async fn test_same_date_rows_come_back_latest_insert_first() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    for amount in [dec!(1.00), dec!(2.00), dec!(3.00)] {
        repo.insert(entry(user_id, date(2025, 9, 5), amount, TransactionKind::Income))
            .await
            .expect("insert");
    }

    let rows = repo
        .list(user_id, &TransactionFilter::default(), &FULL_PAGE)
        .await
        .expect("Failed to list transactions");

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
    assert_eq!(rows[0].amount, dec!(3.00));
}

#[tokio::test]
async fn test_date_bounds_are_inclusive() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    for day in 1..=4 {
        repo.insert(entry(user_id, date(2025, 9, day), dec!(5.00), TransactionKind::Income))
            .await
            .expect("insert");
    }

    let filter = TransactionFilter {
        date_from: Some(date(2025, 9, 2)),
        date_to: Some(date(2025, 9, 3)),
    };
    let rows = repo
        .list(user_id, &filter, &FULL_PAGE)
        .await
        .expect("Failed to list transactions");

    let dates: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
    assert_eq!(dates, vec![date(2025, 9, 3), date(2025, 9, 2)]);

    // A single-day window keeps its one matching row.
    let single = TransactionFilter {
        date_from: Some(date(2025, 9, 4)),
        date_to: Some(date(2025, 9, 4)),
    };
    let rows = repo
        .list(user_id, &single, &FULL_PAGE)
        .await
        .expect("Failed to list transactions");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, date(2025, 9, 4));
}

#[tokio::test]
async fn test_open_ended_bounds_work_alone() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    for day in 1..=3 {
        repo.insert(entry(user_id, date(2025, 9, day), dec!(5.00), TransactionKind::Income))
            .await
            .expect("insert");
    }

    let from_only = TransactionFilter {
        date_from: Some(date(2025, 9, 2)),
        date_to: None,
    };
    let rows = repo
        .list(user_id, &from_only, &FULL_PAGE)
        .await
        .expect("Failed to list transactions");
    assert_eq!(rows.len(), 2);

    let to_only = TransactionFilter {
        date_from: None,
        date_to: Some(date(2025, 9, 1)),
    };
    let rows = repo
        .list(user_id, &to_only, &FULL_PAGE)
        .await
        .expect("Failed to list transactions");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_consecutive_pages_partition_the_ledger() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    for day in 1..=4 {
        repo.insert(entry(user_id, date(2025, 9, day), dec!(5.00), TransactionKind::Income))
            .await
            .expect("insert");
    }

    let first_page = repo
        .list(
            user_id,
            &TransactionFilter::default(),
            &PageRequest { limit: 2, offset: 0 },
        )
        .await
        .expect("Failed to list transactions");
    let second_page = repo
        .list(
            user_id,
            &TransactionFilter::default(),
            &PageRequest { limit: 2, offset: 2 },
        )
        .await
        .expect("Failed to list transactions");

    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 2);

    // No overlap, no gap: the two pages in order equal the full listing.
    let combined: Vec<i64> = first_page
        .iter()
        .chain(second_page.iter())
        .map(|row| row.id)
        .collect();
    let all = repo
        .list(user_id, &TransactionFilter::default(), &FULL_PAGE)
        .await
        .expect("Failed to list transactions");
    let expected: Vec<i64> = all.iter().map(|row| row.id).collect();
    assert_eq!(combined, expected);
}

#[tokio::test]
async fn test_offset_beyond_data_returns_empty() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    repo.insert(entry(user_id, date(2025, 9, 1), dec!(5.00), TransactionKind::Income))
        .await
        .expect("insert");

    let rows = repo
        .list(
            user_id,
            &TransactionFilter::default(),
            &PageRequest { limit: 10, offset: 50 },
        )
        .await
        .expect("Failed to list transactions");

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_summary_folds_by_kind() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let other = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    repo.insert(entry(user_id, date(2025, 9, 1), dec!(1200.50), TransactionKind::Income))
        .await
        .expect("insert");
    repo.insert(entry(user_id, date(2025, 9, 2), dec!(-150.25), TransactionKind::Expense))
        .await
        .expect("insert");
    repo.insert(entry(user_id, date(2025, 9, 3), dec!(-49.75), TransactionKind::Expense))
        .await
        .expect("insert");
    // Another user's row must not leak into the totals.
    repo.insert(entry(other, date(2025, 9, 1), dec!(5000.00), TransactionKind::Income))
        .await
        .expect("insert");

    let summary = repo
        .summary(user_id)
        .await
        .expect("Failed to compute summary");

    assert_eq!(summary.income_total, dec!(1200.50));
    assert_eq!(summary.expense_total, dec!(-200.00));
    assert_eq!(summary.net, dec!(1000.50));
}

#[tokio::test]
async fn test_summary_for_empty_ledger_is_zero() {
    let db = setup_db().await;
    let user_id = seed_user(&db).await;
    let repo = TransactionRepository::new(db.clone());

    let summary = repo
        .summary(user_id)
        .await
        .expect("Failed to compute summary");

    assert_eq!(summary.income_total, Decimal::ZERO);
    assert_eq!(summary.expense_total, Decimal::ZERO);
    assert_eq!(summary.net, Decimal::ZERO);
}
