//! Database seeder for Finboard development and testing.
//!
//! Seeds a demo account and a few months of ledger activity so the
//! dashboard has something to show on a fresh database.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use finboard_core::auth::{HashParams, hash_password};
use finboard_db::entities::transactions::TransactionKind;
use finboard_db::entities::{transactions, users};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::str::FromStr;
use uuid::Uuid;

/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo account credentials printed after seeding
const DEMO_EMAIL: &str = "demo@finboard.dev";
const DEMO_PASSWORD: &str = "finboard-demo";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = finboard_db::connect(&database_url, 5, 1)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    seed_demo_user(&db).await;

    println!("Seeding demo ledger...");
    seed_demo_ledger(&db).await;

    println!("Seeding complete!");
    println!("  Login with {DEMO_EMAIL} / {DEMO_PASSWORD}");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

/// Seeds the demo user with a real argon2 hash so login works.
async fn seed_demo_user(db: &DatabaseConnection) {
    // Check if user already exists
    if users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo user already exists, skipping...");
        return;
    }

    let password_hash =
        hash_password(DEMO_PASSWORD, HashParams::default()).expect("Failed to hash demo password");

    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        email: Set(DEMO_EMAIL.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert demo user: {e}");
    } else {
        println!("  Created demo user: {DEMO_EMAIL}");
    }
}

/// Seeds three months of ledger rows for the demo user.
#[allow(clippy::too_many_lines)]
async fn seed_demo_ledger(db: &DatabaseConnection) {
    let user_id = demo_user_id();

    // Skip if the demo user already has ledger rows
    let existing = transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(user_id))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Demo ledger already seeded, skipping...");
        return;
    }

    // (days ago, description, category, amount, kind)
    let entries = [
        (
            2,
            "Client invoice - Meridian Co",
            "consulting",
            "2400.00",
            TransactionKind::Income,
        ),
        (3, "Grocery run", "food", "-86.40", TransactionKind::Expense),
        (
            5,
            "Cloud hosting",
            "infrastructure",
            "-42.00",
            TransactionKind::Expense,
        ),
        (
            9,
            "Workshop fee",
            "training",
            "350.00",
            TransactionKind::Income,
        ),
        (
            12,
            "Office rent",
            "rent",
            "-950.00",
            TransactionKind::Expense,
        ),
        (
            16,
            "Freelance payout",
            "consulting",
            "1180.50",
            TransactionKind::Income,
        ),
        (
            21,
            "Team lunch",
            "food",
            "-64.75",
            TransactionKind::Expense,
        ),
        (
            32,
            "Client invoice - Meridian Co",
            "consulting",
            "2400.00",
            TransactionKind::Income,
        ),
        (
            40,
            "Office rent",
            "rent",
            "-950.00",
            TransactionKind::Expense,
        ),
        (
            47,
            "Conference travel",
            "travel",
            "-612.30",
            TransactionKind::Expense,
        ),
        (
            63,
            "Client invoice - Meridian Co",
            "consulting",
            "2400.00",
            TransactionKind::Income,
        ),
        (
            71,
            "Office rent",
            "rent",
            "-950.00",
            TransactionKind::Expense,
        ),
    ];

    let today = Utc::now().date_naive();
    let mut inserted = 0;

    for (days_ago, description, category, amount, kind) in entries {
        let row = transactions::ActiveModel {
            user_id: Set(user_id),
            date: Set(today - Duration::days(days_ago)),
            description: Set(Some(description.to_string())),
            category: Set(Some(category.to_string())),
            amount: Set(Decimal::from_str(amount).unwrap()),
            kind: Set(kind),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        if let Err(e) = row.insert(db).await {
            eprintln!("Failed to insert ledger row: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} ledger rows");
}
