//! Transaction repository for the per-user ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use finboard_shared::types::PageRequest;

use crate::entities::transactions::{self, TransactionKind};

/// Input for appending a ledger row.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning user.
    pub user_id: Uuid,
    /// Transaction date.
    pub date: NaiveDate,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Signed amount, stored exactly as supplied.
    pub amount: Decimal,
    /// Income or expense marker.
    pub kind: TransactionKind,
}

/// Date-range filter for listing. Both bounds are inclusive and each may
/// appear alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    /// Earliest date to include.
    pub date_from: Option<NaiveDate>,
    /// Latest date to include.
    pub date_to: Option<NaiveDate>,
}

/// Signed totals over one user's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Sum of amounts on income rows.
    pub income_total: Decimal,
    /// Sum of amounts on expense rows.
    pub expense_total: Decimal,
    /// `income_total + expense_total`.
    pub net: Decimal,
}

/// Transaction repository for ledger reads and appends.
///
/// Every query takes the owning user id as an argument; callers pass the
/// id from verified token claims and nothing request-supplied can widen
/// the row set.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a ledger row; the database assigns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, input: NewTransaction) -> Result<transactions::Model, DbErr> {
        let row = transactions::ActiveModel {
            user_id: Set(input.user_id),
            date: Set(input.date),
            description: Set(input.description),
            category: Set(input.category),
            amount: Set(input.amount),
            kind: Set(input.kind),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        row.insert(&self.db).await
    }

    /// Lists rows for one user, newest first.
    ///
    /// Ordering is `date DESC, id DESC`: newest date first, and within a
    /// date the most recently inserted row first. The page window applies
    /// after filtering and ordering, so consecutive pages partition the
    /// result set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
        page: &PageRequest,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(from) = filter.date_from {
            query = query.filter(transactions::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(transactions::Column::Date.lte(to));
        }

        query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
    }

    /// Computes signed totals over every row the user owns.
    ///
    /// Amounts are summed as stored; a positive-amount expense row raises
    /// the expense total. No sign normalization happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summary(&self, user_id: Uuid) -> Result<LedgerSummary, DbErr> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        let mut income_total = Decimal::ZERO;
        let mut expense_total = Decimal::ZERO;
        for row in &rows {
            match row.kind {
                TransactionKind::Income => income_total += row.amount,
                TransactionKind::Expense => expense_total += row.amount,
            }
        }

        Ok(LedgerSummary {
            income_total,
            expense_total,
            net: income_total + expense_total,
        })
    }
}
