//! Transaction ledger routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::extractors::ApiJson;
use crate::{AppState, middleware::AuthUser};
use finboard_db::{
    entities::transactions::{self, TransactionKind},
    repositories::transaction::{NewTransaction, TransactionFilter, TransactionRepository},
};
use finboard_shared::types::{PageMeta, PageRequest};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
///
/// Every field arrives as a raw string so that each malformed value gets
/// its own 400 body instead of axum's default query rejection.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Inclusive lower date bound (YYYY-MM-DD).
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Inclusive upper date bound (YYYY-MM-DD).
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    /// Page size (default: 50, max: 100).
    pub limit: Option<String>,
    /// Rows to skip (default: 0).
    pub offset: Option<String>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Transaction date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Description.
    pub description: Option<String>,
    /// Spending category.
    pub category: Option<String>,
    /// Signed amount, as a JSON number or numeric string.
    pub amount: Decimal,
    /// Transaction type: "income" or "expense".
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: i64,
    /// Transaction date.
    pub date: String,
    /// Description.
    pub description: Option<String>,
    /// Spending category.
    pub category: Option<String>,
    /// Signed amount.
    pub amount: String,
    /// Transaction type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Created at timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            date: model.date.to_string(),
            description: model.description,
            category: model.category,
            amount: model.amount.to_string(),
            kind: kind_to_string(model.kind),
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - List the caller's transactions, newest first.
#[allow(clippy::too_many_lines)]
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    // Parse date bounds
    let date_from = match query.start_date.as_deref().map(parse_date).transpose() {
        Ok(d) => d,
        Err(()) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_date",
                    "message": "startDate must be a valid date formatted as YYYY-MM-DD"
                })),
            )
                .into_response();
        }
    };
    let date_to = match query.end_date.as_deref().map(parse_date).transpose() {
        Ok(d) => d,
        Err(()) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_date",
                    "message": "endDate must be a valid date formatted as YYYY-MM-DD"
                })),
            )
                .into_response();
        }
    };

    // An inverted range is an error, never silently reordered
    if let (Some(from), Some(to)) = (date_from, date_to)
        && from > to
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_date_range",
                "message": "startDate must not be after endDate"
            })),
        )
            .into_response();
    }

    // Parse pagination
    let limit = match query.limit.as_deref().map(str::parse::<i64>).transpose() {
        Ok(v) => v,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_pagination",
                    "message": "limit must be a positive integer"
                })),
            )
                .into_response();
        }
    };
    let offset = match query.offset.as_deref().map(str::parse::<i64>).transpose() {
        Ok(v) => v,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_pagination",
                    "message": "offset must be a non-negative integer"
                })),
            )
                .into_response();
        }
    };

    let page = match PageRequest::from_query(limit, offset, state.pagination.into()) {
        Ok(p) => p,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_pagination",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
    };

    let filter = TransactionFilter { date_from, date_to };
    let tx_repo = TransactionRepository::new((*state.db).clone());

    match tx_repo.list(auth.user_id(), &filter, &page).await {
        Ok(rows) => {
            let count = rows.len() as u64;
            let items: Vec<TransactionResponse> =
                rows.into_iter().map(TransactionResponse::from).collect();

            (
                StatusCode::OK,
                Json(json!({
                    "transactions": items,
                    "pagination": PageMeta::new(page, count)
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// POST `/transactions` - Record a new transaction for the caller.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateTransactionRequest>,
) -> impl IntoResponse {
    // Parse transaction type
    let Some(kind) = string_to_kind(&payload.kind) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_type",
                "message": "type must be \"income\" or \"expense\""
            })),
        )
            .into_response();
    };

    let tx_repo = TransactionRepository::new((*state.db).clone());
    let input = NewTransaction {
        user_id: auth.user_id(),
        date: payload.date,
        description: payload.description,
        category: payload.category,
        amount: payload.amount,
        kind,
    };

    match tx_repo.insert(input).await {
        Ok(stored) => {
            info!(
                user_id = %stored.user_id,
                transaction_id = stored.id,
                "Transaction recorded"
            );
            (StatusCode::CREATED, Json(TransactionResponse::from(stored))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_date(raw: &str) -> Result<NaiveDate, ()> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ())
}

fn kind_to_string(kind: TransactionKind) -> String {
    match kind {
        TransactionKind::Income => "income".to_string(),
        TransactionKind::Expense => "expense".to_string(),
    }
}

fn string_to_kind(s: &str) -> Option<TransactionKind> {
    match s {
        "income" => Some(TransactionKind::Income),
        "expense" => Some(TransactionKind::Expense),
        _ => None,
    }
}
