//! Aggregate metrics routes for the dashboard header cards.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use finboard_db::TransactionRepository;

/// Creates the metrics routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(get_metrics))
}

/// Response for ledger metrics.
///
/// Amounts are serialized as strings, same as everywhere else in the API.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// Sum of all income amounts.
    #[serde(rename = "totalRevenue")]
    pub total_revenue: String,
    /// Net across the whole ledger (income plus expense, as stored).
    #[serde(rename = "netChange")]
    pub net_change: String,
    /// Sum of all expense amounts.
    #[serde(rename = "cashFlow")]
    pub cash_flow: String,
}

/// GET `/metrics` - Aggregate totals over the caller's whole ledger.
async fn get_metrics(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let tx_repo = TransactionRepository::new((*state.db).clone());

    match tx_repo.summary(auth.user_id()).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(MetricsResponse {
                total_revenue: summary.income_total.to_string(),
                net_change: summary.net.to_string(),
                cash_flow: summary.expense_total.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to compute ledger summary");
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
