//! Statistics API endpoint.

use api_types::stats::{CategoryRow, StatsResponse};
use axum::{
    Json,
    extract::{Query, State},
};

use engine::DateRange;

use crate::expenses::ListQuery;
use crate::{ServerError, server::ServerState};

/// Aggregated totals and per-category breakdown for one owner, optionally
/// narrowed to a `[from, to)` date window.
pub async fn get_stats(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<StatsResponse>, ServerError> {
    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let summary = state
        .engine
        .stats(query.user_id.as_deref(), &range)
        .await?;

    let categories = summary
        .categories
        .into_iter()
        .map(|share| CategoryRow {
            category: share.category,
            total: share.total,
            percentage: share.percentage,
        })
        .collect();

    Ok(Json(StatsResponse {
        total_expenses: summary.total_expenses,
        total_income: summary.total_income,
        net: summary.net,
        categories,
    }))
}
