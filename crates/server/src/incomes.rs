//! Incomes API endpoints.

use api_types::{Deleted, income::IncomeView};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde_json::Value;

use engine::DateRange;

use crate::expenses::{IdQuery, ListQuery};
use crate::{ServerError, server::ServerState};

pub(crate) fn map_income(income: engine::Income) -> IncomeView {
    IncomeView {
        id: income.id,
        amount: income.amount,
        source: income.source,
        date: income.date,
        user_id: income.user_id,
        created_at: income.created_at,
        updated_at: income.updated_at,
    }
}

fn require_id(query: IdQuery) -> Result<String, ServerError> {
    query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| engine::EngineError::MissingParameter("id".to_string()).into())
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<IncomeView>), ServerError> {
    let income = state.engine.create_income(&payload).await?;
    Ok((StatusCode::CREATED, Json(map_income(income))))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<IncomeView>>, ServerError> {
    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let incomes = state
        .engine
        .list_incomes(query.user_id.as_deref(), &range)
        .await?
        .into_iter()
        .map(map_income)
        .collect();
    Ok(Json(incomes))
}

pub async fn update(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<Value>,
) -> Result<Json<IncomeView>, ServerError> {
    let id = require_id(query)?;
    let income = state.engine.update_income(&id, &payload).await?;
    Ok(Json(map_income(income)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Deleted>, ServerError> {
    let id = require_id(query)?;
    state.engine.delete_income(&id).await?;
    Ok(Json(Deleted {
        message: "Income deleted successfully".to_string(),
    }))
}
