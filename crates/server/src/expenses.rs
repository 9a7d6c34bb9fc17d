//! Expenses API endpoints.
//!
//! List/update/delete are addressed by query parameter (`?userId=` / `?id=`)
//! to match the client contract.

use api_types::{Deleted, expense::ExpenseView};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use engine::{DateRange, EngineError};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount: expense.amount,
        category: expense.category,
        date: expense.date,
        reason: expense.reason,
        user_id: expense.user_id,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

fn require_id(query: IdQuery) -> Result<String, ServerError> {
    query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| EngineError::MissingParameter("id".to_string()).into())
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state.engine.create_expense(&payload).await?;
    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let expenses = state
        .engine
        .list_expenses(query.user_id.as_deref(), &range)
        .await?
        .into_iter()
        .map(map_expense)
        .collect();
    Ok(Json(expenses))
}

pub async fn update(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<Value>,
) -> Result<Json<ExpenseView>, ServerError> {
    let id = require_id(query)?;
    let expense = state.engine.update_expense(&id, &payload).await?;
    Ok(Json(map_expense(expense)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Deleted>, ServerError> {
    let id = require_id(query)?;
    state.engine.delete_expense(&id).await?;
    Ok(Json(Deleted {
        message: "Expense deleted successfully".to_string(),
    }))
}
