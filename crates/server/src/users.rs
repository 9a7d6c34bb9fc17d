//! User API endpoints: registration, login, profile maintenance.
//!
//! Responses are built from the engine's password-stripped `User`; no
//! credential field exists on the wire type.

use api_types::{Deleted, user::UserView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use engine::EngineError;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_user(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        username: user.username,
        contact_number: user.contact_number,
        position: user.position.as_str().to_string(),
        income_sources: user.income_sources,
        financial_goals: user.financial_goals,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

fn require_user_id(query: UserIdQuery) -> Result<String, ServerError> {
    query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| EngineError::MissingParameter("userId".to_string()).into())
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state.engine.register(&payload).await?;
    Ok((StatusCode::CREATED, Json(map_user(user))))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.engine.authenticate(&payload).await?;
    Ok(Json(map_user(user)))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state
        .engine
        .list_users()
        .await?
        .into_iter()
        .map(map_user)
        .collect();
    Ok(Json(users))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.engine.user(&id).await?;
    Ok(Json(map_user(user)))
}

pub async fn update(
    State(state): State<ServerState>,
    Query(query): Query<UserIdQuery>,
    Json(payload): Json<Value>,
) -> Result<Json<UserView>, ServerError> {
    let id = require_user_id(query)?;
    let user = state.engine.update_user(&id, &payload).await?;
    Ok(Json(map_user(user)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Deleted>, ServerError> {
    let id = require_user_id(query)?;
    state.engine.delete_user(&id).await?;
    Ok(Json(Deleted {
        message: "User deleted successfully".to_string(),
    }))
}
