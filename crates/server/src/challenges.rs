//! Savings challenges API endpoints, addressed by path id.

use api_types::{Deleted, challenge::ChallengeView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_challenge(challenge: engine::Challenge) -> ChallengeView {
    ChallengeView {
        id: challenge.id,
        challenge: challenge.challenge,
        challenge_end: challenge.challenge_end,
        user_id: challenge.user_id,
        created_at: challenge.created_at,
        updated_at: challenge.updated_at,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<ChallengeView>), ServerError> {
    let challenge = state.engine.create_challenge(&payload).await?;
    Ok((StatusCode::CREATED, Json(map_challenge(challenge))))
}

/// Most recently created first.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<ChallengeView>>, ServerError> {
    let challenges = state
        .engine
        .list_challenges(query.user_id.as_deref())
        .await?
        .into_iter()
        .map(map_challenge)
        .collect();
    Ok(Json(challenges))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ChallengeView>, ServerError> {
    let challenge = state.engine.challenge(&id).await?;
    Ok(Json(map_challenge(challenge)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<ChallengeView>, ServerError> {
    let challenge = state.engine.update_challenge(&id, &payload).await?;
    Ok(Json(map_challenge(challenge)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_challenge(&id).await?;
    Ok(Json(Deleted {
        message: "Challenge deleted successfully".to_string(),
    }))
}
