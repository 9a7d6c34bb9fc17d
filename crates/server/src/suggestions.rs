//! Assistant-generated savings challenges.
//!
//! Builds a digest of the user's recent activity, asks the assistant for
//! suggestions and persists the usable ones through the normal challenge
//! create flow, so they obey the same validation as hand-written challenges.

use api_types::assist::GenerateChallenges;
use api_types::challenge::ChallengeView;
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::json;

use crate::challenges::map_challenge;
use crate::{ServerError, server::ServerState};

pub async fn generate_challenges(
    State(state): State<ServerState>,
    Json(payload): Json<GenerateChallenges>,
) -> Result<(StatusCode, Json<Vec<ChallengeView>>), ServerError> {
    let summary = state.engine.financial_summary(&payload.user_id).await?;
    if summary.is_empty() {
        return Err(ServerError::Generic(
            "not enough financial data to generate challenges".to_string(),
        ));
    }

    let summary_json = serde_json::to_value(&summary)
        .map_err(|err| ServerError::Generic(format!("summary encoding failed: {err}")))?;

    let drafts = state
        .assistant
        .suggest_challenges(&summary_json, Utc::now().date_naive())
        .await?;

    let mut saved = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let challenge = state
            .engine
            .create_challenge(&json!({
                "challenge": draft.challenge,
                "challengeEnd": draft.challenge_end,
                "userId": payload.user_id,
            }))
            .await?;
        saved.push(map_challenge(challenge));
    }

    Ok((StatusCode::CREATED, Json(saved)))
}
