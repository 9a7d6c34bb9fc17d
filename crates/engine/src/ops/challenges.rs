//! Savings challenge CRUD.
//!
//! Listing is ordered by creation time, most recent first, so freshly added
//! challenges appear at the top of the board.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use serde_json::Value;

use crate::{Challenge, EngineError, ResultEngine, challenges, validate};

use super::{Engine, parse_id, require_owner};

impl Engine {
    pub async fn create_challenge(&self, payload: &Value) -> ResultEngine<Challenge> {
        let draft = validate::challenge_create(payload).map_err(EngineError::Validation)?;
        let challenge = Challenge::new(
            draft.challenge,
            draft.challenge_end,
            draft.user_id,
            Utc::now(),
        );
        let model: challenges::ActiveModel = (&challenge).into();
        model.insert(&self.database).await?;
        Ok(challenge)
    }

    pub async fn challenge(&self, id: &str) -> ResultEngine<Challenge> {
        let id = parse_id(id)?;
        challenges::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Challenge::from)
            .ok_or_else(|| EngineError::NotFound("challenge".to_string()))
    }

    pub async fn list_challenges(&self, user_id: Option<&str>) -> ResultEngine<Vec<Challenge>> {
        let owner = require_owner(user_id)?;

        let models = challenges::Entity::find()
            .filter(challenges::Column::UserId.eq(owner))
            .order_by_desc(challenges::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Challenge::from).collect())
    }

    pub async fn update_challenge(&self, id: &str, payload: &Value) -> ResultEngine<Challenge> {
        let id = parse_id(id)?;
        let patch = validate::challenge_update(payload).map_err(EngineError::Validation)?;

        let model = challenges::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("challenge".to_string()))?;

        let mut active: challenges::ActiveModel = model.into();
        if let Some(challenge) = patch.challenge {
            active.challenge = ActiveValue::Set(challenge);
        }
        if let Some(challenge_end) = patch.challenge_end {
            active.challenge_end = ActiveValue::Set(challenge_end);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(&self.database).await?;
        Ok(updated.into())
    }

    pub async fn delete_challenge(&self, id: &str) -> ResultEngine<()> {
        let id = parse_id(id)?;
        let result = challenges::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("challenge".to_string()));
        }
        Ok(())
    }
}
