//! Savings challenges table.
//!
//! A challenge is a self-set (or assistant-suggested) savings goal with an
//! optional deadline. Completion is manual; the engine never closes one.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub challenge: String,
    pub challenge_end: Option<NaiveDate>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    pub fn new(
        challenge: String,
        challenge_end: Option<NaiveDate>,
        user_id: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            challenge,
            challenge_end,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub challenge: String,
    pub challenge_end: Option<Date>,
    pub user_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Challenge {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            challenge: model.challenge,
            challenge_end: model.challenge_end,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Challenge> for ActiveModel {
    fn from(challenge: &Challenge) -> Self {
        Self {
            id: ActiveValue::Set(challenge.id.clone()),
            challenge: ActiveValue::Set(challenge.challenge.clone()),
            challenge_end: ActiveValue::Set(challenge.challenge_end),
            user_id: ActiveValue::Set(challenge.user_id.clone()),
            created_at: ActiveValue::Set(challenge.created_at),
            updated_at: ActiveValue::Set(challenge.updated_at),
        }
    }
}
