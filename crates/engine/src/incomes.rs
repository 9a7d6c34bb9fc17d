//! Incomes table.
//!
//! Mirrors the expense shape with `source` in place of `category` and no
//! free-text reason.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stats::Categorized;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    pub amount: f64,
    pub source: String,
    pub date: NaiveDate,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    pub fn new(
        amount: f64,
        source: String,
        date: NaiveDate,
        user_id: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            source,
            date,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Categorized for Income {
    fn label(&self) -> &str {
        &self.source
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub source: String,
    pub date: Date,
    pub user_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Income {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            source: model.source,
            date: model.date,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Income> for ActiveModel {
    fn from(income: &Income) -> Self {
        Self {
            id: ActiveValue::Set(income.id.clone()),
            amount: ActiveValue::Set(income.amount),
            source: ActiveValue::Set(income.source.clone()),
            date: ActiveValue::Set(income.date),
            user_id: ActiveValue::Set(income.user_id.clone()),
            created_at: ActiveValue::Set(income.created_at),
            updated_at: ActiveValue::Set(income.updated_at),
        }
    }
}
