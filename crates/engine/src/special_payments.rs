//! Special payments table.
//!
//! One-off outflows tracked separately from recurring expenses (deposits,
//! repairs, yearly fees).

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialPayment {
    pub id: String,
    pub paid_amount: f64,
    pub paid_date: NaiveDate,
    pub reason: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SpecialPayment {
    pub fn new(
        paid_amount: f64,
        paid_date: NaiveDate,
        reason: Option<String>,
        user_id: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            paid_amount,
            paid_date,
            reason,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "special_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Double")]
    pub paid_amount: f64,
    pub paid_date: Date,
    pub reason: Option<String>,
    pub user_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SpecialPayment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            paid_amount: model.paid_amount,
            paid_date: model.paid_date,
            reason: model.reason,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&SpecialPayment> for ActiveModel {
    fn from(payment: &SpecialPayment) -> Self {
        Self {
            id: ActiveValue::Set(payment.id.clone()),
            paid_amount: ActiveValue::Set(payment.paid_amount),
            paid_date: ActiveValue::Set(payment.paid_date),
            reason: ActiveValue::Set(payment.reason.clone()),
            user_id: ActiveValue::Set(payment.user_id.clone()),
            created_at: ActiveValue::Set(payment.created_at),
            updated_at: ActiveValue::Set(payment.updated_at),
        }
    }
}
