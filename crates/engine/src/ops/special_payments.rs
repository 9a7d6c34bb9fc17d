//! Special payment CRUD.
//!
//! Listing is owner-scoped like every other transaction list and ordered by
//! payment date, most recent first.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use serde_json::Value;

use crate::{EngineError, ResultEngine, SpecialPayment, special_payments, validate};

use super::{DateRange, Engine, parse_id, require_owner};

impl Engine {
    pub async fn create_special_payment(&self, payload: &Value) -> ResultEngine<SpecialPayment> {
        let draft = validate::special_payment_create(payload).map_err(EngineError::Validation)?;
        let payment = SpecialPayment::new(
            draft.paid_amount,
            draft.paid_date,
            draft.reason,
            draft.user_id,
            Utc::now(),
        );
        let model: special_payments::ActiveModel = (&payment).into();
        model.insert(&self.database).await?;
        Ok(payment)
    }

    pub async fn special_payment(&self, id: &str) -> ResultEngine<SpecialPayment> {
        let id = parse_id(id)?;
        special_payments::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(SpecialPayment::from)
            .ok_or_else(|| EngineError::NotFound("special payment".to_string()))
    }

    pub async fn list_special_payments(
        &self,
        user_id: Option<&str>,
        range: &DateRange,
    ) -> ResultEngine<Vec<SpecialPayment>> {
        let owner = require_owner(user_id)?;
        range.validate()?;

        let mut query = special_payments::Entity::find()
            .filter(special_payments::Column::UserId.eq(owner));
        if let Some(from) = range.from {
            query = query.filter(special_payments::Column::PaidDate.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(special_payments::Column::PaidDate.lt(to));
        }

        let models = query
            .order_by_desc(special_payments::Column::PaidDate)
            .order_by_desc(special_payments::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(SpecialPayment::from).collect())
    }

    pub async fn update_special_payment(
        &self,
        id: &str,
        payload: &Value,
    ) -> ResultEngine<SpecialPayment> {
        let id = parse_id(id)?;
        let patch = validate::special_payment_update(payload).map_err(EngineError::Validation)?;

        let model = special_payments::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("special payment".to_string()))?;

        let mut active: special_payments::ActiveModel = model.into();
        if let Some(paid_amount) = patch.paid_amount {
            active.paid_amount = ActiveValue::Set(paid_amount);
        }
        if let Some(paid_date) = patch.paid_date {
            active.paid_date = ActiveValue::Set(paid_date);
        }
        if let Some(reason) = patch.reason {
            active.reason = ActiveValue::Set(reason);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(&self.database).await?;
        Ok(updated.into())
    }

    pub async fn delete_special_payment(&self, id: &str) -> ResultEngine<()> {
        let id = parse_id(id)?;
        let result = special_payments::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("special payment".to_string()));
        }
        Ok(())
    }
}
