//! Income CRUD. Same shape as expenses with `source` instead of `category`.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use serde_json::Value;

use crate::{EngineError, Income, ResultEngine, incomes, validate};

use super::{DateRange, Engine, parse_id, require_owner};

impl Engine {
    pub async fn create_income(&self, payload: &Value) -> ResultEngine<Income> {
        let draft = validate::income_create(payload).map_err(EngineError::Validation)?;
        let income = Income::new(
            draft.amount,
            draft.source,
            draft.date,
            draft.user_id,
            Utc::now(),
        );
        let model: incomes::ActiveModel = (&income).into();
        model.insert(&self.database).await?;
        Ok(income)
    }

    pub async fn income(&self, id: &str) -> ResultEngine<Income> {
        let id = parse_id(id)?;
        incomes::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Income::from)
            .ok_or_else(|| EngineError::NotFound("income".to_string()))
    }

    pub async fn list_incomes(
        &self,
        user_id: Option<&str>,
        range: &DateRange,
    ) -> ResultEngine<Vec<Income>> {
        let owner = require_owner(user_id)?;
        range.validate()?;

        let mut query = incomes::Entity::find().filter(incomes::Column::UserId.eq(owner));
        if let Some(from) = range.from {
            query = query.filter(incomes::Column::Date.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(incomes::Column::Date.lt(to));
        }

        let models = query
            .order_by_desc(incomes::Column::Date)
            .order_by_desc(incomes::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Income::from).collect())
    }

    pub async fn update_income(&self, id: &str, payload: &Value) -> ResultEngine<Income> {
        let id = parse_id(id)?;
        let patch = validate::income_update(payload).map_err(EngineError::Validation)?;

        let model = incomes::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("income".to_string()))?;

        let mut active: incomes::ActiveModel = model.into();
        if let Some(amount) = patch.amount {
            active.amount = ActiveValue::Set(amount);
        }
        if let Some(source) = patch.source {
            active.source = ActiveValue::Set(source);
        }
        if let Some(date) = patch.date {
            active.date = ActiveValue::Set(date);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(&self.database).await?;
        Ok(updated.into())
    }

    pub async fn delete_income(&self, id: &str) -> ResultEngine<()> {
        let id = parse_id(id)?;
        let result = incomes::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("income".to_string()));
        }
        Ok(())
    }
}
