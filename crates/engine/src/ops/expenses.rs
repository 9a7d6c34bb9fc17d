//! Expense CRUD.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use serde_json::Value;

use crate::{EngineError, Expense, ResultEngine, expenses, validate};

use super::{DateRange, Engine, parse_id, require_owner};

impl Engine {
    /// Validate a raw create payload and persist the expense.
    pub async fn create_expense(&self, payload: &Value) -> ResultEngine<Expense> {
        let draft = validate::expense_create(payload).map_err(EngineError::Validation)?;
        let expense = Expense::new(
            draft.amount,
            draft.category,
            draft.date,
            draft.reason,
            draft.user_id,
            Utc::now(),
        );
        let model: expenses::ActiveModel = (&expense).into();
        model.insert(&self.database).await?;
        Ok(expense)
    }

    pub async fn expense(&self, id: &str) -> ResultEngine<Expense> {
        let id = parse_id(id)?;
        expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Expense::from)
            .ok_or_else(|| EngineError::NotFound("expense".to_string()))
    }

    /// All expenses of one owner, newest date first.
    pub async fn list_expenses(
        &self,
        user_id: Option<&str>,
        range: &DateRange,
    ) -> ResultEngine<Vec<Expense>> {
        let owner = require_owner(user_id)?;
        range.validate()?;

        let mut query = expenses::Entity::find().filter(expenses::Column::UserId.eq(owner));
        if let Some(from) = range.from {
            query = query.filter(expenses::Column::Date.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(expenses::Column::Date.lt(to));
        }

        let models = query
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Apply a validated partial update; untouched fields keep their stored
    /// value.
    pub async fn update_expense(&self, id: &str, payload: &Value) -> ResultEngine<Expense> {
        let id = parse_id(id)?;
        let patch = validate::expense_update(payload).map_err(EngineError::Validation)?;

        let model = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("expense".to_string()))?;

        let mut active: expenses::ActiveModel = model.into();
        if let Some(amount) = patch.amount {
            active.amount = ActiveValue::Set(amount);
        }
        if let Some(category) = patch.category {
            active.category = ActiveValue::Set(category);
        }
        if let Some(date) = patch.date {
            active.date = ActiveValue::Set(date);
        }
        if let Some(reason) = patch.reason {
            active.reason = ActiveValue::Set(reason);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(&self.database).await?;
        Ok(updated.into())
    }

    /// Deleting an id that does not exist surfaces `NotFound`; a second
    /// delete is not a silent success.
    pub async fn delete_expense(&self, id: &str) -> ResultEngine<()> {
        let id = parse_id(id)?;
        let result = expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("expense".to_string()));
        }
        Ok(())
    }
}
