//! User service: registration, authentication, profile maintenance.

use chrono::Utc;
use sea_orm::{ActiveValue, DbErr, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, User, challenges, expenses, incomes, password, special_payments,
    users, validate,
};

use super::{Engine, parse_id, with_tx};

/// The unique indexes on email/username are the authoritative guard; the
/// in-transaction pre-checks only exist to report the friendlier error kind.
/// A constraint violation that slips past them is re-classified here.
fn classify_unique_violation(err: DbErr) -> EngineError {
    let message = err.to_string();
    if message.contains("users.email") {
        return EngineError::DuplicateEmail;
    }
    if message.contains("users.username") {
        return EngineError::DuplicateUsername;
    }
    EngineError::Database(err)
}

impl Engine {
    /// Validate, enforce email/username uniqueness, hash the password and
    /// persist. The returned user carries no credential material.
    pub async fn register(&self, payload: &Value) -> ResultEngine<User> {
        let registration = validate::user_register(payload).map_err(EngineError::Validation)?;
        let password_hash = password::hash(&registration.password)?;
        let now = Utc::now();

        with_tx!(self, |db_tx| {
            let email_taken = users::Entity::find()
                .filter(users::Column::Email.eq(registration.email.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if email_taken {
                return Err(EngineError::DuplicateEmail);
            }

            let username_taken = users::Entity::find()
                .filter(users::Column::Username.eq(registration.username.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if username_taken {
                return Err(EngineError::DuplicateUsername);
            }

            let model = users::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                name: ActiveValue::Set(registration.name),
                email: ActiveValue::Set(registration.email),
                username: ActiveValue::Set(registration.username),
                password_hash: ActiveValue::Set(password_hash),
                contact_number: ActiveValue::Set(registration.contact_number),
                position: ActiveValue::Set(registration.position.as_str().to_string()),
                income_sources: ActiveValue::Set(users::encode_labels(
                    &registration.income_sources,
                )),
                financial_goals: ActiveValue::Set(users::encode_labels(
                    &registration.financial_goals,
                )),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };

            let inserted = model
                .insert(&db_tx)
                .await
                .map_err(classify_unique_violation)?;
            Ok(inserted.into())
        })
    }

    /// Credential check. Unknown email and wrong password yield the same
    /// error kind so accounts cannot be enumerated.
    pub async fn authenticate(&self, payload: &Value) -> ResultEngine<User> {
        let credentials = validate::login(payload).map_err(EngineError::Validation)?;

        let Some(model) = users::Entity::find()
            .filter(users::Column::Email.eq(credentials.email.as_str()))
            .one(&self.database)
            .await?
        else {
            return Err(EngineError::InvalidCredentials);
        };

        if !password::verify(&credentials.password, &model.password_hash) {
            return Err(EngineError::InvalidCredentials);
        }
        Ok(model.into())
    }

    pub async fn user(&self, id: &str) -> ResultEngine<User> {
        let id = parse_id(id)?;
        users::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::NotFound("user".to_string()))
    }

    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    /// Partial profile update; a supplied password is re-hashed, everything
    /// else passes through the validated patch.
    pub async fn update_user(&self, id: &str, payload: &Value) -> ResultEngine<User> {
        let id = parse_id(id)?;
        let patch = validate::user_update(payload).map_err(EngineError::Validation)?;

        let password_hash = match &patch.password {
            Some(plain) => Some(password::hash(plain)?),
            None => None,
        };

        with_tx!(self, |db_tx| {
            let model = users::Entity::find_by_id(id.clone())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("user".to_string()))?;

            if let Some(email) = &patch.email
                && *email != model.email
            {
                let taken = users::Entity::find()
                    .filter(users::Column::Email.eq(email.as_str()))
                    .one(&db_tx)
                    .await?
                    .is_some();
                if taken {
                    return Err(EngineError::DuplicateEmail);
                }
            }
            if let Some(username) = &patch.username
                && *username != model.username
            {
                let taken = users::Entity::find()
                    .filter(users::Column::Username.eq(username.as_str()))
                    .one(&db_tx)
                    .await?
                    .is_some();
                if taken {
                    return Err(EngineError::DuplicateUsername);
                }
            }

            let mut active: users::ActiveModel = model.into();
            if let Some(name) = patch.name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(email) = patch.email {
                active.email = ActiveValue::Set(email);
            }
            if let Some(username) = patch.username {
                active.username = ActiveValue::Set(username);
            }
            if let Some(hash) = password_hash {
                active.password_hash = ActiveValue::Set(hash);
            }
            if let Some(contact_number) = patch.contact_number {
                active.contact_number = ActiveValue::Set(contact_number);
            }
            if let Some(position) = patch.position {
                active.position = ActiveValue::Set(position.as_str().to_string());
            }
            if let Some(sources) = patch.income_sources {
                active.income_sources = ActiveValue::Set(users::encode_labels(&sources));
            }
            if let Some(goals) = patch.financial_goals {
                active.financial_goals = ActiveValue::Set(users::encode_labels(&goals));
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let updated = active
                .update(&db_tx)
                .await
                .map_err(classify_unique_violation)?;
            Ok(updated.into())
        })
    }

    /// Remove the user together with every record they own, in one DB
    /// transaction, so no orphaned transactions survive the account.
    pub async fn delete_user(&self, id: &str) -> ResultEngine<()> {
        let id = parse_id(id)?;

        with_tx!(self, |db_tx| {
            let exists = users::Entity::find_by_id(id.clone()).one(&db_tx).await?.is_some();
            if !exists {
                return Err(EngineError::NotFound("user".to_string()));
            }

            expenses::Entity::delete_many()
                .filter(expenses::Column::UserId.eq(id.as_str()))
                .exec(&db_tx)
                .await?;
            incomes::Entity::delete_many()
                .filter(incomes::Column::UserId.eq(id.as_str()))
                .exec(&db_tx)
                .await?;
            special_payments::Entity::delete_many()
                .filter(special_payments::Column::UserId.eq(id.as_str()))
                .exec(&db_tx)
                .await?;
            challenges::Entity::delete_many()
                .filter(challenges::Column::UserId.eq(id.as_str()))
                .exec(&db_tx)
                .await?;

            users::Entity::delete_by_id(id.clone()).exec(&db_tx).await?;
            Ok(())
        })
    }
}
