//! Users table and the password-stripped domain view.
//!
//! The stored model carries the argon2 hash; the `User` type handed to
//! callers has no credential field at all, so a hash can never be serialized
//! by accident.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employment position declared at registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    GovernmentEmployee,
    PrivateEmployee,
    SelfEmployee,
    #[default]
    Other,
}

impl Position {
    /// Canonical label stored in the database and returned on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GovernmentEmployee => "Government Employee",
            Self::PrivateEmployee => "Private Employee",
            Self::SelfEmployee => "Self Employee",
            Self::Other => "Other",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Government Employee" => Some(Self::GovernmentEmployee),
            "Private Employee" => Some(Self::PrivateEmployee),
            "Self Employee" => Some(Self::SelfEmployee),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A user with the credential hash stripped.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub contact_number: Option<String>,
    pub position: Position,
    pub income_sources: Vec<String>,
    pub financial_goals: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub contact_number: Option<String>,
    pub position: String,
    /// JSON-encoded array of free-text labels.
    pub income_sources: String,
    /// JSON-encoded array of free-text labels.
    pub financial_goals: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn decode_labels(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

pub(crate) fn encode_labels(labels: &[String]) -> String {
    serde_json::to_string(labels).unwrap_or_else(|_| "[]".to_string())
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            username: model.username,
            contact_number: model.contact_number,
            position: Position::parse(&model.position).unwrap_or_default(),
            income_sources: decode_labels(&model.income_sources),
            financial_goals: decode_labels(&model.financial_goals),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

