//! The module contains the errors the engine can throw.
//!
//! Validation problems carry the full list of rejected fields so the API
//! layer can report them per field; everything else is a single classified
//! kind. Database errors stay wrapped and are reported generically by the
//! server, never forwarded to clients.

use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// A single rejected field from the validation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("email already in use")]
    DuplicateEmail,
    #[error("username already in use")]
    DuplicateUsername,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing parameter: {0}")]
    MissingParameter(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::DuplicateEmail, Self::DuplicateEmail) => true,
            (Self::DuplicateUsername, Self::DuplicateUsername) => true,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::MissingParameter(a), Self::MissingParameter(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::Internal(a), Self::Internal(b)) => a == b,
            _ => false,
        }
    }
}
