use axum::{Json, http::StatusCode, response::IntoResponse};

use api_types::{ApiError, ErrorBody, FieldErrorView};
use assist::AssistError;
use engine::{EngineError, FieldError};

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod challenges;
mod expenses;
mod incomes;
mod rates;
mod server;
mod special_payments;
mod stats;
mod suggestions;
mod users;
mod voice;

pub mod types {
    pub use api_types::challenge::ChallengeView;
    pub use api_types::expense::ExpenseView;
    pub use api_types::income::IncomeView;
    pub use api_types::special_payment::SpecialPaymentView;
    pub use api_types::stats::StatsResponse;
    pub use api_types::user::{Login, UserView};
    pub use api_types::{ApiError, Deleted, ErrorBody};
}

pub enum ServerError {
    Engine(EngineError),
    Assist(AssistError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) | EngineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Validation(_)
        | EngineError::InvalidId(_)
        | EngineError::DuplicateEmail
        | EngineError::DuplicateUsername
        | EngineError::InvalidCredentials
        | EngineError::MissingParameter(_) => StatusCode::BAD_REQUEST,
    }
}

fn kind_for_engine_error(err: &EngineError) -> &'static str {
    match err {
        EngineError::Validation(_) => "validation",
        EngineError::InvalidId(_) => "invalid_id",
        EngineError::NotFound(_) => "not_found",
        EngineError::DuplicateEmail => "duplicate_email",
        EngineError::DuplicateUsername => "duplicate_username",
        EngineError::InvalidCredentials => "invalid_credentials",
        EngineError::MissingParameter(_) => "missing_parameter",
        EngineError::Database(_) | EngineError::Internal(_) => "internal",
    }
}

fn field_views(fields: Vec<FieldError>) -> Vec<FieldErrorView> {
    fields
        .into_iter()
        .map(|f| FieldErrorView {
            field: f.field,
            message: f.message,
        })
        .collect()
}

/// Collapse an engine error into the uniform envelope body.
///
/// Storage and internal failures are logged here and reported generically;
/// their detail never reaches a client.
fn body_for_engine_error(err: EngineError) -> ErrorBody {
    let kind = kind_for_engine_error(&err).to_string();
    match err {
        EngineError::Validation(fields) => ErrorBody {
            kind,
            message: "validation failed".to_string(),
            fields: Some(field_views(fields)),
        },
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            ErrorBody {
                kind,
                message: "internal server error".to_string(),
                fields: None,
            }
        }
        EngineError::Internal(detail) => {
            tracing::error!("internal error: {detail}");
            ErrorBody {
                kind,
                message: "internal server error".to_string(),
                fields: None,
            }
        }
        other => ErrorBody {
            kind,
            message: other.to_string(),
            fields: None,
        },
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::Assist(err) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    kind: "assist".to_string(),
                    message: err.to_string(),
                    fields: None,
                },
            ),
            ServerError::Generic(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    kind: "bad_request".to_string(),
                    message,
                    fields: None,
                },
            ),
        };

        (status, Json(ApiError { error: body })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<AssistError> for ServerError {
    fn from(value: AssistError) -> Self {
        Self::Assist(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("expense".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        let res = ServerError::from(EngineError::Validation(vec![FieldError::new(
            "amount",
            "must be positive",
        )]))
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_email_maps_to_400() {
        let res = ServerError::from(EngineError::DuplicateEmail).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_failure_maps_to_500() {
        let res = ServerError::from(EngineError::Database(sea_orm::DbErr::Custom(
            "boom".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn assist_failure_maps_to_502() {
        let res =
            ServerError::from(AssistError::Malformed("bad reply".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
