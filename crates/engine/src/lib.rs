//! Core services for the finance tracker: entity models, payload
//! validation, user and transaction CRUD, and the pure aggregation engine.
//!
//! The [`Engine`] owns a database connection and exposes one method per
//! service operation. Handlers pass raw JSON payloads in; validation happens
//! here, before any persistence call, and every failure path surfaces a
//! classified [`EngineError`].

pub use challenges::Challenge;
pub use error::{EngineError, FieldError};
pub use expenses::Expense;
pub use incomes::Income;
pub use ops::{DateRange, Engine, EngineBuilder, FinancialSummary};
pub use special_payments::SpecialPayment;
pub use stats::{CategoryShare, CategoryTotal, Summary};
pub use users::{Position, User};

pub mod challenges;
mod error;
pub mod expenses;
pub mod incomes;
mod ops;
mod password;
pub mod special_payments;
pub mod stats;
pub mod users;
pub mod validate;

type ResultEngine<T> = Result<T, EngineError>;
