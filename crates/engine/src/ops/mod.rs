use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{EngineError, FieldError, ResultEngine};

mod challenges;
mod expenses;
mod incomes;
mod special_payments;
mod stats;
mod users;

pub use stats::FinancialSummary;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Optional `[from, to)` date window applied by list operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    fn validate(&self) -> ResultEngine<()> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from >= to
        {
            return Err(EngineError::Validation(vec![FieldError::new(
                "from",
                "must be before to",
            )]));
        }
        Ok(())
    }
}

/// Record ids are UUID strings; reject anything else before touching the
/// store.
fn parse_id(raw: &str) -> ResultEngine<String> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| EngineError::InvalidId(raw.to_string()))
}

/// Owner-scoped listing: a missing owner id is a contract violation, not an
/// implicit "all records" query.
fn require_owner(user_id: Option<&str>) -> ResultEngine<String> {
    match user_id {
        Some(raw) if !raw.trim().is_empty() => parse_id(raw),
        _ => Err(EngineError::MissingParameter("userId".to_string())),
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
