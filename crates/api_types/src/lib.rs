use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Uniform error envelope returned by every failing endpoint.
///
/// `fields` is present only for validation failures and carries one entry per
/// rejected field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ErrorBody,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldErrorView>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldErrorView {
    pub field: String,
    pub message: String,
}

/// Body of a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub message: String,
}

pub mod expense {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: String,
        pub amount: f64,
        pub category: String,
        /// Calendar date of the expense (`YYYY-MM-DD`).
        pub date: NaiveDate,
        pub reason: Option<String>,
        pub user_id: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod income {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeView {
        pub id: String,
        pub amount: f64,
        pub source: String,
        pub date: NaiveDate,
        pub user_id: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod special_payment {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpecialPaymentView {
        pub id: String,
        pub paid_amount: f64,
        pub paid_date: NaiveDate,
        pub reason: Option<String>,
        pub user_id: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod challenge {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChallengeView {
        pub id: String,
        pub challenge: String,
        /// Optional target date; `null` for open-ended challenges.
        pub challenge_end: Option<NaiveDate>,
        pub user_id: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod user {
    use super::*;

    /// A user as returned by the API.
    ///
    /// There is deliberately no password field on this type: the credential
    /// hash never crosses the service boundary.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub id: String,
        pub name: String,
        pub email: String,
        pub username: String,
        pub contact_number: Option<String>,
        pub position: String,
        pub income_sources: Vec<String>,
        pub financial_goals: Vec<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }
}

pub mod stats {
    use super::*;

    /// One row of the per-category breakdown.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryRow {
        pub category: String,
        pub total: f64,
        /// Share of the expense total, in percent. 0 when the total is 0.
        pub percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StatsResponse {
        pub total_expenses: f64,
        pub total_income: f64,
        pub net: f64,
        pub categories: Vec<CategoryRow>,
    }
}

pub mod assist {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TranscribeAudio {
        pub file_name: String,
        /// Raw audio bytes, base64 encoded.
        pub audio_base64: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Transcript {
        pub transcript: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoiceDraft {
        pub transcript: String,
    }

    /// Draft transaction fields extracted from a voice transcript.
    ///
    /// `label` is the category for expenses and the source for incomes.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryDraftView {
        pub amount: f64,
        pub label: String,
        pub date: NaiveDate,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reason: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerateChallenges {
        pub user_id: String,
    }
}

pub mod rates {
    use super::*;
    use std::collections::HashMap;

    /// Display-only exchange rates; never persisted.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RatesResponse {
        pub base: String,
        pub rates: HashMap<String, f64>,
    }
}
