//! Narrow interfaces to the external helper services: speech-to-text
//! transcription, LLM-backed drafting/suggestions, and currency rates.
//!
//! Everything behind these traits is slow and fallible; callers get errors,
//! never retries. LLM replies are free text and are parsed defensively: a
//! malformed or missing field is a recoverable [`AssistError::Malformed`],
//! not a crash.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod openai;
mod rates;

pub use openai::{OpenAiClient, parse_challenge_suggestions, parse_entry_draft};
pub use rates::RateClient;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("assistant request rejected: {0}")]
    Rejected(String),
    #[error("assistant returned malformed output: {0}")]
    Malformed(String),
}

/// Which kind of transaction a voice transcript should be drafted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    /// JSON key the model is asked to use for the grouping label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Expense => "category",
            Self::Income => "source",
        }
    }
}

/// Draft transaction fields extracted from a transcript.
///
/// Nothing here has been validated or persisted; the caller feeds it into
/// the normal create flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub amount: f64,
    pub label: String,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

/// A suggested savings challenge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDraft {
    pub challenge: String,
    pub challenge_end: Option<NaiveDate>,
}

#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe an audio payload. May take seconds.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, AssistError>;
}

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Extract draft transaction fields from a voice transcript.
    ///
    /// `today` fills in the date when the transcript does not mention one.
    async fn draft_entry(
        &self,
        kind: EntryKind,
        transcript: &str,
        today: NaiveDate,
    ) -> Result<EntryDraft, AssistError>;

    /// Suggest savings challenges from a financial summary.
    async fn suggest_challenges(
        &self,
        summary: &serde_json::Value,
        today: NaiveDate,
    ) -> Result<Vec<ChallengeDraft>, AssistError>;
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Exchange rates for a base currency code. Display only.
    async fn rates(&self, base: &str) -> Result<HashMap<String, f64>, AssistError>;
}
