//! OpenAI-style client for transcription and chat-completion drafting.
//!
//! The response parsers live here as pure functions so the tolerant-input
//! behavior can be tested without a network.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AssistError, Assistant, ChallengeDraft, EntryDraft, EntryKind, SpeechToText};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_MODEL: &str = "gpt-3.5-turbo";
const TRANSCRIPTION_MODEL: &str = "whisper-1";

#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, base_url: Option<&str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String, AssistError> {
        let body = json!({
            "model": CHAT_MODEL,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("assistant chat call failed with status {status}");
            return Err(AssistError::Rejected(format!("status {status}")));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AssistError::Malformed("empty completion".to_string()))
    }
}

#[async_trait]
impl SpeechToText for OpenAiClient {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, AssistError> {
        let part = reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", TRANSCRIPTION_MODEL)
            .text("response_format", "json");

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("transcription call failed with status {status}");
            return Err(AssistError::Rejected(format!("status {status}")));
        }

        let parsed: TranscriptionResponse = response.json().await?;
        Ok(parsed.text)
    }
}

#[async_trait]
impl Assistant for OpenAiClient {
    async fn draft_entry(
        &self,
        kind: EntryKind,
        transcript: &str,
        today: NaiveDate,
    ) -> Result<EntryDraft, AssistError> {
        let label_key = kind.label_key();
        let system = format!(
            "You are a financial assistant that extracts transaction information \
             from voice transcripts. Return a JSON object with these fields: \
             amount (number, required), {label_key} (string, required), \
             date (string in YYYY-MM-DD format, default to today if not mentioned), \
             reason (string, optional)."
        );
        let content = self.chat(&system, transcript).await?;
        parse_entry_draft(&content, kind, today)
    }

    async fn suggest_challenges(
        &self,
        summary: &Value,
        today: NaiveDate,
    ) -> Result<Vec<ChallengeDraft>, AssistError> {
        let system = format!(
            "You are a financial advisor that creates personalized saving \
             challenges from a user's expense and income summary. Today is \
             {today}. Return a JSON array of objects with fields: challenge \
             (string, a specific and measurable challenge description) and \
             challengeEnd (string in YYYY-MM-DD format, a realistic end date \
             between one week and three months out)."
        );
        let content = self.chat(&system, &summary.to_string()).await?;
        parse_challenge_suggestions(&content)
    }
}

fn draft_amount(fields: &Value) -> Option<f64> {
    let amount = match fields.get("amount") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

fn draft_date(fields: &Value, key: &str) -> Option<NaiveDate> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

/// Parse a model reply into draft transaction fields.
///
/// Tolerates an `amount` given as a numeric string and a missing or
/// unparsable date (which falls back to `today`). A missing amount or label
/// is malformed output.
pub fn parse_entry_draft(
    content: &str,
    kind: EntryKind,
    today: NaiveDate,
) -> Result<EntryDraft, AssistError> {
    let fields: Value = serde_json::from_str(content)
        .map_err(|err| AssistError::Malformed(format!("draft is not JSON: {err}")))?;

    let amount = draft_amount(&fields)
        .ok_or_else(|| AssistError::Malformed("draft has no positive amount".to_string()))?;

    let label = fields
        .get(kind.label_key())
        .or_else(|| fields.get("label"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AssistError::Malformed(format!("draft has no {}", kind.label_key()))
        })?;

    let reason = fields
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);

    Ok(EntryDraft {
        amount,
        label: label.to_string(),
        date: draft_date(&fields, "date").unwrap_or(today),
        reason,
    })
}

/// Parse a model reply into challenge suggestions.
///
/// Accepts either a bare array or a `{"challenges": [...]}` wrapper (both
/// shapes show up in practice). Items without a usable description are
/// skipped; an unparsable end date degrades to an open-ended challenge. No
/// usable item at all is malformed output.
pub fn parse_challenge_suggestions(content: &str) -> Result<Vec<ChallengeDraft>, AssistError> {
    let parsed: Value = serde_json::from_str(content)
        .map_err(|err| AssistError::Malformed(format!("suggestions are not JSON: {err}")))?;

    let items = match &parsed {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("challenges")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                AssistError::Malformed("no challenges array in reply".to_string())
            })?,
        _ => {
            return Err(AssistError::Malformed(
                "expected an array of challenges".to_string(),
            ));
        }
    };

    let drafts: Vec<ChallengeDraft> = items
        .iter()
        .filter_map(|item| {
            let challenge = item
                .get("challenge")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())?;
            Some(ChallengeDraft {
                challenge: challenge.to_string(),
                challenge_end: draft_date(item, "challengeEnd"),
            })
        })
        .collect();

    if drafts.is_empty() {
        return Err(AssistError::Malformed(
            "no usable challenge in reply".to_string(),
        ));
    }
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn entry_draft_parses_full_reply() {
        let draft = parse_entry_draft(
            r#"{"amount": 25.50, "category": "Food", "date": "2024-05-30", "reason": "lunch"}"#,
            EntryKind::Expense,
            today(),
        )
        .unwrap();
        assert_eq!(draft.amount, 25.5);
        assert_eq!(draft.label, "Food");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 5, 30).unwrap());
        assert_eq!(draft.reason.as_deref(), Some("lunch"));
    }

    #[test]
    fn entry_draft_defaults_missing_date_to_today() {
        let draft = parse_entry_draft(
            r#"{"amount": "12", "source": "Freelance"}"#,
            EntryKind::Income,
            today(),
        )
        .unwrap();
        assert_eq!(draft.amount, 12.0);
        assert_eq!(draft.date, today());
    }

    #[test]
    fn entry_draft_without_amount_is_malformed() {
        let err = parse_entry_draft(
            r#"{"category": "Food"}"#,
            EntryKind::Expense,
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, AssistError::Malformed(_)));
    }

    #[test]
    fn entry_draft_rejects_non_json_reply() {
        let err =
            parse_entry_draft("Sure! Here is the JSON you asked for", EntryKind::Expense, today())
                .unwrap_err();
        assert!(matches!(err, AssistError::Malformed(_)));
    }

    #[test]
    fn suggestions_accept_bare_array_and_wrapper() {
        let bare = parse_challenge_suggestions(
            r#"[{"challenge": "Limit coffee purchases to twice per week", "challengeEnd": "2024-06-30"}]"#,
        )
        .unwrap();
        assert_eq!(bare.len(), 1);
        assert_eq!(
            bare[0].challenge_end,
            Some(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
        );

        let wrapped = parse_challenge_suggestions(
            r#"{"challenges": [{"challenge": "Save 15% of each paycheck"}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].challenge_end, None);
    }

    #[test]
    fn suggestions_skip_unusable_items_and_tolerate_bad_dates() {
        let drafts = parse_challenge_suggestions(
            r#"[
                {"challenge": ""},
                {"note": "not a challenge"},
                {"challenge": "Cook at home", "challengeEnd": "soon"}
            ]"#,
        )
        .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].challenge, "Cook at home");
        assert_eq!(drafts[0].challenge_end, None);
    }

    #[test]
    fn suggestions_with_nothing_usable_are_malformed() {
        let err = parse_challenge_suggestions(r#"{"challenges": []}"#).unwrap_err();
        assert!(matches!(err, AssistError::Malformed(_)));
    }
}
