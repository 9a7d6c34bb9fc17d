//! Validation layer: untyped JSON payloads in, normalized values or
//! field-level errors out.
//!
//! Every function takes a parsed JSON payload and returns either a
//! normalized value (coercions applied: numeric strings become numbers, date
//! strings become dates, labels are trimmed and NFC-normalized) or the full
//! list of rejected fields. Malformed input is a reportable outcome, never a
//! panic.
//!
//! Create schemas require every business field; update schemas accept any
//! subset, reject identity fields and reject an empty update.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::error::FieldError;
use crate::users::Position;

/// Longest accepted free-text reason, in characters.
const REASON_MAX: usize = 500;
const CHALLENGE_MIN: usize = 3;
const CHALLENGE_MAX: usize = 500;
const PASSWORD_MIN: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Normalized values
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub reason: Option<String>,
    pub user_id: String,
}

/// Partial update; `None` leaves the stored field unchanged.
///
/// `reason` distinguishes "absent" (`None`) from "explicit null"
/// (`Some(None)`), which clears the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub reason: Option<Option<String>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.reason.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IncomeDraft {
    pub amount: f64,
    pub source: String,
    pub date: NaiveDate,
    pub user_id: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncomePatch {
    pub amount: Option<f64>,
    pub source: Option<String>,
    pub date: Option<NaiveDate>,
}

impl IncomePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.source.is_none() && self.date.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpecialPaymentDraft {
    pub paid_amount: f64,
    pub paid_date: NaiveDate,
    pub reason: Option<String>,
    pub user_id: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecialPaymentPatch {
    pub paid_amount: Option<f64>,
    pub paid_date: Option<NaiveDate>,
    pub reason: Option<Option<String>>,
}

impl SpecialPaymentPatch {
    pub fn is_empty(&self) -> bool {
        self.paid_amount.is_none() && self.paid_date.is_none() && self.reason.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeDraft {
    pub challenge: String,
    pub challenge_end: Option<NaiveDate>,
    pub user_id: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChallengePatch {
    pub challenge: Option<String>,
    pub challenge_end: Option<Option<NaiveDate>>,
}

impl ChallengePatch {
    pub fn is_empty(&self) -> bool {
        self.challenge.is_none() && self.challenge_end.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub contact_number: Option<String>,
    pub position: Position,
    pub income_sources: Vec<String>,
    pub financial_goals: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Plaintext; re-hashed by the user service before persisting.
    pub password: Option<String>,
    pub contact_number: Option<Option<String>>,
    pub position: Option<Position>,
    pub income_sources: Option<Vec<String>>,
    pub financial_goals: Option<Vec<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.contact_number.is_none()
            && self.position.is_none()
            && self.income_sources.is_none()
            && self.financial_goals.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Coercion helpers
// ────────────────────────────────────────────────────────────────────────────

type FieldResult<T> = Result<T, String>;

fn as_object(payload: &Value) -> Result<&Map<String, Value>, Vec<FieldError>> {
    payload
        .as_object()
        .ok_or_else(|| vec![FieldError::new("payload", "expected a JSON object")])
}

/// Numbers and numeric strings both coerce; the result must be finite and
/// strictly positive.
fn coerce_amount(value: &Value) -> FieldResult<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| "must be a number".to_string())?;

    if !number.is_finite() {
        return Err("must be a finite number".to_string());
    }
    if number <= 0.0 {
        return Err("must be positive".to_string());
    }
    Ok(number)
}

/// `YYYY-MM-DD` or an RFC3339 timestamp (truncated to its date).
fn coerce_date(value: &Value) -> FieldResult<NaiveDate> {
    let raw = value
        .as_str()
        .ok_or_else(|| "invalid date format".to_string())?
        .trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| "invalid date format".to_string())
}

/// Required free text: trimmed, NFC-normalized, non-empty.
fn coerce_text(value: &Value) -> FieldResult<String> {
    let raw = value
        .as_str()
        .ok_or_else(|| "must be a string".to_string())?;
    let normalized: String = raw.trim().nfc().collect();
    if normalized.is_empty() {
        return Err("is required".to_string());
    }
    Ok(normalized)
}

fn coerce_bounded_text(value: &Value, min: usize, max: usize) -> FieldResult<String> {
    let text = coerce_text(value)?;
    let chars = text.chars().count();
    if chars < min {
        return Err(format!("must be at least {min} characters"));
    }
    if chars > max {
        return Err(format!("must be less than {max} characters"));
    }
    Ok(text)
}

/// Record identifiers are UUID strings; anything else is rejected before the
/// persistence layer ever sees it.
fn coerce_id(value: &Value) -> FieldResult<String> {
    let raw = value
        .as_str()
        .ok_or_else(|| "must be a string".to_string())?;
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| "is not a valid identifier".to_string())
}

/// Non-empty array of free-text labels; duplicates allowed, order kept.
fn coerce_labels(value: &Value) -> FieldResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| "must be an array of strings".to_string())?;
    let mut labels = Vec::with_capacity(items.len());
    for item in items {
        let label = item
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "must contain non-empty strings".to_string())?;
        labels.push(label.nfc().collect());
    }
    if labels.is_empty() {
        return Err("must not be empty".to_string());
    }
    Ok(labels)
}

fn coerce_email(value: &Value) -> FieldResult<String> {
    let email = coerce_text(value).map_err(|_| "must be a valid email".to_string())?;
    let Some((local, domain)) = email.split_once('@') else {
        return Err("must be a valid email".to_string());
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err("must be a valid email".to_string());
    }
    Ok(email)
}

/// Collects a required field, pushing into `errors` when missing or invalid.
fn required<T>(
    fields: &Map<String, Value>,
    key: &str,
    coerce: impl Fn(&Value) -> FieldResult<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match fields.get(key) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(key, "is required"));
            None
        }
        Some(value) => match coerce(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.push(FieldError::new(key, message));
                None
            }
        },
    }
}

/// Collects an optional field; absent and explicit-null both yield `None`.
fn optional<T>(
    fields: &Map<String, Value>,
    key: &str,
    coerce: impl Fn(&Value) -> FieldResult<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match coerce(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.push(FieldError::new(key, message));
                None
            }
        },
    }
}

/// Optional field for patches: distinguishes absent (`None`) from explicit
/// null (`Some(None)`).
fn patchable<T>(
    fields: &Map<String, Value>,
    key: &str,
    coerce: impl Fn(&Value) -> FieldResult<T>,
    errors: &mut Vec<FieldError>,
) -> Option<Option<T>> {
    match fields.get(key) {
        None => None,
        Some(Value::Null) => Some(None),
        Some(value) => match coerce(value) {
            Ok(parsed) => Some(Some(parsed)),
            Err(message) => {
                errors.push(FieldError::new(key, message));
                None
            }
        },
    }
}

/// Update payloads must not try to rewrite identity or server-assigned
/// fields.
fn reject_fixed_fields(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    for key in ["id", "userId", "createdAt", "updatedAt"] {
        if fields.contains_key(key) {
            errors.push(FieldError::new(key, "cannot be updated"));
        }
    }
}

fn finish<T>(value: Option<T>, errors: Vec<FieldError>) -> Result<T, Vec<FieldError>> {
    match value {
        Some(value) if errors.is_empty() => Ok(value),
        _ => Err(errors),
    }
}

fn reject_empty_update(is_empty: bool, errors: &mut Vec<FieldError>) {
    if is_empty && errors.is_empty() {
        errors.push(FieldError::new(
            "payload",
            "at least one field must be provided for update",
        ));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Expense
// ────────────────────────────────────────────────────────────────────────────

pub fn expense_create(payload: &Value) -> Result<ExpenseDraft, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();

    let amount = required(fields, "amount", coerce_amount, &mut errors);
    let category = required(fields, "category", coerce_text, &mut errors);
    let date = required(fields, "date", coerce_date, &mut errors);
    let reason = optional(fields, "reason", |v| {
        coerce_bounded_text(v, 1, REASON_MAX)
    }, &mut errors);
    let user_id = required(fields, "userId", coerce_id, &mut errors);

    let draft = match (amount, category, date, user_id) {
        (Some(amount), Some(category), Some(date), Some(user_id)) => Some(ExpenseDraft {
            amount,
            category,
            date,
            reason,
            user_id,
        }),
        _ => None,
    };
    finish(draft, errors)
}

pub fn expense_update(payload: &Value) -> Result<ExpensePatch, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();
    reject_fixed_fields(fields, &mut errors);

    let patch = ExpensePatch {
        amount: optional(fields, "amount", coerce_amount, &mut errors),
        category: optional(fields, "category", coerce_text, &mut errors),
        date: optional(fields, "date", coerce_date, &mut errors),
        reason: patchable(fields, "reason", |v| {
            coerce_bounded_text(v, 1, REASON_MAX)
        }, &mut errors),
    };

    reject_empty_update(patch.is_empty(), &mut errors);
    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

// ────────────────────────────────────────────────────────────────────────────
// Income
// ────────────────────────────────────────────────────────────────────────────

pub fn income_create(payload: &Value) -> Result<IncomeDraft, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();

    let amount = required(fields, "amount", coerce_amount, &mut errors);
    let source = required(fields, "source", coerce_text, &mut errors);
    let date = required(fields, "date", coerce_date, &mut errors);
    let user_id = required(fields, "userId", coerce_id, &mut errors);

    let draft = match (amount, source, date, user_id) {
        (Some(amount), Some(source), Some(date), Some(user_id)) => Some(IncomeDraft {
            amount,
            source,
            date,
            user_id,
        }),
        _ => None,
    };
    finish(draft, errors)
}

pub fn income_update(payload: &Value) -> Result<IncomePatch, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();
    reject_fixed_fields(fields, &mut errors);

    let patch = IncomePatch {
        amount: optional(fields, "amount", coerce_amount, &mut errors),
        source: optional(fields, "source", coerce_text, &mut errors),
        date: optional(fields, "date", coerce_date, &mut errors),
    };

    reject_empty_update(patch.is_empty(), &mut errors);
    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

// ────────────────────────────────────────────────────────────────────────────
// Special payment
// ────────────────────────────────────────────────────────────────────────────

pub fn special_payment_create(payload: &Value) -> Result<SpecialPaymentDraft, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();

    let paid_amount = required(fields, "paidAmount", coerce_amount, &mut errors);
    let paid_date = required(fields, "paidDate", coerce_date, &mut errors);
    let reason = optional(fields, "reason", |v| {
        coerce_bounded_text(v, 1, REASON_MAX)
    }, &mut errors);
    let user_id = required(fields, "userId", coerce_id, &mut errors);

    let draft = match (paid_amount, paid_date, user_id) {
        (Some(paid_amount), Some(paid_date), Some(user_id)) => Some(SpecialPaymentDraft {
            paid_amount,
            paid_date,
            reason,
            user_id,
        }),
        _ => None,
    };
    finish(draft, errors)
}

pub fn special_payment_update(payload: &Value) -> Result<SpecialPaymentPatch, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();
    reject_fixed_fields(fields, &mut errors);

    let patch = SpecialPaymentPatch {
        paid_amount: optional(fields, "paidAmount", coerce_amount, &mut errors),
        paid_date: optional(fields, "paidDate", coerce_date, &mut errors),
        reason: patchable(fields, "reason", |v| {
            coerce_bounded_text(v, 1, REASON_MAX)
        }, &mut errors),
    };

    reject_empty_update(patch.is_empty(), &mut errors);
    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

// ────────────────────────────────────────────────────────────────────────────
// Challenge
// ────────────────────────────────────────────────────────────────────────────

pub fn challenge_create(payload: &Value) -> Result<ChallengeDraft, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();

    let challenge = required(fields, "challenge", |v| {
        coerce_bounded_text(v, CHALLENGE_MIN, CHALLENGE_MAX)
    }, &mut errors);
    let challenge_end = optional(fields, "challengeEnd", coerce_date, &mut errors);
    let user_id = required(fields, "userId", coerce_id, &mut errors);

    let draft = match (challenge, user_id) {
        (Some(challenge), Some(user_id)) => Some(ChallengeDraft {
            challenge,
            challenge_end,
            user_id,
        }),
        _ => None,
    };
    finish(draft, errors)
}

pub fn challenge_update(payload: &Value) -> Result<ChallengePatch, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();
    reject_fixed_fields(fields, &mut errors);

    let patch = ChallengePatch {
        challenge: optional(fields, "challenge", |v| {
            coerce_bounded_text(v, CHALLENGE_MIN, CHALLENGE_MAX)
        }, &mut errors),
        challenge_end: patchable(fields, "challengeEnd", coerce_date, &mut errors),
    };

    reject_empty_update(patch.is_empty(), &mut errors);
    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

// ────────────────────────────────────────────────────────────────────────────
// User
// ────────────────────────────────────────────────────────────────────────────

fn coerce_position(value: &Value) -> FieldResult<Position> {
    let label = value
        .as_str()
        .ok_or_else(|| "must be a string".to_string())?;
    Position::parse(label).ok_or_else(|| "is not a recognized position".to_string())
}

fn coerce_password(value: &Value) -> FieldResult<String> {
    let raw = value
        .as_str()
        .ok_or_else(|| "must be a string".to_string())?;
    if raw.chars().count() < PASSWORD_MIN {
        return Err(format!("must be at least {PASSWORD_MIN} characters"));
    }
    Ok(raw.to_string())
}

pub fn user_register(payload: &Value) -> Result<Registration, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();

    let name = required(fields, "name", coerce_text, &mut errors);
    let email = required(fields, "email", coerce_email, &mut errors);
    let username = required(fields, "username", coerce_text, &mut errors);
    let password = required(fields, "password", coerce_password, &mut errors);
    let contact_number = optional(fields, "contactNumber", coerce_text, &mut errors);
    let position = required(fields, "position", coerce_position, &mut errors);
    let income_sources = required(fields, "incomeSources", coerce_labels, &mut errors);
    let financial_goals = required(fields, "financialGoals", coerce_labels, &mut errors);

    let registration = match (
        name,
        email,
        username,
        password,
        position,
        income_sources,
        financial_goals,
    ) {
        (
            Some(name),
            Some(email),
            Some(username),
            Some(password),
            Some(position),
            Some(income_sources),
            Some(financial_goals),
        ) => Some(Registration {
            name,
            email,
            username,
            password,
            contact_number,
            position,
            income_sources,
            financial_goals,
        }),
        _ => None,
    };
    finish(registration, errors)
}

pub fn user_update(payload: &Value) -> Result<ProfilePatch, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();
    for key in ["id", "createdAt", "updatedAt"] {
        if fields.contains_key(key) {
            errors.push(FieldError::new(key, "cannot be updated"));
        }
    }

    let patch = ProfilePatch {
        name: optional(fields, "name", coerce_text, &mut errors),
        email: optional(fields, "email", coerce_email, &mut errors),
        username: optional(fields, "username", coerce_text, &mut errors),
        password: optional(fields, "password", coerce_password, &mut errors),
        contact_number: patchable(fields, "contactNumber", coerce_text, &mut errors),
        position: optional(fields, "position", coerce_position, &mut errors),
        income_sources: optional(fields, "incomeSources", coerce_labels, &mut errors),
        financial_goals: optional(fields, "financialGoals", coerce_labels, &mut errors),
    };

    reject_empty_update(patch.is_empty(), &mut errors);
    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}

pub fn login(payload: &Value) -> Result<Credentials, Vec<FieldError>> {
    let fields = as_object(payload)?;
    let mut errors = Vec::new();

    let email = required(fields, "email", coerce_email, &mut errors);
    let password = required(fields, "password", coerce_password, &mut errors);

    let credentials = match (email, password) {
        (Some(email), Some(password)) => Some(Credentials { email, password }),
        _ => None,
    };
    finish(credentials, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_names(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    const USER_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    #[test]
    fn expense_create_coerces_numeric_strings_and_dates() {
        let draft = expense_create(&json!({
            "amount": "12.50",
            "category": "Groceries",
            "date": "2024-01-05",
            "userId": USER_ID,
        }))
        .unwrap();

        assert_eq!(draft.amount, 12.5);
        assert_eq!(draft.category, "Groceries");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(draft.reason, None);
    }

    #[test]
    fn expense_create_accepts_rfc3339_dates() {
        let draft = expense_create(&json!({
            "amount": 5,
            "category": "Coffee",
            "date": "2024-03-10T08:30:00+01:00",
            "userId": USER_ID,
        }))
        .unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn expense_create_rejects_zero_and_negative_amounts() {
        for amount in [json!(0), json!(-3.5), json!("0")] {
            let errors = expense_create(&json!({
                "amount": amount,
                "category": "Food",
                "date": "2024-01-01",
                "userId": USER_ID,
            }))
            .unwrap_err();
            assert_eq!(field_names(&errors), vec!["amount"]);
        }
    }

    #[test]
    fn expense_create_collects_all_missing_fields() {
        let errors = expense_create(&json!({})).unwrap_err();
        assert_eq!(
            field_names(&errors),
            vec!["amount", "category", "date", "userId"]
        );
    }

    #[test]
    fn expense_create_rejects_malformed_id() {
        let errors = expense_create(&json!({
            "amount": 1,
            "category": "Food",
            "date": "2024-01-01",
            "userId": "not-an-id",
        }))
        .unwrap_err();
        assert_eq!(field_names(&errors), vec!["userId"]);
    }

    #[test]
    fn non_object_payload_is_reported_not_thrown() {
        let errors = expense_create(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(field_names(&errors), vec!["payload"]);
    }

    #[test]
    fn expense_update_rejects_empty_payload() {
        let errors = expense_update(&json!({})).unwrap_err();
        assert_eq!(field_names(&errors), vec!["payload"]);
    }

    #[test]
    fn expense_update_rejects_identity_fields() {
        let errors = expense_update(&json!({"id": "abc", "amount": 3})).unwrap_err();
        assert_eq!(field_names(&errors), vec!["id"]);
    }

    #[test]
    fn expense_update_null_reason_clears_it() {
        let patch = expense_update(&json!({"reason": null, "amount": 2})).unwrap();
        assert_eq!(patch.reason, Some(None));
        assert_eq!(patch.amount, Some(2.0));
    }

    #[test]
    fn special_payment_caps_reason_length() {
        let errors = special_payment_create(&json!({
            "paidAmount": 10,
            "paidDate": "2024-02-02",
            "reason": "x".repeat(501),
            "userId": USER_ID,
        }))
        .unwrap_err();
        assert_eq!(field_names(&errors), vec!["reason"]);
    }

    #[test]
    fn challenge_bounds_description_length() {
        let too_short = challenge_create(&json!({
            "challenge": "no",
            "userId": USER_ID,
        }))
        .unwrap_err();
        assert_eq!(field_names(&too_short), vec!["challenge"]);

        let too_long = challenge_create(&json!({
            "challenge": "x".repeat(501),
            "userId": USER_ID,
        }))
        .unwrap_err();
        assert_eq!(field_names(&too_long), vec!["challenge"]);
    }

    #[test]
    fn challenge_end_is_nullable_and_optional() {
        let without = challenge_create(&json!({
            "challenge": "Cook at home twice a week",
            "userId": USER_ID,
        }))
        .unwrap();
        assert_eq!(without.challenge_end, None);

        let with_null = challenge_create(&json!({
            "challenge": "Cook at home twice a week",
            "challengeEnd": null,
            "userId": USER_ID,
        }))
        .unwrap();
        assert_eq!(with_null.challenge_end, None);
    }

    #[test]
    fn register_requires_nonempty_label_arrays() {
        let errors = user_register(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "username": "alice",
            "password": "secret1",
            "position": "Other",
            "incomeSources": [],
            "financialGoals": ["Buy a house"],
        }))
        .unwrap_err();
        assert_eq!(field_names(&errors), vec!["incomeSources"]);
    }

    #[test]
    fn register_rejects_unknown_position_and_bad_email() {
        let errors = user_register(&json!({
            "name": "Alice",
            "email": "not-an-email",
            "username": "alice",
            "password": "secret1",
            "position": "Astronaut",
            "incomeSources": ["Salary"],
            "financialGoals": ["Save"],
        }))
        .unwrap_err();
        assert_eq!(field_names(&errors), vec!["email", "position"]);
    }

    #[test]
    fn register_keeps_duplicate_labels() {
        let registration = user_register(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "username": "alice",
            "password": "secret1",
            "position": "Private Employee",
            "incomeSources": ["Salary", "Salary"],
            "financialGoals": ["Save"],
        }))
        .unwrap();
        assert_eq!(registration.income_sources, vec!["Salary", "Salary"]);
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = login(&json!({"email": "alice@example.com"})).unwrap_err();
        assert_eq!(field_names(&errors), vec!["password"]);
    }

    #[test]
    fn user_update_rehash_marker_passes_through_plaintext() {
        let patch = user_update(&json!({"password": "new-secret"})).unwrap();
        assert_eq!(patch.password.as_deref(), Some("new-secret"));
    }
}
