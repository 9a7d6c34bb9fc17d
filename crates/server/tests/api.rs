use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine as _;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use assist::{AssistError, Assistant, ChallengeDraft, EntryDraft, EntryKind, RateSource, SpeechToText};
use engine::Engine;
use migration::MigratorTrait;
use server::ServerState;

struct StaticSpeech;

#[async_trait]
impl SpeechToText for StaticSpeech {
    async fn transcribe(&self, _audio: Vec<u8>, _file_name: &str) -> Result<String, AssistError> {
        Ok("I spent 25 dollars and 50 cents on lunch".to_string())
    }
}

struct StaticAssistant;

#[async_trait]
impl Assistant for StaticAssistant {
    async fn draft_entry(
        &self,
        kind: EntryKind,
        _transcript: &str,
        today: NaiveDate,
    ) -> Result<EntryDraft, AssistError> {
        Ok(EntryDraft {
            amount: 25.5,
            label: match kind {
                EntryKind::Expense => "Food".to_string(),
                EntryKind::Income => "Freelance".to_string(),
            },
            date: today,
            reason: None,
        })
    }

    async fn suggest_challenges(
        &self,
        _summary: &Value,
        _today: NaiveDate,
    ) -> Result<Vec<ChallengeDraft>, AssistError> {
        Ok(vec![ChallengeDraft {
            challenge: "Limit coffee purchases to twice per week".to_string(),
            challenge_end: NaiveDate::from_ymd_opt(2026, 12, 31),
        }])
    }
}

struct StaticRates;

#[async_trait]
impl RateSource for StaticRates {
    async fn rates(&self, _base: &str) -> Result<HashMap<String, f64>, AssistError> {
        Ok(HashMap::from([("EUR".to_string(), 0.92), ("USD".to_string(), 1.0)]))
    }
}

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    let state = ServerState::new(
        engine,
        Arc::new(StaticAssistant),
        Arc::new(StaticSpeech),
        Arc::new(StaticRates),
    );
    server::router(state)
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register_alice(router: &Router) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/users",
        Some(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "username": "alice",
            "password": "secret1",
            "position": "Other",
            "incomeSources": ["Salary"],
            "financialGoals": ["Emergency fund"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn expense_lifecycle_end_to_end() {
    let router = test_router().await;
    let user_id = register_alice(&router).await;

    let (status, created) = send(
        &router,
        "POST",
        "/expenses",
        Some(json!({
            "amount": 42.50,
            "category": "Groceries",
            "date": "2024-01-05",
            "userId": user_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["amount"], json!(42.5));

    let (status, listed) = send(
        &router,
        "GET",
        &format!("/expenses?userId={user_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["amount"], json!(42.5));
    assert_eq!(items[0]["category"], json!("Groceries"));

    let expense_id = items[0]["id"].as_str().unwrap();
    let (status, deleted) = send(
        &router,
        "DELETE",
        &format!("/expenses?id={expense_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], json!("Expense deleted successfully"));

    let (status, listed) = send(
        &router,
        "GET",
        &format!("/expenses?userId={user_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_failures_use_the_error_envelope() {
    let router = test_router().await;
    let user_id = register_alice(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/expenses",
        Some(json!({
            "amount": 0,
            "category": "Food",
            "date": "2024-01-01",
            "userId": user_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], json!("validation"));
    assert_eq!(body["error"]["fields"][0]["field"], json!("amount"));
}

#[tokio::test]
async fn listing_without_user_id_is_a_missing_parameter() {
    let router = test_router().await;
    let (status, body) = send(&router, "GET", "/expenses", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], json!("missing_parameter"));
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let router = test_router().await;
    register_alice(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/users",
        Some(json!({
            "name": "Alice Two",
            "email": "alice@example.com",
            "username": "alice2",
            "password": "secret1",
            "position": "Other",
            "incomeSources": ["Salary"],
            "financialGoals": ["Save"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], json!("duplicate_email"));
}

#[tokio::test]
async fn login_never_distinguishes_bad_email_from_bad_password() {
    let router = test_router().await;
    register_alice(&router).await;

    let (ok_status, user) = send(
        &router,
        "POST",
        "/login",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(ok_status, StatusCode::OK);
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());

    for creds in [
        json!({"email": "alice@example.com", "password": "wrong-1"}),
        json!({"email": "nobody@example.com", "password": "secret1"}),
    ] {
        let (status, body) = send(&router, "POST", "/login", Some(creds)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["kind"], json!("invalid_credentials"));
    }
}

#[tokio::test]
async fn user_listing_exposes_no_credential_material() {
    let router = test_router().await;
    register_alice(&router).await;

    let (status, body) = send(&router, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("password").is_none());
    assert!(users[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn special_payment_path_routes() {
    let router = test_router().await;
    let user_id = register_alice(&router).await;

    let (status, created) = send(
        &router,
        "POST",
        "/special-payments",
        Some(json!({
            "paidAmount": 320.0,
            "paidDate": "2024-06-15",
            "reason": "car repair",
            "userId": user_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&router, "GET", &format!("/special-payments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["paidAmount"], json!(320.0));

    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/special-payments/{id}"),
        Some(json!({"paidAmount": 350.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["paidAmount"], json!(350.0));
    assert_eq!(updated["reason"], json!("car repair"));

    let (status, _) = send(&router, "DELETE", &format!("/special-payments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, "GET", &format!("/special-payments/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], json!("not_found"));

    let (status, body) = send(&router, "GET", "/special-payments/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], json!("invalid_id"));
}

#[tokio::test]
async fn challenges_list_newest_first() {
    let router = test_router().await;
    let user_id = register_alice(&router).await;

    for text in ["Walk to work this week", "Cook at home twice a week"] {
        let (status, _) = send(
            &router,
            "POST",
            "/challenges",
            Some(json!({"challenge": text, "userId": user_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, body) = send(
        &router,
        "GET",
        &format!("/challenges?userId={user_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items[0]["challenge"], json!("Cook at home twice a week"));
    assert_eq!(items[1]["challenge"], json!("Walk to work this week"));
}

#[tokio::test]
async fn stats_report_totals_and_percentages() {
    let router = test_router().await;
    let user_id = register_alice(&router).await;

    for (amount, category) in [(10.0, "Food"), (5.0, "Food"), (3.0, "Transport")] {
        send(
            &router,
            "POST",
            "/expenses",
            Some(json!({
                "amount": amount,
                "category": category,
                "date": "2024-01-10",
                "userId": user_id,
            })),
        )
        .await;
    }
    send(
        &router,
        "POST",
        "/incomes",
        Some(json!({
            "amount": 100,
            "source": "Salary",
            "date": "2024-01-01",
            "userId": user_id,
        })),
    )
    .await;

    let (status, body) = send(&router, "GET", &format!("/stats?userId={user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalExpenses"], json!(18.0));
    assert_eq!(body["totalIncome"], json!(100.0));
    assert_eq!(body["net"], json!(82.0));
    assert_eq!(body["categories"][0]["category"], json!("Food"));
    assert_eq!(body["categories"][0]["total"], json!(15.0));
}

#[tokio::test]
async fn voice_endpoints_return_transcripts_and_drafts() {
    let router = test_router().await;

    let audio = base64::engine::general_purpose::STANDARD.encode(b"fake-wav-bytes");
    let (status, body) = send(
        &router,
        "POST",
        "/assist/transcribe-audio",
        Some(json!({"fileName": "note.wav", "audioBase64": audio})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["transcript"],
        json!("I spent 25 dollars and 50 cents on lunch")
    );

    let (status, body) = send(
        &router,
        "POST",
        "/assist/voice-expense",
        Some(json!({"transcript": "lunch for 25.50"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], json!(25.5));
    assert_eq!(body["label"], json!("Food"));

    let (status, body) = send(
        &router,
        "POST",
        "/assist/transcribe-audio",
        Some(json!({"fileName": "note.wav", "audioBase64": "@@not-base64@@"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], json!("bad_request"));
}

#[tokio::test]
async fn generated_challenges_require_financial_data_and_persist() {
    let router = test_router().await;
    let user_id = register_alice(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/assist/challenges",
        Some(json!({"userId": user_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], json!("bad_request"));

    send(
        &router,
        "POST",
        "/expenses",
        Some(json!({
            "amount": 6.5,
            "category": "Coffee",
            "date": "2024-03-01",
            "userId": user_id,
        })),
    )
    .await;

    let (status, body) = send(
        &router,
        "POST",
        "/assist/challenges",
        Some(json!({"userId": user_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let generated = body.as_array().unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(
        generated[0]["challenge"],
        json!("Limit coffee purchases to twice per week")
    );

    let (_, listed) = send(
        &router,
        "GET",
        &format!("/challenges?userId={user_id}"),
        None,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rates_pass_through_for_display() {
    let router = test_router().await;
    let (status, body) = send(&router, "GET", "/rates?base=USD", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base"], json!("USD"));
    assert_eq!(body["rates"]["EUR"], json!(0.92));
}

#[tokio::test]
async fn profile_update_and_account_deletion() {
    let router = test_router().await;
    let user_id = register_alice(&router).await;

    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/users?userId={user_id}"),
        Some(json!({"name": "Alice Cooper"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], json!("Alice Cooper"));

    send(
        &router,
        "POST",
        "/expenses",
        Some(json!({
            "amount": 12,
            "category": "Books",
            "date": "2024-02-02",
            "userId": user_id,
        })),
    )
    .await;

    let (status, _) = send(&router, "DELETE", &format!("/users?userId={user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, "GET", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, listed) = send(
        &router,
        "GET",
        &format!("/expenses?userId={user_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().unwrap().is_empty());
}
