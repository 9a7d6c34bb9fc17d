use engine::{Engine, EngineError, Position, User};
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::json;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn registration(email: &str, username: &str) -> serde_json::Value {
    json!({
        "name": "Alice",
        "email": email,
        "username": username,
        "password": "secret1",
        "position": "Private Employee",
        "incomeSources": ["Salary"],
        "financialGoals": ["Emergency fund"],
    })
}

async fn register_alice(engine: &Engine) -> User {
    engine
        .register(&registration("alice@example.com", "alice"))
        .await
        .unwrap()
}

#[tokio::test]
async fn register_returns_profile_without_credentials() {
    let engine = engine_with_db().await;
    let user = register_alice(&engine).await;

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.username, "alice");
    assert_eq!(user.position, Position::PrivateEmployee);
    assert_eq!(user.income_sources, vec!["Salary"]);

    let fetched = engine.user(&user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.email, user.email);
    assert_eq!(fetched.financial_goals, vec!["Emergency fund"]);
}

#[tokio::test]
async fn same_email_registration_fails_with_duplicate_email() {
    let engine = engine_with_db().await;
    register_alice(&engine).await;

    let err = engine
        .register(&registration("alice@example.com", "other"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateEmail);
}

#[tokio::test]
async fn same_username_registration_fails_with_duplicate_username() {
    let engine = engine_with_db().await;
    register_alice(&engine).await;

    let err = engine
        .register(&registration("second@example.com", "alice"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateUsername);
}

#[tokio::test]
async fn bad_password_and_unknown_email_are_indistinguishable() {
    let engine = engine_with_db().await;
    register_alice(&engine).await;

    let wrong_password = engine
        .authenticate(&json!({"email": "alice@example.com", "password": "wrong-1"}))
        .await
        .unwrap_err();
    let unknown_email = engine
        .authenticate(&json!({"email": "nobody@example.com", "password": "secret1"}))
        .await
        .unwrap_err();

    assert_eq!(wrong_password, EngineError::InvalidCredentials);
    assert_eq!(unknown_email, EngineError::InvalidCredentials);
}

#[tokio::test]
async fn successful_login_returns_the_user() {
    let engine = engine_with_db().await;
    let user = register_alice(&engine).await;

    let authenticated = engine
        .authenticate(&json!({"email": "alice@example.com", "password": "secret1"}))
        .await
        .unwrap();
    assert_eq!(authenticated.id, user.id);
}

#[tokio::test]
async fn profile_update_rehashes_a_new_password() {
    let engine = engine_with_db().await;
    let user = register_alice(&engine).await;

    engine
        .update_user(&user.id, &json!({"password": "next-secret"}))
        .await
        .unwrap();

    assert!(
        engine
            .authenticate(&json!({"email": "alice@example.com", "password": "next-secret"}))
            .await
            .is_ok()
    );
    assert_eq!(
        engine
            .authenticate(&json!({"email": "alice@example.com", "password": "secret1"}))
            .await
            .unwrap_err(),
        EngineError::InvalidCredentials
    );
}

#[tokio::test]
async fn profile_update_rejects_taken_email() {
    let engine = engine_with_db().await;
    register_alice(&engine).await;
    let bob = engine
        .register(&registration("bob@example.com", "bob"))
        .await
        .unwrap();

    let err = engine
        .update_user(&bob.id, &json!({"email": "alice@example.com"}))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateEmail);
}

#[tokio::test]
async fn deleting_a_user_removes_owned_records() {
    let engine = engine_with_db().await;
    let user = register_alice(&engine).await;

    engine
        .create_expense(&json!({
            "amount": 42.5,
            "category": "Groceries",
            "date": "2024-01-05",
            "userId": user.id,
        }))
        .await
        .unwrap();
    engine
        .create_income(&json!({
            "amount": 1200,
            "source": "Salary",
            "date": "2024-01-01",
            "userId": user.id,
        }))
        .await
        .unwrap();
    engine
        .create_challenge(&json!({
            "challenge": "No takeaway this month",
            "userId": user.id,
        }))
        .await
        .unwrap();

    engine.delete_user(&user.id).await.unwrap();

    assert_eq!(
        engine.user(&user.id).await.unwrap_err(),
        EngineError::NotFound("user".to_string())
    );
    let expenses = engine
        .list_expenses(Some(&user.id), &engine::DateRange::default())
        .await
        .unwrap();
    assert!(expenses.is_empty());
    let challenges = engine.list_challenges(Some(&user.id)).await.unwrap();
    assert!(challenges.is_empty());
}

#[tokio::test]
async fn deleting_twice_surfaces_not_found() {
    let engine = engine_with_db().await;
    let user = register_alice(&engine).await;

    engine.delete_user(&user.id).await.unwrap();
    assert_eq!(
        engine.delete_user(&user.id).await.unwrap_err(),
        EngineError::NotFound("user".to_string())
    );
}

#[tokio::test]
async fn malformed_user_id_is_rejected_before_lookup() {
    let engine = engine_with_db().await;
    let err = engine.user("definitely-not-a-uuid").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidId("definitely-not-a-uuid".to_string())
    );
}
