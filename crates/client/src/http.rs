//! Thin typed wrapper over the REST contract.
//!
//! One method per endpoint; non-2xx responses are decoded from the uniform
//! error envelope and classified by status code.

use api_types::challenge::ChallengeView;
use api_types::expense::ExpenseView;
use api_types::income::IncomeView;
use api_types::special_payment::SpecialPaymentView;
use api_types::stats::StatsResponse;
use api_types::user::UserView;
use api_types::{ApiError, Deleted};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid URL or other local setup problem.
    #[error("client configuration error: {0}")]
    Config(String),
    /// 404 from the server.
    #[error("not found")]
    NotFound,
    /// 4xx other than 404; carries the server's classified message.
    #[error("request rejected: {0}")]
    Rejected(String),
    /// 5xx; carries the server's classified message.
    #[error("server error: {0}")]
    Server(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::Config(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Config(format!("invalid endpoint: {err}")))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.request(method, self.endpoint(path)?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ClientError::Transport)?;
        if response.status().is_success() {
            return response.json::<T>().await.map_err(ClientError::Transport);
        }

        let status = response.status();
        let message = response
            .json::<ApiError>()
            .await
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| "unknown error".to_string());

        Err(match status.as_u16() {
            404 => ClientError::NotFound,
            400..=499 => ClientError::Rejected(message),
            _ => ClientError::Server(message),
        })
    }

    // ── users ───────────────────────────────────────────────────────────

    pub async fn register(&self, payload: &Value) -> Result<UserView, ClientError> {
        self.request(Method::POST, "users", Some(payload)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserView, ClientError> {
        let payload = json!({"email": email, "password": password});
        self.request(Method::POST, "login", Some(&payload)).await
    }

    pub async fn user(&self, id: &str) -> Result<UserView, ClientError> {
        self.request(Method::GET, &format!("users/{id}"), None).await
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        payload: &Value,
    ) -> Result<UserView, ClientError> {
        self.request(Method::PUT, &format!("users?userId={user_id}"), Some(payload))
            .await
    }

    pub async fn delete_account(&self, user_id: &str) -> Result<Deleted, ClientError> {
        self.request(Method::DELETE, &format!("users?userId={user_id}"), None)
            .await
    }

    // ── expenses ────────────────────────────────────────────────────────

    pub async fn expenses(&self, user_id: &str) -> Result<Vec<ExpenseView>, ClientError> {
        self.request(Method::GET, &format!("expenses?userId={user_id}"), None)
            .await
    }

    pub async fn create_expense(&self, payload: &Value) -> Result<ExpenseView, ClientError> {
        self.request(Method::POST, "expenses", Some(payload)).await
    }

    pub async fn update_expense(
        &self,
        id: &str,
        payload: &Value,
    ) -> Result<ExpenseView, ClientError> {
        self.request(Method::PUT, &format!("expenses?id={id}"), Some(payload))
            .await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<Deleted, ClientError> {
        self.request(Method::DELETE, &format!("expenses?id={id}"), None)
            .await
    }

    // ── incomes ─────────────────────────────────────────────────────────

    pub async fn incomes(&self, user_id: &str) -> Result<Vec<IncomeView>, ClientError> {
        self.request(Method::GET, &format!("incomes?userId={user_id}"), None)
            .await
    }

    pub async fn create_income(&self, payload: &Value) -> Result<IncomeView, ClientError> {
        self.request(Method::POST, "incomes", Some(payload)).await
    }

    pub async fn update_income(
        &self,
        id: &str,
        payload: &Value,
    ) -> Result<IncomeView, ClientError> {
        self.request(Method::PUT, &format!("incomes?id={id}"), Some(payload))
            .await
    }

    pub async fn delete_income(&self, id: &str) -> Result<Deleted, ClientError> {
        self.request(Method::DELETE, &format!("incomes?id={id}"), None)
            .await
    }

    // ── special payments ────────────────────────────────────────────────

    pub async fn special_payments(
        &self,
        user_id: &str,
    ) -> Result<Vec<SpecialPaymentView>, ClientError> {
        self.request(
            Method::GET,
            &format!("special-payments?userId={user_id}"),
            None,
        )
        .await
    }

    pub async fn create_special_payment(
        &self,
        payload: &Value,
    ) -> Result<SpecialPaymentView, ClientError> {
        self.request(Method::POST, "special-payments", Some(payload))
            .await
    }

    pub async fn update_special_payment(
        &self,
        id: &str,
        payload: &Value,
    ) -> Result<SpecialPaymentView, ClientError> {
        self.request(Method::PUT, &format!("special-payments/{id}"), Some(payload))
            .await
    }

    pub async fn delete_special_payment(&self, id: &str) -> Result<Deleted, ClientError> {
        self.request(Method::DELETE, &format!("special-payments/{id}"), None)
            .await
    }

    // ── challenges ──────────────────────────────────────────────────────

    pub async fn challenges(&self, user_id: &str) -> Result<Vec<ChallengeView>, ClientError> {
        self.request(Method::GET, &format!("challenges?userId={user_id}"), None)
            .await
    }

    pub async fn create_challenge(&self, payload: &Value) -> Result<ChallengeView, ClientError> {
        self.request(Method::POST, "challenges", Some(payload)).await
    }

    pub async fn delete_challenge(&self, id: &str) -> Result<Deleted, ClientError> {
        self.request(Method::DELETE, &format!("challenges/{id}"), None)
            .await
    }

    // ── reports ─────────────────────────────────────────────────────────

    pub async fn stats(&self, user_id: &str) -> Result<StatsResponse, ClientError> {
        self.request(Method::GET, &format!("stats?userId={user_id}"), None)
            .await
    }
}
