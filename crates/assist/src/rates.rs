//! Currency-rate lookup. Display only, never persisted.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{AssistError, RateSource};

const DEFAULT_BASE_URL: &str = "https://open.er-api.com/v6/latest";

#[derive(Clone, Debug)]
pub struct RateClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    rates: Option<HashMap<String, f64>>,
}

impl RateClient {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[async_trait]
impl RateSource for RateClient {
    async fn rates(&self, base: &str) -> Result<HashMap<String, f64>, AssistError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, base))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("rate lookup failed with status {status}");
            return Err(AssistError::Rejected(format!("status {status}")));
        }

        let parsed: RateResponse = response.json().await?;
        parsed
            .rates
            .ok_or_else(|| AssistError::Malformed("no rates in reply".to_string()))
    }
}
