//! Currency-rate pass-through for client-side display.

use api_types::rates::RatesResponse;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{ServerError, server::ServerState};

#[derive(Debug, Deserialize)]
pub struct RatesQuery {
    pub base: Option<String>,
}

pub async fn get_rates(
    State(state): State<ServerState>,
    Query(query): Query<RatesQuery>,
) -> Result<Json<RatesResponse>, ServerError> {
    let base = query.base.unwrap_or_else(|| "USD".to_string());
    let rates = state.rates.rates(&base).await?;
    Ok(Json(RatesResponse { base, rates }))
}
