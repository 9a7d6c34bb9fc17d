//! Special payments API endpoints, addressed by path id.

use api_types::{Deleted, special_payment::SpecialPaymentView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;

use engine::DateRange;

use crate::expenses::ListQuery;
use crate::{ServerError, server::ServerState};

pub(crate) fn map_special_payment(payment: engine::SpecialPayment) -> SpecialPaymentView {
    SpecialPaymentView {
        id: payment.id,
        paid_amount: payment.paid_amount,
        paid_date: payment.paid_date,
        reason: payment.reason,
        user_id: payment.user_id,
        created_at: payment.created_at,
        updated_at: payment.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<SpecialPaymentView>), ServerError> {
    let payment = state.engine.create_special_payment(&payload).await?;
    Ok((StatusCode::CREATED, Json(map_special_payment(payment))))
}

/// Most recent payment date first.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SpecialPaymentView>>, ServerError> {
    let range = DateRange {
        from: query.from,
        to: query.to,
    };
    let payments = state
        .engine
        .list_special_payments(query.user_id.as_deref(), &range)
        .await?
        .into_iter()
        .map(map_special_payment)
        .collect();
    Ok(Json(payments))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SpecialPaymentView>, ServerError> {
    let payment = state.engine.special_payment(&id).await?;
    Ok(Json(map_special_payment(payment)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<SpecialPaymentView>, ServerError> {
    let payment = state.engine.update_special_payment(&id, &payload).await?;
    Ok(Json(map_special_payment(payment)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_special_payment(&id).await?;
    Ok(Json(Deleted {
        message: "Special payment deleted successfully".to_string(),
    }))
}
