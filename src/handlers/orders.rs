//! Order endpoints: customer history, checkout, and the manager console.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::order::{CheckoutRequest, OrderStatus};
use crate::repository::orders;
use crate::{AppState, Result, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub user_id: Option<i64>,
    pub order_number: Option<String>,
}

/// Customer history by `userId`, or a single-order lookup by `orderNumber`
/// (the human-facing number printed on the confirmation page).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    if let Some(number) = params.order_number.filter(|n| !n.is_empty()) {
        let order = orders::find_by_order_number(&state.db, &number)
            .await?
            .ok_or(StoreError::NotFound("order"))?;
        let items = orders::items_for_order(&state.db, order.id).await?;
        return Ok(Json(json!({ "order": order, "items": items })));
    }

    let user_id = params
        .user_id
        .ok_or_else(|| StoreError::validation("userId is required"))?;
    let items = orders::find_by_user(&state.db, user_id).await?;
    Ok(Json(json!({ "orders": items })))
}

/// `POST /api/orders` is the checkout entry point. Validation happens before
/// any write; the placement itself is one transaction.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let draft = req.into_draft()?;
    let (order, buyer) = orders::place(&state.db, draft).await?;

    state
        .events
        .publish(
            "order.created",
            &json!({
                "orderId": order.order.id,
                "orderNumber": order.order.order_number,
                "userId": buyer.user_id(),
                "guest": buyer.is_guest(),
                "totalAmount": order.order.total_amount,
            }),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "order": order })),
    ))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Value>> {
    let order = orders::find_by_id(&state.db, id)
        .await?
        .ok_or(StoreError::NotFound("order"))?;
    let items = orders::items_for_order(&state.db, id).await?;
    Ok(Json(json!({ "order": order, "items": items })))
}

/// Manager listing: all orders with their items grouped in.
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Value>> {
    let items = orders::find_all_with_items(&state.db).await?;
    Ok(Json(json!({ "orders": items })))
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Value>> {
    let raw = req
        .status
        .ok_or_else(|| StoreError::validation("status is required"))?;
    let status = OrderStatus::parse(&raw)?;
    orders::update_status(&state.db, id, status).await?;
    Ok(Json(json!({ "success": true })))
}
